//! Read access to mod package archives.
//!
//! A mod package is a zip file (`.jar`). [`ModArchive`] wraps one open archive
//! and answers the two questions the scanner asks: what mod does this package
//! declare ([`ModArchive::metadata`]), and does it ship some other mod inside
//! itself ([`ModArchive::bundles`]).

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use modgraph_error::{Error, Result};

use crate::manifest::{
    self, FABRIC_MOD_JSON, FORGE_MODS_TOML, LEGACY_MCMOD_INFO, ModManifest,
};

type ManifestParser = fn(&[u8]) -> Result<ModManifest>;

/// Descriptor formats in probe order. First readable descriptor wins.
const DESCRIPTOR_PROBES: [(&str, ManifestParser); 3] = [
    (FABRIC_MOD_JSON, manifest::parse_fabric_mod_json),
    (FORGE_MODS_TOML, manifest::parse_forge_mods_toml),
    (LEGACY_MCMOD_INFO, manifest::parse_mcmod_info),
];

/// A mod package opened for reading.
#[derive(Debug)]
pub struct ModArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl ModArchive {
    /// Open `path` as a zip archive.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::open(&path).map_err(|err| {
            Error::from(err)
                .with_operation("archive::open")
                .with_context("archive", path.display().to_string())
        })?;
        let zip = ZipArchive::new(file).map_err(|err| {
            Error::archive_invalid(path.display().to_string())
                .with_operation("archive::open")
                .set_source(err)
        })?;
        Ok(Self { path, zip })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract the mod descriptor, probing the known formats in order.
    ///
    /// A descriptor that is present but malformed falls through to the next
    /// format; if nothing parses, the first failure is reported. An archive
    /// with no descriptor at all yields [`modgraph_error::ErrorKind::MetadataMissing`].
    pub fn metadata(&mut self) -> Result<ModManifest> {
        let origin = self.path.display().to_string();
        read_manifest(&mut self.zip, &origin)
            .map_err(|err| err.with_operation("archive::metadata"))
    }

    /// Check whether this archive ships `dep_id` inside itself rather than as
    /// a sibling package.
    ///
    /// Four signals count, any one of them is enough: a nested jar under
    /// `META-INF/jars/` or `META-INF/jarjar/` whose own descriptor declares
    /// the id; a resource namespace folder `assets/<id>/` or `data/<id>/`;
    /// class files under a package path named after the id; or a `jars` list
    /// entry in `fabric.mod.json` whose `id` contains the dependency id.
    /// Probing failures are treated as "no".
    pub fn bundles(&mut self, dep_id: &str) -> bool {
        let dep = dep_id.to_ascii_lowercase();
        self.bundles_nested_jar(&dep)
            || self.bundles_namespace(&dep)
            || self.bundles_class_package(&dep)
            || self.bundles_fabric_jar_ref(&dep)
    }

    fn bundles_nested_jar(&mut self, dep: &str) -> bool {
        let nested: Vec<String> = self
            .zip
            .file_names()
            .filter(|name| {
                (name.starts_with("META-INF/jars/") || name.starts_with("META-INF/jarjar/"))
                    && name.ends_with(".jar")
            })
            .map(str::to_owned)
            .collect();

        for name in nested {
            let Ok(Some(bytes)) = read_entry(&mut self.zip, &name) else {
                continue;
            };
            let Ok(mut inner) = ZipArchive::new(Cursor::new(bytes)) else {
                continue;
            };
            if let Ok(meta) = read_manifest(&mut inner, &name)
                && meta.id.eq_ignore_ascii_case(dep)
            {
                debug!("'{}' found as nested jar '{}'", dep, name);
                return true;
            }
        }
        false
    }

    fn bundles_namespace(&self, dep: &str) -> bool {
        let assets = format!("assets/{dep}/");
        let data = format!("data/{dep}/");
        self.zip
            .file_names()
            .any(|name| name.starts_with(&assets) || name.starts_with(&data))
    }

    fn bundles_class_package(&self, dep: &str) -> bool {
        let prefixes = [
            format!("{dep}/"),
            format!("com/{dep}/"),
            format!("net/{dep}/"),
            format!("io/{dep}/"),
        ];
        self.zip.file_names().any(|name| {
            let lower = name.to_ascii_lowercase();
            lower.ends_with(".class") && prefixes.iter().any(|p| lower.starts_with(p.as_str()))
        })
    }

    fn bundles_fabric_jar_ref(&mut self, dep: &str) -> bool {
        let Ok(Some(bytes)) = read_entry(&mut self.zip, FABRIC_MOD_JSON) else {
            return false;
        };
        let Ok(doc) = serde_json::from_slice::<FabricJarList>(&bytes) else {
            return false;
        };
        doc.jars
            .iter()
            .any(|entry| entry.id.to_ascii_lowercase().contains(dep))
    }
}

/// The `jars` list of a Fabric descriptor, everything else ignored.
#[derive(Debug, Deserialize)]
struct FabricJarList {
    #[serde(default)]
    jars: Vec<FabricJarRef>,
}

#[derive(Debug, Deserialize)]
struct FabricJarRef {
    #[serde(default)]
    id: String,
}

/// Probe the descriptor formats of an open archive. Shared between top-level
/// packages and nested jars, hence generic over the reader.
fn read_manifest<R: Read + Seek>(zip: &mut ZipArchive<R>, origin: &str) -> Result<ModManifest> {
    let mut first_err: Option<Error> = None;
    for (entry, parse) in DESCRIPTOR_PROBES {
        let bytes = match read_entry(zip, entry) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => continue,
            Err(err) => {
                first_err.get_or_insert(err);
                continue;
            }
        };
        match parse(&bytes) {
            Ok(meta) => return Ok(meta),
            Err(err) => {
                debug!("descriptor '{}' in '{}' rejected: {}", entry, origin, err);
                first_err.get_or_insert(err);
            }
        }
    }
    Err(match first_err {
        Some(err) => err.with_context("archive", origin),
        None => Error::metadata_missing(origin),
    })
}

/// Read one entry out of an archive. `Ok(None)` means the entry is absent.
fn read_entry<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => {
            return Err(
                Error::metadata_invalid(format!("cannot open archive entry '{name}'"))
                    .with_operation("archive::read_entry")
                    .set_source(err),
            );
        }
    };
    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut buf).map_err(|err| {
        Error::from(err)
            .with_operation("archive::read_entry")
            .with_context("entry", name)
    })?;
    Ok(Some(buf))
}
