//! Folder scanning: from a mods directory to an ordered [`ModSet`].

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use modgraph_error::{Error, Result};

use crate::archive::ModArchive;
use crate::ignore::is_ignored_mod;
use crate::record::{ModRecord, ModSet};

/// Scan `dir` for mod packages and collect one record per mod.
///
/// Only direct children with a `.jar` extension (ASCII case-insensitive) are
/// considered, in file-name order so repeated runs see the same sequence.
/// Archives that cannot be opened or carry no readable descriptor are skipped
/// with a warning; platform mods are dropped silently. When two archives
/// declare the same mod id the later one replaces the earlier in place.
///
/// Fails only when `dir` itself is missing, unreadable, or not a directory.
pub fn scan_mods_dir(dir: &Path) -> Result<ModSet> {
    let meta = std::fs::metadata(dir).map_err(|err| {
        Error::from(err)
            .with_operation("scan::scan_mods_dir")
            .with_context("dir", dir.display().to_string())
    })?;
    if !meta.is_dir() {
        return Err(
            Error::invalid_argument(format!("'{}' is not a directory", dir.display()))
                .with_operation("scan::scan_mods_dir"),
        );
    }
    if let Err(err) = std::fs::read_dir(dir) {
        return Err(
            Error::traversal_failed(format!("cannot read '{}'", dir.display()))
                .with_operation("scan::scan_mods_dir")
                .set_source(err),
        );
    }

    debug!("scanning '{}' for mod packages", dir.display());

    let mut set = ModSet::new();
    let mut skipped = 0usize;
    for path in discover_jars(dir) {
        match read_record(&path) {
            Ok(Some(record)) => {
                if let Some(existing) = set.get(&record.id) {
                    warn!(
                        "duplicate mod id '{}': '{}' replaces '{}'",
                        record.id,
                        path.display(),
                        existing.path.display()
                    );
                }
                set.insert(record);
            }
            Ok(None) => {}
            Err(err) => {
                warn!("skipping '{}': {}", path.display(), err);
                skipped += 1;
            }
        }
    }

    info!(
        "collected {} mods from '{}' ({} skipped)",
        set.len(),
        dir.display(),
        skipped
    );
    Ok(set)
}

/// Find the dependency ids that are not installed as their own package but
/// ship inside one of the installed archives.
///
/// Every missing id is probed against every archive in record order, first
/// hit wins. Archives that cannot be reopened are skipped with a warning;
/// the ids they might have answered for simply stay missing.
pub fn detect_bundled(set: &ModSet) -> BTreeSet<String> {
    let mut missing: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in set.iter() {
        for dep in &record.depends {
            if !set.contains(&dep.id) && seen.insert(dep.id.as_str()) {
                missing.push(dep.id.as_str());
            }
        }
    }

    let mut bundled = BTreeSet::new();
    if missing.is_empty() {
        return bundled;
    }

    let mut archives: Vec<ModArchive> = Vec::with_capacity(set.len());
    for record in set.iter() {
        match ModArchive::open(&record.path) {
            Ok(archive) => archives.push(archive),
            Err(err) => warn!(
                "cannot reopen '{}' for bundle probing: {}",
                record.path.display(),
                err
            ),
        }
    }

    for dep in missing {
        for archive in &mut archives {
            if archive.bundles(dep) {
                debug!("'{}' ships inside '{}'", dep, archive.path().display());
                bundled.insert(dep.to_string());
                break;
            }
        }
    }
    bundled
}

/// Direct children of `dir` with a `.jar` extension, sorted by file name.
fn discover_jars(dir: &Path) -> Vec<PathBuf> {
    let mut jars = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("cannot read directory entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"))
        {
            jars.push(path);
        }
    }
    jars
}

fn read_record(path: &Path) -> Result<Option<ModRecord>> {
    let mut archive = ModArchive::open(path)?;
    let manifest = archive.metadata()?;

    if is_ignored_mod(&manifest.id) {
        debug!(
            "ignoring platform mod '{}' from '{}'",
            manifest.id,
            path.display()
        );
        return Ok(None);
    }

    let depends = manifest
        .depends
        .into_iter()
        .filter(|dep| !is_ignored_mod(&dep.id))
        .collect();

    Ok(Some(ModRecord {
        id: manifest.id,
        name: manifest.name,
        depends,
        path: path.to_path_buf(),
    }))
}
