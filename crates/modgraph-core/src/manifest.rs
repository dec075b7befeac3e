//! Parsers for the mod descriptor formats found inside an archive.
//!
//! Three formats are recognized, probed in this order:
//!
//! 1. `fabric.mod.json` (Fabric, JSON)
//! 2. `META-INF/mods.toml` (modern Forge / NeoForge, TOML)
//! 3. `mcmod.info` (legacy Forge, JSON array)
//!
//! Each parser reduces the descriptor to a [`ModManifest`]: the mod id, a
//! display name, and the dependency declarations in the order the descriptor
//! wrote them. Version ranges, sides, ordering hints and the rest of the
//! packaging surface are not modgraph's business and are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

use modgraph_error::{Error, Result};

use crate::record::Dependency;

/// Entry name of the Fabric descriptor.
pub const FABRIC_MOD_JSON: &str = "fabric.mod.json";
/// Entry name of the modern Forge descriptor.
pub const FORGE_MODS_TOML: &str = "META-INF/mods.toml";
/// Entry name of the legacy Forge descriptor.
pub const LEGACY_MCMOD_INFO: &str = "mcmod.info";

/// A descriptor reduced to what the graph needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModManifest {
    pub id: String,
    pub name: String,
    pub depends: Vec<Dependency>,
}

// =============================================================================
// Fabric: fabric.mod.json
// =============================================================================

/// With serde_json's `preserve_order` feature the maps keep the declaration
/// order of the JSON object keys, which the deterministic-output contract
/// depends on.
#[derive(Debug, Deserialize)]
struct FabricModJson {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    depends: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    recommends: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    suggests: serde_json::Map<String, serde_json::Value>,
}

/// Parse a `fabric.mod.json` descriptor.
///
/// `depends` keys become required dependencies; `recommends` and `suggests`
/// keys become optional ones. The version ranges in the map values are
/// ignored.
pub fn parse_fabric_mod_json(bytes: &[u8]) -> Result<ModManifest> {
    let doc: FabricModJson = serde_json::from_slice(bytes).map_err(|err| {
        Error::metadata_invalid("fabric.mod.json is not valid JSON")
            .with_operation("manifest::parse_fabric_mod_json")
            .set_source(err)
    })?;

    let id = doc.id.filter(|id| !id.is_empty()).ok_or_else(|| {
        Error::metadata_invalid("fabric.mod.json declares no mod id")
            .with_operation("manifest::parse_fabric_mod_json")
    })?;
    let name = doc
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.clone());

    let mut depends = Vec::with_capacity(
        doc.depends.len() + doc.recommends.len() + doc.suggests.len(),
    );
    for dep in doc.depends.keys() {
        depends.push(Dependency::required(dep.clone()));
    }
    for dep in doc.recommends.keys().chain(doc.suggests.keys()) {
        depends.push(Dependency::optional(dep.clone()));
    }

    Ok(ModManifest { id, name, depends })
}

// =============================================================================
// Modern Forge / NeoForge: META-INF/mods.toml
// =============================================================================

#[derive(Debug, Deserialize)]
struct ForgeModsToml {
    #[serde(default)]
    mods: Vec<ForgeModEntry>,
    /// `[[dependencies.<modId>]]` tables, keyed by the declaring mod's id.
    #[serde(default)]
    dependencies: BTreeMap<String, Vec<ForgeDependency>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForgeModEntry {
    mod_id: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForgeDependency {
    mod_id: Option<String>,
    /// Absent counts as optional.
    #[serde(default)]
    mandatory: bool,
}

/// Parse a `META-INF/mods.toml` descriptor.
///
/// The first `[[mods]]` entry names the mod; its `[[dependencies.<modId>]]`
/// tables are read in array order, `mandatory` deciding the requirement
/// level. Dependency entries without a `modId` are dropped.
pub fn parse_forge_mods_toml(bytes: &[u8]) -> Result<ModManifest> {
    let text = std::str::from_utf8(bytes).map_err(|err| {
        Error::metadata_invalid("mods.toml is not valid UTF-8")
            .with_operation("manifest::parse_forge_mods_toml")
            .set_source(err)
    })?;
    let doc: ForgeModsToml = toml::from_str(text).map_err(|err| {
        Error::metadata_invalid("mods.toml is not valid TOML")
            .with_operation("manifest::parse_forge_mods_toml")
            .set_source(err)
    })?;

    let entry = doc.mods.first().ok_or_else(|| {
        Error::metadata_invalid("mods.toml has no [[mods]] entry")
            .with_operation("manifest::parse_forge_mods_toml")
    })?;
    let id = entry
        .mod_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            Error::metadata_invalid("mods.toml [[mods]] entry declares no modId")
                .with_operation("manifest::parse_forge_mods_toml")
        })?;
    let name = entry
        .display_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.clone());

    let declared = doc.dependencies.get(&id).map(Vec::as_slice).unwrap_or(&[]);
    let mut depends = Vec::with_capacity(declared.len());
    for dep in declared {
        let Some(dep_id) = dep.mod_id.as_deref().filter(|dep_id| !dep_id.is_empty()) else {
            continue;
        };
        depends.push(if dep.mandatory {
            Dependency::required(dep_id)
        } else {
            Dependency::optional(dep_id)
        });
    }

    Ok(ModManifest { id, name, depends })
}

// =============================================================================
// Legacy Forge: mcmod.info
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct McmodEntry {
    #[serde(rename = "modid")]
    mod_id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    required_mods: Vec<String>,
}

/// Parse a legacy `mcmod.info` descriptor (a JSON array of mod entries).
///
/// Only the first entry is read. The format predates optional dependencies,
/// so both `dependencies` and `requiredMods` count as required.
pub fn parse_mcmod_info(bytes: &[u8]) -> Result<ModManifest> {
    let entries: Vec<McmodEntry> = serde_json::from_slice(bytes).map_err(|err| {
        Error::metadata_invalid("mcmod.info is not a valid JSON array")
            .with_operation("manifest::parse_mcmod_info")
            .set_source(err)
    })?;

    let entry = entries.into_iter().next().ok_or_else(|| {
        Error::metadata_invalid("mcmod.info array is empty")
            .with_operation("manifest::parse_mcmod_info")
    })?;
    let id = entry.mod_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        Error::metadata_invalid("mcmod.info entry declares no modid")
            .with_operation("manifest::parse_mcmod_info")
    })?;
    let name = entry
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.clone());

    let mut depends = Vec::with_capacity(entry.dependencies.len() + entry.required_mods.len());
    for dep in entry.dependencies.into_iter().chain(entry.required_mods) {
        if !dep.is_empty() {
            depends.push(Dependency::required(dep));
        }
    }

    Ok(ModManifest { id, name, depends })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RequirementLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fabric_full_descriptor() {
        let json = br#"{
            "schemaVersion": 1,
            "id": "waystones",
            "name": "Waystones",
            "version": "12.0.0",
            "depends": { "balm": ">=7.0", "minecraft": "1.20.x" },
            "recommends": { "jei": "*" },
            "suggests": { "rei": "*" }
        }"#;

        let manifest = parse_fabric_mod_json(json).expect("fabric parse");
        assert_eq!(manifest.id, "waystones");
        assert_eq!(manifest.name, "Waystones");
        assert_eq!(
            manifest.depends,
            vec![
                Dependency::required("balm"),
                Dependency::required("minecraft"),
                Dependency::optional("jei"),
                Dependency::optional("rei"),
            ]
        );
    }

    #[test]
    fn test_fabric_declaration_order_preserved() {
        let json = br#"{
            "id": "ordered",
            "depends": { "zeta": "*", "alpha": "*", "mu": "*" }
        }"#;

        let manifest = parse_fabric_mod_json(json).expect("fabric parse");
        let ids: Vec<_> = manifest.depends.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mu"]);
    }

    #[test]
    fn test_fabric_name_falls_back_to_id() {
        let manifest = parse_fabric_mod_json(br#"{"id": "bare"}"#).expect("fabric parse");
        assert_eq!(manifest.name, "bare");
        assert!(manifest.depends.is_empty());

        let manifest =
            parse_fabric_mod_json(br#"{"id": "bare", "name": ""}"#).expect("fabric parse");
        assert_eq!(manifest.name, "bare");
    }

    #[test]
    fn test_fabric_rejects_missing_id() {
        let err = parse_fabric_mod_json(br#"{"name": "No Id"}"#).unwrap_err();
        assert_eq!(err.kind(), modgraph_error::ErrorKind::MetadataInvalid);

        let err = parse_fabric_mod_json(b"{ not json").unwrap_err();
        assert_eq!(err.kind(), modgraph_error::ErrorKind::MetadataInvalid);
        assert!(err.source_ref().is_some());
    }

    #[test]
    fn test_forge_mods_toml() {
        let toml = br#"
modLoader = "javafml"
loaderVersion = "[47,)"

[[mods]]
modId = "jei"
displayName = "Just Enough Items"
version = "15.2.0"

[[dependencies.jei]]
modId = "forge"
mandatory = true
versionRange = "[47,)"

[[dependencies.jei]]
modId = "bookmarks"
mandatory = false
"#;

        let manifest = parse_forge_mods_toml(toml).expect("forge parse");
        assert_eq!(manifest.id, "jei");
        assert_eq!(manifest.name, "Just Enough Items");
        assert_eq!(
            manifest.depends,
            vec![
                Dependency::required("forge"),
                Dependency::optional("bookmarks"),
            ]
        );
    }

    #[test]
    fn test_forge_mandatory_defaults_to_optional() {
        let toml = br#"
[[mods]]
modId = "alpha"

[[dependencies.alpha]]
modId = "beta"
"#;

        let manifest = parse_forge_mods_toml(toml).expect("forge parse");
        assert_eq!(manifest.depends[0].level, RequirementLevel::Optional);
    }

    #[test]
    fn test_forge_ignores_other_mods_dependency_tables() {
        let toml = br#"
[[mods]]
modId = "alpha"

[[dependencies.somebodyelse]]
modId = "beta"
mandatory = true
"#;

        let manifest = parse_forge_mods_toml(toml).expect("forge parse");
        assert!(manifest.depends.is_empty());
    }

    #[test]
    fn test_forge_rejects_empty_mods_array() {
        let err = parse_forge_mods_toml(b"modLoader = \"javafml\"").unwrap_err();
        assert_eq!(err.kind(), modgraph_error::ErrorKind::MetadataInvalid);
    }

    #[test]
    fn test_mcmod_info() {
        let json = br#"[
            {
                "modid": "buildcraft",
                "name": "BuildCraft",
                "dependencies": ["buildcraftcore"],
                "requiredMods": ["forge", "buildcraftcore"]
            }
        ]"#;

        let manifest = parse_mcmod_info(json).expect("mcmod parse");
        assert_eq!(manifest.id, "buildcraft");
        assert_eq!(manifest.name, "BuildCraft");
        // Duplicates survive here; the graph builder collapses them.
        assert_eq!(
            manifest.depends,
            vec![
                Dependency::required("buildcraftcore"),
                Dependency::required("forge"),
                Dependency::required("buildcraftcore"),
            ]
        );
    }

    #[test]
    fn test_mcmod_rejects_non_array() {
        let err = parse_mcmod_info(br#"{"modid": "x"}"#).unwrap_err();
        assert_eq!(err.kind(), modgraph_error::ErrorKind::MetadataInvalid);

        let err = parse_mcmod_info(b"[]").unwrap_err();
        assert_eq!(err.kind(), modgraph_error::ErrorKind::MetadataInvalid);
    }
}
