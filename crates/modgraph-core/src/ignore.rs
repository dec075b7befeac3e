//! Platform and loader ids excluded from the graph.

/// Ids that belong to the platform rather than the pack: the game itself, the
/// loaders, and the Fabric API module ids. Never emitted as nodes or edge
/// endpoints.
pub const IGNORED_MOD_IDS: &[&str] = &[
    "minecraft",
    "forge",
    "neoforge",
    "fabricloader",
    "fabric-loader",
    "fabric",
    "fabric-api",
    "fabric_api",
    "fabric-resource-loader-v0",
    "fabric-screen-api-v1",
    "fabric-networking-api-v1",
    "fabric-lifecycle-events-v1",
    "fabric-renderer-api-v1",
    "fabric-registry-sync-v0",
    "fabric-api-base",
    "fabric-events-interaction-v0",
    "fabric-permissions-api-v0",
    "fabric-command-api-v2",
    "fabric-kotlin",
    "java",
];

/// Check whether an id is platform noise (ASCII-case-insensitive).
pub fn is_ignored_mod(id: &str) -> bool {
    !id.is_empty()
        && IGNORED_MOD_IDS
            .iter()
            .any(|ignored| id.eq_ignore_ascii_case(ignored))
}
