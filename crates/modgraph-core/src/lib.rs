//! Core scanning and graph construction for modgraph.
//!
//! The pipeline is a single pass: [`scan::scan_mods_dir`] turns a mods folder
//! into an ordered [`record::ModSet`], [`scan::detect_bundled`] resolves
//! dependencies that ship inside other archives, and [`graph::build_mod_graph`]
//! turns both into the node/edge lists the DOT renderer consumes.

pub mod archive;
pub mod graph;
pub mod ignore;
pub mod manifest;
pub mod record;
pub mod scan;

pub use archive::ModArchive;
pub use graph::{DepEdge, ModGraph, ModNode, Presence, build_mod_graph};
pub use manifest::ModManifest;
pub use record::{Dependency, ModRecord, ModSet, RequirementLevel};
pub use scan::{detect_bundled, scan_mods_dir};

pub use modgraph_error::{Error, ErrorKind, ErrorStatus, Result};
