//! DOT output for mod dependency graphs.
//!
//! Transforms a [`modgraph_core::ModGraph`] into the Graphviz text format.
//! The document is assembled in memory and handed back as one `String`;
//! nothing here touches the filesystem.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the low-level builder
//! - [`render`]: the mod graph renderer and its styling rules

mod dot;
mod render;

pub use dot::DotBuilder;
pub use render::render_mod_graph;
