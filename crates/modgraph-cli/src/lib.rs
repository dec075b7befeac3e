//! modgraph command-line interface.

pub mod pipeline;

use std::path::PathBuf;

use modgraph_core::Result;

pub use pipeline::build_dot;

/// Options for running modgraph.
pub struct ModgraphOptions {
    /// Folder containing the mod packages.
    pub dir: PathBuf,
    /// Where the DOT document ends up.
    pub output: PathBuf,
}

/// Main entry point: scan the folder and return the rendered DOT document.
///
/// Only reads the mods folder; writing the result to `opts.output` is the
/// binary's job.
pub fn run_main(opts: &ModgraphOptions) -> Result<String> {
    pipeline::build_dot(opts)
}
