use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use modgraph_cli::{ModgraphOptions, run_main};
use modgraph_core::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "modgraph",
    about = "Export a mod folder's dependency graph as Graphviz DOT",
    version
)]
pub struct Cli {
    /// Folder containing the mod .jar files
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dir: PathBuf,

    /// Output DOT file path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "mods.dot"
    )]
    output: PathBuf,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = ModgraphOptions {
        dir: args.dir,
        output: args.output,
    };

    let dot = run_main(&opts)?;

    std::fs::write(&opts.output, &dot).map_err(|err| {
        Error::from(err).with_context("output", opts.output.display().to_string())
    })?;
    tracing::info!("output written to {}", opts.output.display());
    println!("DOT file written to {}", opts.output.display());

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() {
    let args = Cli::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        tracing::error!(error = %e, "execution failed");
        std::process::exit(1);
    }
}
