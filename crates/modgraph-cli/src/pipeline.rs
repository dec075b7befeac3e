//! Core processing pipeline: scan folder → probe bundles → build graph → render.

use std::time::Instant;

use tracing::{debug, info};

use modgraph_core::{ModSet, Result, build_mod_graph, detect_bundled, scan_mods_dir};
use modgraph_dot::render_mod_graph;

use crate::ModgraphOptions;

/// Run the whole pipeline for one mods folder.
///
/// 1. Scan the folder into a record set
/// 2. Probe installed archives for bundled dependencies
/// 3. Build the node/edge graph
/// 4. Render the DOT document
pub fn build_dot(opts: &ModgraphOptions) -> Result<String> {
    let scan_start = Instant::now();
    let set = scan_mods_dir(&opts.dir)?;
    info!(
        "Scanning: {:.2}s ({} mods)",
        scan_start.elapsed().as_secs_f64(),
        set.len()
    );
    log_record_set(&set);

    let probe_start = Instant::now();
    let bundled = detect_bundled(&set);
    info!(
        "Bundle probing: {:.2}s ({} bundled)",
        probe_start.elapsed().as_secs_f64(),
        bundled.len()
    );

    let graph_start = Instant::now();
    let graph = build_mod_graph(&set, &bundled);
    info!(
        "Graph building: {:.2}s ({} nodes, {} edges)",
        graph_start.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count()
    );

    let render_start = Instant::now();
    let dot = render_mod_graph(&graph);
    info!("Rendering: {:.2}s", render_start.elapsed().as_secs_f64());

    Ok(dot)
}

/// Log the collected mods and their declarations.
fn log_record_set(set: &ModSet) {
    for record in set.iter() {
        debug!("{} ({})", record.name, record.id);
        for dep in &record.depends {
            debug!("  -> {} ({:?})", dep.id, dep.level);
        }
    }
}
