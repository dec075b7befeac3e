//! Rendering a [`ModGraph`] as a `digraph mods` document.

use modgraph_core::{ModGraph, Presence};
use tracing::debug;

use crate::dot::DotBuilder;

/// Render the dependency graph to DOT.
///
/// Statement order follows the graph's node and edge order: installed nodes
/// first, then every edge, then the bundled and missing nodes. Styling:
///
/// - installed nodes: white box, label `<name>\n(<id>)`;
/// - bundled nodes: default style, label = id;
/// - missing nodes: red fill and white text when some referrer requires them,
///   yellow fill and black text when only ever optional;
/// - edges: solid for required, dashed for optional, colored red or yellow
///   when the target is missing.
pub fn render_mod_graph(graph: &ModGraph) -> String {
    let mut dot = DotBuilder::new("mods");
    dot.attr("rankdir", "LR");
    dot.node_style("shape=box, style=filled, fillcolor=\"white\"");

    dot.blank();
    for node in graph.nodes() {
        if node.presence.is_installed() {
            let label = format!("{}\n({})", node.label, node.id);
            dot.node_full(&node.id, &[("label", &label), ("fillcolor", "white")]);
        }
    }

    if graph.edge_count() > 0 {
        dot.blank();
    }
    for edge in graph.edges() {
        let to_missing = graph
            .node(&edge.to)
            .is_some_and(|node| node.presence.is_missing());
        let mut attrs: Vec<(&str, &str)> = Vec::with_capacity(2);
        if !edge.level.is_required() {
            attrs.push(("style", "dashed"));
        }
        if to_missing {
            let color = if edge.level.is_required() {
                "red"
            } else {
                "yellow"
            };
            attrs.push(("color", color));
        }
        if attrs.is_empty() {
            dot.edge(&edge.from, &edge.to);
        } else {
            dot.edge_with_attrs(&edge.from, &edge.to, &attrs);
        }
    }

    if graph.nodes().iter().any(|n| !n.presence.is_installed()) {
        dot.blank();
    }
    for node in graph.nodes() {
        match node.presence {
            Presence::Installed => {}
            Presence::Bundled => {
                dot.node(&node.id, &node.id);
            }
            Presence::Missing => {
                let required = node.required_by.is_some_and(|level| level.is_required());
                let (label, fill, font) = if required {
                    (format!("{}\n(MISSING REQUIRED)", node.id), "red", "white")
                } else {
                    (format!("{}\n(optional missing)", node.id), "yellow", "black")
                };
                dot.node_full(
                    &node.id,
                    &[("label", &label), ("fillcolor", fill), ("fontcolor", font)],
                );
            }
        }
    }

    debug!(
        "rendered {} nodes and {} edges to dot",
        graph.node_count(),
        graph.edge_count()
    );
    dot.build()
}
