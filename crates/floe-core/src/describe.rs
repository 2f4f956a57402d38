//! Bootstrap from the producer's initial graph description.
//!
//! The process-modeling side hands the editor a pair of mappings: unit id to
//! type tag, and unit id to ordered outlet destinations. Everything visual
//! (placement, sizes, icons) is filled in here.

use crate::Result;
use crate::graph::{DEFAULT_NODE_SIZE, FlowsheetGraph};
use crate::icons::IconRegistry;
use crate::unit::UnitType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowsheetDescription {
    /// Unit id to unit type, in producer order. Order matters: it drives the
    /// staircase placement.
    pub units: IndexMap<String, UnitType>,
    /// Unit id to ordered destination unit ids. Units absent here (or mapped
    /// to an empty list) simply have no outlets wired in the diagram.
    #[serde(default)]
    pub streams: IndexMap<String, Vec<String>>,
}

/// Builds a fresh graph from a description: nodes on the default staircase,
/// one directed edge per destination entry.
///
/// A destination (or stream source) that names no declared unit fails the
/// whole construction; nothing partially built is returned.
pub fn bootstrap(
    description: &FlowsheetDescription,
    icons: &IconRegistry,
) -> Result<FlowsheetGraph> {
    let mut graph = FlowsheetGraph::new();
    for (index, (id, unit_type)) in description.units.iter().enumerate() {
        graph.add_node(
            icons,
            id.clone(),
            unit_type.clone(),
            FlowsheetGraph::staircase_position(index),
            DEFAULT_NODE_SIZE,
        )?;
    }
    for (source, destinations) in &description.streams {
        for target in destinations {
            graph.add_edge(source, target)?;
        }
    }
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "bootstrapped flowsheet graph"
    );
    Ok(graph)
}
