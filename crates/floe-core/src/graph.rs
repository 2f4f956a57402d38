//! The authoritative graph behind the canvas.
//!
//! Storage follows the usual id-indexed layout: an insertion-ordered node map
//! plus an edge vector with a secondary id index, so snapshots come out
//! order-stable without sorting.

use crate::geom::{Point, Size, point, size};
use crate::icons::IconRegistry;
use crate::snapshot::{EdgeSnapshot, FORMAT_VERSION, FlowsheetSnapshot, NodeSnapshot};
use crate::unit::UnitType;
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Step between consecutively placed nodes on the default staircase.
pub const PLACEMENT_STEP: f64 = 100.0;

/// Offset of the first staircase position from the canvas origin.
pub const PLACEMENT_ORIGIN: f64 = 50.0;

pub const DEFAULT_NODE_SIZE: Size = Size::new(50.0, 50.0);

/// One diagram element representing a unit operation, with the visual
/// attributes the persisted format must reproduce exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitNode {
    pub id: String,
    pub unit_type: UnitType,
    pub position: Point,
    pub size: Size,
    pub icon: Option<String>,
}

/// A directed process stream between two units. Parallel streams between the
/// same ordered pair are legal, so every edge carries its own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default)]
pub struct FlowsheetGraph {
    nodes: IndexMap<String, UnitNode>,
    edges: Vec<StreamEdge>,
    edge_index: FxHashMap<String, usize>,
}

impl FlowsheetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Staircase position for the `index`-th node placed without an explicit
    /// position: a fixed diagonal step per node so freshly bootstrapped
    /// diagrams do not stack. Overlap avoidance only, not a layout algorithm.
    pub fn staircase_position(index: usize) -> Point {
        let k = index as f64;
        point(
            PLACEMENT_ORIGIN + PLACEMENT_STEP * k,
            PLACEMENT_ORIGIN + PLACEMENT_STEP * k,
        )
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&UnitNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &UnitNode> {
        self.nodes.values()
    }

    pub fn edge(&self, id: &str) -> Option<&StreamEdge> {
        self.edge_index.get(id).map(|&idx| &self.edges[idx])
    }

    pub fn edges(&self) -> impl Iterator<Item = &StreamEdge> {
        self.edges.iter()
    }

    /// Edges with `id` as either endpoint. A node with zero incident edges is
    /// an ordinary flowsheet boundary, not an error.
    pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a StreamEdge> {
        self.edges
            .iter()
            .filter(move |e| e.source == id || e.target == id)
    }

    pub fn add_node(
        &mut self,
        icons: &IconRegistry,
        id: impl Into<String>,
        unit_type: UnitType,
        position: Point,
        size: Size,
    ) -> Result<&UnitNode> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        let icon = resolve_icon(icons, &id, &unit_type);
        let node = UnitNode {
            id: id.clone(),
            unit_type,
            position,
            size,
            icon,
        };
        Ok(self.nodes.entry(id).or_insert(node))
    }

    /// Adds a directed stream with a generated id.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<&StreamEdge> {
        let id = format!("stream-{}", Uuid::new_v4());
        self.add_edge_with_id(id, source, target)
    }

    pub fn add_edge_with_id(
        &mut self,
        id: impl Into<String>,
        source: &str,
        target: &str,
    ) -> Result<&StreamEdge> {
        let id = id.into();
        if self.edge_index.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        for endpoint in [source, target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::UnknownNode {
                    id: endpoint.to_string(),
                });
            }
        }
        let idx = self.edges.len();
        self.edges.push(StreamEdge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
        });
        self.edge_index.insert(id, idx);
        Ok(&self.edges[idx])
    }

    /// Removes a node and every stream touching it. An absent id is an
    /// [`Error::UnknownNode`], never a silent no-op, so programmatic
    /// construction cannot diverge unnoticed.
    pub fn remove_node(&mut self, id: &str) -> Result<UnitNode> {
        let Some(node) = self.nodes.shift_remove(id) else {
            return Err(Error::UnknownNode { id: id.to_string() });
        };
        self.edges.retain(|e| e.source != id && e.target != id);
        self.rebuild_edge_index();
        Ok(node)
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<StreamEdge> {
        let Some(idx) = self.edge_index.remove(id) else {
            return Err(Error::UnknownEdge { id: id.to_string() });
        };
        let edge = self.edges.remove(idx);
        self.rebuild_edge_index();
        Ok(edge)
    }

    pub fn move_node(&mut self, id: &str, to: Point) -> Result<()> {
        let node = self.node_mut(id)?;
        node.position = to;
        Ok(())
    }

    pub fn resize_node(&mut self, id: &str, size: Size) -> Result<()> {
        let node = self.node_mut(id)?;
        node.size = size;
        Ok(())
    }

    /// Changes a node's unit type and re-resolves its icon in the same step,
    /// so the image reference can never go stale.
    pub fn set_unit_type(
        &mut self,
        icons: &IconRegistry,
        id: &str,
        unit_type: UnitType,
    ) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::UnknownNode { id: id.to_string() });
        }
        let icon = resolve_icon(icons, id, &unit_type);
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::UnknownNode {
            id: id.to_string(),
        })?;
        node.unit_type = unit_type;
        node.icon = icon;
        Ok(())
    }

    /// Complete, order-stable representation of the current state: nodes in
    /// insertion order with all visual attributes, edges in insertion order.
    pub fn to_snapshot(&self) -> FlowsheetSnapshot {
        FlowsheetSnapshot {
            version: FORMAT_VERSION,
            nodes: self
                .nodes
                .values()
                .map(|n| NodeSnapshot {
                    id: n.id.clone(),
                    unit_type: n.unit_type.clone(),
                    x: n.position.x,
                    y: n.position.y,
                    width: n.size.width,
                    height: n.size.height,
                    icon: n.icon.clone(),
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeSnapshot {
                    id: e.id.clone(),
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
        }
    }

    /// Wholesale replacement of the current state from a snapshot.
    ///
    /// Validate-then-commit: the snapshot is ingested into a staging graph
    /// first, and `self` is only overwritten once every node and edge has
    /// checked out. On any error the current state is untouched.
    pub fn from_snapshot(&mut self, snapshot: &FlowsheetSnapshot) -> Result<()> {
        if snapshot.version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: snapshot.version,
                expected: FORMAT_VERSION,
            });
        }

        let mut staged = FlowsheetGraph::new();
        for n in &snapshot.nodes {
            if staged.nodes.contains_key(&n.id) {
                return Err(Error::SnapshotDuplicateNode { id: n.id.clone() });
            }
            staged.nodes.insert(
                n.id.clone(),
                UnitNode {
                    id: n.id.clone(),
                    unit_type: n.unit_type.clone(),
                    position: point(n.x, n.y),
                    size: size(n.width, n.height),
                    // Restored verbatim; icons re-resolve only when the type
                    // tag is next set.
                    icon: n.icon.clone(),
                },
            );
        }
        for e in &snapshot.edges {
            if staged.edge_index.contains_key(&e.id) {
                return Err(Error::SnapshotDuplicateEdge { id: e.id.clone() });
            }
            for endpoint in [&e.source, &e.target] {
                if !staged.nodes.contains_key(endpoint) {
                    return Err(Error::SnapshotEdgeEndpoint {
                        edge: e.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
            let idx = staged.edges.len();
            staged.edges.push(StreamEdge {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
            });
            staged.edge_index.insert(e.id.clone(), idx);
        }

        tracing::debug!(
            nodes = staged.node_count(),
            edges = staged.edge_count(),
            "replacing graph from snapshot"
        );
        *self = staged;
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut UnitNode> {
        self.nodes.get_mut(id).ok_or_else(|| Error::UnknownNode {
            id: id.to_string(),
        })
    }

    fn rebuild_edge_index(&mut self) {
        self.edge_index.clear();
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.id.clone(), i);
        }
    }
}

fn resolve_icon(icons: &IconRegistry, id: &str, unit_type: &UnitType) -> Option<String> {
    let icon = icons.resolve(unit_type);
    if icon.is_none() {
        tracing::warn!(
            unit = id,
            tag = unit_type.tag(),
            "no icon asset for unit type, rendering placeholder"
        );
    }
    icon
}
