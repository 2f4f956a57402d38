//! Scene building: graph model + view state to drawable geometry.

use crate::{Error, Result};
use floe_core::FlowsheetGraph;
use floe_core::geom::{Point, Rect, Vector};
use rustc_hash::FxHashMap;

/// Ephemeral view state: selection and in-progress gesture data.
///
/// Deliberately tiny. Anything structural belongs to the graph model; this
/// only carries what a half-finished gesture needs to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub selection: Option<Selection>,
    pub drag: Option<DragPreview>,
    pub connect: Option<ConnectPreview>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Unit(String),
    Stream(String),
}

/// A node being dragged: visual offset from its model position.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub id: String,
    pub offset: Vector,
}

/// A connection gesture in flight: source unit and the current pointer spot.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectPreview {
    pub source: String,
    pub at: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub unit_tag: String,
    /// Model position, without any drag offset.
    pub origin: Point,
    /// Visual rectangle, drag offset applied.
    pub rect: Rect,
    pub icon: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    pub id: String,
    pub from: Point,
    pub to: Point,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    /// In-flight connect gesture, as a source-anchor to pointer segment.
    pub connect: Option<(Point, Point)>,
    pub bounds: Rect,
}

pub fn build_scene(graph: &FlowsheetGraph, view: &ViewState) -> Result<Scene> {
    let mut nodes = Vec::with_capacity(graph.node_count());
    let mut rects: FxHashMap<&str, Rect> = FxHashMap::default();

    for node in graph.nodes() {
        let mut origin = node.position;
        let model_origin = origin;
        if let Some(drag) = &view.drag {
            if drag.id == node.id {
                origin += drag.offset;
            }
        }
        let rect = Rect::new(origin, node.size);
        rects.insert(node.id.as_str(), rect);
        nodes.push(SceneNode {
            id: node.id.clone(),
            unit_tag: node.unit_type.tag().to_string(),
            origin: model_origin,
            rect,
            icon: node.icon.clone(),
            selected: matches!(&view.selection, Some(Selection::Unit(id)) if *id == node.id),
        });
    }

    let mut edges = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        let source = *rects
            .get(edge.source.as_str())
            .ok_or_else(|| Error::MissingEndpoint {
                edge: edge.id.clone(),
                node: edge.source.clone(),
            })?;
        let target = *rects
            .get(edge.target.as_str())
            .ok_or_else(|| Error::MissingEndpoint {
                edge: edge.id.clone(),
                node: edge.target.clone(),
            })?;
        edges.push(SceneEdge {
            id: edge.id.clone(),
            from: anchor_toward(&source, target.center()),
            to: anchor_toward(&target, source.center()),
            selected: matches!(&view.selection, Some(Selection::Stream(id)) if *id == edge.id),
        });
    }

    let connect = match &view.connect {
        Some(preview) => rects
            .get(preview.source.as_str())
            .map(|rect| (anchor_toward(rect, preview.at), preview.at)),
        None => None,
    };

    let mut bounds: Option<Rect> = None;
    for node in &nodes {
        bounds = Some(match bounds {
            Some(b) => b.union(&node.rect),
            None => node.rect,
        });
    }
    if let Some((_, at)) = connect {
        // Non-empty so `union` does not discard it.
        let spot = Rect::new(at, floe_core::geom::size(1.0, 1.0));
        bounds = Some(match bounds {
            Some(b) => b.union(&spot),
            None => spot,
        });
    }

    Ok(Scene {
        nodes,
        edges,
        connect,
        bounds: bounds.unwrap_or_else(Rect::zero),
    })
}

/// Point on the border of `rect` where a segment from its center toward
/// `toward` leaves the rectangle. Falls back to the center for degenerate
/// (overlapping) geometry.
pub(crate) fn anchor_toward(rect: &Rect, toward: Point) -> Point {
    let center = rect.center();
    let d = toward - center;
    if d.x == 0.0 && d.y == 0.0 {
        return center;
    }
    let sx = if d.x != 0.0 {
        (rect.size.width / 2.0) / d.x.abs()
    } else {
        f64::INFINITY
    };
    let sy = if d.y != 0.0 {
        (rect.size.height / 2.0) / d.y.abs()
    } else {
        f64::INFINITY
    };
    let t = sx.min(sy).min(1.0);
    center + d * t
}

/// Distance from `p` to the segment `a`-`b`.
pub(crate) fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.square_length();
    if len2 == 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}
