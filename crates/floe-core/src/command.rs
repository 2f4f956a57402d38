//! Discrete mutation commands.
//!
//! User gestures on the canvas (and any other caller) produce these instead
//! of reaching into the graph directly, so the whole interaction model stays
//! testable with no rendering surface attached.

use crate::geom::{Point, Size};
use crate::graph::{DEFAULT_NODE_SIZE, FlowsheetGraph};
use crate::icons::IconRegistry;
use crate::unit::UnitType;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddUnit {
        id: String,
        unit_type: UnitType,
        /// `None` places the unit on the default staircase.
        at: Option<Point>,
    },
    Connect {
        source: String,
        target: String,
    },
    MoveUnit {
        id: String,
        to: Point,
    },
    ResizeUnit {
        id: String,
        size: Size,
    },
    SetUnitType {
        id: String,
        unit_type: UnitType,
    },
    RemoveUnit {
        id: String,
    },
    RemoveStream {
        id: String,
    },
}

/// What a successfully applied command did to the model, with any ids it
/// created, so view state can follow along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    UnitAdded { id: String },
    StreamConnected { id: String },
    UnitMoved { id: String },
    UnitResized { id: String },
    UnitRetyped { id: String },
    UnitRemoved { id: String, cascaded_streams: usize },
    StreamRemoved { id: String },
}

/// Applies one command to the graph. A failed command rejects the mutation
/// and leaves the model exactly as it was.
pub fn apply(graph: &mut FlowsheetGraph, icons: &IconRegistry, command: Command) -> Result<Applied> {
    match command {
        Command::AddUnit { id, unit_type, at } => {
            let position =
                at.unwrap_or_else(|| FlowsheetGraph::staircase_position(graph.node_count()));
            graph.add_node(icons, id.clone(), unit_type, position, DEFAULT_NODE_SIZE)?;
            Ok(Applied::UnitAdded { id })
        }
        Command::Connect { source, target } => {
            let edge = graph.add_edge(&source, &target)?;
            Ok(Applied::StreamConnected {
                id: edge.id.clone(),
            })
        }
        Command::MoveUnit { id, to } => {
            graph.move_node(&id, to)?;
            Ok(Applied::UnitMoved { id })
        }
        Command::ResizeUnit { id, size } => {
            graph.resize_node(&id, size)?;
            Ok(Applied::UnitResized { id })
        }
        Command::SetUnitType { id, unit_type } => {
            graph.set_unit_type(icons, &id, unit_type)?;
            Ok(Applied::UnitRetyped { id })
        }
        Command::RemoveUnit { id } => {
            if !graph.has_node(&id) {
                return Err(Error::UnknownNode { id });
            }
            let cascaded_streams = graph.edges_of(&id).count();
            graph.remove_node(&id)?;
            Ok(Applied::UnitRemoved {
                id,
                cascaded_streams,
            })
        }
        Command::RemoveStream { id } => {
            graph.remove_edge(&id)?;
            Ok(Applied::StreamRemoved { id })
        }
    }
}
