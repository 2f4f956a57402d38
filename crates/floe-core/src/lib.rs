#![forbid(unsafe_code)]

//! Flowsheet semantic model (headless).
//!
//! Design goals:
//! - a single authoritative graph behind whatever surface renders it
//! - deterministic, order-stable snapshots (a saved session resumes exactly)
//! - mutations as discrete commands, testable without a canvas attached

pub mod command;
pub mod describe;
pub mod error;
pub mod geom;
pub mod graph;
pub mod icons;
pub mod snapshot;
pub mod unit;

pub use command::{Applied, Command, apply};
pub use describe::{FlowsheetDescription, bootstrap};
pub use error::{Error, Result};
pub use graph::{DEFAULT_NODE_SIZE, FlowsheetGraph, PLACEMENT_STEP, StreamEdge, UnitNode};
pub use icons::{DEFAULT_ICON_ROOT, IconRegistry};
pub use snapshot::{EdgeSnapshot, FORMAT_VERSION, FlowsheetSnapshot, NodeSnapshot};
pub use unit::UnitType;

#[cfg(test)]
mod tests;
