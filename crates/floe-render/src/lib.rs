#![forbid(unsafe_code)]

//! Headless view layer for floe flowsheets.
//!
//! The scene is recomputed from the graph model every frame; nothing
//! structural lives on this side. Pointer gestures come in, mutation commands
//! come out, and whoever owns the session applies them before the next
//! render.

pub mod interaction;
pub mod scene;
pub mod svg;

pub use interaction::{InteractionState, PointerButton, PointerEvent};
pub use scene::{
    ConnectPreview, DragPreview, Scene, SceneEdge, SceneNode, Selection, ViewState, build_scene,
};
pub use svg::{SvgRenderOptions, render_scene_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("scene edge {edge} references missing node {node}")]
    MissingEndpoint { edge: String, node: String },
}

pub type Result<T> = std::result::Result<T, Error>;
