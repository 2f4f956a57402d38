#![forbid(unsafe_code)]

//! `floe` is a headless flowsheet diagram editor.
//!
//! A process-modeling producer hands over a node/edge description; `floe`
//! keeps the authoritative graph behind an interactive canvas, renders it to
//! SVG, and saves/loads the complete visual + structural state so a session
//! resumes exactly where it left off.
//!
//! The crate is runtime-agnostic: everything is CPU-bound except reading a
//! user-selected file, which callers hand in as a future.

pub use floe_core::*;

pub mod editor;
pub mod persist;

pub mod render {
    pub use floe_render::{
        ConnectPreview, DragPreview, InteractionState, PointerButton, PointerEvent, Scene,
        SceneEdge, SceneNode, Selection, SvgRenderOptions, ViewState, build_scene,
        render_scene_svg,
    };
}

pub use editor::EditorSession;
pub use persist::{FILE_EXTENSION, FileAdapter, LoadTicket, SaveFile};
