//! Pointer gestures to graph mutations.
//!
//! The state machine here never touches the graph. It reads the scene, keeps
//! the in-flight gesture in [`ViewState`], and hands completed gestures back
//! as [`Command`]s for the session to apply in the same turn.

use crate::scene::{
    ConnectPreview, DragPreview, Scene, SceneEdge, SceneNode, Selection, ViewState,
    segment_distance,
};
use floe_core::Command;
use floe_core::geom::Point;

/// How close (in canvas units) a press must land to a stream to select it.
const EDGE_HIT_TOLERANCE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Select and drag.
    Primary,
    /// Start a connection from the pressed unit.
    Connect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { at: Point, button: PointerButton },
    Moved { at: Point },
    Up { at: Point },
}

#[derive(Debug, Clone)]
enum Gesture {
    Drag {
        id: String,
        origin: Point,
        pressed: Point,
    },
    Connect {
        source: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    gesture: Option<Gesture>,
}

impl InteractionState {
    pub fn gesture_in_progress(&self) -> bool {
        self.gesture.is_some()
    }

    /// Feeds one pointer event. Updates the ephemeral view state and returns
    /// the commands the event completed into; callers apply them before the
    /// next render so canvas and model never diverge across a frame.
    pub fn pointer(
        &mut self,
        scene: &Scene,
        view: &mut ViewState,
        event: PointerEvent,
    ) -> Vec<Command> {
        match event {
            PointerEvent::Down { at, button } => {
                // A press mid-gesture cancels the gesture and starts over.
                self.cancel(view);
                self.press(scene, view, at, button);
                Vec::new()
            }
            PointerEvent::Moved { at } => {
                match &self.gesture {
                    Some(Gesture::Drag { id, pressed, .. }) => {
                        view.drag = Some(DragPreview {
                            id: id.clone(),
                            offset: at - *pressed,
                        });
                    }
                    Some(Gesture::Connect { .. }) => {
                        if let Some(preview) = &mut view.connect {
                            preview.at = at;
                        }
                    }
                    None => {}
                }
                Vec::new()
            }
            PointerEvent::Up { at } => self.release(scene, view, at),
        }
    }

    fn press(&mut self, scene: &Scene, view: &mut ViewState, at: Point, button: PointerButton) {
        let hit = hit_node(scene, at);
        match button {
            PointerButton::Primary => match hit {
                Some(node) => {
                    view.selection = Some(Selection::Unit(node.id.clone()));
                    self.gesture = Some(Gesture::Drag {
                        id: node.id.clone(),
                        origin: node.origin,
                        pressed: at,
                    });
                }
                None => {
                    view.selection = hit_edge(scene, at)
                        .map(|edge| Selection::Stream(edge.id.clone()));
                }
            },
            PointerButton::Connect => {
                if let Some(node) = hit {
                    self.gesture = Some(Gesture::Connect {
                        source: node.id.clone(),
                    });
                    view.connect = Some(ConnectPreview {
                        source: node.id.clone(),
                        at,
                    });
                }
            }
        }
    }

    fn release(&mut self, scene: &Scene, view: &mut ViewState, at: Point) -> Vec<Command> {
        let Some(gesture) = self.gesture.take() else {
            return Vec::new();
        };
        match gesture {
            Gesture::Drag {
                id,
                origin,
                pressed,
            } => {
                view.drag = None;
                let offset = at - pressed;
                if offset.x == 0.0 && offset.y == 0.0 {
                    return Vec::new();
                }
                vec![Command::MoveUnit {
                    id,
                    to: origin + offset,
                }]
            }
            Gesture::Connect { source } => {
                view.connect = None;
                match hit_node(scene, at) {
                    Some(target) if target.id != source => vec![Command::Connect {
                        source,
                        target: target.id.clone(),
                    }],
                    // Released over empty canvas or back on the source.
                    _ => Vec::new(),
                }
            }
        }
    }

    fn cancel(&mut self, view: &mut ViewState) {
        if self.gesture.take().is_some() {
            view.drag = None;
            view.connect = None;
        }
    }
}

/// Topmost node under the pointer; later nodes draw above earlier ones.
fn hit_node(scene: &Scene, at: Point) -> Option<&SceneNode> {
    scene.nodes.iter().rev().find(|n| n.rect.contains(at))
}

fn hit_edge(scene: &Scene, at: Point) -> Option<&SceneEdge> {
    scene
        .edges
        .iter()
        .find(|e| segment_distance(at, e.from, e.to) <= EDGE_HIT_TOLERANCE)
}
