//! DOM-independent input events

use serde::{Deserialize, Serialize};

use crate::{ElementId, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MouseEnter,
    MouseMove,
    MouseLeave,
    Click,
    KeyDown,
    Scroll,
    Resize,
}

impl EventKind {
    /// Name used with `addEventListener`
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
        }
    }
}

/// What the bridge extracts from a DOM event before handing it to a handler
#[derive(Clone, Debug, PartialEq, Default)]
pub struct InputEvent {
    /// Pointer position in client (viewport) coordinates
    pub pointer: Option<Point>,
    /// `KeyboardEvent.key`
    pub key: Option<String>,
    /// Registered elements containing the event target, innermost first
    pub target_path: Vec<ElementId>,
}

impl InputEvent {
    pub fn pointer(x: f64, y: f64) -> Self {
        Self {
            pointer: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn within(mut self, path: Vec<ElementId>) -> Self {
        self.target_path = path;
        self
    }

    /// Whether the event target sits inside `element`
    pub fn targets(&self, element: ElementId) -> bool {
        self.target_path.contains(&element)
    }
}
