//! Shared types for the page-fx workspace
//!
//! Everything the controllers, the configuration layer and the browser bridge
//! exchange lives here: element handles, geometry, region descriptors, input
//! events and the declarative effects controllers hand back to the bridge.

use serde::{Deserialize, Serialize};

pub mod descriptors;
pub mod effects;
pub mod errors;
pub mod events;
pub mod tooltip;

pub use descriptors::{DescriptorCatalog, RegionDescriptor};
pub use effects::{Deferred, Effect, ObserverGroup, Target, When};
pub use errors::{PageFxError, PageFxResult};
pub use events::{EventKind, InputEvent};
pub use tooltip::TooltipState;

/// Opaque handle the bridge assigns to every element it registers.
///
/// Controllers only ever see these; the mapping back to DOM nodes stays on the
/// browser side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in CSS pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Express this point relative to the top-left corner of `rect`
    pub fn relative_to(&self, rect: &Rect) -> Point {
        Point::new(self.x - rect.left, self.y - rect.top)
    }
}

/// Axis-aligned rectangle, as reported by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Layout box of a content section in document coordinates
/// (`offsetTop` / `offsetHeight`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SectionBox {
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `[top, top + height)`
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Snapshot of the window's scroll state and size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl Viewport {
    /// How far the document can scroll, never negative
    pub fn scrollable_height(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_box_is_half_open() {
        let section = SectionBox::new(100.0, 50.0);
        assert!(section.contains(100.0));
        assert!(section.contains(149.9));
        assert!(!section.contains(150.0));
        assert!(!section.contains(99.0));
    }

    #[test]
    fn test_point_relative_to_rect() {
        let rect = Rect::new(10.0, 20.0, 300.0, 200.0);
        let p = Point::new(110.0, 70.0).relative_to(&rect);
        assert_eq!(p, Point::new(100.0, 50.0));
        assert_eq!(rect.center_x(), 160.0);
        assert_eq!(rect.bottom(), 220.0);
    }

    #[test]
    fn test_scrollable_height_never_negative() {
        let viewport = Viewport {
            width: 1024.0,
            height: 900.0,
            scroll_y: 0.0,
            document_height: 600.0,
        };
        assert_eq!(viewport.scrollable_height(), 0.0);
    }
}
