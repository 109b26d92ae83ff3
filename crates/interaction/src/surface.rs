//! Read-only view of the page the controllers consult while handling events

use page_fx_shared::{ElementId, Rect, SectionBox, Viewport};

/// Layout and attribute reads. Every accessor answers `None` for elements
/// that are gone or cannot be measured.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    /// Viewport-relative bounding box
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    /// Document-relative offset box
    fn section_box(&self, element: ElementId) -> Option<SectionBox>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn text(&self, element: ElementId) -> Option<String>;

    /// Monotonic clock in milliseconds
    fn now_ms(&self) -> f64;
}
