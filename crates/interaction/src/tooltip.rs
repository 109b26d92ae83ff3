//! Pointer-follow tooltip controller
//!
//! One controller owns one floating panel. It looks region keys up in an
//! immutable catalog, computes where the panel goes and tracks whether it is
//! shown. It never touches the DOM; [`crate::diagram`] turns its state into
//! effects.

use page_fx_config::{HorizontalAnchor, Positioning};
use page_fx_shared::{DescriptorCatalog, Point, Rect, RegionDescriptor, TooltipState};

/// Anchors closer than this to either container edge get pulled inwards
pub const EDGE_MARGIN: f64 = 120.0;
/// Left inset used when an anchor is pulled away from the left edge
pub const LEFT_INSET: f64 = 20.0;
/// Distance from the right edge used when an anchor is pulled away from it
pub const RIGHT_INSET: f64 = 240.0;

/// Keep a bounds-relative horizontal anchor inside `[20, width - 240]`.
///
/// Anchors within 120 of the right edge snap to `width - 240`, anchors within
/// 120 of the left edge snap to `20` (the left rule wins when both apply).
/// Containers narrower than 260 collapse the range to `20`.
pub fn clamp_horizontal(x: f64, width: f64) -> f64 {
    let mut left = x;
    if left > width - EDGE_MARGIN {
        left = width - RIGHT_INSET;
    }
    if left < EDGE_MARGIN {
        left = LEFT_INSET;
    }
    let max = (width - RIGHT_INSET).max(LEFT_INSET);
    left.clamp(LEFT_INSET, max)
}

/// Compute the anchor for a positioning rule.
///
/// `container` is required for bounds-relative rules and for pointer rules
/// relative to the container; without it those fall back to viewport
/// coordinates.
pub fn anchor_for(
    positioning: &Positioning,
    pointer: Point,
    region: Rect,
    container: Option<Rect>,
) -> Point {
    match *positioning {
        Positioning::Pointer {
            offset_x,
            offset_y,
            relative_to_container,
        } => {
            let base = match container {
                Some(rect) if relative_to_container => pointer.relative_to(&rect),
                _ => pointer,
            };
            Point::new(base.x + offset_x, base.y + offset_y)
        }
        Positioning::Bounds {
            anchor,
            offset_x,
            offset_y,
            clamp,
        } => {
            let frame = container.unwrap_or_default();
            let edge = match anchor {
                HorizontalAnchor::Center => region.center_x(),
                HorizontalAnchor::Left => region.left,
            };
            let mut x = edge - frame.left + offset_x;
            if clamp {
                x = clamp_horizontal(x, frame.width);
            }
            Point::new(x, region.top - frame.top + offset_y)
        }
    }
}

/// Where a tooltip's content comes from
#[derive(Debug, Clone)]
pub enum ContentSource {
    Catalog(DescriptorCatalog),
    /// The region key itself is the text to show
    Inline,
}

#[derive(Debug, Clone)]
pub struct TooltipController {
    source: ContentSource,
    positioning: Positioning,
    state: TooltipState,
    region: Option<Rect>,
}

impl TooltipController {
    pub fn new(catalog: Option<DescriptorCatalog>, positioning: Positioning) -> Self {
        let source = match catalog {
            Some(catalog) => ContentSource::Catalog(catalog),
            None => ContentSource::Inline,
        };
        Self {
            source,
            positioning,
            state: TooltipState::hidden(),
            region: None,
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Look a region key up. Inline sources describe any non-empty key.
    pub fn resolve(&self, key: &str) -> Option<RegionDescriptor> {
        match &self.source {
            ContentSource::Catalog(catalog) => catalog.get(key).cloned(),
            ContentSource::Inline if !key.is_empty() => Some(RegionDescriptor::new(key, key, "")),
            ContentSource::Inline => None,
        }
    }

    /// Pointer entered a region. Returns whether the tooltip is now showing
    /// that region; unknown keys leave the state untouched.
    pub fn on_enter(
        &mut self,
        key: &str,
        pointer: Point,
        region: Rect,
        container: Option<Rect>,
    ) -> bool {
        let Some(descriptor) = self.resolve(key) else {
            log::debug!("No tooltip content for region key '{key}'");
            return false;
        };

        self.state.anchor = anchor_for(&self.positioning, pointer, region, container);
        self.state.content = Some(descriptor);
        self.state.visible = true;
        self.region = Some(region);
        true
    }

    /// Pointer moved inside the region. Returns whether the anchor changed.
    pub fn on_move(&mut self, pointer: Point, container: Option<Rect>) -> bool {
        if !self.state.visible {
            return false;
        }
        let region = self.region.unwrap_or_default();
        let anchor = anchor_for(&self.positioning, pointer, region, container);
        if anchor == self.state.anchor {
            return false;
        }
        self.state.anchor = anchor;
        true
    }

    /// Pointer left the region. Returns whether the tooltip was showing.
    pub fn on_leave(&mut self) -> bool {
        let was_visible = self.state.visible;
        self.state = TooltipState::hidden();
        self.region = None;
        was_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> DescriptorCatalog {
        DescriptorCatalog::from_descriptors(vec![
            RegionDescriptor::new("nip", "Nip Point", "Hot").with_field("temp", "~350°C"),
            RegionDescriptor::new("bulk", "Liner Bulk", "Cool"),
        ])
        .unwrap()
    }

    fn bounds_rule() -> Positioning {
        Positioning::Bounds {
            anchor: HorizontalAnchor::Center,
            offset_x: 0.0,
            offset_y: -110.0,
            clamp: true,
        }
    }

    fn pointer_rule() -> Positioning {
        Positioning::Pointer {
            offset_x: 15.0,
            offset_y: -80.0,
            relative_to_container: true,
        }
    }

    #[test]
    fn test_unknown_key_stays_hidden() {
        let mut tooltip = TooltipController::new(Some(catalog()), bounds_rule());
        for key in ["", "roller", "NIP", "nip "] {
            assert!(!tooltip.on_enter(key, Point::default(), Rect::default(), None));
            assert_eq!(tooltip.state(), &TooltipState::hidden());
        }
    }

    #[test]
    fn test_unknown_key_keeps_current_content() {
        let mut tooltip = TooltipController::new(Some(catalog()), pointer_rule());
        let container = Some(Rect::new(0.0, 0.0, 800.0, 600.0));
        tooltip.on_enter("nip", Point::new(100.0, 100.0), Rect::default(), container);
        let before = tooltip.state().clone();
        tooltip.on_enter("missing", Point::new(300.0, 300.0), Rect::default(), container);
        assert_eq!(tooltip.state(), &before);
    }

    #[test]
    fn test_enter_sets_content_and_anchor() {
        let mut tooltip = TooltipController::new(Some(catalog()), pointer_rule());
        let container = Rect::new(50.0, 100.0, 800.0, 400.0);
        assert!(tooltip.on_enter(
            "nip",
            Point::new(250.0, 300.0),
            Rect::new(200.0, 250.0, 40.0, 40.0),
            Some(container)
        ));

        let state = tooltip.state();
        assert!(state.visible);
        assert_eq!(state.active_key(), Some("nip"));
        assert_eq!(state.anchor, Point::new(215.0, 120.0));
    }

    #[test]
    fn test_move_follows_pointer_only_while_visible() {
        let mut tooltip = TooltipController::new(Some(catalog()), pointer_rule());
        let container = Some(Rect::new(0.0, 0.0, 800.0, 400.0));
        assert!(!tooltip.on_move(Point::new(10.0, 10.0), container));
        assert!(!tooltip.is_visible());

        tooltip.on_enter("bulk", Point::new(100.0, 200.0), Rect::default(), container);
        assert!(tooltip.on_move(Point::new(110.0, 210.0), container));
        assert_eq!(tooltip.state().anchor, Point::new(125.0, 130.0));
        assert_eq!(tooltip.state().active_key(), Some("bulk"));
    }

    #[test]
    fn test_leave_is_idempotent() {
        let mut tooltip = TooltipController::new(Some(catalog()), bounds_rule());
        let container = Some(Rect::new(0.0, 0.0, 800.0, 400.0));
        tooltip.on_enter("nip", Point::default(), Rect::new(300.0, 200.0, 50.0, 50.0), container);

        assert!(tooltip.on_leave());
        let once = tooltip.state().clone();
        assert!(!tooltip.on_leave());
        assert_eq!(tooltip.state(), &once);
        assert_eq!(once, TooltipState::hidden());
    }

    #[test]
    fn test_bounds_anchor_centres_on_region() {
        let container = Rect::new(100.0, 50.0, 900.0, 500.0);
        let region = Rect::new(400.0, 250.0, 60.0, 40.0);
        let anchor = anchor_for(&bounds_rule(), Point::default(), region, Some(container));
        assert_eq!(anchor, Point::new(330.0, 90.0));
    }

    #[test]
    fn test_clamp_edges() {
        assert_eq!(clamp_horizontal(50.0, 900.0), 20.0);
        assert_eq!(clamp_horizontal(119.9, 900.0), 20.0);
        assert_eq!(clamp_horizontal(120.0, 900.0), 120.0);
        assert_eq!(clamp_horizontal(790.0, 900.0), 660.0);
        assert_eq!(clamp_horizontal(700.0, 900.0), 660.0);
        assert_eq!(clamp_horizontal(100.0, 200.0), 20.0);
    }

    #[test]
    fn test_clamp_always_within_inset_range() {
        for width in [260.0, 300.0, 480.0, 800.0, 1440.0] {
            let mut x = -500.0;
            while x < width + 500.0 {
                let clamped = clamp_horizontal(x, width);
                assert!(
                    (LEFT_INSET..=width - RIGHT_INSET).contains(&clamped),
                    "x={x} width={width} -> {clamped}"
                );
                x += 7.5;
            }
        }
    }

    #[test]
    fn test_inline_source_describes_any_key() {
        let rule = Positioning::Bounds {
            anchor: HorizontalAnchor::Left,
            offset_x: 20.0,
            offset_y: -30.0,
            clamp: false,
        };
        let mut tooltip = TooltipController::new(None, rule);
        let container = Some(Rect::new(10.0, 10.0, 600.0, 300.0));
        assert!(tooltip.on_enter(
            "Peak shear: 42 MPa",
            Point::default(),
            Rect::new(110.0, 60.0, 8.0, 8.0),
            container
        ));
        let state = tooltip.state();
        assert_eq!(state.content.as_ref().unwrap().title, "Peak shear: 42 MPa");
        assert_eq!(state.anchor, Point::new(120.0, 20.0));
        assert!(!TooltipController::new(None, rule).on_enter("", Point::default(), Rect::default(), container));
    }
}
