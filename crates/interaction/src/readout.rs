//! Crosshair and coordinate readout over a chart

use page_fx_config::ReadoutConfig;
use page_fx_shared::{Effect, ElementId, Point, Rect};

/// Elements of one readout; any may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadoutElements {
    pub horizontal: Option<ElementId>,
    pub vertical: Option<ElementId>,
    pub display: Option<ElementId>,
}

#[derive(Debug, Clone)]
pub struct CoordinateReadout {
    config: ReadoutConfig,
    elements: ReadoutElements,
}

impl CoordinateReadout {
    pub fn new(config: ReadoutConfig, elements: ReadoutElements) -> Self {
        Self { config, elements }
    }

    /// Chart values at a chart-relative position: `(x value, y value)`.
    /// `None` for a chart without area.
    pub fn values(&self, local: Point, chart: &Rect) -> Option<(f64, f64)> {
        if chart.width <= 0.0 || chart.height <= 0.0 {
            return None;
        }
        let x = local.x / chart.width * self.config.x_max;
        let y = self.config.y_top - local.y / chart.height * self.config.y_span;
        Some((x, y))
    }

    pub fn text(&self, local: Point, chart: &Rect) -> Option<String> {
        let (x, y) = self.values(local, chart)?;
        let x = format!("{:.*}", self.config.x_decimals as usize, x);
        let y = format!("{:.*}", self.config.y_decimals as usize, y);
        Some(self.config.template.replace("{x}", &x).replace("{y}", &y))
    }

    pub fn on_move(&self, pointer: Point, chart: &Rect) -> Vec<Effect> {
        let local = pointer.relative_to(chart);
        let mut effects = Vec::new();
        if let Some(horizontal) = self.elements.horizontal {
            effects.push(Effect::set_style(horizontal, "top", Effect::px(local.y)));
        }
        if let Some(vertical) = self.elements.vertical {
            effects.push(Effect::set_style(vertical, "left", Effect::px(local.x)));
        }
        if let (Some(display), Some(text)) = (self.elements.display, self.text(local, chart)) {
            effects.push(Effect::set_text(display, text));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout() -> CoordinateReadout {
        CoordinateReadout::new(
            ReadoutConfig::default(),
            ReadoutElements {
                horizontal: Some(ElementId(1)),
                vertical: Some(ElementId(2)),
                display: Some(ElementId(3)),
            },
        )
    }

    #[test]
    fn test_text_formatting() {
        let chart = Rect::new(0.0, 0.0, 500.0, 200.0);
        let readout = readout();
        assert_eq!(
            readout.text(Point::new(250.0, 100.0), &chart).unwrap(),
            "T: 250°C | v: 1.25 m/min"
        );
        assert_eq!(
            readout.text(Point::new(0.0, 0.0), &chart).unwrap(),
            "T: 300°C | v: 0.00 m/min"
        );
    }

    #[test]
    fn test_move_positions_crosshairs() {
        let chart = Rect::new(100.0, 50.0, 400.0, 300.0);
        let effects = readout().on_move(Point::new(300.0, 200.0), &chart);
        assert_eq!(effects[0], Effect::set_style(ElementId(1), "top", "150px"));
        assert_eq!(effects[1], Effect::set_style(ElementId(2), "left", "200px"));
        assert_eq!(
            effects[2],
            Effect::set_text(ElementId(3), "T: 250°C | v: 1.25 m/min")
        );
    }

    #[test]
    fn test_collapsed_chart_skips_text() {
        let chart = Rect::new(0.0, 0.0, 0.0, 0.0);
        let effects = readout().on_move(Point::new(0.0, 0.0), &chart);
        assert_eq!(effects.len(), 2);
    }
}
