//! Reading progress bar and return-to-top control

use page_fx_shared::{Effect, ElementId, Viewport};

/// Share of the document scrolled so far, as a percentage in `[0, 100]`
pub fn percent(viewport: &Viewport) -> f64 {
    let scrollable = viewport.scrollable_height();
    if scrollable <= 0.0 {
        return 0.0;
    }
    (viewport.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone)]
pub struct ReadingProgress {
    bar: ElementId,
    last: Option<f64>,
}

impl ReadingProgress {
    pub fn new(bar: ElementId) -> Self {
        Self { bar, last: None }
    }

    pub fn update(&mut self, viewport: &Viewport) -> Vec<Effect> {
        let value = percent(viewport);
        if self.last == Some(value) {
            return Vec::new();
        }
        self.last = Some(value);
        vec![Effect::set_style(self.bar, "width", format!("{value}%"))]
    }
}

#[derive(Debug, Clone)]
pub struct BackToTop {
    button: ElementId,
    show_after: f64,
    shown: Option<bool>,
}

impl BackToTop {
    pub fn new(button: ElementId, show_after: f64) -> Self {
        Self {
            button,
            show_after,
            shown: None,
        }
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    pub fn is_shown(&self) -> bool {
        self.shown.unwrap_or(false)
    }

    pub fn update(&mut self, scroll_y: f64) -> Vec<Effect> {
        let show = scroll_y > self.show_after;
        if self.shown == Some(show) {
            return Vec::new();
        }
        self.shown = Some(show);
        let (opacity, visibility) = if show { ("1", "visible") } else { ("0", "hidden") };
        vec![
            Effect::set_style(self.button, "opacity", opacity),
            Effect::set_style(self.button, "visibility", visibility),
        ]
    }

    pub fn on_click(&self) -> Vec<Effect> {
        vec![Effect::ScrollTo {
            top: 0.0,
            smooth: true,
        }]
    }
}
