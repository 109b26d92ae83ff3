//! Mobile navigation drawer

use page_fx_shared::{Effect, ElementId, InputEvent, Target};

#[derive(Debug, Clone)]
pub struct NavDrawer {
    sidebar: ElementId,
    toggle: ElementId,
    open_class: String,
    breakpoint: f64,
    open: bool,
}

impl NavDrawer {
    pub fn new(sidebar: ElementId, toggle: ElementId, open_class: &str, breakpoint: f64) -> Self {
        Self {
            sidebar,
            toggle,
            open_class: open_class.to_string(),
            breakpoint,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width <= self.breakpoint
    }

    fn set_open(&mut self, open: bool) -> Vec<Effect> {
        self.open = open;
        let class = if open {
            Effect::add_class(self.sidebar, &self.open_class)
        } else {
            Effect::remove_class(self.sidebar, &self.open_class)
        };
        vec![
            class,
            Effect::set_attribute(self.toggle, "aria-expanded", open.to_string()),
        ]
    }

    /// Initial, closed state
    pub fn mount(&mut self) -> Vec<Effect> {
        self.set_open(false)
    }

    pub fn on_toggle(&mut self) -> Vec<Effect> {
        self.set_open(!self.open)
    }

    /// A navigation link was followed
    pub fn on_link_click(&mut self, viewport_width: f64) -> Vec<Effect> {
        if self.is_narrow(viewport_width) && self.open {
            self.set_open(false)
        } else {
            Vec::new()
        }
    }

    /// Any click in the document; closes when it lands outside the drawer
    pub fn on_document_click(&mut self, event: &InputEvent, viewport_width: f64) -> Vec<Effect> {
        if !self.open
            || !self.is_narrow(viewport_width)
            || event.targets(self.sidebar)
            || event.targets(self.toggle)
        {
            return Vec::new();
        }
        self.set_open(false)
    }

    pub fn on_escape(&mut self, viewport_width: f64) -> Vec<Effect> {
        if !self.open || !self.is_narrow(viewport_width) {
            return Vec::new();
        }
        let mut effects = self.set_open(false);
        effects.push(Effect::Focus {
            target: Target::Element(self.toggle),
        });
        effects
    }

    /// The window stopped resizing
    pub fn on_resize_settled(&mut self, viewport_width: f64) -> Vec<Effect> {
        if self.is_narrow(viewport_width) || !self.open {
            return Vec::new();
        }
        self.set_open(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDEBAR: ElementId = ElementId(1);
    const TOGGLE: ElementId = ElementId(2);

    fn drawer() -> NavDrawer {
        NavDrawer::new(SIDEBAR, TOGGLE, "active", 768.0)
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut drawer = drawer();
        let effects = drawer.on_toggle();
        assert!(drawer.is_open());
        assert_eq!(effects[0], Effect::add_class(SIDEBAR, "active"));
        assert_eq!(effects[1], Effect::set_attribute(TOGGLE, "aria-expanded", "true"));
        drawer.on_toggle();
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_link_click_closes_only_when_narrow() {
        let mut drawer = drawer();
        drawer.on_toggle();
        assert!(drawer.on_link_click(1024.0).is_empty());
        assert!(drawer.is_open());
        assert!(!drawer.on_link_click(768.0).is_empty());
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_outside_click() {
        let mut drawer = drawer();
        drawer.on_toggle();

        let inside = InputEvent::default().within(vec![ElementId(40), SIDEBAR]);
        assert!(drawer.on_document_click(&inside, 400.0).is_empty());
        let on_toggle = InputEvent::default().within(vec![TOGGLE]);
        assert!(drawer.on_document_click(&on_toggle, 400.0).is_empty());
        assert!(drawer.is_open());

        let outside = InputEvent::default().within(vec![ElementId(99)]);
        assert!(drawer.on_document_click(&outside, 1200.0).is_empty());
        assert_eq!(drawer.on_document_click(&outside, 400.0).len(), 2);
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_escape_returns_focus() {
        let mut drawer = drawer();
        assert!(drawer.on_escape(400.0).is_empty());
        drawer.on_toggle();
        let effects = drawer.on_escape(400.0);
        assert_eq!(
            effects.last(),
            Some(&Effect::Focus {
                target: Target::Element(TOGGLE)
            })
        );
    }

    #[test]
    fn test_resize_to_wide_closes() {
        let mut drawer = drawer();
        drawer.on_toggle();
        assert!(drawer.on_resize_settled(700.0).is_empty());
        assert!(!drawer.on_resize_settled(1280.0).is_empty());
        assert!(!drawer.is_open());
    }
}
