//! Active-section indicator for the navigation sidebar
//!
//! States are "no section active" and "section S active". A sample moves to S
//! when the probe position falls inside S's box; samples that hit no section
//! keep the current state. Once a link is active some link stays active.

use page_fx_shared::{Effect, ElementId, SectionBox};

/// A content section paired with the navigation link pointing at it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSection {
    pub section: ElementId,
    pub link: ElementId,
}

/// Change of the active link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    pub previous: Option<ElementId>,
    pub next: ElementId,
}

impl Switch {
    /// Clear the old marker and set the new one in a single batch
    pub fn effects(&self, active_class: &str) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.previous {
            effects.push(Effect::remove_class(previous, active_class));
        }
        effects.push(Effect::add_class(self.next, active_class));
        effects
    }
}

#[derive(Debug, Clone)]
pub struct ActiveSectionIndicator {
    sections: Vec<NavSection>,
    lookahead: f64,
    active: Option<ElementId>,
}

impl ActiveSectionIndicator {
    /// `sections` must be in document order
    pub fn new(sections: Vec<NavSection>, lookahead: f64) -> Self {
        Self {
            sections,
            lookahead,
            active: None,
        }
    }

    pub fn active_link(&self) -> Option<ElementId> {
        self.active
    }

    /// Recompute from a scroll position. `layout` reports each section's
    /// current box; sections it cannot measure are skipped.
    pub fn sample<F>(&mut self, scroll_y: f64, layout: F) -> Option<Switch>
    where
        F: Fn(ElementId) -> Option<SectionBox>,
    {
        let probe = scroll_y + self.lookahead;
        let hit = self
            .sections
            .iter()
            .filter(|entry| layout(entry.section).is_some_and(|b| b.contains(probe)))
            .last()
            .map(|entry| entry.link)?;
        self.activate(hit)
    }

    /// Mark a link active directly, e.g. after it was clicked
    pub fn activate(&mut self, link: ElementId) -> Option<Switch> {
        if self.active == Some(link) {
            return None;
        }
        let switch = Switch {
            previous: self.active,
            next: link,
        };
        self.active = Some(link);
        Some(switch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator() -> ActiveSectionIndicator {
        ActiveSectionIndicator::new(
            vec![
                NavSection {
                    section: ElementId(1),
                    link: ElementId(101),
                },
                NavSection {
                    section: ElementId(2),
                    link: ElementId(102),
                },
                NavSection {
                    section: ElementId(3),
                    link: ElementId(103),
                },
            ],
            120.0,
        )
    }

    fn layout(id: ElementId) -> Option<SectionBox> {
        match id.0 {
            1 => Some(SectionBox::new(400.0, 600.0)),
            2 => Some(SectionBox::new(1000.0, 800.0)),
            3 => Some(SectionBox::new(1800.0, 500.0)),
            _ => None,
        }
    }

    #[test]
    fn test_nothing_active_before_first_section() {
        let mut nav = indicator();
        assert_eq!(nav.sample(0.0, layout), None);
        assert_eq!(nav.sample(279.0, layout), None);
        assert_eq!(nav.active_link(), None);
    }

    #[test]
    fn test_lookahead_enters_section_early() {
        let mut nav = indicator();
        let switch = nav.sample(280.0, layout).unwrap();
        assert_eq!(switch.previous, None);
        assert_eq!(switch.next, ElementId(101));
    }

    #[test]
    fn test_switch_is_atomic_and_only_on_change() {
        let mut nav = indicator();
        nav.sample(300.0, layout);
        assert_eq!(nav.sample(500.0, layout), None);

        let switch = nav.sample(900.0, layout).unwrap();
        assert_eq!(
            switch.effects("active"),
            vec![
                Effect::remove_class(ElementId(101), "active"),
                Effect::add_class(ElementId(102), "active"),
            ]
        );
        assert_eq!(nav.active_link(), Some(ElementId(102)));
    }

    #[test]
    fn test_exactly_one_active_once_reached() {
        let mut nav = indicator();
        let mut marked: Vec<ElementId> = Vec::new();
        let mut y = 0.0;
        while y < 4000.0 {
            if let Some(switch) = nav.sample(y, layout) {
                if let Some(prev) = switch.previous {
                    marked.retain(|l| *l != prev);
                }
                marked.push(switch.next);
            }
            if y + 120.0 >= 400.0 {
                assert_eq!(marked.len(), 1, "scroll {y}");
            } else {
                assert!(marked.is_empty(), "scroll {y}");
            }
            y += 37.0;
        }
        // past the last section the last marker stays
        assert_eq!(nav.active_link(), Some(ElementId(103)));
    }

    #[test]
    fn test_activate_from_click() {
        let mut nav = indicator();
        assert!(nav.activate(ElementId(103)).is_some());
        assert!(nav.activate(ElementId(103)).is_none());
        assert_eq!(nav.active_link(), Some(ElementId(103)));
    }
}
