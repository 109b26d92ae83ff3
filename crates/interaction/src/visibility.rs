//! One-shot viewport visibility trigger
//!
//! Elements are registered with an optional delay. The first intersection
//! notification at or above the threshold yields a [`RevealAction`] and the
//! element is dropped from observation; later notifications are ignored.

use std::collections::{BTreeMap, BTreeSet};

use page_fx_shared::ElementId;

/// Browsers may report the crossing ratio slightly under the threshold
const RATIO_TOLERANCE: f64 = 1e-3;

/// Per-element reveal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    pub triggered: bool,
}

/// Instruction to reveal an element, possibly after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealAction {
    pub element: ElementId,
    pub delay_ms: u32,
}

#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    threshold: f64,
    pending: BTreeMap<ElementId, u32>,
    triggered: BTreeSet<ElementId>,
}

impl VisibilityTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            pending: BTreeMap::new(),
            triggered: BTreeSet::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start watching an element. Already triggered elements stay triggered.
    pub fn observe(&mut self, element: ElementId, delay_ms: u32) {
        if !self.triggered.contains(&element) {
            self.pending.insert(element, delay_ms);
        }
    }

    /// Watch a group whose members reveal `stagger_ms` apart, in order
    pub fn observe_staggered(
        &mut self,
        elements: impl IntoIterator<Item = ElementId>,
        stagger_ms: u32,
    ) {
        for (index, element) in elements.into_iter().enumerate() {
            let delay = u32::try_from(index)
                .unwrap_or(u32::MAX)
                .saturating_mul(stagger_ms);
            self.observe(element, delay);
        }
    }

    /// Feed an intersection notification
    pub fn on_intersection(
        &mut self,
        element: ElementId,
        ratio: f64,
        is_intersecting: bool,
    ) -> Option<RevealAction> {
        if !is_intersecting || ratio + RATIO_TOLERANCE < self.threshold {
            return None;
        }
        let delay_ms = self.pending.remove(&element)?;
        self.triggered.insert(element);
        Some(RevealAction { element, delay_ms })
    }

    /// Host cannot observe visibility: treat everything as already revealed
    pub fn reveal_all(&mut self) -> Vec<RevealAction> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_keys()
            .map(|element| {
                self.triggered.insert(element);
                RevealAction {
                    element,
                    delay_ms: 0,
                }
            })
            .collect()
    }

    pub fn state(&self, element: ElementId) -> Option<RevealState> {
        if self.triggered.contains(&element) {
            Some(RevealState { triggered: true })
        } else if self.pending.contains_key(&element) {
            Some(RevealState { triggered: false })
        } else {
            None
        }
    }

    pub fn is_triggered(&self, element: ElementId) -> bool {
        self.triggered.contains(&element)
    }

    /// Elements still under observation
    pub fn watched(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.pending.keys().copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let mut trigger = VisibilityTrigger::new(0.1);
        let card = ElementId(1);
        trigger.observe(card, 0);

        assert_eq!(
            trigger.on_intersection(card, 0.5, true),
            Some(RevealAction {
                element: card,
                delay_ms: 0
            })
        );
        for ratio in [0.0, 0.2, 1.0, 0.6] {
            assert_eq!(trigger.on_intersection(card, ratio, true), None);
        }
        assert_eq!(trigger.state(card), Some(RevealState { triggered: true }));
        assert_eq!(trigger.pending_count(), 0);
    }

    #[test]
    fn test_below_threshold_keeps_watching() {
        let mut trigger = VisibilityTrigger::new(0.5);
        let card = ElementId(7);
        trigger.observe(card, 0);

        assert_eq!(trigger.on_intersection(card, 0.49, true), None);
        assert_eq!(trigger.on_intersection(card, 0.9, false), None);
        assert_eq!(trigger.state(card), Some(RevealState { triggered: false }));
        assert!(trigger.on_intersection(card, 0.5, true).is_some());
    }

    #[test]
    fn test_crossing_just_under_threshold_fires() {
        let mut trigger = VisibilityTrigger::new(0.5);
        let card = ElementId(8);
        trigger.observe(card, 0);

        assert!(trigger.on_intersection(card, 0.4995, true).is_some());
        assert!(trigger.is_triggered(card));
    }

    #[test]
    fn test_unregistered_elements_ignored() {
        let mut trigger = VisibilityTrigger::new(0.0);
        assert_eq!(trigger.on_intersection(ElementId(99), 1.0, true), None);
        assert_eq!(trigger.state(ElementId(99)), None);
    }

    #[test]
    fn test_stagger_delays() {
        let mut trigger = VisibilityTrigger::new(0.1);
        trigger.observe_staggered([ElementId(10), ElementId(11), ElementId(12)], 100);

        let delays: Vec<u32> = [ElementId(12), ElementId(10), ElementId(11)]
            .into_iter()
            .filter_map(|el| trigger.on_intersection(el, 1.0, true))
            .map(|action| action.delay_ms)
            .collect();
        assert_eq!(delays, vec![200, 0, 100]);
    }

    #[test]
    fn test_reveal_all_is_fail_open() {
        let mut trigger = VisibilityTrigger::new(0.1);
        trigger.observe_staggered([ElementId(1), ElementId(2)], 100);

        let actions = trigger.reveal_all();
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.delay_ms == 0));
        assert!(trigger.is_triggered(ElementId(2)));
        assert_eq!(trigger.on_intersection(ElementId(1), 1.0, true), None);

        trigger.observe(ElementId(1), 0);
        assert_eq!(trigger.pending_count(), 0);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(VisibilityTrigger::new(3.0).threshold(), 1.0);
        assert_eq!(VisibilityTrigger::new(-1.0).threshold(), 0.0);
    }
}
