//! Declarative DOM effects
//!
//! Controllers never touch the DOM. They return a batch of [`Effect`]s which
//! the browser bridge applies in order, skipping any whose target is missing.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Which element(s) an effect applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// A registered element
    Element(ElementId),
    /// First descendant of a registered element matching a selector
    Descendant { root: ElementId, selector: String },
    /// Every element in the document matching a selector
    Selector(String),
}

impl Target {
    pub fn within(root: ElementId, selector: impl Into<String>) -> Self {
        Target::Descendant {
            root,
            selector: selector.into(),
        }
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}

/// Intersection observer an element is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObserverGroup {
    /// Reveal group, by position in the configuration
    Reveal(usize),
    Stats,
    LazyImages,
}

/// Keyed unit of deferred work.
///
/// The bridge keeps one pending handle per key; scheduling a key again
/// supersedes the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deferred {
    /// Recompute the active navigation section
    SampleSections,
    /// Advance the number animation of a stat card
    StatTick(ElementId),
    /// Apply a staggered reveal
    Reveal(ElementId),
    /// Window size has stopped changing
    ResizeSettled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum When {
    NextFrame,
    AfterMs(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    SetStyle {
        target: Target,
        property: String,
        value: String,
    },
    RemoveStyle {
        target: Target,
        property: String,
    },
    AddClass {
        target: Target,
        class: String,
    },
    RemoveClass {
        target: Target,
        class: String,
    },
    SetClassName {
        target: Target,
        class_name: String,
    },
    SetText {
        target: Target,
        text: String,
    },
    SetAttribute {
        target: Target,
        name: String,
        value: String,
    },
    /// Copy one attribute's value into another (`data-src` -> `src`)
    CopyAttribute {
        target: Target,
        from: String,
        to: String,
    },
    ScrollTo {
        top: f64,
        smooth: bool,
    },
    Focus {
        target: Target,
    },
    /// Cancel the default action of the event being handled
    PreventDefault,
    /// Stop observing an element for visibility changes
    Unobserve {
        group: ObserverGroup,
        element: ElementId,
    },
    Defer {
        task: Deferred,
        when: When,
    },
}

impl Effect {
    pub fn set_style(target: impl Into<Target>, property: &str, value: impl Into<String>) -> Self {
        Effect::SetStyle {
            target: target.into(),
            property: property.to_string(),
            value: value.into(),
        }
    }

    pub fn remove_style(target: impl Into<Target>, property: &str) -> Self {
        Effect::RemoveStyle {
            target: target.into(),
            property: property.to_string(),
        }
    }

    pub fn add_class(target: impl Into<Target>, class: &str) -> Self {
        Effect::AddClass {
            target: target.into(),
            class: class.to_string(),
        }
    }

    pub fn remove_class(target: impl Into<Target>, class: &str) -> Self {
        Effect::RemoveClass {
            target: target.into(),
            class: class.to_string(),
        }
    }

    pub fn set_text(target: impl Into<Target>, text: impl Into<String>) -> Self {
        Effect::SetText {
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn set_attribute(target: impl Into<Target>, name: &str, value: impl Into<String>) -> Self {
        Effect::SetAttribute {
            target: target.into(),
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn defer(task: Deferred, when: When) -> Self {
        Effect::Defer { task, when }
    }

    /// Pixel value formatting shared by every positional style
    pub fn px(value: f64) -> String {
        format!("{value}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_formatting() {
        assert_eq!(Effect::px(15.0), "15px");
        assert_eq!(Effect::px(-80.5), "-80.5px");
    }

    #[test]
    fn test_builders_target_elements() {
        let effect = Effect::add_class(ElementId(3), "visible");
        assert_eq!(
            effect,
            Effect::AddClass {
                target: Target::Element(ElementId(3)),
                class: "visible".to_string(),
            }
        );
    }
}
