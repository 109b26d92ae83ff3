//! Elements discovered on the page, already resolved to handles
//!
//! Lists that correspond to configuration entries (`reveal_groups`, `hover`,
//! `diagrams`) are index-aligned with them.

use page_fx_shared::ElementId;

use crate::readout::ReadoutElements;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionElement {
    pub element: ElementId,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub element: ElementId,
    pub href: String,
    /// Element the link's fragment names, if it exists
    pub target: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub card: ElementId,
    pub number: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadoutLayout {
    pub chart: ElementId,
    pub elements: ReadoutElements,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramLayout {
    pub container: Option<ElementId>,
    pub tooltip: Option<ElementId>,
    pub regions: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub sections: Vec<SectionElement>,
    pub links: Vec<LinkElement>,
    pub sidebar: Option<ElementId>,
    pub toggle: Option<ElementId>,
    pub progress_bar: Option<ElementId>,
    pub back_to_top: Option<ElementId>,
    pub reveal_groups: Vec<Vec<ElementId>>,
    pub stat_cards: Vec<StatCard>,
    pub lazy_images: Vec<ElementId>,
    pub readout: Option<ReadoutLayout>,
    pub hover: Vec<Vec<ElementId>>,
    pub diagrams: Vec<DiagramLayout>,
}

impl PageLayout {
    /// Link whose href points at `#id`
    pub fn link_for_section(&self, id: &str) -> Option<&LinkElement> {
        self.links
            .iter()
            .find(|link| link.href.strip_prefix('#') == Some(id))
    }
}
