//! Declarative event and observer registration
//!
//! The page controller describes which listeners it needs once, at
//! construction. The bridge attaches one listener per [`Binding`] and routes
//! the event back with the binding's [`Handler`].

use page_fx_shared::{ElementId, EventKind, ObserverGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingTarget {
    Element(ElementId),
    Window,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Scroll,
    Resize,
    TooltipEnter { diagram: usize, region: ElementId },
    TooltipMove { diagram: usize },
    TooltipLeave { diagram: usize },
    NavLinkClick { index: usize },
    NavLinkKey { index: usize },
    DrawerToggle,
    DocumentClick,
    DocumentKey,
    BackToTop,
    ReadoutMove,
    HoverEnter { style: usize, element: ElementId },
    HoverLeave { style: usize, element: ElementId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: BindingTarget,
    pub kind: EventKind,
    pub handler: Handler,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, target: BindingTarget, kind: EventKind, handler: Handler) -> &mut Self {
        self.bindings.push(Binding {
            target,
            kind,
            handler,
        });
        self
    }

    pub fn on_element(&mut self, element: ElementId, kind: EventKind, handler: Handler) -> &mut Self {
        self.on(BindingTarget::Element(element), kind, handler)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Handlers registered for an event on a target
    pub fn handlers_for(
        &self,
        target: BindingTarget,
        kind: EventKind,
    ) -> impl Iterator<Item = Handler> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.target == target && b.kind == kind)
            .map(|b| b.handler)
    }
}

impl<'a> IntoIterator for &'a BindingTable {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

/// One intersection observer to create
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub group: ObserverGroup,
    pub threshold: f64,
    pub root_margin: Option<String>,
    pub elements: Vec<ElementId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handlers_for_target() {
        let mut table = BindingTable::new();
        table
            .on(BindingTarget::Window, EventKind::Scroll, Handler::Scroll)
            .on_element(ElementId(3), EventKind::Click, Handler::NavLinkClick { index: 0 })
            .on_element(ElementId(3), EventKind::KeyDown, Handler::NavLinkKey { index: 0 });

        assert_eq!(table.len(), 3);
        let clicks: Vec<Handler> = table
            .handlers_for(BindingTarget::Element(ElementId(3)), EventKind::Click)
            .collect();
        assert_eq!(clicks, vec![Handler::NavLinkClick { index: 0 }]);
        assert_eq!(
            table
                .handlers_for(BindingTarget::Document, EventKind::Click)
                .count(),
            0
        );
    }
}
