//! Inline hover emphasis

use page_fx_config::HoverStyleConfig;
use page_fx_shared::{Effect, ElementId, Target};

#[derive(Debug, Clone)]
pub struct HoverStyle {
    config: HoverStyleConfig,
}

impl HoverStyle {
    pub fn new(config: HoverStyleConfig) -> Self {
        Self { config }
    }

    pub fn selector(&self) -> &str {
        &self.config.selector
    }

    /// Attribute of the hovered element the bridge must read, if any
    pub fn link_attribute(&self) -> Option<&str> {
        self.config.link.as_ref()?.attribute.as_deref()
    }

    /// Element(s) to style for a hovered element. A link that needs an
    /// attribute the element lacks resolves to nothing.
    pub fn resolve(&self, hovered: ElementId, attribute: Option<&str>) -> Option<Target> {
        match &self.config.link {
            None => Some(Target::Element(hovered)),
            Some(link) => match (&link.attribute, attribute) {
                (None, _) => Some(Target::Selector(link.template.clone())),
                (Some(_), Some(value)) if !value.is_empty() => {
                    Some(Target::Selector(link.selector_for(value)))
                }
                (Some(_), _) => None,
            },
        }
    }

    pub fn on_enter(&self, hovered: ElementId, attribute: Option<&str>) -> Vec<Effect> {
        let Some(target) = self.resolve(hovered, attribute) else {
            return Vec::new();
        };
        self.config
            .styles
            .iter()
            .map(|(property, value)| Effect::set_style(target.clone(), property, value.clone()))
            .collect()
    }

    pub fn on_leave(&self, hovered: ElementId, attribute: Option<&str>) -> Vec<Effect> {
        let Some(target) = self.resolve(hovered, attribute) else {
            return Vec::new();
        };
        self.config
            .styles
            .keys()
            .map(|property| match self.config.rest.get(property) {
                Some(value) => Effect::set_style(target.clone(), property, value.clone()),
                None => Effect::remove_style(target.clone(), property),
            })
            .collect()
    }
}
