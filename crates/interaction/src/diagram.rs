//! A tooltip controller bound to one diagram's panel
//!
//! Translates controller state changes into effects on the panel: field
//! contents, `left`/`top`, the visible class and companion labels.

use page_fx_config::{DiagramConfig, FieldMode};
use page_fx_shared::{Effect, ElementId, Point, Rect, RegionDescriptor, Target};

use crate::tooltip::TooltipController;

#[derive(Debug, Clone)]
pub struct DiagramTooltip {
    config: DiagramConfig,
    panel: ElementId,
    container: Option<ElementId>,
    controller: TooltipController,
}

impl DiagramTooltip {
    pub fn new(config: DiagramConfig, panel: ElementId, container: Option<ElementId>) -> Self {
        let controller = TooltipController::new(config.catalog.clone(), config.positioning);
        Self {
            config,
            panel,
            container,
            controller,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    pub fn controller(&self) -> &TooltipController {
        &self.controller
    }

    /// Region key from the key attribute, falling back to the fixed key
    pub fn region_key(&self, attribute: Option<String>) -> Option<String> {
        attribute
            .filter(|value| !value.is_empty())
            .or_else(|| self.config.fixed_key.clone())
    }

    pub fn key_attribute(&self) -> &str {
        &self.config.key_attribute
    }

    pub fn on_enter(
        &mut self,
        key: &str,
        pointer: Point,
        region: Rect,
        container: Option<Rect>,
    ) -> Vec<Effect> {
        if !self.controller.on_enter(key, pointer, region, container) {
            return Vec::new();
        }

        let state = self.controller.state();
        let mut effects = match &state.content {
            Some(descriptor) => self.field_effects(descriptor),
            None => Vec::new(),
        };
        effects.extend(self.position_effects(state.anchor));
        effects.push(Effect::add_class(self.panel, &self.config.visible_class));

        if let Some(companions) = &self.config.companions {
            let class = &self.config.visible_class;
            effects.push(Effect::add_class(
                Target::Selector(format!(".{}{}", companions.label_prefix, key)),
                class,
            ));
            effects.push(Effect::add_class(
                Target::Selector(format!(".{}{}", companions.connector_prefix, key)),
                class,
            ));
        }
        effects
    }

    pub fn on_move(&mut self, pointer: Point, container: Option<Rect>) -> Vec<Effect> {
        if self.controller.on_move(pointer, container) {
            self.position_effects(self.controller.state().anchor)
        } else {
            Vec::new()
        }
    }

    pub fn on_leave(&mut self) -> Vec<Effect> {
        if !self.controller.on_leave() {
            return Vec::new();
        }

        let class = &self.config.visible_class;
        let mut effects = vec![Effect::remove_class(self.panel, class)];
        if let Some(companions) = &self.config.companions {
            effects.push(Effect::remove_class(
                Target::Selector(companions.label_selector.clone()),
                class,
            ));
            effects.push(Effect::remove_class(
                Target::Selector(companions.connector_selector.clone()),
                class,
            ));
        }
        effects
    }

    fn field_effects(&self, descriptor: &RegionDescriptor) -> Vec<Effect> {
        self.config
            .fields
            .iter()
            .filter_map(|binding| {
                let value = descriptor.field(&binding.field)?;
                let target = match &binding.selector {
                    Some(selector) => Target::within(self.panel, selector.as_str()),
                    None => Target::Element(self.panel),
                };
                Some(match &binding.mode {
                    FieldMode::Text => Effect::set_text(target, value),
                    FieldMode::ClassName { prefix } => Effect::SetClassName {
                        target,
                        class_name: format!("{prefix}{value}"),
                    },
                })
            })
            .collect()
    }

    fn position_effects(&self, anchor: Point) -> Vec<Effect> {
        vec![
            Effect::set_style(self.panel, "left", Effect::px(anchor.x)),
            Effect::set_style(self.panel, "top", Effect::px(anchor.y)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_fx_config::PresetManager;

    const PANEL: ElementId = ElementId(50);

    fn diagram(name: &str) -> DiagramTooltip {
        let config = PresetManager::new().find_preset(name).cloned().unwrap();
        DiagramTooltip::new(config, PANEL, Some(ElementId(51)))
    }

    #[test]
    fn test_enter_fills_fields_and_shows() {
        let mut process = diagram("process_window");
        let effects = process.on_enter(
            "optimal",
            Point::new(300.0, 260.0),
            Rect::default(),
            Some(Rect::new(100.0, 100.0, 600.0, 400.0)),
        );

        assert!(effects.contains(&Effect::SetClassName {
            target: Target::within(PANEL, ".tooltip-indicator"),
            class_name: "tooltip-indicator optimal".to_string(),
        }));
        assert!(effects.contains(&Effect::set_style(PANEL, "left", "215px")));
        assert!(effects.contains(&Effect::set_style(PANEL, "top", "80px")));
        assert_eq!(effects.last(), Some(&Effect::add_class(PANEL, "visible")));
    }

    #[test]
    fn test_move_repositions_only_while_visible() {
        let mut process = diagram("process_window");
        let container = Some(Rect::new(100.0, 100.0, 600.0, 400.0));
        assert!(process.on_move(Point::new(300.0, 260.0), container).is_empty());

        process.on_enter("optimal", Point::new(300.0, 260.0), Rect::default(), container);
        let effects = process.on_move(Point::new(320.0, 300.0), container);
        assert_eq!(
            effects,
            vec![
                Effect::set_style(PANEL, "left", "235px"),
                Effect::set_style(PANEL, "top", "120px"),
            ]
        );

        process.on_leave();
        assert!(process.on_move(Point::new(320.0, 300.0), container).is_empty());
    }

    #[test]
    fn test_unknown_region_emits_nothing() {
        let mut compaction = diagram("compaction");
        assert!(compaction
            .on_enter("gantry", Point::default(), Rect::default(), None)
            .is_empty());
        assert!(compaction.on_leave().is_empty());
    }

    #[test]
    fn test_companions_follow_key() {
        let mut layers = diagram("copv_layers");
        let effects = layers.on_enter("liner", Point::new(10.0, 100.0), Rect::default(), None);
        assert!(effects.contains(&Effect::add_class(
            Target::Selector(".label-liner".to_string()),
            "visible"
        )));
        assert!(effects.contains(&Effect::add_class(
            Target::Selector(".conn-liner".to_string()),
            "visible"
        )));
        assert!(effects.contains(&Effect::set_style(PANEL, "top", "40px")));

        let leave = layers.on_leave();
        assert_eq!(leave.len(), 3);
        assert!(layers.on_leave().is_empty());
    }

    #[test]
    fn test_inline_title_goes_to_panel() {
        let mut stress = diagram("stress_chart");
        let effects = stress.on_enter(
            "Peak: 38 MPa",
            Point::default(),
            Rect::new(220.0, 140.0, 10.0, 10.0),
            Some(Rect::new(20.0, 40.0, 700.0, 300.0)),
        );
        assert_eq!(effects[0], Effect::set_text(PANEL, "Peak: 38 MPa"));
        assert!(effects.contains(&Effect::set_style(PANEL, "left", "220px")));
        assert!(effects.contains(&Effect::set_style(PANEL, "top", "70px")));
    }

    #[test]
    fn test_fixed_key_fallback() {
        let grooves = diagram("copv_grooves");
        assert_eq!(grooves.region_key(None).as_deref(), Some("groove"));
        assert_eq!(grooves.region_key(Some(String::new())).as_deref(), Some("groove"));
        assert_eq!(grooves.region_key(Some("deep".into())).as_deref(), Some("deep"));
    }
}
