//! Page orchestrator
//!
//! Owns every controller of one mounted page and routes bound events,
//! intersection notifications and deferred tasks to them. All state is per
//! instance; nothing here touches the DOM.

use std::collections::BTreeMap;

use page_fx_config::{ConfigValidator, PageFxConfig};
use page_fx_shared::{
    Deferred, Effect, ElementId, EventKind, InputEvent, ObserverGroup, PageFxResult, Target,
    TooltipState, When,
};

use crate::bindings::{BindingTable, BindingTarget, Handler, Observation};
use crate::diagram::DiagramTooltip;
use crate::drawer::NavDrawer;
use crate::hover::HoverStyle;
use crate::layout::{LinkElement, PageLayout};
use crate::navigation::{direction_for_key, fragment, scroll_target, step};
use crate::progress::{BackToTop, ReadingProgress};
use crate::readout::CoordinateReadout;
use crate::sections::{ActiveSectionIndicator, NavSection};
use crate::stat_animation::{StatAnimation, StatRules};
use crate::surface::Surface;
use crate::throttle::FrameThrottle;
use crate::visibility::VisibilityTrigger;

const REVEAL_TRANSITION: &str = "opacity 0.5s ease, transform 0.5s ease";
const REVEALED_TRANSFORM: &str = "translateY(0)";

struct MountedDiagram {
    tooltip: DiagramTooltip,
    regions: Vec<ElementId>,
}

struct RevealGroup {
    trigger: VisibilityTrigger,
    elements: Vec<ElementId>,
    hidden_transform: String,
}

struct RunningStat {
    animation: StatAnimation,
    started_ms: f64,
}

pub struct PageController {
    config: PageFxConfig,
    links: Vec<LinkElement>,
    sections: ActiveSectionIndicator,
    scroll_samples: FrameThrottle<f64>,
    progress: Option<ReadingProgress>,
    back_to_top: Option<BackToTop>,
    drawer: Option<NavDrawer>,
    toggle: Option<ElementId>,
    reveal: Vec<RevealGroup>,
    stats: VisibilityTrigger,
    stat_numbers: BTreeMap<ElementId, ElementId>,
    stat_rules: StatRules,
    running_stats: BTreeMap<ElementId, RunningStat>,
    lazy_images: VisibilityTrigger,
    readout: Option<(ElementId, CoordinateReadout)>,
    hover: Vec<(HoverStyle, Vec<ElementId>)>,
    diagrams: Vec<MountedDiagram>,
}

impl PageController {
    /// Validate `config` and build controllers for everything `layout` found.
    /// Features whose elements are missing are left out.
    pub fn new(config: PageFxConfig, layout: PageLayout) -> PageFxResult<Self> {
        ConfigValidator::validate(&config)?;

        let nav_sections = layout
            .sections
            .iter()
            .filter_map(|section| {
                let link = layout.link_for_section(&section.id)?;
                Some(NavSection {
                    section: section.element,
                    link: link.element,
                })
            })
            .collect();
        let sections = ActiveSectionIndicator::new(nav_sections, config.navigation.lookahead);

        let (progress, back_to_top) = if config.progress.enabled {
            (
                layout.progress_bar.map(ReadingProgress::new),
                layout
                    .back_to_top
                    .map(|button| BackToTop::new(button, config.progress.back_to_top_after)),
            )
        } else {
            (None, None)
        };

        let drawer = match (layout.sidebar, layout.toggle) {
            (Some(sidebar), Some(toggle)) => Some(NavDrawer::new(
                sidebar,
                toggle,
                &config.drawer.open_class,
                config.drawer.breakpoint,
            )),
            _ => None,
        };

        let reveal = config
            .reveal
            .iter()
            .zip(layout.reveal_groups)
            .map(|(group, elements)| {
                let mut trigger = VisibilityTrigger::new(group.threshold);
                trigger.observe_staggered(elements.iter().copied(), group.stagger_ms);
                RevealGroup {
                    trigger,
                    elements,
                    hidden_transform: group.hidden_transform.clone(),
                }
            })
            .collect();

        let mut stats = VisibilityTrigger::new(config.stats.threshold);
        let mut stat_numbers = BTreeMap::new();
        for card in &layout.stat_cards {
            stats.observe(card.card, 0);
            if let Some(number) = card.number {
                stat_numbers.insert(card.card, number);
            }
        }

        let mut lazy_images = VisibilityTrigger::new(0.0);
        for image in &layout.lazy_images {
            lazy_images.observe(*image, 0);
        }

        let readout = match (&config.readout, layout.readout) {
            (Some(readout), Some(found)) => Some((
                found.chart,
                CoordinateReadout::new(readout.clone(), found.elements),
            )),
            _ => None,
        };

        let hover = config
            .hover
            .iter()
            .cloned()
            .map(HoverStyle::new)
            .zip(layout.hover)
            .collect();

        let diagrams = config
            .diagrams
            .iter()
            .zip(layout.diagrams)
            .filter_map(|(diagram, found)| {
                let Some(panel) = found.tooltip else {
                    log::debug!("Diagram {} has no tooltip panel on this page", diagram.name);
                    return None;
                };
                if found.regions.is_empty() {
                    return None;
                }
                Some(MountedDiagram {
                    tooltip: DiagramTooltip::new(diagram.clone(), panel, found.container),
                    regions: found.regions,
                })
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Page controller built: {} links, {} diagrams, {} stat cards",
            layout.links.len(),
            diagrams.len(),
            layout.stat_cards.len()
        );

        Ok(Self {
            stat_rules: StatRules::from(&config.stats),
            links: layout.links,
            sections,
            scroll_samples: FrameThrottle::new(),
            progress,
            back_to_top,
            drawer,
            toggle: layout.toggle,
            reveal,
            stats,
            stat_numbers,
            running_stats: BTreeMap::new(),
            lazy_images,
            readout,
            hover,
            diagrams,
            config,
        })
    }

    pub fn config(&self) -> &PageFxConfig {
        &self.config
    }

    /// Listeners the bridge has to attach
    pub fn bindings(&self) -> BindingTable {
        let mut table = BindingTable::new();
        table
            .on(BindingTarget::Window, EventKind::Scroll, Handler::Scroll)
            .on(BindingTarget::Window, EventKind::Resize, Handler::Resize);

        for (index, link) in self.links.iter().enumerate() {
            table
                .on_element(link.element, EventKind::Click, Handler::NavLinkClick { index })
                .on_element(link.element, EventKind::KeyDown, Handler::NavLinkKey { index });
        }

        if let (Some(_), Some(toggle)) = (&self.drawer, self.toggle) {
            table
                .on_element(toggle, EventKind::Click, Handler::DrawerToggle)
                .on(BindingTarget::Document, EventKind::Click, Handler::DocumentClick)
                .on(BindingTarget::Document, EventKind::KeyDown, Handler::DocumentKey);
        }

        if let Some(button) = &self.back_to_top {
            table.on_element(button.button(), EventKind::Click, Handler::BackToTop);
        }

        if let Some((chart, _)) = &self.readout {
            table.on_element(*chart, EventKind::MouseMove, Handler::ReadoutMove);
        }

        for (style, (_, elements)) in self.hover.iter().enumerate() {
            for &element in elements {
                table
                    .on_element(element, EventKind::MouseEnter, Handler::HoverEnter { style, element })
                    .on_element(element, EventKind::MouseLeave, Handler::HoverLeave { style, element });
            }
        }

        for (diagram, mounted) in self.diagrams.iter().enumerate() {
            for &region in &mounted.regions {
                table
                    .on_element(region, EventKind::MouseEnter, Handler::TooltipEnter { diagram, region })
                    .on_element(region, EventKind::MouseMove, Handler::TooltipMove { diagram })
                    .on_element(region, EventKind::MouseLeave, Handler::TooltipLeave { diagram });
            }
        }

        table
    }

    /// Intersection observers the bridge has to create
    pub fn observations(&self) -> Vec<Observation> {
        let mut observations: Vec<Observation> = self
            .reveal
            .iter()
            .enumerate()
            .map(|(index, group)| Observation {
                group: ObserverGroup::Reveal(index),
                threshold: group.trigger.threshold(),
                root_margin: None,
                elements: group.trigger.watched().collect(),
            })
            .collect();

        observations.push(Observation {
            group: ObserverGroup::Stats,
            threshold: self.stats.threshold(),
            root_margin: None,
            elements: self.stats.watched().collect(),
        });
        observations.push(Observation {
            group: ObserverGroup::LazyImages,
            threshold: self.lazy_images.threshold(),
            root_margin: Some(self.config.lazy_images.root_margin.clone()),
            elements: self.lazy_images.watched().collect(),
        });

        observations.retain(|o| !o.elements.is_empty());
        observations
    }

    /// Initial effects. Without observer support every visibility-driven
    /// feature is treated as already revealed.
    pub fn mount(&mut self, surface: &dyn Surface, observers_supported: bool) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Some(drawer) = &mut self.drawer {
            effects.extend(drawer.mount());
        }
        effects.extend(self.update_scroll_indicators(surface));

        let scroll_y = surface.viewport().scroll_y;
        if let Some(switch) = self.sections.sample(scroll_y, |el| surface.section_box(el)) {
            effects.extend(switch.effects(&self.config.navigation.active_class));
        }

        if observers_supported {
            for group in &self.reveal {
                for &element in &group.elements {
                    effects.push(Effect::set_style(element, "opacity", "0"));
                    effects.push(Effect::set_style(
                        element,
                        "transform",
                        group.hidden_transform.clone(),
                    ));
                    effects.push(Effect::set_style(element, "transition", REVEAL_TRANSITION));
                }
            }
        } else {
            log::info!("IntersectionObserver unavailable, revealing everything");
            for group in &mut self.reveal {
                group.trigger.reveal_all();
            }
            self.stats.reveal_all();
            for action in self.lazy_images.reveal_all() {
                effects.extend(self.load_image(action.element));
            }
        }

        effects
    }

    pub fn handle(
        &mut self,
        handler: &Handler,
        event: &InputEvent,
        surface: &dyn Surface,
    ) -> Vec<Effect> {
        match *handler {
            Handler::Scroll => {
                let mut effects = self.update_scroll_indicators(surface);
                if self.scroll_samples.offer(surface.viewport().scroll_y) {
                    effects.push(Effect::defer(Deferred::SampleSections, When::NextFrame));
                }
                effects
            }
            Handler::Resize => vec![Effect::defer(
                Deferred::ResizeSettled,
                When::AfterMs(self.config.drawer.resize_debounce_ms),
            )],
            Handler::TooltipEnter { diagram, region } => {
                let Some(mounted) = self.diagrams.get_mut(diagram) else {
                    return Vec::new();
                };
                let attribute = surface.attribute(region, mounted.tooltip.key_attribute());
                let Some(key) = mounted.tooltip.region_key(attribute) else {
                    return Vec::new();
                };
                let container = mounted.tooltip.container().and_then(|c| surface.bounds(c));
                let region_bounds = surface.bounds(region).unwrap_or_default();
                mounted.tooltip.on_enter(
                    &key,
                    event.pointer.unwrap_or_default(),
                    region_bounds,
                    container,
                )
            }
            Handler::TooltipMove { diagram } => {
                let (Some(mounted), Some(pointer)) = (self.diagrams.get_mut(diagram), event.pointer)
                else {
                    return Vec::new();
                };
                let container = mounted.tooltip.container().and_then(|c| surface.bounds(c));
                mounted.tooltip.on_move(pointer, container)
            }
            Handler::TooltipLeave { diagram } => self
                .diagrams
                .get_mut(diagram)
                .map(|mounted| mounted.tooltip.on_leave())
                .unwrap_or_default(),
            Handler::NavLinkClick { index } => self.on_link_click(index, surface),
            Handler::NavLinkKey { index } => self.on_link_key(index, event),
            Handler::DrawerToggle => self
                .drawer
                .as_mut()
                .map(NavDrawer::on_toggle)
                .unwrap_or_default(),
            Handler::DocumentClick => {
                let width = surface.viewport().width;
                self.drawer
                    .as_mut()
                    .map(|drawer| drawer.on_document_click(event, width))
                    .unwrap_or_default()
            }
            Handler::DocumentKey => {
                if event.key.as_deref() != Some("Escape") {
                    return Vec::new();
                }
                let width = surface.viewport().width;
                self.drawer
                    .as_mut()
                    .map(|drawer| drawer.on_escape(width))
                    .unwrap_or_default()
            }
            Handler::BackToTop => self
                .back_to_top
                .as_ref()
                .map(BackToTop::on_click)
                .unwrap_or_default(),
            Handler::ReadoutMove => {
                let Some((chart, readout)) = &self.readout else {
                    return Vec::new();
                };
                match (event.pointer, surface.bounds(*chart)) {
                    (Some(pointer), Some(bounds)) => readout.on_move(pointer, &bounds),
                    _ => Vec::new(),
                }
            }
            Handler::HoverEnter { style, element } => self.hover_effects(style, element, surface, true),
            Handler::HoverLeave { style, element } => self.hover_effects(style, element, surface, false),
        }
    }

    /// Feed an intersection notification from one of the declared observers
    pub fn on_intersection(
        &mut self,
        group: ObserverGroup,
        element: ElementId,
        ratio: f64,
        is_intersecting: bool,
        surface: &dyn Surface,
    ) -> Vec<Effect> {
        let trigger = match group {
            ObserverGroup::Reveal(index) => match self.reveal.get_mut(index) {
                Some(group) => &mut group.trigger,
                None => return Vec::new(),
            },
            ObserverGroup::Stats => &mut self.stats,
            ObserverGroup::LazyImages => &mut self.lazy_images,
        };
        let Some(action) = trigger.on_intersection(element, ratio, is_intersecting) else {
            return Vec::new();
        };

        let mut effects = vec![Effect::Unobserve { group, element }];
        match group {
            ObserverGroup::Reveal(_) if action.delay_ms == 0 => {
                effects.extend(reveal_effects(element));
            }
            ObserverGroup::Reveal(_) => {
                effects.push(Effect::defer(
                    Deferred::Reveal(element),
                    When::AfterMs(action.delay_ms),
                ));
            }
            ObserverGroup::Stats => effects.extend(self.start_stat(element, surface)),
            ObserverGroup::LazyImages => effects.extend(self.load_image(element)),
        }
        effects
    }

    /// Run a deferred task the bridge scheduled on this page's behalf
    pub fn run_deferred(&mut self, task: Deferred, surface: &dyn Surface) -> Vec<Effect> {
        match task {
            Deferred::SampleSections => {
                let scroll_y = self
                    .scroll_samples
                    .take()
                    .unwrap_or_else(|| surface.viewport().scroll_y);
                self.sections
                    .sample(scroll_y, |el| surface.section_box(el))
                    .map(|switch| switch.effects(&self.config.navigation.active_class))
                    .unwrap_or_default()
            }
            Deferred::StatTick(number) => {
                let Some(running) = self.running_stats.get(&number) else {
                    return Vec::new();
                };
                let (text, done) = running
                    .animation
                    .text_at(surface.now_ms() - running.started_ms);
                let mut effects = vec![Effect::set_text(number, text)];
                if done {
                    self.running_stats.remove(&number);
                } else {
                    effects.push(Effect::defer(Deferred::StatTick(number), When::NextFrame));
                }
                effects
            }
            Deferred::Reveal(element) => reveal_effects(element),
            Deferred::ResizeSettled => {
                let width = surface.viewport().width;
                self.drawer
                    .as_mut()
                    .map(|drawer| drawer.on_resize_settled(width))
                    .unwrap_or_default()
            }
        }
    }

    /// Tooltip state of a mounted diagram
    pub fn tooltip_state(&self, diagram: &str) -> Option<&TooltipState> {
        self.diagrams
            .iter()
            .find(|mounted| mounted.tooltip.name() == diagram)
            .map(|mounted| mounted.tooltip.controller().state())
    }

    pub fn active_link(&self) -> Option<ElementId> {
        self.sections.active_link()
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer.as_ref().is_some_and(NavDrawer::is_open)
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.reveal.iter().any(|g| g.trigger.is_triggered(element))
    }

    fn update_scroll_indicators(&mut self, surface: &dyn Surface) -> Vec<Effect> {
        let viewport = surface.viewport();
        let mut effects = Vec::new();
        if let Some(progress) = &mut self.progress {
            effects.extend(progress.update(&viewport));
        }
        if let Some(button) = &mut self.back_to_top {
            effects.extend(button.update(viewport.scroll_y));
        }
        effects
    }

    fn on_link_click(&mut self, index: usize, surface: &dyn Surface) -> Vec<Effect> {
        let Some(link) = self.links.get(index) else {
            return Vec::new();
        };
        let link_element = link.element;
        let target = link
            .target
            .filter(|_| fragment(&link.href).is_some())
            .and_then(|target| surface.bounds(target));

        let mut effects = Vec::new();
        if let Some(bounds) = target {
            let viewport = surface.viewport();
            effects.push(Effect::PreventDefault);
            effects.push(Effect::ScrollTo {
                top: scroll_target(
                    bounds.top,
                    viewport.scroll_y,
                    self.config.navigation.scroll_offset,
                ),
                smooth: true,
            });
            if let Some(switch) = self.sections.activate(link_element) {
                effects.extend(switch.effects(&self.config.navigation.active_class));
            }
        }

        let width = surface.viewport().width;
        if let Some(drawer) = &mut self.drawer {
            effects.extend(drawer.on_link_click(width));
        }
        effects
    }

    fn on_link_key(&self, index: usize, event: &InputEvent) -> Vec<Effect> {
        let Some(direction) = event.key.as_deref().and_then(direction_for_key) else {
            return Vec::new();
        };
        let Some(next) = step(index, self.links.len(), direction) else {
            return Vec::new();
        };
        vec![
            Effect::PreventDefault,
            Effect::Focus {
                target: Target::Element(self.links[next].element),
            },
        ]
    }

    fn hover_effects(
        &self,
        style: usize,
        element: ElementId,
        surface: &dyn Surface,
        entering: bool,
    ) -> Vec<Effect> {
        let Some((hover, _)) = self.hover.get(style) else {
            return Vec::new();
        };
        let attribute = hover
            .link_attribute()
            .and_then(|name| surface.attribute(element, name));
        if entering {
            hover.on_enter(element, attribute.as_deref())
        } else {
            hover.on_leave(element, attribute.as_deref())
        }
    }

    fn start_stat(&mut self, card: ElementId, surface: &dyn Surface) -> Vec<Effect> {
        let Some(&number) = self.stat_numbers.get(&card) else {
            return Vec::new();
        };
        let Some(literal) = surface.text(number) else {
            return Vec::new();
        };
        let Some(animation) = StatAnimation::parse(&literal, &self.stat_rules) else {
            log::debug!("Stat '{literal}' is not animated");
            return Vec::new();
        };
        self.running_stats.insert(
            number,
            RunningStat {
                animation,
                started_ms: surface.now_ms(),
            },
        );
        vec![Effect::defer(Deferred::StatTick(number), When::NextFrame)]
    }

    fn load_image(&self, image: ElementId) -> Vec<Effect> {
        let lazy = &self.config.lazy_images;
        vec![
            Effect::CopyAttribute {
                target: Target::Element(image),
                from: lazy.source_attribute.clone(),
                to: "src".to_string(),
            },
            Effect::add_class(image, &lazy.loaded_class),
        ]
    }
}

fn reveal_effects(element: ElementId) -> Vec<Effect> {
    vec![
        Effect::set_style(element, "opacity", "1"),
        Effect::set_style(element, "transform", REVEALED_TRANSFORM),
    ]
}
