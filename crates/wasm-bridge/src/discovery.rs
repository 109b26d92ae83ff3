//! Locate and register the elements a configuration refers to

use page_fx_config::PageFxConfig;
use page_fx_interaction::{
    DiagramLayout, LinkElement, PageLayout, ReadoutElements, ReadoutLayout, SectionElement, StatCard,
};
use page_fx_interaction::navigation::fragment;

use crate::dom::Dom;

const PROGRESS_BAR_CSS: &str = "position: fixed; top: 0; left: 0; height: 3px; \
     background: linear-gradient(90deg, #bf3425, #47577c); z-index: 9999; \
     transition: width 0.1s linear; width: 0%;";

const BACK_TO_TOP_CSS: &str = "position: fixed; bottom: 30px; right: 30px; width: 48px; \
     height: 48px; background: linear-gradient(135deg, #bf3425 0%, #9d2a1e 100%); \
     color: white; border: none; border-radius: 50%; cursor: pointer; font-size: 20px; \
     font-weight: bold; opacity: 0; visibility: hidden; transition: all 0.3s ease; \
     z-index: 1000; box-shadow: 0 4px 15px rgba(191, 52, 37, 0.3); display: flex; \
     align-items: center; justify-content: center;";

pub fn discover(dom: &mut Dom, config: &PageFxConfig) -> PageLayout {
    let mut layout = PageLayout::default();

    for section in dom.query_all(&config.navigation.sections) {
        let Some(id) = section.get_attribute("id") else {
            continue;
        };
        layout.sections.push(SectionElement {
            element: dom.register(section),
            id,
        });
    }

    for link in dom.query_all(&config.navigation.links) {
        let href = link.get_attribute("href").unwrap_or_default();
        let target = fragment(&href)
            .and_then(|id| dom.element_by_id(id))
            .map(|target| dom.register(target));
        layout.links.push(LinkElement {
            element: dom.register(link),
            href,
            target,
        });
    }

    layout.sidebar = dom.query(&config.drawer.sidebar).map(|el| dom.register(el));
    layout.toggle = dom.query(&config.drawer.toggle).map(|el| dom.register(el));

    if config.progress.enabled {
        layout.progress_bar = dom.insert_fixed("div", &config.progress.bar_class, PROGRESS_BAR_CSS);
        layout.back_to_top =
            dom.insert_fixed("button", &config.progress.back_to_top_class, BACK_TO_TOP_CSS);
        if let Some(button) = layout.back_to_top.and_then(|id| dom.get(id)) {
            button.set_text_content(Some(&config.progress.back_to_top_symbol));
            button
                .set_attribute("aria-label", &config.progress.back_to_top_label)
                .ok();
        }
    }

    layout.reveal_groups = config
        .reveal
        .iter()
        .map(|group| register_all(dom, &group.selector))
        .collect();

    for card in dom.query_all(&config.stats.cards) {
        let number = card
            .query_selector(&config.stats.number)
            .ok()
            .flatten()
            .map(|el| dom.register(el));
        layout.stat_cards.push(StatCard {
            card: dom.register(card),
            number,
        });
    }

    layout.lazy_images = register_all(dom, &config.lazy_images.selector);

    if let Some(readout) = &config.readout {
        if let Some(chart) = dom.query(&readout.chart) {
            let elements = ReadoutElements {
                horizontal: dom.query(&readout.crosshair_horizontal).map(|el| dom.register(el)),
                vertical: dom.query(&readout.crosshair_vertical).map(|el| dom.register(el)),
                display: dom.query(&readout.display).map(|el| dom.register(el)),
            };
            layout.readout = Some(ReadoutLayout {
                chart: dom.register(chart),
                elements,
            });
        }
    }

    layout.hover = config
        .hover
        .iter()
        .map(|hover| register_all(dom, &hover.selector))
        .collect();

    layout.diagrams = config
        .diagrams
        .iter()
        .map(|diagram| DiagramLayout {
            container: diagram
                .container
                .as_deref()
                .and_then(|selector| dom.query(selector))
                .map(|el| dom.register(el)),
            tooltip: dom.query(&diagram.tooltip).map(|el| dom.register(el)),
            regions: register_all(dom, &diagram.regions),
        })
        .collect();

    log::debug!(
        "Discovered {} sections, {} links, {} diagrams",
        layout.sections.len(),
        layout.links.len(),
        layout.diagrams.iter().filter(|d| d.tooltip.is_some()).count()
    );
    layout
}

fn register_all(dom: &mut Dom, selector: &str) -> Vec<page_fx_shared::ElementId> {
    dom.query_all(selector)
        .into_iter()
        .map(|el| dom.register(el))
        .collect()
}
