//! Page-wide presets: reveal groups and hover emphasis

use std::collections::BTreeMap;

use crate::{HoverLink, HoverStyleConfig, RevealGroupConfig};

pub fn article_reveal_groups() -> Vec<RevealGroupConfig> {
    vec![
        RevealGroupConfig {
            name: "cards".to_string(),
            selector: ".stat-card, .learn-more-card, .feature-item, .highlight-box".to_string(),
            threshold: 0.1,
            hidden_transform: "translateY(20px)".to_string(),
            stagger_ms: 0,
        },
        RevealGroupConfig {
            name: "conclusions".to_string(),
            selector: ".conclusion-card".to_string(),
            threshold: 0.1,
            hidden_transform: "translateY(30px)".to_string(),
            stagger_ms: 100,
        },
    ]
}

fn styles(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn hover(selector: &str, pairs: &[(&str, &str)]) -> HoverStyleConfig {
    HoverStyleConfig {
        selector: selector.to_string(),
        link: None,
        styles: styles(pairs),
        rest: BTreeMap::new(),
    }
}

fn linked(
    selector: &str,
    attribute: Option<&str>,
    template: &str,
    pairs: &[(&str, &str)],
) -> HoverStyleConfig {
    HoverStyleConfig {
        selector: selector.to_string(),
        link: Some(HoverLink {
            attribute: attribute.map(str::to_string),
            template: template.to_string(),
        }),
        styles: styles(pairs),
        rest: BTreeMap::new(),
    }
}

pub fn article_hover_styles() -> Vec<HoverStyleConfig> {
    vec![
        HoverStyleConfig {
            rest: styles(&[
                ("transform", "scale(1)"),
                ("box-shadow", "0 4px 20px rgba(0, 0, 0, 0.08)"),
            ]),
            ..hover(
                ".full-width-image, .split-image img",
                &[
                    ("transform", "scale(1.01)"),
                    ("box-shadow", "0 20px 40px rgba(0, 0, 0, 0.15)"),
                ],
            )
        },
        hover(".data-table tbody tr", &[("background-color", "#f1f5f9")]),
        hover(".param-card", &[("transform", "translateX(8px) scale(1.02)")]),
        hover(
            ".groove-svg .groove-wall",
            &[
                ("fill", "#5a6b8a"),
                ("filter", "drop-shadow(0 0 6px rgba(71, 87, 124, 0.5))"),
            ],
        ),
        hover(
            ".state-card",
            &[
                ("transform", "scale(1.02)"),
                ("box-shadow", "0 8px 24px rgba(0,0,0,0.12)"),
            ],
        ),
        linked(
            ".insight-card.shear",
            None,
            ".stress-curve path:not(.stress-area)",
            &[
                ("stroke-width", "4"),
                ("filter", "drop-shadow(0 0 4px rgba(191, 52, 37, 0.5))"),
            ],
        ),
        linked(
            "[data-highlight]",
            Some("data-highlight"),
            "#processChart .{}-zone",
            &[("filter", "brightness(1.2)"), ("transform", "scale(1.01)")],
        ),
        linked(
            "[data-highlight]",
            Some("data-highlight"),
            "#panel3d .layer-{}, #panel3d .layer-{}-container",
            &[
                ("box-shadow", "0 0 20px rgba(191, 52, 37, 0.5)"),
                ("z-index", "20"),
            ],
        ),
    ]
}
