//! Diagram presets
//!
//! Tooltip catalogs and positioning for the interactive figures of the
//! interfacial integrity article.

use page_fx_shared::{DescriptorCatalog, RegionDescriptor};

use crate::{Companions, DiagramConfig, FieldBinding, FieldMode, HorizontalAnchor, Positioning};

/// Create every diagram preset, in page order
pub fn article_diagrams() -> Vec<DiagramConfig> {
    vec![
        compaction_preset(),
        process_window_preset(),
        stress_chart_preset(),
        copv_layers_preset(),
        copv_interface_preset(),
        copv_grooves_preset(),
        hybrid_layers_preset(),
    ]
}

fn catalog(name: &str, entries: Vec<RegionDescriptor>) -> Option<DescriptorCatalog> {
    let catalog = DescriptorCatalog::from_descriptors(entries).unwrap_or_else(|err| {
        log::warn!("Diagram preset {name} has an invalid catalog: {err}");
        DescriptorCatalog::default()
    });
    Some(catalog)
}

fn text(field: &str, selector: &str) -> FieldBinding {
    FieldBinding {
        field: field.to_string(),
        selector: Some(selector.to_string()),
        mode: FieldMode::Text,
    }
}

fn class_name(field: &str, selector: &str, prefix: &str) -> FieldBinding {
    FieldBinding {
        field: field.to_string(),
        selector: Some(selector.to_string()),
        mode: FieldMode::ClassName {
            prefix: prefix.to_string(),
        },
    }
}

/// Pointer-following panel positioned against the viewport
fn floating() -> Positioning {
    Positioning::Pointer {
        offset_x: 15.0,
        offset_y: -60.0,
        relative_to_container: false,
    }
}

/// Tape placement compaction diagram
fn compaction_preset() -> DiagramConfig {
    let zone = |key: &str, title: &str, temp: &str, desc: &str| {
        RegionDescriptor::new(key, title, desc).with_field("temp", temp)
    };

    DiagramConfig {
        name: "compaction".to_string(),
        container: Some("#compactionDiagram".to_string()),
        tooltip: "#processTooltip".to_string(),
        regions: "#compactionDiagram [data-zone]".to_string(),
        key_attribute: "data-zone".to_string(),
        fixed_key: None,
        catalog: catalog(
            "compaction",
            vec![
                zone(
                    "roller",
                    "Compaction Roller",
                    "Controlled",
                    "Applies consolidation pressure to bond incoming tape with substrate. Temperature-controlled to optimize bonding.",
                ),
                zone(
                    "tape",
                    "Incoming Tape",
                    "~350°C",
                    "Pre-heated thermoplastic tape in molten state, ready for consolidation with the substrate layers.",
                ),
                zone(
                    "nip",
                    "Nip Point",
                    "~350°C",
                    "Highest temperature zone where molten tape contacts substrate. Critical for achieving intimate contact and bonding.",
                ),
                zone(
                    "interface",
                    "Interface Zone",
                    "180-250°C",
                    "Bonding region where molecular interdiffusion occurs. Temperature must exceed glass transition for proper adhesion.",
                ),
                zone(
                    "surface",
                    "Liner Surface",
                    "Consolidated",
                    "Previously laid and consolidated tape layers. Surface reheated during new tape placement for bonding.",
                ),
                zone(
                    "bulk",
                    "Liner Bulk",
                    "25-80°C",
                    "Inner laminate layers that have cooled and crystallized. Provides structural support during layup.",
                ),
                zone(
                    "mandrel",
                    "Mandrel/Support",
                    "Ambient",
                    "Tooling surface that defines part geometry. May be heated or cooled to control process temperatures.",
                ),
            ],
        ),
        // 10 above the region, then another 100 for the panel height
        positioning: Positioning::Bounds {
            anchor: HorizontalAnchor::Center,
            offset_x: 0.0,
            offset_y: -110.0,
            clamp: true,
        },
        fields: vec![
            text("title", ".tooltip-title"),
            text("temp", ".tooltip-temp"),
            text("detail", ".tooltip-desc"),
        ],
        companions: None,
        visible_class: "visible".to_string(),
    }
}

/// Temperature / speed process window chart
fn process_window_preset() -> DiagramConfig {
    let zone = |key: &str, title: &str, indicator: &str, params: &str, desc: &str| {
        RegionDescriptor::new(key, title, desc)
            .with_field("indicator", indicator)
            .with_field("params", params)
    };

    DiagramConfig {
        name: "process_window".to_string(),
        container: Some("#processChart".to_string()),
        tooltip: "#zoneTooltip".to_string(),
        regions: "#processChart [data-zone]".to_string(),
        key_attribute: "data-zone".to_string(),
        fixed_key: None,
        catalog: catalog(
            "process_window",
            vec![
                zone(
                    "collapse",
                    "Liner Collapse Zone",
                    "collapse",
                    "T > 280°C at low speeds",
                    "Excessive thermal input causes the PA6 liner to soften beyond its structural capacity, leading to deformation and potential failure.",
                ),
                zone(
                    "optimal",
                    "Optimal Process Window",
                    "optimal",
                    "T: 240-275°C, v: 0.8-2.0 m/min",
                    "Balanced heat input enables proper polymer chain interdiffusion while maintaining liner integrity for strong interfacial bonding.",
                ),
                zone(
                    "insufficient",
                    "Insufficient Bonding Zone",
                    "insufficient",
                    "T < 230°C or v > 2.0 m/min",
                    "Inadequate thermal energy prevents complete polymer melting and molecular diffusion, resulting in weak adhesion.",
                ),
                zone(
                    "point",
                    "Optimal Operating Point",
                    "optimal",
                    "~260°C @ 1.2 m/min",
                    "Center of the process window providing maximum margin from failure boundaries with excellent bond quality.",
                ),
            ],
        ),
        positioning: Positioning::Pointer {
            offset_x: 15.0,
            offset_y: -80.0,
            relative_to_container: true,
        },
        fields: vec![
            text("title", ".tooltip-title"),
            class_name("indicator", ".tooltip-indicator", "tooltip-indicator "),
            text("params", ".tooltip-params"),
            text("detail", ".tooltip-desc"),
        ],
        companions: None,
        visible_class: "visible".to_string(),
    }
}

/// Interfacial stress chart; hover points carry their own text
fn stress_chart_preset() -> DiagramConfig {
    DiagramConfig {
        name: "stress_chart".to_string(),
        container: Some("#stressChart".to_string()),
        tooltip: "#chartTooltip".to_string(),
        regions: "#stressChart .hover-point".to_string(),
        key_attribute: "data-info".to_string(),
        fixed_key: None,
        catalog: None,
        positioning: Positioning::Bounds {
            anchor: HorizontalAnchor::Left,
            offset_x: 20.0,
            offset_y: -30.0,
            clamp: false,
        },
        fields: vec![FieldBinding {
            field: "title".to_string(),
            selector: None,
            mode: FieldMode::Text,
        }],
        companions: None,
        visible_class: "visible".to_string(),
    }
}

fn copv_fields() -> Vec<FieldBinding> {
    vec![
        text("title", ".tooltip-title"),
        class_name("color", ".tooltip-dot", "tooltip-dot "),
        text("detail", ".tooltip-desc"),
    ]
}

fn layer(key: &str, title: &str, color: &str, desc: &str) -> RegionDescriptor {
    RegionDescriptor::new(key, title, desc).with_field("color", color)
}

/// Type IV pressure vessel cross-section
fn copv_layers_preset() -> DiagramConfig {
    DiagramConfig {
        name: "copv_layers".to_string(),
        container: None,
        tooltip: "#copvTooltip".to_string(),
        regions: ".copv-cross-section [data-layer]".to_string(),
        key_attribute: "data-layer".to_string(),
        fixed_key: None,
        catalog: catalog(
            "copv_layers",
            vec![
                layer(
                    "boss",
                    "Metallic Boss",
                    "boss",
                    "Aluminum or steel end fitting providing interface for valve and piping connections. Critical sealing surface for hydrogen containment.",
                ),
                layer(
                    "composite",
                    "CFRP Composite Overwrap",
                    "composite",
                    "Carbon fiber reinforced polymer providing structural strength. Carries majority of pressure load (hoop and axial stress).",
                ),
                layer(
                    "liner",
                    "Polymer Liner",
                    "liner",
                    "Gas barrier layer (HDPE, PA6, or PA11) preventing hydrogen permeation. Surface treatment enhances bonding to composite.",
                ),
                layer(
                    "storage",
                    "H₂ Storage Chamber",
                    "storage",
                    "High-pressure hydrogen storage at 350-700 bar. Type IV vessels achieve gravimetric efficiency of 5-6 wt% H₂.",
                ),
            ],
        ),
        positioning: floating(),
        fields: copv_fields(),
        companions: Some(Companions {
            label_prefix: "label-".to_string(),
            connector_prefix: "conn-".to_string(),
            label_selector: ".layer-label".to_string(),
            connector_selector: ".connector-line".to_string(),
        }),
        visible_class: "visible".to_string(),
    }
}

/// Liner / composite interface close-up
fn copv_interface_preset() -> DiagramConfig {
    DiagramConfig {
        name: "copv_interface".to_string(),
        container: None,
        tooltip: "#copvTooltip".to_string(),
        regions: "[data-interface]".to_string(),
        key_attribute: "data-interface".to_string(),
        fixed_key: None,
        catalog: catalog(
            "copv_interface",
            vec![
                layer(
                    "cfrp",
                    "CFRP Matrix",
                    "composite",
                    "Thermoset or thermoplastic resin system infiltrates laser-created surface features during consolidation.",
                ),
                layer(
                    "infiltration",
                    "Infiltration Zone",
                    "boss",
                    "Matrix material penetrates into microgrooves creating mechanical interlocking for enhanced interfacial strength.",
                ),
                layer(
                    "liner",
                    "PA11 Liner Surface",
                    "liner",
                    "Nanosecond laser treatment creates periodic groove structures (10-30 μm depth, 50-100 μm spacing).",
                ),
            ],
        ),
        positioning: floating(),
        fields: copv_fields(),
        companions: None,
        visible_class: "visible".to_string(),
    }
}

/// Laser-machined grooves share a single description
fn copv_grooves_preset() -> DiagramConfig {
    DiagramConfig {
        name: "copv_grooves".to_string(),
        container: None,
        tooltip: "#copvTooltip".to_string(),
        regions: ".groove".to_string(),
        key_attribute: "data-groove".to_string(),
        fixed_key: Some("groove".to_string()),
        catalog: catalog(
            "copv_grooves",
            vec![layer(
                "groove",
                "Laser-Machined Groove",
                "boss",
                "Controlled surface texture providing mechanical interlocking. Resin infiltration creates positive engagement between liner and composite.",
            )],
        ),
        positioning: floating(),
        fields: copv_fields(),
        companions: None,
        visible_class: "visible".to_string(),
    }
}

/// Steel / composite hybrid panel
fn hybrid_layers_preset() -> DiagramConfig {
    DiagramConfig {
        name: "hybrid_layers".to_string(),
        container: None,
        tooltip: "#hybridTooltip".to_string(),
        regions: "#panel3d [data-layer]".to_string(),
        key_attribute: "data-layer".to_string(),
        fixed_key: None,
        catalog: catalog(
            "hybrid_layers",
            vec![
                RegionDescriptor::new(
                    "steel",
                    "Steel Outer Panel",
                    "Provides Class A surface finish, corrosion protection, and maintains vehicle aesthetics. Acts as the external structural member.",
                ),
                RegionDescriptor::new(
                    "adhesive",
                    "Expanding Adhesive",
                    "Heat-activated adhesive that expands during e-coat oven cure (180°C). Fills manufacturing gaps and creates strong bond between steel and composite.",
                ),
                RegionDescriptor::new(
                    "organosheet",
                    "GF/PA6 Organosheet",
                    "Continuous glass fiber reinforced PA6 sheet, compression molded to shape. Provides base stiffness and serves as substrate for over-molding.",
                ),
                RegionDescriptor::new(
                    "ribs",
                    "Over-molded Ribs (30% GF/PA6/6)",
                    "Injection molded short fiber reinforced ribs providing local stiffness, load distribution, and attachment features. Molecularly bonded to organosheet.",
                ),
            ],
        ),
        positioning: floating(),
        fields: vec![text("title", ".tooltip-title"), text("detail", ".tooltip-desc")],
        companions: None,
        visible_class: "visible".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_populated() {
        for diagram in article_diagrams() {
            if let Some(catalog) = &diagram.catalog {
                assert!(!catalog.is_empty(), "{} has an empty catalog", diagram.name);
            }
        }
    }

    #[test]
    fn test_fixed_key_resolves_in_catalog() {
        let grooves = copv_grooves_preset();
        let key = grooves.fixed_key.as_deref().unwrap();
        assert!(grooves.catalog.unwrap().contains(key));
    }

    #[test]
    fn test_interface_and_layers_keep_separate_liner_entries() {
        let layers = copv_layers_preset().catalog.unwrap();
        let interface = copv_interface_preset().catalog.unwrap();
        assert_eq!(layers.get("liner").unwrap().title, "Polymer Liner");
        assert_eq!(interface.get("liner").unwrap().title, "PA11 Liner Surface");
    }
}
