//! Integration tests for parsing, serializing and validating page configs

use page_fx_config::{
    ConfigFormat, ConfigParser, ConfigSerializer, ConfigValidator, FieldMode, PageFxConfig,
    Positioning, PresetManager,
};

#[test]
fn test_default_config_roundtrips_through_json_and_yaml() {
    let config = PageFxConfig::default();

    for format in [ConfigFormat::Json, ConfigFormat::Yaml] {
        let text = ConfigSerializer::serialize_string(&config, format).unwrap();
        let parsed = ConfigParser::parse_string(&text, format).unwrap();
        assert_eq!(parsed, config, "{format:?} round trip changed the config");
    }
}

#[test]
fn test_yaml_diagram_definition() {
    let yaml = r##"
diagrams:
  - name: figure
    container: "#figure"
    tooltip: "#figureTooltip"
    regions: "#figure [data-part]"
    key_attribute: data-part
    positioning:
      mode: bounds
      anchor: center
      offset_y: -110
      clamp: true
    fields:
      - field: title
        selector: .tooltip-title
      - field: tone
        selector: .tooltip-dot
        mode:
          kind: class_name
          prefix: "tooltip-dot "
    catalog:
      - key: gear
        title: Gear
        detail: Drives the shaft
        auxiliary:
          tone: warm
"##;
    let config = ConfigParser::parse_named("page.yaml", yaml).unwrap();
    ConfigValidator::validate(&config).unwrap();

    let diagram = config.diagram("figure").unwrap();
    assert!(matches!(
        diagram.positioning,
        Positioning::Bounds { clamp: true, offset_x, .. } if offset_x == 0.0
    ));
    assert_eq!(diagram.visible_class, "visible");
    assert_eq!(
        diagram.fields[1].mode,
        FieldMode::ClassName {
            prefix: "tooltip-dot ".to_string()
        }
    );
    let gear = diagram.catalog.as_ref().unwrap().get("gear").unwrap();
    assert_eq!(gear.field("tone"), Some("warm"));
}

#[test]
fn test_duplicate_catalog_keys_fail_to_parse() {
    let json = r##"{
        "diagrams": [{
            "name": "dup",
            "tooltip": "#t",
            "regions": "[data-k]",
            "key_attribute": "data-k",
            "positioning": {"mode": "pointer", "offset_x": 15, "offset_y": -60},
            "catalog": [
                {"key": "a", "title": "A"},
                {"key": "a", "title": "Again"}
            ]
        }]
    }"##;
    assert!(ConfigParser::parse_string(json, ConfigFormat::Json).is_err());
}

#[test]
fn test_presets_validate() {
    let manager = PresetManager::new();
    let names = manager.list_presets_by_name();
    let config = manager.config_with(&names).unwrap();
    ConfigValidator::validate(&config).unwrap();
}
