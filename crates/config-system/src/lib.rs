//! Configuration system for page-fx
//! Selectors, thresholds, timings and the diagram catalogs a page is mounted with

use std::collections::BTreeMap;

use page_fx_shared::{DescriptorCatalog, PageFxError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod parser;
pub mod presets;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser, ConfigSerializer};
pub use presets::PresetManager;
pub use validation::ConfigValidator;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for PageFxError {
    fn from(err: ConfigError) -> Self {
        PageFxError::InvalidConfig {
            message: err.to_string(),
            field: None,
        }
    }
}

/// Complete configuration of one mounted page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFxConfig {
    pub logging: LoggingConfig,
    pub navigation: NavigationConfig,
    pub progress: ProgressConfig,
    pub drawer: DrawerConfig,
    pub reveal: Vec<RevealGroupConfig>,
    pub stats: StatsConfig,
    pub lazy_images: LazyImageConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readout: Option<ReadoutConfig>,
    pub hover: Vec<HoverStyleConfig>,
    pub diagrams: Vec<DiagramConfig>,
}

impl Default for PageFxConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            navigation: NavigationConfig::default(),
            progress: ProgressConfig::default(),
            drawer: DrawerConfig::default(),
            reveal: presets::article_reveal_groups(),
            stats: StatsConfig::default(),
            lazy_images: LazyImageConfig::default(),
            readout: Some(ReadoutConfig::default()),
            hover: presets::article_hover_styles(),
            diagrams: presets::article_diagrams(),
        }
    }
}

impl PageFxConfig {
    /// Configuration with every optional feature and diagram removed
    pub fn minimal() -> Self {
        Self {
            reveal: Vec::new(),
            readout: None,
            hover: Vec::new(),
            diagrams: Vec::new(),
            ..Self::default()
        }
    }

    pub fn diagram(&self, name: &str) -> Option<&DiagramConfig> {
        self.diagrams.iter().find(|d| d.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Sidebar navigation and active-section highlighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub sections: String,
    pub links: String,
    pub active_class: String,
    /// Added to the scroll position so a section is picked slightly before
    /// it reaches the top of the viewport
    pub lookahead: f64,
    /// Space left above a section when scrolling to it from a link
    pub scroll_offset: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sections: "section[id]".to_string(),
            links: ".blog-sidebar-link".to_string(),
            active_class: "active".to_string(),
            lookahead: 120.0,
            scroll_offset: 40.0,
        }
    }
}

/// Reading progress bar and return-to-top control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub enabled: bool,
    pub bar_class: String,
    pub back_to_top_class: String,
    pub back_to_top_label: String,
    pub back_to_top_symbol: String,
    /// Scroll distance past which the return-to-top control shows
    pub back_to_top_after: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bar_class: "reading-progress".to_string(),
            back_to_top_class: "back-to-top".to_string(),
            back_to_top_label: "Back to top".to_string(),
            back_to_top_symbol: "↑".to_string(),
            back_to_top_after: 500.0,
        }
    }
}

/// Mobile navigation drawer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub sidebar: String,
    pub toggle: String,
    pub open_class: String,
    /// Viewports at most this wide use the drawer behavior
    pub breakpoint: f64,
    pub resize_debounce_ms: u32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            sidebar: ".blog-sidebar".to_string(),
            toggle: ".mobile-nav-toggle".to_string(),
            open_class: "active".to_string(),
            breakpoint: 768.0,
            resize_debounce_ms: 100,
        }
    }
}

/// A set of elements revealed once when they scroll into view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealGroupConfig {
    pub name: String,
    pub selector: String,
    /// Fraction of the element that must be visible, 0.0-1.0
    pub threshold: f64,
    /// Transform applied while hidden
    pub hidden_transform: String,
    /// Delay added per element index within the group
    #[serde(default)]
    pub stagger_ms: u32,
}

/// Animated statistic numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub cards: String,
    pub number: String,
    pub threshold: f64,
    pub duration_ms: u32,
    /// Literals containing this are ranges and never animated
    pub range_separator: String,
    /// Suffixes carried through the animation; anything else is left as-is
    pub animated_suffixes: Vec<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            cards: ".stat-card".to_string(),
            number: ".stat-number".to_string(),
            threshold: 0.5,
            duration_ms: 1500,
            range_separator: "-".to_string(),
            animated_suffixes: vec!["×".to_string()],
        }
    }
}

/// Images whose source is loaded on first approach to the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyImageConfig {
    pub selector: String,
    pub source_attribute: String,
    pub root_margin: String,
    pub loaded_class: String,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".to_string(),
            source_attribute: "data-src".to_string(),
            root_margin: "100px".to_string(),
            loaded_class: "loaded".to_string(),
        }
    }
}

/// Crosshair and coordinate display over a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutConfig {
    pub chart: String,
    pub crosshair_horizontal: String,
    pub crosshair_vertical: String,
    pub display: String,
    /// Value at the right edge of the chart (left edge is zero)
    pub x_max: f64,
    pub x_decimals: u32,
    /// Value at the top edge of the chart
    pub y_top: f64,
    /// Value range covered from top to bottom
    pub y_span: f64,
    pub y_decimals: u32,
    /// `{x}` and `{y}` are replaced with the formatted values
    pub template: String,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self {
            chart: "#processChart".to_string(),
            crosshair_horizontal: "#crosshairH".to_string(),
            crosshair_vertical: "#crosshairV".to_string(),
            display: "#coordDisplay".to_string(),
            x_max: 2.5,
            x_decimals: 2,
            y_top: 300.0,
            y_span: 100.0,
            y_decimals: 0,
            template: "T: {y}°C | v: {x} m/min".to_string(),
        }
    }
}

/// Inline styles applied while an element is hovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverStyleConfig {
    pub selector: String,
    /// Style another element instead of the hovered one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<HoverLink>,
    pub styles: BTreeMap<String, String>,
    /// Values restored on leave; properties missing here are cleared
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rest: BTreeMap<String, String>,
}

/// Resolves the element to style, optionally from an attribute of the
/// hovered element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Selector with `{}` replaced by the attribute value
    pub template: String,
}

impl HoverLink {
    pub fn selector_for(&self, value: &str) -> String {
        self.template.replace("{}", value)
    }
}

/// One hoverable diagram and its tooltip panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    pub name: String,
    /// Element the tooltip is positioned in; `None` positions against the viewport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    pub tooltip: String,
    pub regions: String,
    pub key_attribute: String,
    /// Key used for regions that carry no key attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_key: Option<String>,
    /// Region descriptors; when absent the key attribute's text is the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<DescriptorCatalog>,
    pub positioning: Positioning,
    #[serde(default)]
    pub fields: Vec<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companions: Option<Companions>,
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
}

fn default_visible_class() -> String {
    "visible".to_string()
}

/// How a tooltip anchor is derived from the hovered region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Positioning {
    /// Follow the pointer at a fixed offset
    Pointer {
        offset_x: f64,
        offset_y: f64,
        /// Measure from the container's corner instead of the viewport's
        #[serde(default)]
        relative_to_container: bool,
    },
    /// Anchor to the region's bounding box inside the container
    Bounds {
        anchor: HorizontalAnchor,
        #[serde(default)]
        offset_x: f64,
        #[serde(default)]
        offset_y: f64,
        /// Keep the panel inside the container's width
        #[serde(default)]
        clamp: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAnchor {
    Center,
    Left,
}

/// Maps a descriptor field onto a descendant of the tooltip panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub field: String,
    /// Selector inside the tooltip; `None` targets the tooltip itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default)]
    pub mode: FieldMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMode {
    #[default]
    Text,
    /// Replace the class attribute with `prefix` followed by the value
    ClassName { prefix: String },
}

/// Labels and connector lines revealed alongside the tooltip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companions {
    pub label_prefix: String,
    pub connector_prefix: String,
    pub label_selector: String,
    pub connector_selector: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_article() {
        let config = PageFxConfig::default();
        assert_eq!(config.navigation.lookahead, 120.0);
        assert_eq!(config.progress.back_to_top_after, 500.0);
        assert_eq!(config.stats.duration_ms, 1500);
        assert_eq!(config.drawer.breakpoint, 768.0);
        assert!(config.diagram("compaction").is_some());
    }

    #[test]
    fn test_minimal_drops_optional_features() {
        let config = PageFxConfig::minimal();
        assert!(config.diagrams.is_empty());
        assert!(config.readout.is_none());
        assert!(config.reveal.is_empty());
    }

    #[test]
    fn test_hover_link_template() {
        let link = HoverLink {
            attribute: Some("data-highlight".to_string()),
            template: ".{}-zone".to_string(),
        };
        assert_eq!(link.selector_for("optimal"), ".optimal-zone");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PageFxConfig =
            serde_json::from_str(r#"{"navigation": {"lookahead": 80}}"#).unwrap();
        assert_eq!(config.navigation.lookahead, 80.0);
        assert_eq!(config.navigation.links, ".blog-sidebar-link");
        assert_eq!(config.stats.threshold, 0.5);
    }
}
