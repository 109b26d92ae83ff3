//! Built-in presets for the article page

pub mod diagram_presets;
pub mod page_presets;

pub use diagram_presets::article_diagrams;
pub use page_presets::{article_hover_styles, article_reveal_groups};

use crate::{ConfigError, DiagramConfig, PageFxConfig, Result};

/// Preset manager for the built-in diagram configurations
pub struct PresetManager {
    diagrams: Vec<DiagramConfig>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self {
            diagrams: article_diagrams(),
        }
    }
}

impl PresetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_presets_by_name(&self) -> Vec<&str> {
        self.diagrams.iter().map(|d| d.name.as_str()).collect()
    }

    /// Get all diagram presets
    pub fn get_all_presets(&self) -> &[DiagramConfig] {
        &self.diagrams
    }

    pub fn find_preset(&self, name: &str) -> Option<&DiagramConfig> {
        self.diagrams.iter().find(|d| d.name == name)
    }

    /// Default page configuration restricted to the named diagrams
    pub fn config_with(&self, names: &[&str]) -> Result<PageFxConfig> {
        let diagrams = names
            .iter()
            .map(|name| {
                self.find_preset(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PageFxConfig {
            diagrams,
            ..PageFxConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        let manager = PresetManager::new();
        let names = manager.list_presets_by_name();
        assert!(names.contains(&"compaction"));
        assert!(names.contains(&"hybrid_layers"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_config_with_subset() {
        let manager = PresetManager::new();
        let config = manager.config_with(&["compaction", "stress_chart"]).unwrap();
        assert_eq!(config.diagrams.len(), 2);
        assert!(matches!(
            manager.config_with(&["nope"]),
            Err(ConfigError::UnknownPreset(name)) if name == "nope"
        ));
    }
}
