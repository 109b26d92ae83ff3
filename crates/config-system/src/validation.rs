//! Configuration validation utilities

use std::collections::HashSet;

use crate::{ConfigError, DiagramConfig, PageFxConfig, Positioning, Result};

/// Configuration validator with range and consistency checks
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &PageFxConfig) -> Result<()> {
        Self::validate_logging(&config.logging.level)?;
        Self::validate_navigation(config)?;
        Self::validate_reveal(config)?;
        Self::validate_stats(config)?;
        Self::validate_readout(config)?;

        for hover in &config.hover {
            Self::require_selector("hover.selector", &hover.selector)?;
            if hover.styles.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Hover style for '{}' sets no properties",
                    hover.selector
                )));
            }
        }

        let mut names = HashSet::new();
        for diagram in &config.diagrams {
            if !names.insert(diagram.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate diagram name: {}",
                    diagram.name
                )));
            }
            Self::validate_diagram(diagram)?;
        }

        Ok(())
    }

    fn validate_logging(level: &str) -> Result<()> {
        match level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "Invalid log level: {}. Must be one of error, warn, info, debug, trace",
                other
            ))),
        }
    }

    fn validate_navigation(config: &PageFxConfig) -> Result<()> {
        let nav = &config.navigation;
        Self::require_selector("navigation.sections", &nav.sections)?;
        Self::require_selector("navigation.links", &nav.links)?;

        if nav.lookahead < 0.0 || nav.scroll_offset < 0.0 {
            return Err(ConfigError::Validation(
                "Navigation lookahead and scroll offset must not be negative".to_string(),
            ));
        }

        if config.drawer.breakpoint <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid drawer breakpoint: {}. Must be positive",
                config.drawer.breakpoint
            )));
        }

        if config.progress.back_to_top_after < 0.0 {
            return Err(ConfigError::Validation(
                "Return-to-top distance must not be negative".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_reveal(config: &PageFxConfig) -> Result<()> {
        for group in &config.reveal {
            Self::require_selector("reveal.selector", &group.selector)?;
            Self::validate_threshold(&group.name, group.threshold)?;
        }
        Ok(())
    }

    fn validate_stats(config: &PageFxConfig) -> Result<()> {
        let stats = &config.stats;
        Self::validate_threshold("stats", stats.threshold)?;

        if stats.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "Stat animation duration must be positive".to_string(),
            ));
        }

        if stats.animated_suffixes.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Validation(
                "Animated suffixes must not be empty strings".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_readout(config: &PageFxConfig) -> Result<()> {
        if let Some(readout) = &config.readout {
            Self::require_selector("readout.chart", &readout.chart)?;
            if readout.x_max <= 0.0 || readout.y_span <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "Invalid readout scale: x_max {} and y_span {} must be positive",
                    readout.x_max, readout.y_span
                )));
            }
        }
        Ok(())
    }

    fn validate_diagram(diagram: &DiagramConfig) -> Result<()> {
        Self::require_selector("diagram.tooltip", &diagram.tooltip)?;
        Self::require_selector("diagram.regions", &diagram.regions)?;

        if diagram.key_attribute.is_empty() && diagram.fixed_key.is_none() {
            return Err(ConfigError::Validation(format!(
                "Diagram {} needs a key attribute or a fixed key",
                diagram.name
            )));
        }

        if let (Some(key), Some(catalog)) = (&diagram.fixed_key, &diagram.catalog) {
            if !catalog.contains(key) {
                return Err(ConfigError::Validation(format!(
                    "Diagram {} uses fixed key '{}' missing from its catalog",
                    diagram.name, key
                )));
            }
        }

        if let Positioning::Pointer {
            relative_to_container: true,
            ..
        } = diagram.positioning
        {
            if diagram.container.is_none() {
                return Err(ConfigError::Validation(format!(
                    "Diagram {} positions against a container but names none",
                    diagram.name
                )));
            }
        }

        if matches!(diagram.positioning, Positioning::Bounds { .. }) && diagram.container.is_none() {
            return Err(ConfigError::Validation(format!(
                "Diagram {} anchors to region bounds but names no container",
                diagram.name
            )));
        }

        Ok(())
    }

    fn validate_threshold(name: &str, threshold: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Validation(format!(
                "Invalid threshold for {}: {}. Must be between 0.0 and 1.0",
                name, threshold
            )));
        }
        Ok(())
    }

    fn require_selector(field: &str, selector: &str) -> Result<()> {
        if selector.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} must not be empty", field)));
        }
        Ok(())
    }
}
