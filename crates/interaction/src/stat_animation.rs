//! Count-up animation for statistic numbers

use page_fx_config::StatsConfig;

/// Deceleration curve `1 - (1 - p)^4`, `p` clamped into `[0, 1]`
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Which literals are animated and for how long
#[derive(Debug, Clone, PartialEq)]
pub struct StatRules {
    pub duration_ms: f64,
    pub range_separator: String,
    pub suffixes: Vec<String>,
}

impl From<&StatsConfig> for StatRules {
    fn from(config: &StatsConfig) -> Self {
        Self {
            duration_ms: f64::from(config.duration_ms),
            range_separator: config.range_separator.clone(),
            suffixes: config.animated_suffixes.clone(),
        }
    }
}

impl Default for StatRules {
    fn default() -> Self {
        Self::from(&StatsConfig::default())
    }
}

/// One running count-up, from zero to the parsed value of `literal`
#[derive(Debug, Clone, PartialEq)]
pub struct StatAnimation {
    literal: String,
    target: f64,
    suffix: String,
    integer: bool,
    duration_ms: f64,
}

impl StatAnimation {
    /// Parse a displayed literal. Ranges and anything that is not a plain
    /// number with an allowed suffix yield `None` and stay untouched.
    pub fn parse(literal: &str, rules: &StatRules) -> Option<Self> {
        if !rules.range_separator.is_empty() && literal.contains(rules.range_separator.as_str()) {
            return None;
        }

        let trimmed = literal.trim();
        let (number, suffix) = rules
            .suffixes
            .iter()
            .find_map(|suffix| {
                trimmed
                    .strip_suffix(suffix.as_str())
                    .map(|rest| (rest.trim_end(), suffix.as_str()))
            })
            .unwrap_or((trimmed, ""));

        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        let target: f64 = number.parse().ok()?;

        Some(Self {
            literal: literal.to_string(),
            target,
            suffix: suffix.to_string(),
            integer: target.fract() == 0.0,
            duration_ms: rules.duration_ms.max(1.0),
        })
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Text to display `elapsed_ms` after the start, and whether this is the
    /// final frame. The final frame always restores the original literal.
    pub fn text_at(&self, elapsed_ms: f64) -> (String, bool) {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return (self.literal.clone(), true);
        }

        let value = self.target * ease_out_quart(progress);
        let number = if self.integer {
            format!("{}", value.round())
        } else {
            format!("{value:.1}")
        };
        (format!("{number}{}", self.suffix), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(animation: &StatAnimation) -> Vec<String> {
        let mut texts = Vec::new();
        let mut t = 0.0;
        loop {
            let (text, done) = animation.text_at(t);
            texts.push(text);
            if done {
                return texts;
            }
            t += 16.7;
        }
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.9);
    }

    #[test]
    fn test_multiplier_counts_up_in_integers() {
        let animation = StatAnimation::parse("42×", &StatRules::default()).unwrap();
        let texts = frames(&animation);

        assert_eq!(texts.last().map(String::as_str), Some("42×"));
        let values: Vec<u32> = texts
            .iter()
            .map(|t| t.trim_end_matches('×').parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values[0], 0);
    }

    #[test]
    fn test_ranges_are_never_animated() {
        assert!(StatAnimation::parse("10-20", &StatRules::default()).is_none());
        assert!(StatAnimation::parse("-5", &StatRules::default()).is_none());
    }

    #[test]
    fn test_decimal_ends_at_literal() {
        let animation = StatAnimation::parse("3.5", &StatRules::default()).unwrap();
        assert_eq!(animation.text_at(0.0), ("0.0".to_string(), false));
        assert_eq!(animation.text_at(750.0).0.len(), 3);
        assert_eq!(animation.text_at(1500.0), ("3.5".to_string(), true));
        assert_eq!(animation.text_at(9000.0), ("3.5".to_string(), true));
    }

    #[test]
    fn test_other_suffixes_pass_through() {
        let rules = StatRules::default();
        for literal in ["70%", "12 MPa", "approx. 40", "", "×"] {
            assert!(StatAnimation::parse(literal, &rules).is_none(), "{literal}");
        }
    }

    #[test]
    fn test_configured_suffixes() {
        let rules = StatRules {
            suffixes: vec!["×".to_string(), "%".to_string()],
            ..StatRules::default()
        };
        let animation = StatAnimation::parse("70%", &rules).unwrap();
        assert_eq!(animation.target(), 70.0);
        assert_eq!(animation.text_at(0.0).0, "0%");
    }
}
