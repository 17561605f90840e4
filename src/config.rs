//! Runtime configuration
//!
//! Everything has a default taken from the crate constants, so an empty JSON
//! object (or no file at all) is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};
use crate::{
    ANIMATION_TIMEOUT_MS, CIRCLE_MAX_CLOSURE_DISTANCE, CIRCLE_MIN_BOUND_SIZE, CIRCLE_MIN_SAMPLES,
    DIRECTIONAL_THRESHOLD, EXIT_TRANSLATE_DISTANCE, PREFETCH_MARGIN,
};

/// Recognizer and animation tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Swipe distance on the dominant axis
    pub directional_threshold: f64,
    pub circle_min_samples: usize,
    pub circle_min_bound_size: f64,
    pub circle_max_closure_distance: f64,
    /// How far an exiting card is translated
    pub exit_translate_distance: f64,
    /// Safety timeout for a pending animation intent
    pub animation_timeout_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            directional_threshold: DIRECTIONAL_THRESHOLD,
            circle_min_samples: CIRCLE_MIN_SAMPLES,
            circle_min_bound_size: CIRCLE_MIN_BOUND_SIZE,
            circle_max_closure_distance: CIRCLE_MAX_CLOSURE_DISTANCE,
            exit_translate_distance: EXIT_TRANSLATE_DISTANCE,
            animation_timeout_ms: ANIMATION_TIMEOUT_MS,
        }
    }
}

impl GestureConfig {
    /// Reject values that would make every gesture (or none) match
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("directional_threshold", self.directional_threshold),
            ("circle_min_bound_size", self.circle_min_bound_size),
            ("circle_max_closure_distance", self.circle_max_closure_distance),
            ("exit_translate_distance", self.exit_translate_distance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value <= 0.0 {
                return Err(FeedError::Config {
                    message: format!("{} must be a positive distance, got {}", name, value),
                });
            }
        }
        if self.circle_min_samples == 0 {
            return Err(FeedError::Config {
                message: "circle_min_samples must be at least 1".to_string(),
            });
        }
        if self.animation_timeout_ms == 0 {
            return Err(FeedError::Config {
                message: "animation_timeout_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Feed sequencing options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Prefetch when fewer than this many posts remain
    pub prefetch_margin: usize,
    /// Topics passed to the post source
    pub interests: Vec<String>,
    /// Read posts from this JSON file instead of the built-in mock feed
    pub posts_file: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            prefetch_margin: PREFETCH_MARGIN,
            interests: ["Tech", "Design", "AI", "Startups"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            posts_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.gesture.validate()?;
        Ok(config)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GestureConfig::default();
        assert_eq!(config.directional_threshold, 100.0);
        assert_eq!(config.circle_min_samples, 20);
        assert_eq!(config.circle_min_bound_size, 50.0);
        assert_eq!(config.circle_max_closure_distance, 100.0);
        assert_eq!(config.exit_translate_distance, 500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"gesture": {"directional_threshold": 80}}"#).unwrap();
        assert_eq!(config.gesture.directional_threshold, 80.0);
        assert_eq!(config.gesture.circle_min_samples, CIRCLE_MIN_SAMPLES);
        assert_eq!(config.feed.prefetch_margin, PREFETCH_MARGIN);
        assert_eq!(config.feed.interests.len(), 4);
    }

    #[test]
    fn test_validate_rejects_non_positive_threshold() {
        let config = GestureConfig {
            directional_threshold: 0.0,
            ..GestureConfig::default()
        };
        assert!(matches!(config.validate(), Err(FeedError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_samples() {
        let config = GestureConfig {
            circle_min_samples: 0,
            ..GestureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = AppConfig::load("./definitely/not/here.json");
        assert!(matches!(result, Err(FeedError::Io(_))));
    }
}
