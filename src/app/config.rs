//! Configuration Management

use crate::glyph::recognizer::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Stroke evaluation settings
    pub evaluator: EvaluatorConfig,
    /// Shape matching settings
    pub matching: MatchingConfig,
}

/// Stroke evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// RDP simplification epsilon (raw pixels)
    pub rdp_epsilon_px: f64,
}

/// Shape matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Glyph recognition difficulty preset
    pub difficulty: Difficulty,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            rdp_epsilon_px: crate::capture::stroke::DEFAULT_RDP_EPSILON,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Standard,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.evaluator.rdp_epsilon_px <= 0.0 || self.evaluator.rdp_epsilon_px > 100.0 {
            return Err(crate::Error::Config(format!(
                "rdp_epsilon_px must be in (0, 100], got {}",
                self.evaluator.rdp_epsilon_px
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".sigil_tracer").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
