//! User settings for the Betriebskosten CLI
//!
//! Manages the base/heat cost split, display preferences and audit logging.

use serde::{Deserialize, Serialize};

use super::paths::BkvPaths;
use crate::error::BkvError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Share of the total amount allocated by floor area, in percent.
    /// The remainder is allocated by meter readings.
    #[serde(default = "default_base_share_percent")]
    pub base_share_percent: f64,

    /// Currency symbol used in printed summaries
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_share_percent() -> f64 {
    30.0
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_share_percent: default_base_share_percent(),
            currency_symbol: default_currency(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Base share as a ratio in `0.0..=1.0`; out-of-range values are clamped
    /// and a non-finite setting falls back to the default 30%.
    pub fn base_ratio(&self) -> f64 {
        let percent = if self.base_share_percent.is_finite() {
            self.base_share_percent
        } else {
            default_base_share_percent()
        };
        percent.clamp(0.0, 100.0) / 100.0
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BkvPaths) -> Result<Self, BkvError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BkvError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| BkvError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BkvPaths) -> Result<(), BkvError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BkvError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BkvError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
