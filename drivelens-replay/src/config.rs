//! Classifier configuration from presets and JSON files
//!
//! A config file is the JSON form of [`ClassifierConfig`]. Every field is
//! optional; anything left out keeps its default-preset value.
//!
//! ```json
//! {
//!   "window_size": 30,
//!   "hysteresis": { "policy": "cooldown", "samples": 10 },
//!   "road": { "highway_speed_kph": 95.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use drivelens_core::ClassifierConfig;

use crate::error::ReplayResult;

/// Built-in threshold sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// Offline analyzer tuning: RPM-hold hysteresis
    #[default]
    Default,
    /// In-car logger tuning: sample cooldown and short-window spikes
    Live,
}

impl Preset {
    /// Configuration for this preset
    pub fn config(self) -> ClassifierConfig {
        match self {
            Preset::Default => ClassifierConfig::default(),
            Preset::Live => ClassifierConfig::live(),
        }
    }
}

/// Parse and validate a JSON configuration
pub fn parse_config(json: &str) -> ReplayResult<ClassifierConfig> {
    let config: ClassifierConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a JSON configuration file
pub fn load_config(path: impl AsRef<Path>) -> ReplayResult<ClassifierConfig> {
    let path = path.as_ref();
    let config = parse_config(&fs::read_to_string(path)?)?;
    log::debug!("loaded classifier config from {}", path.display());
    Ok(config)
}
