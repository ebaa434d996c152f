//! Traffic-condition rules
//!
//! Traffic is judged from how often the car was stopped in the window and how
//! fast it went overall. Stopped samples count toward the overall average.

use core::fmt;

use super::config::TrafficThresholds;
use crate::window::WindowStats;

/// Traffic-condition label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrafficCondition {
    /// Free flow
    Light,
    /// Slowdowns or occasional stops
    Moderate,
    /// Stop-and-go
    Heavy,
    /// Not enough history yet
    #[default]
    Unknown,
}

impl TrafficCondition {
    /// All labels, in report order
    pub const ALL: [TrafficCondition; 4] = [
        TrafficCondition::Light,
        TrafficCondition::Moderate,
        TrafficCondition::Heavy,
        TrafficCondition::Unknown,
    ];

    /// Label as written to analyzer output
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficCondition::Light => "Light",
            TrafficCondition::Moderate => "Moderate",
            TrafficCondition::Heavy => "Heavy",
            TrafficCondition::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TrafficCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify traffic from window statistics
pub fn classify_traffic(stats: &WindowStats, thresholds: &TrafficThresholds) -> TrafficCondition {
    if stats.samples == 0 {
        return TrafficCondition::Unknown;
    }

    if stats.stop_ratio >= thresholds.heavy_stop_ratio
        && stats.avg_speed_kph < thresholds.heavy_max_avg_kph
    {
        TrafficCondition::Heavy
    } else if stats.avg_speed_kph < thresholds.moderate_max_avg_kph
        || stats.stop_ratio > thresholds.moderate_stop_ratio
    {
        TrafficCondition::Moderate
    } else {
        TrafficCondition::Light
    }
}
