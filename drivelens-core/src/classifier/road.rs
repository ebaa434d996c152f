//! Road-type rules
//!
//! Road type is read straight off the window statistics; there is no
//! hysteresis. Sustained high speed means highway. Otherwise the average over
//! samples where the car actually moved separates local streets from main
//! roads.

use core::fmt;

use super::config::RoadThresholds;
use crate::window::WindowStats;

/// Road-type label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadType {
    /// Residential and city streets
    Local,
    /// Arterial roads
    Main,
    /// Sustained high-speed driving
    Highway,
    /// Not enough history, or no movement in the window
    #[default]
    Unknown,
}

impl RoadType {
    /// All labels, in report order
    pub const ALL: [RoadType; 4] = [
        RoadType::Local,
        RoadType::Main,
        RoadType::Highway,
        RoadType::Unknown,
    ];

    /// Label as written to analyzer output
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadType::Local => "Local",
            RoadType::Main => "Main",
            RoadType::Highway => "Highway",
            RoadType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the road from window statistics
pub fn classify_road(stats: &WindowStats, thresholds: &RoadThresholds) -> RoadType {
    if stats.samples == 0 {
        return RoadType::Unknown;
    }

    if stats.highway_ratio > 0.0 && stats.highway_ratio >= thresholds.highway_min_ratio {
        return RoadType::Highway;
    }

    let avg = stats.moving_avg_speed_kph;
    if avg > 0.0 && avg < thresholds.local_max_avg_kph {
        RoadType::Local
    } else if avg >= thresholds.local_max_avg_kph {
        RoadType::Main
    } else {
        RoadType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(moving_avg: f64, highway_ratio: f64) -> WindowStats {
        WindowStats {
            samples: 10,
            moving_avg_speed_kph: moving_avg,
            highway_ratio,
            ..WindowStats::default()
        }
    }

    #[test]
    fn highway_needs_sustained_speed() {
        let t = RoadThresholds::default();
        assert_eq!(classify_road(&stats(100.0, 1.0), &t), RoadType::Highway);
        assert_eq!(classify_road(&stats(95.0, 0.7), &t), RoadType::Highway);
        // One fast burst is not a highway
        assert_eq!(classify_road(&stats(70.0, 0.2), &t), RoadType::Main);
    }

    #[test]
    fn local_and_main_split_on_moving_average() {
        let t = RoadThresholds::default();
        assert_eq!(classify_road(&stats(35.0, 0.0), &t), RoadType::Local);
        assert_eq!(classify_road(&stats(60.0, 0.0), &t), RoadType::Main);
    }

    #[test]
    fn unknown_without_movement() {
        let t = RoadThresholds::default();
        assert_eq!(classify_road(&stats(0.0, 0.0), &t), RoadType::Unknown);
        assert_eq!(classify_road(&WindowStats::default(), &t), RoadType::Unknown);
    }
}
