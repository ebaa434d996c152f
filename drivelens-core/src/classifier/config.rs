//! Classifier configuration
//!
//! Every threshold the classifier compares against lives here, grouped by the
//! rule that reads it. Defaults come from [`crate::constants`], so the
//! constant docs are the reference for units and provenance.
//!
//! Two presets exist:
//!
//! | Preset                        | Hysteresis          | Short-window spikes |
//! |-------------------------------|---------------------|---------------------|
//! | [`ClassifierConfig::default`] | RPM hold at 2300    | off                 |
//! | [`ClassifierConfig::live`]    | 15-sample cooldown  | on (3 samples)      |
//!
//! With the `serde` feature every struct deserializes with `#[serde(default)]`,
//! so a config file only needs the fields it changes:
//!
//! ```json
//! { "min_samples": 5, "road": { "highway_speed_kph": 95.0 } }
//! ```

use crate::constants::thresholds::*;
use crate::constants::windows::*;
use crate::errors::{ClassifierError, ClassifierResult};

/// Thresholds for the driving-style rules
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleThresholds {
    /// Speed (km/h) above which the vehicle is moving
    pub min_moving_speed_kph: f64,
    /// RPM entry threshold for sustained high load
    pub aggressive_rpm: f64,
    /// Throttle (%) entry threshold for sustained high load
    pub aggressive_throttle_pct: f64,
    /// Acceleration (g) below which braking is harsh
    pub harsh_braking_g: f64,
    /// RPM rate of change (per second) counted as a spike
    pub rpm_roc: f64,
    /// Throttle rate of change (%/s) counted as a spike
    pub throttle_roc: f64,
    /// Forward acceleration (g) required for a rate spike to count
    pub positive_accel_g: f64,
    /// RPM above which moving counts as moderate
    pub moderate_rpm: f64,
    /// Throttle (%) above which moving counts as moderate
    pub moderate_throttle_pct: f64,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            min_moving_speed_kph: MIN_MOVING_SPEED_KPH,
            aggressive_rpm: AGGRESSIVE_RPM_ENTRY,
            aggressive_throttle_pct: AGGRESSIVE_THROTTLE_ENTRY,
            harsh_braking_g: HARSH_BRAKING_G,
            rpm_roc: AGGRESSIVE_RPM_ROC,
            throttle_roc: AGGRESSIVE_THROTTLE_ROC,
            positive_accel_g: POSITIVE_ACCEL_FOR_ROC_G,
            moderate_rpm: MODERATE_RPM,
            moderate_throttle_pct: MODERATE_THROTTLE,
        }
    }
}

/// How an aggressive label is kept alive after its trigger
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "policy", rename_all = "snake_case"))]
pub enum Hysteresis {
    /// Stay aggressive while a trigger fires or RPM stays above `hold_rpm`
    /// with the vehicle moving
    RpmHold {
        /// RPM that sustains an aggressive label
        hold_rpm: f64,
    },
    /// A trigger labels itself and the following `samples - 1` samples
    /// aggressive; triggers inside the cooldown do not extend it
    Cooldown {
        /// Cooldown length including the trigger sample
        samples: u32,
    },
}

impl Default for Hysteresis {
    fn default() -> Self {
        Hysteresis::RpmHold {
            hold_rpm: AGGRESSIVE_RPM_HOLD,
        }
    }
}

/// Spike test over the newest few buffered samples
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShortWindowSpike {
    /// Samples spanned by the delta, newest included
    pub window: usize,
    /// RPM rise that counts as a spike
    pub rpm_delta: f64,
    /// Throttle rise (%) that counts as a spike
    pub throttle_delta: f64,
    /// Speed rise (km/h) that counts as a spike
    pub speed_delta: f64,
    /// Current RPM must exceed this for the test to apply
    pub min_rpm: f64,
}

impl Default for ShortWindowSpike {
    fn default() -> Self {
        Self {
            window: SHORT_ROC_WINDOW_SIZE,
            rpm_delta: SHORT_WINDOW_RPM_DELTA,
            throttle_delta: SHORT_WINDOW_THROTTLE_DELTA,
            speed_delta: SHORT_WINDOW_SPEED_DELTA,
            min_rpm: SHORT_WINDOW_MIN_RPM,
        }
    }
}

/// Thresholds for road-type rules
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoadThresholds {
    /// Speed (km/h) counted toward sustained highway driving
    pub highway_speed_kph: f64,
    /// Share of the dwell span that must exceed `highway_speed_kph`
    pub highway_min_ratio: f64,
    /// Most recent samples inspected by the highway test
    pub highway_dwell_samples: usize,
    /// Moving average (km/h) below which the road is local
    pub local_max_avg_kph: f64,
    /// Speeds at or below this are left out of the moving average
    pub moving_floor_kph: f64,
}

impl Default for RoadThresholds {
    fn default() -> Self {
        Self {
            highway_speed_kph: HIGHWAY_SPEED_KPH,
            highway_min_ratio: HIGHWAY_MIN_RATIO,
            highway_dwell_samples: HIGHWAY_DWELL_SAMPLES,
            local_max_avg_kph: LOCAL_MAX_AVG_SPEED_KPH,
            moving_floor_kph: MOVING_AVERAGE_FLOOR_KPH,
        }
    }
}

/// Thresholds for traffic-condition rules
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrafficThresholds {
    /// Speed (km/h) below which a sample counts as stopped
    pub stopped_speed_kph: f64,
    /// Stop ratio at or above which traffic may be heavy
    pub heavy_stop_ratio: f64,
    /// Average speed (km/h) below which traffic may be heavy
    pub heavy_max_avg_kph: f64,
    /// Average speed (km/h) below which traffic is at least moderate
    pub moderate_max_avg_kph: f64,
    /// Stop ratio above which traffic is at least moderate
    pub moderate_stop_ratio: f64,
}

impl Default for TrafficThresholds {
    fn default() -> Self {
        Self {
            stopped_speed_kph: STOPPED_SPEED_KPH,
            heavy_stop_ratio: HEAVY_TRAFFIC_STOP_RATIO,
            heavy_max_avg_kph: HEAVY_TRAFFIC_MAX_AVG_KPH,
            moderate_max_avg_kph: MODERATE_TRAFFIC_MAX_AVG_KPH,
            moderate_stop_ratio: MODERATE_TRAFFIC_STOP_RATIO,
        }
    }
}

/// Complete classifier configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Rolling window capacity (samples)
    pub window_size: usize,
    /// Samples observed, current included, before labels leave `Unknown`
    pub min_samples: usize,
    /// Driving-style thresholds
    pub style: StyleThresholds,
    /// Aggressive hysteresis policy
    pub hysteresis: Hysteresis,
    /// Optional short-window spike trigger
    pub short_window: Option<ShortWindowSpike>,
    /// Road-type thresholds
    pub road: RoadThresholds,
    /// Traffic thresholds
    pub traffic: TrafficThresholds,
}

impl Default for ClassifierConfig {
    /// Batch analyzer preset
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_samples: MIN_SAMPLES_FOR_CLASSIFICATION,
            style: StyleThresholds::default(),
            hysteresis: Hysteresis::default(),
            short_window: None,
            road: RoadThresholds::default(),
            traffic: TrafficThresholds::default(),
        }
    }
}

impl ClassifierConfig {
    /// Continuous in-car logger preset
    pub fn live() -> Self {
        Self {
            hysteresis: Hysteresis::Cooldown {
                samples: AGGRESSIVE_COOLDOWN_SAMPLES,
            },
            short_window: Some(ShortWindowSpike::default()),
            ..Self::default()
        }
    }

    /// Set the rolling window capacity
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the warm-up length
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Replace the style thresholds
    pub fn with_style(mut self, style: StyleThresholds) -> Self {
        self.style = style;
        self
    }

    /// Replace the hysteresis policy
    pub fn with_hysteresis(mut self, hysteresis: Hysteresis) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Enable or disable the short-window spike trigger
    pub fn with_short_window(mut self, short_window: Option<ShortWindowSpike>) -> Self {
        self.short_window = short_window;
        self
    }

    /// Replace the road thresholds
    pub fn with_road(mut self, road: RoadThresholds) -> Self {
        self.road = road;
        self
    }

    /// Replace the traffic thresholds
    pub fn with_traffic(mut self, traffic: TrafficThresholds) -> Self {
        self.traffic = traffic;
        self
    }

    /// Check internal consistency
    ///
    /// Thresholds themselves may take any finite value; only sizes, ratios
    /// and counts have hard limits.
    pub fn validate(&self) -> ClassifierResult<()> {
        if self.window_size == 0 || self.window_size > MAX_WINDOW_SIZE {
            return invalid("window_size must be between 1 and MAX_WINDOW_SIZE");
        }
        if self.min_samples == 0 {
            return invalid("min_samples must be at least 1");
        }

        let road = &self.road;
        if road.highway_dwell_samples == 0 || road.highway_dwell_samples > self.window_size {
            return invalid("highway_dwell_samples must be between 1 and window_size");
        }
        if !is_ratio(road.highway_min_ratio) {
            return invalid("highway_min_ratio must be within [0, 1]");
        }

        let traffic = &self.traffic;
        if !is_ratio(traffic.heavy_stop_ratio) || !is_ratio(traffic.moderate_stop_ratio) {
            return invalid("traffic stop ratios must be within [0, 1]");
        }

        match self.hysteresis {
            Hysteresis::Cooldown { samples } if samples == 0 => {
                return invalid("cooldown must span at least 1 sample");
            }
            Hysteresis::RpmHold { hold_rpm } if !hold_rpm.is_finite() => {
                return invalid("hold_rpm must be finite");
            }
            _ => {}
        }

        if let Some(spike) = &self.short_window {
            if spike.window < 2 || spike.window > self.window_size {
                return invalid("short window must be between 2 and window_size");
            }
        }

        let s = &self.style;
        let all_finite = [
            s.min_moving_speed_kph,
            s.aggressive_rpm,
            s.aggressive_throttle_pct,
            s.harsh_braking_g,
            s.rpm_roc,
            s.throttle_roc,
            s.positive_accel_g,
            s.moderate_rpm,
            s.moderate_throttle_pct,
            road.highway_speed_kph,
            road.local_max_avg_kph,
            road.moving_floor_kph,
            traffic.stopped_speed_kph,
            traffic.heavy_max_avg_kph,
            traffic.moderate_max_avg_kph,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return invalid("thresholds must be finite");
        }

        Ok(())
    }
}

fn invalid(reason: &'static str) -> ClassifierResult<()> {
    Err(ClassifierError::InvalidConfig { reason })
}

fn is_ratio(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(ClassifierConfig::default().validate().is_ok());
        assert!(ClassifierConfig::live().validate().is_ok());
    }

    #[test]
    fn live_preset_differs_only_in_hysteresis_and_spikes() {
        let live = ClassifierConfig::live();
        let batch = ClassifierConfig::default();

        assert_eq!(live.hysteresis, Hysteresis::Cooldown { samples: 15 });
        assert!(live.short_window.is_some());
        assert_eq!(live.style, batch.style);
        assert_eq!(live.road, batch.road);
        assert_eq!(live.window_size, batch.window_size);
    }

    #[test]
    fn rejects_window_sizes() {
        let zero = ClassifierConfig::default().with_window_size(0);
        assert!(matches!(
            zero.validate(),
            Err(ClassifierError::InvalidConfig { .. })
        ));

        let huge = ClassifierConfig::default().with_window_size(MAX_WINDOW_SIZE + 1);
        assert!(huge.validate().is_err());
    }

    #[test]
    fn dwell_must_fit_window() {
        let config = ClassifierConfig::default().with_window_size(5);
        assert!(config.validate().is_err());

        let road = RoadThresholds {
            highway_dwell_samples: 5,
            ..RoadThresholds::default()
        };
        assert!(config.with_road(road).validate().is_ok());
    }

    #[test]
    fn rejects_bad_ratios_and_cooldown() {
        let traffic = TrafficThresholds {
            heavy_stop_ratio: 1.5,
            ..TrafficThresholds::default()
        };
        assert!(ClassifierConfig::default()
            .with_traffic(traffic)
            .validate()
            .is_err());

        let cooldown = ClassifierConfig::default().with_hysteresis(Hysteresis::Cooldown { samples: 0 });
        assert!(cooldown.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_threshold() {
        let style = StyleThresholds {
            moderate_rpm: f64::NAN,
            ..StyleThresholds::default()
        };
        assert!(ClassifierConfig::default()
            .with_style(style)
            .validate()
            .is_err());
    }

    #[test]
    fn min_samples_zero_rejected() {
        assert!(ClassifierConfig::default()
            .with_min_samples(0)
            .validate()
            .is_err());
    }
}
