//! Driving-style rules
//!
//! Style is decided in two steps. [`detect_trigger`] looks at the current
//! sample (and, for the short-window test, the rolling buffers) and reports
//! whether anything aggressive is happening right now. [`next_style`] then
//! combines that with the previous style and the hysteresis policy.
//!
//! `next_style` is a pure function of its arguments, so the same input
//! sequence always yields the same label sequence whether it is driven by a
//! batch loop or a live poll loop.
//!
//! ## Triggers (all require the vehicle to be moving)
//!
//! | Trigger            | Condition                                                 |
//! |--------------------|-----------------------------------------------------------|
//! | Hard braking       | `accel_g < harsh_braking_g`                               |
//! | High load          | `rpm > aggressive_rpm && throttle > aggressive_throttle`  |
//! | Rate spike         | `accel_g > positive_accel_g && (rpm_roc > .. \|\| throttle_roc > ..)` |
//! | Short-window spike | optional; rise over the newest `k` buffered samples       |

use core::fmt;

use super::config::{ClassifierConfig, Hysteresis, ShortWindowSpike, StyleThresholds};
use crate::sample::DerivedSample;
use crate::window::RollingWindowStore;

/// Driving-style label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrivingStyle {
    /// Idle, coasting or light driving
    Passive,
    /// Noticeable but ordinary load
    Moderate,
    /// Hard braking, high load or sudden inputs
    Aggressive,
    /// Not enough history yet
    #[default]
    Unknown,
}

impl DrivingStyle {
    /// All labels, in report order
    pub const ALL: [DrivingStyle; 4] = [
        DrivingStyle::Passive,
        DrivingStyle::Moderate,
        DrivingStyle::Aggressive,
        DrivingStyle::Unknown,
    ];

    /// Label as written to analyzer output
    pub fn as_str(&self) -> &'static str {
        match self {
            DrivingStyle::Passive => "Passive",
            DrivingStyle::Moderate => "Moderate",
            DrivingStyle::Aggressive => "Aggressive",
            DrivingStyle::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DrivingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What made a sample aggressive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggressiveTrigger {
    /// Deceleration past the harsh-braking threshold
    HardBraking,
    /// High RPM and high throttle together
    HighLoad,
    /// RPM or throttle rising fast while accelerating
    RateSpike,
    /// Sharp rise across the newest few samples
    ShortWindowSpike,
}

/// Result of one style transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTransition {
    /// Style for the current sample
    pub style: DrivingStyle,
    /// Cooldown samples still to run after this one
    pub cooldown_remaining: u32,
}

/// Check the aggressive triggers in order of severity
///
/// `window` must already contain the current sample.
pub fn detect_trigger(
    sample: &DerivedSample,
    window: &RollingWindowStore,
    config: &ClassifierConfig,
) -> Option<AggressiveTrigger> {
    let t = &config.style;
    if !sample.is_moving(t.min_moving_speed_kph) {
        return None;
    }

    if sample.accel_g < t.harsh_braking_g {
        return Some(AggressiveTrigger::HardBraking);
    }
    if sample.rpm > t.aggressive_rpm && sample.throttle_pct > t.aggressive_throttle_pct {
        return Some(AggressiveTrigger::HighLoad);
    }
    if sample.accel_g > t.positive_accel_g
        && (sample.rpm_roc > t.rpm_roc || sample.throttle_roc > t.throttle_roc)
    {
        return Some(AggressiveTrigger::RateSpike);
    }

    match &config.short_window {
        Some(spike) if short_window_spike(sample, window, spike) => {
            Some(AggressiveTrigger::ShortWindowSpike)
        }
        _ => None,
    }
}

fn short_window_spike(
    sample: &DerivedSample,
    window: &RollingWindowStore,
    spike: &ShortWindowSpike,
) -> bool {
    if sample.rpm <= spike.min_rpm {
        return false;
    }

    let exceeds = |delta: Option<f64>, limit: f64| delta.map_or(false, |d| d > limit);
    exceeds(window.rpm().short_window_delta(spike.window), spike.rpm_delta)
        || exceeds(
            window.throttle().short_window_delta(spike.window),
            spike.throttle_delta,
        )
        || exceeds(window.speed().short_window_delta(spike.window), spike.speed_delta)
}

/// Style from load alone, ignoring triggers and history
pub fn baseline_style(sample: &DerivedSample, thresholds: &StyleThresholds) -> DrivingStyle {
    let moving = sample.is_moving(thresholds.min_moving_speed_kph);
    if moving
        && (sample.rpm > thresholds.moderate_rpm
            || sample.throttle_pct > thresholds.moderate_throttle_pct)
    {
        DrivingStyle::Moderate
    } else {
        DrivingStyle::Passive
    }
}

/// Advance the style state machine by one sample
///
/// Under [`Hysteresis::RpmHold`] an aggressive driver stays aggressive while
/// triggers keep firing or RPM stays above the hold level; otherwise the
/// baseline rule applies, which may drop straight to `Passive`.
///
/// Under [`Hysteresis::Cooldown`] a trigger labels its own sample and the
/// next `samples - 1` aggressive regardless of input. Triggers inside that
/// span do not restart it.
pub fn next_style(
    previous: DrivingStyle,
    cooldown_remaining: u32,
    trigger: Option<AggressiveTrigger>,
    sample: &DerivedSample,
    config: &ClassifierConfig,
) -> StyleTransition {
    match config.hysteresis {
        Hysteresis::RpmHold { hold_rpm } => {
            let held = previous == DrivingStyle::Aggressive
                && sample.is_moving(config.style.min_moving_speed_kph)
                && sample.rpm > hold_rpm;

            let style = if trigger.is_some() || held {
                DrivingStyle::Aggressive
            } else {
                baseline_style(sample, &config.style)
            };
            StyleTransition {
                style,
                cooldown_remaining: 0,
            }
        }
        Hysteresis::Cooldown { samples } => {
            if cooldown_remaining > 0 {
                StyleTransition {
                    style: DrivingStyle::Aggressive,
                    cooldown_remaining: cooldown_remaining - 1,
                }
            } else if trigger.is_some() {
                StyleTransition {
                    style: DrivingStyle::Aggressive,
                    cooldown_remaining: samples.saturating_sub(1),
                }
            } else {
                StyleTransition {
                    style: baseline_style(sample, &config.style),
                    cooldown_remaining: 0,
                }
            }
        }
    }
}
