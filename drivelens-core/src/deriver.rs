//! Channel derivation: forward-fill, time deltas and rates of change
//!
//! ## Rules
//!
//! - Missing or non-finite `rpm`/`throttle_pct`/`speed_kph` take the last
//!   observed value; a channel never observed in the session is 0.
//! - Forward-fill happens before any difference is taken.
//! - `delta_time_s` is the gap to the previous sample; 0 for the first.
//! - Every rate is `Δvalue / delta_time_s`, and is 0 for the first sample,
//!   when `delta_time_s` is below [`MIN_DELTA_TIME_S`], or when the result is
//!   not finite.
//! - Timestamps must not decrease. A decreasing timestamp is rejected and the
//!   deriver is left exactly as it was before the call.
//!
//! The streaming session and the batch path both go through
//! [`ChannelDeriver::derive`], so the two produce identical channels.

use alloc::vec::Vec;

use crate::constants::units::{KPH_TO_MPS, MIN_DELTA_TIME_S, STANDARD_GRAVITY_MPS2};
use crate::constants::windows::MIN_SAMPLES_FOR_ROC;
use crate::errors::{ClassifierError, ClassifierResult};
use crate::sample::{DerivedSample, RawSample};
use crate::time::{elapsed_seconds, Timestamp};

/// Last observed value of each required channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForwardFill {
    rpm: Option<f64>,
    throttle_pct: Option<f64>,
    speed_kph: Option<f64>,
}

impl ForwardFill {
    /// Filled `(rpm, throttle_pct, speed_kph)` for `raw`, remembering new
    /// observations
    pub fn apply(&mut self, raw: &RawSample) -> (f64, f64, f64) {
        (
            fill(&mut self.rpm, raw.rpm),
            fill(&mut self.throttle_pct, raw.throttle_pct),
            fill(&mut self.speed_kph, raw.speed_kph),
        )
    }
}

fn fill(last: &mut Option<f64>, observed: Option<f64>) -> f64 {
    if let Some(v) = observed.filter(|v| v.is_finite()) {
        *last = Some(v);
    }
    last.unwrap_or(0.0)
}

/// The values of the previous sample that rates are taken against
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    timestamp: Timestamp,
    rpm: f64,
    throttle_pct: f64,
    speed_mps: f64,
}

/// `Δ / dt`, or 0 when `dt` is too small or the result is not finite
pub fn safe_rate(delta: f64, delta_time_s: f64) -> f64 {
    if delta_time_s < MIN_DELTA_TIME_S {
        return 0.0;
    }
    finite_or_zero(delta / delta_time_s)
}

/// `value` if finite, otherwise 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Incremental deriver for one session
#[derive(Debug, Clone, Default)]
pub struct ChannelDeriver {
    previous: Option<Point>,
    fill: ForwardFill,
    index: usize,
}

impl ChannelDeriver {
    /// Fresh deriver, as at session start
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples accepted so far
    pub fn samples_seen(&self) -> usize {
        self.index
    }

    /// Timestamp of the last accepted sample
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.previous.map(|p| p.timestamp)
    }

    /// Derive channels for the next sample in the session
    pub fn derive(&mut self, raw: &RawSample) -> ClassifierResult<DerivedSample> {
        if let Some(prev) = &self.previous {
            if raw.timestamp < prev.timestamp {
                log_warn!(
                    "rejecting sample {}: timestamp {} ms precedes {} ms",
                    self.index,
                    raw.timestamp,
                    prev.timestamp
                );
                return Err(ClassifierError::NonMonotonicTimestamp {
                    index: self.index,
                    previous: prev.timestamp,
                    current: raw.timestamp,
                });
            }
        }

        let (rpm, throttle_pct, speed_kph) = self.fill.apply(raw);
        let speed_mps = finite_or_zero(speed_kph * KPH_TO_MPS);

        let (delta_time_s, accel_mps2, rpm_roc, throttle_roc) = match &self.previous {
            None => (0.0, 0.0, 0.0, 0.0),
            Some(prev) => {
                let dt = elapsed_seconds(prev.timestamp, raw.timestamp);
                (
                    dt,
                    safe_rate(speed_mps - prev.speed_mps, dt),
                    safe_rate(rpm - prev.rpm, dt),
                    safe_rate(throttle_pct - prev.throttle_pct, dt),
                )
            }
        };
        let accel_g = finite_or_zero(accel_mps2 / STANDARD_GRAVITY_MPS2);

        self.previous = Some(Point {
            timestamp: raw.timestamp,
            rpm,
            throttle_pct,
            speed_mps,
        });
        self.index += 1;

        Ok(DerivedSample {
            raw: raw.clone(),
            rpm,
            throttle_pct,
            speed_kph,
            delta_time_s,
            speed_mps,
            accel_mps2,
            accel_g,
            rpm_roc,
            throttle_roc,
        })
    }

    /// Forget all history
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Derive channels for a whole recording
///
/// Fails on the first decreasing timestamp. Recordings shorter than
/// [`MIN_SAMPLES_FOR_ROC`] have nothing to differentiate; every rate is 0.
pub fn derive_batch(samples: &[RawSample]) -> ClassifierResult<Vec<DerivedSample>> {
    if !samples.is_empty() && samples.len() < MIN_SAMPLES_FOR_ROC {
        log_warn!(
            "only {} sample(s); rates of change are all zero",
            samples.len()
        );
    }

    let mut deriver = ChannelDeriver::new();
    samples.iter().map(|raw| deriver.derive(raw)).collect()
}
