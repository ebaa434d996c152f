//! Per-session rolling history of the three classifier channels
//!
//! The store holds one [`RollingBuffer`] per channel, all with the same
//! capacity, and is pushed exactly once per sample so the buffers stay
//! aligned. [`RollingWindowStore::snapshot`] condenses them into a
//! [`WindowStats`] value that road and traffic rules read from and that is
//! attached to every classification for diagnostics.

use crate::buffer::RollingBuffer;
use crate::classifier::config::{RoadThresholds, TrafficThresholds};
use crate::errors::ClassifierResult;

/// Statistics over the current rolling window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowStats {
    /// Samples currently in the window
    pub samples: usize,
    /// Mean RPM over the window
    pub avg_rpm: f64,
    /// Mean throttle (%) over the window
    pub avg_throttle_pct: f64,
    /// Mean speed (km/h), stopped samples included
    pub avg_speed_kph: f64,
    /// Mean speed (km/h) over samples above the moving floor
    pub moving_avg_speed_kph: f64,
    /// Share of samples below the stopped speed
    pub stop_ratio: f64,
    /// Share of the dwell span above the highway speed
    pub highway_ratio: f64,
    /// Mean per-sample speed change (km/h)
    pub speed_roc: f64,
}

/// Rolling RPM, throttle and speed buffers for one session
#[derive(Debug, Clone)]
pub struct RollingWindowStore {
    rpm: RollingBuffer,
    throttle: RollingBuffer,
    speed: RollingBuffer,
}

impl RollingWindowStore {
    /// Create empty buffers of `window_size` samples each
    pub fn new(window_size: usize) -> ClassifierResult<Self> {
        Ok(Self {
            rpm: RollingBuffer::new(window_size)?,
            throttle: RollingBuffer::new(window_size)?,
            speed: RollingBuffer::new(window_size)?,
        })
    }

    /// Append one sample's filled channel values
    pub fn push(&mut self, rpm: f64, throttle_pct: f64, speed_kph: f64) {
        self.rpm.push(rpm);
        self.throttle.push(throttle_pct);
        self.speed.push(speed_kph);
    }

    /// RPM history
    pub fn rpm(&self) -> &RollingBuffer {
        &self.rpm
    }

    /// Throttle history
    pub fn throttle(&self) -> &RollingBuffer {
        &self.throttle
    }

    /// Speed history
    pub fn speed(&self) -> &RollingBuffer {
        &self.speed
    }

    /// Samples currently held (same for every channel)
    pub fn len(&self) -> usize {
        self.speed.len()
    }

    /// True before the first push or after a reset
    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.rpm.clear();
        self.throttle.clear();
        self.speed.clear();
    }

    /// Summarize the window under the given road and traffic thresholds
    pub fn snapshot(&self, road: &RoadThresholds, traffic: &TrafficThresholds) -> WindowStats {
        let samples = self.len();
        let stop_ratio = if samples == 0 {
            0.0
        } else {
            self.speed.stop_count(traffic.stopped_speed_kph) as f64 / samples as f64
        };

        WindowStats {
            samples,
            avg_rpm: self.rpm.average(None),
            avg_throttle_pct: self.throttle.average(None),
            avg_speed_kph: self.speed.average(None),
            moving_avg_speed_kph: self.speed.average(Some(road.moving_floor_kph)),
            stop_ratio,
            highway_ratio: self
                .speed
                .fraction_above(road.highway_speed_kph, road.highway_dwell_samples),
            speed_roc: self.speed.rate_of_change(),
        }
    }
}
