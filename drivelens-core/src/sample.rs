//! Sample records flowing through the engine
//!
//! ```text
//! RawSample ──► ChannelDeriver ──► DerivedSample ──► BehaviorClassifier ──► ClassifiedSample
//!  (poll)        (fill, diff)       (+ kinematics)     (+ window, state)      (+ labels)
//! ```
//!
//! A `RawSample` is one sensor poll. Any channel may be missing because the
//! ECU did not answer that cycle. The three channels the classifier needs
//! (`RPM`, `THROTTLE_POS`, `SPEED`) have dedicated fields; every other PID
//! lands in `aux` keyed by its OBD name and is passed through untouched.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::classifier::{BehaviorLabels, DrivingStyle, RoadType, TrafficCondition};
use crate::time::Timestamp;
use crate::window::WindowStats;

/// OBD channel name for engine speed (rev/min)
pub const RPM_CHANNEL: &str = "RPM";

/// OBD channel name for throttle position (%)
pub const THROTTLE_CHANNEL: &str = "THROTTLE_POS";

/// OBD channel name for vehicle speed (km/h)
pub const SPEED_CHANNEL: &str = "SPEED";

/// One sensor poll, before any cleaning
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    /// Poll instant in milliseconds
    pub timestamp: Timestamp,
    /// Engine speed, absent if the ECU did not answer
    pub rpm: Option<f64>,
    /// Throttle position in percent
    pub throttle_pct: Option<f64>,
    /// Vehicle speed in km/h
    pub speed_kph: Option<f64>,
    /// Every other PID that answered, by OBD name
    pub aux: BTreeMap<String, f64>,
}

impl RawSample {
    /// Empty sample at `timestamp`; all channels absent
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Set engine speed
    pub fn with_rpm(mut self, rpm: f64) -> Self {
        self.rpm = Some(rpm);
        self
    }

    /// Set throttle position
    pub fn with_throttle(mut self, throttle_pct: f64) -> Self {
        self.throttle_pct = Some(throttle_pct);
        self
    }

    /// Set vehicle speed
    pub fn with_speed(mut self, speed_kph: f64) -> Self {
        self.speed_kph = Some(speed_kph);
        self
    }

    /// Add an auxiliary reading
    pub fn with_aux(mut self, name: &str, value: f64) -> Self {
        self.set_channel(name, Some(value));
        self
    }

    /// Build a sample from `(channel name, value)` pairs as a poll loop reports them
    pub fn from_channels<'a, I>(timestamp: Timestamp, channels: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<f64>)>,
    {
        let mut sample = Self::new(timestamp);
        for (name, value) in channels {
            sample.set_channel(name, value);
        }
        sample
    }

    /// Store a reading under its OBD channel name
    ///
    /// Required channels go to their dedicated fields. Auxiliary readings that
    /// are absent or non-finite are dropped, since there is nothing to carry.
    pub fn set_channel(&mut self, name: &str, value: Option<f64>) {
        match name {
            RPM_CHANNEL => self.rpm = value,
            THROTTLE_CHANNEL => self.throttle_pct = value,
            SPEED_CHANNEL => self.speed_kph = value,
            _ => match value {
                Some(v) if v.is_finite() => {
                    self.aux.insert(String::from(name), v);
                }
                _ => {
                    self.aux.remove(name);
                }
            },
        }
    }
}

/// A raw sample after forward-fill and differentiation
///
/// All `f64` fields are finite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedSample {
    /// The sample as it was polled
    pub raw: RawSample,
    /// Engine speed after forward-fill (rev/min)
    pub rpm: f64,
    /// Throttle after forward-fill (%)
    pub throttle_pct: f64,
    /// Speed after forward-fill (km/h)
    pub speed_kph: f64,
    /// Seconds since the previous sample, 0 for the first
    pub delta_time_s: f64,
    /// Speed in m/s
    pub speed_mps: f64,
    /// Longitudinal acceleration (m/s²)
    pub accel_mps2: f64,
    /// Longitudinal acceleration (g)
    pub accel_g: f64,
    /// RPM change per second
    pub rpm_roc: f64,
    /// Throttle-percent change per second
    pub throttle_roc: f64,
}

impl DerivedSample {
    /// Poll instant of the underlying raw sample
    pub fn timestamp(&self) -> Timestamp {
        self.raw.timestamp
    }

    /// Whether the vehicle is moving faster than `min_speed_kph`
    pub fn is_moving(&self, min_speed_kph: f64) -> bool {
        self.speed_kph > min_speed_kph
    }
}

/// Final per-sample output record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedSample {
    /// Original fields plus derived channels
    pub sample: DerivedSample,
    /// Style, road and traffic labels
    pub labels: BehaviorLabels,
    /// Rolling statistics the labels were computed from
    pub window: WindowStats,
}

impl ClassifiedSample {
    /// Driving style label
    pub fn style(&self) -> DrivingStyle {
        self.labels.style
    }

    /// Road type label
    pub fn road(&self) -> RoadType {
        self.labels.road
    }

    /// Traffic condition label
    pub fn traffic(&self) -> TrafficCondition {
        self.labels.traffic
    }
}
