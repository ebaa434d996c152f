//! Common test utilities for integration tests
//!
//! This module provides:
//! - A drive builder that lays out samples at a fixed poll interval
//! - Pre-built driving scenarios (city, highway, launch, braking)
//! - Label assertion helpers

#![allow(dead_code)]

use drivelens_core::{ClassifiedSample, DrivingStyle, RawSample};

pub mod scenarios;

/// Logger poll interval (ms)
pub const POLL_MS: u64 = 300;

/// Builds a recording one poll at a time
pub struct DriveBuilder {
    timestamp: u64,
    interval_ms: u64,
    samples: Vec<RawSample>,
}

impl DriveBuilder {
    /// Start at `timestamp` with the logger's poll interval
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp,
            interval_ms: POLL_MS,
            samples: Vec::new(),
        }
    }

    /// Use a different poll interval
    pub fn interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Append one fully populated sample
    pub fn poll(mut self, rpm: f64, throttle: f64, speed: f64) -> Self {
        let sample = RawSample::new(self.timestamp)
            .with_rpm(rpm)
            .with_throttle(throttle)
            .with_speed(speed);
        self.push(sample);
        self
    }

    /// Append `n` identical samples
    pub fn hold(mut self, n: usize, rpm: f64, throttle: f64, speed: f64) -> Self {
        for _ in 0..n {
            self = self.poll(rpm, throttle, speed);
        }
        self
    }

    /// Linearly ramp speed from `from` to `to` over `n` samples
    pub fn ramp(mut self, n: usize, rpm: f64, throttle: f64, from: f64, to: f64) -> Self {
        for i in 0..n {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 1.0 };
            self = self.poll(rpm, throttle, from + (to - from) * t);
        }
        self
    }

    /// Append a sample where the ECU answered nothing
    pub fn dropout(mut self) -> Self {
        let sample = RawSample::new(self.timestamp);
        self.push(sample);
        self
    }

    /// Append an arbitrary sample at the next poll instant
    pub fn raw(mut self, build: impl FnOnce(RawSample) -> RawSample) -> Self {
        let sample = build(RawSample::new(self.timestamp));
        self.push(sample);
        self
    }

    fn push(&mut self, sample: RawSample) {
        self.samples.push(sample);
        self.timestamp += self.interval_ms;
    }

    /// Finished recording
    pub fn build(self) -> Vec<RawSample> {
        self.samples
    }
}

/// Driving styles of a classified drive
pub fn styles(classified: &[ClassifiedSample]) -> Vec<DrivingStyle> {
    classified.iter().map(|c| c.style()).collect()
}

/// Assert the style of every sample in `range`
pub fn assert_styles(
    classified: &[ClassifiedSample],
    range: std::ops::Range<usize>,
    expected: DrivingStyle,
) {
    for i in range {
        assert_eq!(
            classified[i].style(),
            expected,
            "sample {} at {} ms",
            i,
            classified[i].sample.timestamp()
        );
    }
}
