//! Fixed-Capacity Rolling Buffer for Channel History
//!
//! ## Overview
//!
//! The streaming classifier needs the last few seconds of each channel:
//! averages for road type, stop ratios for traffic, short deltas for spike
//! detection. `RollingBuffer` keeps the most recent `capacity` values of one
//! channel and answers those questions directly.
//!
//! ## Design
//!
//! Storage is a `heapless::Deque` with a compile-time upper bound
//! ([`MAX_WINDOW_SIZE`]) and a run-time capacity chosen by configuration. Once
//! `capacity` values are held, each push evicts the oldest one. Nothing else
//! ever removes a value except [`RollingBuffer::clear`] at session reset.
//!
//! ```text
//! capacity = 4
//!
//! push 10, 20, 30, 40   ->  [10, 20, 30, 40]   (full)
//! push 50               ->  [20, 30, 40, 50]   (10 evicted)
//!                             ^oldest     ^newest
//! ```
//!
//! - `push()`: O(1), no allocation
//! - statistics: O(n) single pass over at most `capacity` values
//!
//! All statistics return 0 (or `None` for `short_window_delta`) when there is
//! not enough history, so callers never divide by an empty window.
//!
//! ## Usage Example
//!
//! ```
//! use drivelens_core::buffer::RollingBuffer;
//!
//! let mut speeds = RollingBuffer::new(3)?;
//! for kph in [0.0, 12.0, 30.0, 45.0] {
//!     speeds.push(kph);
//! }
//!
//! assert_eq!(speeds.len(), 3);                        // 0.0 was evicted
//! assert_eq!(speeds.average(None), 29.0);
//! assert_eq!(speeds.short_window_delta(3), Some(33.0));
//! # Ok::<(), drivelens_core::ClassifierError>(())
//! ```

use heapless::Deque;

use crate::constants::windows::MAX_WINDOW_SIZE;
use crate::errors::{ClassifierError, ClassifierResult};

/// Oldest-evicted buffer of the most recent values of one channel
///
/// ## Internal Invariants
///
/// - `1 <= capacity <= MAX_WINDOW_SIZE`
/// - `values.len() <= capacity`
/// - values are in arrival order, oldest first
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    values: Deque<f64, MAX_WINDOW_SIZE>,
    capacity: usize,
}

impl RollingBuffer {
    /// Creates an empty buffer holding at most `capacity` values
    pub fn new(capacity: usize) -> ClassifierResult<Self> {
        if capacity == 0 {
            return Err(ClassifierError::InvalidConfig {
                reason: "window size must be at least 1",
            });
        }
        if capacity > MAX_WINDOW_SIZE {
            return Err(ClassifierError::InvalidConfig {
                reason: "window size exceeds MAX_WINDOW_SIZE",
            });
        }

        Ok(Self {
            values: Deque::new(),
            capacity,
        })
    }

    /// Appends a value, evicting the oldest once `capacity` is reached
    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        // capacity <= MAX_WINDOW_SIZE, so there is always room after the pop
        let _ = self.values.push_back(value);
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if buffer holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent value
    pub fn last(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Drop all values (session reset)
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Arithmetic mean of the stored values
    ///
    /// With `exclude_below = Some(t)`, values `<= t` are skipped first; this is
    /// how the speed average is restricted to samples where the car moved.
    /// Returns 0 when no value remains.
    pub fn average(&self, exclude_below: Option<f64>) -> f64 {
        let (sum, count) = self
            .iter()
            .filter(|v| exclude_below.map_or(true, |floor| *v > floor))
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Mean of consecutive differences (per sample, not per second)
    ///
    /// Returns 0 with fewer than two values.
    pub fn rate_of_change(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }

        let mut previous: Option<f64> = None;
        let mut sum = 0.0;
        for v in self.iter() {
            if let Some(p) = previous {
                sum += v - p;
            }
            previous = Some(v);
        }
        sum / (self.values.len() - 1) as f64
    }

    /// Newest value minus the oldest of the newest `k` values
    ///
    /// `None` until at least `k` values exist, or when `k` is 0.
    pub fn short_window_delta(&self, k: usize) -> Option<f64> {
        let len = self.values.len();
        if k == 0 || len < k {
            return None;
        }

        let newest = self.last()?;
        let anchor = self.iter().nth(len - k)?;
        Some(newest - anchor)
    }

    /// Number of values strictly below `threshold`
    pub fn stop_count(&self, threshold: f64) -> usize {
        self.iter().filter(|v| *v < threshold).count()
    }

    /// Share of the most recent `last_n` values strictly above `threshold`
    ///
    /// The denominator is always `last_n`; slots not yet filled count as not
    /// above. Returns 0 for `last_n == 0`.
    pub fn fraction_above(&self, threshold: f64, last_n: usize) -> f64 {
        if last_n == 0 {
            return 0.0;
        }

        let len = self.values.len();
        let above = self
            .iter()
            .skip(len.saturating_sub(last_n))
            .filter(|v| *v > threshold)
            .count();
        above as f64 / last_n as f64
    }
}
