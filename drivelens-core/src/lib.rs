//! Core classification engine for drivelens
//!
//! Turns an irregularly sampled OBD sensor stream (RPM, throttle, speed and
//! auxiliary PIDs) into derived kinematic channels and a per-sample driving
//! style, road type and traffic condition.
//!
//! Key constraints:
//! - No I/O, no global state: every session owns its buffers
//! - Batch replay and live streaming produce identical labels
//! - Bad or missing data degrades to zero / `Unknown`, never to a panic
//!
//! ```
//! use drivelens_core::{ClassifierConfig, RawSample, StreamingSession};
//!
//! let mut session = StreamingSession::new(ClassifierConfig::default())?;
//!
//! // Feed samples as they arrive from the poll loop
//! let first = session.push(&RawSample::new(0).with_rpm(850.0).with_speed(0.0))?;
//! assert_eq!(first.sample.accel_mps2, 0.0);
//! # Ok::<(), drivelens_core::ClassifierError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Optional logging, compiled out without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod batch;
pub mod buffer;
pub mod classifier;
pub mod constants;
pub mod deriver;
pub mod errors;
pub mod sample;
pub mod session;
pub mod stream;
pub mod summary;
pub mod time;
pub mod window;

// Public API
pub use batch::BatchPreprocessor;
pub use classifier::{
    BehaviorClassifier, BehaviorLabels, ClassifierConfig, ClassifierState, DrivingStyle,
    Hysteresis, RoadType, TrafficCondition,
};
pub use deriver::{derive_batch, ChannelDeriver};
pub use errors::{ClassifierError, ClassifierResult};
pub use sample::{ClassifiedSample, DerivedSample, RawSample};
pub use session::StreamingSession;
pub use summary::LabelDistribution;
pub use window::{RollingWindowStore, WindowStats};

/// Crate version, for embedding in analyzer output
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
