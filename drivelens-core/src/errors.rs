//! Error types for the classification core
//!
//! Missing channels are forward-filled, divisions by a zero time step become
//! 0 and short histories produce the `Unknown` label. None of those are
//! errors. Only two things are:
//!
//! - `NonMonotonicTimestamp`: a sample is older than its predecessor.
//! - `InvalidConfig`: a `ClassifierConfig` that cannot be honored (zero-sized
//!   window, ratio outside [0, 1], ...).
//!
//! Errors are `Copy` and carry only inline data.
//!
//! ```
//! use drivelens_core::{ClassifierConfig, ClassifierError, RawSample, StreamingSession};
//!
//! let mut session = StreamingSession::new(ClassifierConfig::default())?;
//! session.push(&RawSample::new(2_000))?;
//!
//! match session.push(&RawSample::new(1_000)) {
//!     Err(ClassifierError::NonMonotonicTimestamp { previous, current, .. }) => {
//!         assert_eq!((previous, current), (2_000, 1_000));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! # Ok::<(), ClassifierError>(())
//! ```

use thiserror_no_std::Error;

use crate::time::Timestamp;

/// Result type for classifier operations
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Caller-visible failures of the classification core
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierError {
    /// Sample timestamp went backwards within one session
    #[error("Timestamp {current} at sample {index} precedes previous timestamp {previous}")]
    NonMonotonicTimestamp {
        /// Position of the offending sample in the session (0-based)
        index: usize,
        /// Timestamp of the last accepted sample (ms)
        previous: Timestamp,
        /// Timestamp of the rejected sample (ms)
        current: Timestamp,
    },

    /// Configuration cannot be used as given
    #[error("Invalid classifier configuration: {reason}")]
    InvalidConfig {
        /// Which limit was violated
        reason: &'static str,
    },
}
