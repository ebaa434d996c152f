//! Sample timestamps
//!
//! Samples carry a monotonic instant in milliseconds. The origin is up to the
//! producer: epoch time for recorded CSV logs, session start for a live poll
//! loop. Only differences between timestamps are ever used.

use crate::constants::units::MS_PER_SECOND;

/// Timestamp in milliseconds since an arbitrary, session-stable origin
pub type Timestamp = u64;

/// Elapsed time between two timestamps in seconds
///
/// Saturates at zero when `later` precedes `earlier`; ordering is checked by
/// the caller before any rate is computed.
pub fn elapsed_seconds(earlier: Timestamp, later: Timestamp) -> f64 {
    later.saturating_sub(earlier) as f64 / MS_PER_SECOND as f64
}

/// Convert (possibly fractional) seconds into a millisecond timestamp
///
/// Negative and non-finite inputs map to 0.
pub fn from_seconds(seconds: f64) -> Timestamp {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    libm::round(seconds * MS_PER_SECOND as f64) as Timestamp
}
