//! Rolling Window Sizes and Sample Minimums
//!
//! At the logger's 0.3 s poll interval a 20-sample window spans about six
//! seconds of driving, long enough to smooth a single slow PID answer but
//! short enough to follow a change of road within one block.

/// Default rolling window capacity (samples).
///
/// ~6 seconds at a 0.3 s poll interval.
///
/// Source: in-car logger configuration
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Hard upper bound for any rolling window (samples).
///
/// Buffers are fixed-capacity, allocated inline. 256 samples is over a
/// minute of history at typical poll rates.
pub const MAX_WINDOW_SIZE: usize = 256;

/// Minimum samples observed in a session before any label is emitted.
///
/// Below this every label is `Unknown`.
///
/// Source: in-car logger configuration
pub const MIN_SAMPLES_FOR_CLASSIFICATION: usize = 10;

/// Minimum samples in a recording before rates are differentiated.
///
/// A batch with fewer samples gets all-zero rate channels.
pub const MIN_SAMPLES_FOR_ROC: usize = 2;

/// Samples spanned by the short-window spike test (live preset).
///
/// Source: in-car logger configuration
pub const SHORT_ROC_WINDOW_SIZE: usize = 3;

/// Most recent samples inspected by the sustained-highway test.
pub const HIGHWAY_DWELL_SAMPLES: usize = 10;

/// Aggressive cooldown length for the live preset (samples).
///
/// ~4.5 seconds at a 0.3 s poll interval.
///
/// Source: in-car logger configuration
pub const AGGRESSIVE_COOLDOWN_SAMPLES: u32 = 15;
