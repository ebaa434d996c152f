//! Unit Conversion Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Kilometres per hour to metres per second.
///
/// OBD `SPEED` (PID 0x0D) reports km/h; kinematics are computed in SI.
pub const KPH_TO_MPS: f64 = 1.0 / 3.6;

/// Standard gravity (m/s²).
///
/// Used to express longitudinal acceleration in g.
///
/// Source: CGPM 1901, ISO 80000-3
pub const STANDARD_GRAVITY_MPS2: f64 = 9.80665;

/// Smallest time step (seconds) treated as a real interval.
///
/// Anything shorter is considered a duplicate poll and every rate computed
/// across it is defined as 0. With millisecond timestamps the smallest
/// non-zero step is 0.001 s, so in practice only identical timestamps hit
/// this guard.
pub const MIN_DELTA_TIME_S: f64 = 1e-6;
