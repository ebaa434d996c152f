//! Pre-built driving scenarios
//!
//! Each scenario is a plausible stretch of driving at the logger's poll
//! rate. Values are picked so the expected labels are unambiguous under the
//! default thresholds.

use drivelens_core::RawSample;

use super::DriveBuilder;

/// Parked with the engine idling
pub fn idling(n: usize) -> Vec<RawSample> {
    DriveBuilder::new(0).hold(n, 800.0, 0.0, 0.0).build()
}

/// Steady 100 km/h cruise
pub fn highway_cruise(n: usize) -> Vec<RawSample> {
    DriveBuilder::new(0).hold(n, 2_200.0, 18.0, 100.0).build()
}

/// Gentle 35 km/h neighbourhood driving
pub fn local_street(n: usize) -> Vec<RawSample> {
    DriveBuilder::new(0).hold(n, 1_500.0, 12.0, 35.0).build()
}

/// Stop-and-go: alternating stops and short crawls, 40 samples
pub fn city_stop_and_go() -> Vec<RawSample> {
    let mut builder = DriveBuilder::new(0);
    for _ in 0..4 {
        builder = builder
            .hold(5, 750.0, 0.0, 0.0)
            .ramp(5, 1_400.0, 15.0, 3.0, 15.0);
    }
    builder.build()
}

/// Light cruising, then one flat-out second-gear pull, then easing off
///
/// Samples 0..12 cruise, 12..15 are the pull (3400 rpm, 75% throttle),
/// 15.. ease back to 1600 rpm.
pub fn hard_launch() -> Vec<RawSample> {
    DriveBuilder::new(0)
        .hold(12, 1_600.0, 15.0, 40.0)
        .ramp(3, 3_400.0, 75.0, 45.0, 60.0)
        .hold(20, 1_600.0, 10.0, 60.0)
        .build()
}

/// 60 km/h cruise, then braking to a stop
///
/// Samples 12..25 each shed ~4.6 km/h in 300 ms (about -0.43 g); the car is
/// stopped from sample 24 on.
pub fn hard_braking() -> Vec<RawSample> {
    DriveBuilder::new(0)
        .hold(12, 1_800.0, 15.0, 60.0)
        .ramp(13, 900.0, 0.0, 55.0, 0.0)
        .hold(5, 750.0, 0.0, 0.0)
        .build()
}
