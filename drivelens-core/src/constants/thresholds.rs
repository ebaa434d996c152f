//! Classification Thresholds
//!
//! All values are in the units the OBD PIDs report: RPM in rev/min, throttle
//! in percent of full travel, speed in km/h, acceleration in g.

// ===== MOTION =====

/// Vehicle counts as moving above this speed (km/h).
///
/// Filters out idle creep and speed sensor noise at standstill.
pub const MIN_MOVING_SPEED_KPH: f64 = 2.0;

// ===== AGGRESSIVE TRIGGERS =====

/// RPM above which (with high throttle) load counts as aggressive.
///
/// Source: offline analyzer tuning
pub const AGGRESSIVE_RPM_ENTRY: f64 = 2700.0;

/// Throttle (%) above which (with high RPM) load counts as aggressive.
///
/// Source: offline analyzer tuning
pub const AGGRESSIVE_THROTTLE_ENTRY: f64 = 40.0;

/// RPM that keeps an aggressive label alive under RPM-hold hysteresis.
///
/// Lower than the entry threshold so a driver easing off slightly does not
/// flap between labels.
pub const AGGRESSIVE_RPM_HOLD: f64 = 2300.0;

/// Longitudinal deceleration (g) that counts as hard braking.
///
/// -0.25 g ≈ -2.45 m/s², well beyond comfortable service braking.
pub const HARSH_BRAKING_G: f64 = -0.25;

/// RPM rate of change (rev/min per second) treated as a spike.
pub const AGGRESSIVE_RPM_ROC: f64 = 500.0;

/// Throttle rate of change (% per second) treated as a spike.
pub const AGGRESSIVE_THROTTLE_ROC: f64 = 45.0;

/// Minimum forward acceleration (g) for the rate-spike trigger.
///
/// Rev spikes while coasting or braking (downshifts) are not aggressive.
pub const POSITIVE_ACCEL_FOR_ROC_G: f64 = 0.1;

// ===== SHORT-WINDOW SPIKES (live preset) =====

/// RPM rise across the short window that counts as a spike.
pub const SHORT_WINDOW_RPM_DELTA: f64 = 700.0;

/// Throttle rise (%) across the short window that counts as a spike.
pub const SHORT_WINDOW_THROTTLE_DELTA: f64 = 25.0;

/// Speed rise (km/h) across the short window that counts as a spike.
pub const SHORT_WINDOW_SPEED_DELTA: f64 = 8.0;

/// RPM floor for short-window spikes; blips off idle are ignored.
pub const SHORT_WINDOW_MIN_RPM: f64 = 1000.0;

// ===== MODERATE =====

/// RPM above which a moving vehicle is driven moderately.
pub const MODERATE_RPM: f64 = 2100.0;

/// Throttle (%) above which a moving vehicle is driven moderately.
pub const MODERATE_THROTTLE: f64 = 25.0;

// ===== ROAD TYPE =====

/// Speed (km/h) that counts toward sustained highway driving.
///
/// 88 km/h ≈ 55 mph. Some deployments use 95 km/h; override via config.
pub const HIGHWAY_SPEED_KPH: f64 = 88.0;

/// Share of dwell samples that must exceed the highway speed.
pub const HIGHWAY_MIN_RATIO: f64 = 0.7;

/// Moving-average speed (km/h) below which the road is local.
pub const LOCAL_MAX_AVG_SPEED_KPH: f64 = 60.0;

/// Speeds at or below this are excluded from the moving average (km/h).
pub const MOVING_AVERAGE_FLOOR_KPH: f64 = 0.0;

// ===== TRAFFIC =====

/// Speed (km/h) below which a sample counts as stopped.
pub const STOPPED_SPEED_KPH: f64 = 5.0;

/// Stop ratio at or above which traffic may be heavy.
pub const HEAVY_TRAFFIC_STOP_RATIO: f64 = 0.3;

/// Overall average speed (km/h) below which traffic may be heavy.
pub const HEAVY_TRAFFIC_MAX_AVG_KPH: f64 = 20.0;

/// Overall average speed (km/h) below which traffic is at least moderate.
pub const MODERATE_TRAFFIC_MAX_AVG_KPH: f64 = 40.0;

/// Stop ratio above which traffic is at least moderate.
pub const MODERATE_TRAFFIC_STOP_RATIO: f64 = 0.1;
