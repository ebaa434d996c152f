//! Constants for drivelens Core
//!
//! Every threshold used by the deriver and the classifier is named here. The
//! defaults in [`crate::classifier::ClassifierConfig`] are assembled from these
//! values, so a deployment can override any of them without touching code.
//!
//! ## Organization
//!
//! - **Units**: conversion factors (km/h to m/s, standard gravity, ms/s)
//! - **Thresholds**: rule thresholds for style, road type and traffic
//! - **Windows**: rolling window sizes and minimum sample counts
//!
//! ## Provenance
//!
//! Two tunings of the classifier exist in the field: the offline log analyzer
//! (RPM-hold hysteresis, per-second rate triggers) and the continuous in-car
//! logger (sample cooldown, short-window delta triggers). The analyzer values
//! are the canonical defaults; the logger values back the `live` preset.

/// Unit conversion factors.
pub mod units;

/// Rule thresholds for driving style, road type and traffic.
pub mod thresholds;

/// Rolling window sizes and sample-count minimums.
pub mod windows;

pub use units::{KPH_TO_MPS, MS_PER_SECOND, STANDARD_GRAVITY_MPS2};

pub use windows::{
    DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE, MIN_SAMPLES_FOR_CLASSIFICATION,
    MIN_SAMPLES_FOR_ROC,
};
