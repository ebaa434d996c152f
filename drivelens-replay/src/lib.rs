//! CSV replay for drivelens
//!
//! Loads a recorded OBD log, runs it through the core classifier and writes
//! the analyzed rows back out, the way the in-car logger's post-drive
//! analysis step does.
//!
//! ```no_run
//! use drivelens_replay::{analyze, read_log, write_analyzed, Mode, Preset, ReplayOptions};
//!
//! let samples = read_log("drive.csv", &ReplayOptions::default())?;
//! let analysis = analyze(&samples, Preset::Default.config(), Mode::Batch)?;
//! write_analyzed("drive_analyzed.csv", &analysis.samples)?;
//! # Ok::<(), drivelens_replay::ReplayError>(())
//! ```

#![deny(unsafe_code)]

pub mod analyze;
pub mod config;
pub mod error;
pub mod reader;
pub mod report;
pub mod writer;

pub use analyze::{analyze, analyze_recordings, Analysis, Mode};
pub use config::{load_config, parse_config, Preset};
pub use error::{ReplayError, ReplayResult};
pub use reader::{read_log, read_samples, ReplayOptions};
pub use writer::{write_analyzed, write_samples};
