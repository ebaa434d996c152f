//! Writing analyzed logs
//!
//! Output column order:
//!
//! ```text
//! timestamp, RPM, THROTTLE_POS, SPEED, <aux columns, sorted>,
//! delta_time_s, SPEED_mps, acceleration_mps2, acceleration_g, RPM_roc, THROTTLE_roc,
//! driving_style_analyzed, road_type_analyzed, traffic_condition_analyzed
//! ```
//!
//! `RPM`, `THROTTLE_POS` and `SPEED` are written forward-filled. Timestamps are
//! written as `YYYY-MM-DD HH:MM:SS.mmm` UTC.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use drivelens_core::sample::{RPM_CHANNEL, SPEED_CHANNEL, THROTTLE_CHANNEL};
use drivelens_core::time::Timestamp;
use drivelens_core::ClassifiedSample;

use crate::error::ReplayResult;
use crate::reader::TIMESTAMP_COLUMN;

/// Columns added by the analysis
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "delta_time_s",
    "SPEED_mps",
    "acceleration_mps2",
    "acceleration_g",
    "RPM_roc",
    "THROTTLE_roc",
    "driving_style_analyzed",
    "road_type_analyzed",
    "traffic_condition_analyzed",
];

/// Save analyzed samples, creating parent directories as needed
pub fn write_analyzed(path: impl AsRef<Path>, samples: &[ClassifiedSample]) -> ReplayResult<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    write_samples(File::create(path)?, samples)?;
    log::info!("wrote {} analyzed rows to {}", samples.len(), path.display());
    Ok(())
}

/// Write analyzed samples to any writer
pub fn write_samples<W: Write>(writer: W, samples: &[ClassifiedSample]) -> ReplayResult<()> {
    let aux: BTreeSet<&str> = samples
        .iter()
        .flat_map(|c| c.sample.raw.aux.keys().map(String::as_str))
        .collect();

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![TIMESTAMP_COLUMN, RPM_CHANNEL, THROTTLE_CHANNEL, SPEED_CHANNEL];
    header.extend(aux.iter().copied());
    header.extend(OUTPUT_COLUMNS);
    wtr.write_record(&header)?;

    for c in samples {
        let d = &c.sample;
        let mut row = Vec::with_capacity(header.len());
        row.push(format_timestamp(d.timestamp()));
        row.extend([d.rpm, d.throttle_pct, d.speed_kph].map(|v| v.to_string()));
        row.extend(
            aux.iter()
                .map(|name| d.raw.aux.get(*name).map(f64::to_string).unwrap_or_default()),
        );
        row.extend(
            [
                d.delta_time_s,
                d.speed_mps,
                d.accel_mps2,
                d.accel_g,
                d.rpm_roc,
                d.throttle_roc,
            ]
            .map(|v| v.to_string()),
        );
        row.push(c.style().to_string());
        row.push(c.road().to_string());
        row.push(c.traffic().to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Format epoch milliseconds the way the logger writes timestamps
pub fn format_timestamp(timestamp: Timestamp) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
