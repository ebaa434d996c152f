//! Reading recorded OBD logs
//!
//! A log is a CSV file with a header row. The only required column is
//! `timestamp`; `RPM`, `THROTTLE_POS` and `SPEED` fill the classifier
//! channels and every other numeric column is carried as an auxiliary
//! reading. Cells that are empty or not numbers are treated as absent, which
//! is what the logger writes when the ECU did not answer.
//!
//! Columns produced by a previous analysis are skipped, so an analyzed file
//! can be analyzed again.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use drivelens_core::time::Timestamp;
use drivelens_core::RawSample;

use crate::error::{ReplayError, ReplayResult};
use crate::writer::OUTPUT_COLUMNS;

/// Name of the required timestamp column
pub const TIMESTAMP_COLUMN: &str = "timestamp";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Options for loading a log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Stable-sort rows by timestamp after loading
    pub sort_by_timestamp: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            sort_by_timestamp: true,
        }
    }
}

/// Load a log file
pub fn read_log(path: impl AsRef<Path>, options: &ReplayOptions) -> ReplayResult<Vec<RawSample>> {
    let path = path.as_ref();
    let samples = read_samples(File::open(path)?, options)?;
    log::info!("loaded {} rows from {}", samples.len(), path.display());
    Ok(samples)
}

/// Load a log from any reader
pub fn read_samples<R: Read>(reader: R, options: &ReplayOptions) -> ReplayResult<Vec<RawSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let ts_index = headers
        .iter()
        .position(|h| h == TIMESTAMP_COLUMN)
        .ok_or(ReplayError::MissingColumn(TIMESTAMP_COLUMN))?;

    let channels: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(i, name)| *i != ts_index && !OUTPUT_COLUMNS.contains(name))
        .collect();

    let mut samples = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let raw_ts = record.get(ts_index).unwrap_or("");
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| ReplayError::InvalidTimestamp {
            row: row + 1,
            value: raw_ts.to_string(),
        })?;

        let values = channels
            .iter()
            .map(|(i, name)| (*name, record.get(*i).and_then(parse_reading)));
        samples.push(RawSample::from_channels(timestamp, values));
    }

    if options.sort_by_timestamp {
        samples.sort_by_key(|s| s.timestamp);
    }
    Ok(samples)
}

/// Parse a timestamp cell to epoch milliseconds
///
/// Accepts integer epoch milliseconds, RFC 3339, and `YYYY-MM-DD HH:MM:SS[.f]`
/// with either separator. Times without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse().ok();
    }

    let millis = DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .map(|dt| dt.timestamp_millis())
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|naive| naive.and_utc().timestamp_millis())
        })?;

    Timestamp::try_from(millis).ok()
}

fn parse_reading(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
timestamp,RPM,THROTTLE_POS,SPEED,COOLANT_TEMP,driving_style
2024-05-01 08:00:00.600,1500,12,30,85,
2024-05-01 08:00:00.000,800,0,0,84,Passive
2024-05-01 08:00:00.300,,5,12,,
";

    #[test]
    fn parses_and_sorts() {
        let samples = read_samples(LOG.as_bytes(), &ReplayOptions::default()).unwrap();

        assert_eq!(samples.len(), 3);
        let gaps: Vec<u64> = samples
            .windows(2)
            .map(|w| w[1].timestamp - w[0].timestamp)
            .collect();
        assert_eq!(gaps, vec![300, 300]);

        assert_eq!(samples[0].rpm, Some(800.0));
        assert_eq!(samples[1].rpm, None);
        assert_eq!(samples[1].speed_kph, Some(12.0));
        assert_eq!(samples[2].aux.get("COOLANT_TEMP"), Some(&85.0));
        // Text columns never become readings
        assert!(!samples[0].aux.contains_key("driving_style"));
    }

    #[test]
    fn file_order_when_not_sorting() {
        let options = ReplayOptions {
            sort_by_timestamp: false,
        };
        let samples = read_samples(LOG.as_bytes(), &options).unwrap();
        assert_eq!(samples[0].rpm, Some(1500.0));
    }

    #[test]
    fn missing_timestamp_column() {
        let err = read_samples("RPM,SPEED\n800,0\n".as_bytes(), &ReplayOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReplayError::MissingColumn("timestamp")));
    }

    #[test]
    fn bad_timestamp_names_row() {
        let err = read_samples(
            "timestamp,RPM\n1000,800\nlater,900\n".as_bytes(),
            &ReplayOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::InvalidTimestamp { row: 2, .. }));
    }

    #[test]
    fn analyzed_columns_are_skipped() {
        let csv = "timestamp,SPEED,acceleration_g,RPM_roc\n0,10,0.3,900\n";
        let samples = read_samples(csv.as_bytes(), &ReplayOptions::default()).unwrap();
        assert!(samples[0].aux.is_empty());
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(parse_timestamp("1714550400000"), Some(1_714_550_400_000));
        assert_eq!(parse_timestamp("2024-05-01T08:00:00Z"), Some(1_714_550_400_000));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00+02:00"), Some(1_714_550_400_000));
        assert_eq!(parse_timestamp("2024-05-01 08:00:00"), Some(1_714_550_400_000));
        assert_eq!(parse_timestamp("2024-05-01 08:00:00.250"), Some(1_714_550_400_250));
        assert_eq!(
            parse_timestamp("2024-05-01 08:00:00.123456"),
            Some(1_714_550_400_123)
        );
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("1969-12-31 23:59:59"), None);
    }
}
