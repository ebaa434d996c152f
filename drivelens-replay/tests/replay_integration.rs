//! Replay of a recorded drive, end to end
//!
//! `fixtures/city_drive.csv` is 50 polls at 300 ms:
//!
//! | rows    | what happens                                   |
//! |---------|------------------------------------------------|
//! | 0..12   | idling at a light                              |
//! | 12..20  | pulling away (sharp rev rise on row 12)        |
//! | 20..23  | flat-out pull, 3300 rpm at 72% throttle        |
//! | 23..38  | 55 km/h cruise (RPM missing on rows 17 and 30) |
//! | 38..45  | hard stop, ~0.66 g                             |
//! | 45..50  | stopped                                        |

use std::path::PathBuf;
use std::process::Command;

use drivelens_core::{DrivingStyle, RoadType, TrafficCondition};
use drivelens_replay::{
    analyze, read_log, read_samples, write_analyzed, Mode, Preset, ReplayOptions,
};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("city_drive.csv")
}

fn aggressive_rows(styles: &[DrivingStyle]) -> Vec<usize> {
    styles
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == DrivingStyle::Aggressive)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn default_preset_labels() {
    let samples = read_log(fixture(), &ReplayOptions::default()).unwrap();
    assert_eq!(samples.len(), 50);

    let analysis = analyze(&samples, Preset::Default.config(), Mode::Batch).unwrap();
    let styles: Vec<DrivingStyle> = analysis.samples.iter().map(|c| c.style()).collect();

    assert!(styles[..9].iter().all(|s| *s == DrivingStyle::Unknown));
    let expected: Vec<usize> = [12].into_iter().chain(20..23).chain(38..45).collect();
    assert_eq!(aggressive_rows(&styles), expected);

    let dist = &analysis.distribution;
    assert_eq!(dist.total(), 50);
    assert_eq!(dist.style_count(DrivingStyle::Aggressive), 11);
    assert_eq!(dist.style_count(DrivingStyle::Passive), 30);

    let cruise = &analysis.samples[37];
    assert_eq!(cruise.road(), RoadType::Local);
    assert_eq!(cruise.traffic(), TrafficCondition::Light);

    let stopped = analysis.samples.last().unwrap();
    assert_eq!(stopped.road(), RoadType::Local);
    assert_eq!(stopped.traffic(), TrafficCondition::Moderate);
}

#[test]
fn live_preset_holds_through_cooldown() {
    let samples = read_log(fixture(), &ReplayOptions::default()).unwrap();
    let analysis = analyze(&samples, Preset::Live.config(), Mode::Stream).unwrap();
    let styles: Vec<DrivingStyle> = analysis.samples.iter().map(|c| c.style()).collect();

    let expected: Vec<usize> = (12..27).chain(38..50).collect();
    assert_eq!(aggressive_rows(&styles), expected);
}

#[test]
fn missing_rpm_is_forward_filled() {
    let samples = read_log(fixture(), &ReplayOptions::default()).unwrap();
    assert_eq!(samples[17].rpm, None);

    let analysis = analyze(&samples, Preset::Default.config(), Mode::Batch).unwrap();
    assert_eq!(analysis.samples[17].sample.rpm, 1_500.0);
    assert_eq!(analysis.samples[30].sample.rpm, 1_700.0);
    assert_eq!(analysis.samples[30].sample.rpm_roc, 0.0);
}

#[test]
fn analyzed_file_can_be_reanalyzed() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("city_drive_analyzed.csv");

    let samples = read_log(fixture(), &ReplayOptions::default()).unwrap();
    let first = analyze(&samples, Preset::Default.config(), Mode::Batch).unwrap();
    write_analyzed(&out, &first.samples).unwrap();

    let reloaded = read_log(&out, &ReplayOptions::default()).unwrap();
    assert_eq!(reloaded.len(), 50);
    assert_eq!(reloaded[0].timestamp, samples[0].timestamp);
    assert!(reloaded[0].aux.contains_key("COOLANT_TEMP"));
    assert!(!reloaded[0].aux.contains_key("acceleration_g"));

    let second = analyze(&reloaded, Preset::Default.config(), Mode::Batch).unwrap();
    assert_eq!(first.distribution, second.distribution);
}

#[test]
fn epoch_millisecond_logs() {
    let csv = "\
timestamp,RPM,THROTTLE_POS,SPEED
1714550400000,800,0,0
1714550401000,3000,60,12
";
    let samples = read_samples(csv.as_bytes(), &ReplayOptions::default()).unwrap();
    let config = Preset::Default.config().with_min_samples(1);
    let analysis = analyze(&samples, config, Mode::Batch).unwrap();

    assert_eq!(analysis.samples[1].sample.delta_time_s, 1.0);
    assert_eq!(analysis.samples[1].style(), DrivingStyle::Aggressive);
}

#[test]
fn command_line_writes_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("analyzed.csv");

    let status = Command::new(env!("CARGO_BIN_EXE_drivelens-analyze"))
        .arg(fixture())
        .arg("--output-csv")
        .arg(&out)
        .args(["--preset", "live", "--mode", "stream"])
        .status()
        .unwrap();
    assert!(status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 51);
    assert!(text.lines().next().unwrap().ends_with("traffic_condition_analyzed"));
}

#[test]
fn config_file_overrides_preset_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"min_samples": 1}"#).unwrap();
    let out = dir.path().join("analyzed.csv");

    let status = Command::new(env!("CARGO_BIN_EXE_drivelens-analyze"))
        .env("DRIVELENS_PRESET", "live")
        .arg(fixture())
        .arg("--config")
        .arg(&config)
        .arg("--output-csv")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    // no warmup, so the first idle row is already labelled
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.lines().nth(1).unwrap().ends_with("Passive,Unknown,Heavy"));
}

#[test]
fn command_line_takes_several_drives() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("merged.csv");

    let status = Command::new(env!("CARGO_BIN_EXE_drivelens-analyze"))
        .arg(fixture())
        .arg(fixture())
        .arg("--output-csv")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 100);
    // the second drive warms up again
    assert!(rows[50].ends_with("Unknown,Unknown,Unknown"));
    assert_eq!(rows[..50], rows[50..]);
}

#[test]
fn command_line_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_drivelens-analyze"))
        .arg(dir.path().join("absent.csv"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.csv"));
}
