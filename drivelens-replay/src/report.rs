//! Plain-text analysis summary

use std::fmt::Write;

use drivelens_core::summary::LabelRow;
use drivelens_core::{ClassifiedSample, LabelDistribution};

use crate::writer::format_timestamp;

/// Style, road and traffic distribution tables
pub fn format_summary(distribution: &LabelDistribution) -> String {
    let mut out = String::from("--- Analysis Summary ---\n");
    for (title, rows) in [
        ("Driving Style Distribution", distribution.style_rows()),
        ("Road Type Distribution", distribution.road_rows()),
        ("Traffic Condition Distribution", distribution.traffic_rows()),
    ] {
        out.push('\n');
        format_table(&mut out, title, &rows);
    }
    out
}

fn format_table(out: &mut String, title: &str, rows: &[LabelRow]) {
    let _ = writeln!(out, "{}:", title);
    let _ = writeln!(out, "{:<12} {:>8} {:>11}", "", "Count", "Percentage");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>10.2}%",
            row.label, row.count, row.percentage
        );
    }
}

/// Key columns of the first `n` analyzed rows
pub fn format_head(samples: &[ClassifiedSample], n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<23} {:>7} {:>7} {:>12} {:>8} {:<11} {:<8} {:<8}",
        "timestamp", "SPEED", "RPM", "THROTTLE_POS", "accel_g", "style", "road", "traffic"
    );
    for c in samples.iter().take(n) {
        let d = &c.sample;
        let _ = writeln!(
            out,
            "{:<23} {:>7.1} {:>7.0} {:>12.1} {:>8.3} {:<11} {:<8} {:<8}",
            format_timestamp(d.timestamp()),
            d.speed_kph,
            d.rpm,
            d.throttle_pct,
            d.accel_g,
            c.style(),
            c.road(),
            c.traffic()
        );
    }
    out
}
