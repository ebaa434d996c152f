//! Label distribution over a classified drive
//!
//! Counts each style, road and traffic label and reports them as the analyzer
//! prints them: one row per label that occurred, most frequent first, with
//! the share of all samples in percent.

use alloc::vec::Vec;

use crate::classifier::{BehaviorLabels, DrivingStyle, RoadType, TrafficCondition};
use crate::sample::ClassifiedSample;

/// One line of a distribution table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRow {
    /// Label string
    pub label: &'static str,
    /// Samples with this label
    pub count: usize,
    /// `count` as a percentage of all samples
    pub percentage: f64,
}

/// Per-label counts for a drive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelDistribution {
    total: usize,
    style: [usize; 4],
    road: [usize; 4],
    traffic: [usize; 4],
}

impl LabelDistribution {
    /// Empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every sample's labels
    pub fn from_samples(samples: &[ClassifiedSample]) -> Self {
        let mut dist = Self::new();
        for s in samples {
            dist.record(&s.labels);
        }
        dist
    }

    /// Count one sample
    pub fn record(&mut self, labels: &BehaviorLabels) {
        self.total += 1;
        self.style[labels.style as usize] += 1;
        self.road[labels.road as usize] += 1;
        self.traffic[labels.traffic as usize] += 1;
    }

    /// Samples counted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Samples with driving style `style`
    pub fn style_count(&self, style: DrivingStyle) -> usize {
        self.style[style as usize]
    }

    /// Samples with road type `road`
    pub fn road_count(&self, road: RoadType) -> usize {
        self.road[road as usize]
    }

    /// Samples with traffic condition `traffic`
    pub fn traffic_count(&self, traffic: TrafficCondition) -> usize {
        self.traffic[traffic as usize]
    }

    /// Driving-style table
    pub fn style_rows(&self) -> Vec<LabelRow> {
        self.rows(DrivingStyle::ALL.iter().map(|s| (s.as_str(), self.style_count(*s))))
    }

    /// Road-type table
    pub fn road_rows(&self) -> Vec<LabelRow> {
        self.rows(RoadType::ALL.iter().map(|r| (r.as_str(), self.road_count(*r))))
    }

    /// Traffic table
    pub fn traffic_rows(&self) -> Vec<LabelRow> {
        self.rows(
            TrafficCondition::ALL
                .iter()
                .map(|t| (t.as_str(), self.traffic_count(*t))),
        )
    }

    fn rows(&self, counts: impl Iterator<Item = (&'static str, usize)>) -> Vec<LabelRow> {
        let total = self.total;
        let mut rows: Vec<LabelRow> = counts
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| LabelRow {
                label,
                count,
                percentage: count as f64 * 100.0 / total as f64,
            })
            .collect();
        // Stable: ties keep report order
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }
}
