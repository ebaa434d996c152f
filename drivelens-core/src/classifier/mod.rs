//! Stateful behavior classifier
//!
//! [`BehaviorClassifier`] owns one session's [`ClassifierState`] and turns a
//! sequence of [`DerivedSample`]s into [`ClassifiedSample`]s. It does not look
//! at timestamps; ordering is enforced by the deriver upstream.
//!
//! ## Per-sample step
//!
//! ```text
//! sample ─► window.push ─► snapshot ─┬─► classify_road    ─┐
//!                                    ├─► classify_traffic ─┼─► labels
//!           detect_trigger ─► next_style (state) ──────────┘
//! ```
//!
//! While fewer than `min_samples` samples have been seen (current included)
//! the window still fills but every label is `Unknown`.

pub mod config;
pub mod road;
pub mod style;
pub mod traffic;

pub use config::{
    ClassifierConfig, Hysteresis, RoadThresholds, ShortWindowSpike, StyleThresholds,
    TrafficThresholds,
};
pub use road::{classify_road, RoadType};
pub use style::{detect_trigger, next_style, AggressiveTrigger, DrivingStyle, StyleTransition};
pub use traffic::{classify_traffic, TrafficCondition};

use crate::errors::ClassifierResult;
use crate::sample::{ClassifiedSample, DerivedSample};
use crate::window::RollingWindowStore;

/// The three labels attached to every sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorLabels {
    /// Driving style
    pub style: DrivingStyle,
    /// Road type
    pub road: RoadType,
    /// Traffic condition
    pub traffic: TrafficCondition,
}

impl BehaviorLabels {
    /// All three labels `Unknown`
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Mutable per-session classifier state
#[derive(Debug, Clone)]
pub struct ClassifierState {
    current_style: DrivingStyle,
    cooldown_remaining: u32,
    samples_seen: usize,
    window: RollingWindowStore,
}

impl ClassifierState {
    fn new(window_size: usize) -> ClassifierResult<Self> {
        Ok(Self {
            current_style: DrivingStyle::Unknown,
            cooldown_remaining: 0,
            samples_seen: 0,
            window: RollingWindowStore::new(window_size)?,
        })
    }

    /// Style emitted for the most recent sample
    pub fn current_style(&self) -> DrivingStyle {
        self.current_style
    }

    /// Cooldown samples still to run (always 0 under RPM hold)
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    /// Samples classified since the session started
    pub fn samples_seen(&self) -> usize {
        self.samples_seen
    }

    /// Rolling channel history
    pub fn window(&self) -> &RollingWindowStore {
        &self.window
    }

    fn clear(&mut self) {
        self.current_style = DrivingStyle::Unknown;
        self.cooldown_remaining = 0;
        self.samples_seen = 0;
        self.window.clear();
    }
}

/// Classifier for one session
#[derive(Debug, Clone)]
pub struct BehaviorClassifier {
    config: ClassifierConfig,
    state: ClassifierState,
}

impl BehaviorClassifier {
    /// Create a classifier after validating `config`
    pub fn new(config: ClassifierConfig) -> ClassifierResult<Self> {
        config.validate()?;
        Ok(Self {
            state: ClassifierState::new(config.window_size)?,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Classify one sample and advance the state
    pub fn step(&mut self, sample: DerivedSample) -> ClassifiedSample {
        let state = &mut self.state;
        let config = &self.config;

        state.samples_seen = state.samples_seen.saturating_add(1);
        state
            .window
            .push(sample.rpm, sample.throttle_pct, sample.speed_kph);
        let window = state.window.snapshot(&config.road, &config.traffic);

        if state.samples_seen < config.min_samples {
            state.current_style = DrivingStyle::Unknown;
            return ClassifiedSample {
                sample,
                labels: BehaviorLabels::unknown(),
                window,
            };
        }

        let trigger = detect_trigger(&sample, &state.window, config);
        let transition = next_style(
            state.current_style,
            state.cooldown_remaining,
            trigger,
            &sample,
            config,
        );

        if transition.style != state.current_style {
            log_debug!(
                "style {} -> {} at {} ms (trigger: {:?})",
                state.current_style,
                transition.style,
                sample.timestamp(),
                trigger
            );
        }
        state.current_style = transition.style;
        state.cooldown_remaining = transition.cooldown_remaining;

        let labels = BehaviorLabels {
            style: transition.style,
            road: classify_road(&window, &config.road),
            traffic: classify_traffic(&window, &config.traffic),
        };

        ClassifiedSample {
            sample,
            labels,
            window,
        }
    }

    /// Return to the start-of-session state
    pub fn reset(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::RawSample;

    fn moving(rpm: f64, throttle: f64, speed: f64) -> DerivedSample {
        DerivedSample {
            raw: RawSample::new(0),
            rpm,
            throttle_pct: throttle,
            speed_kph: speed,
            delta_time_s: 1.0,
            speed_mps: speed / 3.6,
            accel_mps2: 0.0,
            accel_g: 0.0,
            rpm_roc: 0.0,
            throttle_roc: 0.0,
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ClassifierConfig::default().with_window_size(0);
        assert!(BehaviorClassifier::new(config).is_err());
    }

    #[test]
    fn unknown_during_warmup() {
        let mut classifier = BehaviorClassifier::new(ClassifierConfig::default()).unwrap();

        for i in 1..10 {
            let out = classifier.step(moving(3_000.0, 60.0, 50.0));
            assert_eq!(out.labels, BehaviorLabels::unknown(), "sample {}", i);
        }
        // Tenth sample is the first classified one
        let out = classifier.step(moving(3_000.0, 60.0, 50.0));
        assert_eq!(out.style(), DrivingStyle::Aggressive);
        assert_eq!(out.road(), RoadType::Local);
        assert_eq!(classifier.state().samples_seen(), 10);
    }

    #[test]
    fn window_fills_during_warmup() {
        let mut classifier = BehaviorClassifier::new(ClassifierConfig::default()).unwrap();
        for _ in 0..5 {
            classifier.step(moving(1_000.0, 5.0, 0.0));
        }
        let out = classifier.step(moving(1_000.0, 5.0, 0.0));
        assert_eq!(out.window.samples, 6);
        assert_eq!(out.window.stop_ratio, 1.0);
    }

    #[test]
    fn reset_restarts_warmup() {
        let config = ClassifierConfig::default().with_min_samples(2);
        let mut classifier = BehaviorClassifier::new(config).unwrap();
        classifier.step(moving(1_000.0, 5.0, 30.0));
        classifier.step(moving(1_000.0, 5.0, 30.0));
        assert_eq!(classifier.state().current_style(), DrivingStyle::Passive);

        classifier.reset();
        assert_eq!(classifier.state().samples_seen(), 0);
        assert!(classifier.state().window().is_empty());
        let out = classifier.step(moving(1_000.0, 5.0, 30.0));
        assert_eq!(out.style(), DrivingStyle::Unknown);
    }

    #[test]
    fn short_burst_is_not_highway() {
        let config = ClassifierConfig::default().with_min_samples(2);
        let mut classifier = BehaviorClassifier::new(config).unwrap();

        classifier.step(moving(2_200.0, 18.0, 100.0));
        let out = classifier.step(moving(2_200.0, 18.0, 100.0));
        assert_eq!(out.window.highway_ratio, 0.2);
        assert_eq!(out.road(), RoadType::Main);

        for _ in 0..4 {
            classifier.step(moving(2_200.0, 18.0, 100.0));
        }
        // seven of the last ten
        let out = classifier.step(moving(2_200.0, 18.0, 100.0));
        assert_eq!(out.road(), RoadType::Highway);
    }

    #[test]
    fn cooldown_state_is_tracked() {
        let config = ClassifierConfig::live().with_min_samples(1);
        let mut classifier = BehaviorClassifier::new(config).unwrap();

        classifier.step(moving(3_000.0, 60.0, 50.0));
        assert_eq!(classifier.state().cooldown_remaining(), 14);
        classifier.step(moving(800.0, 0.0, 30.0));
        assert_eq!(classifier.state().cooldown_remaining(), 13);
        assert_eq!(classifier.state().current_style(), DrivingStyle::Aggressive);
    }
}
