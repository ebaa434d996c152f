//! Live, one-sample-at-a-time classification
//!
//! A `StreamingSession` is the whole engine for one drive: a
//! [`ChannelDeriver`] feeding a [`BehaviorClassifier`]. Create one at
//! session start, push samples as the poll loop produces them, drop it (or
//! [`reset`](StreamingSession::reset)) at session end.
//!
//! Sessions share nothing, so any number can run side by side, and a session
//! may be moved to another thread between pushes.

use crate::classifier::{BehaviorClassifier, ClassifierConfig, ClassifierState};
use crate::deriver::ChannelDeriver;
use crate::errors::ClassifierResult;
use crate::sample::{ClassifiedSample, RawSample};

/// Streaming classifier for one session
#[derive(Debug, Clone)]
pub struct StreamingSession {
    deriver: ChannelDeriver,
    classifier: BehaviorClassifier,
}

impl StreamingSession {
    /// Start a session; fails if `config` does not validate
    pub fn new(config: ClassifierConfig) -> ClassifierResult<Self> {
        Ok(Self {
            deriver: ChannelDeriver::new(),
            classifier: BehaviorClassifier::new(config)?,
        })
    }

    /// Classify the next sample
    ///
    /// On [`NonMonotonicTimestamp`](crate::ClassifierError::NonMonotonicTimestamp)
    /// nothing in the session changes; the caller may drop the sample and
    /// keep pushing.
    pub fn push(&mut self, raw: &RawSample) -> ClassifierResult<ClassifiedSample> {
        let derived = self.deriver.derive(raw)?;
        Ok(self.classifier.step(derived))
    }

    /// Samples accepted since the session started
    pub fn samples_seen(&self) -> usize {
        self.deriver.samples_seen()
    }

    /// Classifier state after the last accepted sample
    pub fn state(&self) -> &ClassifierState {
        self.classifier.state()
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        self.classifier.config()
    }

    /// Start over as a fresh session with the same configuration
    pub fn reset(&mut self) {
        self.deriver.reset();
        self.classifier.reset();
    }
}
