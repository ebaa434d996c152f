//! Whole-recording classification
//!
//! The batch path derives every channel first, with pairwise differences
//! across the full recording, then runs the classifier over the derived
//! samples in order. Both passes use the same deriver and the same
//! per-sample step as [`StreamingSession`](crate::StreamingSession), so a
//! recording classified here and the same samples pushed live produce the
//! same labels.

use alloc::vec::Vec;

use crate::classifier::{BehaviorClassifier, ClassifierConfig};
use crate::deriver::derive_batch;
use crate::errors::ClassifierResult;
use crate::sample::{ClassifiedSample, DerivedSample, RawSample};

/// Batch preprocessor and classifier
#[derive(Debug, Clone)]
pub struct BatchPreprocessor {
    config: ClassifierConfig,
}

impl BatchPreprocessor {
    /// Create a preprocessor; fails if `config` does not validate
    pub fn new(config: ClassifierConfig) -> ClassifierResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Derive channels only
    pub fn derive(&self, samples: &[RawSample]) -> ClassifierResult<Vec<DerivedSample>> {
        derive_batch(samples)
    }

    /// Derive channels and classify every sample
    ///
    /// `samples` must be in non-decreasing timestamp order.
    pub fn classify(&self, samples: &[RawSample]) -> ClassifierResult<Vec<ClassifiedSample>> {
        let derived = self.derive(samples)?;
        let mut classifier = BehaviorClassifier::new(self.config)?;
        let classified: Vec<ClassifiedSample> =
            derived.into_iter().map(|d| classifier.step(d)).collect();

        log_debug!("classified {} samples", classified.len());
        Ok(classified)
    }
}
