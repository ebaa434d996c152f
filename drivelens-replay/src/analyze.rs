//! Running a recorded drive through the classifier

use clap::ValueEnum;
use drivelens_core::stream::{ClassifyingStream, MemorySampleStream, StreamError};
use drivelens_core::{
    BatchPreprocessor, ClassifiedSample, ClassifierConfig, LabelDistribution, RawSample,
    StreamingSession,
};

use crate::error::ReplayResult;

/// Which path a recording is classified through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Derive the whole recording, then classify
    #[default]
    Batch,
    /// Feed samples one at a time through a streaming session
    Stream,
}

/// Classified drive plus its label distribution
#[derive(Debug, Clone)]
pub struct Analysis {
    /// One entry per input sample
    pub samples: Vec<ClassifiedSample>,
    /// Label counts over `samples`
    pub distribution: LabelDistribution,
}

/// Classify `samples` with `config`
///
/// Both modes yield the same labels; `Stream` exercises the live code path.
pub fn analyze(
    samples: &[RawSample],
    config: ClassifierConfig,
    mode: Mode,
) -> ReplayResult<Analysis> {
    let classified = match mode {
        Mode::Batch => BatchPreprocessor::new(config)?.classify(samples)?,
        Mode::Stream => {
            let session = StreamingSession::new(config)?;
            let mut stream = ClassifyingStream::new(MemorySampleStream::new(samples), session);
            match stream.collect_remaining() {
                Ok(classified) => classified,
                Err(StreamError::Classifier(e)) => return Err(e.into()),
                Err(StreamError::Transport(never)) => match never {},
                Err(StreamError::EndOfStream) => Vec::new(),
            }
        }
    };

    let distribution = LabelDistribution::from_samples(&classified);
    log::info!(
        "classified {} samples ({:?} mode)",
        classified.len(),
        mode
    );
    Ok(Analysis {
        samples: classified,
        distribution,
    })
}

/// Classify several recordings, each as its own session
///
/// Derivation and warmup restart at every recording boundary, so logs from
/// separate drives can be merged without one drive's history leaking into
/// the next. The result keeps the recordings in the order given.
pub fn analyze_recordings(
    recordings: &[Vec<RawSample>],
    config: ClassifierConfig,
    mode: Mode,
) -> ReplayResult<Analysis> {
    let mut samples = Vec::with_capacity(recordings.iter().map(Vec::len).sum());
    for recording in recordings {
        samples.extend(analyze(recording, config, mode)?.samples);
    }

    let distribution = LabelDistribution::from_samples(&samples);
    Ok(Analysis {
        samples,
        distribution,
    })
}
