//! Poll-driven sample streams
//!
//! A live logger does not hand over a slice of samples; it produces one
//! whenever the ECU has answered a full round of PIDs. [`Stream`] models that
//! with `nb` semantics: `WouldBlock` means "nothing yet, poll again", a hard
//! error is wrapped in [`StreamError`], and exhaustion is reported as
//! [`StreamError::EndOfStream`].
//!
//! [`ClassifyingStream`] sits on top of any sample stream and yields one
//! [`ClassifiedSample`] per raw sample, using a [`StreamingSession`].
//!
//! ```
//! use drivelens_core::stream::{ClassifyingStream, MemorySampleStream};
//! use drivelens_core::{ClassifierConfig, RawSample, StreamingSession};
//!
//! let samples = vec![
//!     RawSample::new(0).with_speed(0.0),
//!     RawSample::new(300).with_speed(4.0),
//! ];
//!
//! let session = StreamingSession::new(ClassifierConfig::default())?;
//! let mut stream = ClassifyingStream::new(MemorySampleStream::new(&samples), session);
//! let classified = stream.collect_remaining().unwrap();
//! assert_eq!(classified.len(), 2);
//! # Ok::<(), drivelens_core::ClassifierError>(())
//! ```

use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use crate::errors::ClassifierError;
use crate::sample::{ClassifiedSample, RawSample};
use crate::session::StreamingSession;

/// Errors that can occur while streaming
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Source-level failure (I/O, link loss)
    Transport(E),
    /// Sample rejected by the session
    Classifier(ClassifierError),
    /// No more samples
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Classifier(e) => write!(f, "Classifier error: {}", e),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

/// Non-blocking source of items
pub trait Stream {
    /// Item type produced by the stream
    type Item;

    /// Transport error type
    type Error;

    /// Poll for next item (non-blocking)
    ///
    /// Returns:
    /// - `Ok(item)`: next item available
    /// - `Err(nb::Error::WouldBlock)`: try again later
    /// - `Err(nb::Error::Other(e))`: failure or end of stream
    fn poll_next(&mut self) -> nb::Result<Self::Item, StreamError<Self::Error>>;

    /// Hint about remaining items
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// Replays a slice of recorded samples
#[derive(Debug, Clone)]
pub struct MemorySampleStream<'a> {
    samples: &'a [RawSample],
    position: usize,
}

impl<'a> MemorySampleStream<'a> {
    /// Create new memory stream from slice
    pub fn new(samples: &'a [RawSample]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}

impl<'a> Stream for MemorySampleStream<'a> {
    type Item = RawSample;
    type Error = Infallible;

    fn poll_next(&mut self) -> nb::Result<Self::Item, StreamError<Self::Error>> {
        let sample = self
            .samples
            .get(self.position)
            .ok_or(nb::Error::Other(StreamError::EndOfStream))?;
        self.position += 1;
        Ok(sample.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len() - self.position;
        (remaining, Some(remaining))
    }
}

/// Classifies every sample a source yields
#[derive(Debug)]
pub struct ClassifyingStream<S> {
    source: S,
    session: StreamingSession,
}

impl<S> ClassifyingStream<S>
where
    S: Stream<Item = RawSample>,
{
    /// Wrap `source`, classifying with `session`
    pub fn new(source: S, session: StreamingSession) -> Self {
        Self { source, session }
    }

    /// Session state so far
    pub fn session(&self) -> &StreamingSession {
        &self.session
    }

    /// Give back the source and the session
    pub fn into_parts(self) -> (S, StreamingSession) {
        (self.source, self.session)
    }

    /// Block until the source is exhausted, collecting every classification
    ///
    /// Stops at the first transport or classifier error.
    pub fn collect_remaining(&mut self) -> Result<Vec<ClassifiedSample>, StreamError<S::Error>> {
        let mut out = Vec::with_capacity(self.source.size_hint().0);
        loop {
            match nb::block!(self.poll_next()) {
                Ok(classified) => out.push(classified),
                Err(StreamError::EndOfStream) => return Ok(out),
                Err(e) => return Err(e),
            }
        }
    }
}

impl<S> Stream for ClassifyingStream<S>
where
    S: Stream<Item = RawSample>,
{
    type Item = ClassifiedSample;
    type Error = S::Error;

    fn poll_next(&mut self) -> nb::Result<Self::Item, StreamError<Self::Error>> {
        let raw = self.source.poll_next()?;
        self.session
            .push(&raw)
            .map_err(|e| nb::Error::Other(StreamError::Classifier(e)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}
