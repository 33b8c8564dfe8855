//! Frame sources: where the frame on screen comes from.
//!
//! A [`FrameSource`] owns the current position in the video and knows how to
//! produce the frame at that position and how to move it. There are two
//! strategies, chosen once per session from the video's duration:
//!
//! - [`IndexedSource`](crate::indexed::IndexedSource) extracts every distinct
//!   frame up front and moves over the resulting list. Used for short videos.
//! - [`SeekedSource`](crate::seeked::SeekedSource) keeps a timestamp and
//!   decodes the frame there on demand. Used for long videos.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{error::ScrubError, frame::Frame};

/// Which navigation strategy a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Navigate a precomputed, deduplicated frame list.
    Indexed,
    /// Navigate by timestamp, decoding on demand.
    Seeked,
}

impl Strategy {
    /// Pick the strategy for a video of `duration` seconds: indexed up to and
    /// including `threshold`, seeked beyond it.
    pub fn for_duration(duration: f64, threshold: f64) -> Self {
        if duration <= threshold {
            Strategy::Indexed
        } else {
            Strategy::Seeked
        }
    }

    /// Lowercase name, as used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Indexed => "indexed",
            Strategy::Seeked => "seeked",
        }
    }
}

/// Current position of a frame source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Zero-based index into a frame list of `total` frames.
    FrameIndex {
        /// Current index.
        index: usize,
        /// Length of the frame list.
        total: usize,
    },
    /// Seconds from the start of the video.
    Timestamp(f64),
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Position::FrameIndex { index, total } => {
                write!(f, "Current frame: {}/{}", index + 1, total)
            }
            Position::Timestamp(seconds) => write!(f, "Current timestamp: {seconds:.3}s"),
        }
    }
}

/// A navigable supply of frames.
///
/// Movement never fails: requests that would leave the valid range stop at
/// its edge (or do not move at all, for the forward edge of a seeked source).
pub trait FrameSource {
    /// The strategy this source implements.
    fn strategy(&self) -> Strategy;

    /// The current position.
    fn position(&self) -> Position;

    /// The frame at the current position.
    ///
    /// # Errors
    ///
    /// Indexed sources return [`ScrubError::FrameOutOfRange`] when the list is
    /// empty; seeked sources return whatever the decoder reports.
    fn current(&mut self) -> Result<Frame, ScrubError>;

    /// Move by `frames` frames (negative moves back).
    fn step(&mut self, frames: i64);

    /// Move by `seconds` (negative moves back).
    fn jump(&mut self, seconds: f64);

    /// Position of the current frame in seconds, used to name saved frames.
    fn timestamp(&self) -> f64;

    /// Release any storage held by the source. Called once when the session
    /// ends; sources must also release on drop.
    fn release(&mut self) -> Result<(), ScrubError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, Strategy};

    #[test]
    fn two_minutes_is_still_indexed() {
        assert_eq!(Strategy::for_duration(60.0, 120.0), Strategy::Indexed);
        assert_eq!(Strategy::for_duration(120.0, 120.0), Strategy::Indexed);
        assert_eq!(Strategy::for_duration(120.001, 120.0), Strategy::Seeked);
    }

    #[test]
    fn position_indicator() {
        let index = Position::FrameIndex { index: 0, total: 900 };
        assert_eq!(index.to_string(), "Current frame: 1/900");
        assert_eq!(
            Position::Timestamp(1.0 / 29.97).to_string(),
            "Current timestamp: 0.033s"
        );
    }
}
