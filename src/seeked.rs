//! Navigation by timestamp with on-demand decoding.
//!
//! [`SeekedSource`] keeps no frames around: every call to
//! [`FrameSource::current`] asks the decoder for the frame at the current
//! timestamp using an accurate (non keyframe-snapped) seek.

use crate::{
    decoder::FrameDecoder,
    error::ScrubError,
    frame::Frame,
    source::{FrameSource, Position, Strategy},
};

/// Frame source that decodes the frame at a timestamp on every request.
#[derive(Debug)]
pub struct SeekedSource<D> {
    decoder: D,
    timestamp: f64,
    frames_per_second: f64,
    duration: f64,
}

impl<D: FrameDecoder> SeekedSource<D> {
    /// Create a source at timestamp zero.
    pub fn new(decoder: D, frames_per_second: f64, duration: f64) -> Self {
        Self {
            decoder,
            timestamp: 0.0,
            frames_per_second,
            duration,
        }
    }

    /// Length of one frame in seconds.
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.frames_per_second
    }

    // Forward moves that would reach the end of the video are dropped rather
    // than clamped, so the timestamp always stays strictly below the duration.
    fn move_by(&mut self, seconds: f64) {
        let target = self.timestamp + seconds;
        if !target.is_finite() {
            return;
        }
        if seconds >= 0.0 {
            if target < self.duration {
                self.timestamp = target;
            }
        } else {
            self.timestamp = target.max(0.0);
        }
    }
}

impl<D: FrameDecoder> FrameSource for SeekedSource<D> {
    fn strategy(&self) -> Strategy {
        Strategy::Seeked
    }

    fn position(&self) -> Position {
        Position::Timestamp(self.timestamp)
    }

    fn current(&mut self) -> Result<Frame, ScrubError> {
        self.decoder.frame_at(self.timestamp).map(Frame::Encoded)
    }

    fn step(&mut self, frames: i64) {
        self.move_by(frames as f64 * self.frame_duration());
    }

    fn jump(&mut self, seconds: f64) {
        self.move_by(seconds);
    }

    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}
