//! Session configuration.
//!
//! [`ScrubConfig`] is a builder that threads tool locations, strategy
//! thresholds, and output settings through session setup without polluting
//! every function signature.
//!
//! # Example
//!
//! ```no_run
//! use framescrub::ScrubConfig;
//!
//! let config = ScrubConfig::new()
//!     .with_output_directory("stills")
//!     .with_seek_threshold(60.0)
//!     .with_viewer("chafa");
//! ```

use std::path::{Path, PathBuf};

/// Videos at most this long (in seconds) are navigated over a precomputed
/// frame list. Longer videos are decoded on demand.
pub const DEFAULT_SEEK_THRESHOLD_SECONDS: f64 = 120.0;

/// Length of an arrow-key jump, in seconds.
pub const DEFAULT_JUMP_SECONDS: f64 = 0.25;

/// Frame rate assumed when the prober cannot report one.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Configuration for a scrubbing session.
///
/// All fields have sensible defaults: a default-constructed config invokes
/// `ffprobe`, `ffmpeg` and `viu` from `PATH` and saves frames into the
/// current working directory.
#[derive(Debug, Clone)]
pub struct ScrubConfig {
    pub(crate) ffprobe: PathBuf,
    pub(crate) ffmpeg: PathBuf,
    pub(crate) viewer: PathBuf,
    pub(crate) seek_threshold: f64,
    pub(crate) jump_seconds: f64,
    pub(crate) default_frame_rate: f64,
    pub(crate) output_directory: PathBuf,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrubConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self {
            ffprobe: PathBuf::from("ffprobe"),
            ffmpeg: PathBuf::from("ffmpeg"),
            viewer: PathBuf::from("viu"),
            seek_threshold: DEFAULT_SEEK_THRESHOLD_SECONDS,
            jump_seconds: DEFAULT_JUMP_SECONDS,
            default_frame_rate: DEFAULT_FRAME_RATE,
            output_directory: PathBuf::from("."),
        }
    }

    /// Set the `ffprobe` executable used for duration and frame-rate probes.
    #[must_use]
    pub fn with_ffprobe<P: Into<PathBuf>>(mut self, program: P) -> Self {
        self.ffprobe = program.into();
        self
    }

    /// Set the `ffmpeg` executable used for frame extraction.
    #[must_use]
    pub fn with_ffmpeg<P: Into<PathBuf>>(mut self, program: P) -> Self {
        self.ffmpeg = program.into();
        self
    }

    /// Set the terminal image viewer. It must accept either a file path or
    /// `-` (image on standard input) as its only argument, as `viu` does.
    #[must_use]
    pub fn with_viewer<P: Into<PathBuf>>(mut self, program: P) -> Self {
        self.viewer = program.into();
        self
    }

    /// Set the longest duration (seconds) navigated over a precomputed frame
    /// list. Negative values are treated as zero, so every video is seeked.
    #[must_use]
    pub fn with_seek_threshold(mut self, seconds: f64) -> Self {
        self.seek_threshold = seconds.max(0.0);
        self
    }

    /// Set the arrow-key jump length in seconds.
    ///
    /// Non-finite or non-positive values keep the current setting.
    #[must_use]
    pub fn with_jump_seconds(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            self.jump_seconds = seconds;
        }
        self
    }

    /// Set the frame rate assumed when probing fails.
    ///
    /// Non-finite or non-positive values keep the current setting.
    #[must_use]
    pub fn with_default_frame_rate(mut self, frames_per_second: f64) -> Self {
        if frames_per_second.is_finite() && frames_per_second > 0.0 {
            self.default_frame_rate = frames_per_second;
        }
        self
    }

    /// Set the directory saved frames are written to.
    #[must_use]
    pub fn with_output_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.output_directory = directory.into();
        self
    }

    /// The directory saved frames are written to.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// The arrow-key jump length in seconds.
    pub fn jump_seconds(&self) -> f64 {
        self.jump_seconds
    }

    /// The longest duration navigated over a precomputed frame list.
    pub fn seek_threshold(&self) -> f64 {
        self.seek_threshold
    }
}
