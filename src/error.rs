//! Error types for the `framescrub` crate.
//!
//! This module defines [`ScrubError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry the context needed to print
//! a one-line diagnostic: the tool that failed, the video path, the frame
//! index or timestamp involved.

use std::{io::Error as IoError, path::PathBuf, process::ExitStatus};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framescrub` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScrubError {
    /// An external tool could not be started because it is not installed or
    /// not on `PATH`.
    #[error("Could not find `{tool}` (is it installed and on PATH?)")]
    ToolNotFound {
        /// Program name or path that was invoked.
        tool: String,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        /// Program name or path that was invoked.
        tool: String,
        /// Exit status reported by the operating system.
        status: ExitStatus,
        /// Trimmed standard error output, possibly empty.
        stderr: String,
    },

    /// The duration of the video could not be probed.
    #[error("Error getting video duration for {path}: {reason}")]
    DurationProbe {
        /// The video that was probed.
        path: PathBuf,
        /// Underlying reason the probe failed.
        reason: String,
    },

    /// The prober answered with something that is not a usable duration.
    #[error("Invalid video duration {0:?}")]
    InvalidDuration(String),

    /// A single frame could not be extracted at the requested timestamp.
    #[error("Error extracting frame at {timestamp:.3}s: {reason}")]
    FrameExtraction {
        /// Timestamp in seconds that was requested.
        timestamp: f64,
        /// Underlying reason the extraction failed.
        reason: String,
    },

    /// The current frame index is outside of the extracted frame list.
    #[error("Frame index {index} is out of range ({total} frames extracted)")]
    FrameOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of frames in the list.
        total: usize,
    },

    /// The terminal image viewer could not display a frame.
    #[error("Error displaying frame: {0}")]
    Render(String),

    /// Raw mode could not be entered or the keyboard could not be read.
    #[error("Terminal error: {0}")]
    Terminal(IoError),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate while inspecting a frame.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),
}
