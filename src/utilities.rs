//! Internal utility functions.
//!
//! Helpers for running external tools and for the small pieces of
//! timestamp and path arithmetic shared by the frame sources.

use std::{
    io::ErrorKind,
    path::Path,
    process::{Command, Output},
};

use crate::error::ScrubError;

/// Run a command to completion and return its standard output.
///
/// A missing executable maps to [`ScrubError::ToolNotFound`] and a non-zero
/// exit to [`ScrubError::ToolFailed`] carrying the tool's stderr.
pub(crate) fn capture_stdout(command: &mut Command) -> Result<Vec<u8>, ScrubError> {
    let output = run(command)?;
    if !output.status.success() {
        return Err(ScrubError::ToolFailed {
            tool: program_name(command),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// Run a command to completion, returning its output whatever the exit status.
pub(crate) fn run(command: &mut Command) -> Result<Output, ScrubError> {
    log::debug!("running {command:?}");
    command.output().map_err(|error| spawn_error(command, error))
}

/// Map a spawn failure to the matching [`ScrubError`] variant.
pub(crate) fn spawn_error(command: &Command, error: std::io::Error) -> ScrubError {
    if error.kind() == ErrorKind::NotFound {
        ScrubError::ToolNotFound {
            tool: program_name(command),
        }
    } else {
        ScrubError::Io(error)
    }
}

fn program_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}

/// Format a timestamp the way ffmpeg's `-ss` option expects it.
pub(crate) fn seek_argument(seconds: f64) -> String {
    format!("{:.6}", seconds.max(0.0))
}

/// Extract the numeric index from an extracted frame file name such as
/// `frame_42.png`.
///
/// Returns `None` for names without a trailing `_<digits>` stem.
pub fn frame_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let (_, digits) = stem.rsplit_once('_')?;
    digits.parse().ok()
}

/// Convert a duration in seconds to a whole number of frames, never less
/// than one.
///
/// Counts too large for an `i64` saturate at `i64::MAX`.
pub fn seconds_to_frames(seconds: f64, frames_per_second: f64) -> i64 {
    let frames = (frames_per_second * seconds.abs()).round();
    if frames.is_nan() || frames < 1.0 {
        1
    } else {
        frames.min(i64::MAX as f64) as i64
    }
}
