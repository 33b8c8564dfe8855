//! Frame extraction through `ffmpeg`.
//!
//! [`FrameDecoder`] is the seam between the frame sources and the external
//! extractor: decode one frame at an exact timestamp, or decode every
//! distinct frame of the video into a directory. [`FfmpegDecoder`] implements
//! it by shelling out to `ffmpeg`.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    config::ScrubConfig,
    error::ScrubError,
    utilities::{capture_stdout, run, seek_argument},
};

/// File name pattern for bulk extraction. The number is the presentation
/// index of the frame and is not zero-padded.
pub const FRAME_FILE_PATTERN: &str = "frame_%d.png";

/// Decodes frames of one video.
pub trait FrameDecoder {
    /// Decode the frame shown at `timestamp` seconds and return it as encoded
    /// PNG bytes.
    fn frame_at(&self, timestamp: f64) -> Result<Vec<u8>, ScrubError>;

    /// Decode every frame that differs from its predecessor into `directory`,
    /// one PNG per frame, named after [`FRAME_FILE_PATTERN`].
    fn extract_all(&self, directory: &Path) -> Result<(), ScrubError>;
}

/// [`FrameDecoder`] backed by the `ffmpeg` command-line tool.
#[derive(Debug, Clone)]
pub struct FfmpegDecoder {
    program: PathBuf,
    video: PathBuf,
}

impl FfmpegDecoder {
    /// Create a decoder for `video` using the `ffmpeg` configured in `config`.
    pub fn new<P: AsRef<Path>>(config: &ScrubConfig, video: P) -> Self {
        Self {
            program: config.ffmpeg.clone(),
            video: video.as_ref().to_path_buf(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        // ffmpeg reads interactive commands from stdin unless told not to,
        // which would swallow keystrokes meant for the session.
        command
            .arg("-nostdin")
            .args(["-loglevel", "error"])
            .stdin(Stdio::null());
        command
    }
}

impl FrameDecoder for FfmpegDecoder {
    fn frame_at(&self, timestamp: f64) -> Result<Vec<u8>, ScrubError> {
        let mut command = self.command();
        command
            .arg("-accurate_seek")
            .args(["-ss", &seek_argument(timestamp)])
            .arg("-i")
            .arg(&self.video)
            .args(["-frames:v", "1"])
            .args(["-f", "image2pipe"])
            .args(["-vcodec", "png"])
            .arg("-");

        let bytes = capture_stdout(&mut command).map_err(|error| match error {
            ScrubError::ToolFailed { stderr, .. } => ScrubError::FrameExtraction {
                timestamp,
                reason: stderr,
            },
            other => other,
        })?;

        if bytes.is_empty() {
            return Err(ScrubError::FrameExtraction {
                timestamp,
                reason: "no frame decoded".to_string(),
            });
        }
        Ok(bytes)
    }

    fn extract_all(&self, directory: &Path) -> Result<(), ScrubError> {
        let mut command = self.command();
        command
            .arg("-i")
            .arg(&self.video)
            .args(["-vf", "mpdecimate"])
            .args(["-vsync", "0"])
            .args(["-frame_pts", "1"])
            .arg(directory.join(FRAME_FILE_PATTERN));

        let output = run(&mut command)?;
        if !output.status.success() {
            // Partial output is still usable; an empty directory is reported
            // by the caller as an out-of-range position.
            log::warn!(
                "ffmpeg exited with {} while extracting frames: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
