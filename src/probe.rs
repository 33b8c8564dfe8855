//! Duration and frame-rate probing through `ffprobe`.
//!
//! [`MediaProbe`] asks the prober for exactly two values. The duration is
//! load-bearing (it selects the navigation strategy), so failing to read it is
//! an error. The frame rate only affects step granularity, so any failure
//! falls back to [`DEFAULT_FRAME_RATE`](crate::config::DEFAULT_FRAME_RATE).
//!
//! # Example
//!
//! ```no_run
//! use framescrub::{MediaProbe, ScrubConfig};
//!
//! let probe = MediaProbe::new(&ScrubConfig::new(), "input.mp4");
//! let duration = probe.duration()?;
//! let fps = probe.frame_rate();
//! println!("{duration:.3}s @ {fps:.2} fps");
//! # Ok::<(), framescrub::ScrubError>(())
//! ```

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{config::ScrubConfig, error::ScrubError, utilities::capture_stdout};

/// Probes a single video with an external `ffprobe` executable.
#[derive(Debug, Clone)]
pub struct MediaProbe {
    program: PathBuf,
    video: PathBuf,
    default_frame_rate: f64,
}

impl MediaProbe {
    /// Create a probe for `video` using the prober configured in `config`.
    pub fn new<P: AsRef<Path>>(config: &ScrubConfig, video: P) -> Self {
        Self {
            program: config.ffprobe.clone(),
            video: video.as_ref().to_path_buf(),
            default_frame_rate: config.default_frame_rate,
        }
    }

    /// The video this probe inspects.
    pub fn video(&self) -> &Path {
        &self.video
    }

    /// Probe the container duration in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::ToolNotFound`] if the prober cannot be started,
    /// [`ScrubError::DurationProbe`] if it fails, and
    /// [`ScrubError::InvalidDuration`] if its answer is not a non-negative
    /// number.
    pub fn duration(&self) -> Result<f64, ScrubError> {
        let mut command = self.command();
        command
            .args(["-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(&self.video);

        let stdout = capture_stdout(&mut command).map_err(|error| match error {
            ScrubError::ToolFailed { stderr, .. } => ScrubError::DurationProbe {
                path: self.video.clone(),
                reason: stderr,
            },
            other => other,
        })?;

        let duration = parse_duration(&String::from_utf8_lossy(&stdout))?;
        log::debug!("{} lasts {duration:.3}s", self.video.display());
        Ok(duration)
    }

    /// Probe the frame rate of the primary video stream.
    ///
    /// Never fails: an unavailable prober, an empty answer or an unparseable
    /// answer all yield the configured default (30 fps unless changed).
    pub fn frame_rate(&self) -> f64 {
        let mut command = self.command();
        command
            .args(["-select_streams", "v:0"])
            .args(["-show_entries", "stream=r_frame_rate"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(&self.video);

        let output = match capture_stdout(&mut command) {
            Ok(stdout) => String::from_utf8_lossy(&stdout).into_owned(),
            Err(error) => {
                log::warn!("Error getting video framerate: {error}");
                return self.default_frame_rate;
            }
        };

        match parse_frame_rate(&output) {
            Some(frames_per_second) => {
                log::debug!("{} runs at {frames_per_second:.3} fps", self.video.display());
                frames_per_second
            }
            None => {
                log::warn!(
                    "unusable frame rate {:?}, assuming {} fps",
                    output.trim(),
                    self.default_frame_rate
                );
                self.default_frame_rate
            }
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(["-v", "error"]);
        command
    }
}

/// Parse the prober's duration answer: a single decimal number of seconds.
///
/// # Errors
///
/// Returns [`ScrubError::InvalidDuration`] for empty, non-numeric, negative
/// or non-finite input.
pub fn parse_duration(output: &str) -> Result<f64, ScrubError> {
    let text = first_line(output);
    match text.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(ScrubError::InvalidDuration(text.to_string())),
    }
}

/// Parse the prober's frame-rate answer, either a ratio `N/D` or a plain
/// number.
///
/// Returns `None` when the answer is empty, malformed, has a zero
/// denominator, or is not a positive finite rate.
pub fn parse_frame_rate(output: &str) -> Option<f64> {
    let text = first_line(output);
    if text.is_empty() {
        return None;
    }

    let rate = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().ok()?;
            let denominator: f64 = denominator.trim().parse().ok()?;
            numerator / denominator
        }
        None => text.parse().ok()?,
    };

    (rate.is_finite() && rate > 0.0).then_some(rate)
}

fn first_line(output: &str) -> &str {
    output.trim().lines().next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::{parse_duration, parse_frame_rate};

    #[test]
    fn frame_rate_ratio() {
        let rate = parse_frame_rate("30000/1001\n").unwrap();
        assert!((rate - 29.97).abs() < 0.001, "got {rate}");
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
    }

    #[test]
    fn frame_rate_plain_number() {
        assert_eq!(parse_frame_rate("24"), Some(24.0));
        assert_eq!(parse_frame_rate(" 59.94 \n"), Some(59.94));
    }

    #[test]
    fn frame_rate_unusable_answers() {
        assert_eq!(parse_frame_rate(""), None);
        assert_eq!(parse_frame_rate("\n"), None);
        assert_eq!(parse_frame_rate("N/A"), None);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("30/0"), None);
        assert_eq!(parse_frame_rate("-25"), None);
    }

    #[test]
    fn duration_values() {
        assert_eq!(parse_duration("60.000000\n").unwrap(), 60.0);
        assert_eq!(parse_duration("0").unwrap(), 0.0);
    }

    #[test]
    fn duration_rejects_garbage() {
        for answer in ["", "N/A", "-3.5", "inf"] {
            let error = parse_duration(answer).unwrap_err().to_string();
            assert!(error.contains("Invalid video duration"), "{answer:?}: {error}");
        }
    }
}
