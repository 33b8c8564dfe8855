//! Navigation over a precomputed frame list.
//!
//! [`IndexedSource`] decodes every distinct frame of a short video into a
//! temporary directory once, then moves an index over the sorted file list.
//! The directory lives exactly as long as the source: it is removed by
//! [`FrameSource::release`] or, failing that, when the source is dropped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{
    decoder::FrameDecoder,
    error::ScrubError,
    frame::Frame,
    source::{FrameSource, Position, Strategy},
    utilities::{frame_number, seconds_to_frames},
};

/// Frame source over a list of extracted frame files.
#[derive(Debug)]
pub struct IndexedSource {
    directory: Option<TempDir>,
    frames: Vec<PathBuf>,
    index: usize,
    frames_per_second: f64,
    duration: f64,
}

impl IndexedSource {
    /// Extract every distinct frame with `decoder` into a fresh temporary
    /// directory and build a source over them.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created or listed, or if the decoder
    /// cannot be started. The directory is removed on failure.
    pub fn extract(
        decoder: &dyn FrameDecoder,
        frames_per_second: f64,
        duration: f64,
    ) -> Result<Self, ScrubError> {
        let directory = tempfile::Builder::new().prefix("framescrub-").tempdir()?;
        log::debug!("extracting frames into {}", directory.path().display());

        decoder.extract_all(directory.path())?;
        let frames = list_frames(directory.path())?;
        log::info!("extracted {} distinct frames", frames.len());

        let mut source = Self::from_frames(frames, frames_per_second, duration);
        source.directory = Some(directory);
        Ok(source)
    }

    /// Build a source over frames that already exist on disk. The files are
    /// not owned and are left in place when the source is released.
    pub fn from_frames(frames: Vec<PathBuf>, frames_per_second: f64, duration: f64) -> Self {
        Self {
            directory: None,
            frames,
            index: 0,
            frames_per_second,
            duration,
        }
    }

    /// Number of frames in the list.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if extraction produced no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The temporary extraction directory, until it is released.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_ref().map(TempDir::path)
    }
}

impl FrameSource for IndexedSource {
    fn strategy(&self) -> Strategy {
        Strategy::Indexed
    }

    fn position(&self) -> Position {
        Position::FrameIndex {
            index: self.index,
            total: self.frames.len(),
        }
    }

    fn current(&mut self) -> Result<Frame, ScrubError> {
        self.frames
            .get(self.index)
            .map(|path| Frame::File(path.clone()))
            .ok_or(ScrubError::FrameOutOfRange {
                index: self.index,
                total: self.frames.len(),
            })
    }

    fn step(&mut self, frames: i64) {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return;
        };
        let target = (self.index as i64).saturating_add(frames);
        self.index = target.clamp(0, last as i64) as usize;
    }

    fn jump(&mut self, seconds: f64) {
        let frames = seconds_to_frames(seconds, self.frames_per_second);
        self.step(if seconds < 0.0 { -frames } else { frames });
    }

    fn timestamp(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.index as f64 / self.frames.len() as f64 * self.duration
    }

    fn release(&mut self) -> Result<(), ScrubError> {
        if let Some(directory) = self.directory.take() {
            log::debug!("removing {}", directory.path().display());
            directory.close()?;
        }
        Ok(())
    }
}

/// List the extracted frames in `directory` in presentation order.
///
/// Only `.png` files named `<prefix>_<number>.png` are kept. They are ordered
/// by their number, so `frame_10.png` follows `frame_9.png`.
pub fn list_frames(directory: &Path) -> Result<Vec<PathBuf>, ScrubError> {
    let mut numbered = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.extension().is_none_or(|extension| extension != "png") {
            continue;
        }
        match frame_number(&path) {
            Some(number) => numbered.push((number, path)),
            None => log::warn!("skipping unnumbered frame {}", path.display()),
        }
    }

    numbered.sort_by_key(|(number, _)| *number);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::{IndexedSource, list_frames};
    use crate::source::{FrameSource, Position};

    fn source(total: usize) -> IndexedSource {
        let frames = (0..total)
            .map(|n| PathBuf::from(format!("frame_{n}.png")))
            .collect();
        IndexedSource::from_frames(frames, 30.0, 60.0)
    }

    #[test]
    fn frames_are_listed_numerically() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        for name in ["frame_10.png", "frame_2.png", "frame_1.png", "frame_100.png", "notes.txt"] {
            fs::write(directory.path().join(name), b"").unwrap();
        }

        let names: Vec<String> = list_frames(directory.path())
            .unwrap()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["frame_1.png", "frame_2.png", "frame_10.png", "frame_100.png"]);
    }

    #[test]
    fn step_clamps_at_both_ends() {
        let mut source = source(3);
        source.step(-1);
        assert_eq!(source.position(), Position::FrameIndex { index: 0, total: 3 });
        source.step(10);
        assert_eq!(source.position(), Position::FrameIndex { index: 2, total: 3 });
        source.step(i64::MAX);
        assert_eq!(source.position(), Position::FrameIndex { index: 2, total: 3 });
        source.step(i64::MIN);
        assert_eq!(source.position(), Position::FrameIndex { index: 0, total: 3 });
    }

    #[test]
    fn jump_at_absurd_frame_rate_moves_forward() {
        let frames = (0..5).map(|n| PathBuf::from(format!("frame_{n}.png"))).collect();
        let mut source = IndexedSource::from_frames(frames, 1e300, 60.0);
        source.jump(0.25);
        assert_eq!(source.position(), Position::FrameIndex { index: 4, total: 5 });
        source.jump(-0.25);
        assert_eq!(source.position(), Position::FrameIndex { index: 0, total: 5 });
    }

    #[test]
    fn empty_list_is_out_of_range() {
        let mut source = source(0);
        source.step(1);
        source.jump(0.25);
        let error = source.current().unwrap_err().to_string();
        assert!(error.contains("out of range"), "{error}");
        assert_eq!(source.timestamp(), 0.0);
    }

    #[test]
    fn save_timestamp_is_proportional() {
        let mut source = source(900);
        source.step(450);
        assert!((source.timestamp() - 30.0).abs() < 1e-9);
    }
}
