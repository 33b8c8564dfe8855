//! Frames on screen and frames saved to disk.

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::ImageReader;

use crate::error::ScrubError;

/// One visual frame, as produced by a frame source.
///
/// Seeked sources decode frames on demand and hand back the encoded PNG
/// bytes; indexed sources point at a file in their extraction directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// An encoded image held in memory.
    Encoded(Vec<u8>),
    /// An encoded image file on disk.
    File(PathBuf),
}

impl Frame {
    /// Pixel dimensions `(width, height)`, read from the image header.
    ///
    /// Returns `None` when the image cannot be recognised; callers use this
    /// for display only.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let result = match self {
            Frame::Encoded(bytes) => ImageReader::new(Cursor::new(bytes))
                .with_guessed_format()
                .map_err(ScrubError::from)
                .and_then(|reader| reader.into_dimensions().map_err(ScrubError::from)),
            Frame::File(path) => image::image_dimensions(path).map_err(ScrubError::from),
        };

        match result {
            Ok(dimensions) => Some(dimensions),
            Err(error) => {
                log::debug!("could not read frame dimensions: {error}");
                None
            }
        }
    }

    /// Write the frame to `destination`, replacing any existing file.
    pub fn save_to(&self, destination: &Path) -> Result<(), ScrubError> {
        match self {
            Frame::Encoded(bytes) => fs::write(destination, bytes)?,
            Frame::File(source) => {
                fs::copy(source, destination)?;
            }
        }
        Ok(())
    }
}

/// A frame the user saved during the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFrame {
    /// File name, `frame_<seconds>.png` with millisecond precision.
    pub filename: String,
    /// Where the file was written.
    pub path: PathBuf,
    /// Position of the frame in the video, in seconds.
    pub timestamp: f64,
}

impl SavedFrame {
    /// The file name a frame at `timestamp` is saved under.
    ///
    /// Two saves that format to the same name write the same file; the
    /// later one wins.
    pub fn filename_for(timestamp: f64) -> String {
        format!("frame_{timestamp:.3}.png")
    }

    /// Write `frame` into `directory` under its timestamp-derived name.
    pub fn write(frame: &Frame, timestamp: f64, directory: &Path) -> Result<Self, ScrubError> {
        let filename = Self::filename_for(timestamp);
        let path = directory.join(&filename);
        frame.save_to(&path)?;
        log::debug!("saved frame at {timestamp:.3}s to {}", path.display());
        Ok(Self {
            filename,
            path,
            timestamp,
        })
    }
}
