//! The interactive session.
//!
//! A [`Session`] owns everything one scrubbing run needs: the probed
//! duration and frame rate, the frame source picked for the video, the
//! navigator and the list of frames saved so far. [`Session::run`] drives the
//! render, read, dispatch loop until the user quits and hands back a
//! [`Summary`].
//!
//! # Example
//!
//! ```no_run
//! use framescrub::{ScrubConfig, Session, TerminalKeys, ViuRenderer};
//!
//! let config = ScrubConfig::new();
//! let session = Session::open(&config, "input.mp4")?;
//! let summary = session.run(
//!     &mut TerminalKeys::new(),
//!     &mut ViuRenderer::new(&config),
//!     &mut std::io::stdout(),
//! )?;
//! println!("{summary}");
//! # Ok::<(), framescrub::ScrubError>(())
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::ScrubConfig,
    decoder::{FfmpegDecoder, FrameDecoder},
    error::ScrubError,
    frame::{Frame, SavedFrame},
    indexed::IndexedSource,
    key::KeySource,
    navigation::{Action, Navigator},
    probe::MediaProbe,
    render::Renderer,
    seeked::SeekedSource,
    source::{FrameSource, Strategy},
};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user quit.
    Quit,
    /// The indexed frame list had no frame at the current position (in
    /// practice: extraction produced no frames).
    OutOfRange,
}

/// The result of a finished session.
#[derive(Debug, Clone)]
pub struct Summary {
    /// The video that was scrubbed.
    pub video: PathBuf,
    /// The navigation strategy that was used.
    pub strategy: Strategy,
    /// How the session ended.
    pub outcome: SessionOutcome,
    /// Every save, in the order it happened. Saves that reused a file name
    /// are all listed even though only the last one survives on disk.
    pub saved: Vec<SavedFrame>,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Saved {} frames:", self.saved.len())?;
        for frame in &self.saved {
            write!(f, "\n{}", frame.filename)?;
        }
        Ok(())
    }
}

/// One interactive scrubbing session over a single video.
pub struct Session {
    video: PathBuf,
    duration: f64,
    frames_per_second: f64,
    source: Box<dyn FrameSource>,
    navigator: Navigator,
    output_directory: PathBuf,
    saved: Vec<SavedFrame>,
}

impl Session {
    /// Probe `video` and prepare a session with the ffmpeg-backed decoder.
    ///
    /// For videos at or below the seek threshold this extracts every
    /// distinct frame before returning, which can take a while.
    ///
    /// # Errors
    ///
    /// Fails if the duration cannot be probed or the frame source cannot be
    /// set up. A frame-rate probe failure falls back to the default rate.
    pub fn open<P: AsRef<Path>>(config: &ScrubConfig, video: P) -> Result<Self, ScrubError> {
        let probe = MediaProbe::new(config, &video);
        let duration = probe.duration()?;
        let frames_per_second = probe.frame_rate();
        let decoder = FfmpegDecoder::new(config, &video);
        Self::with_decoder(config, video, duration, frames_per_second, decoder)
    }

    /// Prepare a session for a video whose duration and frame rate are
    /// already known, choosing the strategy from `duration`.
    pub fn with_decoder<P, D>(
        config: &ScrubConfig,
        video: P,
        duration: f64,
        frames_per_second: f64,
        decoder: D,
    ) -> Result<Self, ScrubError>
    where
        P: AsRef<Path>,
        D: FrameDecoder + 'static,
    {
        let strategy = Strategy::for_duration(duration, config.seek_threshold);
        log::info!(
            "{} ({duration:.3}s @ {frames_per_second:.3} fps): {} navigation",
            video.as_ref().display(),
            strategy.name()
        );

        let source: Box<dyn FrameSource> = match strategy {
            Strategy::Indexed => Box::new(IndexedSource::extract(
                &decoder,
                frames_per_second,
                duration,
            )?),
            Strategy::Seeked => Box::new(SeekedSource::new(decoder, frames_per_second, duration)),
        };
        Ok(Self::with_source(
            config,
            video,
            duration,
            frames_per_second,
            source,
        ))
    }

    /// Prepare a session around an existing frame source.
    pub fn with_source<P: AsRef<Path>>(
        config: &ScrubConfig,
        video: P,
        duration: f64,
        frames_per_second: f64,
        source: Box<dyn FrameSource>,
    ) -> Self {
        Self {
            video: video.as_ref().to_path_buf(),
            duration,
            frames_per_second,
            source,
            navigator: Navigator::new(config.jump_seconds),
            output_directory: config.output_directory.clone(),
            saved: Vec::new(),
        }
    }

    /// The navigation strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.source.strategy()
    }

    /// Probed duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Probed (or default) frame rate.
    pub fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    /// Run the loop until the user quits.
    ///
    /// Frames are rendered with `renderer`, the position indicator and save
    /// notices go to `out`, keystrokes come from `keys`. The frame source's
    /// storage is released before the summary is returned; on an error it is
    /// released when the session is dropped.
    ///
    /// The output directory is created before the first frame is shown. A
    /// save that fails afterwards is reported on `out` and the loop goes on.
    pub fn run<K, R, W>(
        mut self,
        keys: &mut K,
        renderer: &mut R,
        out: &mut W,
    ) -> Result<Summary, ScrubError>
    where
        K: KeySource + ?Sized,
        R: Renderer + ?Sized,
        W: Write + ?Sized,
    {
        fs::create_dir_all(&self.output_directory)?;
        let mut shown: Option<Frame> = None;

        let outcome = loop {
            if shown.is_none() {
                let frame = match self.source.current() {
                    Ok(frame) => frame,
                    Err(ScrubError::FrameOutOfRange { index, total }) => {
                        log::warn!("frame {index} requested from a list of {total}");
                        writeln!(out, "Frame index out of range")?;
                        break SessionOutcome::OutOfRange;
                    }
                    Err(error) => return Err(error),
                };
                renderer.render(&frame)?;
                self.print_position(out, &frame)?;
                shown = Some(frame);
            }

            let event = keys.next_key()?;
            match self.navigator.apply(event, self.source.as_mut()) {
                Action::Moved => shown = None,
                Action::Stayed => {}
                Action::Save => {
                    if let Some(frame) = &shown {
                        let timestamp = self.source.timestamp();
                        match SavedFrame::write(frame, timestamp, &self.output_directory) {
                            Ok(saved) => {
                                writeln!(out, "Saved {}", saved.filename)?;
                                self.saved.push(saved);
                            }
                            Err(error) => {
                                log::warn!("save at {timestamp:.3}s failed: {error}");
                                writeln!(
                                    out,
                                    "Could not save {}: {error}",
                                    SavedFrame::filename_for(timestamp)
                                )?;
                            }
                        }
                        out.flush()?;
                    }
                }
                Action::Quit => break SessionOutcome::Quit,
            }
        };

        if let Err(error) = self.source.release() {
            log::warn!("failed to remove extracted frames: {error}");
        }

        Ok(Summary {
            video: self.video.clone(),
            strategy: self.source.strategy(),
            outcome,
            saved: std::mem::take(&mut self.saved),
        })
    }

    fn print_position<W: Write + ?Sized>(
        &self,
        out: &mut W,
        frame: &Frame,
    ) -> Result<(), ScrubError> {
        let position = self.source.position();
        match frame.dimensions() {
            Some((width, height)) => writeln!(out, "\n{position} [{width}x{height}]")?,
            None => writeln!(out, "\n{position}")?,
        }
        out.flush()?;
        Ok(())
    }
}
