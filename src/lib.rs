//! # framescrub
//!
//! Scrub through a video frame by frame in the terminal and save the frames
//! you want as PNG images.
//!
//! `framescrub` drives existing tools rather than decoding video itself:
//! `ffprobe` reports the duration and frame rate, `ffmpeg` extracts frames,
//! and `viu` draws them in the terminal. What the crate adds is the
//! navigation: a keystroke decoder for raw terminal input and two ways of
//! moving through a video.
//!
//! - Short videos (two minutes or less by default) are decoded once into a
//!   temporary directory with duplicate frames dropped, and navigation moves
//!   an index over that list.
//! - Longer videos are navigated by timestamp, decoding the frame at the
//!   current position on demand with an accurate seek.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framescrub::{ScrubConfig, Session, TerminalKeys, ViuRenderer};
//!
//! let config = ScrubConfig::new().with_output_directory("stills");
//! let session = Session::open(&config, "input.mp4")?;
//! let summary = session.run(
//!     &mut TerminalKeys::new(),
//!     &mut ViuRenderer::new(&config),
//!     &mut std::io::stdout(),
//! )?;
//!
//! for frame in &summary.saved {
//!     println!("{} @ {:.3}s", frame.filename, frame.timestamp);
//! }
//! # Ok::<(), framescrub::ScrubError>(())
//! ```
//!
//! ## Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `→` / `←` | forward / back 0.25 s |
//! | `.` / `,` | forward / back one frame |
//! | `s` | save the current frame as `frame_<seconds>.png` |
//! | `q` | quit and list the saved frames |
//!
//! ## Requirements
//!
//! `ffmpeg`, `ffprobe` and `viu` must be installed and on `PATH`, or their
//! locations passed through [`ScrubConfig`].

pub mod config;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod indexed;
pub mod key;
pub mod navigation;
pub mod probe;
pub mod render;
pub mod seeked;
pub mod session;
pub mod source;
mod utilities;

pub use config::ScrubConfig;
pub use decoder::{FfmpegDecoder, FrameDecoder};
pub use error::ScrubError;
pub use frame::{Frame, SavedFrame};
pub use indexed::IndexedSource;
pub use key::{KeyDecoder, KeyEvent, KeySource, RawModeGuard, TerminalKeys};
pub use navigation::{Action, NavigationState, Navigator};
pub use probe::MediaProbe;
pub use render::{Renderer, ViuRenderer};
pub use seeked::SeekedSource;
pub use session::{Session, SessionOutcome, Summary};
pub use source::{FrameSource, Position, Strategy};
pub use utilities::{frame_number, seconds_to_frames};
