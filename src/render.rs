//! Terminal image rendering.

use std::{
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use crate::{config::ScrubConfig, error::ScrubError, frame::Frame, utilities::spawn_error};

/// Displays frames in the terminal.
pub trait Renderer {
    /// Draw `frame`. Returns once the image has been written out.
    fn render(&mut self, frame: &Frame) -> Result<(), ScrubError>;
}

/// [`Renderer`] that hands frames to `viu` (or a viewer with the same
/// command line: a path, or `-` for an image on stdin).
#[derive(Debug, Clone)]
pub struct ViuRenderer {
    program: PathBuf,
}

impl ViuRenderer {
    /// Create a renderer using the viewer configured in `config`.
    pub fn new(config: &ScrubConfig) -> Self {
        Self {
            program: config.viewer.clone(),
        }
    }
}

impl Renderer for ViuRenderer {
    fn render(&mut self, frame: &Frame) -> Result<(), ScrubError> {
        let mut command = Command::new(&self.program);
        let status = match frame {
            Frame::File(path) => {
                command.arg(path);
                log::debug!("running {command:?}");
                command.status().map_err(|error| spawn_error(&command, error))?
            }
            Frame::Encoded(bytes) => {
                command.arg("-").stdin(Stdio::piped());
                log::debug!("running {command:?}");
                let mut child = command.spawn().map_err(|error| spawn_error(&command, error))?;
                let written = match child.stdin.take() {
                    Some(mut stdin) => stdin.write_all(bytes),
                    None => Ok(()),
                };
                let status = child.wait()?;
                match written {
                    Err(error) if error.kind() == ErrorKind::BrokenPipe => {
                        log::warn!("{} stopped reading the frame early", self.program.display());
                    }
                    Err(error) => return Err(ScrubError::Render(error.to_string())),
                    Ok(()) => {}
                }
                status
            }
        };

        if !status.success() {
            log::warn!("{} exited with {status}", self.program.display());
        }
        Ok(())
    }
}
