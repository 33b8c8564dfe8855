//! Keyboard decoding.
//!
//! [`KeyDecoder`] turns the raw byte stream of a terminal in raw mode into
//! [`KeyEvent`]s. It is generic over [`Read`] so any byte source can drive a
//! session; [`TerminalKeys`] wraps standard input and holds the terminal in
//! raw mode for exactly the duration of each keystroke read.
//!
//! | Bytes | Event |
//! |-------|-------|
//! | `q` | [`KeyEvent::Quit`] |
//! | `s` | [`KeyEvent::Save`] |
//! | `.` | [`KeyEvent::StepForward`] |
//! | `,` | [`KeyEvent::StepBack`] |
//! | `ESC [ C` (→) | [`KeyEvent::JumpForward`] |
//! | `ESC [ D` (←) | [`KeyEvent::JumpBack`] |
//! | anything else | [`KeyEvent::Ignored`] |

use std::io::{ErrorKind, Read, Stdin, stdin};

use crossterm::terminal;

use crate::error::ScrubError;

const ESCAPE: u8 = 0x1B;

/// A logical command decoded from one keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Leave the session.
    Quit,
    /// Save the frame on screen.
    Save,
    /// Move one frame forward.
    StepForward,
    /// Move one frame back.
    StepBack,
    /// Jump forward by the configured jump length.
    JumpForward,
    /// Jump back by the configured jump length.
    JumpBack,
    /// A key with no binding. Never an error.
    Ignored,
}

/// Anything that can produce the next keystroke of a session.
pub trait KeySource {
    /// Block until the next keystroke and decode it.
    fn next_key(&mut self) -> Result<KeyEvent, ScrubError>;
}

/// Decodes keystrokes from a raw byte stream.
///
/// End of input decodes as [`KeyEvent::Quit`] so a closed stream ends the
/// session instead of spinning on empty reads.
#[derive(Debug)]
pub struct KeyDecoder<R> {
    reader: R,
}

impl<R: Read> KeyDecoder<R> {
    /// Wrap a byte source.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read and decode one logical keystroke.
    ///
    /// An escape byte consumes exactly two continuation bytes; only `[C` and
    /// `[D` are bound, every other continuation is discarded as
    /// [`KeyEvent::Ignored`].
    pub fn decode(&mut self) -> std::io::Result<KeyEvent> {
        let Some(byte) = self.read_byte()? else {
            return Ok(KeyEvent::Quit);
        };

        let event = match byte {
            b'q' => KeyEvent::Quit,
            b's' => KeyEvent::Save,
            b'.' => KeyEvent::StepForward,
            b',' => KeyEvent::StepBack,
            ESCAPE => self.decode_escape()?,
            _ => KeyEvent::Ignored,
        };
        Ok(event)
    }

    fn decode_escape(&mut self) -> std::io::Result<KeyEvent> {
        let first = self.read_byte()?;
        let second = self.read_byte()?;
        Ok(match (first, second) {
            (Some(b'['), Some(b'C')) => KeyEvent::JumpForward,
            (Some(b'['), Some(b'D')) => KeyEvent::JumpBack,
            _ => KeyEvent::Ignored,
        })
    }

    fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        let mut buffer = [0u8; 1];
        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buffer[0])),
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            }
        }
    }

    /// Give back the wrapped byte source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> KeySource for KeyDecoder<R> {
    fn next_key(&mut self) -> Result<KeyEvent, ScrubError> {
        self.decode().map_err(ScrubError::Terminal)
    }
}

/// Keeps the terminal in raw mode while alive.
///
/// Dropping the guard restores the mode the terminal had before
/// [`RawModeGuard::enter`], on every exit path including unwinding.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Switch the terminal to raw (unbuffered, unechoed) mode.
    pub fn enter() -> Result<Self, ScrubError> {
        terminal::enable_raw_mode().map_err(ScrubError::Terminal)?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {error}");
        }
    }
}

/// Keystrokes from the controlling terminal's standard input.
#[derive(Debug)]
pub struct TerminalKeys {
    decoder: KeyDecoder<Stdin>,
}

impl TerminalKeys {
    /// Read keystrokes from standard input.
    pub fn new() -> Self {
        Self {
            decoder: KeyDecoder::new(stdin()),
        }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<KeyEvent, ScrubError> {
        let _raw = RawModeGuard::enter()?;
        self.decoder.next_key()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{KeyDecoder, KeyEvent};

    fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
        let mut decoder = KeyDecoder::new(Cursor::new(bytes.to_vec()));
        let mut events = Vec::new();
        loop {
            let event = decoder.decode().unwrap();
            if event == KeyEvent::Quit {
                break;
            }
            events.push(event);
        }
        events
    }

    #[test]
    fn single_byte_bindings() {
        let mut decoder = KeyDecoder::new(Cursor::new(b"s.,q".to_vec()));
        assert_eq!(decoder.decode().unwrap(), KeyEvent::Save);
        assert_eq!(decoder.decode().unwrap(), KeyEvent::StepForward);
        assert_eq!(decoder.decode().unwrap(), KeyEvent::StepBack);
        assert_eq!(decoder.decode().unwrap(), KeyEvent::Quit);
    }

    #[test]
    fn arrow_keys() {
        assert_eq!(
            decode_all(b"\x1b[C\x1b[D"),
            [KeyEvent::JumpForward, KeyEvent::JumpBack]
        );
    }

    #[test]
    fn unknown_escape_sequence_is_consumed() {
        // Up arrow, then a step: the `A` must not leak into the next decode.
        assert_eq!(
            decode_all(b"\x1b[A."),
            [KeyEvent::Ignored, KeyEvent::StepForward]
        );
        assert_eq!(decode_all(b"\x1bOC"), [KeyEvent::Ignored]);
    }

    #[test]
    fn unbound_bytes_are_ignored() {
        assert_eq!(decode_all(b"xQ \r"), [KeyEvent::Ignored; 4]);
    }

    #[test]
    fn end_of_input_quits() {
        let mut decoder = KeyDecoder::new(Cursor::new(Vec::new()));
        assert_eq!(decoder.decode().unwrap(), KeyEvent::Quit);
        assert_eq!(decoder.decode().unwrap(), KeyEvent::Quit);
    }

    #[test]
    fn truncated_escape_sequence_is_ignored() {
        let mut decoder = KeyDecoder::new(Cursor::new(b"\x1b[".to_vec()));
        assert_eq!(decoder.decode().unwrap(), KeyEvent::Ignored);
        assert_eq!(decoder.decode().unwrap(), KeyEvent::Quit);
    }
}
