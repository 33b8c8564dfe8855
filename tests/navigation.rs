//! Navigation integration tests.
//!
//! These tests drive the navigator over both frame-source strategies and
//! check that every reachable position stays within bounds.

use std::{io::Cursor, path::PathBuf};

use framescrub::{
    Action, FrameDecoder, FrameSource, IndexedSource, KeyDecoder, KeyEvent, NavigationState,
    Navigator, Position, ScrubError, SeekedSource, config::DEFAULT_FRAME_RATE,
    probe::parse_frame_rate,
};

struct StillDecoder;

impl FrameDecoder for StillDecoder {
    fn frame_at(&self, _timestamp: f64) -> Result<Vec<u8>, ScrubError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    fn extract_all(&self, _directory: &std::path::Path) -> Result<(), ScrubError> {
        Ok(())
    }
}

fn indexed(total: usize, frames_per_second: f64) -> IndexedSource {
    let frames = (0..total)
        .map(|n| PathBuf::from(format!("frame_{n}.png")))
        .collect();
    IndexedSource::from_frames(frames, frames_per_second, 60.0)
}

fn index_of(source: &dyn FrameSource) -> usize {
    match source.position() {
        Position::FrameIndex { index, .. } => index,
        other => panic!("expected a frame index, got {other:?}"),
    }
}

#[test]
fn jump_forward_moves_eight_frames_at_thirty_fps() {
    let mut navigator = Navigator::default();
    let mut source = indexed(900, 30.0);

    assert_eq!(navigator.apply(KeyEvent::JumpForward, &mut source), Action::Moved);
    assert_eq!(index_of(&source), 8);

    for _ in 0..200 {
        navigator.apply(KeyEvent::JumpForward, &mut source);
    }
    assert_eq!(index_of(&source), 899);
    assert_eq!(navigator.apply(KeyEvent::JumpForward, &mut source), Action::Stayed);

    navigator.apply(KeyEvent::JumpBack, &mut source);
    assert_eq!(index_of(&source), 891);
}

#[test]
fn step_forward_at_ntsc_rate_advances_one_frame_duration() {
    let frames_per_second = parse_frame_rate("30000/1001").expect("ratio should parse");
    assert!((frames_per_second - 29.97).abs() < 0.001);

    let mut navigator = Navigator::default();
    let mut source = SeekedSource::new(StillDecoder, frames_per_second, 600.0);

    assert_eq!(navigator.apply(KeyEvent::StepForward, &mut source), Action::Moved);
    let expected = 1001.0 / 30000.0;
    assert!(
        (source.timestamp() - expected).abs() < 1e-9,
        "timestamp {} should be {expected}",
        source.timestamp()
    );
}

#[test]
fn seeked_timestamp_stays_below_duration() {
    let mut navigator = Navigator::default();
    let mut source = SeekedSource::new(StillDecoder, 30.0, 600.0);

    for _ in 0..2500 {
        navigator.apply(KeyEvent::JumpForward, &mut source);
    }
    // 600.0 itself is not a valid position, so the last jump is refused.
    assert_eq!(source.timestamp(), 599.75);
    assert_eq!(navigator.apply(KeyEvent::JumpForward, &mut source), Action::Stayed);

    let mut moved = 0;
    for _ in 0..100 {
        if navigator.apply(KeyEvent::StepForward, &mut source) == Action::Moved {
            moved += 1;
        }
        assert!(source.timestamp() < 600.0);
    }
    assert_eq!(moved, 7);
}

#[test]
fn empty_frame_rate_falls_back_to_thirty() {
    let frames_per_second = parse_frame_rate("").unwrap_or(DEFAULT_FRAME_RATE);
    assert_eq!(frames_per_second, 30.0);

    let mut navigator = Navigator::default();

    let mut seeked = SeekedSource::new(StillDecoder, frames_per_second, 600.0);
    navigator.apply(KeyEvent::JumpForward, &mut seeked);
    assert_eq!(seeked.timestamp(), 0.25);
    navigator.apply(KeyEvent::JumpBack, &mut seeked);
    assert_eq!(seeked.timestamp(), 0.0);

    let mut indexed = indexed(900, frames_per_second);
    navigator.apply(KeyEvent::JumpForward, &mut indexed);
    navigator.apply(KeyEvent::JumpForward, &mut indexed);
    assert_eq!(index_of(&indexed), 16);
    navigator.apply(KeyEvent::JumpBack, &mut indexed);
    assert_eq!(index_of(&indexed), 8);
}

#[test]
fn seeked_jump_ignores_frame_rate() {
    let mut navigator = Navigator::default();
    let mut slow = SeekedSource::new(StillDecoder, 1.0, 600.0);
    let mut fast = SeekedSource::new(StillDecoder, 120.0, 600.0);

    navigator.apply(KeyEvent::JumpForward, &mut slow);
    navigator.apply(KeyEvent::JumpForward, &mut fast);
    assert_eq!(slow.timestamp(), 0.25);
    assert_eq!(fast.timestamp(), 0.25);
}

#[test]
fn unknown_arrow_key_does_not_move() {
    let mut keys = KeyDecoder::new(Cursor::new(b"\x1b[A".to_vec()));
    let event = keys.decode().unwrap();
    assert_eq!(event, KeyEvent::Ignored);

    let mut navigator = Navigator::default();
    let mut source = SeekedSource::new(StillDecoder, 30.0, 600.0);
    assert_eq!(navigator.apply(event, &mut source), Action::Stayed);
    assert_eq!(source.position(), Position::Timestamp(0.0));
}

#[test]
fn step_back_from_start_stays_at_start() {
    let mut navigator = Navigator::default();
    let mut indexed = indexed(10, 30.0);
    let mut seeked = SeekedSource::new(StillDecoder, 30.0, 600.0);

    for _ in 0..1000 {
        assert_eq!(navigator.apply(KeyEvent::StepBack, &mut indexed), Action::Stayed);
        assert_eq!(navigator.apply(KeyEvent::JumpBack, &mut indexed), Action::Stayed);
        assert_eq!(navigator.apply(KeyEvent::StepBack, &mut seeked), Action::Stayed);
    }
    assert_eq!(index_of(&indexed), 0);
    assert_eq!(seeked.timestamp(), 0.0);
}

#[test]
fn save_and_ignored_do_not_move() {
    let mut navigator = Navigator::default();
    let mut source = indexed(10, 30.0);
    navigator.apply(KeyEvent::StepForward, &mut source);

    assert_eq!(navigator.apply(KeyEvent::Save, &mut source), Action::Save);
    assert_eq!(navigator.apply(KeyEvent::Ignored, &mut source), Action::Stayed);
    assert_eq!(index_of(&source), 1);
}

#[test]
fn quit_is_terminal() {
    let mut navigator = Navigator::default();
    let mut source = indexed(10, 30.0);

    assert!(navigator.is_running());
    assert_eq!(navigator.apply(KeyEvent::Quit, &mut source), Action::Quit);
    assert_eq!(navigator.state(), NavigationState::Quitting);

    assert_eq!(navigator.apply(KeyEvent::StepForward, &mut source), Action::Stayed);
    assert_eq!(navigator.apply(KeyEvent::Quit, &mut source), Action::Stayed);
    assert_eq!(index_of(&source), 0);
}

#[test]
fn mixed_walks_stay_in_bounds() {
    let events = [
        KeyEvent::StepForward,
        KeyEvent::JumpForward,
        KeyEvent::JumpForward,
        KeyEvent::StepBack,
        KeyEvent::JumpBack,
        KeyEvent::JumpForward,
        KeyEvent::JumpForward,
        KeyEvent::JumpForward,
    ];

    for total in [1, 2, 7, 30, 301] {
        let mut navigator = Navigator::default();
        let mut indexed = indexed(total, 24.0);
        let mut seeked = SeekedSource::new(StillDecoder, 24.0, total as f64 / 24.0);

        // Walk with a stride so the event order keeps changing.
        for step in 0..2000 {
            let event = events[(step * 5 + step / 7) % events.len()];
            navigator.apply(event, &mut indexed);
            navigator.apply(event, &mut seeked);

            assert!(index_of(&indexed) < total);
            assert!(seeked.timestamp() >= 0.0);
            assert!(seeked.timestamp() < total as f64 / 24.0);
        }
    }
}
