//! The navigation state machine.
//!
//! [`Navigator`] applies decoded [`KeyEvent`]s to a [`FrameSource`]. It
//! has two states, running and quitting; once quitting, every further event
//! is ignored. Movement is delegated to the source, which keeps the position
//! within bounds, so no event is ever an error.

use crate::{
    config::DEFAULT_JUMP_SECONDS,
    key::KeyEvent,
    source::FrameSource,
};

/// State of the navigation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// Accepting events.
    #[default]
    Running,
    /// Terminal state, entered on [`KeyEvent::Quit`].
    Quitting,
}

/// What the session should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The position changed; the frame on screen is stale.
    Moved,
    /// Nothing changed, including moves stopped at a boundary.
    Stayed,
    /// Save the frame on screen.
    Save,
    /// Leave the loop.
    Quit,
}

/// Maps key events onto frame-source movements.
#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavigationState,
    jump_seconds: f64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_SECONDS)
    }
}

impl Navigator {
    /// Create a running navigator whose arrow keys jump by `jump_seconds`.
    pub fn new(jump_seconds: f64) -> Self {
        Self {
            state: NavigationState::Running,
            jump_seconds,
        }
    }

    /// Current state.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Returns `true` until a quit event has been applied.
    pub fn is_running(&self) -> bool {
        self.state == NavigationState::Running
    }

    /// Apply one event to `source`.
    pub fn apply(&mut self, event: KeyEvent, source: &mut dyn FrameSource) -> Action {
        if self.state == NavigationState::Quitting {
            return Action::Stayed;
        }

        let before = source.position();
        match event {
            KeyEvent::Quit => {
                self.state = NavigationState::Quitting;
                return Action::Quit;
            }
            KeyEvent::Save => return Action::Save,
            KeyEvent::Ignored => return Action::Stayed,
            KeyEvent::StepForward => source.step(1),
            KeyEvent::StepBack => source.step(-1),
            KeyEvent::JumpForward => source.jump(self.jump_seconds),
            KeyEvent::JumpBack => source.jump(-self.jump_seconds),
        }

        let after = source.position();
        log::trace!("{event:?}: {before} -> {after}");
        if after == before {
            Action::Stayed
        } else {
            Action::Moved
        }
    }
}
