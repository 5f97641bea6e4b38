//! Animation sub-machine
//!
//! The animation replays snapshots on a fixed period. It only decides *what*
//! should happen to navigation on each frame or key; the app loop owns the
//! timer, the key reads and the redraws.
//!
//! ```text
//! Stopped --start--> Running --p--> Paused --c--> Running
//!                    Running --s--> Stopped
//!                     Paused --s--> Stopped
//! ```
//!
//! Once the last snapshot is reached the animation keeps running: each frame
//! still requests `Advance`, which is rejected, so the frame just repeats.

use crate::input::Key;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Running,
    Paused,
}

/// A navigation request produced by the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationAction {
    /// Move to the next snapshot (may be rejected at the end)
    Advance,
    /// Jump back to snapshot 1 and redraw
    Restart,
    /// Rebuild the current snapshot, e.g. after a resize
    Redraw,
    /// Leave the view entirely
    Quit,
}

#[derive(Debug, Clone)]
pub struct Animation {
    state: AnimationState,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    pub fn new() -> Self {
        Animation {
            state: AnimationState::Stopped,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn start(&mut self) {
        self.transition(AnimationState::Running);
    }

    /// One timer tick while running, with the key polled during it (if any)
    pub fn frame(&mut self, key: Option<Key>) -> Vec<AnimationAction> {
        if self.state != AnimationState::Running {
            return Vec::new();
        }

        let mut actions = vec![AnimationAction::Advance];
        match key {
            Some(k) if k.is('s') => {
                self.transition(AnimationState::Stopped);
                actions.push(AnimationAction::Redraw);
            }
            Some(k) if k.is('r') => actions.push(AnimationAction::Restart),
            Some(k) if k.is('p') => self.transition(AnimationState::Paused),
            Some(k) if k.is('q') => {
                self.transition(AnimationState::Stopped);
                actions.push(AnimationAction::Quit);
            }
            Some(Key::Resize) => actions.push(AnimationAction::Redraw),
            _ => {}
        }
        actions
    }

    /// A key read while paused
    pub fn paused_key(&mut self, key: Key) -> Option<AnimationAction> {
        if self.state != AnimationState::Paused {
            return None;
        }

        if key.is('c') {
            self.transition(AnimationState::Running);
            None
        } else if key.is('s') {
            self.transition(AnimationState::Stopped);
            Some(AnimationAction::Redraw)
        } else if key.is('q') {
            self.transition(AnimationState::Stopped);
            Some(AnimationAction::Quit)
        } else if key == Key::Resize {
            Some(AnimationAction::Redraw)
        } else {
            None
        }
    }

    fn transition(&mut self, next: AnimationState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "Animation state change");
            self.state = next;
        }
    }
}
