//! Carousel state machine: cursor, transition lock and lifecycle in one place
//!
//! Every navigation goes through [`CarouselState::begin`], which is the only
//! way to move the cursor. An accepted navigation takes the transition lock
//! and hands back an epoch; only a release carrying that same epoch can clear
//! the lock again, so a stale timer can never unlock a newer transition.

use super::cursor::Cursor;
use super::types::Navigation;

/// Lock state of the carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Idle,
    Settling { epoch: u64, delta: isize },
    /// Unmounted; navigation is permanently rejected.
    Torn,
}

/// Result of an accepted navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub from: usize,
    pub to: usize,
    pub delta: isize,
    pub epoch: u64,
}

#[derive(Debug)]
pub struct CarouselState {
    cursor: Cursor,
    transition: Transition,
    next_epoch: u64,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self {
            cursor: Cursor::new(len),
            transition: Transition::Idle,
            next_epoch: 0,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    /// True while a navigation is in flight or after teardown.
    pub fn is_locked(&self) -> bool {
        !matches!(self.transition, Transition::Idle)
    }

    /// Try to start a navigation.
    ///
    /// Returns `None` when locked, when the request would not move the cursor,
    /// or when a `GoTo` target is out of range (rejected by [`Cursor::set`]).
    pub fn begin(&mut self, nav: Navigation) -> Option<Accepted> {
        match self.transition {
            Transition::Idle => {}
            Transition::Settling { .. } => {
                tracing::trace!(?nav, "Navigation dropped: transition in flight");
                return None;
            }
            Transition::Torn => {
                tracing::trace!(?nav, "Navigation dropped: carousel unmounted");
                return None;
            }
        }

        let mut target = self.cursor;
        let delta = match nav {
            Navigation::GoTo(index) => {
                if index == self.cursor.index() || !target.set(index) {
                    return None;
                }
                self.cursor.delta_to(index)
            }
            Navigation::Next => 1,
            Navigation::Previous => -1,
            Navigation::StepToward(offset) => offset.signum(),
        };
        if delta == 0 {
            return None;
        }
        // GoTo has already placed the target
        if target == self.cursor {
            target.advance(delta);
        }

        let from = self.cursor.index();
        let epoch = self.next_epoch;
        self.next_epoch = self.next_epoch.wrapping_add(1);
        self.transition = Transition::Settling { epoch, delta };
        self.cursor = target;

        Some(Accepted {
            from,
            to: self.cursor.index(),
            delta,
            epoch,
        })
    }

    /// Release the lock taken by the navigation with `epoch`.
    pub fn settle(&mut self, epoch: u64) -> bool {
        match self.transition {
            Transition::Settling { epoch: current, delta } if current == epoch => {
                self.transition = Transition::Idle;
                tracing::trace!(epoch, delta, index = self.cursor.index(), "Transition settled");
                true
            }
            _ => false,
        }
    }

    pub fn tear_down(&mut self) {
        self.transition = Transition::Torn;
    }
}
