//! Cancellable one-shot commit timer.
//!
//! `CommitTimer` is the bookkeeping half of the two-digit auto-commit:
//! it hands out a fresh `TimerToken` every time it is armed and remembers
//! only the latest one. The driver schedules the actual wake-up; when it
//! fires, `fire(token)` succeeds only if that token is still the armed one.
//! Cancelling, or arming again, makes every earlier token stale.

use serde::{Deserialize, Serialize};

/// Identifies one arming of a `CommitTimer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl std::fmt::Display for TimerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// At most one outstanding timer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitTimer {
    armed: Option<TimerToken>,
    next: u64,
}

impl CommitTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any pending one.
    pub fn arm(&mut self) -> TimerToken {
        self.next += 1;
        let token = TimerToken(self.next);
        self.armed = Some(token);
        token
    }

    /// Disarm. Returns the token that was pending, if any.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.armed.take()
    }

    /// Consume a fire. `true` only for the currently armed token.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// The pending token, if armed.
    #[must_use]
    pub fn armed(&self) -> Option<TimerToken> {
        self.armed
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_fire() {
        let mut timer = CommitTimer::new();
        let token = timer.arm();
        assert!(timer.is_armed());
        assert!(timer.fire(token));
        assert!(!timer.is_armed());

        // A second fire of the same token is stale
        assert!(!timer.fire(token));
    }

    #[test]
    fn test_rearm_invalidates_previous() {
        let mut timer = CommitTimer::new();
        let first = timer.arm();
        let second = timer.arm();

        assert_ne!(first, second);
        assert!(!timer.fire(first));
        assert_eq!(timer.armed(), Some(second));
        assert!(timer.fire(second));
    }

    #[test]
    fn test_cancel() {
        let mut timer = CommitTimer::new();
        let token = timer.arm();
        assert_eq!(timer.cancel(), Some(token));
        assert_eq!(timer.cancel(), None);
        assert!(!timer.fire(token));
    }
}
