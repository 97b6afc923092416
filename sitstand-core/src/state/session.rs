//! Motion session with a single expiry deadline
//!
//! The session replaces the ad hoc timer handle of a UI widget with an
//! explicit deadline. The host polls it with the current time; at most one
//! deadline is ever pending and rescheduling replaces it.

use super::events::MotionEvent;
use super::machine::{MotionDirection, MotionPhase};

/// Motion session owned by one card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSession {
    /// Current phase
    phase: MotionPhase,
    /// When the quiet window runs out (ms), while active
    deadline_ms: Option<u64>,
}

impl MotionSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current phase
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Direction of the active episode, if any
    pub fn direction(&self) -> Option<MotionDirection> {
        self.phase.direction()
    }

    /// Check if a motion episode is in progress
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Pending expiry deadline (ms)
    pub fn deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Record a qualifying delta
    ///
    /// Starts an episode or extends the current one. Any pending deadline is
    /// replaced with `now_ms + quiet_window_ms`.
    pub fn observe(&mut self, direction: MotionDirection, now_ms: u64, quiet_window_ms: u64) {
        self.apply(MotionEvent::QualifyingDelta(direction), now_ms, quiet_window_ms);
    }

    /// Fire the deadline if it is due
    ///
    /// Returns `true` when the episode ended and the state must be
    /// re-evaluated.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.apply(MotionEvent::QuietWindowElapsed, now_ms, 0);
                true
            }
            _ => false,
        }
    }

    /// Drop the episode and its pending deadline
    pub fn cancel(&mut self) {
        self.apply(MotionEvent::Cancel, 0, 0);
    }

    fn apply(&mut self, event: MotionEvent, now_ms: u64, quiet_window_ms: u64) {
        self.phase = self.phase.transition(event);
        self.deadline_ms = if event.arms_deadline() {
            Some(now_ms.saturating_add(quiet_window_ms))
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET_MS: u64 = 2000;

    #[test]
    fn test_new_session_is_idle() {
        let session = MotionSession::new();
        assert!(!session.is_active());
        assert_eq!(session.deadline(), None);
    }

    #[test]
    fn test_observe_arms_deadline() {
        let mut session = MotionSession::new();
        session.observe(MotionDirection::Raising, 1000, QUIET_MS);

        assert_eq!(session.direction(), Some(MotionDirection::Raising));
        assert_eq!(session.deadline(), Some(3000));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut session = MotionSession::new();
        session.observe(MotionDirection::Raising, 1000, QUIET_MS);
        session.observe(MotionDirection::Raising, 2500, QUIET_MS);

        assert_eq!(session.deadline(), Some(4500));

        // The earlier deadline no longer fires
        assert!(!session.poll(3000));
        assert!(session.is_active());
    }

    #[test]
    fn test_poll_expires_at_deadline() {
        let mut session = MotionSession::new();
        session.observe(MotionDirection::Lowering, 0, QUIET_MS);

        assert!(!session.poll(1999));
        assert!(session.is_active());

        assert!(session.poll(2000));
        assert!(!session.is_active());
        assert_eq!(session.deadline(), None);

        // Fires once
        assert!(!session.poll(5000));
    }

    #[test]
    fn test_cancel_clears_deadline() {
        let mut session = MotionSession::new();
        session.observe(MotionDirection::Raising, 0, QUIET_MS);
        session.cancel();

        assert_eq!(session.phase(), MotionPhase::Idle);
        assert_eq!(session.deadline(), None);
        assert!(!session.poll(10_000));
    }
}
