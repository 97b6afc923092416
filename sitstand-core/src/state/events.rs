//! Events that drive the motion session

use super::machine::MotionDirection;

/// Events that can change the motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionEvent {
    /// Height delta above the noise floor
    QualifyingDelta(MotionDirection),
    /// Quiet window passed with no qualifying delta
    QuietWindowElapsed,
    /// Host tore the card down
    Cancel,
}

impl MotionEvent {
    /// Check if this event (re)arms the expiry deadline
    pub fn arms_deadline(&self) -> bool {
        matches!(self, MotionEvent::QualifyingDelta(_))
    }
}
