//! Desk state and motion phase definitions
//!
//! `DeskState` is a pure derived value. `MotionPhase` is the only state
//! that persists between snapshots: a two-state machine that is either
//! idle or tracking an active motion episode.

use super::events::MotionEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete desk state shown by the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum DeskState {
    /// At or near the sitting target
    Sit,
    /// At or near the standing target
    Stand,
    /// Moving up
    Raising,
    /// Moving down
    Lowering,
}

impl DeskState {
    /// Check if the desk is in motion
    pub fn is_moving(&self) -> bool {
        matches!(self, DeskState::Raising | DeskState::Lowering)
    }

    /// Lowercase name, as reported by state sensors
    pub fn as_str(&self) -> &'static str {
        match self {
            DeskState::Sit => "sit",
            DeskState::Stand => "stand",
            DeskState::Raising => "raising",
            DeskState::Lowering => "lowering",
        }
    }

    /// Parse a value reported by an explicit desk state sensor
    ///
    /// Matching ignores case and surrounding whitespace. Anything else
    /// (including `unavailable`/`unknown`) yields `None`.
    pub fn from_reported(value: &str) -> Option<Self> {
        let value = value.trim();
        [
            DeskState::Sit,
            DeskState::Stand,
            DeskState::Raising,
            DeskState::Lowering,
        ]
        .into_iter()
        .find(|state| state.as_str().eq_ignore_ascii_case(value))
    }
}

impl From<MotionDirection> for DeskState {
    fn from(direction: MotionDirection) -> Self {
        match direction {
            MotionDirection::Raising => DeskState::Raising,
            MotionDirection::Lowering => DeskState::Lowering,
        }
    }
}

/// Direction of an active motion episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum MotionDirection {
    Raising,
    Lowering,
}

impl MotionDirection {
    /// Direction implied by a height delta
    ///
    /// Callers only pass deltas that already cleared the noise floor.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            MotionDirection::Raising
        } else {
            MotionDirection::Lowering
        }
    }
}

/// Motion session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// No motion episode in progress
    #[default]
    Idle,
    /// Motion detected from height deltas
    Active(MotionDirection),
}

impl MotionPhase {
    /// Direction of the active episode, if any
    pub fn direction(&self) -> Option<MotionDirection> {
        match self {
            MotionPhase::Idle => None,
            MotionPhase::Active(direction) => Some(*direction),
        }
    }

    /// Check if a motion episode is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, MotionPhase::Active(_))
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: MotionEvent) -> Self {
        use MotionEvent::*;
        use MotionPhase::*;

        match (self, event) {
            // A qualifying delta starts or extends an episode; the latest
            // delta decides the direction
            (_, QualifyingDelta(direction)) => Active(direction),

            (Active(_), QuietWindowElapsed) => Idle,
            (_, Cancel) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}
