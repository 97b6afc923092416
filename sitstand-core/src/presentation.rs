//! Button presentation
//!
//! The card shows a stand button and a sit button. Their look depends on
//! the inferred state and the clear zones; pressing one starts a short
//! click animation. Only the decision is made here, styling is the host's.

use heapless::Vec;

use crate::config::DeskConfig;
use crate::ingest::Snapshot;
use crate::state::{in_clear_sit_zone, in_clear_stand_zone, DeskState};

/// Sit/stand button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Sit,
    Stand,
}

/// How a button is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonStyle {
    /// Desk is travelling towards this button's target
    MotionTowards,
    /// Desk is moving, but not towards this target
    IdleDuringMotion,
    /// Desk rests at this button's target
    Active,
    /// Desk rests between zones, on this button's side of the midpoint
    Outline,
    /// Any other case
    Muted,
}

/// Text shown on a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLabel {
    Sit,
    Stand,
    Raising,
    Lowering,
}

/// Presentation of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonView {
    pub style: ButtonStyle,
    pub label: ButtonLabel,
    /// Click animation running
    pub clicking: bool,
}

/// Derive the presentation of a button
pub fn button_view(
    button: ButtonId,
    state: DeskState,
    config: &DeskConfig,
    snapshot: &Snapshot,
    clicking: bool,
) -> ButtonView {
    let bounds = config.bounds(snapshot.unit);
    let margin = config.thresholds.zone_margin;
    let height = snapshot.height;

    let clear_sit = in_clear_sit_zone(config, snapshot);
    let clear_stand = in_clear_stand_zone(config, snapshot);
    let between_zones = !clear_sit && !clear_stand;

    let (towards, resting_state, on_side) = match button {
        ButtonId::Stand => (
            state == DeskState::Raising && height < bounds.stand - margin,
            clear_stand && state == DeskState::Stand,
            height >= bounds.midpoint(),
        ),
        ButtonId::Sit => (
            state == DeskState::Lowering && height > bounds.sit + margin,
            clear_sit && state == DeskState::Sit,
            height < bounds.midpoint(),
        ),
    };

    let style = if towards {
        ButtonStyle::MotionTowards
    } else if state.is_moving() {
        ButtonStyle::IdleDuringMotion
    } else if resting_state {
        ButtonStyle::Active
    } else if between_zones && on_side {
        ButtonStyle::Outline
    } else {
        ButtonStyle::Muted
    };

    let label = match (button, towards) {
        (ButtonId::Stand, true) => ButtonLabel::Raising,
        (ButtonId::Stand, false) => ButtonLabel::Stand,
        (ButtonId::Sit, true) => ButtonLabel::Lowering,
        (ButtonId::Sit, false) => ButtonLabel::Sit,
    };

    ButtonView {
        style,
        label,
        clicking,
    }
}

/// Buttons currently running their click animation
///
/// Each button has at most one pending deadline; pressing again replaces it.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickAnimations {
    /// (button, deadline ms)
    active: Vec<(ButtonId, u64), 2>,
}

impl ClickAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the animation for a button
    pub fn start(&mut self, button: ButtonId, now_ms: u64, duration_ms: u64) {
        let deadline = now_ms.saturating_add(duration_ms);
        match self.active.iter_mut().find(|(b, _)| *b == button) {
            Some(entry) => entry.1 = deadline,
            None => {
                // Capacity matches the number of buttons
                let _ = self.active.push((button, deadline));
            }
        }
    }

    /// Check if a button is animating
    pub fn is_animating(&self, button: ButtonId) -> bool {
        self.active.iter().any(|(b, _)| *b == button)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.active.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Remove finished animations
    ///
    /// Returns `true` if any animation ended.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|(_, deadline)| now_ms < *deadline);
        self.active.len() != before
    }

    /// Drop all animations
    pub fn clear(&mut self) {
        self.active.clear();
    }
}
