//! Per-card session
//!
//! `DeskCard` owns everything a single card instance mutates: the previous
//! height, the motion session and the click animations. No state is shared
//! between cards.

use crate::command::{request_preset, CommandIntent};
use crate::config::{ConfigError, DeskConfig, HeightBounds};
use crate::ingest::{qualifying_direction, SampleIngest, Snapshot};
use crate::math::round_to_tenth;
use crate::presentation::{button_view, ButtonId, ButtonView, ClickAnimations};
use crate::state::{
    current_state, in_clear_sit_zone, in_clear_stand_zone, DeskState, MotionDirection,
    MotionSession,
};

/// Effect of a snapshot on the motion session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateOutcome {
    /// No previous sample to compare against
    FirstSample,
    /// Delta at or below the noise floor
    Quiet,
    /// Idle session became active
    MotionStarted(MotionDirection),
    /// Active session extended
    MotionExtended(MotionDirection),
}

impl UpdateOutcome {
    /// Check if the motion session was started or extended
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            UpdateOutcome::MotionStarted(_) | UpdateOutcome::MotionExtended(_)
        )
    }
}

/// State owned by one card instance
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeskCard {
    config: DeskConfig,
    snapshot: Snapshot,
    ingest: SampleIngest,
    motion: MotionSession,
    clicks: ClickAnimations,
}

impl DeskCard {
    /// Create a card
    ///
    /// Fails if the configuration lacks a desk or height sensor.
    pub fn new(config: DeskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            snapshot: Snapshot::default(),
            ingest: SampleIngest::new(),
            motion: MotionSession::new(),
            clicks: ClickAnimations::new(),
        })
    }

    /// Replace the configuration, keeping the session
    ///
    /// A different height sensor makes the previous height meaningless, so
    /// the next sample after such a change yields no delta.
    pub fn reconfigure(&mut self, config: DeskConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.height_sensor != self.config.height_sensor {
            self.ingest.reset();
        }
        self.config = config;
        Ok(())
    }

    /// Replace the snapshot without classifying a delta
    ///
    /// Used after a reconfiguration, when the sensors behind the snapshot
    /// may have changed.
    pub fn resync(&mut self, snapshot: Snapshot) {
        self.ingest.seed(snapshot.height);
        self.snapshot = snapshot;
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn motion(&self) -> &MotionSession {
        &self.motion
    }

    /// Bounds resolved for the latest snapshot's unit
    pub fn bounds(&self) -> HeightBounds {
        self.config.bounds(self.snapshot.unit)
    }

    /// Feed the next snapshot
    ///
    /// Due deadlines fire first so an episode that already expired is not
    /// extended by a late sample. Whether that expiry needs a redraw is not
    /// reported here: hosts that redraw on expiry call `poll` before
    /// `update`.
    pub fn update(&mut self, snapshot: Snapshot, now_ms: u64) -> UpdateOutcome {
        self.poll(now_ms);

        let delta = self.ingest.ingest(snapshot.height);
        self.snapshot = snapshot;

        let Some(delta) = delta else {
            return UpdateOutcome::FirstSample;
        };

        let thresholds = self.config.thresholds;
        match qualifying_direction(delta, thresholds.noise_floor) {
            Some(direction) => {
                let was_active = self.motion.is_active();
                self.motion
                    .observe(direction, now_ms, thresholds.quiet_window_ms);
                if was_active {
                    UpdateOutcome::MotionExtended(direction)
                } else {
                    UpdateOutcome::MotionStarted(direction)
                }
            }
            None => UpdateOutcome::Quiet,
        }
    }

    /// Fire due deadlines
    ///
    /// Returns `true` if anything visible changed and the card should be
    /// redrawn.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let motion_ended = self.motion.poll(now_ms);
        let clicks_ended = self.clicks.poll(now_ms);
        motion_ended || clicks_ended
    }

    /// Earliest pending deadline, for the host's single timer
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.motion.deadline(), self.clicks.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Current desk state
    pub fn state(&self) -> DeskState {
        current_state(&self.config, &self.snapshot, &self.motion)
    }

    pub fn in_clear_sit_zone(&self) -> bool {
        in_clear_sit_zone(&self.config, &self.snapshot)
    }

    pub fn in_clear_stand_zone(&self) -> bool {
        in_clear_stand_zone(&self.config, &self.snapshot)
    }

    /// Gauge fill fraction
    pub fn alpha(&self) -> f64 {
        self.bounds().alpha(self.snapshot.height)
    }

    /// Height rounded for display
    pub fn display_height(&self) -> f64 {
        round_to_tenth(self.snapshot.height)
    }

    /// Presentation of a sit/stand button
    pub fn button(&self, button: ButtonId) -> ButtonView {
        button_view(
            button,
            self.state(),
            &self.config,
            &self.snapshot,
            self.clicks.is_animating(button),
        )
    }

    /// Target height behind a sit/stand button
    pub fn target_for(&self, button: ButtonId) -> f64 {
        let bounds = self.bounds();
        match button {
            ButtonId::Sit => bounds.sit,
            ButtonId::Stand => bounds.stand,
        }
    }

    /// Press a sit/stand button
    ///
    /// Targets above `max` are dropped without animating.
    pub fn press(&mut self, button: ButtonId, now_ms: u64) -> Option<CommandIntent> {
        let target = self.target_for(button);
        if target > self.bounds().max {
            return None;
        }

        self.clicks
            .start(button, now_ms, self.config.thresholds.click_animation_ms);
        self.press_target(target)
    }

    /// Translate an arbitrary target height
    pub fn press_target(&self, target: f64) -> Option<CommandIntent> {
        request_preset(&self.config, &self.bounds(), target)
    }

    /// Translate a configured preset by index
    pub fn press_preset(&self, index: usize) -> Option<CommandIntent> {
        let preset = self.config.presets.get(index)?;
        self.press_target(preset.target)
    }

    /// Tear down: cancel pending deadlines
    pub fn dispose(&mut self) {
        self.motion.cancel();
        self.clicks.clear();
    }
}
