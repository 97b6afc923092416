//! Desk state inference
//!
//! Reconciles three signal sources of differing reliability into one
//! `DeskState`. Rules are evaluated in priority order and the first match
//! wins:
//!
//! 0. Reported state from an explicit state sensor
//! 1. Active motion session, snapping to the target once arrived
//! 2. Motion sensor, with direction guessed from the midpoint
//! 3. Static proximity to the stand or sit target
//! 4. Static midpoint split

use crate::config::{DeskConfig, HeightBounds};
use crate::ingest::Snapshot;

use super::machine::{DeskState, MotionDirection};
use super::session::MotionSession;

/// Infer the current desk state
pub fn current_state(config: &DeskConfig, snapshot: &Snapshot, session: &MotionSession) -> DeskState {
    let bounds = config.bounds(snapshot.unit);
    let thresholds = &config.thresholds;
    let height = snapshot.height;

    if config.has_state_sensor() {
        if let Some(reported) = snapshot.reported_state {
            return reported;
        }
    }

    if let Some(direction) = session.direction() {
        return match direction {
            MotionDirection::Raising if height >= bounds.stand - thresholds.arrival_snap => {
                DeskState::Stand
            }
            MotionDirection::Lowering if height <= bounds.sit + thresholds.arrival_snap => {
                DeskState::Sit
            }
            _ => direction.into(),
        };
    }

    // Direction is guessed from position only. A desk moving between two
    // points on the same side of the midpoint can be reported backwards.
    if config.has_moving_sensor() && snapshot.moving {
        return if height >= bounds.midpoint() {
            DeskState::Lowering
        } else {
            DeskState::Raising
        };
    }

    static_state(&bounds, height, thresholds.zone_margin)
}

/// Classification used when nothing indicates motion
pub fn static_state(bounds: &HeightBounds, height: f64, zone_margin: f64) -> DeskState {
    if height >= bounds.stand - zone_margin {
        return DeskState::Stand;
    }
    if height <= bounds.sit + zone_margin {
        return DeskState::Sit;
    }

    if height < bounds.midpoint() {
        DeskState::Sit
    } else {
        DeskState::Stand
    }
}

/// Check if the height is within the clear sit zone
pub fn in_clear_sit_zone(config: &DeskConfig, snapshot: &Snapshot) -> bool {
    let bounds = config.bounds(snapshot.unit);
    snapshot.height <= bounds.sit + config.thresholds.zone_margin
}

/// Check if the height is within the clear stand zone
pub fn in_clear_stand_zone(config: &DeskConfig, snapshot: &Snapshot) -> bool {
    let bounds = config.bounds(snapshot.unit);
    snapshot.height >= bounds.stand - config.thresholds.zone_margin
}
