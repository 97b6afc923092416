//! Preset command translation
//!
//! Converts a target height into a cover position percentage for the
//! desk entity. The intent is plain data; dispatching it is the host's job.

use crate::config::{DeskConfig, EntityId, HeightBounds};
use crate::math::round_half_up;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Request to move the desk to a position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandIntent {
    /// Desk entity to command
    pub entity: EntityId,
    /// Target position as a percentage of travel
    pub position_percent: i32,
}

/// Position percentage for a target height
///
/// Returns `None` when the ratio is not finite (e.g. zero travel) or does
/// not fit an `i32`. Targets below `min` produce negative percentages.
pub fn position_percent(bounds: &HeightBounds, target: f64) -> Option<i32> {
    let ratio = (target - bounds.min) / bounds.travel();
    let percent = round_half_up(ratio * 100.0)?;
    i32::try_from(percent).ok()
}

/// Translate a preset target into a command intent
///
/// Targets above `max` are dropped silently.
pub fn request_preset(
    config: &DeskConfig,
    bounds: &HeightBounds,
    target: f64,
) -> Option<CommandIntent> {
    if target > bounds.max {
        return None;
    }

    let position_percent = position_percent(bounds, target)?;
    Some(CommandIntent {
        entity: config.desk.clone(),
        position_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> DeskConfig {
        DeskConfig::new("cover.desk", "sensor.desk_height")
            .unwrap()
            .with_travel(63.0, 127.0)
            .with_targets(78.0, 108.0)
    }

    fn bounds() -> HeightBounds {
        HeightBounds::CENTIMETERS
    }

    #[test]
    fn test_sit_and_stand_targets() {
        let intent = request_preset(&config(), &bounds(), 78.0).unwrap();
        assert_eq!(intent.position_percent, 23);
        assert_eq!(intent.entity.as_str(), "cover.desk");

        let intent = request_preset(&config(), &bounds(), 108.0).unwrap();
        assert_eq!(intent.position_percent, 70);
    }

    #[test]
    fn test_travel_ends() {
        assert_eq!(position_percent(&bounds(), 63.0), Some(0));
        assert_eq!(position_percent(&bounds(), 127.0), Some(100));
    }

    #[test]
    fn test_above_max_dropped() {
        assert_eq!(request_preset(&config(), &bounds(), 127.01), None);
        assert_eq!(request_preset(&config(), &bounds(), 200.0), None);
    }

    #[test]
    fn test_below_min_not_rejected() {
        let intent = request_preset(&config(), &bounds(), 55.0).unwrap();
        assert_eq!(intent.position_percent, -12);
    }

    #[test]
    fn test_zero_travel_yields_nothing() {
        let flat = HeightBounds {
            min: 80.0,
            max: 80.0,
            sit: 80.0,
            stand: 80.0,
        };
        // 0 / 0 is NaN
        assert_eq!(request_preset(&config(), &flat, 80.0), None);
    }

    #[test]
    fn test_nan_target_yields_nothing() {
        assert_eq!(request_preset(&config(), &bounds(), f64::NAN), None);
    }

    proptest! {
        #[test]
        fn prop_above_max_never_commands(excess in 0.001f64..1000.0) {
            let b = bounds();
            prop_assert!(request_preset(&config(), &b, b.max + excess).is_none());
        }

        #[test]
        fn prop_in_range_percent_bounded(target in 63.0f64..=127.0) {
            let intent = request_preset(&config(), &bounds(), target).unwrap();
            prop_assert!((0..=100).contains(&intent.position_percent));
        }

        #[test]
        fn prop_percent_monotonic(a in 63.0f64..=127.0, b in 63.0f64..=127.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = position_percent(&bounds(), lo).unwrap();
            let p_hi = position_percent(&bounds(), hi).unwrap();
            prop_assert!(p_lo <= p_hi);
        }
    }
}
