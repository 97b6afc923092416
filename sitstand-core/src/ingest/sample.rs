//! Snapshots and height deltas
//!
//! The host delivers whole-state snapshots one at a time, in order. The
//! ingest remembers the previous height and reports the delta against it.

use crate::config::HeightUnit;
use crate::math::abs;
use crate::state::{DeskState, MotionDirection};

/// Sensor values observed on one update tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Desk height (0 when missing or unparseable)
    pub height: f64,
    /// Unit reported by the height sensor
    pub unit: HeightUnit,
    /// Connection sensor (true when not configured)
    pub connected: bool,
    /// Motion sensor (false when not configured)
    pub moving: bool,
    /// Value of the explicit state sensor, when configured and recognised
    pub reported_state: Option<DeskState>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            height: 0.0,
            unit: HeightUnit::Centimeters,
            connected: true,
            moving: false,
            reported_state: None,
        }
    }
}

impl Snapshot {
    /// Snapshot with only a height reading
    pub fn new(height: f64) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: HeightUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_moving(mut self, moving: bool) -> Self {
        self.moving = moving;
        self
    }

    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn with_reported_state(mut self, state: Option<DeskState>) -> Self {
        self.reported_state = state;
        self
    }
}

/// Remembers the previous height and computes deltas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleIngest {
    previous: Option<f64>,
}

impl SampleIngest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a height and return the delta against the previous one
    ///
    /// The first sample has no delta.
    pub fn ingest(&mut self, height: f64) -> Option<f64> {
        let delta = self.previous.map(|previous| height - previous);
        self.previous = Some(height);
        delta
    }

    /// Last recorded height
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Record a height without producing a delta
    pub fn seed(&mut self, height: f64) {
        self.previous = Some(height);
    }

    /// Forget the previous height
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Classify a delta against the noise floor
///
/// Deltas with magnitude at or below `noise_floor` are jitter and yield
/// `None`; they neither start nor extend a motion session.
pub fn qualifying_direction(delta: f64, noise_floor: f64) -> Option<MotionDirection> {
    if abs(delta) > noise_floor {
        Some(MotionDirection::from_delta(delta))
    } else {
        None
    }
}

/// Parse a height sensor state
///
/// Accepts a leading numeric prefix (`"78.5 cm"` reads as 78.5). Missing,
/// unparseable and non-finite readings all degrade to 0.
pub fn parse_height(raw: &str) -> f64 {
    let raw = raw.trim_start();

    let prefix_len = raw
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    // Longest prefix that parses as a number
    (1..=prefix_len)
        .rev()
        .find_map(|len| raw[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_has_no_delta() {
        let mut ingest = SampleIngest::new();
        assert_eq!(ingest.ingest(78.0), None);
        assert_eq!(ingest.previous(), Some(78.0));
    }

    #[test]
    fn test_delta_against_previous() {
        let mut ingest = SampleIngest::new();
        ingest.ingest(78.0);
        assert_eq!(ingest.ingest(90.0), Some(12.0));
        assert_eq!(ingest.ingest(85.0), Some(-5.0));
    }

    #[test]
    fn test_reset_forgets_previous() {
        let mut ingest = SampleIngest::new();
        ingest.ingest(78.0);
        ingest.reset();
        assert_eq!(ingest.ingest(90.0), None);
    }

    #[test]
    fn test_noise_floor_is_exclusive() {
        assert_eq!(qualifying_direction(0.1, 0.1), None);
        assert_eq!(qualifying_direction(-0.1, 0.1), None);
        assert_eq!(qualifying_direction(0.0, 0.1), None);
        assert_eq!(
            qualifying_direction(0.11, 0.1),
            Some(MotionDirection::Raising)
        );
        assert_eq!(
            qualifying_direction(-0.11, 0.1),
            Some(MotionDirection::Lowering)
        );
    }

    #[test]
    fn test_parse_height() {
        assert_eq!(parse_height("78.5"), 78.5);
        assert_eq!(parse_height(" 108 "), 108.0);
        assert_eq!(parse_height("78.5 cm"), 78.5);
        assert_eq!(parse_height("-3"), -3.0);
    }

    #[test]
    fn test_parse_height_degrades_to_zero() {
        assert_eq!(parse_height(""), 0.0);
        assert_eq!(parse_height("unavailable"), 0.0);
        assert_eq!(parse_height("unknown"), 0.0);
        assert_eq!(parse_height("inf"), 0.0);
        assert_eq!(parse_height("NaN"), 0.0);
    }
}
