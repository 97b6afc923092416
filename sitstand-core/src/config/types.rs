//! Card configuration type definitions
//!
//! One `DeskConfig` describes one card instance. It is supplied by the host
//! and treated as immutable once validated. Heights are expressed in the
//! unit reported by the height sensor.

use core::fmt;

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::units::{HeightBounds, HeightUnit};

/// Maximum entity identifier length
pub const MAX_ENTITY_ID_LEN: usize = 64;

/// Maximum card title length
pub const MAX_NAME_LEN: usize = 64;

/// Maximum preset label length
pub const MAX_LABEL_LEN: usize = 32;

/// Maximum labelled presets per card
pub const MAX_PRESETS: usize = 8;

/// Deltas at or below this magnitude are treated as sensor jitter
pub const DEFAULT_NOISE_FLOOR: f64 = 0.1;

/// Distance from the target at which an active motion counts as arrived
pub const DEFAULT_ARRIVAL_SNAP: f64 = 0.5;

/// Width of the clear sit/stand zones around each target
pub const DEFAULT_ZONE_MARGIN: f64 = 1.0;

/// Quiet period after the last qualifying delta before motion ends
pub const DEFAULT_QUIET_WINDOW_MS: u64 = 2000;

/// Duration of the button click animation
pub const DEFAULT_CLICK_ANIMATION_MS: u64 = 600;

/// Identifier of a host entity (e.g. `cover.office_desk`)
pub type EntityId = String<MAX_ENTITY_ID_LEN>;

/// Configuration errors
///
/// Missing identifiers are the one fatal precondition: a card without a
/// desk or a height sensor must not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No desk entity configured
    MissingDesk,
    /// No height sensor entity configured
    MissingHeightSensor,
    /// Explicit `min_height` is not below `max_height`
    InvalidTravelRange,
    /// A configured height or threshold is NaN or infinite
    NonFiniteHeight,
    /// Entity identifier or label exceeds its capacity
    IdentifierTooLong,
    /// More than `MAX_PRESETS` presets
    TooManyPresets,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::MissingDesk => "desk entity is required",
            ConfigError::MissingHeightSensor => "height sensor entity is required",
            ConfigError::InvalidTravelRange => "min_height must be below max_height",
            ConfigError::NonFiniteHeight => "heights and thresholds must be finite",
            ConfigError::IdentifierTooLong => "identifier or label too long",
            ConfigError::TooManyPresets => "too many presets",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}

/// Heuristic thresholds used by the inference engine
///
/// Historical variants of the card disagree on these values, so they are
/// configuration rather than literals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Thresholds {
    /// Deltas with magnitude at or below this are ignored
    pub noise_floor: f64,
    /// Arrival distance for an active motion session
    pub arrival_snap: f64,
    /// Clear zone width around the sit and stand targets
    pub zone_margin: f64,
    /// Motion session quiet window (ms)
    pub quiet_window_ms: u64,
    /// Click animation duration (ms)
    pub click_animation_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
            arrival_snap: DEFAULT_ARRIVAL_SNAP,
            zone_margin: DEFAULT_ZONE_MARGIN,
            quiet_window_ms: DEFAULT_QUIET_WINDOW_MS,
            click_animation_ms: DEFAULT_CLICK_ANIMATION_MS,
        }
    }
}

impl Thresholds {
    fn is_finite(&self) -> bool {
        self.noise_floor.is_finite() && self.arrival_snap.is_finite() && self.zone_margin.is_finite()
    }
}

/// Labelled preset target
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Preset {
    /// Target height
    pub target: f64,
    /// Display label
    pub label: String<MAX_LABEL_LEN>,
}

/// Card configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeskConfig {
    /// Card title (falls back to the desk's friendly name)
    pub name: Option<String<MAX_NAME_LEN>>,
    /// Hide the title row
    #[cfg_attr(feature = "serde", serde(default))]
    pub hide_title: bool,
    /// Controllable desk (cover) entity
    #[cfg_attr(feature = "serde", serde(default))]
    pub desk: EntityId,
    /// Numeric height sensor entity
    #[cfg_attr(feature = "serde", serde(default))]
    pub height_sensor: EntityId,
    /// Optional binary sensor reporting desk motion
    pub moving_sensor: Option<EntityId>,
    /// Optional binary sensor reporting the desk connection
    pub connection_sensor: Option<EntityId>,
    /// Optional sensor reporting the desk state directly
    pub state_sensor: Option<EntityId>,
    /// Lowest travel height (unit default if absent)
    pub min_height: Option<f64>,
    /// Highest travel height (unit default if absent)
    pub max_height: Option<f64>,
    /// Sitting target (unit default if absent)
    pub sit_height: Option<f64>,
    /// Standing target (unit default if absent)
    pub stand_height: Option<f64>,
    /// Additional labelled presets
    #[cfg_attr(feature = "serde", serde(default))]
    pub presets: Vec<Preset, MAX_PRESETS>,
    /// Heuristic thresholds
    #[cfg_attr(feature = "serde", serde(default))]
    pub thresholds: Thresholds,
}

/// Copy a `&str` into a fixed-capacity string
pub fn bounded<const N: usize>(value: &str) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    out.push_str(value)
        .map_err(|_| ConfigError::IdentifierTooLong)?;
    Ok(out)
}

impl DeskConfig {
    /// Create a configuration for a desk and its height sensor
    pub fn new(desk: &str, height_sensor: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            desk: bounded(desk)?,
            height_sensor: bounded(height_sensor)?,
            ..Self::default()
        })
    }

    /// Set explicit travel bounds
    pub fn with_travel(mut self, min_height: f64, max_height: f64) -> Self {
        self.min_height = Some(min_height);
        self.max_height = Some(max_height);
        self
    }

    /// Set explicit sit and stand targets
    pub fn with_targets(mut self, sit_height: f64, stand_height: f64) -> Self {
        self.sit_height = Some(sit_height);
        self.stand_height = Some(stand_height);
        self
    }

    /// Attach a binary motion sensor
    pub fn with_moving_sensor(mut self, entity: &str) -> Result<Self, ConfigError> {
        self.moving_sensor = Some(bounded(entity)?);
        Ok(self)
    }

    /// Attach a binary connection sensor
    pub fn with_connection_sensor(mut self, entity: &str) -> Result<Self, ConfigError> {
        self.connection_sensor = Some(bounded(entity)?);
        Ok(self)
    }

    /// Attach an explicit desk state sensor
    pub fn with_state_sensor(mut self, entity: &str) -> Result<Self, ConfigError> {
        self.state_sensor = Some(bounded(entity)?);
        Ok(self)
    }

    /// Replace the heuristic thresholds
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Append a labelled preset
    pub fn add_preset(&mut self, target: f64, label: &str) -> Result<(), ConfigError> {
        let preset = Preset {
            target,
            label: bounded(label)?,
        };
        self.presets
            .push(preset)
            .map_err(|_| ConfigError::TooManyPresets)
    }

    /// Check the construction-time preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.desk.trim().is_empty() {
            return Err(ConfigError::MissingDesk);
        }
        if self.height_sensor.trim().is_empty() {
            return Err(ConfigError::MissingHeightSensor);
        }

        let heights = [
            self.min_height,
            self.max_height,
            self.sit_height,
            self.stand_height,
        ];
        if heights.iter().flatten().any(|h| !h.is_finite())
            || self.presets.iter().any(|p| !p.target.is_finite())
            || !self.thresholds.is_finite()
        {
            return Err(ConfigError::NonFiniteHeight);
        }

        if let (Some(min), Some(max)) = (self.min_height, self.max_height) {
            if min >= max {
                return Err(ConfigError::InvalidTravelRange);
            }
        }

        Ok(())
    }

    /// Resolve bounds and targets, filling gaps from the unit defaults
    pub fn bounds(&self, unit: HeightUnit) -> HeightBounds {
        let defaults = unit.defaults();
        HeightBounds {
            min: self.min_height.unwrap_or(defaults.min),
            max: self.max_height.unwrap_or(defaults.max),
            sit: self.sit_height.unwrap_or(defaults.sit),
            stand: self.stand_height.unwrap_or(defaults.stand),
        }
    }

    /// Whether a motion sensor is configured
    pub fn has_moving_sensor(&self) -> bool {
        self.moving_sensor.is_some()
    }

    /// Whether an explicit state sensor is configured
    pub fn has_state_sensor(&self) -> bool {
        self.state_sensor.is_some()
    }
}
