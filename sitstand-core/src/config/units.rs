//! Height units and per-unit defaults
//!
//! The height sensor reports its unit as an attribute. Unconfigured travel
//! bounds and sit/stand targets fall back to the defaults for that unit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit reported by the height sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeightUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "cm"))]
    Centimeters,
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    Inches,
}

impl HeightUnit {
    /// Interpret a `unit_of_measurement` attribute
    ///
    /// Anything other than `in` is treated as centimeters.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "in" => HeightUnit::Inches,
            _ => HeightUnit::Centimeters,
        }
    }

    /// Unit symbol shown next to the height
    pub fn symbol(&self) -> &'static str {
        match self {
            HeightUnit::Centimeters => "cm",
            HeightUnit::Inches => "in",
        }
    }

    /// Default bounds and targets for this unit
    pub const fn defaults(&self) -> HeightBounds {
        match self {
            HeightUnit::Centimeters => HeightBounds::CENTIMETERS,
            HeightUnit::Inches => HeightBounds::INCHES,
        }
    }
}

/// Resolved travel bounds and sit/stand targets
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeightBounds {
    /// Lowest reachable height
    pub min: f64,
    /// Highest reachable height
    pub max: f64,
    /// Sitting target
    pub sit: f64,
    /// Standing target
    pub stand: f64,
}

impl HeightBounds {
    pub const CENTIMETERS: Self = Self {
        min: 63.0,
        max: 127.0,
        sit: 78.0,
        stand: 108.0,
    };

    pub const INCHES: Self = Self {
        min: 24.75,
        max: 50.0,
        sit: 30.8,
        stand: 42.5,
    };

    /// Total travel distance
    pub fn travel(&self) -> f64 {
        self.max - self.min
    }

    /// Point halfway between the sit and stand targets
    pub fn midpoint(&self) -> f64 {
        (self.sit + self.stand) / 2.0
    }

    /// Fraction of the travel range covered at `height` (0 at min, 1 at max)
    ///
    /// Not clamped: readings outside the configured range produce values
    /// outside `[0, 1]`.
    pub fn alpha(&self, height: f64) -> f64 {
        (height - self.min) / self.travel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_symbol() {
        assert_eq!(HeightUnit::from_symbol("in"), HeightUnit::Inches);
        assert_eq!(HeightUnit::from_symbol("cm"), HeightUnit::Centimeters);
        assert_eq!(HeightUnit::from_symbol(""), HeightUnit::Centimeters);
        assert_eq!(HeightUnit::from_symbol("mm"), HeightUnit::Centimeters);
    }

    #[test]
    fn test_defaults_per_unit() {
        let cm = HeightUnit::Centimeters.defaults();
        assert_eq!(cm.min, 63.0);
        assert_eq!(cm.max, 127.0);
        assert_eq!(cm.sit, 78.0);
        assert_eq!(cm.stand, 108.0);

        let inches = HeightUnit::Inches.defaults();
        assert_eq!(inches.min, 24.75);
        assert_eq!(inches.stand, 42.5);
    }

    #[test]
    fn test_midpoint_and_alpha() {
        let bounds = HeightBounds::CENTIMETERS;
        assert_eq!(bounds.midpoint(), 93.0);
        assert_eq!(bounds.alpha(63.0), 0.0);
        assert_eq!(bounds.alpha(127.0), 1.0);
        assert_eq!(bounds.alpha(95.0), 0.5);
    }
}
