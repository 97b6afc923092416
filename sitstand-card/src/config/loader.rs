//! Card configuration loading
//!
//! Cards are configured with TOML using the same keys as the dashboard
//! card's YAML:
//!
//! ```toml
//! desk = "cover.office_desk"
//! height_sensor = "sensor.office_desk_height"
//! moving_sensor = "binary_sensor.office_desk_moving"
//! min_height = 63
//! max_height = 127
//!
//! [[presets]]
//! target = 95
//! label = "Perch"
//!
//! [thresholds]
//! zone_margin = 2.0
//! ```

use std::fs;
use std::path::Path;

use sitstand_core::DeskConfig;
use tracing::{debug, info};

use crate::error::CardError;

/// Parse and validate a TOML card configuration
pub fn parse_config(input: &str) -> Result<DeskConfig, CardError> {
    let config: DeskConfig = toml::from_str(input)?;
    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Load a TOML card configuration from disk
pub fn load_config(path: &Path) -> Result<DeskConfig, CardError> {
    info!(path = %path.display(), "loading card configuration");

    let input = fs::read_to_string(path).map_err(|source| CardError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&input)
}

fn log_config_summary(config: &DeskConfig) {
    debug!(
        desk = config.desk.as_str(),
        height_sensor = config.height_sensor.as_str(),
        moving_sensor = config.moving_sensor.as_deref(),
        connection_sensor = config.connection_sensor.as_deref(),
        state_sensor = config.state_sensor.as_deref(),
        presets = config.presets.len(),
        "card configuration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitstand_core::ConfigError;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            name = "Office desk"
            desk = "cover.office_desk"
            height_sensor = "sensor.office_desk_height"
            moving_sensor = "binary_sensor.office_desk_moving"
            connection_sensor = "binary_sensor.office_desk_connection"
            min_height = 63
            max_height = 127
            sit_height = 78.5
            stand_height = 108

            [[presets]]
            target = 95
            label = "Perch"

            [thresholds]
            zone_margin = 2.0
            quiet_window_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("Office desk"));
        assert_eq!(config.desk.as_str(), "cover.office_desk");
        assert_eq!(config.min_height, Some(63.0));
        assert_eq!(config.sit_height, Some(78.5));
        assert_eq!(config.presets.len(), 1);
        assert_eq!(config.presets[0].label.as_str(), "Perch");
        assert_eq!(config.thresholds.zone_margin, 2.0);
        assert_eq!(config.thresholds.quiet_window_ms, 1500);
        // Unset thresholds keep their defaults
        assert_eq!(config.thresholds.noise_floor, 0.1);
        assert!(!config.hide_title);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config(
            r#"
            desk = "cover.desk"
            height_sensor = "sensor.desk_height"
            "#,
        )
        .unwrap();

        assert_eq!(config.min_height, None);
        assert_eq!(config.moving_sensor, None);
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_missing_desk_is_fatal() {
        let err = parse_config(r#"height_sensor = "sensor.desk_height""#).unwrap_err();
        assert!(matches!(err, CardError::Config(ConfigError::MissingDesk)));
    }

    #[test]
    fn test_missing_height_sensor_is_fatal() {
        let err = parse_config(r#"desk = "cover.desk""#).unwrap_err();
        assert!(matches!(
            err,
            CardError::Config(ConfigError::MissingHeightSensor)
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("desk = ").unwrap_err();
        assert!(matches!(err, CardError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/sitstand.toml")).unwrap_err();
        assert!(matches!(err, CardError::Io { .. }));
    }
}
