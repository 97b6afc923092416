//! Host state store access
//!
//! The dashboard host exposes the last-known state of every entity. The
//! card only ever performs synchronous lookups by identifier, so the host
//! side is modelled by a small trait plus an in-memory implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sitstand_core::config::DeskConfig;
use sitstand_core::ingest::parse_height;
use sitstand_core::{DeskState, HeightUnit, Snapshot};
use tracing::warn;

/// Binary sensor "on" state
pub const STATE_ON: &str = "on";

/// Entity attributes the card reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
}

/// Last-known state of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    pub state: String,
    #[serde(default)]
    pub attributes: EntityAttributes,
}

impl EntityState {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: EntityAttributes::default(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.attributes.unit_of_measurement = Some(unit.into());
        self
    }

    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.attributes.friendly_name = Some(name.into());
        self
    }

    /// Check if a binary sensor reports "on"
    pub fn is_on(&self) -> bool {
        self.state == STATE_ON
    }
}

/// Snapshot-style lookup of entity states
pub trait StateStore {
    /// Last-known state of an entity, if the host knows it
    fn entity(&self, entity_id: &str) -> Option<&EntityState>;

    /// State string of an entity
    fn state_of(&self, entity_id: &str) -> Option<&str> {
        self.entity(entity_id).map(|e| e.state.as_str())
    }
}

/// In-memory state store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    entities: HashMap<String, EntityState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, entity_id: impl Into<String>, state: EntityState) -> Self {
        self.insert(entity_id, state);
        self
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.entities.insert(entity_id.into(), state);
    }

    /// Replace only the state string, keeping attributes
    pub fn set_state(&mut self, entity_id: &str, state: impl Into<String>) {
        self.entities
            .entry(entity_id.to_string())
            .or_default()
            .state = state.into();
    }

    pub fn remove(&mut self, entity_id: &str) -> Option<EntityState> {
        self.entities.remove(entity_id)
    }

    /// All known entity identifiers
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn entity(&self, entity_id: &str) -> Option<&EntityState> {
        self.entities.get(entity_id)
    }
}

/// Unit reported by the height sensor (centimeters when absent)
pub fn height_unit<S: StateStore + ?Sized>(config: &DeskConfig, store: &S) -> HeightUnit {
    store
        .entity(&config.height_sensor)
        .and_then(|e| e.attributes.unit_of_measurement.as_deref())
        .map(HeightUnit::from_symbol)
        .unwrap_or_default()
}

/// Read the sensors named by a configuration into a snapshot
///
/// Never fails: missing or unparseable values degrade to fixed defaults.
pub fn read_snapshot<S: StateStore + ?Sized>(config: &DeskConfig, store: &S) -> Snapshot {
    let height = store
        .state_of(&config.height_sensor)
        .map(parse_height)
        .unwrap_or(0.0);

    let connected = match &config.connection_sensor {
        Some(id) => store.entity(id).is_some_and(EntityState::is_on),
        None => true,
    };

    let moving = match &config.moving_sensor {
        Some(id) => store.entity(id).is_some_and(EntityState::is_on),
        None => false,
    };

    let reported_state = config.state_sensor.as_ref().and_then(|id| {
        let raw = store.state_of(id)?;
        let state = DeskState::from_reported(raw);
        if state.is_none() {
            warn!(entity = id.as_str(), value = raw, "unrecognised desk state");
        }
        state
    });

    Snapshot {
        height,
        unit: height_unit(config, store),
        connected,
        moving,
        reported_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeskConfig {
        DeskConfig::new("cover.desk", "sensor.desk_height").unwrap()
    }

    #[test]
    fn test_snapshot_defaults_without_optional_sensors() {
        let store = MemoryStore::new().with("sensor.desk_height", EntityState::new("78.4"));
        let snapshot = read_snapshot(&config(), &store);

        assert_eq!(snapshot.height, 78.4);
        assert_eq!(snapshot.unit, HeightUnit::Centimeters);
        assert!(snapshot.connected);
        assert!(!snapshot.moving);
        assert_eq!(snapshot.reported_state, None);
    }

    #[test]
    fn test_missing_height_degrades_to_zero() {
        let snapshot = read_snapshot(&config(), &MemoryStore::new());
        assert_eq!(snapshot.height, 0.0);

        let store = MemoryStore::new().with("sensor.desk_height", EntityState::new("unavailable"));
        assert_eq!(read_snapshot(&config(), &store).height, 0.0);
    }

    #[test]
    fn test_binary_sensors() {
        let config = config()
            .with_moving_sensor("binary_sensor.desk_moving")
            .unwrap()
            .with_connection_sensor("binary_sensor.desk_connection")
            .unwrap();

        let store = MemoryStore::new()
            .with("binary_sensor.desk_moving", EntityState::new("on"))
            .with("binary_sensor.desk_connection", EntityState::new("off"));
        let snapshot = read_snapshot(&config, &store);
        assert!(snapshot.moving);
        assert!(!snapshot.connected);

        // Configured but absent reads as off
        let snapshot = read_snapshot(&config, &MemoryStore::new());
        assert!(!snapshot.moving);
        assert!(!snapshot.connected);
    }

    #[test]
    fn test_unit_attribute() {
        let store = MemoryStore::new().with(
            "sensor.desk_height",
            EntityState::new("30.8").with_unit("in"),
        );
        assert_eq!(read_snapshot(&config(), &store).unit, HeightUnit::Inches);
    }

    #[test]
    fn test_reported_state() {
        let config = config().with_state_sensor("sensor.desk_state").unwrap();

        let store = MemoryStore::new().with("sensor.desk_state", EntityState::new("raising"));
        assert_eq!(
            read_snapshot(&config, &store).reported_state,
            Some(DeskState::Raising)
        );

        let store = MemoryStore::new().with("sensor.desk_state", EntityState::new("unknown"));
        assert_eq!(read_snapshot(&config, &store).reported_state, None);
    }

    #[test]
    fn test_set_state_keeps_attributes() {
        let mut store = MemoryStore::new().with(
            "sensor.desk_height",
            EntityState::new("78").with_unit("cm"),
        );
        store.set_state("sensor.desk_height", "90");

        let entity = store.entity("sensor.desk_height").unwrap();
        assert_eq!(entity.state, "90");
        assert_eq!(entity.attributes.unit_of_measurement.as_deref(), Some("cm"));
    }

    #[test]
    fn test_store_from_json() {
        let json = r#"{
            "sensor.desk_height": {
                "state": "101.2",
                "attributes": { "unit_of_measurement": "cm" }
            },
            "cover.desk": { "state": "open" }
        }"#;
        let store: MemoryStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.state_of("cover.desk"), Some("open"));
        assert_eq!(read_snapshot(&config(), &store).height, 101.2);
    }
}
