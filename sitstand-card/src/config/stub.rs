//! Stub configuration discovery
//!
//! When a card is first added, entities are guessed from their identifiers
//! and the height defaults are filled in for the detected unit.

use sitstand_core::config::bounded;
use sitstand_core::{DeskConfig, HeightUnit};
use tracing::debug;

use crate::error::CardError;
use crate::states::StateStore;

/// Split `domain.object_id`
fn domain_of(entity_id: &str) -> &str {
    entity_id.split_once('.').map_or("", |(domain, _)| domain)
}

/// First identifier in `domain` whose id contains `needle`
fn find<'a>(entity_ids: &[&'a str], domain: &str, needle: &str) -> Option<&'a str> {
    entity_ids
        .iter()
        .copied()
        .find(|id| domain_of(id) == domain && id.contains(needle))
}

/// Build a starting configuration from the entities the host knows about
///
/// Identifiers that cannot be found are left empty, so the result still
/// has to pass `validate` before a card can be created from it.
pub fn stub_config<S: StateStore + ?Sized>(
    store: &S,
    entity_ids: &[&str],
) -> Result<DeskConfig, CardError> {
    let mut config = DeskConfig::default();

    if let Some(desk) = find(entity_ids, "cover", "desk") {
        config.desk = bounded(desk)?;
    }

    let height_sensor = find(entity_ids, "sensor", "desk_height");
    if let Some(sensor) = height_sensor {
        config.height_sensor = bounded(sensor)?;
    }
    if let Some(sensor) = find(entity_ids, "binary_sensor", "desk_moving") {
        config.moving_sensor = Some(bounded(sensor)?);
    }
    if let Some(sensor) = find(entity_ids, "binary_sensor", "desk_connection") {
        config.connection_sensor = Some(bounded(sensor)?);
    }

    let unit = height_sensor
        .and_then(|id| store.entity(id))
        .and_then(|e| e.attributes.unit_of_measurement.as_deref())
        .map(HeightUnit::from_symbol)
        .unwrap_or_default();

    let defaults = unit.defaults();
    config.min_height = Some(defaults.min);
    config.max_height = Some(defaults.max);
    config.sit_height = Some(defaults.sit);
    config.stand_height = Some(defaults.stand);

    debug!(
        desk = config.desk.as_str(),
        height_sensor = config.height_sensor.as_str(),
        unit = unit.symbol(),
        "stub configuration"
    );

    Ok(config)
}
