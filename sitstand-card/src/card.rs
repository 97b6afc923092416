//! Dashboard card adapter
//!
//! Couples a `DeskCard` session to a host state store and command sink:
//! - Decides whether a new set of host states warrants a redraw
//! - Feeds fresh snapshots into the session
//! - Exposes the single pending deadline the host should schedule
//! - Dispatches preset presses as service calls

use sitstand_core::config::DeskConfig;
use sitstand_core::presentation::{ButtonId, ButtonView};
use sitstand_core::{CommandIntent, DeskCard, DeskState, UpdateOutcome};
use tracing::{debug, info, warn};

use crate::dispatch::{CommandSink, MoreInfoRequest, ServiceCall};
use crate::error::CardError;
use crate::states::{read_snapshot, StateStore};

/// A card instance attached to a host
pub struct Card<S, K> {
    store: S,
    sink: K,
    session: DeskCard,
}

impl<S: StateStore, K: CommandSink> Card<S, K> {
    /// Create a card and prime it with the current host states
    ///
    /// Fails if the configuration lacks a desk or height sensor; such a
    /// card must not render.
    pub fn new(config: DeskConfig, store: S, sink: K, now_ms: u64) -> Result<Self, CardError> {
        let mut session = DeskCard::new(config)?;
        let snapshot = read_snapshot(session.config(), &store);
        session.update(snapshot, now_ms);

        info!(
            desk = session.config().desk.as_str(),
            state = session.state().as_str(),
            "card attached"
        );

        Ok(Self {
            store,
            sink,
            session,
        })
    }

    /// Replace the configuration
    ///
    /// The snapshot is re-read through the new configuration so added or
    /// swapped sensors take effect immediately.
    pub fn set_config(&mut self, config: DeskConfig) -> Result<(), CardError> {
        self.session.reconfigure(config)?;
        let snapshot = read_snapshot(self.session.config(), &self.store);
        self.session.resync(snapshot);

        debug!(
            height = snapshot.height,
            state = self.session.state().as_str(),
            "card reconfigured"
        );
        Ok(())
    }

    pub fn config(&self) -> &DeskConfig {
        self.session.config()
    }

    pub fn session(&self) -> &DeskCard {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Check if any entity the card depends on changed between two stores
    pub fn should_update(&self, next: &S) -> bool {
        let config = self.session.config();

        let entity_changed = |id: &str| self.store.entity(id) != next.entity(id);
        let state_changed = |id: &str| self.store.state_of(id) != next.state_of(id);

        entity_changed(config.desk.as_str())
            || state_changed(config.height_sensor.as_str())
            || config.moving_sensor.as_deref().is_some_and(state_changed)
            || config.connection_sensor.as_deref().is_some_and(state_changed)
            || config.state_sensor.as_deref().is_some_and(state_changed)
    }

    /// Receive a new set of host states
    ///
    /// Returns `true` if the card should be redrawn.
    pub fn on_states(&mut self, next: S, now_ms: u64) -> bool {
        let redraw = self.should_update(&next);
        self.store = next;

        // Expired deadlines still need a redraw even if nothing changed
        let expired = self.session.poll(now_ms);
        if !redraw {
            return expired;
        }

        let snapshot = read_snapshot(self.session.config(), &self.store);
        let outcome = self.session.update(snapshot, now_ms);
        match outcome {
            UpdateOutcome::MotionStarted(direction) => {
                debug!(height = snapshot.height, ?direction, "motion started");
            }
            UpdateOutcome::MotionExtended(direction) => {
                debug!(height = snapshot.height, ?direction, "motion extended");
            }
            UpdateOutcome::FirstSample | UpdateOutcome::Quiet => {}
        }

        true
    }

    /// Earliest time at which `on_timer` has work to do
    pub fn next_wakeup(&self) -> Option<u64> {
        self.session.next_deadline()
    }

    /// Fire due deadlines
    ///
    /// Returns `true` if the card should be redrawn.
    pub fn on_timer(&mut self, now_ms: u64) -> bool {
        let changed = self.session.poll(now_ms);
        if changed {
            debug!(now_ms, state = self.session.state().as_str(), "deadline fired");
        }
        changed
    }

    /// Current desk state
    pub fn state(&self) -> DeskState {
        self.session.state()
    }

    pub fn is_in_clear_sit_zone(&self) -> bool {
        self.session.in_clear_sit_zone()
    }

    pub fn is_in_clear_stand_zone(&self) -> bool {
        self.session.in_clear_stand_zone()
    }

    pub fn is_connected(&self) -> bool {
        self.session.snapshot().connected
    }

    pub fn button(&self, button: ButtonId) -> ButtonView {
        self.session.button(button)
    }

    /// Card title: configured name, desk friendly name, or desk id
    pub fn title(&self) -> String {
        let config = self.session.config();
        if let Some(name) = &config.name {
            return name.to_string();
        }

        self.store
            .entity(&config.desk)
            .and_then(|e| e.attributes.friendly_name.clone())
            .unwrap_or_else(|| config.desk.to_string())
    }

    /// Whether the title row is shown
    pub fn shows_title(&self) -> bool {
        !self.session.config().hide_title
    }

    /// Unit symbol for the height readout
    pub fn height_unit(&self) -> &'static str {
        self.session.snapshot().unit.symbol()
    }

    /// Press the stand button
    pub fn press_stand(&mut self, now_ms: u64) -> Option<CommandIntent> {
        self.press(ButtonId::Stand, now_ms)
    }

    /// Press the sit button
    pub fn press_sit(&mut self, now_ms: u64) -> Option<CommandIntent> {
        self.press(ButtonId::Sit, now_ms)
    }

    fn press(&mut self, button: ButtonId, now_ms: u64) -> Option<CommandIntent> {
        let intent = self.session.press(button, now_ms);
        if intent.is_none() {
            warn!(?button, target = self.session.target_for(button), "preset not dispatched");
        }
        self.dispatch(intent)
    }

    /// Press a labelled preset
    pub fn press_preset(&mut self, index: usize) -> Option<CommandIntent> {
        let intent = self.session.press_preset(index);
        if intent.is_none() {
            warn!(index, "preset not dispatched");
        }
        self.dispatch(intent)
    }

    fn dispatch(&mut self, intent: Option<CommandIntent>) -> Option<CommandIntent> {
        let intent = intent?;
        info!(
            desk = intent.entity.as_str(),
            position = intent.position_percent,
            "set cover position"
        );
        self.sink.call_service(ServiceCall::set_position(&intent));
        Some(intent)
    }

    /// Ask the host to show details for an entity
    pub fn show_more_info(&mut self, entity_id: &str) {
        self.sink.show_more_info(MoreInfoRequest {
            entity_id: entity_id.to_string(),
        });
    }

    /// Title clicked
    pub fn show_desk_info(&mut self) {
        let desk = self.session.config().desk.to_string();
        self.show_more_info(&desk);
    }

    /// Height readout clicked
    pub fn show_height_info(&mut self) {
        let sensor = self.session.config().height_sensor.to_string();
        self.show_more_info(&sensor);
    }

    /// Tear the card down, cancelling pending deadlines
    pub fn dispose(mut self) -> (S, K) {
        self.session.dispose();
        debug!("card disposed");
        (self.store, self.sink)
    }
}
