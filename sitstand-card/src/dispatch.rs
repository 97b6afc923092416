//! Command dispatch to the host
//!
//! Service calls are fire-and-forget: the sink never reports back, and a
//! dropped or failed call is the host's concern.

use serde::{Deserialize, Serialize};
use sitstand_core::CommandIntent;

/// Service domain of the desk entity
pub const COVER_DOMAIN: &str = "cover";

/// Service that moves a cover to a position percentage
pub const SET_COVER_POSITION: &str = "set_cover_position";

/// Payload of a position service call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceData {
    pub entity_id: String,
    pub position: i32,
}

/// Service call sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: ServiceData,
}

impl ServiceCall {
    /// `cover.set_cover_position` for an intent
    pub fn set_position(intent: &CommandIntent) -> Self {
        Self {
            domain: COVER_DOMAIN.to_string(),
            service: SET_COVER_POSITION.to_string(),
            data: ServiceData {
                entity_id: intent.entity.to_string(),
                position: intent.position_percent,
            },
        }
    }

    /// JSON form of the call, for websocket-style transports
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "call_service",
            "domain": self.domain,
            "service": self.service,
            "service_data": self.data,
        })
    }
}

/// Request to open the host's detail dialog for an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreInfoRequest {
    pub entity_id: String,
}

/// Receiver of card output
pub trait CommandSink {
    /// Dispatch a service call
    fn call_service(&mut self, call: ServiceCall);

    /// Ask the host to show entity details
    fn show_more_info(&mut self, request: MoreInfoRequest);
}

/// Sink that records everything it receives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub calls: Vec<ServiceCall>,
    pub more_info: Vec<MoreInfoRequest>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent service call
    pub fn last_call(&self) -> Option<&ServiceCall> {
        self.calls.last()
    }
}

impl CommandSink for RecordingSink {
    fn call_service(&mut self, call: ServiceCall) {
        self.calls.push(call);
    }

    fn show_more_info(&mut self, request: MoreInfoRequest) {
        self.more_info.push(request);
    }
}

impl<T: CommandSink + ?Sized> CommandSink for &mut T {
    fn call_service(&mut self, call: ServiceCall) {
        (**self).call_service(call);
    }

    fn show_more_info(&mut self, request: MoreInfoRequest) {
        (**self).show_more_info(request);
    }
}
