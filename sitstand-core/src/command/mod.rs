//! Command translation
//!
//! Validates preset targets against the travel bounds and produces
//! position-set intents for an external command sink.

pub mod translator;

pub use translator::{position_percent, request_preset, CommandIntent};
