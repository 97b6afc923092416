//! Host-agnostic core logic for the desk card
//!
//! This crate contains all logic that does not depend on a specific
//! dashboard host:
//!
//! - Card configuration and per-unit height defaults
//! - Sample ingest (height deltas, noise filtering)
//! - Motion session state machine and desk state inference
//! - Preset command translation
//! - Button presentation derived from the inferred state
//!
//! Time is always passed in explicitly as milliseconds, so every
//! operation is deterministic and the host owns the clock.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod card;
pub mod command;
pub mod config;
pub mod ingest;
pub mod math;
pub mod presentation;
pub mod state;

pub use card::{DeskCard, UpdateOutcome};
pub use command::CommandIntent;
pub use config::{ConfigError, DeskConfig, HeightBounds, HeightUnit, Thresholds};
pub use ingest::Snapshot;
pub use state::{DeskState, MotionDirection};
