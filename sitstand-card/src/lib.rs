//! Dashboard card adapter for the sitstand desk engine
//!
//! This crate connects `sitstand-core` to a dashboard host:
//!
//! - TOML configuration loading and stub configuration discovery
//! - State store lookups with the silent-degradation parse policy
//! - Fire-and-forget service call dispatch
//! - The `Card` adapter driving a `DeskCard` session
//! - Trace files replayed by the `sitstand-sim` binary

#![deny(unsafe_code)]

pub mod card;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod states;
pub mod trace;

pub use card::Card;
pub use dispatch::{CommandSink, MoreInfoRequest, RecordingSink, ServiceCall};
pub use error::CardError;
pub use states::{EntityState, MemoryStore, StateStore};
