//! Sample ingest
//!
//! Turns successive snapshots into height deltas and filters jitter.

pub mod sample;

pub use sample::{parse_height, qualifying_direction, SampleIngest, Snapshot};
