//! Configuration types
//!
//! Card configuration plus the per-unit defaults it falls back on.

pub mod types;
pub mod units;

pub use types::*;
pub use units::{HeightBounds, HeightUnit};
