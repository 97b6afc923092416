//! Desk state inference
//!
//! The motion session is the only mutable state; everything else is
//! recomputed on demand from the configuration and the latest snapshot.

pub mod events;
pub mod inference;
pub mod machine;
pub mod session;

pub use events::MotionEvent;
pub use inference::{current_state, in_clear_sit_zone, in_clear_stand_zone};
pub use machine::{DeskState, MotionDirection, MotionPhase};
pub use session::MotionSession;
