//! Growth simulation module
//!
//! All growth logic lives here. This module must stay pure:
//! - Time only comes in through tick deltas
//! - No storage, rendering or platform dependencies
//! - Same inputs always produce the same state and events

pub mod clock;
pub mod stage;
pub mod state;
pub mod tick;

pub use clock::GrowthClock;
pub use stage::{is_complete, last_stage, progress, stage_for};
pub use state::{GrowthEvent, GrowthPhase, GrowthState};
pub use tick::{TickInput, tick};
