//! Per-frame simulation tick
//!
//! Advances the growth state by one host frame and reports what changed.

use super::stage;
use super::state::{GrowthEvent, GrowthState};
use crate::settings::PlantSettings;

/// One-shot commands applied at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Water the plant (button press)
    pub water: bool,
    /// Jump to one second before the end (debug)
    pub fast_forward: bool,
}

/// Advance the growth state by `dt` seconds.
///
/// Returns the events produced during this tick in the order they happened.
/// Idle and completed plants produce nothing unless watered.
pub fn tick(
    state: &mut GrowthState,
    input: &TickInput,
    dt: f32,
    settings: &PlantSettings,
) -> Vec<GrowthEvent> {
    let mut events = Vec::new();

    if input.water && state.water() {
        events.push(GrowthEvent::Watered);
    }

    if input.fast_forward {
        events.extend(state.fast_forward(settings));
    }

    if !state.growing() {
        return events;
    }

    let elapsed = state.clock_mut().advance(dt, true);
    events.push(GrowthEvent::ProgressUpdated {
        progress: stage::progress(elapsed, settings.growth_duration),
    });

    events.extend(state.sync_stage(settings));

    if stage::is_complete(
        elapsed,
        settings.growth_duration,
        state.stage_index(),
        settings.stage_count,
    ) {
        state.stop_growing();
        events.push(GrowthEvent::Completed);
    }

    events
}
