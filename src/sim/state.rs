//! Growth state and core simulation types
//!
//! Everything the plant needs to resume after a restart lives here.

use serde::{Deserialize, Serialize};

use super::clock::GrowthClock;
use super::stage;
use crate::settings::PlantSettings;

/// Lifecycle phase of the plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPhase {
    /// Planted but not watered yet
    Idle,
    /// Watered, growth timer running
    Growing,
    /// Final stage reached (terminal)
    Complete,
}

impl GrowthPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthPhase::Idle => "Idle",
            GrowthPhase::Growing => "Growing",
            GrowthPhase::Complete => "Complete",
        }
    }
}

/// Things the host UI may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GrowthEvent {
    /// Plant was watered and started growing
    Watered,
    /// Displayed stage changed
    StageChanged { from: u32, to: u32 },
    /// Growth progress (0-1) after a tick
    ProgressUpdated { progress: f32 },
    /// Final stage reached, timer stopped
    Completed,
    /// Plant was reset back to an unwatered seedling
    Reset,
}

/// Complete growth state of one plant
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthState {
    clock: GrowthClock,
    stage_index: u32,
    watered: bool,
    growing: bool,
}

impl Default for GrowthState {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthState {
    /// Fresh, unwatered plant at stage 0
    pub fn new() -> Self {
        Self {
            clock: GrowthClock::default(),
            stage_index: 0,
            watered: false,
            growing: false,
        }
    }

    /// Rebuild a state from persisted fields.
    ///
    /// The stage is recomputed from `elapsed` so it always matches the
    /// configured stage mapping. A watered plant resumes growing unless it
    /// had already finished.
    pub fn restore(elapsed: f32, watered: bool, settings: &PlantSettings) -> Self {
        let clock = GrowthClock::new(elapsed);
        let stage_index = stage::stage_for(
            clock.elapsed(),
            settings.growth_duration,
            settings.stage_count,
        );
        let complete = stage::is_complete(
            clock.elapsed(),
            settings.growth_duration,
            stage_index,
            settings.stage_count,
        );

        Self {
            clock,
            stage_index,
            watered,
            growing: watered && !complete,
        }
    }

    /// Seconds of watered growth so far
    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Current stage index (0-based)
    #[inline]
    pub fn stage_index(&self) -> u32 {
        self.stage_index
    }

    #[inline]
    pub fn watered(&self) -> bool {
        self.watered
    }

    #[inline]
    pub fn growing(&self) -> bool {
        self.growing
    }

    pub fn phase(&self) -> GrowthPhase {
        if self.growing {
            GrowthPhase::Growing
        } else if self.watered {
            GrowthPhase::Complete
        } else {
            GrowthPhase::Idle
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == GrowthPhase::Complete
    }

    /// Apply a water request. Only an idle plant reacts; returns whether
    /// anything changed.
    pub fn water(&mut self) -> bool {
        if self.watered || self.growing {
            return false;
        }
        self.watered = true;
        self.growing = true;
        true
    }

    /// Move the growth timer forward to one second before the end.
    ///
    /// Only affects a growing plant. The stage follows the new elapsed time
    /// immediately; returns the resulting events, empty if nothing moved.
    pub fn fast_forward(&mut self, settings: &PlantSettings) -> Vec<GrowthEvent> {
        if !self.growing {
            return Vec::new();
        }
        let before = self.clock.elapsed();
        self.clock.skip_to(settings.growth_duration - 1.0);
        let elapsed = self.clock.elapsed();
        if elapsed <= before {
            return Vec::new();
        }

        let mut events = vec![GrowthEvent::ProgressUpdated {
            progress: stage::progress(elapsed, settings.growth_duration),
        }];
        events.extend(self.sync_stage(settings));
        events
    }

    /// Bring the stage in line with elapsed time
    pub(crate) fn sync_stage(&mut self, settings: &PlantSettings) -> Option<GrowthEvent> {
        let target = stage::stage_for(
            self.clock.elapsed(),
            settings.growth_duration,
            settings.stage_count,
        );
        if target == self.stage_index {
            return None;
        }
        let from = self.stage_index;
        self.stage_index = target;
        Some(GrowthEvent::StageChanged { from, to: target })
    }

    pub(crate) fn clock_mut(&mut self) -> &mut GrowthClock {
        &mut self.clock
    }

    pub(crate) fn stop_growing(&mut self) {
        self.growing = false;
    }
}
