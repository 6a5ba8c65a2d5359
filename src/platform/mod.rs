//! Platform abstraction layer
//!
//! The host (native CLI loop or browser page) owns the frame loop and the UI.
//! It drives a [`PlantController`] with:
//! - Frame ticks (`on_tick`)
//! - Button presses (`on_water_requested`, `reset_plant`, ...)
//!
//! and renders whatever [`GrowthEvent`]s come back.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt;

use crate::persistence::{PersistenceStore, Storage};
use crate::settings::{PlantSettings, SettingsError};
use crate::sim::{self, GrowthEvent, GrowthPhase, GrowthState, TickInput};

/// Snapshot of the plant for HUD display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthStatus {
    pub phase: GrowthPhase,
    /// Stage number for display (1-based)
    pub stage: u32,
    pub stage_count: u32,
    /// Growth progress (0-1)
    pub progress: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl fmt::Display for GrowthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            GrowthPhase::Idle => write!(
                f,
                "Waiting for water (stage {}/{})",
                self.stage, self.stage_count
            ),
            GrowthPhase::Growing => write!(
                f,
                "Growth progress: {:.1}% | Stage: {}/{} | Time: {}/{}s",
                self.progress * 100.0,
                self.stage,
                self.stage_count,
                self.elapsed.floor() as u32,
                self.duration
            ),
            GrowthPhase::Complete => write!(f, "Growth complete!"),
        }
    }
}

/// Host-facing plant component
///
/// Owns the growth state, its settings and the persistence store, and decides
/// when progress gets written back.
pub struct PlantController<S> {
    state: GrowthState,
    settings: PlantSettings,
    store: PersistenceStore<S>,
    /// Growing time since the last save
    since_save: f32,
}

impl<S: Storage> PlantController<S> {
    /// Build a controller; settings a plant could never finish with are rejected
    pub fn new(settings: PlantSettings, storage: S) -> Result<Self, SettingsError> {
        settings.validate()?;
        let store = PersistenceStore::new(storage, settings.storage_key.clone());
        Ok(Self {
            state: GrowthState::new(),
            settings,
            store,
            since_save: 0.0,
        })
    }

    /// Restore saved progress, or start a fresh plant when nothing usable is stored
    pub fn start(&mut self) -> GrowthPhase {
        match self.store.load() {
            Some(record) => {
                self.state = record.restore(&self.settings);
                self.since_save = 0.0;
                log::info!(
                    "Plant data loaded ({}, stage {}/{}, {:.1}s)",
                    self.state.phase().as_str(),
                    self.state.stage_index() + 1,
                    self.settings.stage_count,
                    self.state.elapsed_time()
                );
            }
            None => {
                self.reset_plant();
            }
        }
        self.state.phase()
    }

    /// Advance growth by one host frame
    pub fn on_tick(&mut self, dt: f32) -> Vec<GrowthEvent> {
        let was_growing = self.state.growing();
        let events = sim::tick(&mut self.state, &TickInput::default(), dt, &self.settings);

        let mut needs_save = false;
        for event in &events {
            match event {
                GrowthEvent::StageChanged { from, to } => {
                    log::debug!("Stage {} -> {}", from + 1, to + 1);
                    needs_save = true;
                }
                GrowthEvent::Completed => {
                    log::info!("Plant growth complete!");
                    needs_save = true;
                }
                _ => {}
            }
        }

        if was_growing && dt.is_finite() && dt > 0.0 {
            self.since_save += dt;
            if self.since_save >= self.settings.autosave_interval {
                log::debug!("Autosave at {:.1}s", self.state.elapsed_time());
                needs_save = true;
            }
        }

        if needs_save {
            self.save();
        }
        events
    }

    /// Water button pressed. Only an unwatered plant reacts.
    pub fn on_water_requested(&mut self) -> Vec<GrowthEvent> {
        if !self.state.water() {
            return Vec::new();
        }
        log::info!("Plant watered! Growth started.");
        self.save();
        vec![GrowthEvent::Watered]
    }

    /// Back to an unwatered seedling; the fresh state is saved
    pub fn reset_plant(&mut self) -> GrowthEvent {
        self.state = GrowthState::new();
        self.save();
        log::info!("Plant reset");
        GrowthEvent::Reset
    }

    /// Remove saved progress from storage. The in-memory plant is untouched.
    pub fn delete_save_data(&mut self) -> bool {
        let deleted = self.store.reset();
        if deleted {
            log::info!("Plant save data deleted");
        }
        deleted
    }

    /// Debug: jump a growing plant to one second before completion.
    /// The new progress is saved right away.
    pub fn fast_growth(&mut self) -> Vec<GrowthEvent> {
        let events = self.state.fast_forward(&self.settings);
        if !events.is_empty() {
            log::info!("Fast growth: elapsed now {:.1}s", self.state.elapsed_time());
            self.save();
        }
        events
    }

    pub fn state(&self) -> &GrowthState {
        &self.state
    }

    pub fn settings(&self) -> &PlantSettings {
        &self.settings
    }

    pub fn phase(&self) -> GrowthPhase {
        self.state.phase()
    }

    pub fn progress(&self) -> f32 {
        sim::progress(self.state.elapsed_time(), self.settings.growth_duration)
    }

    pub fn status(&self) -> GrowthStatus {
        GrowthStatus {
            phase: self.state.phase(),
            stage: self.state.stage_index() + 1,
            stage_count: self.settings.stage_count,
            progress: self.progress(),
            elapsed: self.state.elapsed_time(),
            duration: self.settings.growth_duration,
        }
    }

    pub fn store(&self) -> &PersistenceStore<S> {
        &self.store
    }

    /// Write current progress now (best-effort)
    pub fn save(&mut self) -> bool {
        self.since_save = 0.0;
        self.store.save(&self.state)
    }
}
