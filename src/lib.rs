//! Plant Growth - a watered, timer-driven plant that grows through stages
//!
//! Core modules:
//! - `sim`: Growth simulation (clock, stage selection, state machine)
//! - `persistence`: Save/load of growth progress over key-value storage
//! - `platform`: Host-facing controller (native loop / browser page)
//! - `settings`: Growth duration, stage count, autosave tuning

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{GrowthStatus, PlantController};
pub use settings::{PlantSettings, SettingsError};

/// Growth configuration constants
pub mod consts {
    /// Host frame rate assumed by the native loop
    pub const FRAME_RATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default seconds of watered growth to reach the final stage
    pub const DEFAULT_GROWTH_DURATION: f32 = 60.0;
    /// Default number of growth stages
    pub const DEFAULT_STAGE_COUNT: u32 = 4;
    /// Seconds of growth between periodic saves (~300 frames at 60 FPS)
    pub const AUTOSAVE_INTERVAL: f32 = 5.0;

    /// Storage key of the growth record
    pub const RECORD_STORAGE_KEY: &str = "plant_growth_data";
}
