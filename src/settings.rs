//! Plant settings
//!
//! Tunables for one plant. Can be persisted next to the growth record in the
//! same key-value storage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::Storage;

/// Settings rejected by [`PlantSettings::validate`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("growth duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f32),

    #[error("a plant needs at least one stage")]
    NoStages,

    #[error("autosave interval must be a positive number of seconds, got {0}")]
    InvalidAutosaveInterval(f32),

    #[error("storage key must not be empty")]
    EmptyStorageKey,
}

/// Growth settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantSettings {
    /// Total seconds of watered growth to reach the final stage
    pub growth_duration: f32,
    /// Number of visual stages (models) the plant goes through
    pub stage_count: u32,
    /// Seconds of growth between periodic saves
    pub autosave_interval: f32,
    /// Storage key the growth record is written under
    pub storage_key: String,
}

impl Default for PlantSettings {
    fn default() -> Self {
        Self {
            growth_duration: DEFAULT_GROWTH_DURATION,
            stage_count: DEFAULT_STAGE_COUNT,
            autosave_interval: AUTOSAVE_INTERVAL,
            storage_key: RECORD_STORAGE_KEY.to_string(),
        }
    }
}

impl PlantSettings {
    /// Storage key for the settings themselves
    const STORAGE_KEY: &'static str = "plant_growth_settings";

    /// Check that every field is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.growth_duration.is_finite() || self.growth_duration <= 0.0 {
            return Err(SettingsError::InvalidDuration(self.growth_duration));
        }
        if self.stage_count == 0 {
            return Err(SettingsError::NoStages);
        }
        if !self.autosave_interval.is_finite() || self.autosave_interval <= 0.0 {
            return Err(SettingsError::InvalidAutosaveInterval(self.autosave_interval));
        }
        if self.storage_key.is_empty() {
            return Err(SettingsError::EmptyStorageKey);
        }
        Ok(())
    }

    /// Index of the final stage
    pub fn last_stage(&self) -> u32 {
        self.stage_count.saturating_sub(1)
    }

    /// Load settings from storage, falling back to defaults when missing or invalid
    pub fn load(storage: &impl Storage) -> Self {
        if let Ok(Some(bytes)) = storage.get(Self::STORAGE_KEY) {
            match serde_json::from_slice::<PlantSettings>(&bytes) {
                Ok(settings) => match settings.validate() {
                    Ok(()) => {
                        log::info!("Loaded plant settings from storage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored plant settings rejected: {}", e),
                },
                Err(e) => log::warn!("Stored plant settings unreadable: {}", e),
            }
        }

        log::info!("Using default plant settings");
        Self::default()
    }

    /// Save settings to storage (best-effort)
    pub fn save(&self, storage: &mut impl Storage) {
        let json = match serde_json::to_vec(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode plant settings: {}", e);
                return;
            }
        };
        match storage.set(Self::STORAGE_KEY, &json).and_then(|_| storage.flush()) {
            Ok(()) => log::info!("Plant settings saved"),
            Err(e) => log::warn!("Could not save plant settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults_are_valid() {
        let settings = PlantSettings::default();
        assert_eq!(settings.growth_duration, 60.0);
        assert_eq!(settings.stage_count, 4);
        assert_eq!(settings.last_stage(), 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_duration = PlantSettings {
            growth_duration: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_duration.validate(), Err(SettingsError::InvalidDuration(0.0)));

        let no_stages = PlantSettings {
            stage_count: 0,
            ..Default::default()
        };
        assert_eq!(no_stages.validate(), Err(SettingsError::NoStages));

        let bad_autosave = PlantSettings {
            autosave_interval: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_autosave.validate(),
            Err(SettingsError::InvalidAutosaveInterval(_))
        ));

        let no_key = PlantSettings {
            storage_key: String::new(),
            ..Default::default()
        };
        assert_eq!(no_key.validate(), Err(SettingsError::EmptyStorageKey));
    }

    #[test]
    fn test_settings_persist() {
        let mut storage = MemoryStorage::new();
        let settings = PlantSettings {
            growth_duration: 120.0,
            stage_count: 6,
            ..Default::default()
        };
        settings.save(&mut storage);
        assert_eq!(PlantSettings::load(&storage), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(PlantSettings::STORAGE_KEY, br#"{"stage_count": 5}"#)
            .unwrap();
        let settings = PlantSettings::load(&storage);
        assert_eq!(settings.stage_count, 5);
        assert_eq!(settings.growth_duration, 60.0);
    }

    #[test]
    fn test_invalid_stored_settings_fall_back() {
        let mut storage = MemoryStorage::new();
        storage
            .set(PlantSettings::STORAGE_KEY, br#"{"growth_duration": -1.0}"#)
            .unwrap();
        assert_eq!(PlantSettings::load(&storage), PlantSettings::default());

        storage.set(PlantSettings::STORAGE_KEY, b"not json").unwrap();
        assert_eq!(PlantSettings::load(&storage), PlantSettings::default());
    }
}
