//! Persisted growth record
//!
//! The subset of [`GrowthState`] that survives a restart. `growing` is not
//! stored; it is derived again from `watered` and the completion condition.

use serde::{Deserialize, Serialize};

use super::PersistError;
use crate::settings::PlantSettings;
use crate::sim::GrowthState;

/// Growth progress as written to storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// Seconds of watered growth
    pub elapsed_time: f32,
    /// Stage shown when the record was written
    pub stage_index: u32,
    /// Whether the plant has been watered
    pub watered: bool,
}

impl PersistedRecord {
    /// Capture the persisted fields of a state
    pub fn capture(state: &GrowthState) -> Self {
        Self {
            elapsed_time: state.elapsed_time(),
            stage_index: state.stage_index(),
            watered: state.watered(),
        }
    }

    /// Reject records no valid state could have produced
    pub fn validate(&self) -> Result<(), PersistError> {
        if !self.elapsed_time.is_finite() || self.elapsed_time < 0.0 {
            return Err(PersistError::InvalidRecord(format!(
                "elapsed time {} is not a non-negative number",
                self.elapsed_time
            )));
        }
        Ok(())
    }

    /// Rebuild the full growth state under the given settings
    pub fn restore(&self, settings: &PlantSettings) -> GrowthState {
        let state = GrowthState::restore(self.elapsed_time, self.watered, settings);
        if state.stage_index() != self.stage_index {
            log::warn!(
                "Saved stage {} does not match elapsed time {:.1}s, using stage {}",
                self.stage_index,
                self.elapsed_time,
                state.stage_index()
            );
        }
        state
    }

    pub fn encode(&self) -> Result<Vec<u8>, PersistError> {
        serde_json::to_vec(self).map_err(PersistError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PersistError> {
        let record: Self = serde_json::from_slice(bytes).map_err(PersistError::Decode)?;
        record.validate()?;
        Ok(record)
    }
}
