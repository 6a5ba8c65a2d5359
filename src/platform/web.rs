//! Browser bindings
//!
//! The page owns `requestAnimationFrame` and the buttons; it calls into a
//! [`PlantHandle`] and redraws from the returned values.

use wasm_bindgen::prelude::*;

use super::PlantController;
use crate::consts::MAX_FRAME_DT;
use crate::persistence::{LocalStorage, Storage};
use crate::settings::PlantSettings;
use crate::sim::GrowthEvent;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Plant growth starting...");
}

/// A plant backed by LocalStorage, driven from JavaScript
#[wasm_bindgen]
pub struct PlantHandle {
    controller: PlantController<LocalStorage>,
    /// Events from the last call, encoded as JSON for the page
    last_events: Vec<GrowthEvent>,
}

#[wasm_bindgen]
impl PlantHandle {
    /// Open LocalStorage, load settings and saved progress
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PlantHandle, JsValue> {
        let storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let settings = PlantSettings::load(&storage);
        let mut controller = PlantController::new(settings, storage)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        controller.start();
        Ok(Self {
            controller,
            last_events: Vec::new(),
        })
    }

    /// Advance by one animation frame (`dt` in seconds)
    pub fn tick(&mut self, dt: f32) {
        self.last_events = self.controller.on_tick(dt.min(MAX_FRAME_DT));
    }

    pub fn water(&mut self) -> bool {
        self.last_events = self.controller.on_water_requested();
        !self.last_events.is_empty()
    }

    /// Write progress now, e.g. from a `pagehide` handler
    pub fn save(&mut self) -> bool {
        self.controller.save()
    }

    pub fn reset(&mut self) {
        self.last_events = vec![self.controller.reset_plant()];
    }

    pub fn delete_save(&mut self) -> bool {
        self.controller.delete_save_data()
    }

    pub fn fast_growth(&mut self) -> bool {
        self.last_events = self.controller.fast_growth();
        !self.last_events.is_empty()
    }

    /// Events from the last `tick`/`water`/`fast_growth`/`reset` as a JSON array
    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.last_events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn status_text(&self) -> String {
        self.controller.status().to_string()
    }

    /// Current stage (0-based) for picking the stage model
    pub fn stage(&self) -> u32 {
        self.controller.state().stage_index()
    }

    pub fn stage_count(&self) -> u32 {
        self.controller.settings().stage_count
    }

    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    pub fn is_watered(&self) -> bool {
        self.controller.state().watered()
    }

    pub fn is_complete(&self) -> bool {
        self.controller.state().is_complete()
    }

    /// Persist new settings; they apply on the next page load
    pub fn save_settings(&mut self, growth_duration: f32, stage_count: u32) -> Result<(), JsValue> {
        let settings = PlantSettings {
            growth_duration,
            stage_count,
            ..self.controller.settings().clone()
        };
        settings
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save(&mut storage);
        storage.flush().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
