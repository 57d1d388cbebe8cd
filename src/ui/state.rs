//! Application state for the egui shell.
//!
//! The graph itself is never persisted; only the settings and the last viewport
//! position survive a restart.

use crate::canvas::Canvas;
use crate::settings::Settings;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Key under which [`PersistedState`] is stored in eframe storage.
pub const STORAGE_KEY: &str = "canvas_settings";

/// UI state that is saved between sessions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Canvas settings
    pub settings: Settings,
    /// Viewport origin when the app was last closed
    pub origin: Option<Point>,
    /// Viewport scale when the app was last closed
    pub scale: Option<f32>,
}

impl PersistedState {
    /// Serializes the state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes state from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The main application structure: the canvas plus the bits of shell state
/// that feed it.
///
/// This struct implements the `eframe::App` trait and runs one input/draw
/// tick per frame.
pub struct CanvasApp {
    /// The canvas being edited
    pub canvas: Canvas,
    /// Pointer position from the latest frame it was over the canvas
    pub last_pointer: Point,
}

impl Default for CanvasApp {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl CanvasApp {
    /// Creates the app with a fresh canvas holding the startup sprite.
    pub fn new(settings: Settings) -> Self {
        let mut canvas = Canvas::new(settings);
        let skull = Node::sprite("Evil skull", Point::new(300, 200), Rgba::BLACK);
        if let Err(err) = canvas.add_node(skull) {
            log::warn!("startup sprite not added: {err}");
        }
        Self {
            canvas,
            last_pointer: Point::default(),
        }
    }

    /// Restores the app from persisted state, falling back to defaults for
    /// anything missing or unreadable.
    pub fn from_persisted(state: PersistedState) -> Self {
        let mut app = Self::new(state.settings);
        if let Some(origin) = state.origin {
            app.canvas.viewport.set_origin(origin);
        }
        if let Some(scale) = state.scale {
            // Goes through the clamp so a bad stored value cannot break zoom
            let current = app.canvas.viewport.scale;
            app.canvas.viewport.zoom_by(scale - current);
        }
        app
    }

    /// Restores the app from eframe storage, if any state was saved.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        let state = storage
            .and_then(|storage| storage.get_string(STORAGE_KEY))
            .map(|json| {
                PersistedState::from_json(&json).unwrap_or_else(|err| {
                    log::warn!("ignoring unreadable saved settings: {err}");
                    PersistedState::default()
                })
            })
            .unwrap_or_default();
        Self::from_persisted(state)
    }

    /// Snapshot of the state to persist.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            settings: self.canvas.settings().clone(),
            origin: Some(self.canvas.viewport.origin()),
            scale: Some(self.canvas.viewport.scale),
        }
    }
}
