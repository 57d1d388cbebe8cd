//! User-tunable settings, persisted between sessions through eframe storage.

use crate::constants::*;
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Tunable canvas behaviour. Defaults come from [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Render surface width in pixels. Fixed by the window, so never persisted.
    #[serde(skip, default = "default_screen_width")]
    pub screen_width: i32,
    /// Render surface height in pixels. Fixed by the window, so never persisted.
    #[serde(skip, default = "default_screen_height")]
    pub screen_height: i32,
    /// World position shown at the surface corner on startup
    pub initial_origin: Point,
    /// Scale change per frame while a zoom key is held
    pub zoom_step: f32,
    /// Lower bound of the zoom range
    pub min_scale: f32,
    /// Upper bound of the zoom range
    pub max_scale: f32,
    /// Maximum gap between two primary presses forming a double click
    pub double_click_ms: u64,
    /// Extra pixels around a node that still count as a hit
    pub collision_margin: i32,
    /// Radius of nodes created with the middle button
    pub node_radius: i32,
    /// Maximum number of nodes
    pub max_nodes: usize,
    /// Maximum number of connections
    pub max_connections: usize,
    /// Characters held by the label edit buffer
    pub label_capacity: usize,
    /// Whether the debug text panel is drawn
    pub show_debug: bool,
}

fn default_screen_width() -> i32 {
    SCREEN_WIDTH
}

fn default_screen_height() -> i32 {
    SCREEN_HEIGHT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            initial_origin: Point::new(INITIAL_ORIGIN, INITIAL_ORIGIN),
            zoom_step: ZOOM_STEP,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            double_click_ms: DOUBLE_CLICK_PERIOD_MS,
            collision_margin: COLLISION_MARGIN_PX,
            node_radius: DEFAULT_NODE_RADIUS,
            max_nodes: MAX_OBJECTS,
            max_connections: MAX_CONNECTIONS,
            label_capacity: MAX_LABEL_LENGTH,
            show_debug: true,
        }
    }
}

impl Settings {
    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "double_click_ms": 250 }"#).unwrap();
        assert_eq!(settings.double_click_ms, 250);
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
        assert_eq!(settings.label_capacity, MAX_LABEL_LENGTH);
    }

    #[test]
    fn surface_size_is_not_persisted() {
        let settings = Settings {
            screen_width: 1280,
            screen_height: 720,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert!(!json.contains("screen_width"));

        let stored = Settings::from_json(r#"{ "screen_width": 1280, "screen_height": 720 }"#).unwrap();
        assert_eq!((stored.screen_width, stored.screen_height), (SCREEN_WIDTH, SCREEN_HEIGHT));
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings {
            max_nodes: 3,
            show_debug: false,
            ..Settings::default()
        };
        let restored = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(restored, settings);
    }
}
