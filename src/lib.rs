//! # Node Canvas
//!
//! An interactive canvas for sketching graphs: circular nodes placed on an
//! unbounded world plane, joined by straight connections, seen through a
//! pannable, zoomable viewport.
//!
//! ## Features
//! - Node creation under the pointer (middle click)
//! - Two-click connection protocol (right click on source, then destination)
//! - Dragging nodes, or the viewport when nothing is under the pointer
//! - Double-click label editing with a modal overlay
//! - Dotted world-aligned gridlines that scroll with the viewport
//! - Debug readout of viewport and interaction state
//!
//! The core ([`Canvas`], [`Viewport`], [`Scene`]) is independent of the windowing
//! layer and is driven one [`FrameInput`] at a time.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod geometry;

mod canvas;
mod error;
mod input;
mod interaction;
mod scene;
mod settings;
mod store;
mod types;
mod ui;
mod viewport;

// Re-export public types and functions
pub use canvas::Canvas;
pub use error::CanvasError;
pub use input::*;
pub use interaction::*;
pub use scene::*;
pub use settings::Settings;
pub use store::*;
pub use types::*;
pub use ui::{CanvasApp, PersistedState, STORAGE_KEY};
pub use viewport::Viewport;

/// Runs the canvas application.
///
/// Opens a fixed-size window and restores settings and the last viewport
/// position from eframe storage when available.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use node_canvas::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let settings = Settings::default();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([settings.screen_width as f32, settings.screen_height as f32])
            .with_resizable(false)
            .with_title("Node Canvas"),
        ..Default::default()
    };
    eframe::run_native(
        "Node Canvas",
        options,
        Box::new(|cc| Ok(Box::new(CanvasApp::from_storage(cc.storage)))),
    )
}
