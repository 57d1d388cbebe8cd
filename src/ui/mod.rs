//! User interface shell for the canvas.
//!
//! This module wires the core canvas into eframe: it samples egui input once per
//! frame, hands it to the canvas, captures a scene and paints it.
//!
//! # Module Organization
//!
//! - `state` - The CanvasApp struct and persisted settings
//! - `input` - egui input to `FrameInput` translation
//! - `rendering` - Painting a captured scene with the egui painter

mod input;
mod rendering;
mod state;


pub use state::{CanvasApp, PersistedState, STORAGE_KEY};

use crate::interaction::OverlayChange;
use crate::scene::Scene;
use eframe::egui;

impl eframe::App for CanvasApp {
    /// Persist settings and the viewport position between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.persisted_state().to_json() {
            Ok(json) => storage.set_string(STORAGE_KEY, json),
            Err(err) => log::error!("Failed to serialize app state: {err}"),
        }
    }

    /// Runs one tick: input handling, then drawing.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        // The canvas is a game loop: keep ticking even without new input
        ctx.request_repaint();
    }
}

impl CanvasApp {
    /// Allocates the fixed-size canvas, applies this frame's input and paints the result.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI to draw into
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(
            self.canvas.viewport.width as f32,
            self.canvas.viewport.height as f32,
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let ctx = ui.ctx().clone();

        let input = self.frame_input(&ctx, response.rect);
        let report = self.canvas.handle_input(&input);
        match &report.overlay {
            Some(OverlayChange::Opened(id)) => log::info!("editing label of node {id}"),
            Some(OverlayChange::Closed { committed: Some(id) }) => log::info!("renamed node {id}"),
            _ => {}
        }

        let mut scene = Scene::capture(&self.canvas, input.pointer, input.now_ms);
        let fps = if self.canvas.settings().show_debug {
            let dt = ctx.input(|i| i.stable_dt);
            (dt > 0.0).then(|| 1.0 / dt)
        } else {
            scene.debug.clear();
            None
        };
        rendering::paint_scene(&painter, response.rect, &scene, fps);
    }
}
