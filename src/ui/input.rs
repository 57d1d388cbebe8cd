//! Translation of egui input into canvas frame input.

use super::state::CanvasApp;
use crate::input::{ButtonState, FrameInput, TextInput};
use crate::types::Point;
use eframe::egui;

fn button_state(pointer: &egui::PointerState, button: egui::PointerButton) -> ButtonState {
    ButtonState {
        pressed: pointer.button_pressed(button),
        down: pointer.button_down(button),
        released: pointer.button_released(button),
    }
}

impl CanvasApp {
    /// Samples this frame's egui input.
    ///
    /// The pointer is taken relative to `canvas_rect`; when it is not over the
    /// window the last known position is reused. Left, middle and right buttons
    /// map to the primary, secondary and tertiary roles.
    pub fn frame_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) -> FrameInput {
        ctx.input(|i| {
            if let Some(pos) = i.pointer.latest_pos() {
                let local = pos - canvas_rect.min;
                self.last_pointer = Point::new(local.x.round() as i32, local.y.round() as i32);
            }

            let text = i
                .events
                .iter()
                .flat_map(|event| match event {
                    egui::Event::Text(text) => text.chars().map(TextInput::Char).collect(),
                    egui::Event::Key {
                        key: egui::Key::Backspace,
                        pressed: true,
                        ..
                    } => vec![TextInput::Backspace],
                    _ => Vec::new(),
                })
                .collect();

            FrameInput {
                now_ms: (i.time.max(0.0) * 1000.0) as u64,
                pointer: self.last_pointer,
                primary: button_state(&i.pointer, egui::PointerButton::Primary),
                secondary: button_state(&i.pointer, egui::PointerButton::Middle),
                tertiary: button_state(&i.pointer, egui::PointerButton::Secondary),
                zoom_in: i.key_down(egui::Key::Z),
                zoom_out: i.key_down(egui::Key::A),
                text,
            }
        })
    }
}
