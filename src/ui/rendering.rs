//! Canvas rendering: paints a captured [`Scene`] with the egui painter.
//!
//! Surface items are drawn through [`SurfaceMapper`], which applies the vertical
//! composite flip; labels, the overlay text and the debug panel are placed in
//! window space directly, on top of everything else.

use crate::constants::*;
use crate::geometry::dotted_segments;
use crate::scene::{NodeDraw, Scene};
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Side length of the placeholder square drawn for sprites, before scaling.
const SPRITE_PLACEHOLDER_SIZE: f32 = 24.0;

pub(super) fn color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Maps surface coordinates into the canvas rect, flipping the Y axis.
#[derive(Debug, Clone, Copy)]
pub(super) struct SurfaceMapper {
    rect: egui::Rect,
    height: f32,
}

impl SurfaceMapper {
    pub(super) fn new(rect: egui::Rect, height: f32) -> Self {
        Self { rect, height }
    }

    /// Surface point to screen point.
    pub(super) fn surface(&self, p: PointF) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x, self.height - p.y)
    }

    /// Window-space point to screen point.
    pub(super) fn window(&self, p: PointF) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x, p.y)
    }
}

/// Paints every layer of the scene in order: background, gridlines, edges,
/// nodes, pending connection, overlay, labels, debug text.
pub(super) fn paint_scene(painter: &egui::Painter, rect: egui::Rect, scene: &Scene, fps: Option<f32>) {
    let map = SurfaceMapper::new(rect, scene.height);

    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    paint_gridlines(painter, &map, scene);

    for edge in &scene.edges {
        painter.line_segment(
            [map.surface(edge.from), map.surface(edge.to)],
            egui::Stroke::new(edge.width, color32(edge.color)),
        );
    }

    for node in &scene.nodes {
        paint_node(painter, &map, node);
    }

    if let Some([from, to]) = scene.pending_line {
        painter.line_segment(
            [map.surface(from), map.surface(to)],
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        );
    }

    if scene.overlay_open {
        paint_overlay(painter, rect, scene);
    }

    let font = egui::FontId::proportional(LABEL_FONT_SIZE);
    for node in &scene.nodes {
        if let Some(anchor) = node.label_anchor {
            painter.text(
                map.window(anchor),
                egui::Align2::LEFT_TOP,
                &node.label,
                font.clone(),
                egui::Color32::BLACK,
            );
        }
    }

    if let Some(fps) = fps {
        painter.text(
            rect.min,
            egui::Align2::LEFT_TOP,
            format!("{fps:.0} FPS"),
            font.clone(),
            egui::Color32::DARK_GREEN,
        );
    }
    for (row, line) in scene.debug.iter().enumerate() {
        let y = LABEL_FONT_SIZE * (row + 1) as f32;
        painter.text(
            rect.min + egui::vec2(0.0, y),
            egui::Align2::LEFT_TOP,
            line,
            font.clone(),
            egui::Color32::BLACK,
        );
    }
    if scene.mouse_moving {
        painter.text(
            rect.min + egui::vec2(300.0, LABEL_FONT_SIZE),
            egui::Align2::LEFT_TOP,
            "Mouse moving",
            font,
            egui::Color32::BLUE,
        );
    }
}

fn paint_gridlines(painter: &egui::Painter, map: &SurfaceMapper, scene: &Scene) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(GRID_SHADE));
    let vertical = scene
        .gridlines
        .vertical
        .iter()
        .map(|&x| (PointF::new(x, 0.0), PointF::new(x, scene.height)));
    let horizontal = scene
        .gridlines
        .horizontal
        .iter()
        .map(|&y| (PointF::new(0.0, y), PointF::new(scene.width, y)));

    for (start, end) in vertical.chain(horizontal) {
        for [a, b] in dotted_segments(start, end, GRID_DASH_LENGTH) {
            painter.line_segment([map.surface(a), map.surface(b)], stroke);
        }
    }
}

fn paint_node(painter: &egui::Painter, map: &SurfaceMapper, node: &NodeDraw) {
    let Some(position) = node.position else {
        return;
    };
    let center = map.surface(position);
    match node.kind {
        NodeKind::Dot => {
            painter.circle_filled(center, node.radius, color32(node.color));
        }
        NodeKind::Sprite => {
            // Texture assets are out of scope; a tinted square stands in
            let rect = sprite_rect(center, node.scale);
            painter.rect_stroke(rect, 2.0, egui::Stroke::new(2.0, color32(node.color)), StrokeKind::Inside);
            painter.line_segment(
                [rect.left_top(), rect.right_bottom()],
                egui::Stroke::new(1.0, color32(node.color)),
            );
        }
    }
}

/// Screen rect of a sprite placeholder centered on `center` at the given zoom.
fn sprite_rect(center: egui::Pos2, scale: f32) -> egui::Rect {
    let side = SPRITE_PLACEHOLDER_SIZE * scale;
    egui::Rect::from_center_size(center, egui::vec2(side, side))
}

fn paint_overlay(painter: &egui::Painter, rect: egui::Rect, scene: &Scene) {
    painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, OVERLAY_ALPHA));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("Label: {}_", scene.overlay_text),
        egui::FontId::monospace(LABEL_FONT_SIZE),
        egui::Color32::WHITE,
    );
}
