//! Render-ready snapshot of the canvas.
//!
//! [`Scene::capture`] reads the canvas after input handling and lists everything
//! the painter draws this frame. Surface items (gridlines, edges, nodes, the
//! pending connection line) are in y-up surface coordinates and get flipped when
//! composited; labels and debug text are placed directly in window space.

use crate::canvas::Canvas;
use crate::constants::{LABEL_OFFSET, MINOR_GRIDLINE_DISTANCE};
use crate::geometry::{self, Gridlines};
use crate::interaction::{DragMode, PickPhase};
use crate::types::*;

/// A node as the painter sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDraw {
    /// Node being drawn
    pub id: NodeId,
    /// Dot or sprite
    pub kind: NodeKind,
    /// Surface position, `None` when off-screen and not sticky
    pub position: Option<PointF>,
    /// Radius after applying the viewport scale
    pub radius: f32,
    /// Viewport scale, used to size sprites
    pub scale: f32,
    /// Fill color
    pub color: Rgba,
    /// Label text
    pub label: String,
    /// Window-space top-left of the label, `None` when the node is hidden
    pub label_anchor: Option<PointF>,
}

/// A connection line as the painter sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDraw {
    /// Connection being drawn
    pub id: ConnectionId,
    /// Surface position of the source end
    pub from: PointF,
    /// Surface position of the destination end
    pub to: PointF,
    /// Line color
    pub color: Rgba,
    /// Line width in pixels
    pub width: f32,
}

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Minor gridlines
    pub gridlines: Gridlines,
    /// Connections with at least one visible endpoint
    pub edges: Vec<EdgeDraw>,
    /// Nodes in append order (later ones on top)
    pub nodes: Vec<NodeDraw>,
    /// Line from a picked connection source to the pointer
    pub pending_line: Option<[PointF; 2]>,
    /// Whether the label overlay is open
    pub overlay_open: bool,
    /// Label buffer contents
    pub overlay_text: String,
    /// Whether the primary button was held within the last few milliseconds
    pub mouse_moving: bool,
    /// Debug panel lines, top to bottom
    pub debug: Vec<String>,
}

impl Scene {
    /// Captures the scene for the canvas's current state.
    pub fn capture(canvas: &Canvas, pointer: Point, now_ms: u64) -> Self {
        let vp = &canvas.viewport;
        let interaction = canvas.interaction();

        let edges = canvas
            .connections()
            .iter()
            .filter_map(|(id, conn)| {
                let source = canvas.nodes().get(conn.source)?;
                let dest = canvas.nodes().get(conn.dest)?;
                let visible = vp.position_visible(source.y, source.x)
                    || vp.position_visible(dest.y, dest.x);
                if !visible {
                    return None;
                }
                Some(EdgeDraw {
                    id,
                    from: vp.clamp_project(source.position(), true)?.into(),
                    to: vp.clamp_project(dest.position(), true)?.into(),
                    color: conn.color,
                    width: conn.width as f32,
                })
            })
            .collect();

        let nodes = canvas
            .nodes()
            .iter()
            .map(|(id, node)| {
                let position: Option<PointF> = vp.clamp_project(node.position(), node.sticky).map(Into::into);
                let radius = node.radius as f32 * vp.scale;
                let label_anchor = position.map(|p| {
                    PointF::new(
                        p.x + radius + LABEL_OFFSET,
                        vp.flip_y(p.y) - radius - LABEL_OFFSET,
                    )
                });
                NodeDraw {
                    id,
                    kind: node.kind,
                    position,
                    radius,
                    scale: vp.scale,
                    color: node.color,
                    label: node.label.clone(),
                    label_anchor,
                }
            })
            .collect();

        let pending_line = match (interaction.pick.source, interaction.pick.dest) {
            (Some(source), None) => canvas
                .nodes()
                .get(source)
                .and_then(|node| vp.clamp_project(node.position(), true))
                .map(|start| {
                    let end = PointF::new(pointer.x as f32, vp.flip_y(pointer.y as f32));
                    [start.into(), end]
                }),
            _ => None,
        };

        Self {
            width: vp.width as f32,
            height: vp.height as f32,
            gridlines: geometry::gridlines(vp, MINOR_GRIDLINE_DISTANCE),
            edges,
            nodes,
            pending_line,
            overlay_open: interaction.overlay.open,
            overlay_text: interaction.overlay.buffer.text(),
            mouse_moving: canvas.mouse_recently_active(now_ms),
            debug: debug_lines(canvas, now_ms),
        }
    }
}

fn debug_lines(canvas: &Canvas, now_ms: u64) -> Vec<String> {
    let vp = &canvas.viewport;
    let interaction = canvas.interaction();
    let label_of = |id: Option<NodeId>| {
        id.and_then(|id| canvas.nodes().get(id))
            .map_or_else(|| "null".to_string(), |node| node.label.clone())
    };
    let ms = |t: Option<u64>| t.map_or_else(|| "-".to_string(), |t| t.to_string());

    let drag = match interaction.drag {
        Some(drag) => {
            let what = match drag.mode {
                DragMode::Viewport => "viewport".to_string(),
                DragMode::Object(id) => label_of(Some(id)),
            };
            format!("drag pt: ({}, {}) {what}", drag.anchor.y, drag.anchor.x)
        }
        None => "drag pt: none".to_string(),
    };

    let touched = match interaction.last_grabbed.and_then(|id| canvas.nodes().get(id)) {
        Some(node) => format!("Object last touched: {} at y,x ({},{})", node.label, node.y, node.x),
        None => "Object last touched: null at y,x (-1,-1)".to_string(),
    };

    let phase = match interaction.pick.phase {
        PickPhase::PickingSource => 0,
        PickPhase::PickingDest => 1,
    };

    vec![
        format!(
            "vp: ({}, {}); {} objects; scale {:.2}",
            vp.origin_y,
            vp.origin_x,
            canvas.nodes().len(),
            vp.scale
        ),
        drag,
        format!(
            "mouse prev click: {}, last: {}, curr time: {now_ms}",
            ms(interaction.prev_click_ms),
            ms(interaction.last_click_ms)
        ),
        touched,
        format!(
            "Picking: {phase} Src: {} Dest: {}",
            label_of(interaction.pick.source),
            label_of(interaction.pick.dest)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BORDER_MARGIN;
    use crate::input::{ButtonState, FrameInput};
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    fn canvas_with(nodes: Vec<Node>) -> (Canvas, Vec<NodeId>) {
        let mut canvas = Canvas::new(Settings::default());
        let ids = nodes
            .into_iter()
            .map(|node| canvas.add_node(node).unwrap())
            .collect();
        (canvas, ids)
    }

    #[test]
    fn visible_node_projects_with_flip_and_label_offset() {
        let (canvas, ids) = canvas_with(vec![Node::dot("A", Point::new(600, 600), 10, Rgba::BLACK)]);
        let scene = Scene::capture(&canvas, Point::default(), 0);
        assert_eq!(
            scene.nodes,
            vec![NodeDraw {
                id: ids[0],
                kind: NodeKind::Dot,
                position: Some(PointF::new(100.0, 380.0)),
                radius: 10.0,
                scale: 1.0,
                color: Rgba::BLACK,
                label: "A".to_string(),
                label_anchor: Some(PointF::new(115.0, 85.0)),
            }]
        );
    }

    #[test]
    fn off_screen_nodes_hide_unless_sticky() {
        let (canvas, _) = canvas_with(vec![
            Node::dot("hidden", Point::new(0, 600), 10, Rgba::BLACK),
            Node::dot("pinned", Point::new(0, 600), 10, Rgba::BLACK).with_sticky(true),
        ]);
        let scene = Scene::capture(&canvas, Point::default(), 0);
        assert_eq!(scene.nodes[0].position, None);
        assert_eq!(scene.nodes[0].label_anchor, None);
        assert_eq!(scene.nodes[1].position, Some(PointF::new(BORDER_MARGIN as f32, 380.0)));
    }

    #[test]
    fn edges_need_one_visible_endpoint() {
        let (mut canvas, ids) = canvas_with(vec![
            Node::dot("in", Point::new(600, 600), 10, Rgba::BLACK),
            Node::dot("out", Point::new(5000, 600), 10, Rgba::BLACK),
            Node::dot("far", Point::new(-5000, 600), 10, Rgba::BLACK),
        ]);
        let visible = canvas.connect(ids[0], ids[1]).unwrap();
        canvas.connect(ids[1], ids[2]).unwrap();

        let scene = Scene::capture(&canvas, Point::default(), 0);
        assert_eq!(scene.edges.len(), 1);
        let edge = &scene.edges[0];
        assert_eq!(edge.id, visible);
        assert_eq!(edge.from, PointF::new(100.0, 380.0));
        assert_eq!(edge.to, PointF::new((960 - BORDER_MARGIN) as f32, 380.0));
    }

    #[test]
    fn pending_line_follows_pointer_after_source_pick() {
        let (mut canvas, _) = canvas_with(vec![Node::dot("A", Point::new(600, 600), 10, Rgba::BLACK)]);
        let scene = Scene::capture(&canvas, Point::new(100, 100), 0);
        assert_eq!(scene.pending_line, None);

        canvas.handle_input(&FrameInput::at(0, Point::new(100, 100)).with_tertiary(ButtonState::PRESSED));
        let scene = Scene::capture(&canvas, Point::new(300, 50), 0);
        assert_eq!(
            scene.pending_line,
            Some([PointF::new(100.0, 380.0), PointF::new(300.0, 430.0)])
        );
        assert_eq!(scene.debug[4], "Picking: 1 Src: A Dest: null");
    }

    #[test]
    fn radius_follows_scale() {
        let (mut canvas, _) = canvas_with(vec![Node::dot("A", Point::new(600, 600), 10, Rgba::BLACK)]);
        canvas.viewport.scale = 2.0;
        let scene = Scene::capture(&canvas, Point::default(), 0);
        assert_eq!(scene.nodes[0].radius, 20.0);
    }

    #[test]
    fn sprites_carry_the_viewport_scale() {
        let (mut canvas, _) = canvas_with(vec![Node::sprite("S", Point::new(600, 600), Rgba::BLACK)]);
        canvas.viewport.scale = 2.5;
        let scene = Scene::capture(&canvas, Point::default(), 0);
        assert_eq!(scene.nodes[0].radius, 0.0);
        assert_eq!(scene.nodes[0].scale, 2.5);
    }

    #[test]
    fn debug_panel_reports_viewport() {
        let (canvas, _) = canvas_with(vec![]);
        let scene = Scene::capture(&canvas, Point::default(), 42);
        assert_eq!(scene.debug[0], "vp: (500, 500); 0 objects; scale 1.00");
        assert_eq!(scene.debug[2], "mouse prev click: -, last: -, curr time: 42");
    }
}
