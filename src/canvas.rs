//! The canvas: viewport, node and connection stores, and the per-frame
//! interaction state machine that drives them.

use crate::constants::MOUSE_ACTIVE_MS;
use crate::error::CanvasError;
use crate::geometry;
use crate::input::{FrameInput, TextInput};
use crate::interaction::*;
use crate::settings::Settings;
use crate::store::{ConnectionStore, NodeStore};
use crate::types::*;
use crate::viewport::Viewport;

/// Complete editor state, owned by the shell and handed to each frame's
/// input handling and drawing in turn.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Window into the world plane
    pub viewport: Viewport,
    nodes: NodeStore,
    connections: ConnectionStore,
    interaction: InteractionState,
    settings: Settings,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Canvas {
    /// Creates an empty canvas configured by `settings`.
    pub fn new(settings: Settings) -> Self {
        let viewport = Viewport::new(
            settings.initial_origin,
            settings.screen_width,
            settings.screen_height,
        )
        .with_scale_range(settings.min_scale, settings.max_scale);

        Self {
            viewport,
            nodes: NodeStore::with_capacity_limit(settings.max_nodes),
            connections: ConnectionStore::with_capacity_limit(settings.max_connections),
            interaction: InteractionState::new(settings.label_capacity),
            settings,
        }
    }

    /// Nodes in append order.
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Connections in append order.
    pub fn connections(&self) -> &ConnectionStore {
        &self.connections
    }

    /// Interaction state carried between frames.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Settings this canvas was created with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Appends a node.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, CanvasError> {
        self.nodes.add(node)
    }

    /// Creates a dot under the pointer with the next `"Object N"` label and a random color.
    pub fn create_node_at(&mut self, pointer: Point) -> Result<NodeId, CanvasError> {
        let position = self.viewport.pointer_to_world(pointer);
        let label = format!("Object {}", self.nodes.len() + 1);
        let node = Node::dot(label, position, self.settings.node_radius, Rgba::random_fill());
        let id = self.nodes.add(node)?;
        log::debug!("created node {id} at world ({}, {})", position.x, position.y);
        Ok(id)
    }

    /// Connects two existing, distinct nodes.
    ///
    /// # Errors
    ///
    /// [`CanvasError::UnknownNode`] if either id is not in the store,
    /// [`CanvasError::SelfConnection`] if both ids are the same node, and
    /// [`CanvasError::ConnectionCapacity`] if the connection store is full.
    pub fn connect(&mut self, source: NodeId, dest: NodeId) -> Result<ConnectionId, CanvasError> {
        for id in [source, dest] {
            if !self.nodes.contains(id) {
                return Err(CanvasError::UnknownNode(id));
            }
        }
        if source == dest {
            return Err(CanvasError::SelfConnection(source));
        }
        let label = format!("Connection {}", self.connections.len() + 1);
        let id = self.connections.add(Connection::new(label, source, dest))?;
        log::debug!("connected {source} -> {dest}");
        Ok(id)
    }

    /// The node under the pointer, if any. Earlier nodes win overlaps.
    pub fn hit_test(&self, pointer: Point) -> Option<NodeId> {
        geometry::hit_test(&self.nodes, &self.viewport, pointer, self.settings.collision_margin)
    }

    /// Returns true if the primary button was held within the last few milliseconds.
    pub fn mouse_recently_active(&self, now_ms: u64) -> bool {
        self.interaction.recently_active(now_ms, MOUSE_ACTIVE_MS)
    }

    /// Applies one frame of input.
    ///
    /// Steps run in a fixed order: zoom keys, hit test, primary press, secondary
    /// press, tertiary press, primary drag, text input. The hit test runs once and
    /// its result is shared by every step of the frame.
    pub fn handle_input(&mut self, input: &FrameInput) -> FrameReport {
        let mut report = FrameReport::default();

        self.handle_zoom_keys(input);

        let hit = self.hit_test(input.pointer);
        report.hit = hit;
        if hit.is_some() {
            self.interaction.last_grabbed = hit;
        }

        if input.primary.pressed {
            self.handle_primary_press(input, hit, &mut report);
        }
        if input.secondary.pressed {
            match self.create_node_at(input.pointer) {
                Ok(id) => report.created_node = Some(id),
                Err(err) => {
                    log::warn!("node not created: {err}");
                    report.rejected.push(err);
                }
            }
        }
        if input.tertiary.pressed {
            self.handle_connection_pick(hit, &mut report);
        }

        self.handle_drag(input);

        if self.interaction.overlay.open {
            self.handle_text(&input.text);
        }

        report
    }

    fn handle_zoom_keys(&mut self, input: &FrameInput) {
        // Zoom keys double as letters while typing a label
        if self.interaction.overlay.open {
            return;
        }
        if input.zoom_out {
            self.viewport.zoom_by(-self.settings.zoom_step);
        }
        if input.zoom_in {
            self.viewport.zoom_by(self.settings.zoom_step);
        }
    }

    fn handle_primary_press(&mut self, input: &FrameInput, hit: Option<NodeId>, report: &mut FrameReport) {
        let double_click = self
            .interaction
            .register_click(input.now_ms, self.settings.double_click_ms);
        if double_click {
            if let Some(id) = hit {
                report.overlay = Some(self.toggle_overlay(id));
            }
        }

        let drag = match hit.and_then(|id| self.nodes.get(id).map(|node| (id, node.position()))) {
            Some((id, position)) => Drag {
                mode: DragMode::Object(id),
                anchor: input.pointer,
                from: position,
            },
            None => Drag {
                mode: DragMode::Viewport,
                anchor: input.pointer,
                from: self.viewport.origin(),
            },
        };
        self.interaction.drag = Some(drag);
    }

    fn toggle_overlay(&mut self, hit: NodeId) -> OverlayChange {
        let overlay = &mut self.interaction.overlay;
        if overlay.open {
            overlay.open = false;
            let target = overlay.target.take();
            let committed = match target {
                Some(id) if !overlay.buffer.is_empty() => {
                    let text = overlay.buffer.text();
                    self.nodes.get_mut(id).map(|node| {
                        node.label = text;
                        id
                    })
                }
                _ => None,
            };
            log::debug!("label overlay closed, committed to {committed:?}");
            OverlayChange::Closed { committed }
        } else {
            overlay.open = true;
            overlay.target = Some(hit);
            overlay.buffer.clear();
            log::debug!("label overlay opened for {hit}");
            OverlayChange::Opened(hit)
        }
    }

    fn handle_connection_pick(&mut self, hit: Option<NodeId>, report: &mut FrameReport) {
        let pick = &mut self.interaction.pick;
        let Some(id) = hit else {
            // Clicking empty space cancels any half-picked connection
            pick.reset();
            return;
        };

        match pick.phase {
            PickPhase::PickingSource => {
                pick.source = Some(id);
                pick.phase = PickPhase::PickingDest;
            }
            PickPhase::PickingDest => {
                pick.dest = Some(id);
                let source = pick.source;
                pick.reset();
                if let Some(source) = source {
                    match self.connect(source, id) {
                        Ok(conn) => report.created_connection = Some(conn),
                        Err(err) => {
                            log::warn!("connection not created: {err}");
                            report.rejected.push(err);
                        }
                    }
                }
            }
        }
    }

    fn handle_drag(&mut self, input: &FrameInput) {
        if !input.primary.down {
            self.interaction.drag = None;
            return;
        }
        let Some(drag) = self.interaction.drag else {
            return;
        };
        self.interaction.last_activity_ms = Some(input.now_ms);

        let target = drag.target_position(input.pointer);
        match drag.mode {
            DragMode::Viewport => self.viewport.set_origin(target),
            DragMode::Object(id) => match self.nodes.get_mut(id) {
                Some(node) => node.set_position(target),
                None => self.interaction.drag = None,
            },
        }
    }

    fn handle_text(&mut self, text: &[TextInput]) {
        let buffer = &mut self.interaction.overlay.buffer;
        for edit in text {
            match *edit {
                TextInput::Char(ch) => {
                    buffer.push(ch);
                }
                TextInput::Backspace => buffer.clear(),
            }
        }
        if !text.is_empty() {
            log::trace!("label buffer [{}]", buffer.text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonState;

    fn canvas() -> Canvas {
        Canvas::new(Settings::default())
    }

    /// Adds a dot that sits under `pointer` for the canvas's current viewport.
    fn dot_under(canvas: &mut Canvas, label: &str, pointer: Point) -> NodeId {
        let world = canvas.viewport.pointer_to_world(pointer);
        canvas.add_node(Node::dot(label, world, 10, Rgba::BLACK)).unwrap()
    }

    fn press(button: fn(FrameInput, ButtonState) -> FrameInput, now: u64, pointer: Point) -> FrameInput {
        button(FrameInput::at(now, pointer), ButtonState::PRESSED)
    }

    #[test]
    fn secondary_press_creates_node_under_pointer() {
        let mut canvas = canvas();
        let report = canvas.handle_input(&press(FrameInput::with_secondary, 0, Point::new(100, 100)));
        let id = report.created_node.expect("node created");
        let node = canvas.nodes().get(id).unwrap();
        assert_eq!((node.x, node.y), (600, 600));
        assert_eq!(node.label, "Object 1");
        assert_eq!(node.radius, 10);
        assert!(!node.sticky);
    }

    #[test]
    fn node_creation_reports_capacity() {
        let mut canvas = Canvas::new(Settings {
            max_nodes: 1,
            ..Settings::default()
        });
        canvas.handle_input(&press(FrameInput::with_secondary, 0, Point::new(10, 10)));
        let report = canvas.handle_input(&press(FrameInput::with_secondary, 1, Point::new(50, 50)));
        assert_eq!(report.created_node, None);
        assert_eq!(report.rejected, vec![CanvasError::NodeCapacity { capacity: 1 }]);
        assert_eq!(canvas.nodes().len(), 1);
    }

    #[test]
    fn two_tertiary_picks_create_one_connection() {
        let mut canvas = canvas();
        let a = dot_under(&mut canvas, "A", Point::new(100, 100));
        let b = dot_under(&mut canvas, "B", Point::new(300, 200));

        let first = canvas.handle_input(&press(FrameInput::with_tertiary, 0, Point::new(100, 100)));
        assert_eq!(first.created_connection, None);
        assert_eq!(canvas.interaction().pick.phase, PickPhase::PickingDest);
        assert_eq!(canvas.interaction().pick.source, Some(a));

        let second = canvas.handle_input(&press(FrameInput::with_tertiary, 10, Point::new(302, 201)));
        let id = second.created_connection.expect("connection created");
        let conn = canvas.connections().get(id).unwrap();
        assert_eq!((conn.source, conn.dest), (a, b));
        assert_eq!(canvas.connections().len(), 1);
        assert_eq!(canvas.interaction().pick, ConnectionPick::default());
    }

    #[test]
    fn tertiary_on_empty_space_cancels_the_pick() {
        let mut canvas = canvas();
        dot_under(&mut canvas, "A", Point::new(100, 100));
        dot_under(&mut canvas, "B", Point::new(300, 200));

        canvas.handle_input(&press(FrameInput::with_tertiary, 0, Point::new(100, 100)));
        canvas.handle_input(&press(FrameInput::with_tertiary, 5, Point::new(700, 400)));
        assert_eq!(canvas.interaction().pick, ConnectionPick::default());

        // The next pick starts over as a source
        let report = canvas.handle_input(&press(FrameInput::with_tertiary, 9, Point::new(300, 200)));
        assert_eq!(report.created_connection, None);
        assert!(canvas.connections().is_empty());
    }

    #[test]
    fn self_connection_is_rejected_and_protocol_resets() {
        let mut canvas = canvas();
        let a = dot_under(&mut canvas, "A", Point::new(100, 100));
        canvas.handle_input(&press(FrameInput::with_tertiary, 0, Point::new(100, 100)));
        let report = canvas.handle_input(&press(FrameInput::with_tertiary, 5, Point::new(100, 100)));
        assert_eq!(report.rejected, vec![CanvasError::SelfConnection(a)]);
        assert!(canvas.connections().is_empty());
        assert_eq!(canvas.interaction().pick.phase, PickPhase::PickingSource);
    }

    #[test]
    fn connect_validates_endpoints() {
        let mut canvas = canvas();
        let a = dot_under(&mut canvas, "A", Point::new(100, 100));
        assert_eq!(canvas.connect(a, NodeId(7)), Err(CanvasError::UnknownNode(NodeId(7))));
        assert_eq!(canvas.connect(NodeId(9), a), Err(CanvasError::UnknownNode(NodeId(9))));
    }

    #[test]
    fn dragging_a_node_moves_it_by_the_pointer_delta() {
        let mut canvas = canvas();
        let id = dot_under(&mut canvas, "A", Point::new(100, 100));
        let before = canvas.nodes().get(id).unwrap().position();
        let origin = canvas.viewport.origin();

        canvas.handle_input(&press(FrameInput::with_primary, 0, Point::new(100, 100)));
        canvas.handle_input(&FrameInput::at(16, Point::new(125, 80)).with_primary(ButtonState::HELD));

        let after = canvas.nodes().get(id).unwrap().position();
        assert_eq!(after - before, Point::new(25, -20));
        assert_eq!(canvas.viewport.origin(), origin);
    }

    #[test]
    fn dragging_empty_space_pans_the_viewport_the_other_way() {
        let mut canvas = canvas();
        canvas.handle_input(&press(FrameInput::with_primary, 0, Point::new(400, 300)));
        canvas.handle_input(&FrameInput::at(16, Point::new(430, 260)).with_primary(ButtonState::HELD));
        assert_eq!(canvas.viewport.origin(), Point::new(470, 540));
        assert!(canvas.mouse_recently_active(20));
        assert!(!canvas.mouse_recently_active(100));
    }

    #[test]
    fn release_ends_the_drag() {
        let mut canvas = canvas();
        canvas.handle_input(&press(FrameInput::with_primary, 0, Point::new(400, 300)));
        canvas.handle_input(&FrameInput::at(16, Point::new(410, 300)).with_primary(ButtonState::RELEASED));
        assert_eq!(canvas.interaction().drag, None);
        canvas.handle_input(&FrameInput::at(32, Point::new(500, 300)));
        assert_eq!(canvas.viewport.origin(), Point::new(500, 500));
    }

    #[test]
    fn double_click_toggles_overlay_once() {
        let mut canvas = canvas();
        let id = dot_under(&mut canvas, "A", Point::new(100, 100));
        let at = Point::new(100, 100);

        canvas.handle_input(&press(FrameInput::with_primary, 1_000, at));
        canvas.handle_input(&FrameInput::at(1_016, at).with_primary(ButtonState::RELEASED));
        let report = canvas.handle_input(&press(FrameInput::with_primary, 1_050, at));
        assert_eq!(report.overlay, Some(OverlayChange::Opened(id)));
        assert!(canvas.interaction().overlay.open);
    }

    #[test]
    fn slow_clicks_do_not_toggle_overlay() {
        let mut canvas = canvas();
        dot_under(&mut canvas, "A", Point::new(100, 100));
        let at = Point::new(100, 100);

        canvas.handle_input(&press(FrameInput::with_primary, 1_000, at));
        let report = canvas.handle_input(&press(FrameInput::with_primary, 1_500, at));
        assert_eq!(report.overlay, None);
        assert!(!canvas.interaction().overlay.open);
    }

    #[test]
    fn double_click_on_empty_space_does_nothing() {
        let mut canvas = canvas();
        canvas.handle_input(&press(FrameInput::with_primary, 1_000, Point::new(50, 50)));
        let report = canvas.handle_input(&press(FrameInput::with_primary, 1_020, Point::new(50, 50)));
        assert_eq!(report.overlay, None);
    }

    #[test]
    fn typed_label_is_committed_when_overlay_closes() {
        let mut canvas = canvas();
        let id = dot_under(&mut canvas, "A", Point::new(100, 100));
        let at = Point::new(100, 100);

        canvas.handle_input(&press(FrameInput::with_primary, 1_000, at));
        canvas.handle_input(&press(FrameInput::with_primary, 1_050, at));
        canvas.handle_input(
            &FrameInput::at(1_100, at).with_text("Hub".chars().map(TextInput::Char)),
        );
        assert_eq!(canvas.interaction().overlay.buffer.text(), "Hub");

        canvas.handle_input(&press(FrameInput::with_primary, 2_000, at));
        let report = canvas.handle_input(&press(FrameInput::with_primary, 2_050, at));
        assert_eq!(report.overlay, Some(OverlayChange::Closed { committed: Some(id) }));
        assert_eq!(canvas.nodes().get(id).unwrap().label, "Hub");
    }

    #[test]
    fn text_is_ignored_while_overlay_is_closed() {
        let mut canvas = canvas();
        canvas.handle_input(&FrameInput::at(0, Point::new(0, 0)).with_text([TextInput::Char('q')]));
        assert!(canvas.interaction().overlay.buffer.is_empty());
    }

    #[test]
    fn backspace_clears_the_whole_buffer() {
        let mut canvas = canvas();
        dot_under(&mut canvas, "A", Point::new(100, 100));
        let at = Point::new(100, 100);
        canvas.handle_input(&press(FrameInput::with_primary, 1_000, at));
        canvas.handle_input(&press(FrameInput::with_primary, 1_050, at));
        canvas.handle_input(&FrameInput::at(1_100, at).with_text([
            TextInput::Char('a'),
            TextInput::Char('b'),
            TextInput::Backspace,
            TextInput::Char('c'),
        ]));
        assert_eq!(canvas.interaction().overlay.buffer.text(), "c");
    }

    #[test]
    fn zoom_keys_step_scale_each_frame() {
        let mut canvas = canvas();
        let mut frame = FrameInput::at(0, Point::new(0, 0));
        frame.zoom_in = true;
        canvas.handle_input(&frame);
        assert!((canvas.viewport.scale - 1.02).abs() < 1e-6);

        frame.zoom_in = false;
        frame.zoom_out = true;
        canvas.handle_input(&frame);
        canvas.handle_input(&frame);
        assert!((canvas.viewport.scale - 0.98).abs() < 1e-6);
    }

    #[test]
    fn hit_result_is_remembered_for_display() {
        let mut canvas = canvas();
        let id = dot_under(&mut canvas, "A", Point::new(100, 100));
        canvas.handle_input(&FrameInput::at(0, Point::new(101, 99)));
        canvas.handle_input(&FrameInput::at(1, Point::new(700, 400)));
        assert_eq!(canvas.interaction().last_grabbed, Some(id));
    }
}
