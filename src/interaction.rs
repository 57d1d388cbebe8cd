//! Interaction state: drag tracking, click timing, the connection picking
//! protocol and the label-edit overlay.
//!
//! The transitions themselves live on [`crate::Canvas`]; this module only holds
//! the state they operate on.

use crate::error::CanvasError;
use crate::types::{ConnectionId, NodeId, Point};

/// What a primary-button drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// The viewport origin pans opposite to the pointer
    Viewport,
    /// The given node follows the pointer
    Object(NodeId),
}

/// An active primary-button drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    /// What is being dragged
    pub mode: DragMode,
    /// Pointer position when the drag started
    pub anchor: Point,
    /// World position of the dragged thing when the drag started
    pub from: Point,
}

impl Drag {
    /// Position of the dragged thing for the current pointer position.
    ///
    /// Nodes move with the pointer, the viewport moves against it.
    pub fn target_position(&self, pointer: Point) -> Point {
        let delta = pointer - self.anchor;
        match self.mode {
            DragMode::Viewport => self.from - delta,
            DragMode::Object(_) => self.from + delta,
        }
    }
}

/// Which endpoint the next tertiary press picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickPhase {
    /// The next pick is the connection source
    #[default]
    PickingSource,
    /// The next pick is the connection destination
    PickingDest,
}

/// Progress of the two-phase connection protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionPick {
    /// Which endpoint comes next
    pub phase: PickPhase,
    /// Picked source node
    pub source: Option<NodeId>,
    /// Picked destination node (only set transiently before the reset)
    pub dest: Option<NodeId>,
}

impl ConnectionPick {
    /// Clears both endpoints and waits for a source again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fixed-capacity text buffer behind the label overlay.
///
/// Characters past the end wrap around and overwrite the beginning rather than
/// being dropped, and backspace empties the whole buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBuffer {
    slots: Vec<char>,
    cursor: usize,
    capacity: usize,
}

impl LabelBuffer {
    /// Creates an empty buffer holding at most `capacity` characters (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Returns true for characters the buffer accepts: printable ASCII.
    pub fn accepts(ch: char) -> bool {
        ch.is_ascii() && !ch.is_ascii_control()
    }

    /// Writes a character at the cursor and advances it, wrapping at capacity.
    /// Returns false if the character was not accepted.
    pub fn push(&mut self, ch: char) -> bool {
        if !Self::accepts(ch) {
            return false;
        }
        match self.slots.get_mut(self.cursor) {
            Some(slot) => *slot = ch,
            None => self.slots.push(ch),
        }
        self.cursor = (self.cursor + 1) % self.capacity;
        true
    }

    /// Empties the buffer and rewinds the cursor.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
    }

    /// Current contents.
    pub fn text(&self) -> String {
        self.slots.iter().collect()
    }

    /// Returns true if nothing has been typed since the last clear.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of characters held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The label-edit overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Whether the overlay is shown and receives text
    pub open: bool,
    /// Node whose label is being edited
    pub target: Option<NodeId>,
    /// Text typed so far
    pub buffer: LabelBuffer,
}

/// All interaction state carried between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    /// Active primary-button drag, if any
    pub drag: Option<Drag>,
    /// Timestamp of the latest primary press
    pub last_click_ms: Option<u64>,
    /// Timestamp of the primary press before that
    pub prev_click_ms: Option<u64>,
    /// Timestamp of the latest frame with the primary button held
    pub last_activity_ms: Option<u64>,
    /// Connection protocol progress
    pub pick: ConnectionPick,
    /// Label overlay
    pub overlay: Overlay,
    /// Node under the pointer on the latest frame that hit one. Display only.
    pub last_grabbed: Option<NodeId>,
}

impl InteractionState {
    /// Creates idle interaction state with a label buffer of `label_capacity` characters.
    pub fn new(label_capacity: usize) -> Self {
        Self {
            drag: None,
            last_click_ms: None,
            prev_click_ms: None,
            last_activity_ms: None,
            pick: ConnectionPick::default(),
            overlay: Overlay {
                open: false,
                target: None,
                buffer: LabelBuffer::new(label_capacity),
            },
            last_grabbed: None,
        }
    }

    /// Records a primary press at `now_ms` and reports whether it completes a
    /// double click, i.e. follows the previous press by at most `period_ms`.
    pub fn register_click(&mut self, now_ms: u64, period_ms: u64) -> bool {
        self.prev_click_ms = self.last_click_ms;
        self.last_click_ms = Some(now_ms);
        self.prev_click_ms
            .is_some_and(|prev| now_ms.saturating_sub(prev) <= period_ms)
    }

    /// Returns true if the primary button was held within the last `window_ms`.
    pub fn recently_active(&self, now_ms: u64, window_ms: u64) -> bool {
        self.last_activity_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < window_ms)
    }
}

/// How the label overlay changed during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayChange {
    /// The overlay opened for the given node
    Opened(NodeId),
    /// The overlay closed; `committed` names the node whose label was replaced
    Closed {
        /// Node that received the typed label, if any text was typed
        committed: Option<NodeId>,
    },
}

/// What happened while handling one frame of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Node under the pointer at the start of the frame
    pub hit: Option<NodeId>,
    /// Node created by the secondary button
    pub created_node: Option<NodeId>,
    /// Connection completed by the tertiary button
    pub created_connection: Option<ConnectionId>,
    /// Overlay transition caused by a double click
    pub overlay: Option<OverlayChange>,
    /// Operations that were rejected this frame
    pub rejected: Vec<CanvasError>,
}
