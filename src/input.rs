//! Input abstraction layer.
//!
//! The shell samples its input source once per frame into a [`FrameInput`],
//! which is all the interaction state machine ever sees.

use crate::types::Point;

/// State of one pointer button during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// The button went down this frame
    pub pressed: bool,
    /// The button is held (true on the press frame as well)
    pub down: bool,
    /// The button went up this frame
    pub released: bool,
}

impl ButtonState {
    /// A button pressed this frame.
    pub const PRESSED: ButtonState = ButtonState {
        pressed: true,
        down: true,
        released: false,
    };
    /// A button held from an earlier frame.
    pub const HELD: ButtonState = ButtonState {
        pressed: false,
        down: true,
        released: false,
    };
    /// A button released this frame.
    pub const RELEASED: ButtonState = ButtonState {
        pressed: false,
        down: false,
        released: true,
    };
}

/// One keyboard edit delivered while the label overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    /// A typed character
    Char(char),
    /// The backspace key
    Backspace,
}

/// Everything the input source reports for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Monotonic timestamp of the frame in milliseconds
    pub now_ms: u64,
    /// Pointer position in window space (origin top-left, y down)
    pub pointer: Point,
    /// Left button: drags nodes or the viewport, double click opens the label overlay
    pub primary: ButtonState,
    /// Middle button: creates a node
    pub secondary: ButtonState,
    /// Right button: picks connection endpoints
    pub tertiary: ButtonState,
    /// Zoom-in key held
    pub zoom_in: bool,
    /// Zoom-out key held
    pub zoom_out: bool,
    /// Text edits in arrival order
    pub text: Vec<TextInput>,
}

impl FrameInput {
    /// An idle frame with the pointer at `pointer`.
    pub fn at(now_ms: u64, pointer: Point) -> Self {
        Self {
            now_ms,
            pointer,
            ..Default::default()
        }
    }

    /// Returns the frame with the primary button set to `state`.
    pub fn with_primary(mut self, state: ButtonState) -> Self {
        self.primary = state;
        self
    }

    /// Returns the frame with the secondary button set to `state`.
    pub fn with_secondary(mut self, state: ButtonState) -> Self {
        self.secondary = state;
        self
    }

    /// Returns the frame with the tertiary button set to `state`.
    pub fn with_tertiary(mut self, state: ButtonState) -> Self {
        self.tertiary = state;
        self
    }

    /// Returns the frame with the given text edits.
    pub fn with_text(mut self, text: impl IntoIterator<Item = TextInput>) -> Self {
        self.text = text.into_iter().collect();
        self
    }
}
