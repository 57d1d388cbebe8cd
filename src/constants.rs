//! Shared application-wide constants.
//! Centralizes tweakable values used across projection, interaction and rendering.

// Projection
/// Distance (in screen pixels) kept between a clamped sticky node and the surface edge.
pub const BORDER_MARGIN: i32 = 10;
/// Screen coordinate returned for off-screen positions when clamping is disabled.
/// Lies well outside any drawable surface.
pub const OFFSCREEN: i32 = -1000;

// Surface
/// Default render surface width in pixels.
pub const SCREEN_WIDTH: i32 = 960;
/// Default render surface height in pixels.
pub const SCREEN_HEIGHT: i32 = 480;
/// World coordinate shown at the surface corner on startup (both axes).
pub const INITIAL_ORIGIN: i32 = 500;

// Zoom
/// Scale change applied per frame while a zoom key is held.
pub const ZOOM_STEP: f32 = 0.02;
/// Lower bound for the viewport scale factor.
pub const MIN_SCALE: f32 = 0.25;
/// Upper bound for the viewport scale factor.
pub const MAX_SCALE: f32 = 5.0;

// Interaction
/// Extra pixels around a node's radius that still count as a hit.
pub const COLLISION_MARGIN_PX: i32 = 2;
/// Maximum gap in milliseconds between two primary presses forming a double click.
pub const DOUBLE_CLICK_PERIOD_MS: u64 = 100;
/// Window in milliseconds during which the pointer counts as recently active.
pub const MOUSE_ACTIVE_MS: u64 = 15;
/// Number of characters held by the label edit buffer.
pub const MAX_LABEL_LENGTH: usize = 32;

// Nodes and connections
/// Radius of nodes created with the middle button.
pub const DEFAULT_NODE_RADIUS: i32 = 10;
/// Default maximum number of nodes.
pub const MAX_OBJECTS: usize = 256;
/// Default maximum number of connections.
pub const MAX_CONNECTIONS: usize = 256;

// Grid/drawing
/// Distance between minor gridlines in world units.
pub const MINOR_GRIDLINE_DISTANCE: i32 = 100;
/// Length of each dash in dotted gridlines (screen pixels).
pub const GRID_DASH_LENGTH: f32 = 2.0;
/// Gray level used for gridlines.
pub const GRID_SHADE: u8 = 190;
/// Pixel gap between a node's edge and its label.
pub const LABEL_OFFSET: f32 = 5.0;
/// Font size of node labels and debug text.
pub const LABEL_FONT_SIZE: f32 = 20.0;
/// Alpha of the dimming rectangle drawn while the label overlay is open.
pub const OVERLAY_ALPHA: u8 = 200;
