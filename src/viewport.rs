//! Viewport projection between the world plane and the drawing surface.
//!
//! The world plane is unbounded; the viewport is the `width x height` window into
//! it whose corner sits at `origin`. Projection produces *surface* coordinates,
//! which are y-up: world Y grows upward on the surface while the surface itself is
//! flipped vertically when composited onto the window. Pointer input arrives in
//! window coordinates, so pointer space is simply `world - origin` on both axes.

use crate::constants::{BORDER_MARGIN, MAX_SCALE, MIN_SCALE, OFFSCREEN};
use crate::types::Point;

/// The rectangle of the world plane currently shown on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World Y coordinate at the surface corner
    pub origin_y: i32,
    /// World X coordinate at the surface corner
    pub origin_x: i32,
    /// Surface width in pixels
    pub width: i32,
    /// Surface height in pixels
    pub height: i32,
    /// Zoom factor applied to node radii and gridline spacing
    pub scale: f32,
    /// Allowed zoom range
    pub scale_range: (f32, f32),
}

fn default_scale_range() -> (f32, f32) {
    (MIN_SCALE, MAX_SCALE)
}

/// Returns true if `value` lies past `start + extent`. Computed in i64 so
/// origins near the ends of the i32 range do not overflow.
fn past_end(value: i32, start: i32, extent: i32) -> bool {
    i64::from(value) > i64::from(start) + i64::from(extent)
}

impl Viewport {
    /// Creates a viewport of the given surface size at the given world origin, unzoomed.
    pub fn new(origin: Point, width: i32, height: i32) -> Self {
        Self {
            origin_y: origin.y,
            origin_x: origin.x,
            width,
            height,
            scale: 1.0,
            scale_range: default_scale_range(),
        }
    }

    /// Returns the viewport with a custom zoom range. The current scale is clamped into it.
    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        let min = min.max(f32::EPSILON);
        self.scale_range = (min, max.max(min));
        self.scale = self.scale.clamp(self.scale_range.0, self.scale_range.1);
        self
    }

    /// World coordinate at the surface corner.
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Converts a world X coordinate to a surface X coordinate, without clamping.
    pub fn project_x(&self, world_x: i32) -> i32 {
        world_x - self.origin_x
    }

    /// Converts a world Y coordinate to a surface Y coordinate, without clamping.
    pub fn project_y(&self, world_y: i32) -> i32 {
        self.height - (world_y - self.origin_y)
    }

    /// Inverse of [`Viewport::project_x`].
    pub fn unproject_x(&self, screen_x: i32) -> i32 {
        self.origin_x + screen_x
    }

    /// Inverse of [`Viewport::project_y`].
    pub fn unproject_y(&self, screen_y: i32) -> i32 {
        self.origin_y + (self.height - screen_y)
    }

    /// Converts a world X coordinate to a surface X coordinate.
    ///
    /// Coordinates left of the viewport map to the left border (plus margin) when
    /// `clamp` is set and to [`OFFSCREEN`] otherwise; coordinates right of it map
    /// to the right border or [`OFFSCREEN`].
    pub fn clamp_project_x(&self, world_x: i32, clamp: bool) -> i32 {
        if world_x < self.origin_x {
            if clamp { BORDER_MARGIN } else { OFFSCREEN }
        } else if past_end(world_x, self.origin_x, self.width) {
            if clamp { self.width - BORDER_MARGIN } else { OFFSCREEN }
        } else {
            self.project_x(world_x)
        }
    }

    /// Converts a world Y coordinate to a surface Y coordinate.
    ///
    /// Coordinates below the viewport clamp to the surface's top row (which shows
    /// at the bottom of the window after the composite flip), coordinates above it
    /// to the bottom row; without `clamp` both yield [`OFFSCREEN`].
    pub fn clamp_project_y(&self, world_y: i32, clamp: bool) -> i32 {
        if world_y < self.origin_y {
            if clamp { self.height - BORDER_MARGIN } else { OFFSCREEN }
        } else if past_end(world_y, self.origin_y, self.height) {
            if clamp { BORDER_MARGIN } else { OFFSCREEN }
        } else {
            self.project_y(world_y)
        }
    }

    /// Projects a world position onto the surface, clamping to the border when
    /// `clamp` is set. Returns `None` if either axis is off-screen and unclamped.
    pub fn clamp_project(&self, world: Point, clamp: bool) -> Option<Point> {
        let x = self.clamp_project_x(world.x, clamp);
        let y = self.clamp_project_y(world.y, clamp);
        if x == OFFSCREEN || y == OFFSCREEN {
            None
        } else {
            Some(Point::new(x, y))
        }
    }

    /// Returns true if the world position lies inside the viewport, borders included.
    pub fn position_visible(&self, y: i32, x: i32) -> bool {
        let y_in_range = y >= self.origin_y && !past_end(y, self.origin_y, self.height);
        let x_in_range = x >= self.origin_x && !past_end(x, self.origin_x, self.width);
        y_in_range && x_in_range
    }

    /// Converts a pointer position (window space, y down) to a world position.
    pub fn pointer_to_world(&self, pointer: Point) -> Point {
        self.origin() + pointer
    }

    /// Converts a world position to pointer space, or `None` when it is off-screen.
    ///
    /// This is the surface projection with the composite flip undone, and is what
    /// hit-testing compares against the pointer.
    pub fn world_to_pointer(&self, world: Point) -> Option<Point> {
        self.clamp_project(world, false)
            .map(|surface| Point::new(surface.x, self.height - surface.y))
    }

    /// Mirrors a y coordinate between surface and window space.
    /// The composite flip is its own inverse, so this works in both directions.
    pub fn flip_y(&self, y: f32) -> f32 {
        self.height as f32 - y
    }

    /// Moves the viewport origin to an absolute world position.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin_x = origin.x;
        self.origin_y = origin.y;
    }

    /// Pans the viewport by a world-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.set_origin(self.origin() + delta);
    }

    /// Changes the scale by `delta`, staying within the zoom range.
    pub fn zoom_by(&mut self, delta: f32) {
        let (min, max) = self.scale_range;
        self.scale = (self.scale + delta).clamp(min, max);
    }
}
