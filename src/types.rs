//! Core data types for the canvas.
//!
//! This module defines the fundamental data structures shared by the viewport,
//! the stores and the interaction layer: points, colors, nodes and connections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a node: its index in the node store.
///
/// Ids are never reused or invalidated when the store grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identifier of a connection: its index in the connection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub usize);

/// An integer point, used for world positions and pointer positions alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Creates a point from its x and y coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A floating point position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl PointF {
    /// Creates a point from its x and y coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f32, p.y as f32)
    }
}

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    /// Opaque white
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    /// Opaque mid gray
    pub const GRAY: Rgba = Rgba::opaque(130, 130, 130);

    /// Creates a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Picks a random opaque fill color with every channel in `10..=254`,
    /// so new nodes never come out pure black or pure white.
    ///
    /// Falls back to [`Rgba::GRAY`] if the system random source is unavailable.
    pub fn random_fill() -> Self {
        let mut bytes = [0u8; 3];
        match getrandom::fill(&mut bytes) {
            Ok(()) => {
                let [r, g, b] = bytes.map(|byte| 10 + byte % 245);
                Rgba::opaque(r, g, b)
            }
            Err(err) => {
                log::warn!("random source unavailable, using gray: {err}");
                Rgba::GRAY
            }
        }
    }
}

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A filled circle
    Dot,
    /// A textured marker (drawn as a placeholder glyph)
    Sprite,
}

/// A placeable node on the world plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// How the node is drawn
    pub kind: NodeKind,
    /// Sticky nodes stay on screen, clamped to the border, when their position
    /// leaves the viewport. Non-sticky nodes are hidden instead.
    pub sticky: bool,
    /// Text drawn next to the node
    pub label: String,
    /// Circle radius in world units
    pub radius: i32,
    /// Fill color (or tint for sprites)
    pub color: Rgba,
    /// World Y position
    pub y: i32,
    /// World X position
    pub x: i32,
}

impl Node {
    /// Creates a non-sticky dot at the given world position.
    pub fn dot(label: impl Into<String>, position: Point, radius: i32, color: Rgba) -> Self {
        Self {
            kind: NodeKind::Dot,
            sticky: false,
            label: label.into(),
            radius,
            color,
            y: position.y,
            x: position.x,
        }
    }

    /// Creates a non-sticky sprite at the given world position.
    pub fn sprite(label: impl Into<String>, position: Point, color: Rgba) -> Self {
        Self {
            kind: NodeKind::Sprite,
            sticky: false,
            label: label.into(),
            radius: 0,
            color,
            y: position.y,
            x: position.x,
        }
    }

    /// Returns the node with its sticky flag set.
    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// World position of the node.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Moves the node to a new world position.
    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

/// An edge between two nodes, referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Text associated with the edge
    pub label: String,
    /// Line width in pixels
    pub width: i32,
    /// Line color
    pub color: Rgba,
    /// Node the edge starts from
    pub source: NodeId,
    /// Node the edge ends at
    pub dest: NodeId,
}

impl Connection {
    /// Creates a one pixel black connection between two nodes.
    pub fn new(label: impl Into<String>, source: NodeId, dest: NodeId) -> Self {
        Self {
            label: label.into(),
            width: 1,
            color: Rgba::BLACK,
            source,
            dest,
        }
    }
}
