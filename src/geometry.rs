//! Geometry helpers: distances, hit-testing, dotted lines and gridline layout.

use crate::store::NodeStore;
use crate::types::{NodeId, Point, PointF};
use crate::viewport::Viewport;

/// Straight-line distance between two points.
pub fn distance(a: PointF, b: PointF) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Finds the node under the pointer.
///
/// Nodes are checked in store order and the first match wins, so an earlier node
/// shadows later ones that overlap it. A node is hit when the distance between the
/// pointer and the node's on-screen position is at most `radius + margin`.
/// Off-screen nodes are never hit.
pub fn hit_test(nodes: &NodeStore, viewport: &Viewport, pointer: Point, margin: i32) -> Option<NodeId> {
    nodes.iter().find_map(|(id, node)| {
        let on_screen = viewport.world_to_pointer(node.position())?;
        let reach = (node.radius + margin) as f32;
        (distance(on_screen.into(), pointer.into()) <= reach).then_some(id)
    })
}

/// Splits a line into alternating drawn/skipped dashes of `segment` pixels.
///
/// Returns the drawn dashes. A zero-length line has no dashes, and segments
/// shorter than one pixel are widened to one.
pub fn dotted_segments(start: PointF, end: PointF, segment: f32) -> Vec<[PointF; 2]> {
    let length = distance(start, end);
    if !length.is_finite() || length <= f32::EPSILON {
        return Vec::new();
    }
    let segment = if segment.is_finite() { segment.max(1.0) } else { 1.0 };

    let dir_x = (end.x - start.x) / length;
    let dir_y = (end.y - start.y) / length;
    let at = |pos: f32| PointF::new(start.x + dir_x * pos, start.y + dir_y * pos);

    let mut dashes = Vec::with_capacity((length / (segment * 2.0)).ceil() as usize);
    let mut pos = 0.0;
    while pos < length {
        let dash_end = (pos + segment).min(length);
        dashes.push([at(pos), at(dash_end)]);
        pos += segment * 2.0;
    }
    dashes
}

/// Surface positions of the minor gridlines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gridlines {
    /// X coordinates of vertical lines
    pub vertical: Vec<f32>,
    /// Y coordinates of horizontal lines
    pub horizontal: Vec<f32>,
}

/// Lays out gridlines for world multiples of `distance`, spaced by the viewport scale.
///
/// Lines are returned in surface coordinates. Spacing under one pixel yields no lines.
pub fn gridlines(viewport: &Viewport, distance: i32) -> Gridlines {
    let spacing = distance as f32 * viewport.scale;
    if distance <= 0 || !spacing.is_finite() || spacing < 1.0 {
        return Gridlines::default();
    }

    let offset_x = viewport.origin_x.rem_euclid(distance) as f32 * viewport.scale;
    let offset_y = viewport.origin_y.rem_euclid(distance) as f32 * viewport.scale;
    let width = viewport.width as f32;
    let height = viewport.height as f32;

    let along = |offset: f32, extent: f32| -> Vec<f32> {
        (0..)
            .map(|i| i as f32 * spacing - offset)
            .take_while(|pos| *pos <= extent)
            .filter(|pos| *pos >= 0.0)
            .collect()
    };

    Gridlines {
        vertical: along(offset_x, width),
        horizontal: along(offset_y, height)
            .into_iter()
            .map(|window_y| viewport.flip_y(window_y))
            .collect(),
    }
}
