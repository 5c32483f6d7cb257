// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate math shared by the annotation layer:
//! mapping layer-local points into buffer pixels, keeping boxes inside the
//! layer, and measuring distance to stroke segments.

use crate::models::annotation::Point;

/// Map a layer-local point (logical units) into drawing buffer pixels.
pub fn to_buffer_coordinates(point: Point, scale: f32) -> Point {
    Point::new(point.x * scale, point.y * scale)
}

/// Clamp the top-left corner of a square box so the whole box stays
/// inside a layer of the given size.
///
/// If the layer is smaller than the box the corner is pinned at zero.
pub fn clamp_box_to_layer(top_left: Point, box_size: f32, layer_size: (f32, f32)) -> Point {
    let max_x = (layer_size.0 - box_size).max(0.0);
    let max_y = (layer_size.1 - box_size).max(0.0);
    Point::new(top_left.x.clamp(0.0, max_x), top_left.y.clamp(0.0, max_y))
}

/// Whether a point lies inside a square box anchored at `top_left`.
pub fn box_contains(top_left: Point, box_size: f32, point: Point) -> bool {
    point.x >= top_left.x
        && point.y >= top_left.y
        && point.x <= top_left.x + box_size
        && point.y <= top_left.y + box_size
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq < f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + dx * t, a.y + dy * t))
}
