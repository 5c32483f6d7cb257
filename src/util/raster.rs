// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Raster helpers.
//!
//! The annotation layer keeps free-hand drawing in a flattened RGBA buffer
//! (`DrawingSurface`). Strokes are composited segment by segment as round
//! capsules, so joins and caps come out round without tracking paths.
//! The export pipeline uses the corner mask to cut the tag's silhouette.

use super::geometry::{distance_to_segment, to_buffer_coordinates};
use crate::models::annotation::Point;
use image::{imageops, Rgba, RgbaImage};

/// How a stroke segment is composited onto the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    /// Source-over paint with a solid color.
    Paint { color: [u8; 4], width: f32 },
    /// Erase-through: removes coverage from whatever is underneath.
    Erase { width: f32 },
}

impl Brush {
    /// Stroke width in logical units.
    pub fn width(&self) -> f32 {
        match self {
            Brush::Paint { width, .. } | Brush::Erase { width } => *width,
        }
    }
}

/// Persistent drawing buffer sized to the layer at `scale` pixels per point.
pub struct DrawingSurface {
    pixels: RgbaImage,
    scale: f32,
    dirty: bool,
}

impl DrawingSurface {
    /// Create a transparent surface for a layer of `logical_size`.
    pub fn new(logical_size: (f32, f32), scale: f32) -> Self {
        let width = (logical_size.0 * scale).round().max(1.0) as u32;
        let height = (logical_size.1 * scale).round().max(1.0) as u32;
        Self {
            pixels: RgbaImage::new(width, height),
            scale,
            dirty: true,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Composite one segment between two layer-local points.
    pub fn stroke_segment(&mut self, from: Point, to: Point, brush: Brush) {
        let a = to_buffer_coordinates(from, self.scale);
        let b = to_buffer_coordinates(to, self.scale);
        let radius = brush.width() * self.scale / 2.0;

        let (w, h) = self.pixels.dimensions();
        let reach = radius + 1.0;
        let min_x = (a.x.min(b.x) - reach).floor().max(0.0) as u32;
        let min_y = (a.y.min(b.y) - reach).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x) + reach).ceil().min(w as f32) as u32;
        let max_y = (a.y.max(b.y) + reach).ceil().min(h as f32) as u32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius + 0.5 - distance_to_segment(center, a, b)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let pixel = self.pixels.get_pixel_mut(x, y);
                match brush {
                    Brush::Paint { color, .. } => blend_over(pixel, color, coverage),
                    Brush::Erase { .. } => erase(pixel, coverage),
                }
            }
        }
        self.dirty = true;
    }

    /// Wipe the whole buffer back to transparent.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        self.dirty = true;
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Returns true once after every change, so the texture is re-uploaded
    /// only when needed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Straight-alpha source-over.
fn blend_over(dst: &mut Rgba<u8>, color: [u8; 4], coverage: f32) {
    let src_a = color[3] as f32 / 255.0 * coverage;
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let s = color[c] as f32;
        let d = dst.0[c] as f32;
        dst.0[c] = ((s * src_a + d * dst_a * (1.0 - src_a)) / out_a).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

fn erase(dst: &mut Rgba<u8>, coverage: f32) {
    let a = dst.0[3] as f32 * (1.0 - coverage);
    dst.0[3] = a.round() as u8;
}

/// Make everything outside rounded top corners transparent.
///
/// The bottom edge keeps square corners, matching the tag's silhouette.
pub fn mask_rounded_top_corners(image: &mut RgbaImage, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let (w, h) = image.dimensions();
    let span = radius.ceil() as u32;
    for y in 0..span.min(h) {
        for x in 0..w {
            let cx = if (x as f32) < radius {
                radius
            } else if (x as f32) >= w as f32 - radius {
                w as f32 - radius
            } else {
                continue;
            };
            let center = Point::new(cx, radius);
            let d = Point::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage < 1.0 {
                let pixel = image.get_pixel_mut(x, y);
                pixel.0[3] = (pixel.0[3] as f32 * coverage).round() as u8;
            }
        }
    }
}

/// Resample to an exact pixel size.
pub fn resample(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, imageops::FilterType::Lanczos3)
}
