// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! All sizes are in logical points unless noted otherwise. The editor has
//! no config file; `EditorConfig::default()` is what the application runs with.

use std::time::Duration;

/// Tunable constants for the tag editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Width of the tag artwork.
    pub tag_width: f32,

    /// Radius of the tag's top corners (bottom corners are square).
    pub tag_corner_radius: f32,

    /// Size of the annotation layer (drawing + stickers).
    pub layer_size: (f32, f32),

    /// Drawing buffer pixels per logical point.
    pub buffer_scale: f32,

    /// Edge length of a sticker's bounding box.
    pub sticker_size: f32,

    /// Spawn region for new stickers: origin and jitter extent.
    pub sticker_spawn_origin: (f32, f32),
    pub sticker_spawn_jitter: (f32, f32),

    /// Pen stroke width and color (RGBA).
    pub pen_width: f32,
    pub pen_color: [u8; 4],

    /// Eraser stroke width.
    pub eraser_width: f32,

    /// Output pixels per logical point for exported images.
    pub export_pixel_ratio: f32,

    /// Delay between closing overlays and capturing the frame.
    pub export_settle_delay: Duration,

    /// How long to wait for a requested screenshot before giving up.
    pub export_capture_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tag_width: 340.0,
            tag_corner_radius: 12.0,
            layer_size: (308.0, 112.0),
            buffer_scale: 2.0,
            sticker_size: 40.0,
            sticker_spawn_origin: (100.0, 30.0),
            sticker_spawn_jitter: (50.0, 50.0),
            pen_width: 2.0,
            pen_color: [0x1c, 0x19, 0x17, 0xff],
            eraser_width: 20.0,
            export_pixel_ratio: 3.0,
            export_settle_delay: Duration::from_millis(150),
            export_capture_timeout: Duration::from_secs(2),
        }
    }
}
