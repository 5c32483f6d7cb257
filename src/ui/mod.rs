// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Airlabel application.

pub mod canvas;
pub mod landing;
pub mod tag_view;
pub mod toolbar;

use crate::models::palette::{AccentColor, Tint};
use egui::Color32;

/// Body text on the tag.
pub const INK: Color32 = Color32::from_rgb(0x2c, 0x24, 0x16);
/// Field captions and secondary text.
pub const MUTED: Color32 = Color32::from_rgb(0x8b, 0x73, 0x55);
/// Page background behind the tag; also the perforation color.
pub const PAGE: Color32 = Color32::from_rgb(0xf5, 0xf5, 0xf4);
/// Pen ink and primary buttons.
pub const CHARCOAL: Color32 = Color32::from_rgb(0x1c, 0x19, 0x17);
/// Call-to-action blue.
pub const SKY: Color32 = Color32::from_rgb(0x02, 0x84, 0xc7);

pub fn tint_color(tint: Tint) -> Color32 {
    Color32::from_rgba_unmultiplied(tint.r, tint.g, tint.b, (tint.a * 255.0).round() as u8)
}

pub fn accent_color(accent: AccentColor) -> Color32 {
    let [r, g, b] = accent.rgb();
    Color32::from_rgb(r, g, b)
}

/// `MUTED` at a given opacity.
pub fn muted_alpha(a: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(0x8b, 0x73, 0x55, (a * 255.0).round() as u8)
}
