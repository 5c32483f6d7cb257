// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Accent colors and background themes.
//!
//! Both are closed palettes: the editor only ever offers these values.

use serde::{Deserialize, Serialize};

/// An sRGB color with straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

const fn tint(r: u8, g: u8, b: u8, a: f32) -> Tint {
    Tint { r, g, b, a }
}

/// Accent color swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccentColor {
    Navy,
    BurntOrange,
    Forest,
    Violet,
    Crimson,
    Charcoal,
    #[default]
    Slate,
    Sage,
    Terracotta,
    DustyRose,
    Olive,
    SteelBlue,
    Mauve,
    Taupe,
    Moss,
    Clay,
}

impl AccentColor {
    pub const ALL: [AccentColor; 16] = [
        AccentColor::Navy,
        AccentColor::BurntOrange,
        AccentColor::Forest,
        AccentColor::Violet,
        AccentColor::Crimson,
        AccentColor::Charcoal,
        AccentColor::Slate,
        AccentColor::Sage,
        AccentColor::Terracotta,
        AccentColor::DustyRose,
        AccentColor::Olive,
        AccentColor::SteelBlue,
        AccentColor::Mauve,
        AccentColor::Taupe,
        AccentColor::Moss,
        AccentColor::Clay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AccentColor::Navy => "Navy",
            AccentColor::BurntOrange => "Burnt Orange",
            AccentColor::Forest => "Forest",
            AccentColor::Violet => "Violet",
            AccentColor::Crimson => "Crimson",
            AccentColor::Charcoal => "Charcoal",
            AccentColor::Slate => "Slate",
            AccentColor::Sage => "Sage",
            AccentColor::Terracotta => "Terracotta",
            AccentColor::DustyRose => "Dusty Rose",
            AccentColor::Olive => "Olive",
            AccentColor::SteelBlue => "Steel Blue",
            AccentColor::Mauve => "Mauve",
            AccentColor::Taupe => "Taupe",
            AccentColor::Moss => "Moss",
            AccentColor::Clay => "Clay",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            AccentColor::Navy => [0x1e, 0x40, 0xaf],
            AccentColor::BurntOrange => [0xea, 0x58, 0x0c],
            AccentColor::Forest => [0x16, 0x65, 0x34],
            AccentColor::Violet => [0x7c, 0x3a, 0xed],
            AccentColor::Crimson => [0xdc, 0x26, 0x26],
            AccentColor::Charcoal => [0x1c, 0x19, 0x17],
            AccentColor::Slate => [0x64, 0x74, 0x8b],
            AccentColor::Sage => [0x84, 0xa9, 0x8c],
            AccentColor::Terracotta => [0xc2, 0x84, 0x7a],
            AccentColor::DustyRose => [0xc9, 0xa9, 0xa6],
            AccentColor::Olive => [0x6b, 0x7c, 0x4c],
            AccentColor::SteelBlue => [0x5a, 0x7d, 0x9a],
            AccentColor::Mauve => [0x9d, 0x81, 0x89],
            AccentColor::Taupe => [0x8a, 0x79, 0x68],
            AccentColor::Moss => [0x7d, 0x84, 0x71],
            AccentColor::Clay => [0xa6, 0x7c, 0x52],
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// The accent at a given opacity, for dashed rules and borders.
    pub fn with_alpha(self, a: f32) -> Tint {
        let [r, g, b] = self.rgb();
        tint(r, g, b, a)
    }
}

/// Background themes: a vertical three-stop gradient plus a faint tint
/// washed in from two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundTheme {
    #[default]
    Cream,
    WarmWhite,
    CoolGray,
    SoftBlue,
    Blush,
    Mint,
    Lavender,
    Sand,
}

impl BackgroundTheme {
    pub const ALL: [BackgroundTheme; 8] = [
        BackgroundTheme::Cream,
        BackgroundTheme::WarmWhite,
        BackgroundTheme::CoolGray,
        BackgroundTheme::SoftBlue,
        BackgroundTheme::Blush,
        BackgroundTheme::Mint,
        BackgroundTheme::Lavender,
        BackgroundTheme::Sand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackgroundTheme::Cream => "Cream",
            BackgroundTheme::WarmWhite => "Warm White",
            BackgroundTheme::CoolGray => "Cool Gray",
            BackgroundTheme::SoftBlue => "Soft Blue",
            BackgroundTheme::Blush => "Blush",
            BackgroundTheme::Mint => "Mint",
            BackgroundTheme::Lavender => "Lavender",
            BackgroundTheme::Sand => "Sand",
        }
    }

    /// Gradient stops at top, middle and bottom.
    pub fn gradient(self) -> [Tint; 3] {
        match self {
            BackgroundTheme::Cream => [
                tint(255, 252, 245, 0.97),
                tint(253, 250, 240, 0.95),
                tint(250, 245, 230, 0.98),
            ],
            BackgroundTheme::WarmWhite => [
                tint(255, 255, 253, 0.98),
                tint(252, 250, 248, 0.96),
                tint(248, 246, 242, 0.98),
            ],
            BackgroundTheme::CoolGray => [
                tint(248, 250, 252, 0.98),
                tint(241, 245, 249, 0.96),
                tint(236, 240, 244, 0.98),
            ],
            BackgroundTheme::SoftBlue => [
                tint(248, 250, 255, 0.98),
                tint(240, 248, 255, 0.96),
                tint(235, 244, 255, 0.98),
            ],
            BackgroundTheme::Blush => [
                tint(255, 250, 250, 0.98),
                tint(255, 245, 245, 0.96),
                tint(254, 240, 240, 0.98),
            ],
            BackgroundTheme::Mint => [
                tint(248, 255, 252, 0.98),
                tint(240, 253, 248, 0.96),
                tint(235, 250, 244, 0.98),
            ],
            BackgroundTheme::Lavender => [
                tint(252, 250, 255, 0.98),
                tint(248, 245, 255, 0.96),
                tint(243, 240, 254, 0.98),
            ],
            BackgroundTheme::Sand => [
                tint(255, 253, 248, 0.98),
                tint(253, 248, 240, 0.96),
                tint(248, 242, 230, 0.98),
            ],
        }
    }

    /// Low-opacity texture tint.
    pub fn texture(self) -> Tint {
        match self {
            BackgroundTheme::Cream => tint(139, 90, 43, 0.03),
            BackgroundTheme::WarmWhite => tint(120, 100, 80, 0.02),
            BackgroundTheme::CoolGray => tint(100, 116, 139, 0.03),
            BackgroundTheme::SoftBlue => tint(59, 130, 246, 0.02),
            BackgroundTheme::Blush => tint(190, 120, 120, 0.02),
            BackgroundTheme::Mint => tint(52, 168, 83, 0.02),
            BackgroundTheme::Lavender => tint(139, 92, 246, 0.02),
            BackgroundTheme::Sand => tint(180, 150, 100, 0.03),
        }
    }
}
