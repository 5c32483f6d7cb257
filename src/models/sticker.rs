// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sticker data structures.
//!
//! Stickers are small pictographs placed on the annotation layer. Their
//! position is the top-left corner of a square box, in layer-local units.

use super::annotation::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of travel pictographs offered in the sticker picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerSymbol {
    Airplane,
    Globe,
    WorldMap,
    Island,
    Backpack,
    Camera,
    Sunrise,
    Mountain,
    Beach,
    Locomotive,
    Ship,
    Theater,
    TokyoTower,
    StatueOfLiberty,
    FerrisWheel,
    Star,
}

impl StickerSymbol {
    /// Every symbol, in picker order.
    pub const ALL: [StickerSymbol; 16] = [
        StickerSymbol::Airplane,
        StickerSymbol::Globe,
        StickerSymbol::WorldMap,
        StickerSymbol::Island,
        StickerSymbol::Backpack,
        StickerSymbol::Camera,
        StickerSymbol::Sunrise,
        StickerSymbol::Mountain,
        StickerSymbol::Beach,
        StickerSymbol::Locomotive,
        StickerSymbol::Ship,
        StickerSymbol::Theater,
        StickerSymbol::TokyoTower,
        StickerSymbol::StatueOfLiberty,
        StickerSymbol::FerrisWheel,
        StickerSymbol::Star,
    ];

    /// The emoji rendered for this symbol.
    pub fn glyph(self) -> &'static str {
        match self {
            StickerSymbol::Airplane => "✈️",
            StickerSymbol::Globe => "🌍",
            StickerSymbol::WorldMap => "🗺️",
            StickerSymbol::Island => "🏝️",
            StickerSymbol::Backpack => "🎒",
            StickerSymbol::Camera => "📸",
            StickerSymbol::Sunrise => "🌅",
            StickerSymbol::Mountain => "⛰️",
            StickerSymbol::Beach => "🏖️",
            StickerSymbol::Locomotive => "🚂",
            StickerSymbol::Ship => "🛳️",
            StickerSymbol::Theater => "🎭",
            StickerSymbol::TokyoTower => "🗼",
            StickerSymbol::StatueOfLiberty => "🗽",
            StickerSymbol::FerrisWheel => "🎡",
            StickerSymbol::Star => "⭐",
        }
    }
}

/// Identifier of a placed sticker, distinct within an editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StickerId(pub u64);

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sticker-{}", self.0)
    }
}

/// A sticker instance on the annotation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerPlacement {
    pub id: StickerId,
    pub symbol: StickerSymbol,
    pub position: Point,
}

impl StickerPlacement {
    pub fn new(id: StickerId, symbol: StickerSymbol, position: Point) -> Self {
        Self {
            id,
            symbol,
            position,
        }
    }
}
