// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Design sheet export.
//!
//! A design sheet is a plain-text record of what is on a tag: its text,
//! style choices and sticker placements. Photos and free-hand drawing are
//! not included. Sheets are write-only; the editor never reads them back.

use crate::models::editor::EditorState;
use crate::models::palette::{AccentColor, BackgroundTheme};
use crate::models::sticker::StickerPlacement;
use crate::models::tag::TagContent;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::Path;

/// Snapshot of a tag design.
#[derive(Debug, Clone, Serialize)]
pub struct DesignSheet {
    pub serial_number: String,
    pub tag: TagContent,
    pub has_photo: bool,
    pub accent_color: AccentColor,
    pub accent_hex: String,
    pub background: BackgroundTheme,
    pub stickers: Vec<StickerPlacement>,
    pub has_drawing: bool,
}

impl DesignSheet {
    pub fn from_editor(editor: &EditorState) -> Self {
        Self {
            serial_number: editor.serial_number().to_string(),
            tag: editor.tag.clone(),
            has_photo: editor.tag.photo.is_some(),
            accent_color: editor.accent,
            accent_hex: editor.accent.hex(),
            background: editor.background,
            stickers: editor.layer.stickers().to_vec(),
            has_drawing: editor.layer.has_drawing(),
        }
    }
}

/// Export a design sheet to YAML format.
pub fn export_yaml(sheet: &DesignSheet, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(sheet)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a design sheet to JSON format.
pub fn export_json(sheet: &DesignSheet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(sheet)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export in the format implied by the file extension.
pub fn export_by_extension(sheet: &DesignSheet, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => export_yaml(sheet, path),
        Some("json") => export_json(sheet, path),
        _ => Err(anyhow!("Unsupported file extension: {:?}", extension)),
    }
}
