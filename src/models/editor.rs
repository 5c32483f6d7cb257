// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor state.
//!
//! `EditorState` owns the tag content, style selections and the annotation
//! layer. Pickers and in-place text editors share a single `Overlay` slot,
//! so at most one of them can ever be open.

use super::annotation::AnnotationLayer;
use super::palette::{AccentColor, BackgroundTheme};
use super::sticker::{StickerId, StickerSymbol};
use super::tag::{Aircraft, Purpose, TagContent, TextField, TripType};
use crate::config::EditorConfig;
use rand::Rng;

/// Pop-up pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    Accent,
    Background,
    Sticker,
    Aircraft,
}

/// Whatever is currently layered over the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Picker(Picker),
    Editing(TextField),
}

pub struct EditorState {
    pub tag: TagContent,
    pub accent: AccentColor,
    pub background: BackgroundTheme,
    pub layer: AnnotationLayer,
    overlay: Overlay,
    serial_number: String,
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_parts(config, TagContent::new(), generate_serial(&mut rand::thread_rng()))
    }

    /// Build a state from explicit content and serial number.
    pub fn with_parts(config: &EditorConfig, tag: TagContent, serial_number: String) -> Self {
        Self {
            tag,
            accent: AccentColor::default(),
            background: BackgroundTheme::default(),
            layer: AnnotationLayer::new(config),
            overlay: Overlay::None,
            serial_number,
        }
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn is_open(&self, picker: Picker) -> bool {
        self.overlay == Overlay::Picker(picker)
    }

    pub fn editing(&self) -> Option<TextField> {
        match self.overlay {
            Overlay::Editing(field) => Some(field),
            _ => None,
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Open a picker, or close it if it is already open. Anything else
    /// that was open is closed.
    pub fn toggle_picker(&mut self, picker: Picker) {
        self.overlay = if self.is_open(picker) {
            Overlay::None
        } else {
            Overlay::Picker(picker)
        };
        log::debug!("Overlay: {:?}", self.overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// Enter edit mode for a text field.
    pub fn begin_edit(&mut self, field: TextField) {
        self.overlay = Overlay::Editing(field);
        log::debug!("Editing {:?}", field);
    }

    /// Commit raw input to a field. Edits are applied on every keystroke;
    /// there is no separate save step.
    pub fn edit_field(&mut self, field: TextField, raw: &str) {
        self.tag.set_field(field, raw);
    }

    /// Leave edit mode. Whatever was typed stays.
    pub fn end_edit(&mut self) {
        if matches!(self.overlay, Overlay::Editing(_)) {
            self.overlay = Overlay::None;
        }
    }

    pub fn select_aircraft(&mut self, aircraft: Aircraft) {
        self.tag.aircraft = aircraft;
        if self.is_open(Picker::Aircraft) {
            self.overlay = Overlay::None;
        }
    }

    pub fn select_purpose(&mut self, purpose: Purpose) {
        self.tag.purpose = purpose;
    }

    pub fn select_trip_type(&mut self, trip_type: TripType) {
        self.tag.trip_type = trip_type;
    }

    pub fn select_accent(&mut self, accent: AccentColor) {
        self.accent = accent;
        if self.is_open(Picker::Accent) {
            self.overlay = Overlay::None;
        }
        log::debug!("Accent color: {} ({})", accent.name(), accent.hex());
    }

    pub fn select_background(&mut self, background: BackgroundTheme) {
        self.background = background;
        if self.is_open(Picker::Background) {
            self.overlay = Overlay::None;
        }
        log::debug!("Background: {}", background.name());
    }

    /// Place a sticker and close the sticker picker.
    pub fn add_sticker<R: Rng>(&mut self, symbol: StickerSymbol, rng: &mut R) -> StickerId {
        let id = self.layer.add_sticker(symbol, rng);
        if self.is_open(Picker::Sticker) {
            self.overlay = Overlay::None;
        }
        id
    }
}

/// Ten random decimal digits.
pub fn generate_serial<R: Rng>(rng: &mut R) -> String {
    (0..10)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn editor() -> EditorState {
        EditorState::with_parts(
            &EditorConfig::default(),
            TagContent::with_date("OCT 19, 2026".to_string()),
            "0123456789".to_string(),
        )
    }

    #[test]
    fn test_only_one_overlay_open() {
        let mut editor = editor();
        editor.toggle_picker(Picker::Accent);
        assert!(editor.is_open(Picker::Accent));

        editor.toggle_picker(Picker::Sticker);
        assert!(editor.is_open(Picker::Sticker));
        assert!(!editor.is_open(Picker::Accent));

        editor.begin_edit(TextField::City);
        assert_eq!(editor.overlay(), Overlay::Editing(TextField::City));
        assert!(!editor.is_open(Picker::Sticker));

        editor.toggle_picker(Picker::Aircraft);
        assert_eq!(editor.editing(), None);
    }

    #[test]
    fn test_toggle_same_picker_closes_it() {
        let mut editor = editor();
        editor.toggle_picker(Picker::Background);
        editor.toggle_picker(Picker::Background);
        assert_eq!(editor.overlay(), Overlay::None);
    }

    #[test]
    fn test_select_aircraft_closes_picker() {
        let mut editor = editor();
        editor.toggle_picker(Picker::Aircraft);
        editor.select_aircraft(Aircraft::AirbusA350);

        assert_eq!(editor.overlay(), Overlay::None);
        assert_eq!(editor.tag.aircraft.label(), "AIRBUS A350");
    }

    #[test]
    fn test_select_swatches_close_their_pickers() {
        let mut editor = editor();
        editor.toggle_picker(Picker::Accent);
        editor.select_accent(AccentColor::BurntOrange);
        assert_eq!(editor.overlay(), Overlay::None);
        assert_eq!(editor.accent.hex(), "#ea580c");

        editor.toggle_picker(Picker::Background);
        editor.select_background(BackgroundTheme::Mint);
        assert_eq!(editor.overlay(), Overlay::None);
        assert_eq!(editor.background, BackgroundTheme::Mint);
    }

    #[test]
    fn test_edits_commit_continuously() {
        let mut editor = editor();
        editor.begin_edit(TextField::CountryCode);
        editor.edit_field(TextField::CountryCode, "f");
        assert_eq!(editor.tag.country_code, "F");
        editor.edit_field(TextField::CountryCode, "france");
        assert_eq!(editor.tag.country_code, "FRA");

        editor.end_edit();
        assert_eq!(editor.overlay(), Overlay::None);
        assert_eq!(editor.tag.country_code, "FRA");
    }

    #[test]
    fn test_end_edit_leaves_pickers_alone() {
        let mut editor = editor();
        editor.toggle_picker(Picker::Sticker);
        editor.end_edit();
        assert!(editor.is_open(Picker::Sticker));
    }

    #[test]
    fn test_add_sticker_closes_picker() {
        let mut editor = editor();
        let mut rng = StdRng::seed_from_u64(3);
        editor.toggle_picker(Picker::Sticker);
        editor.add_sticker(StickerSymbol::Airplane, &mut rng);

        assert_eq!(editor.overlay(), Overlay::None);
        assert_eq!(editor.layer.stickers().len(), 1);
    }

    #[test]
    fn test_serial_is_ten_digits() {
        let serial = generate_serial(&mut StdRng::seed_from_u64(9));
        assert_eq!(serial.len(), 10);
        assert!(serial.chars().all(|c| c.is_ascii_digit()));
    }
}
