// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tag content.
//!
//! `TagContent` is everything printed on the tag. Text fields are kept
//! uppercase; the country code is additionally limited to three characters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters in a country code.
pub const COUNTRY_CODE_LEN: usize = 3;

/// Trip purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Purpose {
    #[default]
    Leisure,
    Business,
}

impl Purpose {
    pub const ALL: [Purpose; 2] = [Purpose::Leisure, Purpose::Business];

    pub fn label(self) -> &'static str {
        match self {
            Purpose::Leisure => "LEISURE",
            Purpose::Business => "BUSINESS",
        }
    }
}

/// Travelling alone or with others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TripType {
    #[default]
    Solo,
    Group,
}

impl TripType {
    pub const ALL: [TripType; 2] = [TripType::Solo, TripType::Group];

    pub fn label(self) -> &'static str {
        match self {
            TripType::Solo => "SOLO",
            TripType::Group => "GROUP",
        }
    }
}

/// Aircraft offered by the aircraft picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aircraft {
    #[serde(rename = "BOEING 737")]
    Boeing737,
    #[serde(rename = "BOEING 747")]
    Boeing747,
    #[default]
    #[serde(rename = "BOEING 777")]
    Boeing777,
    #[serde(rename = "BOEING 787")]
    Boeing787,
    #[serde(rename = "AIRBUS A320")]
    AirbusA320,
    #[serde(rename = "AIRBUS A330")]
    AirbusA330,
    #[serde(rename = "AIRBUS A350")]
    AirbusA350,
    #[serde(rename = "AIRBUS A380")]
    AirbusA380,
    #[serde(rename = "EMBRAER E190")]
    EmbraerE190,
    #[serde(rename = "ATR 72")]
    Atr72,
}

impl Aircraft {
    pub const ALL: [Aircraft; 10] = [
        Aircraft::Boeing737,
        Aircraft::Boeing747,
        Aircraft::Boeing777,
        Aircraft::Boeing787,
        Aircraft::AirbusA320,
        Aircraft::AirbusA330,
        Aircraft::AirbusA350,
        Aircraft::AirbusA380,
        Aircraft::EmbraerE190,
        Aircraft::Atr72,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Aircraft::Boeing737 => "BOEING 737",
            Aircraft::Boeing747 => "BOEING 747",
            Aircraft::Boeing777 => "BOEING 777",
            Aircraft::Boeing787 => "BOEING 787",
            Aircraft::AirbusA320 => "AIRBUS A320",
            Aircraft::AirbusA330 => "AIRBUS A330",
            Aircraft::AirbusA350 => "AIRBUS A350",
            Aircraft::AirbusA380 => "AIRBUS A380",
            Aircraft::EmbraerE190 => "EMBRAER E190",
            Aircraft::Atr72 => "ATR 72",
        }
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-text fields editable in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    CountryCode,
    City,
    Airline,
    Date,
    Passenger,
}

impl TextField {
    /// The city is the only field that spans several lines.
    pub fn is_multiline(self) -> bool {
        matches!(self, TextField::City)
    }

    /// Normalize raw input for this field.
    pub fn normalize(self, raw: &str) -> String {
        let upper = raw.to_uppercase();
        match self {
            TextField::CountryCode => upper.chars().take(COUNTRY_CODE_LEN).collect(),
            _ => upper,
        }
    }
}

/// Decoded photo pixels (RGBA8, row-major).
#[derive(Clone, PartialEq)]
pub struct Photo {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Everything printed on the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagContent {
    pub country_code: String,
    /// Newline-separated; each line is displayed on its own row.
    pub city: String,
    pub airline: String,
    pub aircraft: Aircraft,
    pub date: String,
    pub purpose: Purpose,
    pub trip_type: TripType,
    pub passenger: String,
    #[serde(skip)]
    pub photo: Option<Photo>,
}

impl TagContent {
    /// Default content with the given travel date.
    pub fn with_date(date: String) -> Self {
        Self {
            country_code: "USA".to_string(),
            city: "NEW\nYORK".to_string(),
            airline: "EMIRATES".to_string(),
            aircraft: Aircraft::default(),
            date,
            purpose: Purpose::default(),
            trip_type: TripType::default(),
            passenger: "TRAVELER".to_string(),
            photo: None,
        }
    }

    /// Default content dated today, e.g. `OCT 19, 2026`.
    pub fn new() -> Self {
        Self::with_date(today_label())
    }

    pub fn field(&self, field: TextField) -> &str {
        match field {
            TextField::CountryCode => &self.country_code,
            TextField::City => &self.city,
            TextField::Airline => &self.airline,
            TextField::Date => &self.date,
            TextField::Passenger => &self.passenger,
        }
    }

    /// Write raw input into a field, normalized.
    pub fn set_field(&mut self, field: TextField, raw: &str) {
        let value = field.normalize(raw);
        let slot = match field {
            TextField::CountryCode => &mut self.country_code,
            TextField::City => &mut self.city,
            TextField::Airline => &mut self.airline,
            TextField::Date => &mut self.date,
            TextField::Passenger => &mut self.passenger,
        };
        *slot = value;
    }

    /// Replace (or clear) the photo. The previous photo is dropped.
    pub fn set_photo(&mut self, photo: Option<Photo>) {
        self.photo = photo;
    }
}

impl Default for TagContent {
    fn default() -> Self {
        Self::new()
    }
}

fn today_label() -> String {
    chrono::Local::now().format("%b %d, %Y").to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_truncated_and_uppercased() {
        let mut tag = TagContent::with_date("JAN 01, 2025".to_string());
        tag.set_field(TextField::CountryCode, "france");
        assert_eq!(tag.country_code, "FRA");

        tag.set_field(TextField::CountryCode, "jp");
        assert_eq!(tag.country_code, "JP");
    }

    #[test]
    fn test_country_code_counts_characters_not_bytes() {
        assert_eq!(TextField::CountryCode.normalize("éire"), "ÉIR");
    }

    #[test]
    fn test_text_fields_uppercased_without_truncation() {
        let mut tag = TagContent::with_date(String::new());
        tag.set_field(TextField::City, "san\nfrancisco");
        tag.set_field(TextField::Passenger, "ada lovelace");

        assert_eq!(tag.city, "SAN\nFRANCISCO");
        assert_eq!(tag.field(TextField::Passenger), "ADA LOVELACE");
    }

    #[test]
    fn test_defaults() {
        let tag = TagContent::with_date("OCT 19, 2026".to_string());
        assert_eq!(tag.city, "NEW\nYORK");
        assert_eq!(tag.country_code, "USA");
        assert_eq!(tag.aircraft, Aircraft::Boeing777);
        assert_eq!(tag.purpose, Purpose::Leisure);
        assert_eq!(tag.trip_type, TripType::Solo);
        assert!(tag.photo.is_none());
    }

    #[test]
    fn test_today_label_shape() {
        let label = today_label();
        // "MON DD, YYYY"
        assert_eq!(label.len(), 12);
        assert_eq!(label, label.to_uppercase());
        assert_eq!(&label[6..8], ", ");
    }

    #[test]
    fn test_replacing_photo_discards_previous() {
        let mut tag = TagContent::with_date(String::new());
        let first = Photo {
            width: 1,
            height: 1,
            pixels: vec![255, 0, 0, 255],
        };
        let second = Photo {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 255, 255],
        };
        tag.set_photo(Some(first));
        tag.set_photo(Some(second.clone()));
        assert_eq!(tag.photo, Some(second));

        tag.set_photo(None);
        assert!(tag.photo.is_none());
    }

    #[test]
    fn test_aircraft_serializes_as_label() {
        let json = serde_json::to_string(&Aircraft::AirbusA350).unwrap();
        assert_eq!(json, "\"AIRBUS A350\"");
        assert_eq!(Aircraft::ALL.len(), 10);
    }
}
