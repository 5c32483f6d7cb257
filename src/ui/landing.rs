// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Landing screen shown before the editor.

use super::{accent_color, CHARCOAL, INK, MUTED, SKY};
use crate::models::palette::AccentColor;
use egui::{pos2, vec2, Color32, FontId, Rect, RichText};

const AIRPORT_CODES: [&str; 8] = ["TYO", "PAR", "NYC", "DXB", "SYD", "ROM", "BCN", "SFO"];

const FEATURES: [(&str, &str); 3] = [
    ("Fully Editable", "Double-click any field to change it"),
    ("Custom Artwork", "Draw, add stickers and photos"),
    ("PNG Export", "High-resolution image, ready to print"),
];

/// Sample tags fanned out beside the pitch: code, city, accent.
const SAMPLES: [(&str, &str, AccentColor); 3] = [
    ("JPN", "TOKYO", AccentColor::Crimson),
    ("FRA", "PARIS", AccentColor::Navy),
    ("ARE", "DUBAI", AccentColor::BurntOrange),
];

/// Display the landing screen. Returns true when the user asks to start.
pub fn show(ui: &mut egui::Ui) -> bool {
    let mut start = false;

    ui.horizontal_centered(|ui| {
        ui.add_space(48.0);
        ui.vertical(|ui| {
            ui.set_max_width(420.0);
            ui.spacing_mut().item_spacing.y = 10.0;

            ui.label(RichText::new("AIRLABEL").font(FontId::monospace(12.0)).color(MUTED));
            ui.label(RichText::new("Design Beautiful Luggage Tags").size(36.0).color(INK).strong());
            ui.label(
                RichText::new("Make a one-of-a-kind airline tag for your next trip and export it as an image.")
                    .size(15.0)
                    .color(MUTED),
            );

            ui.add_space(8.0);
            for (title, detail) in FEATURES {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("✔").color(SKY));
                    ui.label(RichText::new(title).strong().color(INK));
                    ui.label(RichText::new(detail).color(MUTED));
                });
            }

            ui.add_space(8.0);
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;
                for code in AIRPORT_CODES {
                    code_chip(ui, code);
                }
            });

            ui.add_space(16.0);
            let button = egui::Button::new(
                RichText::new("Start Designing  ➡").size(16.0).color(Color32::WHITE),
            )
            .fill(CHARCOAL)
            .rounding(8.0)
            .min_size(vec2(200.0, 44.0));
            if ui.add(button).clicked() {
                start = true;
            }
        });

        ui.add_space(48.0);
        let (rect, _) = ui.allocate_exact_size(vec2(260.0, 320.0), egui::Sense::hover());
        for (i, (code, city, accent)) in SAMPLES.iter().enumerate() {
            let offset = vec2(i as f32 * 36.0, i as f32 * 44.0);
            mini_tag(ui, Rect::from_min_size(rect.min + offset, vec2(150.0, 200.0)), code, city, *accent);
        }
    });

    start
}

fn code_chip(ui: &mut egui::Ui, code: &str) {
    egui::Frame::none()
        .fill(Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(225)))
        .rounding(6.0)
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .show(ui, |ui| {
            ui.label(RichText::new(code).font(FontId::monospace(11.0)).color(INK));
        });
}

/// A small, non-interactive tag preview.
fn mini_tag(ui: &egui::Ui, rect: Rect, code: &str, city: &str, accent: AccentColor) {
    let painter = ui.painter();
    let accent = accent_color(accent);

    painter.rect_filled(
        rect.translate(vec2(2.0, 4.0)),
        egui::Rounding { nw: 8.0, ne: 8.0, sw: 0.0, se: 0.0 },
        Color32::from_black_alpha(20),
    );
    painter.rect_filled(
        rect,
        egui::Rounding { nw: 8.0, ne: 8.0, sw: 0.0, se: 0.0 },
        Color32::from_rgb(0xfd, 0xfa, 0xf0),
    );

    let strip = Rect::from_min_size(rect.min + vec2(0.0, 28.0), vec2(28.0, rect.height() - 60.0));
    painter.rect_filled(strip, 0.0, accent);
    for (i, letter) in code.chars().enumerate() {
        painter.text(
            pos2(strip.center().x, strip.top() + 24.0 + i as f32 * 14.0),
            egui::Align2::CENTER_CENTER,
            letter,
            FontId::monospace(12.0),
            Color32::WHITE,
        );
    }

    painter.circle_filled(rect.left_top() + vec2(16.0, 14.0), 6.0, accent);
    painter.text(
        rect.left_top() + vec2(26.0, 14.0),
        egui::Align2::LEFT_CENTER,
        "AIRLABEL",
        FontId::monospace(8.0),
        INK,
    );
    painter.text(
        pos2(strip.right() + 10.0, strip.center().y),
        egui::Align2::LEFT_CENTER,
        city,
        FontId::proportional(20.0),
        INK,
    );

    let barcode_top = rect.bottom() - 24.0;
    let mut x = rect.left() + 10.0;
    while x < rect.right() - 10.0 {
        painter.rect_filled(
            Rect::from_min_size(pos2(x, barcode_top), vec2(1.5, 14.0)),
            0.0,
            INK,
        );
        x += 5.0;
    }
}
