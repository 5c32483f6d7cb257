// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor toolbar.
//!
//! A vertical strip of drawing tools and style pickers beside the tag. The
//! pickers open as pop-ups next to their button; opening one closes any
//! other overlay.

use super::{accent_color, tint_color, CHARCOAL};
use crate::models::annotation::Tool;
use crate::models::editor::{EditorState, Picker};
use crate::models::palette::{AccentColor, BackgroundTheme};
use crate::models::sticker::StickerSymbol;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    None,
    SelectTool(Tool),
    Clear,
    TogglePicker(Picker),
    SelectAccent(AccentColor),
    SelectBackground(BackgroundTheme),
    AddSticker(StickerSymbol),
}

const BUTTON_SIZE: egui::Vec2 = egui::vec2(40.0, 40.0);

fn tool_button(ui: &mut egui::Ui, icon: &str, active: bool, hint: &str) -> egui::Response {
    let (fill, text) = if active {
        (CHARCOAL, egui::Color32::WHITE)
    } else {
        (egui::Color32::WHITE, CHARCOAL)
    };
    ui.add(
        egui::Button::new(egui::RichText::new(icon).size(18.0).color(text))
            .fill(fill)
            .rounding(8.0)
            .min_size(BUTTON_SIZE),
    )
    .on_hover_text(hint)
}

fn swatch_button(ui: &mut egui::Ui, color: egui::Color32, active: bool, hint: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, egui::Sense::click());
    let painter = ui.painter();
    painter.rect_filled(rect, 8.0, egui::Color32::WHITE);
    painter.circle_filled(rect.center(), 11.0, color);
    let ring = if active { CHARCOAL } else { egui::Color32::from_gray(220) };
    painter.circle_stroke(rect.center(), 11.0, egui::Stroke::new(2.0, ring));
    response
        .on_hover_text(hint)
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Show `contents` in a pop-up to the right of `anchor`.
fn popup<R>(
    ui: &egui::Ui,
    id: &str,
    anchor: egui::Rect,
    contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor.right_top() + egui::vec2(8.0, 0.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, contents).inner
        })
        .inner
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, editor: &EditorState) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let tool = editor.layer.tool();

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 8.0;

        if tool_button(ui, "✏", tool == Some(Tool::Pen), "Pen").clicked() {
            action = ToolbarAction::SelectTool(Tool::Pen);
        }
        if tool_button(ui, "⌫", tool == Some(Tool::Eraser), "Eraser").clicked() {
            action = ToolbarAction::SelectTool(Tool::Eraser);
        }
        if tool_button(ui, "🗑", false, "Clear drawing and stickers").clicked() {
            action = ToolbarAction::Clear;
        }

        ui.separator();

        // Accent color
        let accent_open = editor.is_open(Picker::Accent);
        let anchor = swatch_button(ui, accent_color(editor.accent), accent_open, "Accent color");
        if anchor.clicked() {
            action = ToolbarAction::TogglePicker(Picker::Accent);
        }
        if accent_open {
            if let Some(choice) = popup(ui, "accent_picker", anchor.rect, |ui| {
                accent_grid(ui, editor.accent)
            }) {
                action = ToolbarAction::SelectAccent(choice);
            }
        }

        // Background theme
        let background_open = editor.is_open(Picker::Background);
        let [_, mid, _] = editor.background.gradient();
        let anchor = swatch_button(ui, tint_color(mid), background_open, "Background");
        if anchor.clicked() {
            action = ToolbarAction::TogglePicker(Picker::Background);
        }
        if background_open {
            if let Some(choice) = popup(ui, "background_picker", anchor.rect, |ui| {
                background_grid(ui, editor.background)
            }) {
                action = ToolbarAction::SelectBackground(choice);
            }
        }

        // Stickers
        let sticker_open = editor.is_open(Picker::Sticker);
        let anchor = tool_button(ui, "⭐", sticker_open, "Add sticker");
        if anchor.clicked() {
            action = ToolbarAction::TogglePicker(Picker::Sticker);
        }
        if sticker_open {
            if let Some(choice) = popup(ui, "sticker_picker", anchor.rect, sticker_grid) {
                action = ToolbarAction::AddSticker(choice);
            }
        }
    });

    action
}

fn accent_grid(ui: &mut egui::Ui, current: AccentColor) -> Option<AccentColor> {
    let mut chosen = None;
    egui::Grid::new("accent_grid").spacing([6.0, 6.0]).show(ui, |ui| {
        for (i, accent) in AccentColor::ALL.iter().enumerate() {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());
            ui.painter().circle_filled(rect.center(), 12.0, accent_color(*accent));
            if *accent == current {
                ui.painter()
                    .circle_stroke(rect.center(), 13.0, egui::Stroke::new(2.0, CHARCOAL));
            }
            if response.on_hover_text(accent.name()).clicked() {
                chosen = Some(*accent);
            }
            if i % 4 == 3 {
                ui.end_row();
            }
        }
    });
    chosen
}

fn background_grid(ui: &mut egui::Ui, current: BackgroundTheme) -> Option<BackgroundTheme> {
    let mut chosen = None;
    egui::Grid::new("background_grid").spacing([6.0, 6.0]).show(ui, |ui| {
        for (i, theme) in BackgroundTheme::ALL.iter().enumerate() {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(56.0, 36.0), egui::Sense::click());
            let [top, _, bottom] = theme.gradient();
            let painter = ui.painter();
            let (upper, lower) = rect.split_top_bottom_at_fraction(0.5);
            painter.rect_filled(upper, egui::Rounding { nw: 6.0, ne: 6.0, sw: 0.0, se: 0.0 }, tint_color(top));
            painter.rect_filled(lower, egui::Rounding { nw: 0.0, ne: 0.0, sw: 6.0, se: 6.0 }, tint_color(bottom));
            let stroke = if *theme == current {
                egui::Stroke::new(2.0, CHARCOAL)
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(220))
            };
            painter.rect_stroke(rect, 6.0, stroke);
            if response.on_hover_text(theme.name()).clicked() {
                chosen = Some(*theme);
            }
            if i % 2 == 1 {
                ui.end_row();
            }
        }
    });
    chosen
}

fn sticker_grid(ui: &mut egui::Ui) -> Option<StickerSymbol> {
    let mut chosen = None;
    egui::Grid::new("sticker_grid").spacing([4.0, 4.0]).show(ui, |ui| {
        for (i, symbol) in StickerSymbol::ALL.iter().enumerate() {
            let button = egui::Button::new(egui::RichText::new(symbol.glyph()).size(22.0))
                .frame(false)
                .min_size(egui::vec2(36.0, 36.0));
            if ui.add(button).clicked() {
                chosen = Some(*symbol);
            }
            if i % 4 == 3 {
                ui.end_row();
            }
        }
    });
    chosen
}
