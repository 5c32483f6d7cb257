// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation layer widget.
//!
//! This module paints the drawing buffer and stickers, and turns pointer
//! input into `CanvasAction`s for the application to apply. It never
//! mutates the layer itself.

use super::{muted_alpha, CHARCOAL};
use crate::models::annotation::{AnnotationLayer, DrawState, Point, Tool};
use crate::models::sticker::StickerId;

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    GrabSticker(StickerId, Point),
    DragSticker(Point),
    RemoveSticker(StickerId),
}

fn to_local(rect: egui::Rect, pos: egui::Pos2) -> Point {
    Point::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

/// Display the annotation layer and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    layer: &AnnotationLayer,
    drawing: Option<&egui::TextureHandle>,
    exporting: bool,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    let (width, height) = layer.size();
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);

    // Empty-state backdrop
    if layer.is_empty() && !exporting {
        painter.rect_filled(rect, 8.0, muted_alpha(0.03));
        let r = rect.shrink(0.5);
        let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom(), r.left_top()];
        painter.extend(egui::Shape::dashed_line(
            &corners,
            egui::Stroke::new(1.0, muted_alpha(0.15)),
            4.0,
            3.0,
        ));
    }

    if let Some(texture) = drawing {
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    if layer.tool().is_none() && layer.is_empty() && !exporting {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "DRAW OR ADD STICKERS",
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(0xc4, 0xb8, 0x9a),
        );
    }

    // Stickers, in stacking order
    let size = layer.sticker_size();
    for sticker in layer.stickers() {
        let min = rect.min + egui::vec2(sticker.position.x, sticker.position.y);
        let sticker_rect = egui::Rect::from_min_size(min, egui::vec2(size, size));
        let dragged = layer.dragged_sticker() == Some(sticker.id);

        let font_size = if dragged { 26.4 } else { 24.0 };
        painter.text(
            sticker_rect.center(),
            egui::Align2::CENTER_CENTER,
            sticker.symbol.glyph(),
            egui::FontId::proportional(font_size),
            CHARCOAL,
        );

        let sticker_response = ui
            .interact(
                sticker_rect,
                ui.id().with(("sticker", sticker.id)),
                egui::Sense::click_and_drag(),
            )
            .on_hover_text("Drag to move, double-click to remove")
            .on_hover_cursor(if dragged {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            });

        if sticker_response.double_clicked() {
            actions.push(CanvasAction::RemoveSticker(sticker.id));
        } else if sticker_response.drag_started() {
            // Overlapping stickers: grab the topmost under the press point
            let origin = ui.input(|i| i.pointer.press_origin()).map(|p| to_local(rect, p));
            if let Some(origin) = origin {
                let id = layer.sticker_at(origin).unwrap_or(sticker.id);
                actions.push(CanvasAction::GrabSticker(id, origin));
            }
        }
    }

    let (pointer, primary_down, moving) = ui.input(|i| {
        (
            i.pointer.interact_pos(),
            i.pointer.primary_down(),
            i.pointer.is_moving(),
        )
    });
    let inside = pointer.filter(|p| rect.contains(*p));

    // Free-hand drawing
    if layer.tool().is_some() && response.drag_started() {
        if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
            actions.push(CanvasAction::PointerDown(to_local(rect, origin)));
            if let Some(pos) = inside {
                actions.push(CanvasAction::PointerMove(to_local(rect, pos)));
            }
        }
    } else if layer.state() == DrawState::Stroking {
        match inside {
            Some(pos) if primary_down => {
                if moving {
                    actions.push(CanvasAction::PointerMove(to_local(rect, pos)));
                }
            }
            _ => actions.push(CanvasAction::PointerUp),
        }
    }

    // Sticker drag
    if layer.dragged_sticker().is_some() {
        match inside {
            Some(pos) if primary_down => actions.push(CanvasAction::DragSticker(to_local(rect, pos))),
            _ => actions.push(CanvasAction::PointerUp),
        }
    } else if let Some(CanvasAction::GrabSticker(_, _)) = actions.last() {
        if let Some(pos) = inside {
            actions.push(CanvasAction::DragSticker(to_local(rect, pos)));
        }
    }

    if response.hovered() {
        match layer.tool() {
            Some(Tool::Pen) => ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair),
            Some(Tool::Eraser) => ui.ctx().set_cursor_icon(egui::CursorIcon::Cell),
            None => {}
        }
    }

    actions
}
