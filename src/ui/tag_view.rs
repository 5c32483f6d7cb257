// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The luggage tag itself.
//!
//! Lays out and paints the tag artwork, hosts the in-place text editors,
//! enum selectors, the photo slot and the annotation layer. Like the
//! toolbar, it only reports `TagAction`s; the application applies them.

use super::canvas::{self, CanvasAction};
use super::{accent_color, muted_alpha, tint_color, INK, MUTED, PAGE};
use crate::config::EditorConfig;
use crate::models::editor::{EditorState, Picker};
use crate::models::palette::Tint;
use crate::models::tag::{Aircraft, Purpose, TextField, TripType};
use egui::{pos2, vec2, Color32, FontId, Rect, Sense, Shape, Stroke};

const STRIP_WIDTH: f32 = 56.0;
const HEADER_HEIGHT: f32 = 40.0;
const PADDING: f32 = 16.0;
const PHOTO_SIZE: egui::Vec2 = egui::vec2(124.0, 96.0);
const BARCODE_HEIGHT: f32 = 48.0;
const NOTCH_COUNT: usize = 21;
const NOTCH_SIZE: egui::Vec2 = egui::vec2(12.0, 16.0);
const CORNER_STEPS: usize = 8;

/// Result of tag interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum TagAction {
    BeginEdit(TextField),
    Edit(TextField, String),
    EndEdit,
    SelectPurpose(Purpose),
    SelectTripType(TripType),
    ToggleAircraftPicker,
    SelectAircraft(Aircraft),
    PickPhoto,
    RemovePhoto,
    Canvas(CanvasAction),
}

/// Everything the tag needs to draw itself.
pub struct TagView<'a> {
    pub config: &'a EditorConfig,
    pub editor: &'a EditorState,
    pub photo: Option<&'a egui::TextureHandle>,
    pub drawing: Option<&'a egui::TextureHandle>,
    pub loading_photo: bool,
    /// Hide editing chrome (photo buttons, chevrons, placeholders).
    pub exporting: bool,
    /// Give keyboard focus to the open text editor this frame.
    pub focus_editor: bool,
}

pub struct TagResponse {
    /// Screen rectangle of the tag, used for export capture.
    pub rect: Rect,
    pub actions: Vec<TagAction>,
}

/// Display the tag.
pub fn show(ui: &mut egui::Ui, view: &TagView) -> TagResponse {
    let mut actions = Vec::new();
    let width = view.config.tag_width;
    let accent = accent_color(view.editor.accent);

    // Background is painted under the content once its size is known
    let background = ui.painter().add(Shape::Noop);

    let inner = ui.allocate_ui_with_layout(
        vec2(width, 0.0),
        egui::Layout::top_down(egui::Align::Min),
        |ui| {
            ui.set_width(width);
            ui.spacing_mut().item_spacing = vec2(0.0, 0.0);

            header(ui, view, accent);
            body(ui, view, accent, &mut actions);

            ui.horizontal(|ui| {
                ui.add_space(PADDING);
                let canvas_actions =
                    canvas::show(ui, &view.editor.layer, view.drawing, view.exporting);
                actions.extend(canvas_actions.into_iter().map(TagAction::Canvas));
            });
            ui.add_space(12.0);

            footer(ui, view, accent);
            perforations(ui);
        },
    );

    let rect = inner.response.rect;
    ui.painter().set(background, background_shape(rect, view));

    TagResponse { rect, actions }
}

fn background_shape(rect: Rect, view: &TagView) -> Shape {
    let radius = view.config.tag_corner_radius;
    let stops = view.editor.background.gradient();
    let accent = view.editor.accent;
    let mut shapes = vec![Shape::mesh(gradient_mesh(rect, stops, radius))];

    // Soft accent glows, kept inside the tag
    shapes.push(radial_glow(
        pos2(rect.left() + rect.width() * 0.2, rect.top() + rect.height() * 0.3),
        rect.width() * 0.5,
        tint_color(accent.with_alpha(0.04)),
        rect,
    ));
    shapes.push(radial_glow(
        pos2(rect.left() + rect.width() * 0.8, rect.top() + rect.height() * 0.7),
        rect.width() * 0.5,
        tint_color(view.editor.background.texture()),
        rect,
    ));

    shapes.push(Shape::rect_stroke(
        rect,
        egui::Rounding { nw: radius, ne: radius, sw: 0.0, se: 0.0 },
        Stroke::new(1.0, Color32::from_black_alpha(12)),
    ));
    Shape::Vec(shapes)
}

fn lerp_tint(a: Tint, b: Tint, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    let alpha = a.a + (b.a - a.a) * t;
    Color32::from_rgba_unmultiplied(
        mix(a.r, b.r),
        mix(a.g, b.g),
        mix(a.b, b.b),
        (alpha * 255.0).round() as u8,
    )
}

/// Vertical three-stop gradient with rounded top corners.
fn gradient_mesh(rect: Rect, stops: [Tint; 3], radius: f32) -> egui::Mesh {
    let color_at = |y: f32| {
        let t = ((y - rect.top()) / rect.height()).clamp(0.0, 1.0);
        if t < 0.5 {
            lerp_tint(stops[0], stops[1], t * 2.0)
        } else {
            lerp_tint(stops[1], stops[2], (t - 0.5) * 2.0)
        }
    };

    let radius = radius.min(rect.height() / 2.0);
    let mut rows: Vec<f32> = (0..=CORNER_STEPS)
        .map(|i| rect.top() + radius * i as f32 / CORNER_STEPS as f32)
        .collect();
    rows.push(rect.center().y);
    rows.push(rect.bottom());

    let mut mesh = egui::Mesh::default();
    for (i, &y) in rows.iter().enumerate() {
        let dy = y - rect.top();
        let inset = if dy < radius {
            radius - (radius * radius - (radius - dy) * (radius - dy)).sqrt()
        } else {
            0.0
        };
        let color = color_at(y);
        mesh.colored_vertex(pos2(rect.left() + inset, y), color);
        mesh.colored_vertex(pos2(rect.right() - inset, y), color);
        if i > 0 {
            let b = (2 * i) as u32;
            mesh.add_triangle(b - 2, b - 1, b);
            mesh.add_triangle(b - 1, b + 1, b);
        }
    }
    mesh
}

/// A circular glow fading to transparent, clipped to `clip`.
fn radial_glow(center: egui::Pos2, radius: f32, color: Color32, clip: Rect) -> Shape {
    const SEGMENTS: usize = 32;
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=SEGMENTS {
        let angle = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        let p = center + vec2(angle.cos(), angle.sin()) * radius;
        let p = pos2(p.x.clamp(clip.left(), clip.right()), p.y.clamp(clip.top(), clip.bottom()));
        mesh.colored_vertex(p, Color32::TRANSPARENT);
        if i > 0 {
            mesh.add_triangle(0, i as u32, i as u32 + 1);
        }
    }
    Shape::mesh(mesh)
}

fn dashed_rule(ui: &mut egui::Ui, width: f32, accent: Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(width, 1.0), Sense::hover());
    let color = Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), 0x30);
    ui.painter().extend(Shape::dashed_line(
        &[rect.left_center(), rect.right_center()],
        Stroke::new(1.0, color),
        4.0,
        4.0,
    ));
}

fn caption(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).font(FontId::monospace(8.0)).color(MUTED));
}

fn header(ui: &mut egui::Ui, view: &TagView, accent: Color32) {
    let width = view.config.tag_width;
    let (rect, _) = ui.allocate_exact_size(vec2(width, HEADER_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);

    let logo = pos2(rect.left() + PADDING + 10.0, rect.center().y);
    painter.circle_filled(logo, 10.0, accent);
    painter.text(logo, egui::Align2::CENTER_CENTER, "✈", FontId::proportional(11.0), Color32::WHITE);
    painter.text(
        pos2(logo.x + 16.0, logo.y),
        egui::Align2::LEFT_CENTER,
        "AIRLABEL",
        FontId::monospace(11.0),
        INK,
    );

    let serial = view.editor.serial_number();
    let short: String = serial.chars().take(6).collect();
    painter.text(
        pos2(rect.right() - PADDING, rect.center().y),
        egui::Align2::RIGHT_CENTER,
        format!("№ {}", short),
        FontId::monospace(9.0),
        MUTED,
    );

    dashed_rule(ui, width, accent);
}

fn body(ui: &mut egui::Ui, view: &TagView, accent: Color32, actions: &mut Vec<TagAction>) {
    let content_width = view.config.tag_width - STRIP_WIDTH - 2.0 * PADDING;

    let row = ui.horizontal_top(|ui| {
        ui.add_space(STRIP_WIDTH + PADDING);
        ui.vertical(|ui| {
            ui.set_width(content_width);
            ui.spacing_mut().item_spacing = vec2(0.0, 4.0);
            ui.add_space(PADDING);

            ui.horizontal_top(|ui| {
                photo_slot(ui, view, actions);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    caption(ui, "AIRLINE");
                    editable_text(ui, view, TextField::Airline, FontId::monospace(13.0), actions);
                    ui.add_space(8.0);
                    caption(ui, "DATE");
                    editable_text(ui, view, TextField::Date, FontId::monospace(11.0), actions);
                });
            });

            ui.add_space(10.0);
            dashed_rule(ui, content_width, accent);
            ui.add_space(8.0);

            caption(ui, "DESTINATION");
            editable_text(ui, view, TextField::City, FontId::proportional(38.0), actions);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                for purpose in Purpose::ALL {
                    let selected = view.editor.tag.purpose == purpose;
                    if chip(ui, purpose.label(), selected, accent).clicked() {
                        actions.push(TagAction::SelectPurpose(purpose));
                    }
                }
                ui.add_space(8.0);
                for trip_type in TripType::ALL {
                    let selected = view.editor.tag.trip_type == trip_type;
                    if chip(ui, trip_type.label(), selected, accent).clicked() {
                        actions.push(TagAction::SelectTripType(trip_type));
                    }
                }
            });

            ui.add_space(8.0);
            caption(ui, "AIRCRAFT");
            aircraft_selector(ui, view, actions);

            ui.add_space(10.0);
            dashed_rule(ui, content_width, accent);
            ui.add_space(8.0);

            caption(ui, "PASSENGER");
            editable_text(ui, view, TextField::Passenger, FontId::monospace(13.0), actions);
            ui.add_space(PADDING);
        });
    });

    let body_rect = row.response.rect;
    let strip = Rect::from_min_size(body_rect.min, vec2(STRIP_WIDTH, body_rect.height()));
    country_strip(ui, view, strip, accent, actions);
}

/// Vertical country code on an accent-colored strip.
fn country_strip(
    ui: &mut egui::Ui,
    view: &TagView,
    strip: Rect,
    accent: Color32,
    actions: &mut Vec<TagAction>,
) {
    ui.painter().rect_filled(strip, 0.0, accent);

    if view.editor.editing() == Some(TextField::CountryCode) {
        let field_rect = Rect::from_center_size(strip.center(), vec2(STRIP_WIDTH - 8.0, 24.0));
        ui.put(field_rect, |ui: &mut egui::Ui| {
            text_editor(ui, view, TextField::CountryCode, FontId::monospace(14.0), actions)
        });
        return;
    }

    let code = view.editor.tag.field(TextField::CountryCode);
    let step = 22.0;
    let top = strip.center().y - step * (code.chars().count() as f32 - 1.0) / 2.0;
    for (i, letter) in code.chars().enumerate() {
        ui.painter().text(
            pos2(strip.center().x, top + step * i as f32),
            egui::Align2::CENTER_CENTER,
            letter,
            FontId::monospace(20.0),
            Color32::WHITE,
        );
    }

    let response = ui
        .interact(strip, ui.id().with("country_code"), Sense::click())
        .on_hover_cursor(egui::CursorIcon::Text);
    if response.double_clicked() {
        actions.push(TagAction::BeginEdit(TextField::CountryCode));
    }
}

/// Show a field as a label, or as a text editor while it is being edited.
fn editable_text(
    ui: &mut egui::Ui,
    view: &TagView,
    field: TextField,
    font: FontId,
    actions: &mut Vec<TagAction>,
) {
    if view.editor.editing() == Some(field) {
        text_editor(ui, view, field, font, actions);
        return;
    }

    let text = egui::RichText::new(view.editor.tag.field(field)).font(font).color(INK);
    let response = ui
        .add(egui::Label::new(text).sense(Sense::click()))
        .on_hover_text("Double-click to edit")
        .on_hover_cursor(egui::CursorIcon::Text);
    if response.double_clicked() {
        actions.push(TagAction::BeginEdit(field));
    }
}

fn text_editor(
    ui: &mut egui::Ui,
    view: &TagView,
    field: TextField,
    font: FontId,
    actions: &mut Vec<TagAction>,
) -> egui::Response {
    let mut buffer = view.editor.tag.field(field).to_string();
    let editor = if field.is_multiline() {
        egui::TextEdit::multiline(&mut buffer).desired_rows(2)
    } else {
        egui::TextEdit::singleline(&mut buffer)
    };
    let response = ui.add(
        editor
            .font(font)
            .text_color(INK)
            .frame(false)
            .desired_width(ui.available_width()),
    );

    if view.focus_editor {
        response.request_focus();
    }
    if response.changed() {
        actions.push(TagAction::Edit(field, buffer));
    }
    // Enter confirms single-line fields by surrendering focus
    if response.lost_focus() {
        actions.push(TagAction::EndEdit);
    }
    response
}

fn chip(ui: &mut egui::Ui, label: &str, selected: bool, accent: Color32) -> egui::Response {
    let text = egui::RichText::new(label).font(FontId::monospace(9.0));
    let button = if selected {
        egui::Button::new(text.color(Color32::WHITE)).fill(accent)
    } else {
        egui::Button::new(text.color(MUTED))
            .fill(Color32::TRANSPARENT)
            .stroke(Stroke::new(1.0, muted_alpha(0.3)))
    };
    ui.add(button.rounding(4.0))
}

fn aircraft_selector(ui: &mut egui::Ui, view: &TagView, actions: &mut Vec<TagAction>) {
    let aircraft = view.editor.tag.aircraft;
    let label = if view.exporting {
        aircraft.label().to_string()
    } else {
        format!("{} ⏷", aircraft.label())
    };
    let response = ui
        .add(
            egui::Label::new(egui::RichText::new(label).font(FontId::monospace(12.0)).color(INK))
                .sense(Sense::click()),
        )
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    if response.clicked() && !view.exporting {
        actions.push(TagAction::ToggleAircraftPicker);
    }

    if view.exporting || !view.editor.is_open(Picker::Aircraft) {
        return;
    }

    egui::Area::new(ui.id().with("aircraft_picker"))
        .order(egui::Order::Foreground)
        .fixed_pos(response.rect.left_bottom() + vec2(0.0, 4.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(160.0);
                for option in Aircraft::ALL {
                    let text = egui::RichText::new(option.label()).font(FontId::monospace(11.0));
                    if ui.selectable_label(option == aircraft, text).clicked() {
                        actions.push(TagAction::SelectAircraft(option));
                    }
                }
            });
        });
}

fn photo_slot(ui: &mut egui::Ui, view: &TagView, actions: &mut Vec<TagAction>) {
    let (rect, response) = ui.allocate_exact_size(PHOTO_SIZE, Sense::click());
    let painter = ui.painter_at(rect);

    if let Some(texture) = view.photo {
        painter.image(
            texture.id(),
            rect,
            cover_uv(texture.size_vec2(), rect.size()),
            Color32::WHITE,
        );
        if !view.exporting {
            let close = Rect::from_center_size(rect.right_top() + vec2(-12.0, 12.0), vec2(20.0, 20.0));
            painter.circle_filled(close.center(), 10.0, Color32::from_black_alpha(150));
            painter.text(
                close.center(),
                egui::Align2::CENTER_CENTER,
                "✕",
                FontId::proportional(11.0),
                Color32::WHITE,
            );
            let close_response = ui
                .interact(close, ui.id().with("remove_photo"), Sense::click())
                .on_hover_text("Remove photo");
            if close_response.clicked() {
                actions.push(TagAction::RemovePhoto);
            }
        }
        return;
    }

    painter.rect_filled(rect, 8.0, muted_alpha(0.05));
    if view.exporting {
        return;
    }

    let r = rect.shrink(0.5);
    painter.extend(Shape::dashed_line(
        &[r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom(), r.left_top()],
        Stroke::new(1.0, muted_alpha(0.3)),
        4.0,
        3.0,
    ));
    let label = if view.loading_photo { "LOADING…" } else { "+ ADD PHOTO" };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        FontId::monospace(9.0),
        MUTED,
    );
    if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
        actions.push(TagAction::PickPhoto);
    }
}

/// UV rectangle that crops an image to fill a frame without distortion.
fn cover_uv(image: egui::Vec2, frame: egui::Vec2) -> Rect {
    let image_aspect = image.x / image.y;
    let frame_aspect = frame.x / frame.y;
    if image_aspect > frame_aspect {
        let w = frame_aspect / image_aspect;
        Rect::from_min_max(pos2((1.0 - w) / 2.0, 0.0), pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = image_aspect / frame_aspect;
        Rect::from_min_max(pos2(0.0, (1.0 - h) / 2.0), pos2(1.0, (1.0 + h) / 2.0))
    }
}

fn footer(ui: &mut egui::Ui, view: &TagView, accent: Color32) {
    let width = view.config.tag_width;
    let (rect, _) = ui.allocate_exact_size(vec2(width, BARCODE_HEIGHT + 28.0), Sense::hover());
    let painter = ui.painter_at(rect);

    let barcode = Rect::from_min_size(
        rect.min + vec2(PADDING, 0.0),
        vec2(width - 2.0 * PADDING, BARCODE_HEIGHT),
    );
    painter.rect_filled(barcode, 4.0, muted_alpha(0.06));
    for (x, w) in barcode_bars(barcode.width()) {
        let bar = Rect::from_min_size(
            pos2(barcode.left() + x, barcode.top() + 6.0),
            vec2(w, BARCODE_HEIGHT - 12.0),
        );
        painter.rect_filled(bar, 0.0, INK);
    }

    let text_y = barcode.bottom() + 14.0;
    painter.text(
        pos2(barcode.left(), text_y),
        egui::Align2::LEFT_CENTER,
        view.editor.serial_number(),
        FontId::monospace(9.0),
        MUTED,
    );
    painter.text(
        pos2(barcode.right(), text_y),
        egui::Align2::RIGHT_CENTER,
        "PRIORITY",
        FontId::monospace(9.0),
        accent,
    );
}

/// Bar offsets and widths: a 20pt pattern of 2, 1, 3 and 1 wide bars.
fn barcode_bars(width: f32) -> Vec<(f32, f32)> {
    const PATTERN: [(f32, f32); 4] = [(0.0, 2.0), (5.0, 1.0), (10.0, 3.0), (15.0, 1.0)];
    let mut bars = Vec::new();
    let mut period = 0.0;
    while period < width {
        for (x, w) in PATTERN {
            let start = period + x;
            if start < width {
                bars.push((start, w.min(width - start)));
            }
        }
        period += 20.0;
    }
    bars
}

/// Row of notches cut out of the bottom edge.
fn perforations(ui: &mut egui::Ui) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(width, NOTCH_SIZE.y), Sense::hover());
    let inner = rect.shrink2(vec2(4.0, 0.0));
    let gap = (inner.width() - NOTCH_COUNT as f32 * NOTCH_SIZE.x) / (NOTCH_COUNT - 1) as f32;
    let rounding = egui::Rounding { nw: 0.0, ne: 0.0, sw: NOTCH_SIZE.x / 2.0, se: NOTCH_SIZE.x / 2.0 };
    for i in 0..NOTCH_COUNT {
        let x = inner.left() + i as f32 * (NOTCH_SIZE.x + gap);
        let notch = Rect::from_min_size(pos2(x, rect.bottom() - NOTCH_SIZE.y / 2.0), NOTCH_SIZE);
        ui.painter().rect_filled(notch, rounding, PAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::palette::BackgroundTheme;

    #[test]
    fn test_cover_uv_crops_wide_image() {
        let uv = cover_uv(vec2(400.0, 100.0), vec2(100.0, 100.0));
        assert!((uv.width() - 0.25).abs() < 1e-6);
        assert_eq!(uv.height(), 1.0);
        assert!((uv.center().x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cover_uv_crops_tall_image() {
        let uv = cover_uv(vec2(100.0, 200.0), vec2(100.0, 100.0));
        assert_eq!(uv.width(), 1.0);
        assert!((uv.height() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_barcode_repeats_every_twenty_points() {
        let bars = barcode_bars(40.0);
        assert_eq!(bars.len(), 8);
        assert_eq!(bars[4], (20.0, 2.0));
        // Trailing bars are clipped to the width
        let bars = barcode_bars(11.0);
        assert_eq!(bars.last(), Some(&(10.0, 1.0)));
    }

    #[test]
    fn test_gradient_mesh_rounds_top_corners() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(340.0, 500.0));
        let mesh = gradient_mesh(rect, BackgroundTheme::Cream.gradient(), 12.0);

        // Two vertices per row: corner rows, middle and bottom
        assert_eq!(mesh.vertices.len(), 2 * (CORNER_STEPS + 3));
        assert_eq!(mesh.vertices[0].pos, pos2(12.0, 0.0));
        let bottom_left = mesh.vertices[mesh.vertices.len() - 2].pos;
        assert_eq!(bottom_left, pos2(0.0, 500.0));
    }
}
