// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! `AirlabelApp` owns the editor state, photo loader and export job, and
//! applies the actions reported by the UI components each frame.

use crate::config::EditorConfig;
use crate::io::export::{self, CaptureSpec, ExportJob, ExportPhase, ExportStep};
use crate::io::media::PhotoLoader;
use crate::io::serialization::{self, DesignSheet};
use crate::models::editor::{EditorState, Overlay, Picker};
use crate::ui::canvas::CanvasAction;
use crate::ui::tag_view::{self, TagAction, TagView};
use crate::ui::toolbar::{self, ToolbarAction};
use crate::ui::{landing, CHARCOAL, PAGE};
use std::path::PathBuf;
use std::time::Instant;

/// Which top-level view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Editor,
}

/// Main application state.
pub struct AirlabelApp {
    config: EditorConfig,

    screen: Screen,

    /// The tag being designed
    editor: EditorState,

    /// Background photo decoding
    photo_loader: PhotoLoader,

    /// Uploaded photo, rebuilt whenever the photo changes
    photo_texture: Option<egui::TextureHandle>,

    /// Uploaded drawing buffer, refreshed when the buffer is dirty
    drawing_texture: Option<egui::TextureHandle>,

    /// The drawing buffer has no ink, so the texture need not be drawn
    drawing_blank: bool,

    export: ExportJob,

    /// Where the tag was drawn last frame, for export capture
    tag_rect: Option<egui::Rect>,

    /// The part of the window the tag scroll area showed last frame
    tag_visible: Option<egui::Rect>,

    /// Zoom to return to once a capture zoomed in for export
    restore_zoom: Option<f32>,

    /// A text editor was just opened and should take keyboard focus
    focus_editor: bool,
}

impl Default for AirlabelApp {
    fn default() -> Self {
        Self::new()
    }
}

impl AirlabelApp {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            screen: Screen::Landing,
            editor: EditorState::new(&config),
            photo_loader: PhotoLoader::new(),
            photo_texture: None,
            drawing_texture: None,
            drawing_blank: true,
            export: ExportJob::new(&config),
            tag_rect: None,
            tag_visible: None,
            restore_zoom: None,
            focus_editor: false,
            config,
        }
    }

    /// Start over with a fresh tag and serial number.
    fn new_tag(&mut self) {
        self.editor = EditorState::new(&self.config);
        self.photo_loader.reset();
        self.photo_texture = None;
        self.drawing_texture = None;
        self.drawing_blank = true;
        log::info!("Started new tag {}", self.editor.serial_number());
    }

    fn pick_photo(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
            .pick_file()
        {
            log::info!("Loading photo {}", path.display());
            self.photo_loader.load(path);
        }
    }

    fn upload_photo(&mut self, ctx: &egui::Context) {
        self.photo_texture = self.editor.tag.photo.as_ref().map(|photo| {
            let size = [photo.width as usize, photo.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &photo.pixels);
            ctx.load_texture("tag_photo", color_image, egui::TextureOptions::LINEAR)
        });
    }

    fn poll_photos(&mut self, ctx: &egui::Context) {
        let mut changed = false;
        for result in self.photo_loader.poll() {
            changed |= result.apply_to(&mut self.editor.tag);
        }
        if changed {
            self.upload_photo(ctx);
        }
        if self.photo_loader.is_loading() {
            ctx.request_repaint();
        }
    }

    /// Upload the drawing buffer if it changed since the last frame.
    fn sync_drawing_texture(&mut self, ctx: &egui::Context) {
        let scale = self.config.buffer_scale.max(ctx.pixels_per_point());
        self.editor.layer.mount(scale);

        let Some(surface) = self.editor.layer.surface_mut() else {
            return;
        };
        if !surface.take_dirty() && self.drawing_texture.is_some() {
            return;
        }
        self.drawing_blank = surface.is_blank();
        let pixels = surface.pixels();
        let size = [pixels.width() as usize, pixels.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
        match self.drawing_texture {
            Some(ref mut texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.drawing_texture = Some(ctx.load_texture(
                    "drawing",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ))
            }
        }
    }

    fn apply_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::SelectTool(tool) => self.editor.layer.select_tool(tool),
            ToolbarAction::Clear => self.editor.layer.clear(),
            ToolbarAction::TogglePicker(picker) => self.editor.toggle_picker(picker),
            ToolbarAction::SelectAccent(accent) => self.editor.select_accent(accent),
            ToolbarAction::SelectBackground(background) => {
                self.editor.select_background(background)
            }
            ToolbarAction::AddSticker(symbol) => {
                self.editor.add_sticker(symbol, &mut rand::thread_rng());
            }
            ToolbarAction::None => {}
        }
    }

    fn apply_tag(&mut self, action: TagAction) {
        match action {
            TagAction::BeginEdit(field) => {
                self.editor.begin_edit(field);
                self.focus_editor = true;
            }
            TagAction::Edit(field, raw) => self.editor.edit_field(field, &raw),
            TagAction::EndEdit => self.editor.end_edit(),
            TagAction::SelectPurpose(purpose) => self.editor.select_purpose(purpose),
            TagAction::SelectTripType(trip_type) => self.editor.select_trip_type(trip_type),
            TagAction::ToggleAircraftPicker => self.editor.toggle_picker(Picker::Aircraft),
            TagAction::SelectAircraft(aircraft) => self.editor.select_aircraft(aircraft),
            TagAction::PickPhoto => self.pick_photo(),
            TagAction::RemovePhoto => {
                self.editor.tag.set_photo(None);
                self.photo_texture = None;
                log::info!("Removed photo");
            }
            TagAction::Canvas(action) => self.apply_canvas(action),
        }
    }

    fn apply_canvas(&mut self, action: CanvasAction) {
        let layer = &mut self.editor.layer;
        match action {
            CanvasAction::PointerDown(pos) => {
                layer.pointer_down(pos);
            }
            CanvasAction::PointerMove(pos) => layer.pointer_move(pos),
            CanvasAction::PointerUp => layer.pointer_up(),
            CanvasAction::GrabSticker(id, pos) => {
                layer.begin_drag(id, pos);
            }
            CanvasAction::DragSticker(pos) => layer.drag_to(pos),
            CanvasAction::RemoveSticker(id) => {
                layer.remove_sticker(id);
            }
        }
    }

    fn request_export(&mut self, ctx: &egui::Context) {
        if !self.export.begin(&mut self.editor, Instant::now()) {
            return;
        }

        // Render larger while capturing if the tag still fits on screen
        if let (Some(rect), Some(visible)) = (self.tag_rect, self.tag_visible) {
            let current = ctx.zoom_factor();
            let zoom = export::capture_zoom(
                current,
                ctx.native_pixels_per_point().unwrap_or(1.0),
                self.config.export_pixel_ratio,
                rect.size(),
                visible.size(),
            );
            if zoom > current {
                log::debug!("Capturing at zoom {:.2}", zoom);
                self.restore_zoom = Some(current);
                ctx.set_zoom_factor(zoom);
            }
        }
        ctx.request_repaint();
    }

    /// Clear the in-flight flag and undo any capture zoom.
    fn end_export(&mut self, ctx: &egui::Context) {
        self.export.finish();
        if let Some(zoom) = self.restore_zoom.take() {
            ctx.set_zoom_factor(zoom);
        }
    }

    /// Advance the export job and react to a delivered screenshot.
    fn drive_export(&mut self, ctx: &egui::Context) {
        if !self.export.is_in_flight() {
            return;
        }

        let screenshot = ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(image) = screenshot {
            self.finish_export(ctx, &image);
            return;
        }

        let now = Instant::now();
        match self.export.poll(now) {
            ExportStep::Capture => {
                log::debug!("Requesting screenshot");
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
            }
            ExportStep::TimedOut => {
                log::error!("Export failed: no screenshot was delivered");
                self.end_export(ctx);
            }
            ExportStep::Wait => {}
        }
        if let Some(delay) = self.export.next_deadline(now) {
            ctx.request_repaint_after(delay);
        }
    }

    fn finish_export(&mut self, ctx: &egui::Context, screenshot: &egui::ColorImage) {
        if let Err(e) = self.save_capture(ctx, screenshot) {
            log::error!("Export failed: {:#}", e);
        }
        self.end_export(ctx);
    }

    fn save_capture(&self, ctx: &egui::Context, screenshot: &egui::ColorImage) -> anyhow::Result<()> {
        let rect = self
            .tag_rect
            .ok_or_else(|| anyhow::anyhow!("The tag has not been laid out yet"))?;
        let visible = self
            .tag_visible
            .ok_or_else(|| anyhow::anyhow!("The tag has not been laid out yet"))?;
        let spec = CaptureSpec {
            rect,
            visible,
            pixels_per_point: ctx.pixels_per_point(),
            pixel_ratio: self.config.export_pixel_ratio,
            corner_radius: self.config.tag_corner_radius,
        };
        let image = export::compose_capture(screenshot, &spec)?;

        let filename = export::export_filename(&self.editor.tag.city, export::unix_millis());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(filename.as_str())
            .save_file()
        else {
            log::info!("Export cancelled");
            return Ok(());
        };

        export::write_png(&image, &path)?;
        log::info!(
            "Exported {}x{} tag to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }

    fn export_design_sheet(&self, path: PathBuf) {
        let sheet = DesignSheet::from_editor(&self.editor);
        match serialization::export_by_extension(&sheet, &path) {
            Ok(_) => log::info!("Exported design sheet to {}", path.display()),
            Err(e) => log::error!("Failed to export design sheet: {}", e),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Tag").clicked() {
                        self.new_tag();
                        self.screen = Screen::Editor;
                        ui.close_menu();
                    }
                    let editing = self.screen == Screen::Editor;
                    if ui.add_enabled(editing, egui::Button::new("Add Photo...")).clicked() {
                        self.pick_photo();
                        ui.close_menu();
                    }
                    ui.separator();
                    let can_export = editing && !self.export.is_in_flight();
                    if ui.add_enabled(can_export, egui::Button::new("Export PNG")).clicked() {
                        self.request_export(ctx);
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(editing, |ui| {
                        ui.menu_button("Export Design Sheet", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("airlabel.yaml")
                                    .save_file()
                                {
                                    self.export_design_sheet(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("airlabel.json")
                                    .save_file()
                                {
                                    self.export_design_sheet(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let editing = self.screen == Screen::Editor;
                    if ui.add_enabled(editing, egui::Button::new("Clear Drawing")).clicked() {
                        self.editor.layer.clear();
                        ui.close_menu();
                    }
                    let has_photo = self.editor.tag.photo.is_some();
                    if ui.add_enabled(has_photo, egui::Button::new("Remove Photo")).clicked() {
                        self.apply_tag(TagAction::RemovePhoto);
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn editor_screen(&mut self, ctx: &egui::Context) {
        let exporting = self.export.is_in_flight();

        egui::TopBottomPanel::top("editor_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // The tag must stay on screen until the capture lands
                if ui.add_enabled(!exporting, egui::Button::new("⬅ Back")).clicked() {
                    self.editor.close_overlay();
                    self.screen = Screen::Landing;
                }
                ui.separator();
                ui.label(egui::RichText::new("Tag Editor").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = match self.export.phase() {
                        ExportPhase::Idle => "⬇ Download",
                        ExportPhase::Settling { .. } => "Preparing…",
                        ExportPhase::Capturing { .. } => "Capturing…",
                    };
                    let button = egui::Button::new(egui::RichText::new(label).color(egui::Color32::WHITE))
                        .fill(CHARCOAL)
                        .rounding(6.0);
                    if ui.add_enabled(!exporting, button).clicked() {
                        self.request_export(ctx);
                    }
                    if exporting {
                        ui.spinner();
                    }
                });
            });
        });

        let toolbar_action = egui::SidePanel::left("toolbar")
            .resizable(false)
            .exact_width(64.0)
            .frame(egui::Frame::none().fill(PAGE).inner_margin(12.0))
            .show(ctx, |ui| toolbar::show(ui, &self.editor))
            .inner;
        self.apply_toolbar(toolbar_action);

        self.sync_drawing_texture(ctx);
        let focus_editor = std::mem::take(&mut self.focus_editor);
        let settling = matches!(self.export.phase(), ExportPhase::Settling { .. });

        let response = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PAGE))
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(32.0);
                            let view = TagView {
                                config: &self.config,
                                editor: &self.editor,
                                photo: self.photo_texture.as_ref(),
                                drawing: self
                                    .drawing_texture
                                    .as_ref()
                                    .filter(|_| !self.drawing_blank),
                                loading_photo: self.photo_loader.is_loading(),
                                exporting,
                                focus_editor,
                            };
                            let response = tag_view::show(ui, &view);
                            if settling {
                                ui.scroll_to_rect(response.rect, Some(egui::Align::Min));
                            }
                            ui.add_space(32.0);
                            (response, ui.clip_rect())
                        })
                        .inner
                    })
                    .inner
            })
            .inner;

        let (response, visible) = response;
        self.tag_rect = Some(response.rect);
        self.tag_visible = Some(visible);
        // The drawing texture is uploaded before these apply; show them next frame
        if !response.actions.is_empty() {
            ctx.request_repaint();
        }
        for action in response.actions {
            self.apply_tag(action);
        }
    }
}

impl eframe::App for AirlabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_photos(ctx);
        self.drive_export(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.editor.overlay() != Overlay::None {
            log::debug!("Closing {:?}", self.editor.overlay());
            self.editor.close_overlay();
        }

        self.menu_bar(ctx);

        match self.screen {
            Screen::Landing => {
                let start = egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(PAGE))
                    .show(ctx, landing::show)
                    .inner;
                if start {
                    log::info!("Opening editor for tag {}", self.editor.serial_number());
                    self.screen = Screen::Editor;
                }
            }
            Screen::Editor => self.editor_screen(ctx),
        }
    }
}
