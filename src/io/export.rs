// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tag image export.
//!
//! An export runs in three steps spread over several frames: close any
//! overlay and wait a short settle delay, request a screenshot of the
//! viewport, then crop the tag out of it, upscale and write a PNG. Only one
//! export can be in flight; requests made meanwhile are dropped.

use crate::config::EditorConfig;
use crate::models::editor::EditorState;
use crate::util::raster::{mask_rounded_top_corners, resample};
use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use std::path::Path;
use std::time::{Duration, Instant};

/// Where the export pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Settling { until: Instant },
    Capturing { since: Instant },
}

/// What the caller should do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStep {
    /// Nothing to do yet.
    Wait,
    /// Request a screenshot now.
    Capture,
    /// The screenshot never arrived; the export was abandoned.
    TimedOut,
}

/// In-flight guard and timing for exports.
pub struct ExportJob {
    phase: ExportPhase,
    settle_delay: Duration,
    capture_timeout: Duration,
}

impl ExportJob {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            phase: ExportPhase::Idle,
            settle_delay: config.export_settle_delay,
            capture_timeout: config.export_capture_timeout,
        }
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase != ExportPhase::Idle
    }

    /// Start an export. Returns false, and changes nothing, if one is
    /// already in flight.
    pub fn request(&mut self, now: Instant) -> bool {
        if self.is_in_flight() {
            log::debug!("Export already in flight, ignoring request");
            return false;
        }
        self.phase = ExportPhase::Settling {
            until: now + self.settle_delay,
        };
        log::info!("Export requested");
        true
    }

    /// Advance timers.
    pub fn poll(&mut self, now: Instant) -> ExportStep {
        match self.phase {
            ExportPhase::Settling { until } if now >= until => {
                self.phase = ExportPhase::Capturing { since: now };
                ExportStep::Capture
            }
            ExportPhase::Capturing { since } if now.duration_since(since) > self.capture_timeout => {
                self.phase = ExportPhase::Idle;
                ExportStep::TimedOut
            }
            _ => ExportStep::Wait,
        }
    }

    /// Start an export for `editor`, closing any overlay so it stays out of
    /// the capture. Returns false, and touches nothing, if one is already in
    /// flight.
    pub fn begin(&mut self, editor: &mut EditorState, now: Instant) -> bool {
        if !self.request(now) {
            return false;
        }
        editor.close_overlay();
        true
    }

    /// Time left before the next step is due, for scheduling repaints.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            ExportPhase::Idle => None,
            ExportPhase::Settling { until } => Some(until.saturating_duration_since(now)),
            ExportPhase::Capturing { since } => {
                Some((since + self.capture_timeout).saturating_duration_since(now))
            }
        }
    }

    /// Clear the in-flight flag, whether the export succeeded or not.
    pub fn finish(&mut self) {
        self.phase = ExportPhase::Idle;
    }
}

/// `airlabel-<city-with-dashes>-<unix-ms>.png`
pub fn export_filename(city: &str, timestamp_ms: i64) -> String {
    format!("airlabel-{}-{}.png", city.replace('\n', "-"), timestamp_ms)
}

pub fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Geometry of the captured area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSpec {
    /// Tag rectangle in logical points.
    pub rect: egui::Rect,
    /// Area actually visible to the user (not scrolled away or under a
    /// panel), in logical points.
    pub visible: egui::Rect,
    /// Screenshot pixels per logical point.
    pub pixels_per_point: f32,
    /// Output pixels per logical point.
    pub pixel_ratio: f32,
    /// Top corner radius in logical points.
    pub corner_radius: f32,
}

/// Cut the tag out of a viewport screenshot and render it at the export
/// pixel ratio with transparent rounded top corners.
///
/// Fails unless the whole tag is on screen; a partial capture would be
/// stretched or carry pixels from whatever covers the tag.
pub fn compose_capture(screenshot: &egui::ColorImage, spec: &CaptureSpec) -> Result<RgbaImage> {
    let [shot_w, shot_h] = screenshot.size;
    let ppp = spec.pixels_per_point;

    if !spec.visible.expand(0.5).contains_rect(spec.rect) {
        return Err(anyhow!(
            "Tag area {:?} is not fully visible in {:?}",
            spec.rect,
            spec.visible
        ));
    }

    let left = (spec.rect.min.x * ppp).round();
    let top = (spec.rect.min.y * ppp).round();
    let right = (spec.rect.max.x * ppp).round();
    let bottom = (spec.rect.max.y * ppp).round();
    // One pixel of rounding slack at the far edges
    if left < 0.0 || top < 0.0 || right > shot_w as f32 + 1.0 || bottom > shot_h as f32 + 1.0 {
        return Err(anyhow!(
            "Tag area {:?} is outside the {}x{} screenshot",
            spec.rect,
            shot_w,
            shot_h
        ));
    }
    let (min_x, min_y) = (left as usize, top as usize);
    let max_x = (right as usize).min(shot_w);
    let max_y = (bottom as usize).min(shot_h);
    if min_x >= max_x || min_y >= max_y {
        return Err(anyhow!("Tag area {:?} is empty", spec.rect));
    }

    let (crop_w, crop_h) = ((max_x - min_x) as u32, (max_y - min_y) as u32);
    let mut raw = Vec::with_capacity(crop_w as usize * crop_h as usize * 4);
    for y in min_y..max_y {
        let row = &screenshot.pixels[y * shot_w + min_x..y * shot_w + max_x];
        for pixel in row {
            raw.extend_from_slice(&pixel.to_srgba_unmultiplied());
        }
    }
    let crop = RgbaImage::from_raw(crop_w, crop_h, raw)
        .context("Screenshot crop has an unexpected size")?;

    let out_w = (spec.rect.width() * spec.pixel_ratio).round().max(1.0) as u32;
    let out_h = (spec.rect.height() * spec.pixel_ratio).round().max(1.0) as u32;
    let mut output = resample(&crop, out_w, out_h);
    mask_rounded_top_corners(&mut output, spec.corner_radius * spec.pixel_ratio);
    Ok(output)
}

/// Zoom factor to render at while capturing, so the screenshot carries
/// close to `pixel_ratio` real pixels per point.
///
/// The zoom only grows as far as the tag still fits in the visible area,
/// and never drops below `current_zoom`.
pub fn capture_zoom(
    current_zoom: f32,
    native_pixels_per_point: f32,
    pixel_ratio: f32,
    tag_size: egui::Vec2,
    visible_size: egui::Vec2,
) -> f32 {
    let wanted = pixel_ratio / (native_pixels_per_point * current_zoom);
    let fits = (visible_size.x / tag_size.x).min(visible_size.y / tag_size.y);
    let factor = wanted.min(fits);
    if factor.is_finite() && factor > 1.0 {
        current_zoom * factor
    } else {
        current_zoom
    }
}

/// Write the image as PNG.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> ExportJob {
        ExportJob::new(&EditorConfig::default())
    }

    #[test]
    fn test_filename_replaces_newlines() {
        assert_eq!(
            export_filename("NEW\nYORK", 1_760_000_000_123),
            "airlabel-NEW-YORK-1760000000123.png"
        );
        assert_eq!(export_filename("TOKYO", 42), "airlabel-TOKYO-42.png");
    }

    #[test]
    fn test_filename_is_unique_across_exports() {
        let first = export_filename("TOKYO", unix_millis());
        std::thread::sleep(Duration::from_millis(2));
        let second = export_filename("TOKYO", unix_millis());
        assert_ne!(first, second);

        let digits = first
            .strip_prefix("airlabel-TOKYO-")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap();
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_reentrant_request_is_ignored() {
        let mut job = job();
        let t0 = Instant::now();
        assert!(job.request(t0));
        let phase = job.phase();

        assert!(!job.request(t0 + Duration::from_millis(10)));
        assert_eq!(job.phase(), phase);
    }

    #[test]
    fn test_single_capture_per_export() {
        let mut job = job();
        let t0 = Instant::now();
        job.request(t0);

        assert_eq!(job.poll(t0 + Duration::from_millis(100)), ExportStep::Wait);
        assert_eq!(job.poll(t0 + Duration::from_millis(150)), ExportStep::Capture);
        // A second request while capturing does not schedule another capture
        assert!(!job.request(t0 + Duration::from_millis(160)));
        assert_eq!(job.poll(t0 + Duration::from_millis(200)), ExportStep::Wait);

        job.finish();
        assert!(!job.is_in_flight());
        assert!(job.request(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn test_capture_timeout_clears_flag() {
        let mut job = job();
        let t0 = Instant::now();
        job.request(t0);
        let t1 = t0 + Duration::from_millis(150);
        assert_eq!(job.poll(t1), ExportStep::Capture);

        assert_eq!(job.poll(t1 + Duration::from_secs(3)), ExportStep::TimedOut);
        assert!(!job.is_in_flight());
    }

    #[test]
    fn test_compose_capture_crops_and_upscales() {
        let mut shot = egui::ColorImage::new([40, 40], egui::Color32::BLACK);
        // Paint the 10x10 tag area at (10,10)..(20,20) logical with ppp = 1
        for y in 10..20 {
            for x in 10..20 {
                shot.pixels[y * 40 + x] = egui::Color32::from_rgb(0xea, 0x58, 0x0c);
            }
        }
        let spec = CaptureSpec {
            rect: egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(10.0, 10.0)),
            visible: egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(40.0, 40.0)),
            pixels_per_point: 1.0,
            pixel_ratio: 3.0,
            corner_radius: 2.0,
        };

        let out = compose_capture(&shot, &spec).unwrap();
        assert_eq!(out.dimensions(), (30, 30));
        let center = out.get_pixel(15, 15).0;
        for (got, want) in center.iter().zip([0xea, 0x58, 0x0c, 0xff]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", center);
        }
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert!(out.get_pixel(0, 29).0[3] >= 0xfe);
    }

    #[test]
    fn test_compose_capture_outside_screenshot_fails() {
        let shot = egui::ColorImage::new([10, 10], egui::Color32::WHITE);
        let spec = CaptureSpec {
            rect: egui::Rect::from_min_size(egui::pos2(50.0, 50.0), egui::vec2(10.0, 10.0)),
            visible: egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(100.0, 100.0)),
            pixels_per_point: 2.0,
            pixel_ratio: 3.0,
            corner_radius: 12.0,
        };
        assert!(compose_capture(&shot, &spec).is_err());
    }

    #[test]
    fn test_partly_offscreen_tag_is_rejected() {
        let shot = egui::ColorImage::new([40, 20], egui::Color32::from_rgb(0xea, 0x58, 0x0c));
        let tag = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(10.0, 40.0));
        let spec = CaptureSpec {
            rect: tag,
            // Only the top half of the tag is on screen
            visible: egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(40.0, 20.0)),
            pixels_per_point: 1.0,
            pixel_ratio: 3.0,
            corner_radius: 2.0,
        };
        assert!(compose_capture(&shot, &spec).is_err());

        // Same rect, but the caller claims it is visible: the screenshot bounds still catch it
        let spec = CaptureSpec {
            visible: tag,
            ..spec
        };
        assert!(compose_capture(&shot, &spec).is_err());
    }

    #[test]
    fn test_tag_under_a_panel_is_rejected() {
        let shot = egui::ColorImage::new([40, 40], egui::Color32::WHITE);
        let spec = CaptureSpec {
            rect: egui::Rect::from_min_size(egui::pos2(10.0, 5.0), egui::vec2(10.0, 10.0)),
            // A header panel covers y < 8
            visible: egui::Rect::from_min_max(egui::pos2(0.0, 8.0), egui::pos2(40.0, 40.0)),
            pixels_per_point: 1.0,
            pixel_ratio: 3.0,
            corner_radius: 2.0,
        };
        assert!(compose_capture(&shot, &spec).is_err());
    }

    #[test]
    fn test_capture_zoom() {
        let tag = egui::vec2(340.0, 700.0);

        // Room to spare: zoom all the way to the export ratio
        let zoom = capture_zoom(1.0, 1.0, 3.0, tag, egui::vec2(1200.0, 2400.0));
        assert!((zoom - 3.0).abs() < 1e-4);

        // Limited by height
        let zoom = capture_zoom(1.0, 1.0, 3.0, tag, egui::vec2(1200.0, 1050.0));
        assert!((zoom - 1.5).abs() < 1e-4);

        // Already at or above the ratio, or no room: unchanged
        assert_eq!(capture_zoom(1.0, 3.0, 3.0, tag, egui::vec2(1200.0, 2400.0)), 1.0);
        assert_eq!(capture_zoom(1.0, 1.0, 3.0, tag, egui::vec2(300.0, 600.0)), 1.0);
    }

    #[test]
    fn test_begin_closes_overlay_only_once() {
        use crate::models::editor::Picker;
        use crate::models::tag::{TagContent, TextField};

        let config = EditorConfig::default();
        let mut editor =
            EditorState::with_parts(&config, TagContent::with_date("OCT 19, 2026".into()), "0".repeat(10));
        let mut job = ExportJob::new(&config);
        let t0 = Instant::now();

        editor.toggle_picker(Picker::Aircraft);
        assert!(job.begin(&mut editor, t0));
        assert!(!editor.is_open(Picker::Aircraft));
        assert!(job.is_in_flight());

        // A re-entrant request leaves whatever is open now alone
        editor.begin_edit(TextField::City);
        assert!(!job.begin(&mut editor, t0 + Duration::from_millis(10)));
        assert_eq!(editor.editing(), Some(TextField::City));
    }

    #[test]
    fn test_tokyo_scenario() {
        use crate::models::annotation::Point;
        use crate::models::palette::AccentColor;
        use crate::models::sticker::StickerSymbol;
        use crate::models::tag::{TagContent, TextField};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let config = EditorConfig::default();
        let mut editor =
            EditorState::with_parts(&config, TagContent::with_date("OCT 19, 2026".into()), "4815162342".into());
        assert_eq!(editor.tag.city, "NEW\nYORK");

        editor.begin_edit(TextField::City);
        editor.edit_field(TextField::City, "Tokyo");
        editor.end_edit();
        editor.select_accent(AccentColor::BurntOrange);
        let id = editor.add_sticker(StickerSymbol::Airplane, &mut StdRng::seed_from_u64(3));

        let start = editor.layer.stickers()[0].position;
        assert!(editor.layer.begin_drag(id, start));
        editor.layer.drag_to(Point::new(50.0, 50.0));
        editor.layer.pointer_up();
        assert_eq!(editor.layer.stickers()[0].position, Point::new(50.0, 50.0));
        assert_eq!(editor.accent.hex(), "#ea580c");

        let mut job = ExportJob::new(&config);
        assert!(job.begin(&mut editor, Instant::now()));
        let filename = export_filename(&editor.tag.city, unix_millis());
        let digits = filename
            .strip_prefix("airlabel-TOKYO-")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap();
        assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_write_png() {
        let dir = std::env::temp_dir().join(format!("airlabel-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(export_filename("TOKYO", 1));

        write_png(&RgbaImage::new(4, 4), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().width(), 4);

        std::fs::remove_dir_all(&dir).ok();
    }
}
