// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation layer state.
//!
//! The annotation layer is the bounded region of the tag where the user
//! draws free-hand and places stickers. Drawing is flattened into a raster
//! (`DrawingSurface`); stickers are kept as an ordered list where later
//! entries stack on top.
//!
//! All positions handled here are layer-local, in logical units.

use super::sticker::{StickerId, StickerPlacement, StickerSymbol};
use crate::config::EditorConfig;
use crate::util::geometry::{box_contains, clamp_box_to_layer};
use crate::util::raster::{Brush, DrawingSurface};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A 2D point in layer-local logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

/// Observable state of the drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    PenActive,
    EraserActive,
    Stroking,
}

/// A sticker being dragged and where it was grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    id: StickerId,
    /// Pointer position minus the sticker's top-left corner at grab time.
    grab_offset: Point,
}

pub struct AnnotationLayer {
    size: (f32, f32),
    sticker_size: f32,
    spawn_origin: (f32, f32),
    spawn_jitter: (f32, f32),
    pen: Brush,
    eraser: Brush,

    tool: Option<Tool>,
    /// Last point of the path being stroked.
    stroke: Option<Point>,
    /// Raster buffer; absent until the layer is mounted.
    surface: Option<DrawingSurface>,
    stickers: Vec<StickerPlacement>,
    drag: Option<Drag>,
    has_drawing: bool,
    next_sticker_id: u64,
}

impl AnnotationLayer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            size: config.layer_size,
            sticker_size: config.sticker_size,
            spawn_origin: config.sticker_spawn_origin,
            spawn_jitter: config.sticker_spawn_jitter,
            pen: Brush::Paint {
                color: config.pen_color,
                width: config.pen_width,
            },
            eraser: Brush::Erase {
                width: config.eraser_width,
            },
            tool: None,
            stroke: None,
            surface: None,
            stickers: Vec::new(),
            drag: None,
            has_drawing: false,
            next_sticker_id: 1,
        }
    }

    /// Allocate the drawing buffer at `scale` pixels per point.
    ///
    /// Does nothing if the layer is already mounted.
    pub fn mount(&mut self, scale: f32) {
        if self.surface.is_none() {
            let surface = DrawingSurface::new(self.size, scale);
            log::debug!(
                "Mounted drawing surface {}x{} (scale {})",
                surface.pixels().width(),
                surface.pixels().height(),
                scale
            );
            self.surface = Some(surface);
        }
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    pub fn sticker_size(&self) -> f32 {
        self.sticker_size
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn state(&self) -> DrawState {
        match (self.stroke, self.tool) {
            (Some(_), Some(_)) => DrawState::Stroking,
            (_, Some(Tool::Pen)) => DrawState::PenActive,
            (_, Some(Tool::Eraser)) => DrawState::EraserActive,
            (_, None) => DrawState::Idle,
        }
    }

    pub fn has_drawing(&self) -> bool {
        self.has_drawing
    }

    pub fn stickers(&self) -> &[StickerPlacement] {
        &self.stickers
    }

    pub fn dragged_sticker(&self) -> Option<StickerId> {
        self.drag.map(|d| d.id)
    }

    pub fn surface_mut(&mut self) -> Option<&mut DrawingSurface> {
        self.surface.as_mut()
    }

    /// Whether the empty-state guidance should be visible.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty() && !self.has_drawing
    }

    /// Toggle a tool: selecting the active tool deselects it.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = if self.tool == Some(tool) {
            None
        } else {
            Some(tool)
        };
        self.stroke = None;
        log::debug!("Tool changed to {:?}", self.tool);
    }

    /// Start a new path at `pos`. Returns false if no tool is selected or
    /// the layer is not mounted.
    pub fn pointer_down(&mut self, pos: Point) -> bool {
        if self.tool.is_none() || self.surface.is_none() {
            return false;
        }
        self.stroke = Some(pos);
        true
    }

    /// Extend the current path to `pos`, compositing the new segment.
    pub fn pointer_move(&mut self, pos: Point) {
        let (Some(last), Some(tool)) = (self.stroke, self.tool) else {
            return;
        };
        let brush = match tool {
            Tool::Pen => self.pen,
            Tool::Eraser => self.eraser,
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.stroke_segment(last, pos, brush);
        self.stroke = Some(pos);
        self.has_drawing = true;
    }

    /// End the current stroke and any sticker drag.
    ///
    /// Used for both pointer release and the pointer leaving the layer.
    pub fn pointer_up(&mut self) {
        self.stroke = None;
        if let Some(drag) = self.drag.take() {
            log::debug!("Stopped dragging {}", drag.id);
        }
    }

    /// Add a sticker at a jittered spot near the spawn origin.
    pub fn add_sticker<R: Rng>(&mut self, symbol: StickerSymbol, rng: &mut R) -> StickerId {
        let x = self.spawn_origin.0 + rng.gen::<f32>() * self.spawn_jitter.0;
        let y = self.spawn_origin.1 + rng.gen::<f32>() * self.spawn_jitter.1;
        let position = clamp_box_to_layer(Point::new(x, y), self.sticker_size, self.size);

        let id = StickerId(self.next_sticker_id);
        self.next_sticker_id += 1;
        self.stickers.push(StickerPlacement::new(id, symbol, position));
        log::info!("Added {} ({:?}), total: {}", id, symbol, self.stickers.len());
        id
    }

    /// Remove a sticker by id. Returns false if no such sticker exists.
    pub fn remove_sticker(&mut self, id: StickerId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != id);
        if self.drag.is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        let removed = self.stickers.len() != before;
        if removed {
            log::info!("Removed {}, total: {}", id, self.stickers.len());
        }
        removed
    }

    /// Topmost sticker whose box contains `pos`.
    pub fn sticker_at(&self, pos: Point) -> Option<StickerId> {
        self.stickers
            .iter()
            .rev()
            .find(|s| box_contains(s.position, self.sticker_size, pos))
            .map(|s| s.id)
    }

    /// Grab a sticker at `pointer`, keeping the grab point for later moves.
    pub fn begin_drag(&mut self, id: StickerId, pointer: Point) -> bool {
        let Some(sticker) = self.stickers.iter().find(|s| s.id == id) else {
            return false;
        };
        self.drag = Some(Drag {
            id,
            grab_offset: Point::new(pointer.x - sticker.position.x, pointer.y - sticker.position.y),
        });
        log::debug!("Started dragging {}", id);
        true
    }

    /// Move the dragged sticker so the grab point follows `pointer`.
    pub fn drag_to(&mut self, pointer: Point) {
        let Some(drag) = self.drag else {
            return;
        };
        let target = Point::new(pointer.x - drag.grab_offset.x, pointer.y - drag.grab_offset.y);
        let position = clamp_box_to_layer(target, self.sticker_size, self.size);
        if let Some(sticker) = self.stickers.iter_mut().find(|s| s.id == drag.id) {
            sticker.position = position;
        }
    }

    /// Wipe the drawing buffer and discard every sticker.
    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        self.stickers.clear();
        self.stroke = None;
        self.drag = None;
        self.has_drawing = false;
        log::info!("Cleared annotation layer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mounted_layer() -> AnnotationLayer {
        let mut layer = AnnotationLayer::new(&EditorConfig::default());
        layer.mount(2.0);
        layer
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_tool_toggle_and_states() {
        let mut layer = mounted_layer();
        assert_eq!(layer.state(), DrawState::Idle);

        layer.select_tool(Tool::Pen);
        assert_eq!(layer.state(), DrawState::PenActive);

        layer.select_tool(Tool::Eraser);
        assert_eq!(layer.state(), DrawState::EraserActive);

        layer.select_tool(Tool::Eraser);
        assert_eq!(layer.state(), DrawState::Idle);
        assert_eq!(layer.tool(), None);
    }

    #[test]
    fn test_stroke_lifecycle() {
        let mut layer = mounted_layer();
        assert!(!layer.pointer_down(Point::new(10.0, 10.0)));

        layer.select_tool(Tool::Pen);
        assert!(layer.pointer_down(Point::new(10.0, 10.0)));
        assert_eq!(layer.state(), DrawState::Stroking);
        assert!(!layer.has_drawing());

        layer.pointer_move(Point::new(40.0, 30.0));
        assert!(layer.has_drawing());
        assert!(!layer.surface_mut().unwrap().is_blank());

        layer.pointer_up();
        assert_eq!(layer.state(), DrawState::PenActive);
    }

    #[test]
    fn test_move_without_stroke_is_noop() {
        let mut layer = mounted_layer();
        layer.select_tool(Tool::Pen);
        layer.pointer_move(Point::new(40.0, 30.0));

        assert!(!layer.has_drawing());
        assert!(layer.surface_mut().unwrap().is_blank());
    }

    #[test]
    fn test_unmounted_layer_ignores_drawing() {
        let mut layer = AnnotationLayer::new(&EditorConfig::default());
        layer.select_tool(Tool::Pen);

        assert!(!layer.pointer_down(Point::new(10.0, 10.0)));
        layer.pointer_move(Point::new(20.0, 20.0));
        assert!(!layer.has_drawing());
        // Clearing an unmounted layer still resets stickers
        layer.add_sticker(StickerSymbol::Star, &mut rng());
        layer.clear();
        assert!(layer.stickers().is_empty());
    }

    #[test]
    fn test_has_drawing_survives_erasing_until_clear() {
        let mut layer = mounted_layer();
        layer.select_tool(Tool::Pen);
        layer.pointer_down(Point::new(10.0, 10.0));
        layer.pointer_move(Point::new(30.0, 10.0));
        layer.pointer_up();

        layer.select_tool(Tool::Eraser);
        layer.pointer_down(Point::new(0.0, 10.0));
        layer.pointer_move(Point::new(60.0, 10.0));
        layer.pointer_up();

        assert!(layer.surface_mut().unwrap().is_blank());
        assert!(layer.has_drawing());

        layer.clear();
        assert!(!layer.has_drawing());
    }

    #[test]
    fn test_new_stickers_spawn_inside_layer_with_unique_ids() {
        let mut layer = mounted_layer();
        let mut rng = rng();
        let ids: Vec<StickerId> = StickerSymbol::ALL
            .iter()
            .map(|s| layer.add_sticker(*s, &mut rng))
            .collect();

        for (i, a) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(a));
        }
        for sticker in layer.stickers() {
            assert!(sticker.position.x >= 0.0 && sticker.position.x <= 308.0 - 40.0);
            assert!(sticker.position.y >= 0.0 && sticker.position.y <= 112.0 - 40.0);
        }
    }

    #[test]
    fn test_drag_is_clamped_for_any_pointer() {
        let mut layer = mounted_layer();
        let id = layer.add_sticker(StickerSymbol::Airplane, &mut rng());
        let start = layer.stickers()[0].position;
        assert!(layer.begin_drag(id, Point::new(start.x + 5.0, start.y + 5.0)));

        for pointer in [
            Point::new(-1000.0, -1000.0),
            Point::new(5000.0, 5000.0),
            Point::new(-20.0, 90.0),
            Point::new(150.0, -4.0),
            Point::new(f32::MAX, f32::MIN),
        ] {
            layer.drag_to(pointer);
            let p = layer.stickers()[0].position;
            assert!((0.0..=268.0).contains(&p.x), "x out of range: {:?}", p);
            assert!((0.0..=72.0).contains(&p.y), "y out of range: {:?}", p);
        }
    }

    #[test]
    fn test_drag_preserves_grab_point() {
        let mut layer = mounted_layer();
        let id = layer.add_sticker(StickerSymbol::Airplane, &mut rng());
        let start = layer.stickers()[0].position;
        layer.begin_drag(id, start);
        layer.drag_to(Point::new(40.0, 38.0));
        layer.pointer_up();
        assert_eq!(layer.stickers()[0].position, Point::new(40.0, 38.0));

        layer.begin_drag(id, Point::new(50.0, 50.0));
        layer.drag_to(Point::new(60.0, 62.0));
        assert_eq!(layer.stickers()[0].position, Point::new(50.0, 50.0));

        layer.pointer_up();
        assert_eq!(layer.dragged_sticker(), None);
        layer.drag_to(Point::new(0.0, 0.0));
        assert_eq!(layer.stickers()[0].position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_only_one_sticker_dragged() {
        let mut layer = mounted_layer();
        let mut rng = rng();
        let a = layer.add_sticker(StickerSymbol::Globe, &mut rng);
        let b = layer.add_sticker(StickerSymbol::Ship, &mut rng);

        layer.begin_drag(a, Point::new(110.0, 40.0));
        layer.begin_drag(b, Point::new(110.0, 40.0));
        assert_eq!(layer.dragged_sticker(), Some(b));
    }

    #[test]
    fn test_remove_keeps_remaining_order_and_positions() {
        let mut layer = mounted_layer();
        let mut rng = rng();
        for symbol in &StickerSymbol::ALL[..5] {
            layer.add_sticker(*symbol, &mut rng);
        }
        let before: Vec<StickerPlacement> = layer.stickers().to_vec();
        let victim = before[2].id;

        assert!(layer.remove_sticker(victim));
        assert!(!layer.remove_sticker(victim));

        let expected: Vec<StickerPlacement> =
            before.into_iter().filter(|s| s.id != victim).collect();
        assert_eq!(layer.stickers(), expected.as_slice());
    }

    #[test]
    fn test_sticker_at_prefers_topmost() {
        let mut layer = mounted_layer();
        let mut rng = rng();
        let a = layer.add_sticker(StickerSymbol::Globe, &mut rng);
        let b = layer.add_sticker(StickerSymbol::Ship, &mut rng);
        layer.begin_drag(a, layer.stickers()[0].position);
        layer.drag_to(Point::new(0.0, 0.0));
        layer.pointer_up();
        layer.begin_drag(b, layer.stickers()[1].position);
        layer.drag_to(Point::new(10.0, 10.0));
        layer.pointer_up();

        assert_eq!(layer.sticker_at(Point::new(20.0, 20.0)), Some(b));
        assert_eq!(layer.sticker_at(Point::new(2.0, 2.0)), Some(a));
        assert_eq!(layer.sticker_at(Point::new(300.0, 100.0)), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut layer = mounted_layer();
        layer.add_sticker(StickerSymbol::Camera, &mut rng());
        layer.select_tool(Tool::Pen);
        layer.pointer_down(Point::new(5.0, 5.0));
        layer.pointer_move(Point::new(50.0, 50.0));

        layer.clear();
        let once = (layer.stickers().len(), layer.has_drawing(), layer.surface_mut().unwrap().is_blank());
        layer.clear();
        let twice = (layer.stickers().len(), layer.has_drawing(), layer.surface_mut().unwrap().is_blank());

        assert_eq!(once, (0, false, true));
        assert_eq!(once, twice);
        assert_eq!(layer.state(), DrawState::PenActive);
    }
}
