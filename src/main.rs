// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Airlabel - Luggage Tag Designer
//!
//! A desktop editor for designing airline-style luggage tags: edit the
//! printed fields, pick colors, add a photo, draw and place stickers, then
//! export the finished tag as a high-resolution PNG.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use app::AirlabelApp;
use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 860.0])
            .with_min_inner_size([640.0, 600.0])
            .with_title("Airlabel - Luggage Tag Designer"),
        ..Default::default()
    };

    eframe::run_native(
        "Airlabel",
        options,
        Box::new(|_cc| Ok(Box::new(AirlabelApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
