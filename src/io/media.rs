// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo loading.
//!
//! This module decodes user-selected photos off the UI thread. Every load
//! reports back through one shared channel, so when several loads overlap
//! the one that finishes last is the one that sticks. Loads started before
//! `PhotoLoader::reset` belong to an older tag and are dropped on arrival.

use crate::models::tag::{Photo, TagContent};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Decode an image file into RGBA8 pixels.
pub fn load_photo(path: &Path) -> Result<Photo> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(Photo {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Result of one background decode.
pub struct PhotoLoadResult {
    pub path: PathBuf,
    pub photo: Result<Photo, String>,
}

impl PhotoLoadResult {
    /// Put a decoded photo on the tag, replacing the previous one. A failed
    /// decode leaves the tag as it was. Returns true if the photo changed.
    pub fn apply_to(self, tag: &mut TagContent) -> bool {
        match self.photo {
            Ok(photo) => {
                log::info!(
                    "Loaded photo {} ({}x{})",
                    self.path.display(),
                    photo.width,
                    photo.height
                );
                tag.set_photo(Some(photo));
                true
            }
            Err(e) => {
                log::warn!("Could not load photo {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

/// Runs photo decodes on background threads.
pub struct PhotoLoader {
    sender: Sender<(u64, PhotoLoadResult)>,
    receiver: Receiver<(u64, PhotoLoadResult)>,
    /// Bumped by `reset`; results carry the generation they were started in
    generation: u64,
    /// Outstanding decodes of the current generation
    pending: usize,
}

impl Default for PhotoLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            generation: 0,
            pending: 0,
        }
    }

    /// Start decoding `path`. Earlier loads keep running.
    pub fn load(&mut self, path: PathBuf) {
        let sender = self.sender.clone();
        let generation = self.generation;
        self.pending += 1;
        std::thread::spawn(move || {
            let photo = load_photo(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send((generation, PhotoLoadResult { path, photo }));
        });
    }

    /// Forget every outstanding decode. Their results are discarded when
    /// they arrive.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = 0;
    }

    /// Whether any decode is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Collect finished decodes of the current generation in completion
    /// order.
    pub fn poll(&mut self) -> Vec<PhotoLoadResult> {
        let mut finished = Vec::new();
        for (generation, result) in self.receiver.try_iter() {
            if generation == self.generation {
                finished.push(result);
            } else {
                log::debug!("Dropping stale photo {}", result.path.display());
            }
        }
        self.pending = self.pending.saturating_sub(finished.len());
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::time::{Duration, Instant};

    fn wait_for(loader: &mut PhotoLoader, count: usize) -> Vec<PhotoLoadResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(loader.poll());
            std::thread::sleep(Duration::from_millis(5));
        }
        results
    }

    #[test]
    fn test_load_photo_roundtrip_pixels() {
        let dir = std::env::temp_dir().join(format!("airlabel-media-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!((photo.width, photo.height), (3, 2));
        assert_eq!(&photo.pixels[..4], &[10, 20, 30, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_loader_reports_errors_for_missing_file() {
        let mut loader = PhotoLoader::new();
        loader.load(PathBuf::from("/definitely/not/here.png"));
        assert!(loader.is_loading());

        let results = wait_for(&mut loader, 1);
        assert_eq!(results.len(), 1);
        assert!(results[0].photo.is_err());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_overlapping_loads_all_deliver() {
        let dir = std::env::temp_dir().join(format!("airlabel-media-race-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let first = dir.join("first.png");
        let second = dir.join("second.png");
        RgbaImage::new(2, 2).save(&first).unwrap();
        RgbaImage::new(4, 4).save(&second).unwrap();

        let mut loader = PhotoLoader::new();
        loader.load(first);
        loader.load(second);

        // Nothing is cancelled; the caller applies results in arrival order
        let results = wait_for(&mut loader, 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.photo.is_ok()));
        assert!(!loader.is_loading());

        std::fs::remove_dir_all(&dir).ok();
    }

    fn photo(width: u32, height: u32) -> Photo {
        Photo {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    #[test]
    fn test_last_completion_wins() {
        let mut tag = TagContent::with_date("OCT 19, 2026".to_string());
        let arrivals = vec![
            PhotoLoadResult {
                path: PathBuf::from("first.png"),
                photo: Ok(photo(2, 2)),
            },
            PhotoLoadResult {
                path: PathBuf::from("second.png"),
                photo: Ok(photo(4, 4)),
            },
            PhotoLoadResult {
                path: PathBuf::from("broken.png"),
                photo: Err("not an image".to_string()),
            },
        ];

        let changed: Vec<bool> = arrivals.into_iter().map(|r| r.apply_to(&mut tag)).collect();
        assert_eq!(changed, vec![true, true, false]);
        // The failed decode kept the last good photo
        assert_eq!(tag.photo.as_ref().map(|p| p.width), Some(4));
    }

    #[test]
    fn test_reset_drops_earlier_loads() {
        let dir = std::env::temp_dir().join(format!("airlabel-media-reset-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("old.png");
        RgbaImage::new(2, 2).save(&path).unwrap();

        let mut loader = PhotoLoader::new();
        loader.load(path.clone());
        loader.reset();
        assert!(!loader.is_loading());

        // Once a new load for the fresh tag lands, the old one must not
        // have come through with it
        loader.load(PathBuf::from("/definitely/not/here.png"));
        let results = wait_for(&mut loader, 1);
        std::thread::sleep(Duration::from_millis(200));
        let late = loader.poll();

        assert_eq!(results.len(), 1);
        assert!(results[0].photo.is_err());
        assert!(late.is_empty());
        assert!(results.iter().chain(&late).all(|r| r.path != path));

        std::fs::remove_dir_all(&dir).ok();
    }
}
