//! Part pictures: decoding, scaling and the placeholder fallback.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// A decoded picture scaled to the display size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pixels: RgbaImage,
    placeholder: bool,
}

impl ImageAsset {
    /// Fully transparent square, drawn as an empty panel
    pub fn placeholder(size: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0])),
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGBA at (x, y), `None` outside the picture
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }
}

/// Loads pictures from disk, caching them by path.
pub struct AssetLoader {
    size: u32,
    cache: HashMap<PathBuf, ImageAsset>,
}

impl AssetLoader {
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1),
            cache: HashMap::new(),
        }
    }

    /// Load `path`, or the placeholder if it can't be read or decoded
    pub fn load(&mut self, path: &Path) -> ImageAsset {
        if let Some(cached) = self.cache.get(path) {
            return cached.clone();
        }

        let asset = match decode(path, self.size) {
            Ok(pixels) => {
                tracing::debug!("Loaded {}", path.display());
                ImageAsset {
                    pixels,
                    placeholder: false,
                }
            }
            Err(e) => {
                tracing::warn!("Using placeholder for {}: {:#}", path.display(), e);
                ImageAsset::placeholder(self.size)
            }
        };

        self.cache.insert(path.to_path_buf(), asset.clone());
        asset
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.cache.len()
    }
}

fn decode(path: &Path, size: u32) -> Result<RgbaImage> {
    let img = image::open(path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(img.resize_exact(size, size, FilterType::Triangle).to_rgba8())
}
