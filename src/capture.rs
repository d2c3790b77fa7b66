//! Offscreen surface capture to PNG

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::rasterizer::Framebuffer;

#[derive(Debug)]
pub enum CaptureError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    /// Pixel buffer length does not match width x height
    BadBuffer { width: usize, height: usize, len: usize },
}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        CaptureError::IoError(e)
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(e: image::ImageError) -> Self {
        CaptureError::ImageError(e)
    }
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::IoError(e) => write!(f, "IO error: {}", e),
            CaptureError::ImageError(e) => write!(f, "Image error: {}", e),
            CaptureError::BadBuffer { width, height, len } => {
                write!(f, "{} bytes is not a {}x{} RGBA buffer", len, width, height)
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// Encode the framebuffer at native resolution
pub fn encode_png(fb: &Framebuffer) -> Result<Vec<u8>, CaptureError> {
    let bad = || CaptureError::BadBuffer {
        width: fb.width,
        height: fb.height,
        len: fb.pixels.len(),
    };
    let width = u32::try_from(fb.width).map_err(|_| bad())?;
    let height = u32::try_from(fb.height).map_err(|_| bad())?;
    let img = RgbaImage::from_raw(width, height, fb.pixels.clone()).ok_or_else(bad)?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write a PNG, creating parent directories as needed
pub fn save_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), CaptureError> {
    let path = path.as_ref();
    let bytes = encode_png(fb)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// `captures/frame-<tick>.png` under `dir`
pub fn capture_path<P: AsRef<Path>>(dir: P, tick: u64) -> PathBuf {
    dir.as_ref().join(format!("frame-{:06}.png", tick))
}
