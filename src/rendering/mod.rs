//! Rendering: paint commands, a small rasterizer and PNG output

pub mod layout;
pub mod paint;
pub mod raster;
pub mod text;

use sha2::{Digest, Sha256};

use crate::error::Result;
use paint::PaintCommand;
use text::Font;

/// An encoded icon ready to be written to disk.
#[derive(Debug, Clone)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl IconImage {
    /// Hex sha256 of the encoded PNG. Stable across runs for the same input.
    pub fn digest_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

/// Rasterize `commands` on a fresh `size` x `size` buffer and encode it.
pub fn render_png(size: u32, commands: &[PaintCommand], font: Option<&Font>) -> Result<IconImage> {
    let img = raster::rasterize(size, commands, font)?;
    let png_data = raster::encode_png(&img)?;
    Ok(IconImage {
        width: img.width(),
        height: img.height(),
        png_data,
    })
}
