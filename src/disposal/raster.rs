//! Bitmaps placed on the certificate (brand logo, QR symbols).

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Gray,
    Rgb,
}

/// Uncompressed 8-bit raster, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub color: ColorSpace,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            color: ColorSpace::Gray,
            pixels,
        }
    }
}

#[derive(Debug, Error)]
pub enum BrandImageError {
    #[error("failed to read brand image: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to decode brand image: {0}")]
    Decode(#[source] image::ImageError),
}

/// Load the header logo as RGB.
pub fn load_brand_image(path: &Path) -> Result<RasterImage, BrandImageError> {
    let bytes = std::fs::read(path).map_err(BrandImageError::Read)?;
    decode_brand_image(&bytes)
}

pub fn decode_brand_image(bytes: &[u8]) -> Result<RasterImage, BrandImageError> {
    let rgb = image::load_from_memory(bytes)
        .map_err(BrandImageError::Decode)?
        .to_rgb8();
    let (width, height) = rgb.dimensions();

    Ok(RasterImage {
        width,
        height,
        color: ColorSpace::Rgb,
        pixels: rgb.into_raw(),
    })
}
