//! RGBA8 raster assembly.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::image_pipeline::common::error::{DpxError, Result};
use crate::image_pipeline::dpx::header::ImageMetadata;
use crate::image_pipeline::dpx::pixel::PixelDecoder;

/// Decoded image as interleaved RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedRaster {
    /// Wraps an existing RGBA8 buffer. Returns `None` if its length is not
    /// `width * height * 4`.
    #[cfg(test)]
    pub(crate) fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let len = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
        (pixels.len() == len).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved `[R, G, B, A, R, G, B, A, ...]`, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(at..at + 4)?.try_into().ok()
    }
}

/// Decodes every pixel of the image into an opaque RGBA8 raster.
///
/// Channels 0, 1 and 2 become R, G and B whatever the element layout; a fourth
/// component is never read and alpha is always 255. The first failing sample
/// aborts the whole decode.
pub fn decode(buffer: &[u8], metadata: &ImageMetadata) -> Result<DecodedRaster> {
    build_raster(buffer, metadata, None)
}

/// Same as [`decode`], but gives up between scanlines once `cancel` is set.
pub fn decode_cancellable(
    buffer: &[u8],
    metadata: &ImageMetadata,
    cancel: &AtomicBool,
) -> Result<DecodedRaster> {
    build_raster(buffer, metadata, Some(cancel))
}

fn build_raster(
    buffer: &[u8],
    metadata: &ImageMetadata,
    cancel: Option<&AtomicBool>,
) -> Result<DecodedRaster> {
    let decoder = PixelDecoder::new(buffer, metadata)?;
    let width = metadata.width();
    let height = metadata.height();

    debug!(width, height, rule = ?decoder.rule(), "Building RGBA raster");

    if width == 0 || height == 0 {
        return Ok(DecodedRaster {
            width,
            height,
            pixels: Vec::new(),
        });
    }

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(DpxError::InvalidDimensions(width, height))?;
    // Every pixel consumes at least one source byte, so a header with
    // oversized dimensions cannot force a larger allocation than this.
    let mut pixels = Vec::with_capacity(len.min(buffer.len().saturating_mul(4)));

    for y in 0..height {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(DpxError::Cancelled { row: y });
        }
        for x in 0..width {
            pixels.push(decoder.read_component(x, y, 0)?);
            pixels.push(decoder.read_component(x, y, 1)?);
            pixels.push(decoder.read_component(x, y, 2)?);
            pixels.push(255);
        }
    }

    Ok(DecodedRaster {
        width,
        height,
        pixels,
    })
}
