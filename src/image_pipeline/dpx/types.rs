//! DPX reader output types

use crate::image_pipeline::dpx::header::ImageMetadata;
use crate::image_pipeline::dpx::raster::DecodedRaster;

/// A fully decoded DPX frame
#[derive(Debug, Clone)]
pub struct DpxFrame {
    /// Header fields, kept for captions and diagnostics
    pub metadata: ImageMetadata,
    /// Opaque RGBA8 pixels
    pub raster: DecodedRaster,
}
