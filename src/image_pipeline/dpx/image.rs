//! Undecoded / decoded lifecycle of a single DPX image.

use std::path::Path;

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{DpxError, Result};
use crate::image_pipeline::dpx::header::ImageMetadata;
use crate::image_pipeline::dpx::raster::{self, DecodedRaster};

/// A DPX image either still holding its file bytes or already rasterised.
///
/// The transition is explicit: [`DpxImage::decode`] consumes the undecoded
/// state, and the source bytes are released along with it.
#[derive(Debug, Clone)]
pub enum DpxImage {
    Undecoded {
        buffer: Vec<u8>,
        metadata: ImageMetadata,
    },
    Decoded {
        raster: DecodedRaster,
        metadata: ImageMetadata,
    },
}

impl DpxImage {
    /// Parses the header and keeps the bytes for a later decode.
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self> {
        let metadata = ImageMetadata::parse(&buffer)?;
        Ok(DpxImage::Undecoded { buffer, metadata })
    }

    pub fn metadata(&self) -> &ImageMetadata {
        match self {
            DpxImage::Undecoded { metadata, .. } | DpxImage::Decoded { metadata, .. } => metadata,
        }
    }

    pub fn raster(&self) -> Option<&DecodedRaster> {
        match self {
            DpxImage::Decoded { raster, .. } => Some(raster),
            DpxImage::Undecoded { .. } => None,
        }
    }

    /// Decodes the pixel data. A decoded image is returned unchanged.
    pub fn decode(self) -> Result<Self> {
        match self {
            DpxImage::Undecoded { buffer, metadata } => {
                let raster = raster::decode(&buffer, &metadata)?;
                Ok(DpxImage::Decoded { raster, metadata })
            }
            decoded @ DpxImage::Decoded { .. } => Ok(decoded),
        }
    }
}

/// Reads a DPX file from disk and parses its header.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_dpx_file<P: AsRef<Path>>(path: P) -> Result<DpxImage> {
    let path = path.as_ref();
    let buffer = std::fs::read(path)
        .map_err(|e| DpxError::BufferRead(format!("{}: {}", path.display(), e)))?;
    debug!("Read {} bytes", buffer.len());
    DpxImage::from_bytes(buffer)
}
