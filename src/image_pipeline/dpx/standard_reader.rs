//! In-memory DPX reader.
//!
//! Parses the file header and unpacks the first image element into an opaque
//! RGBA8 raster. Supported element encodings are 8 and 16 bit for any layout,
//! 10 bit for RGB and RGBA, and 12 bit stored in 16-bit containers.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::dpx::header::ImageMetadata;
use crate::image_pipeline::dpx::raster;
use crate::image_pipeline::dpx::reader::DpxImageReader;
use crate::image_pipeline::dpx::types::DpxFrame;

/// DPX reader that decodes a complete file held in memory.
pub struct StandardDpxReader;

impl DpxImageReader for StandardDpxReader {
    /// Reads and decodes a DPX image from a byte array.
    ///
    /// # Arguments
    ///
    /// * `data` - Complete bytes of the DPX file
    ///
    /// # Returns
    ///
    /// * `Ok(DpxFrame)` - Header metadata and the RGBA8 raster
    /// * `Err(DpxError)` - Header or pixel data could not be decoded
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dpx_raster_rs::image_pipeline::{DpxImageReader, StandardDpxReader};
    ///
    /// let reader = StandardDpxReader;
    /// let bytes = std::fs::read("frame.0001.dpx").unwrap();
    /// let frame = reader.read_dpx(&bytes).unwrap();
    /// println!("{}x{}", frame.raster.width(), frame.raster.height());
    /// ```
    fn read_dpx(&self, data: &[u8]) -> Result<DpxFrame> {
        debug!("Decoding DPX image, {} bytes", data.len());

        let metadata = ImageMetadata::parse(data)?;
        let raster = raster::decode(data, &metadata)?;

        debug!(
            "Decoded image: {}x{} ({}bit {})",
            raster.width(),
            raster.height(),
            metadata.bit_size(),
            metadata.component_type()
        );

        Ok(DpxFrame { metadata, raster })
    }
}
