//! TIFF writing module
//!
//! This module provides the raster sink: RGBA8 TIFF output with various compression options.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::RasterWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ConversionConfig, ConversionConfigBuilder};
