//! Image processing pipeline module
//!
//! This module provides a structured approach to DPX decoding and conversion,
//! with separate modules for DPX reading, TIFF writing, and conversion orchestration.

pub mod dpx;
pub mod tiff;
pub mod conversions;
pub mod common;

pub use common::{
    DpxError,
    Result,
};

pub use dpx::{
    ComponentType,
    DecodedRaster,
    DpxFrame,
    DpxImage,
    DpxImageReader,
    Endianness,
    ImageMetadata,
    StandardDpxReader,
    decode,
    parse_header,
    read_component,
    read_dpx_file,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    RasterWriter,
    StandardTiffWriter,
};

pub use conversions::{
    DpxToTiffPipeline,
};
