//! DPX decoding module
//!
//! Header parsing, description code tables, per-bit-depth component
//! unpacking and RGBA8 raster assembly for DPX files held in memory.

mod bytes;
mod header;
mod image;
mod layout;
mod pixel;
mod raster;
mod reader;
mod standard_reader;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use bytes::Endianness;
pub use header::{ImageMetadata, MAGIC_BE, MAGIC_LE, is_dpx, parse_header};
pub use image::{DpxImage, read_dpx_file};
pub use layout::{ComponentType, ElementLayout, component_type, element_layout, num_components};
pub use pixel::{PixelDecoder, UnpackRule, read_component};
pub use raster::{DecodedRaster, decode, decode_cancellable};
pub use reader::DpxImageReader;
pub use standard_reader::StandardDpxReader;
pub use types::DpxFrame;
