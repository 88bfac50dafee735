use thiserror::Error;

use crate::image_pipeline::dpx::ComponentType;

#[derive(Error, Debug)]
pub enum DpxError {
    #[error("Invalid format: not a DPX file (magic 0x{magic:08X})")]
    NotDpx { magic: u32 },

    #[error("DPX header truncated: field at offset {offset} past end of {len}-byte buffer")]
    HeaderTruncated { offset: usize, len: usize },

    #[error("Unknown image element description code: {0}")]
    UnknownDescriptionCode(u8),

    #[error("Unsupported pixel type: {bit_size}bit {component_type}-{packing}")]
    UnsupportedFormat {
        bit_size: u8,
        component_type: ComponentType,
        packing: u16,
    },

    #[error("Failed to read image data at ({x},{y}).{c}")]
    PixelRead { x: u32, y: u32, c: u8 },

    #[error("Image data truncated: expected {expected} bytes, {available} available")]
    DataTruncated { expected: u64, available: u64 },

    #[error("Decode cancelled at row {row}")]
    Cancelled { row: u32 },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Failed to read input file: {0}")]
    BufferRead(String),

    #[error("Failed to write output file: {0}")]
    OutputWrite(String),

    #[error("Failed to encode TIFF image: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DpxError>;
