//! DPX header parsing.
//!
//! Only the handful of fixed-offset fields needed to locate and unpack the
//! first image element are read. The generic file header starts at offset 0,
//! the image information header at offset 768, and the image element records
//! follow it at 72-byte strides.

use tracing::debug;

use crate::image_pipeline::common::error::{DpxError, Result};
use crate::image_pipeline::dpx::bytes::{ByteView, Endianness};
use crate::image_pipeline::dpx::layout::{self, ComponentType};
use crate::image_pipeline::dpx::pixel::UnpackRule;

/// DPX magic number as read big-endian from a big-endian file: "SDPX"
pub const MAGIC_BE: u32 = 0x53445058;
/// DPX magic number as read big-endian from a little-endian file: "XPDS"
pub const MAGIC_LE: u32 = 0x58504453;

const PIXEL_OFFSET_FIELD: usize = 4;
const IMAGE_INFO_OFFSET: usize = 768;
const WIDTH_FIELD: usize = IMAGE_INFO_OFFSET + 4;
const HEIGHT_FIELD: usize = IMAGE_INFO_OFFSET + 8;
const IMAGE_ELEMENT_SIZE: usize = 72;

const DESCRIPTOR_FIELD: usize = 20;
const BIT_SIZE_FIELD: usize = 23;
const PACKING_FIELD: usize = 24;

const fn element_offset(element: usize) -> usize {
    IMAGE_INFO_OFFSET + 12 + element * IMAGE_ELEMENT_SIZE
}

/// Header fields of a DPX file, resolved against the description table.
///
/// Only [`ImageMetadata::parse`] builds one, so the component count and type
/// always agree with the description code.
///
/// ```compile_fail
/// use dpx_raster_rs::image_pipeline::ImageMetadata;
///
/// fn widen(meta: &mut ImageMetadata) {
///     meta.num_components = 4;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    endianness: Endianness,
    pixel_data_offset: u32,
    width: u32,
    height: u32,
    description_code: u8,
    bit_size: u8,
    packing: u16,
    num_components: u8,
    component_type: ComponentType,
}

impl ImageMetadata {
    /// Parses the header of a complete DPX file held in memory.
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let magic = ByteView::new(buffer, Endianness::Big)
            .u32_at(0)
            .ok_or(DpxError::HeaderTruncated {
                offset: 0,
                len: buffer.len(),
            })?;

        let endianness = match magic {
            MAGIC_BE => Endianness::Big,
            MAGIC_LE => Endianness::Little,
            _ => return Err(DpxError::NotDpx { magic }),
        };

        let view = ByteView::new(buffer, endianness);
        let truncated = |offset: usize| DpxError::HeaderTruncated {
            offset,
            len: buffer.len(),
        };
        let u8_field = |offset: usize| view.u8_at(offset as u64).ok_or_else(|| truncated(offset));
        let u16_field = |offset: usize| view.u16_at(offset as u64).ok_or_else(|| truncated(offset));
        let u32_field = |offset: usize| view.u32_at(offset as u64).ok_or_else(|| truncated(offset));

        let pixel_data_offset = u32_field(PIXEL_OFFSET_FIELD)?;
        let width = u32_field(WIDTH_FIELD)?;
        let height = u32_field(HEIGHT_FIELD)?;

        let element = element_offset(0);
        let description_code = u8_field(element + DESCRIPTOR_FIELD)?;
        let bit_size = u8_field(element + BIT_SIZE_FIELD)?;
        let packing = u16_field(element + PACKING_FIELD)?;

        let layout = layout::element_layout(description_code)?;

        debug!(
            ?endianness,
            width,
            height,
            description_code,
            bit_size,
            packing,
            pixel_data_offset,
            "Parsed DPX header"
        );

        Ok(Self {
            endianness,
            pixel_data_offset,
            width,
            height,
            description_code,
            bit_size,
            packing,
            num_components: layout.num_components,
            component_type: layout.component_type,
        })
    }

    /// Byte order detected from the magic number.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn little_endian(&self) -> bool {
        self.endianness.is_little()
    }

    /// Offset of the first pixel sample.
    pub fn pixel_data_offset(&self) -> u32 {
        self.pixel_data_offset
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Description code of image element 0.
    pub fn description_code(&self) -> u8 {
        self.description_code
    }

    /// Bits per component of image element 0.
    pub fn bit_size(&self) -> u8 {
        self.bit_size
    }

    /// Packing flag of image element 0. Not used to select an unpacking rule.
    pub fn packing(&self) -> u16 {
        self.packing
    }

    pub fn num_components(&self) -> u8 {
        self.num_components
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Number of pixel data bytes the header implies.
    pub fn expected_data_len(&self) -> u64 {
        (self.width as u64)
            .saturating_mul(self.height as u64)
            .saturating_mul(self.num_components as u64)
            .saturating_mul(self.bit_size as u64)
            / 8
    }

    /// Number of pixel data bytes a full decode reads, as laid out by the
    /// unpacking rule for this bit size. Unlike [`expected_data_len`] this
    /// accounts for 10-bit word packing and 16-bit containers.
    ///
    /// [`expected_data_len`]: ImageMetadata::expected_data_len
    pub fn required_data_len(&self) -> Result<u64> {
        let pixels = (self.width as u64).saturating_mul(self.height as u64);
        Ok(UnpackRule::select(self)?.required_len(pixels, self.num_components as u64))
    }

    /// Fails if a buffer of `buffer_len` bytes cannot hold the pixel data a
    /// decode reads. Decoding itself never calls this; without it a short
    /// file fails at the first sample that is missing.
    pub fn check_data_length(&self, buffer_len: usize) -> Result<()> {
        let expected = self.required_data_len()?;
        let available = (buffer_len as u64).saturating_sub(self.pixel_data_offset as u64);
        if expected > available {
            return Err(DpxError::DataTruncated { expected, available });
        }
        Ok(())
    }
}

/// Parses the header of a DPX file held in memory.
pub fn parse_header(buffer: &[u8]) -> Result<ImageMetadata> {
    ImageMetadata::parse(buffer)
}

/// Returns true if the buffer starts with either DPX magic number.
pub fn is_dpx(header: &[u8]) -> bool {
    matches!(
        ByteView::new(header, Endianness::Big).u32_at(0),
        Some(MAGIC_BE | MAGIC_LE)
    )
}
