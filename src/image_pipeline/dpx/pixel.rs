//! Component unpacking.
//!
//! Each supported bit depth has its own addressing and extraction rule. The
//! rule is chosen once from the header via [`UnpackRule::select`] and then
//! applied per sample. All reductions to 8 bits truncate.

use crate::image_pipeline::common::error::{DpxError, Result};
use crate::image_pipeline::dpx::bytes::ByteView;
use crate::image_pipeline::dpx::header::ImageMetadata;

const DESCRIPTION_RGB: u8 = 50;
const DESCRIPTION_RGBA: u8 = 51;

/// Bit-depth specific unpacking rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackRule {
    /// One byte per component.
    Bit8,
    /// One 16-bit word per component, high byte kept.
    Bit16,
    /// Three 10-bit components per 32-bit word, one word per pixel.
    Bit10Rgb,
    /// Three 10-bit components per 32-bit word, running across pixel boundaries.
    Bit10Rgba,
    /// One 16-bit container per component, three components per pixel.
    Bit12,
}

impl UnpackRule {
    /// Picks the rule for the header's bit size and description code.
    pub fn select(metadata: &ImageMetadata) -> Result<Self> {
        match (metadata.bit_size(), metadata.description_code()) {
            (8, _) => Ok(UnpackRule::Bit8),
            (16, _) => Ok(UnpackRule::Bit16),
            (10, DESCRIPTION_RGB) => Ok(UnpackRule::Bit10Rgb),
            (10, DESCRIPTION_RGBA) => Ok(UnpackRule::Bit10Rgba),
            (12, _) => Ok(UnpackRule::Bit12),
            _ => Err(DpxError::UnsupportedFormat {
                bit_size: metadata.bit_size(),
                component_type: metadata.component_type(),
                packing: metadata.packing(),
            }),
        }
    }

    /// Pixel data bytes needed to decode `pixels` pixels of `num_components`
    /// declared components each, reading channels 0 to 2 of every pixel.
    ///
    /// This is the larger of the declared storage and the last byte the
    /// raster builder touches, so layouts with fewer than three components
    /// still account for the neighbouring samples they borrow.
    pub fn required_len(self, pixels: u64, num_components: u64) -> u64 {
        if pixels == 0 {
            return 0;
        }
        let components = |n: u64| {
            pixels
                .saturating_mul(n)
                .max((pixels - 1).saturating_mul(n).saturating_add(3))
        };
        match self {
            UnpackRule::Bit8 => components(num_components),
            UnpackRule::Bit16 => components(num_components).saturating_mul(2),
            UnpackRule::Bit10Rgb => pixels.saturating_mul(4),
            UnpackRule::Bit10Rgba => pixels.saturating_mul(4).div_ceil(3).saturating_mul(4),
            UnpackRule::Bit12 => pixels.saturating_mul(6),
        }
    }

    fn unpack(self, view: &ByteView<'_>, layout: &SampleLayout, index: u64, c: u8) -> Option<u8> {
        match self {
            UnpackRule::Bit8 => unpack_8bit(view, layout, index, c),
            UnpackRule::Bit16 => unpack_16bit(view, layout, index, c),
            UnpackRule::Bit10Rgb => unpack_10bit_rgb(view, layout, index, c),
            UnpackRule::Bit10Rgba => unpack_10bit_rgba(view, layout, index, c),
            UnpackRule::Bit12 => unpack_12bit(view, layout, index, c),
        }
    }
}

/// Header values the rules need for addressing.
#[derive(Debug, Clone, Copy)]
struct SampleLayout {
    offset: u64,
    num_components: u64,
}

fn unpack_8bit(view: &ByteView<'_>, layout: &SampleLayout, index: u64, c: u8) -> Option<u8> {
    let at = index
        .checked_mul(layout.num_components)?
        .checked_add(c as u64)?
        .checked_add(layout.offset)?;
    view.u8_at(at)
}

fn unpack_16bit(view: &ByteView<'_>, layout: &SampleLayout, index: u64, c: u8) -> Option<u8> {
    let at = index
        .checked_mul(layout.num_components)?
        .checked_add(c as u64)?
        .checked_mul(2)?
        .checked_add(layout.offset)?;
    view.u16_at(at).map(|word| (word >> 8) as u8)
}

fn unpack_10bit_rgb(view: &ByteView<'_>, layout: &SampleLayout, index: u64, c: u8) -> Option<u8> {
    let at = index.checked_mul(4)?.checked_add(layout.offset)?;
    let word = view.u32_at(at)?;
    // Shift is taken mod 32, so component indices past 2 wrap instead of trapping.
    let shift = (2 - c as i32) * 10 + 4;
    Some((word.wrapping_shr(shift as u32) & 0xFF) as u8)
}

fn unpack_10bit_rgba(view: &ByteView<'_>, layout: &SampleLayout, index: u64, c: u8) -> Option<u8> {
    let component = index.checked_mul(4)?.checked_add(c as u64)?;
    let word_index = component / 3;
    let shift = 24 - (component % 3) as u32 * 10;
    let at = word_index.checked_mul(4)?.checked_add(layout.offset)?;
    let word = view.u32_at(at)?;
    Some(((word >> shift) & 0xFF) as u8)
}

fn unpack_12bit(view: &ByteView<'_>, layout: &SampleLayout, index: u64, c: u8) -> Option<u8> {
    let at = index
        .checked_mul(3)?
        .checked_add(c as u64)?
        .checked_mul(2)?
        .checked_add(layout.offset)?;
    view.u16_at(at).map(|word| ((word >> 8) & 0xFF) as u8)
}

/// Reads 8-bit samples from one DPX buffer.
#[derive(Debug, Clone, Copy)]
pub struct PixelDecoder<'a> {
    view: ByteView<'a>,
    layout: SampleLayout,
    width: u32,
    height: u32,
    rule: UnpackRule,
}

impl<'a> PixelDecoder<'a> {
    pub fn new(buffer: &'a [u8], metadata: &ImageMetadata) -> Result<Self> {
        let rule = UnpackRule::select(metadata)?;
        Ok(Self {
            view: ByteView::new(buffer, metadata.endianness()),
            layout: SampleLayout {
                offset: metadata.pixel_data_offset() as u64,
                num_components: metadata.num_components() as u64,
            },
            width: metadata.width(),
            height: metadata.height(),
            rule,
        })
    }

    pub fn rule(&self) -> UnpackRule {
        self.rule
    }

    /// Channel `c` of pixel `(x, y)`, scaled to 8 bits.
    pub fn read_component(&self, x: u32, y: u32, c: u8) -> Result<u8> {
        if x >= self.width || y >= self.height {
            return Err(DpxError::PixelRead { x, y, c });
        }
        let index = y as u64 * self.width as u64 + x as u64;
        self.rule
            .unpack(&self.view, &self.layout, index, c)
            .ok_or(DpxError::PixelRead { x, y, c })
    }
}

/// Reads a single component without keeping a decoder around.
pub fn read_component(buffer: &[u8], metadata: &ImageMetadata, x: u32, y: u32, c: u8) -> Result<u8> {
    PixelDecoder::new(buffer, metadata)?.read_component(x, y, c)
}
