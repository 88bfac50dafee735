//! Synthetic DPX buffers for unit tests.

use crate::image_pipeline::dpx::bytes::Endianness;

pub(crate) struct SyntheticDpx {
    endianness: Endianness,
    offset: u32,
    width: u32,
    height: u32,
    description: u8,
    bit_size: u8,
    packing: u16,
}

impl SyntheticDpx {
    pub(crate) fn new(width: u32, height: u32, description: u8, bit_size: u8) -> Self {
        Self {
            endianness: Endianness::Big,
            offset: 2048,
            width,
            height,
            description,
            bit_size,
            packing: 0,
        }
    }

    pub(crate) fn little_endian(mut self) -> Self {
        self.endianness = Endianness::Little;
        self
    }

    pub(crate) fn with_packing(mut self, packing: u16) -> Self {
        self.packing = packing;
        self
    }

    pub(crate) fn with_offset(mut self, offset: u32) -> Self {
        assert!(offset >= 808, "pixel data would overlap the header");
        self.offset = offset;
        self
    }

    fn put_u16(&self, buf: &mut [u8], at: usize, v: u16) {
        let bytes = match self.endianness {
            Endianness::Big => v.to_be_bytes(),
            Endianness::Little => v.to_le_bytes(),
        };
        buf[at..at + 2].copy_from_slice(&bytes);
    }

    fn put_u32(&self, buf: &mut [u8], at: usize, v: u32) {
        let bytes = match self.endianness {
            Endianness::Big => v.to_be_bytes(),
            Endianness::Little => v.to_le_bytes(),
        };
        buf[at..at + 4].copy_from_slice(&bytes);
    }

    /// Header bytes only, padded up to the pixel data offset.
    pub(crate) fn header(&self) -> Vec<u8> {
        let mut buf = vec![0u8; (self.offset as usize).max(808)];
        self.put_u32(&mut buf, 0, 0x53445058);
        self.put_u32(&mut buf, 4, self.offset);
        self.put_u32(&mut buf, 772, self.width);
        self.put_u32(&mut buf, 776, self.height);
        buf[780 + 20] = self.description;
        buf[780 + 23] = self.bit_size;
        self.put_u16(&mut buf, 780 + 24, self.packing);
        buf
    }

    pub(crate) fn with_bytes(&self, data: &[u8]) -> Vec<u8> {
        let mut buf = self.header();
        buf.truncate(self.offset as usize);
        buf.extend_from_slice(data);
        buf
    }

    pub(crate) fn with_words16(&self, words: &[u16]) -> Vec<u8> {
        let mut data = vec![0u8; words.len() * 2];
        for (i, &w) in words.iter().enumerate() {
            self.put_u16(&mut data, i * 2, w);
        }
        self.with_bytes(&data)
    }

    pub(crate) fn with_words32(&self, words: &[u32]) -> Vec<u8> {
        let mut data = vec![0u8; words.len() * 4];
        for (i, &w) in words.iter().enumerate() {
            self.put_u32(&mut data, i * 4, w);
        }
        self.with_bytes(&data)
    }
}
