//! Bounds-checked reads over a DPX byte buffer.

/// Byte order of every multi-byte field in a DPX file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// Big-endian, magic "SDPX". Default for DPX.
    #[default]
    Big,
    /// Little-endian, magic "XPDS".
    Little,
}

impl Endianness {
    pub fn is_little(self) -> bool {
        self == Endianness::Little
    }
}

/// Read-only view of a buffer with a fixed byte order.
///
/// Offsets are `u64` so that addressing arithmetic done by callers cannot
/// wrap on 32-bit targets. Every accessor returns `None` instead of panicking
/// when the requested bytes fall outside the buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
    endianness: Endianness,
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8], endianness: Endianness) -> Self {
        Self { data, endianness }
    }

    fn bytes<const N: usize>(&self, offset: u64) -> Option<[u8; N]> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(N)?;
        self.data.get(start..end)?.try_into().ok()
    }

    pub fn u8_at(&self, offset: u64) -> Option<u8> {
        self.bytes::<1>(offset).map(|b| b[0])
    }

    pub fn u16_at(&self, offset: u64) -> Option<u16> {
        let b = self.bytes::<2>(offset)?;
        Some(match self.endianness {
            Endianness::Big => u16::from_be_bytes(b),
            Endianness::Little => u16::from_le_bytes(b),
        })
    }

    pub fn u32_at(&self, offset: u64) -> Option<u32> {
        let b = self.bytes::<4>(offset)?;
        Some(match self.endianness {
            Endianness::Big => u32::from_be_bytes(b),
            Endianness::Little => u32::from_le_bytes(b),
        })
    }
}
