//! Candidate byte windows handed to the decoder

/// A borrowed span of a source blob believed to hold one SPD image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawWindow<'a> {
    offset: u64,
    bytes: &'a [u8],
}

impl<'a> RawWindow<'a> {
    /// Wrap `bytes`, found at `offset` in the source blob.
    pub const fn new(offset: u64, bytes: &'a [u8]) -> Self {
        Self { offset, bytes }
    }

    /// Position of the window in the source blob
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Window contents, exactly as received
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Window length in bytes
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the window holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
