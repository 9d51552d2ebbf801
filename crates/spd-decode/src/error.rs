//! Error types for SPD decoding

use std::fmt;
use thiserror::Error;

/// Result type alias for SPD decoding
pub type Result<T> = std::result::Result<T, SpdError>;

/// Which half of the status byte carried an illegal code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// Bits 6..4, SPD bytes total
    BytesTotal,
    /// Bits 3..0, SPD bytes used
    BytesUsed,
}

impl fmt::Display for LengthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BytesTotal => f.write_str("bytes-total"),
            Self::BytesUsed => f.write_str("bytes-used"),
        }
    }
}

/// Hard decode failures.
///
/// Each one ends decoding of a single window. `offset` is the window's
/// position in the source blob; the offending byte is always included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpdError {
    /// Window shorter than a full SPD image
    #[error("Truncated SPD window at 0x{offset:08X}: need {required} bytes, have {actual}")]
    TruncatedInput {
        /// Source offset of the window
        offset: u64,
        /// Bytes the layout needs
        required: usize,
        /// Bytes the window holds
        actual: usize,
    },

    /// Status byte sub-field outside the legal code set
    #[error(
        "Invalid {field} code 0b{code:b} in status byte 0x{status:02X} of SPD at 0x{offset:08X}"
    )]
    InvalidLengthCode {
        /// Source offset of the window
        offset: u64,
        /// The whole status byte
        status: u8,
        /// Sub-field that failed
        field: LengthField,
        /// Extracted sub-field value
        code: u8,
    },

    /// DDR3 key byte; recognised but a different layout
    #[error("SPD at 0x{offset:08X} is DDR3 (device type 0x{code:02X}), not DDR4")]
    WrongGenerationType {
        /// Source offset of the window
        offset: u64,
        /// Device type byte
        code: u8,
    },

    /// Device type byte not in the DDR4 family
    #[error("Unsupported DRAM device type 0x{code:02X} in SPD at 0x{offset:08X}")]
    UnsupportedDeviceType {
        /// Source offset of the window
        offset: u64,
        /// Device type byte
        code: u8,
    },
}

impl SpdError {
    /// Create a truncated input error
    pub fn truncated(offset: u64, required: usize, actual: usize) -> Self {
        Self::TruncatedInput {
            offset,
            required,
            actual,
        }
    }

    /// Create an invalid length code error
    pub fn invalid_length_code(offset: u64, status: u8, field: LengthField, code: u8) -> Self {
        Self::InvalidLengthCode {
            offset,
            status,
            field,
            code,
        }
    }

    /// Source offset of the window that failed
    pub fn offset(&self) -> u64 {
        match self {
            Self::TruncatedInput { offset, .. }
            | Self::InvalidLengthCode { offset, .. }
            | Self::WrongGenerationType { offset, .. }
            | Self::UnsupportedDeviceType { offset, .. } => *offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_offset_and_byte() {
        let err = SpdError::UnsupportedDeviceType {
            offset: 0x1000,
            code: 0x12,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x00001000"), "{msg}");
        assert!(msg.contains("0x12"), "{msg}");

        let err = SpdError::invalid_length_code(0x20, 0x75, LengthField::BytesTotal, 0b111);
        let msg = err.to_string();
        assert!(msg.contains("bytes-total"), "{msg}");
        assert!(msg.contains("0x75"), "{msg}");
        assert_eq!(err.offset(), 0x20);
    }
}
