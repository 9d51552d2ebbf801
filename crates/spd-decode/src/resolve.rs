//! Status-byte and device-type resolution.
//!
//! Both header bytes have a closed set of legal codes. Anything outside the
//! set is a hard error, never a default: a corrupted or foreign window must
//! not come out looking like a valid DDR4 image.

use std::fmt;

use spd_layout::codes::{device_type, revision, status};

use crate::error::{LengthField, Result, SpdError};

/// SPD bytes total (status bits 6..4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalBytes {
    /// Code `000`
    Unspecified,
    /// Code `001`
    Bytes256,
    /// Code `010`
    Bytes512,
}

impl TotalBytes {
    /// Resolve the 3-bit sub-field
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            status::TOTAL_UNSPECIFIED => Some(Self::Unspecified),
            status::TOTAL_256 => Some(Self::Bytes256),
            status::TOTAL_512 => Some(Self::Bytes512),
            _ => None,
        }
    }

    /// Byte count; 0 when unspecified
    pub const fn count(self) -> u16 {
        match self {
            Self::Unspecified => 0,
            Self::Bytes256 => 256,
            Self::Bytes512 => 512,
        }
    }
}

/// SPD bytes used (status bits 3..0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsedBytes {
    /// Code `0000`
    Unspecified,
    /// Code `0001`
    Bytes128,
    /// Code `0010`
    Bytes256,
    /// Code `0011`
    Bytes384,
    /// Code `0100`
    Bytes512,
}

impl UsedBytes {
    /// Resolve the 4-bit sub-field
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            status::USED_UNSPECIFIED => Some(Self::Unspecified),
            status::USED_128 => Some(Self::Bytes128),
            status::USED_256 => Some(Self::Bytes256),
            status::USED_384 => Some(Self::Bytes384),
            status::USED_512 => Some(Self::Bytes512),
            _ => None,
        }
    }

    /// Byte count; 0 when unspecified
    pub const fn count(self) -> u16 {
        match self {
            Self::Unspecified => 0,
            Self::Bytes128 => 128,
            Self::Bytes256 => 256,
            Self::Bytes384 => 384,
            Self::Bytes512 => 512,
        }
    }
}

/// Decoded status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpdSize {
    /// EEPROM capacity
    pub total: TotalBytes,
    /// Bytes the module programs
    pub used: UsedBytes,
}

impl SpdSize {
    /// True when neither sub-field carries a size.
    ///
    /// Legal, but unusual on a real module.
    pub fn is_unspecified(&self) -> bool {
        self.total == TotalBytes::Unspecified && self.used == UsedBytes::Unspecified
    }
}

/// Resolve the status byte of the window at `offset`.
///
/// Bit 7 is reserved and ignored.
///
/// # Errors
///
/// Returns [`SpdError::InvalidLengthCode`] if either sub-field holds a code
/// outside its legal set.
pub fn resolve_status(offset: u64, byte: u8) -> Result<SpdSize> {
    let total_code = status::total_code(byte);
    let total = TotalBytes::from_code(total_code).ok_or_else(|| {
        tracing::debug!("Bad bytes-total code {total_code:#05b} at 0x{offset:08X}");
        SpdError::invalid_length_code(offset, byte, LengthField::BytesTotal, total_code)
    })?;

    let used_code = status::used_code(byte);
    let used = UsedBytes::from_code(used_code).ok_or_else(|| {
        tracing::debug!("Bad bytes-used code {used_code:#06b} at 0x{offset:08X}");
        SpdError::invalid_length_code(offset, byte, LengthField::BytesUsed, used_code)
    })?;

    let size = SpdSize { total, used };
    if size.is_unspecified() {
        tracing::warn!("SPD at 0x{offset:08X} declares no size (status byte 0x{byte:02X})");
    }
    Ok(size)
}

/// SPD encoding revision, kept as raw nibbles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpdRevision {
    /// Encoding level
    pub major: u8,
    /// Additions level
    pub minor: u8,
}

impl SpdRevision {
    /// Split the revision byte
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            major: revision::major(byte),
            minor: revision::minor(byte),
        }
    }

    /// Reassemble the revision byte
    pub const fn to_byte(self) -> u8 {
        (self.major << 4) | self.minor
    }
}

impl fmt::Display for SpdRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}.{:X}", self.major, self.minor)
    }
}

/// DRAM device types sharing the DDR4 SPD layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RamType {
    /// DDR4 SDRAM (0x0C)
    Ddr4Sdram,
    /// LPDDR4 SDRAM (0x10)
    Lpddr4,
    /// LPDDR4X SDRAM (0x11)
    Lpddr4x,
}

impl RamType {
    /// Key byte for this type
    pub const fn code(self) -> u8 {
        match self {
            Self::Ddr4Sdram => device_type::DDR4_SDRAM,
            Self::Lpddr4 => device_type::LPDDR4_SDRAM,
            Self::Lpddr4x => device_type::LPDDR4X_SDRAM,
        }
    }

    /// Short display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ddr4Sdram => "SD-DDR4",
            Self::Lpddr4 => "LPDDR4",
            Self::Lpddr4x => "LPDDR4X",
        }
    }
}

impl fmt::Display for RamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the DRAM device type of the window at `offset`.
///
/// # Errors
///
/// - [`SpdError::WrongGenerationType`] for a DDR3 key byte
/// - [`SpdError::UnsupportedDeviceType`] for anything else outside the DDR4 family
pub fn resolve_device_type(offset: u64, code: u8) -> Result<RamType> {
    match code {
        device_type::DDR4_SDRAM => Ok(RamType::Ddr4Sdram),
        device_type::LPDDR4_SDRAM => Ok(RamType::Lpddr4),
        device_type::LPDDR4X_SDRAM => Ok(RamType::Lpddr4x),
        device_type::DDR3_SDRAM => {
            tracing::debug!("DDR3 SPD at 0x{offset:08X}");
            Err(SpdError::WrongGenerationType { offset, code })
        }
        other => {
            tracing::debug!("Unknown device type 0x{other:02X} at 0x{offset:08X}");
            Err(SpdError::UnsupportedDeviceType {
                offset,
                code: other,
            })
        }
    }
}
