//! Legal codes for the packed SPD header bytes.
//!
//! Each sub-field has a small closed set of values. Anything else means the
//! window is not a DDR4 SPD image, or is corrupted.

// ── Byte 0: bytes used / bytes total ─────────────────────────────────────────

/// Status byte (offset 0x000) bit layout.
///
/// ```text
///   7   6 5 4   3 2 1 0
/// ┌───┬───────┬─────────┐
/// │ r │ total │  used   │
/// └───┴───────┴─────────┘
/// ```
pub mod status {
    /// Shift of the bytes-total sub-field.
    pub const TOTAL_SHIFT: u8 = 4;
    /// Mask of the bytes-total sub-field after shifting.
    pub const TOTAL_MASK: u8 = 0b111;
    /// Mask of the bytes-used sub-field.
    pub const USED_MASK: u8 = 0b1111;

    /// Bytes total: undefined.
    pub const TOTAL_UNSPECIFIED: u8 = 0b000;
    /// Bytes total: 256.
    pub const TOTAL_256: u8 = 0b001;
    /// Bytes total: 512.
    pub const TOTAL_512: u8 = 0b010;

    /// Bytes used: undefined.
    pub const USED_UNSPECIFIED: u8 = 0b0000;
    /// Bytes used: 128.
    pub const USED_128: u8 = 0b0001;
    /// Bytes used: 256.
    pub const USED_256: u8 = 0b0010;
    /// Bytes used: 384.
    pub const USED_384: u8 = 0b0011;
    /// Bytes used: 512.
    pub const USED_512: u8 = 0b0100;

    /// Bytes-total sub-field of a status byte.
    #[must_use]
    pub const fn total_code(status: u8) -> u8 {
        (status >> TOTAL_SHIFT) & TOTAL_MASK
    }

    /// Bytes-used sub-field of a status byte.
    #[must_use]
    pub const fn used_code(status: u8) -> u8 {
        status & USED_MASK
    }
}

// ── Byte 1: SPD revision ─────────────────────────────────────────────────────

/// Revision byte (offset 0x001): encoding level in the high nibble,
/// additions level in the low nibble.
pub mod revision {
    /// Encoding level used by every DDR4 SPD revision published so far.
    pub const DDR4_MAJOR: u8 = 1;

    /// Encoding (major) level.
    #[must_use]
    pub const fn major(revision: u8) -> u8 {
        revision >> 4
    }

    /// Additions (minor) level.
    #[must_use]
    pub const fn minor(revision: u8) -> u8 {
        revision & 0x0F
    }
}

// ── Byte 2: DRAM device type ─────────────────────────────────────────────────

/// Key byte (offset 0x002) values relevant to DDR4 images.
pub mod device_type {
    /// DDR3 SDRAM. Recognised only to reject it with a precise error.
    pub const DDR3_SDRAM: u8 = 0x0B;
    /// DDR4 SDRAM.
    pub const DDR4_SDRAM: u8 = 0x0C;
    /// LPDDR4 SDRAM.
    pub const LPDDR4_SDRAM: u8 = 0x10;
    /// LPDDR4X SDRAM.
    pub const LPDDR4X_SDRAM: u8 = 0x11;

    /// Device types sharing the DDR4 SPD layout.
    pub const DDR4_FAMILY: &[u8] = &[DDR4_SDRAM, LPDDR4_SDRAM, LPDDR4X_SDRAM];
}
