//! Field offset table for the DDR4 SPD image.
//!
//! Every field is an explicit `(offset, len)` constant. Nothing here is ever
//! derived from window contents; multi-byte integers are little-endian.
//!
//! ```text
//! 0x000  status          1   bytes used / bytes total
//! 0x001  revision        1   major.minor nibbles
//! 0x002  device type     1   0x0C DDR4, 0x10 LPDDR4, 0x11 LPDDR4X
//! 0x07E  crc             2   CRC-16/XMODEM over 0x000..0x07D
//! 0x140  module mfr id   2   JEP106, LE
//! 0x149  part number    20   ASCII, NUL or space padded
//! 0x15E  dram mfr id     2   JEP106, LE
//! ```

use core::ops::Range;

/// Size of a complete DDR4 SPD image.
pub const WINDOW_LEN: usize = 512;

/// Bytes covered by the base-configuration CRC (`0x000..0x07E`).
pub const CRC_COVERAGE: Range<usize> = 0x000..0x07E;

/// A fixed region of the SPD image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Name used in annotated dumps.
    pub name: &'static str,
    /// Byte offset from the start of the image.
    pub offset: usize,
    /// Width in bytes.
    pub len: usize,
}

impl Field {
    const fn new(name: &'static str, offset: usize, len: usize) -> Self {
        Self { name, offset, len }
    }

    /// One past the last byte of this field.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Byte range of this field within the image.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

// ── Base configuration (block 0, lower half) ─────────────────────────────────

/// Bytes used / bytes total status byte.
pub const SPD_STATUS: Field = Field::new("SPDStatus", 0x000, 1);
/// SPD encoding revision.
pub const SPD_REVISION: Field = Field::new("SPDRevision", 0x001, 1);
/// Key byte: DRAM device type.
pub const DRAM_DEVICE_TYPE: Field = Field::new("DRAMDeviceType", 0x002, 1);
/// Module type through the fine timing bytes, not interpreted here.
pub const CONFIG_REST: Field = Field::new("ConfigRest", 0x003, 0x07E - 0x003);
/// CRC-16 of bytes `0x000..0x07E`, little-endian.
pub const BASE_CRC: Field = Field::new("CRC", 0x07E, 2);

// ── Parameter blocks ─────────────────────────────────────────────────────────

/// Module-type specific parameters (UDIMM, RDIMM, LRDIMM...).
pub const MODULE_SPECIFIC: Field = Field::new("ModuleSpecificParameter", 0x080, 64);
/// Hybrid memory parameters.
pub const HYBRID_MEMORY: Field = Field::new("HybridMemoryParameter", 0x0C0, 64);
/// Extended function parameter block.
pub const EXTENDED_FUNCTION: Field = Field::new("ExtendedFunctionParameter", 0x100, 64);

// ── Manufacturing information ────────────────────────────────────────────────

/// Module manufacturer JEP106 ID, little-endian.
pub const MODULE_MANUFACTURER_ID: Field = Field::new("ModuleManufacturerID", 0x140, 2);
/// Module manufacturing location (vendor defined).
pub const MANUFACTURING_LOCATION: Field = Field::new("ManufacturingLocation", 0x142, 1);
/// Manufacturing date, BCD year then BCD week.
pub const MANUFACTURING_DATE: Field = Field::new("ManufacturingDate", 0x143, 2);
/// Module serial number, little-endian.
pub const SERIAL_NUMBER: Field = Field::new("SerialNumber", 0x145, 4);
/// Module part number, ASCII.
pub const PART_NUMBER: Field = Field::new("PartNumber", 0x149, 20);
/// Module revision code.
pub const REVISION_CODE: Field = Field::new("RevisionCode", 0x15D, 1);
/// DRAM manufacturer JEP106 ID, little-endian. This is the vendor we report.
pub const DRAM_MANUFACTURER_ID: Field = Field::new("DRAMManufacturerID", 0x15E, 2);
/// DRAM stepping.
pub const DRAM_STEPPING: Field = Field::new("DRAMStepping", 0x160, 1);
/// Manufacturer specific data.
pub const MANUFACTURER_DATA: Field = Field::new("ManufacturerData", 0x161, 0x17E - 0x161);
/// Reserved, must be zero.
pub const MANUFACTURING_RESERVED: Field = Field::new("Reserved", 0x17E, 2);

// ── End user ─────────────────────────────────────────────────────────────────

/// End user programmable block (XMP profiles live here on desktop DIMMs).
pub const END_USER: Field = Field::new("EndUserProgrammable", 0x180, 128);

/// Every field, in address order.
pub const ALL_FIELDS: &[Field] = &[
    SPD_STATUS,
    SPD_REVISION,
    DRAM_DEVICE_TYPE,
    CONFIG_REST,
    BASE_CRC,
    MODULE_SPECIFIC,
    HYBRID_MEMORY,
    EXTENDED_FUNCTION,
    MODULE_MANUFACTURER_ID,
    MANUFACTURING_LOCATION,
    MANUFACTURING_DATE,
    SERIAL_NUMBER,
    PART_NUMBER,
    REVISION_CODE,
    DRAM_MANUFACTURER_ID,
    DRAM_STEPPING,
    MANUFACTURER_DATA,
    MANUFACTURING_RESERVED,
    END_USER,
];

const fn all_fields_fit() -> bool {
    let mut i = 0;
    while i < ALL_FIELDS.len() {
        if ALL_FIELDS[i].end() > WINDOW_LEN {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(all_fields_fit(), "SPD field extends past the image");
const _: () = assert!(BASE_CRC.offset == CRC_COVERAGE.end);
