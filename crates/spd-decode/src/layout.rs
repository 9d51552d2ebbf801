//! Fixed-offset view over a DDR4 SPD image.
//!
//! [`SpdLayout`] checks the window length once and then hands out fields by
//! the constant offsets in [`spd_layout::fields`]. It never looks at field
//! values; that is the resolver's job.

use spd_layout::fields::{self, Field, CRC_COVERAGE, WINDOW_LEN};

use crate::error::{Result, SpdError};
use crate::window::RawWindow;

/// Read-only projection of a full 512-byte SPD image.
#[derive(Debug, Clone, Copy)]
pub struct SpdLayout<'a> {
    offset: u64,
    bytes: &'a [u8; WINDOW_LEN],
}

impl<'a> SpdLayout<'a> {
    /// Project `window` onto the DDR4 layout.
    ///
    /// Bytes past [`WINDOW_LEN`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SpdError::TruncatedInput`] if the window is shorter than
    /// [`WINDOW_LEN`].
    pub fn new(window: &RawWindow<'a>) -> Result<Self> {
        let bytes: &'a [u8; WINDOW_LEN] = window
            .bytes()
            .get(..WINDOW_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or_else(|| SpdError::truncated(window.offset(), WINDOW_LEN, window.len()))?;

        tracing::trace!("SPD layout at 0x{:08X}", window.offset());

        Ok(Self {
            offset: window.offset(),
            bytes,
        })
    }

    /// Source offset of the underlying window
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The full image
    pub fn as_bytes(&self) -> &'a [u8; WINDOW_LEN] {
        self.bytes
    }

    /// Raw bytes of one field
    pub fn field(&self, field: Field) -> &'a [u8] {
        &self.bytes[field.range()]
    }

    fn byte(&self, field: Field) -> u8 {
        self.bytes[field.offset]
    }

    fn u16_le(&self, field: Field) -> u16 {
        let b = self.field(field);
        u16::from_le_bytes([b[0], b[1]])
    }

    fn u32_le(&self, field: Field) -> u32 {
        let b = self.field(field);
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Byte 0: packed bytes-used / bytes-total
    pub fn status(&self) -> u8 {
        self.byte(fields::SPD_STATUS)
    }

    /// Byte 1: SPD revision
    pub fn revision(&self) -> u8 {
        self.byte(fields::SPD_REVISION)
    }

    /// Byte 2: DRAM device type
    pub fn device_type(&self) -> u8 {
        self.byte(fields::DRAM_DEVICE_TYPE)
    }

    /// Bytes covered by the base-configuration CRC
    pub fn crc_coverage(&self) -> &'a [u8] {
        &self.bytes[CRC_COVERAGE]
    }

    /// CRC stored at 0x07E
    pub fn stored_crc(&self) -> u16 {
        self.u16_le(fields::BASE_CRC)
    }

    /// Module manufacturer JEP106 ID
    pub fn module_manufacturer_id(&self) -> u16 {
        self.u16_le(fields::MODULE_MANUFACTURER_ID)
    }

    /// Module manufacturing location
    pub fn manufacturing_location(&self) -> u8 {
        self.byte(fields::MANUFACTURING_LOCATION)
    }

    /// Manufacturing date bytes, BCD `[year, week]`
    pub fn manufacturing_date(&self) -> [u8; 2] {
        let b = self.field(fields::MANUFACTURING_DATE);
        [b[0], b[1]]
    }

    /// Module serial number
    pub fn serial_number(&self) -> u32 {
        self.u32_le(fields::SERIAL_NUMBER)
    }

    /// Raw 20-byte part number field
    pub fn part_number(&self) -> &'a [u8] {
        self.field(fields::PART_NUMBER)
    }

    /// Module revision code
    pub fn revision_code(&self) -> u8 {
        self.byte(fields::REVISION_CODE)
    }

    /// DRAM manufacturer JEP106 ID
    pub fn dram_manufacturer_id(&self) -> u16 {
        self.u16_le(fields::DRAM_MANUFACTURER_ID)
    }

    /// DRAM stepping
    pub fn dram_stepping(&self) -> u8 {
        self.byte(fields::DRAM_STEPPING)
    }
}
