//! Decoded SPD record and the decode pipeline

use spd_layout::Vendor;

use crate::checksum::{self, ChecksumCheck};
use crate::error::Result;
use crate::layout::SpdLayout;
use crate::resolve::{self, RamType, SpdRevision, SpdSize, TotalBytes, UsedBytes};
use crate::score::ValiditySignals;
use crate::vendor;
use crate::window::RawWindow;

/// Manufacturing block (0x140..0x17F), decoded but not validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManufacturingInfo {
    /// Module manufacturer, resolved from 0x140
    pub module_vendor: Vendor,
    /// Location code (vendor defined)
    pub location: u8,
    /// Raw BCD `[year, week]`
    pub date: [u8; 2],
    /// Serial number
    pub serial: u32,
    /// Module revision code
    pub revision_code: u8,
    /// DRAM stepping
    pub dram_stepping: u8,
}

impl ManufacturingInfo {
    /// Manufacturing year (2000-based) and week, if both bytes are valid BCD
    pub fn year_week(&self) -> Option<(u16, u8)> {
        let year = bcd(self.date[0])?;
        let week = bcd(self.date[1])?;
        Some((2000 + u16::from(year), week))
    }
}

fn bcd(byte: u8) -> Option<u8> {
    let (hi, lo) = (byte >> 4, byte & 0x0F);
    (hi < 10 && lo < 10).then_some(hi * 10 + lo)
}

/// A decoded, validated DDR4 SPD image
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSpd {
    offset: u64,
    size: SpdSize,
    revision: SpdRevision,
    ram_type: RamType,
    vendor: Vendor,
    module_part_number: String,
    checksum: ChecksumCheck,
    signals: ValiditySignals,
    manufacturing: ManufacturingInfo,
}

impl DecodedSpd {
    /// Source offset of the window
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// EEPROM capacity
    pub fn total_bytes(&self) -> TotalBytes {
        self.size.total
    }

    /// Programmed bytes
    pub fn used_bytes(&self) -> UsedBytes {
        self.size.used
    }

    /// True for the all-zero size encoding
    pub fn is_length_unspecified(&self) -> bool {
        self.size.is_unspecified()
    }

    /// SPD revision nibbles
    pub fn revision(&self) -> SpdRevision {
        self.revision
    }

    /// DRAM device type
    pub fn ram_type(&self) -> RamType {
        self.ram_type
    }

    /// DRAM manufacturer
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Part number with NUL padding stripped
    pub fn module_part_number(&self) -> &str {
        &self.module_part_number
    }

    /// CRC computed over bytes `0x000..0x07E`
    pub fn calculated_checksum(&self) -> u16 {
        self.checksum.calculated
    }

    /// CRC read from 0x07E
    pub fn stored_checksum(&self) -> u16 {
        self.checksum.stored
    }

    /// Stored/calculated pair
    pub fn checksum(&self) -> ChecksumCheck {
        self.checksum
    }

    /// Signals behind [`validity_score`](Self::validity_score)
    pub fn signals(&self) -> ValiditySignals {
        self.signals
    }

    /// Confidence in `{0, 1/3, 2/3, 1}`
    pub fn validity_score(&self) -> f64 {
        self.signals.score()
    }

    /// Manufacturing block
    pub fn manufacturing(&self) -> &ManufacturingInfo {
        &self.manufacturing
    }
}

impl SpdLayout<'_> {
    /// Run the resolver, checksum, vendor and scoring stages.
    ///
    /// # Errors
    ///
    /// Returns an error if the status byte or device type is not a legal
    /// DDR4 code. A CRC mismatch is not an error.
    pub fn decode(&self) -> Result<DecodedSpd> {
        let offset = self.offset();
        tracing::debug!("Decoding SPD at 0x{offset:08X}");

        let size = resolve::resolve_status(offset, self.status())?;
        let revision = SpdRevision::from_byte(self.revision());
        let ram_type = resolve::resolve_device_type(offset, self.device_type())?;

        let checksum = checksum::verify(self);

        let vendor_id = self.dram_manufacturer_id();
        let vendor = vendor::resolve_vendor(vendor_id);
        let raw_part = self.part_number();
        let module_part_number = vendor::part_number(raw_part);

        let signals = ValiditySignals {
            checksum_match: checksum.is_match(),
            manufacturer_present: vendor_id != 0,
            part_number_programmed: !vendor::is_blank_part_number(raw_part),
        };

        let manufacturing = ManufacturingInfo {
            module_vendor: vendor::resolve_vendor(self.module_manufacturer_id()),
            location: self.manufacturing_location(),
            date: self.manufacturing_date(),
            serial: self.serial_number(),
            revision_code: self.revision_code(),
            dram_stepping: self.dram_stepping(),
        };

        tracing::info!(
            "SPD at 0x{offset:08X}: {ram_type} rev {revision}, {vendor} \"{module_part_number}\", {}/3 checks",
            signals.passed()
        );

        Ok(DecodedSpd {
            offset,
            size,
            revision,
            ram_type,
            vendor,
            module_part_number,
            checksum,
            signals,
            manufacturing,
        })
    }
}

/// Decode one window: `byte window → validated record`.
///
/// # Errors
///
/// Returns [`SpdError`](crate::SpdError) for a truncated window, an illegal
/// status byte, or a non-DDR4 device type.
pub fn decode(window: &RawWindow<'_>) -> Result<DecodedSpd> {
    SpdLayout::new(window)?.decode()
}
