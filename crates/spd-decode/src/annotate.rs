//! Annotated hex rendering of a decoded image.
//!
//! Produces the text of a `.spd.hex` file: `#` comment lines carrying the
//! decoded meaning, each followed by the raw bytes it was decoded from.
//!
//! ```text
//! # TotalBytes: 512 ; BytesUsed: 384
//! 23
//! # SPD Revision 1.1
//! 11
//! # DDR Ramtype: SD-DDR4
//! 0C
//! # Config Rest
//! 02 85 19 00 ...
//! ```

use std::fmt::Write;

use spd_layout::fields;

use crate::layout::SpdLayout;
use crate::record::DecodedSpd;

/// Bytes per hex dump row
pub const BYTES_PER_LINE: usize = 16;

/// Uppercase hex, space separated, [`BYTES_PER_LINE`] per line.
///
/// Every line, including the last, ends in `\n`.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for row in bytes.chunks(BYTES_PER_LINE) {
        for (i, b) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{b:02X}");
        }
        out.push('\n');
    }
    out
}

/// Render the annotated dump for `spd`, decoded from `layout`.
pub fn render(layout: &SpdLayout<'_>, spd: &DecodedSpd) -> String {
    let mut out = String::with_capacity(4096);
    // fmt::Write into a String cannot fail
    let _ = write_annotated(&mut out, layout, spd);
    out
}

fn write_annotated(
    out: &mut String,
    layout: &SpdLayout<'_>,
    spd: &DecodedSpd,
) -> std::fmt::Result {
    writeln!(
        out,
        "# TotalBytes: {} ; BytesUsed: {}",
        spd.total_bytes().count(),
        spd.used_bytes().count()
    )?;
    writeln!(out, "{:02X}", layout.status())?;

    let revision = spd.revision();
    writeln!(out, "# SPD Revision {revision}")?;
    writeln!(out, "{:02X}", revision.to_byte())?;

    let ram_type = spd.ram_type();
    writeln!(out, "# DDR Ramtype: {ram_type}")?;
    writeln!(out, "{:02X}", ram_type.code())?;

    writeln!(out, "# Config Rest")?;
    out.push_str(&hex_dump(layout.field(fields::CONFIG_REST)));

    let checksum = spd.checksum();
    let status = if checksum.is_match() {
        "Match!"
    } else {
        "Not Matching"
    };
    writeln!(
        out,
        "# CRC Is: 0x{:04X} Calculated: 0x{:04X} {status}",
        checksum.stored, checksum.calculated
    )?;
    writeln!(out, "{:04X}", checksum.stored)?;

    for block in [
        fields::MODULE_SPECIFIC,
        fields::HYBRID_MEMORY,
        fields::EXTENDED_FUNCTION,
    ] {
        writeln!(out)?;
        writeln!(out, "# {}", block.name)?;
        out.push_str(&hex_dump(layout.field(block)));
    }

    let mfg = spd.manufacturing();
    writeln!(out)?;
    writeln!(out, "# ManufacturingInformation")?;

    writeln!(
        out,
        "## Module Manufacturer: \"{}\" (0x{:04X})",
        mfg.module_vendor,
        mfg.module_vendor.id()
    )?;
    writeln!(out, "{:04X}", layout.module_manufacturer_id())?;

    match mfg.year_week() {
        Some((year, week)) => writeln!(
            out,
            "## Module Manufacturing Location and Date (week {week} of {year})"
        )?,
        None => writeln!(out, "## Module Manufacturing Location and Date")?,
    }
    let date = mfg.date;
    writeln!(out, "{:02X} {:02X} {:02X}", mfg.location, date[0], date[1])?;

    writeln!(out, "## Module Serial Number")?;
    writeln!(out, "{:08X}", mfg.serial)?;

    writeln!(
        out,
        "## Module Part Number: \"{}\"",
        spd.module_part_number()
    )?;
    out.push_str(&hex_dump(layout.part_number()));

    writeln!(out, "## Module Revision Code")?;
    writeln!(out, "{:02X}", mfg.revision_code)?;

    let vendor = spd.vendor();
    writeln!(
        out,
        "## DRAM Manufacturer: \"{vendor}\" (0x{:04X})",
        layout.dram_manufacturer_id()
    )?;
    writeln!(out, "{:04X}", layout.dram_manufacturer_id())?;

    writeln!(out, "## DRAM Stepping")?;
    writeln!(out, "{:02X}", mfg.dram_stepping)?;

    writeln!(out, "## Manufacturer Data")?;
    out.push_str(&hex_dump(layout.field(fields::MANUFACTURER_DATA)));

    writeln!(out, "## Reserved")?;
    out.push_str(&hex_dump(layout.field(fields::MANUFACTURING_RESERVED)));

    writeln!(out)?;
    writeln!(out, "# {}", fields::END_USER.name)?;
    out.push_str(&hex_dump(layout.field(fields::END_USER)));

    Ok(())
}
