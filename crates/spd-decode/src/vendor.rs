//! Vendor and part-number resolution

use spd_layout::Vendor;

/// Resolve a JEP106 manufacturer ID. Unlisted IDs give [`Vendor::Unknown`].
pub fn resolve_vendor(id: u16) -> Vendor {
    let vendor = Vendor::from_id(id);
    if !vendor.is_known() {
        tracing::debug!("Manufacturer ID 0x{id:04X} not in vendor table");
    }
    vendor
}

/// Decode the part-number field.
///
/// Trailing NUL padding is stripped. Spaces are kept as-is: JEDEC pads with
/// spaces too, and older dumps rely on seeing them. Non-ASCII bytes become
/// U+FFFD.
pub fn part_number(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches('\0')
        .to_string()
}

/// True if the field is entirely spaces, the marker of an unprogrammed part number
pub fn is_blank_part_number(raw: &[u8]) -> bool {
    !raw.is_empty() && raw.iter().all(|&b| b == b' ')
}
