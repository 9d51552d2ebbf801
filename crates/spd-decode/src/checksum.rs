//! Base-configuration CRC.
//!
//! DDR4 protects bytes `0x000..0x07E` with CRC-16/XMODEM (poly `0x1021`,
//! init `0`, no reflection, no final xor). The result is stored little-endian
//! at `0x07E`.

use crc::{Crc, CRC_16_XMODEM};

use crate::layout::SpdLayout;

/// CRC-16/XMODEM generator polynomial
pub const CRC16_XMODEM_POLY: u16 = 0x1021;

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// CRC-16/XMODEM of `data`
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    XMODEM.checksum(data)
}

/// Outcome of comparing the computed CRC with the stored one.
///
/// A mismatch is advisory: dumps of worn or half-erased EEPROMs are expected
/// input, so it feeds the validity score instead of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumCheck {
    /// CRC computed over the window
    pub calculated: u16,
    /// CRC read from the window
    pub stored: u16,
}

impl ChecksumCheck {
    /// True if the stored CRC matches
    pub fn is_match(&self) -> bool {
        self.calculated == self.stored
    }
}

/// Verify the base-configuration CRC of `layout`
pub fn verify(layout: &SpdLayout<'_>) -> ChecksumCheck {
    let check = ChecksumCheck {
        calculated: crc16_xmodem(layout.crc_coverage()),
        stored: layout.stored_crc(),
    };

    if check.is_match() {
        tracing::debug!("CRC 0x{:04X} ok at 0x{:08X}", check.stored, layout.offset());
    } else {
        tracing::warn!(
            "CRC mismatch at 0x{:08X}: stored 0x{:04X}, calculated 0x{:04X}",
            layout.offset(),
            check.stored,
            check.calculated
        );
    }

    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::RawWindow;

    #[test]
    fn xmodem_check_value() {
        // Standard check input for CRC catalogues
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
    }

    #[test]
    fn polynomial_matches_catalogue_entry() {
        assert_eq!(CRC_16_XMODEM.poly, CRC16_XMODEM_POLY);
        assert_eq!(CRC_16_XMODEM.init, 0);
        assert!(!CRC_16_XMODEM.refin);
    }

    #[test]
    fn empty_and_zero_input() {
        assert_eq!(crc16_xmodem(&[]), 0x0000);
        assert_eq!(crc16_xmodem(&[0u8; 126]), 0x0000);
    }

    #[test]
    fn matches_bitwise_definition() {
        fn bitwise(data: &[u8]) -> u16 {
            let mut crc = 0u16;
            for &b in data {
                crc ^= u16::from(b) << 8;
                for _ in 0..8 {
                    crc = if crc & 0x8000 == 0 {
                        crc << 1
                    } else {
                        (crc << 1) ^ CRC16_XMODEM_POLY
                    };
                }
            }
            crc
        }

        let data: Vec<u8> = (0..=255u8).collect();
        assert_eq!(crc16_xmodem(&data), bitwise(&data));
    }

    #[test]
    fn verify_reads_stored_crc_little_endian() {
        let mut bytes = vec![0u8; 512];
        bytes[0] = 0x23;
        bytes[1] = 0x11;
        bytes[2] = 0x0C;
        let crc = crc16_xmodem(&bytes[..126]);
        bytes[126..128].copy_from_slice(&crc.to_le_bytes());

        let window = RawWindow::new(0, &bytes);
        let layout = SpdLayout::new(&window).unwrap();
        let check = verify(&layout);
        assert!(check.is_match());
        assert_eq!(check.calculated, crc);

        bytes[127] ^= 0xFF;
        let window = RawWindow::new(0, &bytes);
        let layout = SpdLayout::new(&window).unwrap();
        assert!(!verify(&layout).is_match());
    }
}
