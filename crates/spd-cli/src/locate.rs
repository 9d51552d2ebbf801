//! Candidate window search.
//!
//! Scans a blob for bytes that look like the start of a DDR4 SPD image and
//! slices out a window at each hit. The slices share the blob's buffer.

use bytes::Bytes;
use spd_decode::codes::{device_type, revision, status};
use spd_decode::{crc16_xmodem, RawWindow, TotalBytes, UsedBytes, WINDOW_LEN};

/// Locator settings
#[derive(Debug, Clone, Copy, Default)]
pub struct LocateOptions {
    /// Drop candidates whose stored CRC does not match
    pub require_crc: bool,
}

/// A candidate window and where it came from
#[derive(Debug, Clone)]
pub struct SpdMatch {
    /// Offset in the source blob
    pub offset: u64,
    /// Up to [`WINDOW_LEN`] bytes starting at `offset`
    pub window: Bytes,
}

impl SpdMatch {
    /// Borrow as a decoder input
    pub fn raw_window(&self) -> RawWindow<'_> {
        RawWindow::new(self.offset, &self.window)
    }
}

/// Header signature: legal status byte with a non-zero used count,
/// revision 1.x, DDR4-family key byte.
fn looks_like_ddr4_header(head: &[u8]) -> bool {
    let [status_byte, revision_byte, key_byte] = head else {
        return false;
    };

    let total_ok = TotalBytes::from_code(status::total_code(*status_byte)).is_some();
    let used_ok = UsedBytes::from_code(status::used_code(*status_byte))
        .is_some_and(|used| used != UsedBytes::Unspecified);

    total_ok
        && used_ok
        && revision::major(*revision_byte) == revision::DDR4_MAJOR
        && device_type::DDR4_FAMILY.contains(key_byte)
}

fn crc_matches(window: &[u8]) -> bool {
    match window.get(..128) {
        Some(head) => crc16_xmodem(&head[..126]) == u16::from_le_bytes([head[126], head[127]]),
        None => false,
    }
}

/// Find every candidate SPD window in `blob`.
///
/// A hit near the end of the blob yields a window shorter than
/// [`WINDOW_LEN`]; the decoder reports it as truncated.
pub fn locate(blob: &Bytes, options: LocateOptions) -> Vec<SpdMatch> {
    let mut matches = Vec::new();

    for (offset, head) in blob.windows(3).enumerate() {
        if !looks_like_ddr4_header(head) {
            continue;
        }

        let end = (offset + WINDOW_LEN).min(blob.len());
        let window = blob.slice(offset..end);

        if options.require_crc && !crc_matches(&window) {
            tracing::trace!("Header at 0x{offset:08X} rejected: CRC mismatch");
            continue;
        }

        tracing::info!("Found DDR4 SPD candidate at 0x{offset:08X}");
        matches.push(SpdMatch {
            offset: offset as u64,
            window,
        });
    }

    if matches.is_empty() {
        tracing::debug!("No DDR4 SPD headers in {} bytes", blob.len());
    }

    matches
}
