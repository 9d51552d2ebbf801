#![deny(unsafe_code)]

//! DDR4 Serial Presence Detect decoder
//!
//! This crate decodes and validates 512-byte DDR4 SPD images recovered from
//! memory dumps or EEPROM images.
//!
//! # Pipeline
//!
//! Each window goes through five pure stages:
//!
//! - **Layout** ([`SpdLayout`]): length check, fixed-offset field access
//! - **Resolve**: status byte and device type against their closed code sets
//! - **Checksum**: CRC-16/XMODEM over `0x000..0x07E` vs. the stored value
//! - **Vendor**: JEP106 lookup, part-number trimming
//! - **Score**: three independent signals averaged into a confidence value
//!
//! Illegal codes and short windows are hard errors ([`SpdError`]). A CRC
//! mismatch is not; it lowers the score.
//!
//! # Example
//!
//! ```no_run
//! use spd_decode::{decode, RawWindow};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dump = std::fs::read("module.bin")?;
//! let spd = decode(&RawWindow::new(0, &dump))?;
//!
//! println!("{} by {}", spd.ram_type(), spd.vendor());
//! println!("Part number: {}", spd.module_part_number());
//! println!("Validity: {:.3}", spd.validity_score());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod annotate;
mod checksum;
mod error;
mod layout;
mod record;
mod resolve;
mod score;
mod vendor;
mod window;

pub use checksum::{crc16_xmodem, ChecksumCheck};
pub use error::{LengthField, Result, SpdError};
pub use layout::SpdLayout;
pub use record::{decode, DecodedSpd, ManufacturingInfo};
pub use resolve::{RamType, SpdRevision, SpdSize, TotalBytes, UsedBytes};
pub use score::ValiditySignals;
pub use spd_layout::{codes, fields, Vendor, WINDOW_LEN};
pub use vendor::{is_blank_part_number, part_number};
pub use window::RawWindow;
