//! Byte map of a JEDEC DDR4 Serial Presence Detect EEPROM.
//!
//! This crate has **no dependencies** and performs **no decoding** — it is a
//! pure model of the 512-byte SPD image: where every field lives, which codes
//! the packed bytes may legally carry, and the JEP106 manufacturer IDs we
//! know how to name.
//!
//! Offsets follow JEDEC Standard No. 21-C, Annex L (DDR4 SPD, revision 1.x).
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`fields`] | Offset/width of every region, `WINDOW_LEN` |
//! | [`codes`] | Status-byte bitfields and DRAM device-type codes |
//! | [`jep106`] | Manufacturer ID table, [`Vendor`](jep106::Vendor) |
//!
//! ```text
//! 0x000 ┌─────────────────────────────┐
//!       │ base configuration  (0..125) │  CRC-16 at 0x07E
//! 0x080 ├─────────────────────────────┤
//!       │ module specific     (64)    │
//! 0x0C0 │ hybrid memory       (64)    │
//! 0x100 │ extended function   (64)    │
//! 0x140 ├─────────────────────────────┤
//!       │ manufacturing info  (64)    │  part number 0x149..0x15C
//! 0x180 ├─────────────────────────────┤
//!       │ end user programmable (128) │
//! 0x200 └─────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codes;
pub mod fields;
pub mod jep106;

pub use fields::{Field, WINDOW_LEN};
pub use jep106::Vendor;
