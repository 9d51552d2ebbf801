//! Validity scoring.
//!
//! Three independent signals, each worth a third. The score is a triage hint
//! for a human reading many candidate windows, not a gate.

/// Boolean signals behind a validity score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValiditySignals {
    /// Stored CRC equals the computed one
    pub checksum_match: bool,
    /// DRAM manufacturer ID is non-zero
    pub manufacturer_present: bool,
    /// Part number is not all spaces
    pub part_number_programmed: bool,
}

impl ValiditySignals {
    /// Number of signals considered
    pub const COUNT: u8 = 3;

    /// Number of signals that hold
    pub fn passed(&self) -> u8 {
        u8::from(self.checksum_match)
            + u8::from(self.manufacturer_present)
            + u8::from(self.part_number_programmed)
    }

    /// `passed / 3`, one of `0`, `1/3`, `2/3`, `1`
    pub fn score(&self) -> f64 {
        f64::from(self.passed()) / f64::from(Self::COUNT)
    }
}
