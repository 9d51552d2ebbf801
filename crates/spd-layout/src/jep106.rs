//! JEP106 manufacturer identification codes.
//!
//! SPD stores a JEP106 ID as two bytes: the continuation-code count (with odd
//! parity in bit 7) followed by the manufacturer code. Read little-endian, the
//! bank byte lands in the low half, so Micron (bank 1, `0x2C`) is `0x2C80`.
//!
//! Only vendors seen on real DDR4 modules are listed. Everything else is
//! [`Vendor::Unknown`], which is a normal outcome rather than an error.

/// Known manufacturer IDs as read little-endian from the image.
pub mod id {
    /// Crucial / Micron module division.
    pub const CRUCIAL_MICRON: u16 = 0x2C80;
    /// Ramaxel Technology.
    pub const RAMAXEL: u16 = 0x4304;
    /// Transcend Information.
    pub const TRANSCEND: u16 = 0x4F01;
    /// Kingston.
    pub const KINGSTON: u16 = 0x9801;
    /// SK Hynix (bank 1 entry).
    pub const HYNIX: u16 = 0x987F;
    /// Corsair.
    pub const CORSAIR: u16 = 0x9E02;
    /// OCZ.
    pub const OCZ: u16 = 0xB004;
    /// Hynix / Hyundai.
    pub const HYNIX_HYUNDAI: u16 = 0xAD80;
    /// Super Talent.
    pub const SUPER_TALENT: u16 = 0xB502;
    /// G.Skill.
    pub const GSKILL: u16 = 0xCD04;
    /// Samsung.
    pub const SAMSUNG: u16 = 0xCE80;
    /// Elpida.
    pub const ELPIDA: u16 = 0xFE02;
    /// Micron (legacy encoding).
    pub const MICRON: u16 = 0xFF2C;
}

/// Manufacturer resolved from a JEP106 ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Crucial / Micron.
    CrucialMicron,
    /// Ramaxel.
    Ramaxel,
    /// Transcend.
    Transcend,
    /// Kingston.
    Kingston,
    /// Hynix.
    Hynix,
    /// Corsair.
    Corsair,
    /// OCZ.
    Ocz,
    /// Hynix / Hyundai.
    HynixHyundai,
    /// Super Talent.
    SuperTalent,
    /// G.Skill.
    GSkill,
    /// Samsung.
    Samsung,
    /// Elpida.
    Elpida,
    /// Micron.
    Micron,
    /// Not in the table (includes the unprogrammed `0x0000`).
    Unknown(u16),
}

impl Vendor {
    /// Resolve a little-endian JEP106 ID.
    #[must_use]
    pub const fn from_id(raw: u16) -> Self {
        match raw {
            id::CRUCIAL_MICRON => Self::CrucialMicron,
            id::RAMAXEL => Self::Ramaxel,
            id::TRANSCEND => Self::Transcend,
            id::KINGSTON => Self::Kingston,
            id::HYNIX => Self::Hynix,
            id::CORSAIR => Self::Corsair,
            id::OCZ => Self::Ocz,
            id::HYNIX_HYUNDAI => Self::HynixHyundai,
            id::SUPER_TALENT => Self::SuperTalent,
            id::GSKILL => Self::GSkill,
            id::SAMSUNG => Self::Samsung,
            id::ELPIDA => Self::Elpida,
            id::MICRON => Self::Micron,
            other => Self::Unknown(other),
        }
    }

    /// Raw ID this vendor was resolved from.
    #[must_use]
    pub const fn id(&self) -> u16 {
        match self {
            Self::CrucialMicron => id::CRUCIAL_MICRON,
            Self::Ramaxel => id::RAMAXEL,
            Self::Transcend => id::TRANSCEND,
            Self::Kingston => id::KINGSTON,
            Self::Hynix => id::HYNIX,
            Self::Corsair => id::CORSAIR,
            Self::Ocz => id::OCZ,
            Self::HynixHyundai => id::HYNIX_HYUNDAI,
            Self::SuperTalent => id::SUPER_TALENT,
            Self::GSkill => id::GSKILL,
            Self::Samsung => id::SAMSUNG,
            Self::Elpida => id::ELPIDA,
            Self::Micron => id::MICRON,
            Self::Unknown(raw) => *raw,
        }
    }

    /// Display name; `"Unknown"` for IDs not in the table.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CrucialMicron => "Crucial/Micron",
            Self::Ramaxel => "Ramaxel",
            Self::Transcend => "Transcend",
            Self::Kingston => "Kingston",
            Self::Hynix => "Hynix",
            Self::Corsair => "Corsair",
            Self::Ocz => "OCZ",
            Self::HynixHyundai => "Hynix/Hyundai",
            Self::SuperTalent => "SuperTalent",
            Self::GSkill => "GSkill",
            Self::Samsung => "Samsung",
            Self::Elpida => "Elpida",
            Self::Micron => "Micron",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// True if the ID matched a table entry.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl core::fmt::Display for Vendor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
