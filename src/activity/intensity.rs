//! Heat-map intensity levels
//!
//! Daily counts map onto five fixed levels, each with a palette color:
//!
//! | level | counts |
//! |-------|--------|
//! | 0     | 0      |
//! | 1     | 1      |
//! | 2     | 2-3    |
//! | 3     | 4-6    |
//! | 4     | 7+     |

use serde::{Deserialize, Serialize};

/// Number of intensity levels
pub const LEVEL_COUNT: usize = 5;

/// Ordinal heat-map intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum IntensityLevel {
    Level0,
    Level1,
    Level2,
    Level3,
    Level4,
}

impl IntensityLevel {
    /// All levels, lowest first
    pub const ALL: [IntensityLevel; LEVEL_COUNT] = [
        IntensityLevel::Level0,
        IntensityLevel::Level1,
        IntensityLevel::Level2,
        IntensityLevel::Level3,
        IntensityLevel::Level4,
    ];

    pub fn from_count(count: u32) -> Self {
        match count {
            0 => IntensityLevel::Level0,
            1 => IntensityLevel::Level1,
            2..=3 => IntensityLevel::Level2,
            4..=6 => IntensityLevel::Level3,
            _ => IntensityLevel::Level4,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            IntensityLevel::Level0 => 0,
            IntensityLevel::Level1 => 1,
            IntensityLevel::Level2 => 2,
            IntensityLevel::Level3 => 3,
            IntensityLevel::Level4 => 4,
        }
    }

    /// Palette color (GitHub-style greens)
    pub fn color(&self) -> &'static str {
        match self {
            IntensityLevel::Level0 => "#EBEDF0",
            IntensityLevel::Level1 => "#9BE9A8",
            IntensityLevel::Level2 => "#40C463",
            IntensityLevel::Level3 => "#30A14E",
            IntensityLevel::Level4 => "#216E39",
        }
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for IntensityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        IntensityLevel::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| format!("intensity level out of range: {value}"))
    }
}

/// Ordinal intensity level (0-4) for a daily count
pub fn color_level(count: u32) -> u8 {
    IntensityLevel::from_count(count).as_u8()
}
