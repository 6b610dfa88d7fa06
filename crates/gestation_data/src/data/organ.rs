use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::cell::CellType;

/// Named organ aggregate. Each organ is made of exactly one terminal cell type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Organ {
    Heart,
    Brain,
    Eyes,
    Lungs,
    Liver,
    Stomach,
    Intestines,
    Kidneys,
    Bladder,
    UmbilicalCord,
    Arms,
    Legs,
}

impl Organ {
    pub const COUNT: usize = 12;

    pub const ALL: [Organ; Self::COUNT] = [
        Organ::Heart,
        Organ::Brain,
        Organ::Eyes,
        Organ::Lungs,
        Organ::Liver,
        Organ::Stomach,
        Organ::Intestines,
        Organ::Kidneys,
        Organ::Bladder,
        Organ::UmbilicalCord,
        Organ::Arms,
        Organ::Legs,
    ];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell types whose site population counts towards this organ.
    #[must_use]
    pub fn constituents(self) -> &'static [CellType] {
        match self {
            Organ::Heart => &[CellType::Heart],
            Organ::Brain => &[CellType::Brain],
            Organ::Eyes => &[CellType::Eye],
            Organ::Lungs => &[CellType::Lung],
            Organ::Liver => &[CellType::Liver],
            Organ::Stomach => &[CellType::Stomach],
            Organ::Intestines => &[CellType::Intestine],
            Organ::Kidneys => &[CellType::Kidney],
            Organ::Bladder => &[CellType::Bladder],
            Organ::UmbilicalCord => &[CellType::Umbilical],
            Organ::Arms => &[CellType::Arm],
            Organ::Legs => &[CellType::Leg],
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Organ::Heart => "Heart",
            Organ::Brain => "Brain",
            Organ::Eyes => "Eyes",
            Organ::Lungs => "Lungs",
            Organ::Liver => "Liver",
            Organ::Stomach => "Stomach",
            Organ::Intestines => "Intestines",
            Organ::Kidneys => "Kidneys",
            Organ::Bladder => "Bladder",
            Organ::UmbilicalCord => "Umbilical Cord",
            Organ::Arms => "Arms",
            Organ::Legs => "Legs",
        }
    }
}

impl fmt::Display for Organ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
