use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::morphogen::Morphogen;

/// Identifier of a lattice owner. `0` is reserved for the medium.
pub type CellId = u32;

/// Background owner of every site not claimed by a cell.
pub const MEDIUM: CellId = 0;

/// Developmental potency, totally ordered from least to most committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Potency {
    Undifferentiated,
    GermLayer,
    Tissue,
    Terminal,
}

/// Coarse tissue family used by the adhesion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TissueFamily {
    Embryonic,
    Ectodermal,
    Mesodermal,
    Endodermal,
    Extraembryonic,
}

/// Closed set of cell types a lattice owner can take.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum CellType {
    #[default]
    Undifferentiated,
    Ectoderm,
    Mesoderm,
    Endoderm,
    Head,
    Body,
    Brain,
    Eye,
    Heart,
    Lung,
    Liver,
    Stomach,
    Intestine,
    Kidney,
    Bladder,
    Arm,
    Leg,
    Umbilical,
    Placenta,
}

impl CellType {
    pub const COUNT: usize = 19;

    pub const ALL: [CellType; Self::COUNT] = [
        CellType::Undifferentiated,
        CellType::Ectoderm,
        CellType::Mesoderm,
        CellType::Endoderm,
        CellType::Head,
        CellType::Body,
        CellType::Brain,
        CellType::Eye,
        CellType::Heart,
        CellType::Lung,
        CellType::Liver,
        CellType::Stomach,
        CellType::Intestine,
        CellType::Kidney,
        CellType::Bladder,
        CellType::Arm,
        CellType::Leg,
        CellType::Umbilical,
        CellType::Placenta,
    ];

    /// Dense index into per-type tables, matching the order of [`CellType::ALL`].
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn potency(self) -> Potency {
        match self {
            CellType::Undifferentiated => Potency::Undifferentiated,
            CellType::Ectoderm | CellType::Mesoderm | CellType::Endoderm => Potency::GermLayer,
            CellType::Head | CellType::Body => Potency::Tissue,
            _ => Potency::Terminal,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.potency() == Potency::Terminal
    }

    #[must_use]
    pub fn family(self) -> TissueFamily {
        match self {
            CellType::Undifferentiated => TissueFamily::Embryonic,
            CellType::Ectoderm | CellType::Head | CellType::Brain | CellType::Eye => {
                TissueFamily::Ectodermal
            }
            CellType::Mesoderm
            | CellType::Body
            | CellType::Heart
            | CellType::Kidney
            | CellType::Arm
            | CellType::Leg
            | CellType::Umbilical => TissueFamily::Mesodermal,
            CellType::Endoderm
            | CellType::Lung
            | CellType::Liver
            | CellType::Stomach
            | CellType::Intestine
            | CellType::Bladder => TissueFamily::Endodermal,
            CellType::Placenta => TissueFamily::Extraembryonic,
        }
    }

    /// Morphogen this type is drawn towards by the coupling term, with its weight.
    #[must_use]
    pub fn morphogen_affinity(self) -> Option<(Morphogen, f64)> {
        match self {
            CellType::Ectoderm | CellType::Head => Some((Morphogen::Anterior, 0.5)),
            CellType::Brain | CellType::Eye => Some((Morphogen::Anterior, 1.0)),
            CellType::Mesoderm | CellType::Body | CellType::Heart => Some((Morphogen::Axial, 0.5)),
            CellType::Endoderm
            | CellType::Lung
            | CellType::Liver
            | CellType::Stomach
            | CellType::Intestine => Some((Morphogen::Axial, 1.0)),
            CellType::Kidney
            | CellType::Bladder
            | CellType::Leg
            | CellType::Arm
            | CellType::Umbilical => Some((Morphogen::Posterior, 1.0)),
            CellType::Undifferentiated | CellType::Placenta => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CellType::Undifferentiated => "Undifferentiated",
            CellType::Ectoderm => "Ectoderm",
            CellType::Mesoderm => "Mesoderm",
            CellType::Endoderm => "Endoderm",
            CellType::Head => "Head",
            CellType::Body => "Body",
            CellType::Brain => "Brain",
            CellType::Eye => "Eye",
            CellType::Heart => "Heart",
            CellType::Lung => "Lung",
            CellType::Liver => "Liver",
            CellType::Stomach => "Stomach",
            CellType::Intestine => "Intestine",
            CellType::Kidney => "Kidney",
            CellType::Bladder => "Bladder",
            CellType::Arm => "Arm",
            CellType::Leg => "Leg",
            CellType::Umbilical => "Umbilical",
            CellType::Placenta => "Placenta",
        }
    }

    /// Display colour for renderers.
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            CellType::Undifferentiated => (255, 140, 160),
            CellType::Ectoderm => (250, 190, 170),
            CellType::Mesoderm => (240, 150, 150),
            CellType::Endoderm => (230, 170, 120),
            CellType::Head => (255, 200, 160),
            CellType::Body => (255, 150, 170),
            CellType::Brain => (255, 160, 120),
            CellType::Eye => (0, 0, 0),
            CellType::Heart => (255, 0, 0),
            CellType::Lung => (255, 105, 180),
            CellType::Liver => (0, 0, 255),
            CellType::Stomach => (255, 255, 255),
            CellType::Intestine => (139, 69, 19),
            CellType::Kidney => (255, 255, 0),
            CellType::Bladder => (0, 0, 139),
            CellType::Arm => (220, 130, 150),
            CellType::Leg => (200, 110, 140),
            CellType::Umbilical => (160, 130, 210),
            CellType::Placenta => (120, 90, 180),
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lattice owner. Volume and centroid are derived from the lattice by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub cell_type: CellType,
    /// Ticks since creation or last division.
    pub age: u64,
    pub target_volume: f64,
    pub volume: u32,
    pub centroid: (f64, f64),
    /// Set on organiser cells that secrete a morphogen.
    pub producer: Option<Morphogen>,
    pub born_tick: u64,
}

impl Cell {
    #[must_use]
    pub fn new(id: CellId, cell_type: CellType, target_volume: f64, born_tick: u64) -> Self {
        Self {
            id,
            cell_type,
            age: 0,
            target_volume,
            volume: 0,
            centroid: (0.0, 0.0),
            producer: None,
            born_tick,
        }
    }

    /// Slot of this cell in a dense `Vec<Cell>` ordered by id.
    #[inline]
    #[must_use]
    pub fn slot(id: CellId) -> usize {
        debug_assert!(id != MEDIUM);
        id as usize - 1
    }
}
