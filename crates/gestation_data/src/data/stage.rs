use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse gestational stage derived from the simulated week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum DevelopmentalStage {
    /// Weeks 1-2.
    #[default]
    Implantation,
    /// Weeks 3-8.
    Embryonic,
    /// Weeks 9-12.
    EarlyFetal,
    /// Weeks 13-24.
    MidFetal,
    /// Week 25 onwards.
    LateFetal,
}

impl DevelopmentalStage {
    #[must_use]
    pub fn from_week(week: u32) -> Self {
        match week {
            0..=2 => DevelopmentalStage::Implantation,
            3..=8 => DevelopmentalStage::Embryonic,
            9..=12 => DevelopmentalStage::EarlyFetal,
            13..=24 => DevelopmentalStage::MidFetal,
            _ => DevelopmentalStage::LateFetal,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DevelopmentalStage::Implantation => "Implantation",
            DevelopmentalStage::Embryonic => "Embryonic",
            DevelopmentalStage::EarlyFetal => "Early Fetal",
            DevelopmentalStage::MidFetal => "Mid Fetal",
            DevelopmentalStage::LateFetal => "Late Fetal",
        }
    }

    /// Week range label shown next to the stage name.
    #[must_use]
    pub fn weeks(self) -> &'static str {
        match self {
            DevelopmentalStage::Implantation => "W1-2",
            DevelopmentalStage::Embryonic => "W3-8",
            DevelopmentalStage::EarlyFetal => "W9-12",
            DevelopmentalStage::MidFetal => "W13-24",
            DevelopmentalStage::LateFetal => "W25-40",
        }
    }
}

impl fmt::Display for DevelopmentalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.weeks())
    }
}

/// Short description of what happens around a given week.
#[must_use]
pub fn milestone(week: u32) -> &'static str {
    match week {
        0..=2 => "Blastocyst implants; placenta begins to form",
        3..=5 => "Neural tube closes; heart starts beating",
        6..=8 => "Limb buds appear; major organs begin forming",
        9..=12 => "Embryo becomes a fetus; organs in place",
        13..=16 => "Skeleton hardens; movements begin",
        17..=20 => "Hearing develops; quickening felt",
        21..=24 => "Lungs develop branches; viability threshold",
        25..=28 => "Eyes open; rapid brain growth",
        29..=32 => "Bones fully formed; fat accumulates",
        33..=36 => "Lungs mature; immune system strengthens",
        _ => "Full term; ready for birth",
    }
}
