//! Organ development latch.

use gestation_data::{CellType, Organ};
use serde::Serialize;

/// Records the tick at which each organ first reached its site threshold.
/// Once set, an entry is never cleared for the rest of the run.
#[derive(Debug, Clone, Serialize)]
pub struct OrganTracker {
    threshold_sites: u32,
    developed_at: [Option<u64>; Organ::COUNT],
}

impl OrganTracker {
    #[must_use]
    pub fn new(threshold_sites: u32) -> Self {
        Self {
            threshold_sites,
            developed_at: [None; Organ::COUNT],
        }
    }

    /// Constituent site population of an organ.
    #[must_use]
    pub fn population(organ: Organ, type_sites: &[u32; CellType::COUNT]) -> u32 {
        organ
            .constituents()
            .iter()
            .map(|t| type_sites[t.index()])
            .sum()
    }

    /// Latches every organ that crossed the threshold and returns the new ones.
    pub fn update(&mut self, type_sites: &[u32; CellType::COUNT], tick: u64) -> Vec<Organ> {
        let mut newly = Vec::new();
        for organ in Organ::ALL {
            let slot = &mut self.developed_at[organ.index()];
            if slot.is_none() && Self::population(organ, type_sites) >= self.threshold_sites {
                *slot = Some(tick);
                newly.push(organ);
            }
        }
        newly
    }

    #[must_use]
    pub fn is_developed(&self, organ: Organ) -> bool {
        self.developed_at[organ.index()].is_some()
    }

    #[must_use]
    pub fn developed_at(&self, organ: Organ) -> Option<u64> {
        self.developed_at[organ.index()]
    }

    /// Developed organs in declaration order.
    #[must_use]
    pub fn developed(&self) -> Vec<Organ> {
        Organ::ALL
            .into_iter()
            .filter(|&o| self.is_developed(o))
            .collect()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.developed_at.iter().filter(|d| d.is_some()).count()
    }
}
