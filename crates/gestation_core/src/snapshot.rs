use gestation_data::{Cell, CellId, CellType, DevelopmentalStage, MEDIUM};
use serde::Serialize;

use crate::metrics::DevelopmentMetrics;
use crate::morphogen::MorphogenField;
use crate::organs::OrganTracker;

/// Read-only view of the simulation between ticks.
#[derive(Serialize, Clone, Debug)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub week: u32,
    pub stage: DevelopmentalStage,
    pub width: usize,
    pub height: usize,
    /// Row-major site owners; `0` is medium.
    pub grid: &'a [CellId],
    pub cells: &'a [Cell],
    pub morphogens: &'a MorphogenField,
    pub organs: &'a OrganTracker,
    pub metrics: &'a DevelopmentMetrics,
}

impl Snapshot<'_> {
    #[must_use]
    pub fn owner_at(&self, x: usize, y: usize) -> CellId {
        self.grid[y * self.width + x]
    }

    /// Type of the cell owning a site, `None` for medium.
    #[must_use]
    pub fn type_at(&self, x: usize, y: usize) -> Option<CellType> {
        match self.owner_at(x, y) {
            MEDIUM => None,
            id => self.cells.get(Cell::slot(id)).map(|c| c.cell_type),
        }
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        if id == MEDIUM {
            return None;
        }
        self.cells.get(Cell::slot(id))
    }

    /// Row-major RGB buffer for renderers; medium is drawn dark blue.
    #[must_use]
    pub fn rgb_buffer(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.grid.len() * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let (r, g, b) = self.type_at(x, y).map_or(EMPTY_RGB, CellType::rgb);
                out.extend_from_slice(&[r, g, b]);
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Colour of medium sites.
pub const EMPTY_RGB: (u8, u8, u8) = (12, 12, 28);
