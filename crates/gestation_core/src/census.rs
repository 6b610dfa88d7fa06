//! Per-tick tallies derived from one scan of the lattice.

use gestation_data::{Cell, CellId, CellType, MEDIUM};

use crate::energy::{type_slot, TYPE_SLOTS};
use crate::lattice::Lattice;

/// Accumulated geometry and contacts for one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellTally {
    pub sites: u32,
    pub sum_x: f64,
    pub sum_y: f64,
    /// Boundary bonds to differently-owned neighbours, by neighbour type slot.
    pub contacts: [u32; TYPE_SLOTS],
}

impl Default for CellTally {
    fn default() -> Self {
        Self {
            sites: 0,
            sum_x: 0.0,
            sum_y: 0.0,
            contacts: [0; TYPE_SLOTS],
        }
    }
}

impl CellTally {
    #[must_use]
    pub fn boundary(&self) -> u32 {
        self.contacts.iter().sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Census {
    tallies: Vec<CellTally>,
    /// Sum of squared distances of occupied sites from the grid centre.
    pub radial_sq_sum: f64,
    pub occupied: usize,
}

impl Census {
    /// Scans the lattice once. Off-grid neighbours count as medium contacts.
    #[must_use]
    pub fn collect(lattice: &Lattice, cells: &[Cell]) -> Self {
        let mut tallies = vec![CellTally::default(); cells.len()];
        let cx = (lattice.width() as f64 - 1.0) / 2.0;
        let cy = (lattice.height() as f64 - 1.0) / 2.0;
        let mut radial_sq_sum = 0.0;
        let mut occupied = 0;

        for (idx, &owner) in lattice.owners().iter().enumerate() {
            if owner == MEDIUM {
                continue;
            }
            occupied += 1;
            let (x, y) = lattice.coords(idx);
            let (fx, fy) = (x as f64, y as f64);
            radial_sq_sum += (fx - cx).powi(2) + (fy - cy).powi(2);

            let tally = &mut tallies[Cell::slot(owner)];
            tally.sites += 1;
            tally.sum_x += fx;
            tally.sum_y += fy;
            for neighbour in lattice.neighbour_owners(idx) {
                if neighbour != owner {
                    tally.contacts[type_slot(neighbour, cells)] += 1;
                }
            }
        }

        Self {
            tallies,
            radial_sq_sum,
            occupied,
        }
    }

    #[must_use]
    pub fn tally(&self, id: CellId) -> Option<&CellTally> {
        self.tallies.get(Cell::slot(id))
    }

    /// Mean site position of a cell, if it owns any sites.
    #[must_use]
    pub fn centroid(&self, id: CellId) -> Option<(f64, f64)> {
        self.tally(id)
            .filter(|t| t.sites > 0)
            .map(|t| (t.sum_x / f64::from(t.sites), t.sum_y / f64::from(t.sites)))
    }

    /// Fraction of a cell's boundary bonds that touch cells of `cell_type`.
    #[must_use]
    pub fn contact_fraction(&self, id: CellId, cell_type: CellType) -> f64 {
        match self.tally(id) {
            Some(t) if t.boundary() > 0 => {
                f64::from(t.contacts[cell_type.index()]) / f64::from(t.boundary())
            }
            _ => 0.0,
        }
    }

    /// Writes centroids back onto the cell records.
    pub fn apply_centroids(&self, cells: &mut [Cell]) {
        for cell in cells.iter_mut() {
            if let Some(c) = self.centroid(cell.id) {
                cell.centroid = c;
            }
        }
    }

    /// RMS distance of occupied sites from the grid centre.
    #[must_use]
    pub fn spatial_spread(&self) -> f64 {
        if self.occupied == 0 {
            0.0
        } else {
            (self.radial_sq_sum / self.occupied as f64).sqrt()
        }
    }
}

/// Adjacent site pairs owned by cells of different types. Medium is excluded.
#[must_use]
pub fn heterotypic_boundaries(lattice: &Lattice, cells: &[Cell]) -> u64 {
    let (w, h) = (lattice.width(), lattice.height());
    let kind = |owner: CellId| (owner != MEDIUM).then(|| cells[Cell::slot(owner)].cell_type);
    let mut count = 0;
    for y in 0..h {
        for x in 0..w {
            let Some(here) = kind(lattice.owner_at(x, y)) else {
                continue;
            };
            if x + 1 < w && kind(lattice.owner_at(x + 1, y)).is_some_and(|t| t != here) {
                count += 1;
            }
            if y + 1 < h && kind(lattice.owner_at(x, y + 1)).is_some_and(|t| t != here) {
                count += 1;
            }
        }
    }
    count
}
