//! Hamiltonian differences for candidate ownership copies.
//!
//! `ΔH = ΔH_adhesion + ΔH_volume + ΔH_coupling`. Evaluation is pure: the
//! model only borrows the lattice, the cell table and the morphogen field.

use gestation_data::{Cell, CellId, CellType, Morphogen, MEDIUM};

use crate::lattice::Lattice;
use crate::morphogen::MorphogenField;

/// Number of rows in per-type tables: every cell type plus the medium.
pub const TYPE_SLOTS: usize = CellType::COUNT + 1;
/// Table row used for the medium.
pub const MEDIUM_SLOT: usize = CellType::COUNT;

/// Relative contact costs before scaling by the adhesion parameter.
const MEDIUM_CONTACT: f64 = 0.5;
const SAME_TYPE: f64 = 0.2;
const SAME_FAMILY: f64 = 0.6;
const HETEROTYPIC: f64 = 1.0;

/// Table slot of a lattice owner.
#[inline]
#[must_use]
pub fn type_slot(owner: CellId, cells: &[Cell]) -> usize {
    if owner == MEDIUM {
        MEDIUM_SLOT
    } else {
        cells[Cell::slot(owner)].cell_type.index()
    }
}

/// Symmetric contact-energy table indexed by type slot.
#[derive(Debug, Clone)]
pub struct AdhesionTable {
    j: [[f64; TYPE_SLOTS]; TYPE_SLOTS],
}

impl AdhesionTable {
    #[must_use]
    pub fn new(adhesion: f64) -> Self {
        let mut j = [[0.0; TYPE_SLOTS]; TYPE_SLOTS];
        for (a, row) in j.iter_mut().enumerate() {
            for (b, entry) in row.iter_mut().enumerate() {
                *entry = adhesion * Self::coefficient(a, b);
            }
        }
        Self { j }
    }

    /// Unscaled contact coefficient between two type slots.
    #[must_use]
    pub fn coefficient(a: usize, b: usize) -> f64 {
        match (a == MEDIUM_SLOT, b == MEDIUM_SLOT) {
            (true, true) => 0.0,
            (true, false) | (false, true) => MEDIUM_CONTACT,
            (false, false) => match (CellType::from_index(a), CellType::from_index(b)) {
                (Some(ta), Some(tb)) if ta == tb => SAME_TYPE,
                (Some(ta), Some(tb)) if ta.family() == tb.family() => SAME_FAMILY,
                _ => HETEROTYPIC,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.j[a][b]
    }
}

/// Coupling weights for each type slot, one column per morphogen.
fn affinity(slot: usize) -> [f64; Morphogen::COUNT] {
    let mut out = [0.0; Morphogen::COUNT];
    if let Some((morphogen, weight)) =
        CellType::from_index(slot).and_then(CellType::morphogen_affinity)
    {
        out[morphogen.index()] = weight;
    }
    out
}

/// Borrowed view over simulation state used to price a single copy.
pub struct EnergyModel<'a> {
    pub lattice: &'a Lattice,
    pub cells: &'a [Cell],
    pub field: &'a MorphogenField,
    pub adhesion: &'a AdhesionTable,
    /// Volume constraint strength.
    pub lambda: f64,
    /// Morphogen coupling strength.
    pub coupling: f64,
}

impl EnergyModel<'_> {
    /// Energy change if `site` were handed to `candidate`.
    #[must_use]
    pub fn delta_energy(&self, site: usize, candidate: CellId) -> f64 {
        let current = self.lattice.owner(site);
        if current == candidate {
            return 0.0;
        }
        let current_slot = type_slot(current, self.cells);
        let candidate_slot = type_slot(candidate, self.cells);

        self.adhesion_delta(site, current, current_slot, candidate, candidate_slot)
            + self.volume_delta(current, candidate)
            + self.coupling_delta(site, current_slot, candidate_slot)
    }

    fn adhesion_delta(
        &self,
        site: usize,
        current: CellId,
        current_slot: usize,
        candidate: CellId,
        candidate_slot: usize,
    ) -> f64 {
        let mut delta = 0.0;
        for neighbour in self.lattice.neighbour_owners(site) {
            let slot = type_slot(neighbour, self.cells);
            if candidate != neighbour {
                delta += self.adhesion.get(candidate_slot, slot);
            }
            if current != neighbour {
                delta -= self.adhesion.get(current_slot, slot);
            }
        }
        delta
    }

    fn volume_delta(&self, loser: CellId, gainer: CellId) -> f64 {
        let term = |id: CellId, change: f64| {
            if id == MEDIUM {
                return 0.0;
            }
            let cell = &self.cells[Cell::slot(id)];
            let dev = f64::from(cell.volume) - cell.target_volume;
            self.lambda * ((dev + change).powi(2) - dev.powi(2))
        };
        term(loser, -1.0) + term(gainer, 1.0)
    }

    fn coupling_delta(&self, site: usize, current_slot: usize, candidate_slot: usize) -> f64 {
        if self.coupling == 0.0 {
            return 0.0;
        }
        let before = affinity(current_slot);
        let after = affinity(candidate_slot);
        let gain: f64 = Morphogen::ALL
            .iter()
            .map(|&m| {
                let c = f64::from(self.field.concentration(m, site));
                c * (after[m.index()] - before[m.index()])
            })
            .sum();
        -self.coupling * gain
    }
}
