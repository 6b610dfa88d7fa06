//! Site ownership grid.

use gestation_data::{CellId, MEDIUM};
use serde::Serialize;

/// Offsets of the von Neumann neighbourhood: up, down, left, right.
const NEIGHBOUR_OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Fixed-size grid of site owners with an incrementally maintained
/// count of non-medium sites.
#[derive(Debug, Clone, Serialize)]
pub struct Lattice {
    width: usize,
    height: usize,
    owners: Vec<CellId>,
    #[serde(skip)]
    occupied: usize,
}

impl Lattice {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            owners: vec![MEDIUM; width * height],
            occupied: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Number of sites owned by a cell.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline(always)]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline(always)]
    #[must_use]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    #[inline(always)]
    #[must_use]
    pub fn owner(&self, idx: usize) -> CellId {
        self.owners[idx]
    }

    #[must_use]
    pub fn owner_at(&self, x: usize, y: usize) -> CellId {
        self.owners[self.index(x, y)]
    }

    #[must_use]
    pub fn owners(&self) -> &[CellId] {
        &self.owners
    }

    /// On-grid von Neumann neighbours of `idx`; `None` marks an off-grid slot.
    #[inline]
    #[must_use]
    pub fn neighbours(&self, idx: usize) -> [Option<usize>; 4] {
        let (x, y) = self.coords(idx);
        let mut out = [None; 4];
        for (slot, (dx, dy)) in NEIGHBOUR_OFFSETS.iter().enumerate() {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height {
                out[slot] = Some(self.index(nx as usize, ny as usize));
            }
        }
        out
    }

    /// Owner of each neighbour, with off-grid slots reading as medium.
    #[inline]
    #[must_use]
    pub fn neighbour_owners(&self, idx: usize) -> [CellId; 4] {
        self.neighbours(idx)
            .map(|n| n.map_or(MEDIUM, |n| self.owners[n]))
    }

    /// Sets the owner of a site and returns the previous one.
    pub fn assign(&mut self, idx: usize, owner: CellId) -> CellId {
        let previous = std::mem::replace(&mut self.owners[idx], owner);
        match (previous == MEDIUM, owner == MEDIUM) {
            (true, false) => self.occupied += 1,
            (false, true) => self.occupied -= 1,
            _ => {}
        }
        previous
    }

    /// Fills `out` with the indices of every occupied site, in scan order.
    pub fn collect_occupied(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            self.owners
                .iter()
                .enumerate()
                .filter_map(|(idx, &owner)| (owner != MEDIUM).then_some(idx)),
        );
    }

    /// Counts occupied sites from scratch.
    #[must_use]
    pub fn recount_occupied(&self) -> usize {
        self.owners.iter().filter(|&&owner| owner != MEDIUM).count()
    }
}
