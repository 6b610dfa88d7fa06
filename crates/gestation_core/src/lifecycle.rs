//! Ageing, target-volume growth and division.
//!
//! Division is the only way the cell count rises. A dividing cell splits its
//! sites at the centroid along the longer side of its bounding box; the
//! daughter takes the far half with a fresh id.

use gestation_data::{Cell, CellId, CellType, MEDIUM};
use rand::Rng;

use crate::config::CellConfig;
use crate::lattice::Lattice;

/// A completed division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Division {
    pub parent: CellId,
    pub daughter: CellId,
    pub daughter_volume: u32,
}

#[inline]
fn grows(cell: &Cell) -> bool {
    cell.cell_type != CellType::Placenta
}

/// Volume at which cells become eligible to split.
#[must_use]
pub fn division_volume(config: &CellConfig) -> f64 {
    2.0 * f64::from(config.base_volume)
}

/// Ages every growing cell by one tick and raises its target volume.
pub fn grow(cells: &mut [Cell], config: &CellConfig, growth_rate: f64) {
    let cap = division_volume(config);
    let step = growth_rate * config.growth_step;
    for cell in cells.iter_mut().filter(|c| grows(c)) {
        cell.age += 1;
        cell.target_volume = (cell.target_volume + step).min(cap);
    }
}

/// Whether a cell satisfies the size and age conditions for division.
#[must_use]
pub fn ready_to_divide(cell: &Cell, config: &CellConfig) -> bool {
    grows(cell)
        && cell.age >= config.division_min_age
        && cell.target_volume >= division_volume(config)
        && f64::from(cell.volume) >= cell.target_volume - 1.0
}

/// Draws division events and performs the splits.
///
/// Candidates are drawn in id order so the random stream is consumed
/// deterministically. Splits that would leave an empty half are skipped.
pub fn divide<R: Rng>(
    lattice: &mut Lattice,
    cells: &mut Vec<Cell>,
    config: &CellConfig,
    growth_rate: f64,
    tick: u64,
    rng: &mut R,
) -> Vec<Division> {
    let probability = growth_rate.min(1.0);
    let chosen: Vec<CellId> = cells
        .iter()
        .filter(|c| ready_to_divide(c, config))
        .filter(|c| c.volume >= config.min_division_volume)
        .filter(|_| rng.gen::<f64>() < probability)
        .map(|c| c.id)
        .collect();
    if chosen.is_empty() {
        return Vec::new();
    }

    // slot -> position in `chosen`, filled from one lattice scan
    let mut lookup = vec![usize::MAX; cells.len()];
    for (i, &id) in chosen.iter().enumerate() {
        lookup[Cell::slot(id)] = i;
    }
    let mut sites: Vec<Vec<usize>> = vec![Vec::new(); chosen.len()];
    for (idx, &owner) in lattice.owners().iter().enumerate() {
        if owner != MEDIUM {
            let pos = lookup[Cell::slot(owner)];
            if pos != usize::MAX {
                sites[pos].push(idx);
            }
        }
    }

    let mut divisions = Vec::with_capacity(chosen.len());
    for (parent, parent_sites) in chosen.into_iter().zip(sites) {
        let Some(far_half) = split(lattice, &parent_sites) else {
            tracing::trace!(cell = parent, "Division skipped: unsplittable region");
            continue;
        };
        let daughter_id = cells.len() as CellId + 1;
        let parent_cell = &mut cells[Cell::slot(parent)];
        let moved = far_half.len() as u32;
        parent_cell.volume -= moved;
        parent_cell.target_volume /= 2.0;
        parent_cell.age = 0;

        let mut daughter = Cell::new(
            daughter_id,
            parent_cell.cell_type,
            parent_cell.target_volume,
            tick,
        );
        daughter.volume = moved;
        for idx in far_half {
            lattice.assign(idx, daughter_id);
        }
        cells.push(daughter);
        divisions.push(Division {
            parent,
            daughter: daughter_id,
            daughter_volume: moved,
        });
    }
    divisions
}

/// Sites beyond the centroid along the longer bounding-box axis.
///
/// Returns `None` when either half would be empty.
fn split(lattice: &Lattice, sites: &[usize]) -> Option<Vec<usize>> {
    if sites.len() < 2 {
        return None;
    }
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (usize::MAX, 0, usize::MAX, 0);
    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    for &idx in sites {
        let (x, y) = lattice.coords(idx);
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
        sum_x += x as f64;
        sum_y += y as f64;
    }
    let n = sites.len() as f64;
    let horizontal = max_x - min_x >= max_y - min_y;
    let (cx, cy) = (sum_x / n, sum_y / n);

    let far: Vec<usize> = sites
        .iter()
        .copied()
        .filter(|&idx| {
            let (x, y) = lattice.coords(idx);
            if horizontal {
                x as f64 > cx
            } else {
                y as f64 > cy
            }
        })
        .collect();
    (!far.is_empty() && far.len() < sites.len()).then_some(far)
}
