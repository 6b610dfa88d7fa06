//! Metropolis sweep over occupied sites.

use gestation_data::{Cell, CellId, CellType, MEDIUM};
use rand::Rng;

use crate::energy::{AdhesionTable, EnergyModel};
use crate::lattice::Lattice;
use crate::morphogen::MorphogenField;

/// Outcome tallies for one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub attempts: u64,
    pub accepted: u64,
    /// Picked site had no neighbour with a different owner.
    pub no_ops: u64,
    /// Rejected before evaluation (empty loser or frozen interface).
    pub vetoed: u64,
}

/// Sweep coefficients, fixed for the run.
#[derive(Debug, Clone, Copy)]
pub struct SweepParams {
    pub temperature: f64,
    pub proposals_per_site: f64,
    pub lambda: f64,
    pub coupling: f64,
}

/// A proposed copy: `site` would be handed to `candidate`, taking it from `loser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub site: usize,
    pub candidate: CellId,
    pub loser: CellId,
}

/// Metropolis stepper. Owns the reusable list of sites sampled per sweep.
#[derive(Debug, Default)]
pub struct MonteCarlo {
    sites: Vec<usize>,
}

impl MonteCarlo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `ceil(proposals_per_site * occupied)` copy attempts.
    ///
    /// The occupied-site list is captured once at the start; sites claimed
    /// during the sweep are first sampled on the next one.
    pub fn sweep<R: Rng>(
        &mut self,
        lattice: &mut Lattice,
        cells: &mut [Cell],
        field: &MorphogenField,
        adhesion: &AdhesionTable,
        params: &SweepParams,
        rng: &mut R,
    ) -> SweepStats {
        lattice.collect_occupied(&mut self.sites);
        let mut stats = SweepStats::default();
        if self.sites.is_empty() {
            return stats;
        }

        let attempts = (params.proposals_per_site * self.sites.len() as f64).ceil() as u64;
        for _ in 0..attempts {
            stats.attempts += 1;
            let a = self.sites[rng.gen_range(0..self.sites.len())];
            let Some(proposal) = propose(lattice, a, rng) else {
                stats.no_ops += 1;
                continue;
            };
            if vetoed(&proposal, cells) {
                stats.vetoed += 1;
                continue;
            }

            let dh = EnergyModel {
                lattice: &*lattice,
                cells: &*cells,
                field,
                adhesion,
                lambda: params.lambda,
                coupling: params.coupling,
            }
            .delta_energy(proposal.site, proposal.candidate);

            if metropolis(dh, params.temperature, rng) {
                apply(lattice, cells, &proposal);
                stats.accepted += 1;
            }
        }
        stats
    }
}

/// Picks a differently-owned on-grid neighbour of occupied site `a`.
///
/// A medium neighbour turns the proposal into an extension of `a`'s owner;
/// otherwise `a` itself is offered to the neighbour's owner.
fn propose<R: Rng>(lattice: &Lattice, a: usize, rng: &mut R) -> Option<Proposal> {
    let owner = lattice.owner(a);
    let mut options = [0usize; 4];
    let mut count = 0;
    for n in lattice.neighbours(a).into_iter().flatten() {
        if lattice.owner(n) != owner {
            options[count] = n;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    let b = options[rng.gen_range(0..count)];
    let neighbour = lattice.owner(b);
    Some(if neighbour == MEDIUM {
        Proposal {
            site: b,
            candidate: owner,
            loser: MEDIUM,
        }
    } else {
        Proposal {
            site: a,
            candidate: neighbour,
            loser: owner,
        }
    })
}

/// Proposals rejected without pricing.
fn vetoed(proposal: &Proposal, cells: &[Cell]) -> bool {
    if proposal.loser == MEDIUM {
        return false;
    }
    let loser = &cells[Cell::slot(proposal.loser)];
    if loser.volume <= 1 {
        return true;
    }
    let gainer = &cells[Cell::slot(proposal.candidate)];
    (loser.cell_type == CellType::Placenta) != (gainer.cell_type == CellType::Placenta)
}

/// Metropolis criterion.
#[inline]
pub fn metropolis<R: Rng>(dh: f64, temperature: f64, rng: &mut R) -> bool {
    dh <= 0.0 || rng.gen::<f64>() < (-dh / temperature).exp()
}

fn apply(lattice: &mut Lattice, cells: &mut [Cell], proposal: &Proposal) {
    let previous = lattice.assign(proposal.site, proposal.candidate);
    debug_assert_eq!(previous, proposal.loser);
    if proposal.loser != MEDIUM {
        cells[Cell::slot(proposal.loser)].volume -= 1;
    }
    cells[Cell::slot(proposal.candidate)].volume += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MorphogenConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_cell(width: usize, height: usize, target: f64) -> (Lattice, Vec<Cell>) {
        let mut lattice = Lattice::new(width, height);
        let centre = lattice.index(width / 2, height / 2);
        lattice.assign(centre, 1);
        let mut cell = Cell::new(1, CellType::Undifferentiated, target, 0);
        cell.volume = 1;
        (lattice, vec![cell])
    }

    fn params(temperature: f64) -> SweepParams {
        SweepParams {
            temperature,
            proposals_per_site: 1.0,
            lambda: 1.0,
            coupling: 0.0,
        }
    }

    #[test]
    fn test_metropolis_always_accepts_downhill() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(metropolis(-1.0, 0.5, &mut rng));
            assert!(metropolis(0.0, 0.5, &mut rng));
        }
    }

    #[test]
    fn test_metropolis_rarely_accepts_steep_uphill() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let accepted = (0..1000).filter(|_| metropolis(50.0, 1.0, &mut rng)).count();
        assert_eq!(accepted, 0);
    }

    #[test]
    fn test_growing_cell_extends_into_medium() {
        let (mut lattice, mut cells) = single_cell(15, 15, 20.0);
        let field = MorphogenField::new(15, 15, 0.6, &MorphogenConfig::default());
        let adhesion = AdhesionTable::new(1.0);
        let mut mc = MonteCarlo::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..30 {
            mc.sweep(&mut lattice, &mut cells, &field, &adhesion, &params(10.0), &mut rng);
        }
        assert!(cells[0].volume > 1);
        assert_eq!(lattice.occupied(), cells[0].volume as usize);
        assert_eq!(lattice.recount_occupied(), lattice.occupied());
    }

    #[test]
    fn test_isolated_site_is_no_op_when_surrounded_by_itself() {
        let mut lattice = Lattice::new(3, 3);
        for idx in 0..lattice.len() {
            lattice.assign(idx, 1);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(propose(&lattice, 4, &mut rng).is_none());
    }

    #[test]
    fn test_frozen_placenta_interface() {
        let mut placenta = Cell::new(1, CellType::Placenta, 9.0, 0);
        placenta.volume = 9;
        let mut embryo = Cell::new(2, CellType::Undifferentiated, 9.0, 0);
        embryo.volume = 9;
        let cells = vec![placenta, embryo];
        let proposal = Proposal {
            site: 0,
            candidate: 2,
            loser: 1,
        };
        assert!(vetoed(&proposal, &cells));
        let extension = Proposal {
            site: 0,
            candidate: 1,
            loser: MEDIUM,
        };
        assert!(!vetoed(&extension, &cells));
    }

    #[test]
    fn test_last_site_is_never_taken() {
        let mut a = Cell::new(1, CellType::Heart, 4.0, 0);
        a.volume = 1;
        let mut b = Cell::new(2, CellType::Heart, 4.0, 0);
        b.volume = 4;
        let proposal = Proposal {
            site: 0,
            candidate: 2,
            loser: 1,
        };
        assert!(vetoed(&proposal, &[a, b]));
    }
}
