//! The owned simulation state and its control surface.

use std::time::Instant;

use gestation_data::{Cell, CellId, DevelopmentalStage, Morphogen, MEDIUM};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::body_plan::BodyPlan;
use crate::census::{self, Census};
use crate::config::{SimulationConfig, SimulationParams};
use crate::differentiation;
use crate::energy::AdhesionTable;
use crate::error::{EngineError, Result};
use crate::lattice::Lattice;
use crate::lifecycle;
use crate::metrics::{DevelopmentMetrics, EngineCounters, MetricsInput, SpeedWindow};
use crate::monte_carlo::{MonteCarlo, SweepParams};
use crate::morphogen::MorphogenField;
use crate::organs::OrganTracker;
use crate::seeding::{self, SeedBlock};
use crate::snapshot::Snapshot;

/// Grid, cells, morphogen field and bookkeeping for one run.
///
/// All randomness comes from a single `ChaCha8Rng` seeded from
/// `params.seed`, so the same configuration replays the same trajectory.
pub struct Simulation {
    config: SimulationConfig,
    layout: Option<Vec<SeedBlock>>,
    lattice: Lattice,
    cells: Vec<Cell>,
    field: MorphogenField,
    adhesion: AdhesionTable,
    stepper: MonteCarlo,
    organs: OrganTracker,
    speed_window: SpeedWindow,
    metrics: DevelopmentMetrics,
    counters: EngineCounters,
    rng: ChaCha8Rng,
    tick: u64,
    speed: u32,
}

impl Simulation {
    /// Builds a run with the default seeded layout.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Builds a run from caller-supplied blocks instead of the default layout.
    /// The layout is kept and replanted on every reset.
    pub fn from_layout(config: SimulationConfig, blocks: &[SeedBlock]) -> Result<Self> {
        Self::build(config, Some(blocks.to_vec()))
    }

    fn build(config: SimulationConfig, layout: Option<Vec<SeedBlock>>) -> Result<Self> {
        config.validate()?;
        let (width, height) = config.params.grid_size;
        let mut rng = ChaCha8Rng::seed_from_u64(config.params.seed);

        let blocks = match &layout {
            Some(blocks) => blocks.clone(),
            None => seeding::default_layout(&config, &mut rng),
        };
        let mut lattice = Lattice::new(width, height);
        let cells = seeding::plant(&mut lattice, &blocks)?;
        if cells.is_empty() {
            return Err(EngineError::invalid("layout", "no cells fit on the grid"));
        }

        let field = MorphogenField::new(
            width,
            height,
            config.params.morphogen_diffusion,
            &config.morphogen,
        );
        let mut sim = Self {
            adhesion: AdhesionTable::new(config.params.adhesion),
            organs: OrganTracker::new(config.organs.threshold_sites),
            speed_window: SpeedWindow::new(config.metrics.speed_window),
            stepper: MonteCarlo::new(),
            metrics: DevelopmentMetrics::default(),
            counters: EngineCounters::new(),
            config,
            layout,
            lattice,
            cells,
            field,
            rng,
            tick: 0,
            speed: 1,
        };
        let census = Census::collect(&sim.lattice, &sim.cells);
        census.apply_centroids(&mut sim.cells);
        sim.refresh_metrics(&census);

        tracing::info!(
            fingerprint = %sim.config.fingerprint(),
            width,
            height,
            cells = sim.cells.len(),
            sites = sim.lattice.occupied(),
            "Simulation reset"
        );
        Ok(sim)
    }

    /// Reinitialises every piece of state with new run parameters.
    ///
    /// The parameters are validated first; on error the current run is left
    /// exactly as it was.
    pub fn reset(&mut self, params: SimulationParams) -> Result<()> {
        let config = self.config.with_params(params);
        self.reset_with_config(config)
    }

    /// Like [`Simulation::reset`] but replaces every configuration section.
    pub fn reset_with_config(&mut self, config: SimulationConfig) -> Result<()> {
        match Self::build(config, self.layout.clone()) {
            Ok(next) => {
                let speed = self.speed;
                *self = next;
                self.speed = speed;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Reset rejected; keeping current run");
                Err(err)
            }
        }
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// # Panics
    ///
    /// Panics if internal bookkeeping no longer matches the lattice. The
    /// violation is logged with the tick and cell id first.
    pub fn step(&mut self) {
        let started = Instant::now();
        let tick = self.tick + 1;
        let week = self.week_of(tick);
        let growth_rate = self.config.params.growth_rate;
        let sweep_params = SweepParams {
            temperature: self.config.params.temperature,
            proposals_per_site: self.config.lattice.proposals_per_site,
            lambda: self.config.cells.volume_constraint,
            coupling: self.config.morphogen.coupling,
        };

        let sweep = self.stepper.sweep(
            &mut self.lattice,
            &mut self.cells,
            &self.field,
            &self.adhesion,
            &sweep_params,
            &mut self.rng,
        );

        lifecycle::grow(&mut self.cells, &self.config.cells, growth_rate);
        let divisions = lifecycle::divide(
            &mut self.lattice,
            &mut self.cells,
            &self.config.cells,
            growth_rate,
            tick,
            &mut self.rng,
        );
        for d in &divisions {
            tracing::debug!(
                tick,
                parent = d.parent,
                daughter = d.daughter,
                volume = d.daughter_volume,
                "Cell divided"
            );
        }

        self.queue_secretion();
        self.field.diffuse_step();

        let census = Census::collect(&self.lattice, &self.cells);
        census.apply_centroids(&mut self.cells);
        let plan = BodyPlan::for_week(week, self.lattice.width(), self.lattice.height());
        let transitions = differentiation::differentiate(
            &mut self.cells,
            &census,
            &self.field,
            &plan,
            week,
            self.config.params.differentiation_rate,
            &self.config.differentiation,
            &mut self.rng,
        );
        for t in &transitions {
            tracing::trace!(tick, cell = t.cell, from = %t.from, to = %t.to, "Cell differentiated");
        }

        let previous_stage = DevelopmentalStage::from_week(self.week());
        self.tick = tick;
        self.refresh_metrics(&census);

        if let Err(err) = self.check_invariants(tick) {
            if let EngineError::InvariantViolation { tick, cell_id, .. } = &err {
                tracing::error!(tick, cell = cell_id, error = %err, "Invariant violation");
            }
            panic!("{err}");
        }

        let stage = DevelopmentalStage::from_week(week);
        if stage != previous_stage {
            tracing::info!(week, stage = %stage, "Stage entered");
        }
        let week_closed = tick % u64::from(self.config.lattice.ticks_per_week) == 0;
        self.counters.record_tick(
            started.elapsed(),
            &sweep,
            divisions.len(),
            transitions.len(),
            &self.metrics,
            week_closed,
        );
    }

    /// Runs `n` ticks.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    fn queue_secretion(&mut self) {
        let rate = self.config.morphogen.secretion_rate;
        let producers: Vec<(CellId, Morphogen)> = self
            .cells
            .iter()
            .filter_map(|c| c.producer.map(|m| (c.id, m)))
            .collect();
        if producers.is_empty() || rate <= 0.0 {
            return;
        }
        for (idx, &owner) in self.lattice.owners().iter().enumerate() {
            if owner == MEDIUM {
                continue;
            }
            if let Some(&(_, morphogen)) = producers.iter().find(|(id, _)| *id == owner) {
                self.field.inject(idx, morphogen, rate);
            }
        }
    }

    fn refresh_metrics(&mut self, census: &Census) {
        let (type_sites, _) = DevelopmentMetrics::populations(&self.cells);
        for organ in self.organs.update(&type_sites, self.tick) {
            tracing::info!(organ = %organ, tick = self.tick, week = self.week(), "Organ developed");
        }
        self.metrics = DevelopmentMetrics::compute(
            MetricsInput {
                tick: self.tick,
                week: self.week(),
                cells: &self.cells,
                census,
                occupied: self.lattice.occupied(),
                heterotypic_boundaries: census::heterotypic_boundaries(&self.lattice, &self.cells),
                developed_organs: self.organs.developed(),
            },
            &mut self.speed_window,
        );
    }

    /// Cheap per-tick audit; the full recount also runs in debug builds.
    fn check_invariants(&self, tick: u64) -> Result<()> {
        let total: u64 = self.cells.iter().map(|c| u64::from(c.volume)).sum();
        if total != self.lattice.occupied() as u64 {
            return Err(EngineError::invariant(
                tick,
                MEDIUM,
                format!(
                    "sum of volumes {total} != occupied sites {}",
                    self.lattice.occupied()
                ),
            ));
        }
        if let Some(cell) = self.cells.iter().find(|c| c.volume == 0) {
            return Err(EngineError::invariant(tick, cell.id, "cell lost every site"));
        }
        if cfg!(debug_assertions) {
            self.audit(tick)?;
        }
        Ok(())
    }

    /// Full recount of volumes, occupancy and field bounds.
    pub fn verify_invariants(&self) -> Result<()> {
        self.check_invariants(self.tick)?;
        self.audit(self.tick)
    }

    fn audit(&self, tick: u64) -> Result<()> {
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.id as usize != i + 1 {
                return Err(EngineError::invariant(tick, cell.id, "cell table out of order"));
            }
        }

        let mut volumes = vec![0u32; self.cells.len()];
        for &owner in self.lattice.owners() {
            if owner == MEDIUM {
                continue;
            }
            match volumes.get_mut(Cell::slot(owner)) {
                Some(v) => *v += 1,
                None => {
                    return Err(EngineError::invariant(tick, owner, "site owned by unknown cell"))
                }
            }
        }
        for (cell, &counted) in self.cells.iter().zip(&volumes) {
            if cell.volume != counted {
                return Err(EngineError::invariant(
                    tick,
                    cell.id,
                    format!("volume {} but lattice holds {counted}", cell.volume),
                ));
            }
        }
        if self.lattice.recount_occupied() != self.lattice.occupied() {
            return Err(EngineError::invariant(tick, MEDIUM, "occupied counter drifted"));
        }

        let (lo, hi) = self.field.bounds();
        if lo < 0.0 || hi > self.field.max_concentration() {
            return Err(EngineError::invariant(
                tick,
                MEDIUM,
                format!("morphogen out of bounds: [{lo}, {hi}]"),
            ));
        }
        Ok(())
    }

    /// Read-only view for hosts.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.tick,
            week: self.week(),
            stage: self.stage(),
            width: self.lattice.width(),
            height: self.lattice.height(),
            grid: self.lattice.owners(),
            cells: &self.cells,
            morphogens: &self.field,
            organs: &self.organs,
            metrics: &self.metrics,
        }
    }

    /// SHA-256 over the tick counter, grid, cell table and field.
    #[must_use]
    pub fn state_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.tick.to_le_bytes());
        for &owner in self.lattice.owners() {
            hasher.update(owner.to_le_bytes());
        }
        for cell in &self.cells {
            hasher.update(cell.id.to_le_bytes());
            hasher.update([cell.cell_type.index() as u8]);
            hasher.update(cell.age.to_le_bytes());
            hasher.update(cell.target_volume.to_bits().to_le_bytes());
            hasher.update(cell.volume.to_le_bytes());
            hasher.update([cell.producer.map_or(u8::MAX, |m| m.index() as u8)]);
        }
        for m in Morphogen::ALL {
            for v in self.field.layer(m) {
                hasher.update(v.to_bits().to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }

    /// Week of a 1-based tick number, clamped to the final week.
    fn week_of(&self, tick: u64) -> u32 {
        let per_week = u64::from(self.config.lattice.ticks_per_week);
        let week = tick.saturating_sub(1) / per_week + 1;
        week.min(u64::from(self.config.params.total_weeks)) as u32
    }

    /// Week of the most recently completed tick (week 1 before any step).
    #[must_use]
    pub fn week(&self) -> u32 {
        self.week_of(self.tick)
    }

    #[must_use]
    pub fn stage(&self) -> DevelopmentalStage {
        DevelopmentalStage::from_week(self.week())
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// True once every tick of the final week has run. Further steps keep
    /// working with the week clamped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tick >= self.config.total_ticks()
    }

    /// Stores the host's steps-per-frame preference. Not read by the engine.
    pub fn set_speed(&mut self, multiplier: u32) {
        self.speed = multiplier.max(1);
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn params(&self) -> &SimulationParams {
        &self.config.params
    }

    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn field(&self) -> &MorphogenField {
        &self.field
    }

    #[must_use]
    pub fn metrics(&self) -> &DevelopmentMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn organs(&self) -> &OrganTracker {
        &self.organs
    }

    #[must_use]
    pub fn counters(&self) -> &EngineCounters {
        &self.counters
    }
}
