//! Developmental metrics and engine counters.
//!
//! `DevelopmentMetrics` is the read-only aggregate hosts consume after each
//! tick. `EngineCounters` tracks sweep and lifecycle throughput and emits a
//! structured log summary once per simulated week.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use gestation_data::{Cell, CellType, DevelopmentalStage, Organ};
use serde::Serialize;

use crate::census::Census;
use crate::monte_carlo::SweepStats;

/// Aggregates computed after every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DevelopmentMetrics {
    pub tick: u64,
    pub week: u32,
    pub stage: DevelopmentalStage,
    /// Occupied lattice sites.
    pub total_cell_count: usize,
    /// Live cell records.
    pub cell_count: usize,
    pub organs_developed: usize,
    pub developed_organs: Vec<Organ>,
    /// Change in distinct terminal types present per tick over the trailing window.
    pub differentiation_speed: f64,
    /// RMS distance of occupied sites from the grid centre.
    pub spatial_spread: f64,
    /// Distinct types with at least one cell.
    pub cell_type_diversity: usize,
    pub heterotypic_boundaries: u64,
    pub type_sites: [u32; CellType::COUNT],
    pub type_cells: [u32; CellType::COUNT],
}

impl DevelopmentMetrics {
    /// Site and cell populations per type.
    #[must_use]
    pub fn populations(cells: &[Cell]) -> ([u32; CellType::COUNT], [u32; CellType::COUNT]) {
        let mut sites = [0u32; CellType::COUNT];
        let mut counts = [0u32; CellType::COUNT];
        for cell in cells {
            sites[cell.cell_type.index()] += cell.volume;
            counts[cell.cell_type.index()] += 1;
        }
        (sites, counts)
    }

    /// Distinct terminal embryonic types with at least one cell. Placenta
    /// is seeded terminal and never counts.
    #[must_use]
    pub fn terminal_types(type_cells: &[u32; CellType::COUNT]) -> usize {
        CellType::ALL
            .iter()
            .filter(|&&t| t != CellType::Placenta && t.is_terminal())
            .filter(|t| type_cells[t.index()] > 0)
            .count()
    }

    #[must_use]
    pub fn sites_of(&self, cell_type: CellType) -> u32 {
        self.type_sites[cell_type.index()]
    }

    #[must_use]
    pub fn cells_of(&self, cell_type: CellType) -> u32 {
        self.type_cells[cell_type.index()]
    }
}

/// Inputs gathered by the simulation for one metrics pass.
pub struct MetricsInput<'a> {
    pub tick: u64,
    pub week: u32,
    pub cells: &'a [Cell],
    pub census: &'a Census,
    pub occupied: usize,
    pub heterotypic_boundaries: u64,
    pub developed_organs: Vec<Organ>,
}

/// Trailing history of terminal-type counts.
#[derive(Debug, Clone)]
pub struct SpeedWindow {
    window: usize,
    history: VecDeque<usize>,
}

impl SpeedWindow {
    #[must_use]
    pub fn new(window: u64) -> Self {
        let window = window.max(1) as usize;
        Self {
            window,
            history: VecDeque::with_capacity(window + 1),
        }
    }

    /// Pushes the latest count and returns the per-tick rate over the window.
    pub fn push(&mut self, terminal_types: usize) -> f64 {
        self.history.push_back(terminal_types);
        while self.history.len() > self.window + 1 {
            self.history.pop_front();
        }
        let span = self.history.len() - 1;
        match (self.history.front(), span) {
            (Some(&oldest), s) if s > 0 => (terminal_types as f64 - oldest as f64) / s as f64,
            _ => 0.0,
        }
    }
}

impl DevelopmentMetrics {
    #[must_use]
    pub fn compute(input: MetricsInput<'_>, speed: &mut SpeedWindow) -> Self {
        let (type_sites, type_cells) = Self::populations(input.cells);
        let diversity = type_cells.iter().filter(|&&n| n > 0).count();
        let differentiation_speed = speed.push(Self::terminal_types(&type_cells));
        Self {
            tick: input.tick,
            week: input.week,
            stage: DevelopmentalStage::from_week(input.week),
            total_cell_count: input.occupied,
            cell_count: input.cells.len(),
            organs_developed: input.developed_organs.len(),
            developed_organs: input.developed_organs,
            differentiation_speed,
            spatial_spread: input.census.spatial_spread(),
            cell_type_diversity: diversity,
            heterotypic_boundaries: input.heterotypic_boundaries,
            type_sites,
            type_cells,
        }
    }
}

/// Throughput counters for one run.
#[derive(Debug)]
pub struct EngineCounters {
    ticks: u64,
    attempts: u64,
    accepted: u64,
    divisions: u64,
    differentiations: u64,
    week_busy: Duration,
    start_time: Instant,
}

impl Default for EngineCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCounters {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks: 0,
            attempts: 0,
            accepted: 0,
            divisions: 0,
            differentiations: 0,
            week_busy: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick. Logs a summary when `week_closed` is set.
    pub fn record_tick(
        &mut self,
        duration: Duration,
        sweep: &SweepStats,
        divisions: usize,
        differentiations: usize,
        metrics: &DevelopmentMetrics,
        week_closed: bool,
    ) {
        self.ticks += 1;
        self.attempts += sweep.attempts;
        self.accepted += sweep.accepted;
        self.divisions += divisions as u64;
        self.differentiations += differentiations as u64;
        self.week_busy += duration;

        if week_closed {
            tracing::info!(
                tick = metrics.tick,
                week = metrics.week,
                sites = metrics.total_cell_count,
                cells = metrics.cell_count,
                organs = metrics.organs_developed,
                acceptance = self.acceptance_ratio(),
                week_ms = self.week_busy.as_millis() as u64,
                "Week complete"
            );
            self.week_busy = Duration::ZERO;
        }
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn divisions(&self) -> u64 {
        self.divisions
    }

    #[must_use]
    pub fn differentiations(&self) -> u64 {
        self.differentiations
    }

    /// Fraction of copy attempts accepted so far.
    #[must_use]
    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempts as f64
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_window_rate() {
        let mut w = SpeedWindow::new(3);
        assert_eq!(w.push(1), 0.0);
        assert_eq!(w.push(2), 1.0);
        assert_eq!(w.push(2), 0.5);
        assert!((w.push(4) - 1.0).abs() < 1e-12);
        // Oldest sample (1) falls out of the window.
        assert!((w.push(4) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_populations() {
        let mut a = Cell::new(1, CellType::Heart, 4.0, 0);
        a.volume = 5;
        let mut b = Cell::new(2, CellType::Heart, 4.0, 0);
        b.volume = 3;
        let (sites, cells) = DevelopmentMetrics::populations(&[a, b]);
        assert_eq!(sites[CellType::Heart.index()], 8);
        assert_eq!(cells[CellType::Heart.index()], 2);
        assert_eq!(DevelopmentMetrics::terminal_types(&cells), 1);
    }

    #[test]
    fn test_placenta_does_not_count_towards_speed() {
        let mut cells = [0; CellType::COUNT];
        cells[CellType::Placenta.index()] = 40;
        assert_eq!(DevelopmentMetrics::terminal_types(&cells), 0);
        cells[CellType::Brain.index()] = 1;
        assert_eq!(DevelopmentMetrics::terminal_types(&cells), 1);

        let mut window = SpeedWindow::new(4);
        window.push(DevelopmentMetrics::terminal_types(&[0; CellType::COUNT]));
        assert_eq!(window.push(DevelopmentMetrics::terminal_types(&cells)), 1.0);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        tracing::info!("logging initialised");
    }

    #[test]
    fn test_record_tick() {
        let mut counters = EngineCounters::new();
        let sweep = SweepStats {
            attempts: 10,
            accepted: 4,
            ..Default::default()
        };
        counters.record_tick(
            Duration::from_millis(3),
            &sweep,
            1,
            2,
            &DevelopmentMetrics::default(),
            true,
        );
        assert_eq!(counters.ticks(), 1);
        assert_eq!(counters.divisions(), 1);
        assert_eq!(counters.differentiations(), 2);
        assert!((counters.acceptance_ratio() - 0.4).abs() < 1e-12);
    }
}
