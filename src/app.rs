//! Headless host: loads a configuration, drives the engine week by week and
//! reports one metrics record per simulated week.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::config::SimulationConfig;
use crate::model::state::{milestone, DevelopmentalStage, Organ};
use crate::model::Simulation;

/// Output encoding for weekly reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Metrics emitted at the end of every simulated week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekReport {
    pub week: u32,
    pub tick: u64,
    pub stage: DevelopmentalStage,
    pub total_cell_count: usize,
    pub cell_count: usize,
    pub organs_developed: usize,
    pub developed_organs: Vec<Organ>,
    pub cell_type_diversity: usize,
    pub spatial_spread: f64,
    pub differentiation_speed: f64,
    pub heterotypic_boundaries: u64,
    pub milestone: &'static str,
}

impl WeekReport {
    #[must_use]
    pub fn from_simulation(sim: &Simulation) -> Self {
        let m = sim.metrics();
        Self {
            week: m.week,
            tick: m.tick,
            stage: m.stage,
            total_cell_count: m.total_cell_count,
            cell_count: m.cell_count,
            organs_developed: m.organs_developed,
            developed_organs: m.developed_organs.clone(),
            cell_type_diversity: m.cell_type_diversity,
            spatial_spread: m.spatial_spread,
            differentiation_speed: m.differentiation_speed,
            heterotypic_boundaries: m.heterotypic_boundaries,
            milestone: milestone(m.week),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Json => serde_json::to_string(self)?,
            OutputFormat::Text => {
                let organs: Vec<&str> = self.developed_organs.iter().map(|o| o.name()).collect();
                format!(
                    "week {:>2} | {:<28} | sites {:>6} | cells {:>5} | organs {:>2} [{}] | diversity {:>2} | spread {:>6.2}",
                    self.week,
                    self.stage.to_string(),
                    self.total_cell_count,
                    self.cell_count,
                    self.organs_developed,
                    organs.join(", "),
                    self.cell_type_diversity,
                    self.spatial_spread,
                )
            }
        })
    }
}

/// Loads a TOML configuration. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Config file not found; using defaults");
        return Ok(SimulationConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    SimulationConfig::from_toml(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Headless driver around one simulation.
pub struct App {
    pub sim: Simulation,
}

impl App {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let sim = Simulation::new(config).context("Failed to initialise simulation")?;
        Ok(Self { sim })
    }

    /// Runs `weeks` simulated weeks, stepping in batches of `speed` ticks,
    /// and hands a report to `emit` at the end of each week.
    pub fn run_weeks<F>(&mut self, weeks: u32, mut emit: F) -> Result<()>
    where
        F: FnMut(&WeekReport) -> Result<()>,
    {
        let per_week = u64::from(self.sim.config().lattice.ticks_per_week);
        let target = self.sim.tick() + u64::from(weeks) * per_week;
        while self.sim.tick() < target {
            let batch = u64::from(self.sim.speed()).min(target - self.sim.tick());
            for _ in 0..batch {
                self.sim.step();
                if self.sim.tick() % per_week == 0 {
                    emit(&WeekReport::from_simulation(&self.sim))?;
                }
            }
        }
        Ok(())
    }
}
