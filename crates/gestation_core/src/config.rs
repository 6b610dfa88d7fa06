//! Configuration management for simulation parameters.
//!
//! Strongly-typed sections that map onto a TOML file. Every section has a
//! `Default` carrying calibrated values, and any key left out of the file
//! falls back to it.
//!
//! ## Example `run.toml`
//!
//! ```toml
//! [params]
//! temperature = 5.0
//! adhesion = 10.0
//! grid_size = [300, 300]
//! total_weeks = 40
//! seed = 7
//!
//! [lattice]
//! ticks_per_week = 7
//!
//! [morphogen]
//! decay = 0.98
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

macro_rules! ensure_param {
    ($cond:expr, $name:literal, $reason:expr) => {
        if !($cond) {
            return Err(EngineError::invalid($name, $reason));
        }
    };
}

/// Run parameters supplied by the host at reset time.
///
/// Immutable for the lifetime of a run; a new set is installed only by
/// `Simulation::reset`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationParams {
    /// Boundary noise. Higher values accept more unfavourable copies.
    pub temperature: f64,
    /// Scale of the type-pair adhesion table.
    pub adhesion: f64,
    /// Target-volume growth per tick and division probability.
    pub growth_rate: f64,
    pub differentiation_rate: f64,
    pub morphogen_diffusion: f64,
    /// Lattice `(width, height)` in sites.
    pub grid_size: (usize, usize),
    pub total_weeks: u32,
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            temperature: 12.0,
            adhesion: 10.0,
            growth_rate: 0.25,
            differentiation_rate: 0.12,
            morphogen_diffusion: 0.6,
            grid_size: (300, 300),
            total_weeks: 40,
            seed: 42,
        }
    }
}

/// Lattice sweep and calendar settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LatticeConfig {
    /// Ticks that make up one simulated week.
    pub ticks_per_week: u32,
    /// Copy attempts per occupied site per tick.
    pub proposals_per_site: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            ticks_per_week: 7,
            proposals_per_site: 1.0,
        }
    }
}

/// Cell sizing, growth and initial layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CellConfig {
    /// Target volume of a freshly seeded cell. Cells divide at twice this.
    pub base_volume: u32,
    /// Strength of the quadratic volume term.
    pub volume_constraint: f64,
    /// Target growth per tick at `growth_rate = 1`.
    pub growth_step: f64,
    pub division_min_age: u64,
    /// Cells smaller than this never split.
    pub min_division_volume: u32,
    /// Radius of the seeded embryo disc in sites.
    pub embryo_radius: u32,
    /// Inner radius of the placenta ring as a fraction of the shorter grid side.
    pub placenta_inner: f64,
    pub placenta_outer: f64,
    /// Fraction of free ring blocks that receive a placenta cell.
    pub placenta_density: f64,
    /// Side length of a placenta block.
    pub placenta_block: u32,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            base_volume: 16,
            volume_constraint: 1.0,
            growth_step: 4.0,
            division_min_age: 8,
            min_division_volume: 2,
            embryo_radius: 14,
            placenta_inner: 0.32,
            placenta_outer: 0.42,
            placenta_density: 0.21,
            placenta_block: 3,
        }
    }
}

/// Morphogen field coefficients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MorphogenConfig {
    /// Per-tick multiplicative attenuation, strictly below one.
    pub decay: f32,
    /// Amount injected per producer site per tick.
    pub secretion_rate: f32,
    pub max_concentration: f32,
    /// Smoothing passes at a diffusion coefficient of one.
    pub smoothing_passes: u32,
    /// Strength of the morphogen-coupling energy term.
    pub coupling: f64,
}

impl Default for MorphogenConfig {
    fn default() -> Self {
        Self {
            decay: 0.98,
            secretion_rate: 0.5,
            max_concentration: 1.0,
            smoothing_passes: 8,
            coupling: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DifferentiationConfig {
    /// Cells younger than this (in ticks) are not evaluated.
    pub min_age: u64,
    /// Boost applied per unit fraction of boundary already touching the target type.
    pub community_factor: f64,
    /// Probability multiplier when the target type is anchored at the cell's centroid.
    pub anchor_boost: f64,
}

impl Default for DifferentiationConfig {
    fn default() -> Self {
        Self {
            min_age: 2,
            community_factor: 1.0,
            anchor_boost: 1.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OrganConfig {
    /// Constituent sites required before an organ counts as developed.
    pub threshold_sites: u32,
}

impl Default for OrganConfig {
    fn default() -> Self {
        Self {
            threshold_sites: 40,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Trailing window (ticks) for the differentiation speed.
    pub speed_window: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { speed_window: 7 }
    }
}

/// Complete engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub params: SimulationParams,
    pub lattice: LatticeConfig,
    pub cells: CellConfig,
    pub morphogen: MorphogenConfig,
    pub differentiation: DifferentiationConfig,
    pub organs: OrganConfig,
    pub metrics: MetricsConfig,
}

impl SimulationParams {
    /// Checks the host-facing parameters against their documented ranges.
    pub fn validate(&self) -> Result<()> {
        ensure_param!(
            self.temperature.is_finite() && self.temperature > 0.0,
            "temperature",
            format!("must be a positive number, got {}", self.temperature)
        );
        ensure_param!(
            self.adhesion.is_finite() && self.adhesion >= 0.0,
            "adhesion",
            format!("must be non-negative, got {}", self.adhesion)
        );
        ensure_param!(
            self.growth_rate > 0.0 && self.growth_rate <= 2.0,
            "growth_rate",
            format!("must be in (0, 2], got {}", self.growth_rate)
        );
        ensure_param!(
            self.differentiation_rate > 0.0 && self.differentiation_rate <= 1.0,
            "differentiation_rate",
            format!("must be in (0, 1], got {}", self.differentiation_rate)
        );
        ensure_param!(
            self.morphogen_diffusion > 0.0 && self.morphogen_diffusion <= 10.0,
            "morphogen_diffusion",
            format!("must be in (0, 10], got {}", self.morphogen_diffusion)
        );
        let (w, h) = self.grid_size;
        ensure_param!(
            (8..=2048).contains(&w) && (8..=2048).contains(&h),
            "grid_size",
            format!("both sides must be in [8, 2048], got {w}x{h}")
        );
        ensure_param!(
            (1..=60).contains(&self.total_weeks),
            "total_weeks",
            format!("must be in [1, 60], got {}", self.total_weeks)
        );
        Ok(())
    }
}

impl SimulationConfig {
    /// Validates every section, reporting the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        ensure_param!(
            self.lattice.ticks_per_week > 0,
            "ticks_per_week",
            "must be positive"
        );
        ensure_param!(
            self.lattice.proposals_per_site.is_finite() && self.lattice.proposals_per_site > 0.0,
            "proposals_per_site",
            "must be positive"
        );

        ensure_param!(
            self.cells.base_volume >= 2,
            "base_volume",
            "must be at least 2"
        );
        ensure_param!(
            self.cells.volume_constraint.is_finite() && self.cells.volume_constraint >= 0.0,
            "volume_constraint",
            "must be non-negative"
        );
        ensure_param!(
            self.cells.growth_step.is_finite() && self.cells.growth_step > 0.0,
            "growth_step",
            "must be positive"
        );
        ensure_param!(
            self.cells.min_division_volume >= 2,
            "min_division_volume",
            "must be at least 2"
        );
        ensure_param!(
            self.cells.embryo_radius >= 1,
            "embryo_radius",
            "must be at least 1"
        );
        ensure_param!(
            0.0 <= self.cells.placenta_inner
                && self.cells.placenta_inner < self.cells.placenta_outer
                && self.cells.placenta_outer <= 1.0,
            "placenta_inner",
            "ring bounds must satisfy 0 <= inner < outer <= 1"
        );
        ensure_param!(
            (0.0..=1.0).contains(&self.cells.placenta_density),
            "placenta_density",
            "must be in [0, 1]"
        );
        ensure_param!(
            self.cells.placenta_block >= 1,
            "placenta_block",
            "must be at least 1"
        );

        ensure_param!(
            self.morphogen.decay > 0.0 && self.morphogen.decay < 1.0,
            "decay",
            format!("must be in (0, 1), got {}", self.morphogen.decay)
        );
        ensure_param!(
            self.morphogen.secretion_rate >= 0.0,
            "secretion_rate",
            "must be non-negative"
        );
        ensure_param!(
            self.morphogen.max_concentration.is_finite() && self.morphogen.max_concentration > 0.0,
            "max_concentration",
            "must be positive"
        );
        ensure_param!(
            (1..=64).contains(&self.morphogen.smoothing_passes),
            "smoothing_passes",
            format!("must be in [1, 64], got {}", self.morphogen.smoothing_passes)
        );
        ensure_param!(
            self.morphogen.coupling.is_finite(),
            "coupling",
            "must be finite"
        );

        ensure_param!(
            self.differentiation.community_factor.is_finite()
                && self.differentiation.community_factor >= 0.0,
            "community_factor",
            "must be non-negative"
        );
        ensure_param!(
            self.differentiation.anchor_boost.is_finite() && self.differentiation.anchor_boost >= 0.0,
            "anchor_boost",
            "must be non-negative"
        );
        ensure_param!(
            self.organs.threshold_sites >= 1,
            "threshold_sites",
            "must be at least 1"
        );
        ensure_param!(
            self.metrics.speed_window >= 1,
            "speed_window",
            "must be at least 1"
        );

        Ok(())
    }

    /// Parses a TOML document and validates the result.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy of this configuration with its run parameters replaced.
    #[must_use]
    pub fn with_params(&self, params: SimulationParams) -> Self {
        Self {
            params,
            ..self.clone()
        }
    }

    /// Week-to-tick conversion.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        u64::from(self.params.total_weeks) * u64::from(self.lattice.ticks_per_week)
    }

    /// SHA-256 over every section that influences the trajectory.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.params).as_bytes());
        hasher.update(format!("{:?}", self.lattice).as_bytes());
        hasher.update(format!("{:?}", self.cells).as_bytes());
        hasher.update(format!("{:?}", self.morphogen).as_bytes());
        hasher.update(format!("{:?}", self.differentiation).as_bytes());
        hasher.update(format!("{:?}", self.organs).as_bytes());
        hex::encode(hasher.finalize())
    }
}
