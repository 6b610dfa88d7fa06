//! # Gestation Core
//!
//! A two-dimensional Cellular Potts engine modelling embryonic-to-fetal
//! development over a 40-week timeline.
//!
//! This crate contains the deterministic simulation logic:
//! - Site ownership lattice and Metropolis boundary dynamics
//! - Adhesion, volume and morphogen-coupling Hamiltonian
//! - Morphogen diffusion with organiser secretion
//! - Growth, division and a forward-only lineage state machine
//! - Week-indexed body plan anchoring organ placement
//! - Organ latching, developmental metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use gestation_core::config::{SimulationConfig, SimulationParams};
//! use gestation_core::Simulation;
//!
//! let config = SimulationConfig {
//!     params: SimulationParams {
//!         grid_size: (64, 64),
//!         seed: 7,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! sim.run(14);
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.week, 2);
//! assert!(snapshot.metrics.total_cell_count > 0);
//! ```

/// Week-indexed anatomical anchors
pub mod body_plan;
/// Per-tick centroid, contact and spread tallies
pub mod census;
/// Configuration management for simulation parameters
pub mod config;
/// Lineage rule table and differentiation pass
pub mod differentiation;
/// Adhesion table and energy differences
pub mod energy;
/// Engine error types
pub mod error;
/// Site ownership grid
pub mod lattice;
/// Ageing, growth and division
pub mod lifecycle;
/// Developmental metrics, throughput counters and logging setup
pub mod metrics;
/// Metropolis boundary sweep
pub mod monte_carlo;
/// Morphogen diffusion field
pub mod morphogen;
/// Organ development latch
pub mod organs;
/// Default and custom initial layouts
pub mod seeding;
/// Owned simulation state and control surface
pub mod simulation;
/// Read-only views for hosts
pub mod snapshot;

pub use error::{EngineError, Result};
pub use gestation_data::{Cell, CellId, CellType, DevelopmentalStage, Morphogen, Organ, MEDIUM};
pub use metrics::{init_logging, DevelopmentMetrics, EngineCounters};
pub use seeding::SeedBlock;
pub use simulation::Simulation;
pub use snapshot::Snapshot;
