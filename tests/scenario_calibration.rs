//! Calibration runs on the full 300x300 grid.
//!
//! The adhesion sweep is five full runs; include it with
//! `cargo test --release -- --ignored`.

use gestation_lib::model::config::{SimulationConfig, SimulationParams};
use gestation_lib::model::metrics::init_logging;
use gestation_lib::model::Simulation;

fn week_ten(params: SimulationParams) -> Simulation {
    init_logging();
    let config = SimulationConfig::default().with_params(params);
    let mut sim = Simulation::new(config).expect("valid calibration config");
    sim.run(70);
    sim
}

fn calibration_params() -> SimulationParams {
    SimulationParams {
        temperature: 5.0,
        adhesion: 10.0,
        growth_rate: 0.25,
        differentiation_rate: 0.12,
        morphogen_diffusion: 0.6,
        grid_size: (300, 300),
        total_weeks: 40,
        ..SimulationParams::default()
    }
}

#[test]
fn test_week_ten_ranges() {
    let sim = week_ten(calibration_params());
    let m = sim.metrics();
    assert_eq!(m.week, 10);
    assert!(
        (7..=8).contains(&m.organs_developed),
        "organs developed: {} ({:?})",
        m.organs_developed,
        m.developed_organs
    );
    assert!(
        (13_000..=14_300).contains(&m.total_cell_count),
        "total cell count: {}",
        m.total_cell_count
    );
}

#[test]
#[ignore] // Long-running
fn test_adhesion_sweep_reduces_mass() {
    let counts: Vec<usize> = [1.0, 5.0, 10.0, 20.0, 30.0]
        .into_iter()
        .map(|adhesion| {
            week_ten(SimulationParams {
                adhesion,
                ..calibration_params()
            })
            .metrics()
            .total_cell_count
        })
        .collect();
    for pair in counts.windows(2) {
        assert!(pair[0] > pair[1], "counts not decreasing: {:?}", counts);
    }
}
