use gestation_lib::model::config::{SimulationConfig, SimulationParams};
use gestation_lib::model::error::EngineError;
use gestation_lib::model::Simulation;

fn rejects(modify: impl FnOnce(&mut SimulationParams), field: &str) {
    let mut config = SimulationConfig::default();
    modify(&mut config.params);
    match Simulation::new(config) {
        Err(EngineError::InvalidParameter { name, .. }) => assert_eq!(name, field),
        Err(other) => panic!("expected InvalidParameter for {field}, got {other}"),
        Ok(_) => panic!("expected {field} to be rejected"),
    }
}

#[test]
fn test_out_of_range_parameters_rejected() {
    rejects(|p| p.temperature = 0.0, "temperature");
    rejects(|p| p.temperature = f64::NAN, "temperature");
    rejects(|p| p.adhesion = -1.0, "adhesion");
    rejects(|p| p.growth_rate = 0.0, "growth_rate");
    rejects(|p| p.differentiation_rate = 1.5, "differentiation_rate");
    rejects(|p| p.morphogen_diffusion = 0.0, "morphogen_diffusion");
    rejects(|p| p.grid_size = (4, 300), "grid_size");
    rejects(|p| p.total_weeks = 0, "total_weeks");
}

#[test]
fn test_toml_overrides_merge_with_defaults() {
    let config = SimulationConfig::from_toml(
        r#"
        [params]
        temperature = 8.0
        grid_size = [120, 90]
        seed = 7

        [organs]
        threshold_sites = 25
        "#,
    )
    .unwrap();
    assert_eq!(config.params.temperature, 8.0);
    assert_eq!(config.params.grid_size, (120, 90));
    assert_eq!(config.params.seed, 7);
    assert_eq!(config.params.adhesion, SimulationParams::default().adhesion);
    assert_eq!(config.organs.threshold_sites, 25);
    assert_eq!(config.lattice, SimulationConfig::default().lattice);
}

#[test]
fn test_toml_with_invalid_value_rejected() {
    let err = SimulationConfig::from_toml("[params]\ntotal_weeks = 0\n").unwrap_err();
    assert!(err.is_config());
    let err = SimulationConfig::from_toml("[params]\ntemperature = \"hot\"\n").unwrap_err();
    assert!(matches!(err, EngineError::ConfigParse(_)));
}

#[test]
fn test_fingerprint_tracks_trajectory_settings() {
    let base = SimulationConfig::default();
    let mut other = base.clone();
    assert_eq!(base.fingerprint(), other.fingerprint());
    other.params.seed += 1;
    assert_ne!(base.fingerprint(), other.fingerprint());

    let mut display_only = base.clone();
    display_only.metrics.speed_window = 21;
    assert_eq!(base.fingerprint(), display_only.fingerprint());
}

#[test]
fn test_total_ticks() {
    let config = SimulationConfig::default();
    assert_eq!(config.total_ticks(), 40 * 7);
}
