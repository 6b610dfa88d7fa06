mod common;
use common::SimBuilder;
use gestation_lib::model::seeding::{default_layout, plant, SeedBlock};
use gestation_lib::model::lattice::Lattice;
use gestation_lib::model::snapshot::EMPTY_RGB;
use gestation_lib::model::state::{CellType, DevelopmentalStage, Morphogen};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_minimum_grid_runs() {
    let mut sim = SimBuilder::new().with_grid(8, 8).build();
    sim.run(14);
    assert!(sim.verify_invariants().is_ok());
    assert!(sim.lattice().occupied() <= 64);
}

#[test]
fn test_rectangular_grid() {
    let mut sim = SimBuilder::new().with_grid(80, 40).build();
    sim.run(10);
    assert_eq!(sim.lattice().width(), 80);
    assert_eq!(sim.lattice().height(), 40);
    assert!(sim.verify_invariants().is_ok());
}

#[test]
fn test_running_past_final_week_clamps() {
    let mut sim = SimBuilder::new()
        .with_grid(32, 32)
        .with_config(|c| c.params.total_weeks = 2)
        .build();
    sim.run(14);
    assert!(sim.is_complete());
    sim.run(10);
    assert_eq!(sim.week(), 2);
    assert_eq!(sim.tick(), 24);
    assert_eq!(sim.stage(), DevelopmentalStage::from_week(2));
}

#[test]
fn test_lone_placenta_is_static() {
    let blocks = [SeedBlock::new(10, 10, 3, 3, CellType::Placenta)];
    let mut sim = SimBuilder::new().with_grid(32, 32).build_with_layout(&blocks);
    sim.run(20);
    let cell = &sim.cells()[0];
    assert_eq!(sim.cells().len(), 1);
    assert_eq!(cell.cell_type, CellType::Placenta);
    assert_eq!(cell.target_volume, 9.0);
    assert_eq!(cell.age, 0);
}

#[test]
fn test_invalid_layouts_rejected() {
    let zero = [SeedBlock::new(0, 0, 0, 4, CellType::Heart)];
    let err = gestation_lib::model::Simulation::from_layout(
        SimBuilder::new().config().clone(),
        &zero,
    )
    .err()
    .unwrap();
    assert!(err.is_config());

    let mut lattice = Lattice::new(16, 16);
    let overlapping = [
        SeedBlock::new(0, 0, 4, 4, CellType::Heart),
        SeedBlock::new(2, 2, 4, 4, CellType::Liver),
    ];
    assert!(plant(&mut lattice, &overlapping).is_err());
}

#[test]
fn test_default_layout_is_seeded() {
    let config = SimBuilder::new().config().clone();
    let a = default_layout(&config, &mut ChaCha8Rng::seed_from_u64(3));
    let b = default_layout(&config, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(a, b);
    for m in Morphogen::ALL {
        assert_eq!(a.iter().filter(|blk| blk.producer == Some(m)).count(), 1);
    }
}

#[test]
fn test_snapshot_views() {
    let blocks = [SeedBlock::new(2, 2, 2, 2, CellType::Heart)];
    let sim = SimBuilder::new().with_grid(8, 8).build_with_layout(&blocks);
    let snap = sim.snapshot();
    assert_eq!(snap.tick, 0);
    assert_eq!(snap.type_at(2, 2), Some(CellType::Heart));
    assert_eq!(snap.type_at(0, 0), None);
    assert!(snap.cell(0).is_none());
    assert_eq!(snap.cell(1).map(|c| c.volume), Some(4));

    let rgb = snap.rgb_buffer();
    assert_eq!(rgb.len(), 8 * 8 * 3);
    assert_eq!((rgb[0], rgb[1], rgb[2]), EMPTY_RGB);
    let heart = (2 * 8 + 2) * 3;
    assert_eq!((rgb[heart], rgb[heart + 1], rgb[heart + 2]), CellType::Heart.rgb());

    let json: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
    assert_eq!(json["grid"].as_array().map(Vec::len), Some(64));
}
