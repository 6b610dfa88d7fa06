mod common;
use common::SimBuilder;
use gestation_lib::model::organs::OrganTracker;
use gestation_lib::model::state::{CellType, Organ};

#[test]
fn test_organ_count_never_decreases() {
    let mut sim = SimBuilder::new().with_seed(31).build();
    let mut last = 0;
    let mut latched: Vec<(Organ, u64)> = Vec::new();
    for _ in 0..56 {
        sim.step();
        let count = sim.metrics().organs_developed;
        assert!(count >= last);
        assert_eq!(count, sim.organs().count());
        for &(organ, tick) in &latched {
            assert_eq!(sim.organs().developed_at(organ), Some(tick));
        }
        latched = Organ::ALL
            .iter()
            .filter_map(|&o| sim.organs().developed_at(o).map(|t| (o, t)))
            .collect();
        last = count;
    }
}

#[test]
fn test_tracker_latches_after_population_falls() {
    let mut tracker = OrganTracker::new(40);
    let mut sites = [0u32; CellType::COUNT];
    sites[CellType::Heart.index()] = 41;
    assert_eq!(tracker.update(&sites, 10), vec![Organ::Heart]);

    sites[CellType::Heart.index()] = 0;
    assert!(tracker.update(&sites, 11).is_empty());
    assert!(tracker.is_developed(Organ::Heart));
    assert_eq!(tracker.developed_at(Organ::Heart), Some(10));
    assert_eq!(tracker.count(), 1);
}

#[test]
fn test_threshold_is_inclusive() {
    let mut tracker = OrganTracker::new(40);
    let mut sites = [0u32; CellType::COUNT];
    sites[CellType::Brain.index()] = 39;
    assert!(tracker.update(&sites, 1).is_empty());
    sites[CellType::Brain.index()] = 40;
    assert_eq!(tracker.update(&sites, 2), vec![Organ::Brain]);
}
