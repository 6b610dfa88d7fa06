use gestation_lib::model::config::MorphogenConfig;
use gestation_lib::model::energy::{AdhesionTable, TYPE_SLOTS};
use gestation_lib::model::morphogen::MorphogenField;
use gestation_lib::model::state::Morphogen;
use proptest::prelude::*;

prop_compose! {
    fn arb_deposits(size: usize)(
        deposits in prop::collection::vec((0..size, 0usize..3, 0.0f32..5.0), 1..40)
    ) -> Vec<(usize, usize, f32)> {
        deposits
    }
}

fn build(diffusion: f64, decay: f32) -> MorphogenField {
    let config = MorphogenConfig {
        decay,
        ..MorphogenConfig::default()
    };
    MorphogenField::new(16, 12, diffusion, &config)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_field_stays_within_bounds(
        diffusion in 0.01f64..10.0,
        decay in 0.5f32..0.999,
        deposits in arb_deposits(16 * 12),
        steps in 1usize..6
    ) {
        let mut field = build(diffusion, decay);
        for &(site, layer, amount) in &deposits {
            field.inject(site, Morphogen::ALL[layer], amount);
        }
        for _ in 0..steps {
            field.diffuse_step();
            let (lo, hi) = field.bounds();
            prop_assert!(lo >= 0.0, "negative concentration {}", lo);
            prop_assert!(hi <= field.max_concentration(), "concentration {} above cap", hi);
        }
    }

    #[test]
    fn test_mass_never_grows_without_secretion(
        diffusion in 0.01f64..10.0,
        decay in 0.5f32..0.999,
        deposits in arb_deposits(16 * 12)
    ) {
        let mut field = build(diffusion, decay);
        for &(site, layer, amount) in &deposits {
            field.inject(site, Morphogen::ALL[layer], amount);
        }
        field.diffuse_step();
        for m in Morphogen::ALL {
            let before = field.total(m);
            let mut next = field.clone();
            next.diffuse_step();
            let after = next.total(m);
            prop_assert!(after <= before * (1.0 + 1e-4) + 1e-6, "{}: {} -> {}", m, before, after);
        }
    }

    #[test]
    fn test_adhesion_table_symmetric(
        a in 0usize..TYPE_SLOTS,
        b in 0usize..TYPE_SLOTS,
        adhesion in 0.0f64..50.0
    ) {
        let table = AdhesionTable::new(adhesion);
        prop_assert_eq!(table.get(a, b), table.get(b, a));
        prop_assert!(table.get(a, b) >= 0.0);
    }
}
