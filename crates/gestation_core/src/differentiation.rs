//! Lineage state machine.
//!
//! Each live cell is checked against a static, ordered rule table once per
//! tick. Rules open for the cell's type and the current week, and below their
//! population cap, are candidates. A candidate whose target is anchored at
//! the cell's centroid by the week's body plan wins outright; otherwise the
//! first candidate whose morphogen threshold is met is selected. A single
//! draw then decides whether the transition happens this tick. Rules only
//! ever move a cell to a strictly higher potency.

use gestation_data::{Cell, CellId, CellType, Morphogen};
use rand::Rng;

use crate::body_plan::BodyPlan;
use crate::census::Census;
use crate::config::DifferentiationConfig;
use crate::morphogen::MorphogenField;

/// One row of the lineage table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineageRule {
    pub from: CellType,
    pub morphogen: Morphogen,
    /// Minimum concentration at the cell centroid.
    pub threshold: f32,
    pub min_week: u32,
    pub to: CellType,
    /// Rule is skipped once this many cells of type `to` exist.
    pub cap: u32,
}

const fn rule(
    from: CellType,
    morphogen: Morphogen,
    threshold: f32,
    min_week: u32,
    to: CellType,
    cap: u32,
) -> LineageRule {
    LineageRule {
        from,
        morphogen,
        threshold,
        min_week,
        to,
        cap,
    }
}

const OPEN: u32 = u32::MAX;

/// Lineage table in priority order. Earlier rows win ties.
pub const LINEAGES: &[LineageRule] = &[
    // germ layers
    rule(CellType::Undifferentiated, Morphogen::Anterior, 0.10, 2, CellType::Ectoderm, OPEN),
    rule(CellType::Undifferentiated, Morphogen::Axial, 0.10, 2, CellType::Endoderm, OPEN),
    rule(CellType::Undifferentiated, Morphogen::Axial, 0.05, 2, CellType::Mesoderm, OPEN),
    rule(CellType::Undifferentiated, Morphogen::Axial, 0.0, 4, CellType::Mesoderm, OPEN),
    // structural tissues
    rule(CellType::Ectoderm, Morphogen::Anterior, 0.0, 3, CellType::Head, OPEN),
    rule(CellType::Mesoderm, Morphogen::Axial, 0.0, 3, CellType::Body, OPEN),
    // organs, in onset order
    rule(CellType::Body, Morphogen::Axial, 0.02, 4, CellType::Heart, 10),
    rule(CellType::Head, Morphogen::Anterior, 0.02, 5, CellType::Eye, 4),
    rule(CellType::Head, Morphogen::Anterior, 0.02, 5, CellType::Brain, 16),
    rule(CellType::Endoderm, Morphogen::Axial, 0.02, 6, CellType::Lung, 3),
    rule(CellType::Endoderm, Morphogen::Axial, 0.02, 6, CellType::Liver, 3),
    rule(CellType::Endoderm, Morphogen::Axial, 0.0, 7, CellType::Stomach, 3),
    rule(CellType::Endoderm, Morphogen::Axial, 0.0, 8, CellType::Intestine, 4),
    rule(CellType::Body, Morphogen::Posterior, 0.0, 9, CellType::Kidney, 5),
    rule(CellType::Endoderm, Morphogen::Posterior, 0.0, 11, CellType::Bladder, 3),
    rule(CellType::Body, Morphogen::Posterior, 0.0, 12, CellType::Umbilical, 3),
    rule(CellType::Body, Morphogen::Anterior, 0.0, 12, CellType::Arm, 6),
    rule(CellType::Body, Morphogen::Posterior, 0.0, 13, CellType::Leg, 6),
];

/// Organogenesis window multiplier on the transition probability.
#[must_use]
pub fn window(week: u32) -> f64 {
    match week {
        3..=8 => 1.9,
        9..=12 => 1.3,
        _ => 0.9,
    }
}

/// A type change applied during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub cell: CellId,
    pub from: CellType,
    pub to: CellType,
}

/// Selected rule for a cell, ignoring the stochastic draw.
#[must_use]
pub fn select_rule(
    cell: &Cell,
    week: u32,
    field: &MorphogenField,
    plan: &BodyPlan,
    type_cells: &[u32; CellType::COUNT],
) -> Option<&'static LineageRule> {
    let (x, y) = cell.centroid;
    let candidates = move || {
        LINEAGES.iter().filter(move |r| {
            r.from == cell.cell_type && r.min_week <= week && type_cells[r.to.index()] < r.cap
        })
    };
    candidates()
        .find(|r| plan.covers(r.to, x, y))
        .or_else(|| candidates().find(|r| field.sample(r.morphogen, x, y) >= r.threshold))
}

/// Evaluates every live cell once, in id order.
pub fn differentiate<R: Rng>(
    cells: &mut [Cell],
    census: &Census,
    field: &MorphogenField,
    plan: &BodyPlan,
    week: u32,
    rate: f64,
    config: &DifferentiationConfig,
    rng: &mut R,
) -> Vec<Transition> {
    let mut type_cells = [0u32; CellType::COUNT];
    for cell in cells.iter() {
        type_cells[cell.cell_type.index()] += 1;
    }

    let mut transitions = Vec::new();
    let base = rate * window(week);
    for cell in cells.iter_mut() {
        if cell.age < config.min_age {
            continue;
        }
        let Some(rule) = select_rule(cell, week, field, plan, &type_cells) else {
            continue;
        };
        let (x, y) = cell.centroid;
        let boost = if plan.covers(rule.to, x, y) {
            config.anchor_boost
        } else {
            1.0
        };
        let community = census.contact_fraction(cell.id, rule.to);
        let p = (base * boost * (1.0 + config.community_factor * community)).min(1.0);
        if rng.gen::<f64>() >= p {
            continue;
        }

        debug_assert!(rule.to.potency() > rule.from.potency());
        type_cells[rule.from.index()] -= 1;
        type_cells[rule.to.index()] += 1;
        cell.cell_type = rule.to;
        transitions.push(Transition {
            cell: cell.id,
            from: rule.from,
            to: rule.to,
        });
    }
    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MorphogenConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_every_rule_moves_forward() {
        for r in LINEAGES {
            assert!(
                r.to.potency() > r.from.potency(),
                "{} -> {} does not increase potency",
                r.from,
                r.to
            );
        }
    }

    #[test]
    fn test_every_organ_type_is_reachable() {
        for t in CellType::ALL {
            if t.is_terminal() && t != CellType::Placenta {
                assert!(LINEAGES.iter().any(|r| r.to == t), "{t} unreachable");
            }
        }
    }

    #[test]
    fn test_window_multipliers() {
        assert_eq!(window(2), 0.9);
        assert_eq!(window(3), 1.9);
        assert_eq!(window(8), 1.9);
        assert_eq!(window(10), 1.3);
        assert_eq!(window(20), 0.9);
    }

    #[test]
    fn test_onset_week_gates_rules() {
        let field = MorphogenField::new(8, 8, 0.6, &MorphogenConfig::default());
        let mut cell = Cell::new(1, CellType::Undifferentiated, 16.0, 0);
        cell.centroid = (4.0, 4.0);
        let counts = [0; CellType::COUNT];
        let plan = |week| BodyPlan::for_week(week, 8, 8);
        assert!(select_rule(&cell, 1, &field, &plan(1), &counts).is_none());
        assert!(select_rule(&cell, 3, &field, &plan(3), &counts).is_none());
        let fallback = select_rule(&cell, 4, &field, &plan(4), &counts).unwrap();
        assert_eq!(fallback.to, CellType::Mesoderm);
    }

    #[test]
    fn test_cap_blocks_rule() {
        let field = MorphogenField::new(8, 8, 0.6, &MorphogenConfig::default());
        let mut cell = Cell::new(1, CellType::Endoderm, 16.0, 0);
        cell.centroid = (4.0, 4.0);
        let mut counts = [0; CellType::COUNT];
        let plan = BodyPlan::default();
        assert_eq!(
            select_rule(&cell, 7, &field, &plan, &counts).map(|r| r.to),
            Some(CellType::Stomach)
        );
        counts[CellType::Stomach.index()] = 3;
        assert_eq!(select_rule(&cell, 7, &field, &plan, &counts).map(|r| r.to), None);
        assert_eq!(
            select_rule(&cell, 8, &field, &plan, &counts).map(|r| r.to),
            Some(CellType::Intestine)
        );
    }

    #[test]
    fn test_anchor_overrides_table_order() {
        let field = MorphogenField::new(300, 300, 0.6, &MorphogenConfig::default());
        let plan = BodyPlan::for_week(9, 300, 300);
        let counts = [0; CellType::COUNT];

        // Heart needs axial signal, but the heart anchor sits at (146, 148).
        let mut cell = Cell::new(1, CellType::Body, 16.0, 0);
        cell.centroid = (146.0, 148.0);
        assert_eq!(
            select_rule(&cell, 9, &field, &plan, &counts).map(|r| r.to),
            Some(CellType::Heart)
        );
        // Away from any anchor the unthresholded kidney rule is the first match.
        cell.centroid = (150.0, 175.0);
        assert_eq!(
            select_rule(&cell, 9, &field, &plan, &counts).map(|r| r.to),
            Some(CellType::Kidney)
        );

        // Liver but not lung territory; stomach and intestine come later in the table.
        let mut endo = Cell::new(2, CellType::Endoderm, 16.0, 0);
        endo.centroid = (147.0, 155.0);
        assert_eq!(
            select_rule(&endo, 9, &field, &plan, &counts).map(|r| r.to),
            Some(CellType::Liver)
        );
        // A full anchored type falls back to the table.
        let mut full = counts;
        full[CellType::Liver.index()] = 3;
        assert_eq!(
            select_rule(&endo, 9, &field, &plan, &full).map(|r| r.to),
            Some(CellType::Stomach)
        );
    }

    #[test]
    fn test_heart_forms_at_heart_anchor() {
        let field = MorphogenField::new(300, 300, 0.6, &MorphogenConfig::default());
        let plan = BodyPlan::for_week(9, 300, 300);
        let mut cells: Vec<Cell> = [(146.0, 148.0), (150.0, 175.0)]
            .into_iter()
            .zip(1..)
            .map(|(centroid, id)| {
                let mut c = Cell::new(id, CellType::Body, 16.0, 0);
                c.age = 10;
                c.centroid = centroid;
                c
            })
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        differentiate(
            &mut cells,
            &Census::default(),
            &field,
            &plan,
            9,
            1.0,
            &DifferentiationConfig::default(),
            &mut rng,
        );
        assert_eq!(cells[0].cell_type, CellType::Heart);
        assert_eq!(cells[1].cell_type, CellType::Kidney);
    }

    #[test]
    fn test_certain_transition_with_full_rate() {
        let field = MorphogenField::new(8, 8, 0.6, &MorphogenConfig::default());
        let mut cells: Vec<Cell> = (1..=5)
            .map(|id| {
                let mut c = Cell::new(id, CellType::Undifferentiated, 16.0, 0);
                c.age = 10;
                c.centroid = (4.0, 4.0);
                c
            })
            .collect();
        // Young cells are left alone.
        cells[4].age = 0;
        let census = Census::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = differentiate(
            &mut cells,
            &census,
            &field,
            &BodyPlan::for_week(5, 8, 8),
            5,
            1.0,
            &DifferentiationConfig::default(),
            &mut rng,
        );
        assert_eq!(out.len(), 4);
        assert!(cells[..4].iter().all(|c| c.cell_type == CellType::Mesoderm));
        assert_eq!(cells[4].cell_type, CellType::Undifferentiated);
    }
}
