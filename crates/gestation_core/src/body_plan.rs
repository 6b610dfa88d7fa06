//! Week-indexed anatomical template.
//!
//! Each developmental window has a set of anchors: regions of the grid,
//! placed relative to the grid centre, where a given tissue is expected to
//! form. The lineage pass prefers a rule whose target type is anchored at
//! the cell's centroid and gives it a higher transition probability. The
//! template grows with the week: head and body discs during the embryonic
//! weeks, then individual organs, limbs and the umbilical cord.

use gestation_data::CellType;

/// Region covered by an anchor, measured from its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Open disc of the given radius.
    Disc(f64),
    /// Diamond stretched along x, used for arm buds.
    Lateral(f64),
    /// Diamond stretched along y, used for leg buds.
    Axial(f64),
    /// Three-site-wide strip running down from the centre, of the given length.
    Cord(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub cell_type: CellType,
    pub x: f64,
    pub y: f64,
    pub shape: Shape,
}

impl Anchor {
    const fn new(cell_type: CellType, x: f64, y: f64, shape: Shape) -> Self {
        Self {
            cell_type,
            x,
            y,
            shape,
        }
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.x, y - self.y);
        match self.shape {
            Shape::Disc(r) => dx.hypot(dy) < r,
            Shape::Lateral(r) => dy.abs() + 0.6 * dx.abs() < r,
            Shape::Axial(r) => 0.6 * dy.abs() + dx.abs() < r,
            Shape::Cord(len) => dx.abs() <= 1.0 && (0.0..len).contains(&dy),
        }
    }
}

/// Anchors in force for one week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyPlan {
    anchors: Vec<Anchor>,
}

impl BodyPlan {
    /// Builds the template for `week` on a `width` x `height` grid.
    ///
    /// Weeks one and two have no anchors.
    #[must_use]
    pub fn for_week(week: u32, width: usize, height: usize) -> Self {
        use CellType::*;
        use Shape::*;

        let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
        let at = |cell_type, dx: f64, dy: f64, shape| {
            Anchor::new(cell_type, cx + dx, cy + dy, shape)
        };
        // Sizes step in whole sites as the window progresses.
        let grow = |base: f64, span: f64, g: f64| base + (span * g).floor();

        let anchors = match week {
            0..=2 => Vec::new(),
            3..=8 => {
                let g = f64::from(week - 2) / 6.0;
                vec![
                    at(Head, 0.0, -10.0 - (8.0 * g).floor(), Disc(grow(6.0, 12.0, g))),
                    at(Body, 0.0, 6.0, Disc(grow(6.0, 20.0, g))),
                ]
            }
            9..=12 => {
                let g = f64::from(week - 8) / 4.0;
                let limb = grow(3.0, 3.0, g);
                vec![
                    at(Head, 0.0, -18.0, Disc(12.0)),
                    at(Brain, 0.0, -18.0, Disc(grow(4.0, 4.0, g))),
                    at(Body, 0.0, -2.0, Disc(grow(20.0, 6.0, g))),
                    at(Arm, -7.0, 6.0, Lateral(limb)),
                    at(Arm, 7.0, 6.0, Lateral(limb)),
                    at(Leg, -5.0, 14.0, Axial(limb + 1.0)),
                    at(Leg, 5.0, 14.0, Axial(limb + 1.0)),
                    at(Umbilical, 0.0, 16.0, Cord(10.0)),
                    at(Heart, -4.0, -2.0, Disc(3.0)),
                    at(Liver, -2.0, 2.0, Disc(4.0)),
                    at(Stomach, 2.0, 4.0, Disc(3.0)),
                    at(Intestine, 2.0, 8.0, Disc(5.0)),
                    at(Kidney, -6.0, 2.0, Disc(2.0)),
                    at(Kidney, 6.0, 2.0, Disc(2.0)),
                    at(Lung, -1.0, 0.0, Disc(4.0)),
                    at(Eye, -3.0, -18.0, Disc(2.0)),
                    at(Eye, 3.0, -18.0, Disc(2.0)),
                    at(Bladder, 0.0, 12.0, Disc(2.0)),
                ]
            }
            13..=24 => {
                let g = f64::from(week - 12) / 12.0;
                let arm = grow(6.0, 6.0, g);
                let leg = grow(8.0, 8.0, g);
                let kidney = grow(3.0, 2.0, g);
                vec![
                    at(Head, 0.0, -24.0, Disc(16.0)),
                    at(Brain, 0.0, -24.0, Disc(8.0)),
                    at(Body, 0.0, -2.0, Disc(grow(26.0, 10.0, g))),
                    at(Arm, -14.0, 2.0, Lateral(arm)),
                    at(Arm, 14.0, 2.0, Lateral(arm)),
                    at(Leg, -8.0, 24.0, Axial(leg)),
                    at(Leg, 8.0, 24.0, Axial(leg)),
                    at(Umbilical, 0.0, 16.0, Cord(20.0)),
                    at(Heart, -4.0, -4.0, Disc(grow(4.0, 3.0, g))),
                    at(Liver, -2.0, 2.0, Disc(grow(6.0, 4.0, g))),
                    at(Stomach, 2.0, 6.0, Disc(grow(4.0, 2.0, g))),
                    at(Intestine, 2.0, 10.0, Disc(grow(6.0, 4.0, g))),
                    at(Kidney, -6.0, 4.0, Disc(kidney)),
                    at(Kidney, 6.0, 4.0, Disc(kidney)),
                    at(Lung, -2.0, -2.0, Disc(grow(6.0, 3.0, g))),
                    at(Eye, -4.0, -24.0, Disc(2.0)),
                    at(Eye, 4.0, -24.0, Disc(2.0)),
                    at(Bladder, 0.0, 16.0, Disc(3.0)),
                ]
            }
            _ => {
                let g = (f64::from(week - 24) / 16.0).min(1.0);
                let arm = grow(10.0, 8.0, g);
                let leg = grow(12.0, 8.0, g);
                vec![
                    at(Head, 0.0, -28.0, Disc(18.0)),
                    at(Brain, 0.0, -28.0, Disc(9.0)),
                    at(Body, 0.0, -2.0, Disc(grow(30.0, 12.0, g))),
                    at(Arm, -16.0, 4.0, Lateral(arm)),
                    at(Arm, 16.0, 4.0, Lateral(arm)),
                    at(Leg, -10.0, 28.0, Axial(leg)),
                    at(Leg, 10.0, 28.0, Axial(leg)),
                    at(Umbilical, 0.0, 16.0, Cord(22.0)),
                    at(Heart, -4.0, -6.0, Disc(6.0)),
                    at(Liver, -2.0, 4.0, Disc(8.0)),
                    at(Stomach, 3.0, 8.0, Disc(6.0)),
                    at(Intestine, 3.0, 14.0, Disc(8.0)),
                    at(Kidney, -6.0, 6.0, Disc(4.0)),
                    at(Kidney, 6.0, 6.0, Disc(4.0)),
                    at(Lung, -3.0, -4.0, Disc(8.0)),
                    at(Eye, -5.0, -28.0, Disc(2.0)),
                    at(Eye, 5.0, -28.0, Disc(2.0)),
                    at(Bladder, 0.0, 20.0, Disc(4.0)),
                ]
            }
        };
        Self { anchors }
    }

    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Whether any anchor for `cell_type` contains the point.
    #[must_use]
    pub fn covers(&self, cell_type: CellType, x: f64, y: f64) -> bool {
        self.anchors
            .iter()
            .any(|a| a.cell_type == cell_type && a.contains(x, y))
    }
}
