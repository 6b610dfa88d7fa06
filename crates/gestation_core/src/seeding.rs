//! Initial layouts.
//!
//! The default layout places a disc of square embryo cells at the grid
//! centre, a sparse ring of placenta blocks further out, and marks three
//! embryo cells as organisers secreting the anterior, axial and posterior
//! morphogens.

use gestation_data::{Cell, CellId, CellType, Morphogen, MEDIUM};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{EngineError, Result};
use crate::lattice::Lattice;

/// A rectangular block of sites given to one new cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedBlock {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub cell_type: CellType,
    #[serde(default)]
    pub producer: Option<Morphogen>,
}

impl SeedBlock {
    #[must_use]
    pub fn new(x: usize, y: usize, width: usize, height: usize, cell_type: CellType) -> Self {
        Self {
            x,
            y,
            width,
            height,
            cell_type,
            producer: None,
        }
    }

    #[must_use]
    pub fn with_producer(mut self, morphogen: Morphogen) -> Self {
        self.producer = Some(morphogen);
        self
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    fn centre(&self) -> (f64, f64) {
        (
            self.x as f64 + (self.width as f64 - 1.0) / 2.0,
            self.y as f64 + (self.height as f64 - 1.0) / 2.0,
        )
    }

    fn sites(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Builds the embryo disc, placenta ring and organisers for a configuration.
pub fn default_layout<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Vec<SeedBlock> {
    let (w, h) = config.params.grid_size;
    let mut taken = vec![false; w * h];
    let mut blocks = embryo_disc(config, w, h);
    for block in &blocks {
        for (x, y) in block.sites() {
            taken[y * w + x] = true;
        }
    }
    assign_organisers(&mut blocks, w, h);

    let cells = &config.cells;
    let side = cells.placenta_block as usize;
    let span = w.min(h) as f64;
    let (inner, outer) = (cells.placenta_inner * span, cells.placenta_outer * span);
    let (cx, cy) = ((w as f64 - 1.0) / 2.0, (h as f64 - 1.0) / 2.0);
    let mut ring: Vec<SeedBlock> = (0..h)
        .step_by(side)
        .flat_map(|y| (0..w).step_by(side).map(move |x| (x, y)))
        .filter(|&(x, y)| x + side <= w && y + side <= h)
        .map(|(x, y)| SeedBlock::new(x, y, side, side, CellType::Placenta))
        .filter(|block| {
            let (bx, by) = block.centre();
            let r = ((bx - cx).powi(2) + (by - cy).powi(2)).sqrt();
            (inner..=outer).contains(&r) && !block.sites().any(|(sx, sy)| taken[sy * w + sx])
        })
        .collect();

    // Exact quota keeps the placenta mass independent of the seed.
    let quota = (cells.placenta_density * ring.len() as f64).round() as usize;
    ring.shuffle(rng);
    ring.truncate(quota);
    ring.sort_by_key(|block| (block.y, block.x));
    blocks.extend(ring);
    blocks
}

fn embryo_disc(config: &SimulationConfig, w: usize, h: usize) -> Vec<SeedBlock> {
    let side = (f64::from(config.cells.base_volume).sqrt().round() as usize).max(1);
    let radius = f64::from(config.cells.embryo_radius);
    let (cx, cy) = ((w as f64 - 1.0) / 2.0, (h as f64 - 1.0) / 2.0);
    let (ox, oy) = ((w / 2) as isize, (h / 2) as isize);
    let reach = (radius / side as f64).ceil() as isize + 1;
    let s = side as isize;

    let mut blocks = Vec::new();
    for j in -reach..reach {
        for i in -reach..reach {
            let (x, y) = (ox + i * s, oy + j * s);
            if x < 0 || y < 0 || x + s > w as isize || y + s > h as isize {
                continue;
            }
            let block =
                SeedBlock::new(x as usize, y as usize, side, side, CellType::Undifferentiated);
            let (bx, by) = block.centre();
            if ((bx - cx).powi(2) + (by - cy).powi(2)).sqrt() <= radius {
                blocks.push(block);
            }
        }
    }
    blocks
}

/// Marks the centre block as the axial organiser and the top and bottom
/// poles as anterior and posterior organisers.
fn assign_organisers(blocks: &mut [SeedBlock], w: usize, h: usize) {
    let (cx, cy) = ((w as f64 - 1.0) / 2.0, (h as f64 - 1.0) / 2.0);
    let score = |block: &SeedBlock, morphogen: Morphogen| {
        let (bx, by) = block.centre();
        match morphogen {
            Morphogen::Axial => (bx - cx).powi(2) + (by - cy).powi(2),
            Morphogen::Anterior => by * 1e3 + (bx - cx).abs(),
            Morphogen::Posterior => -by * 1e3 + (bx - cx).abs(),
        }
    };
    for morphogen in [Morphogen::Axial, Morphogen::Anterior, Morphogen::Posterior] {
        let best = blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.producer.is_none())
            .min_by(|a, b| score(a.1, morphogen).total_cmp(&score(b.1, morphogen)))
            .map(|(i, _)| i);
        if let Some(i) = best {
            blocks[i].producer = Some(morphogen);
        }
    }
}

/// Writes blocks onto an empty lattice and creates one cell per block.
///
/// Ids follow block order starting at 1. Fails on out-of-bounds, empty or
/// overlapping blocks.
pub fn plant(lattice: &mut Lattice, blocks: &[SeedBlock]) -> Result<Vec<Cell>> {
    let mut cells = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        let id = i as CellId + 1;
        if block.area() == 0 {
            return Err(EngineError::invalid(
                "layout",
                format!("block {i} has zero area"),
            ));
        }
        if block.x + block.width > lattice.width() || block.y + block.height > lattice.height() {
            return Err(EngineError::invalid(
                "layout",
                format!("block {i} extends past the {}x{} grid", lattice.width(), lattice.height()),
            ));
        }
        for (x, y) in block.sites() {
            let idx = lattice.index(x, y);
            if lattice.owner(idx) != MEDIUM {
                return Err(EngineError::invalid(
                    "layout",
                    format!("block {i} overlaps cell {} at ({x}, {y})", lattice.owner(idx)),
                ));
            }
            lattice.assign(idx, id);
        }

        let area = block.area() as u32;
        let mut cell = Cell::new(id, block.cell_type, f64::from(area), 0);
        cell.volume = area;
        cell.centroid = block.centre();
        cell.producer = block.producer;
        cells.push(cell);
    }
    Ok(cells)
}
