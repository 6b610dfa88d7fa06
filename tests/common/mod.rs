use gestation_lib::model::config::SimulationConfig;
use gestation_lib::model::seeding::SeedBlock;
use gestation_lib::model::state::CellType;
use gestation_lib::model::Simulation;

#[allow(dead_code)]
pub struct SimBuilder {
    config: SimulationConfig,
}

#[allow(dead_code)]
impl SimBuilder {
    pub fn new() -> Self {
        let mut config = SimulationConfig::default();
        config.params.grid_size = (64, 64);
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.params.seed = seed;
        self
    }

    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.config.params.grid_size = (width, height);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimulationConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn build(self) -> Simulation {
        Simulation::new(self.config).expect("Failed to build simulation")
    }

    pub fn build_with_layout(self, blocks: &[SeedBlock]) -> Simulation {
        Simulation::from_layout(self.config, blocks).expect("Failed to build simulation")
    }
}

/// Tiles a `cols` x `rows` area with `side`-sized blocks alternating between two types.
#[allow(dead_code)]
pub fn checkerboard(cols: usize, rows: usize, side: usize, a: CellType, b: CellType) -> Vec<SeedBlock> {
    let mut blocks = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let cell_type = if (row + col) % 2 == 0 { a } else { b };
            blocks.push(SeedBlock::new(col * side, row * side, side, side, cell_type));
        }
    }
    blocks
}
