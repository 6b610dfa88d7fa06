pub use gestation_core::{Simulation, Snapshot};
pub mod body_plan {
    pub use gestation_core::body_plan::*;
}
pub mod config {
    pub use gestation_core::config::*;
}
pub mod error {
    pub use gestation_core::error::*;
}
pub mod lattice {
    pub use gestation_core::lattice::*;
}
pub mod morphogen {
    pub use gestation_core::morphogen::*;
}
pub mod energy {
    pub use gestation_core::energy::*;
}
pub mod monte_carlo {
    pub use gestation_core::monte_carlo::*;
}
pub mod lifecycle {
    pub use gestation_core::lifecycle::*;
}
pub mod census {
    pub use gestation_core::census::*;
}
pub mod differentiation {
    pub use gestation_core::differentiation::*;
}
pub mod organs {
    pub use gestation_core::organs::*;
}
pub mod metrics {
    pub use gestation_core::metrics::*;
}
pub mod seeding {
    pub use gestation_core::seeding::*;
}
pub mod simulation {
    pub use gestation_core::simulation::*;
}
pub mod snapshot {
    pub use gestation_core::snapshot::*;
}

pub mod state {
    pub use gestation_data::*;
}
