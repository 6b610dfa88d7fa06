pub mod data;

pub use data::cell::{Cell, CellId, CellType, Potency, TissueFamily, MEDIUM};
pub use data::morphogen::Morphogen;
pub use data::organ::Organ;
pub use data::stage::{milestone, DevelopmentalStage};
