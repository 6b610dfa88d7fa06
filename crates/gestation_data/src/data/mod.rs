//! Plain data types shared by the engine and its hosts.

pub mod cell;
pub mod morphogen;
pub mod organ;
pub mod stage;
