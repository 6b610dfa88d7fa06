//! Gestation: a Cellular Potts model of embryonic-to-fetal development.
//!
//! The engine lives in `gestation_core`; this crate re-exports it under
//! [`model`] and provides the headless runner used by the `gestation` binary.

pub mod app;
pub mod model;
