//! Error types for the gestation engine.
//!
//! Configuration problems surface synchronously from `Simulation::new` and
//! `Simulation::reset`. Invariant violations are internal faults that `step`
//! logs and then panics on.

use gestation_data::CellId;
use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration value lies outside its documented range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// TOML decoding failed before validation could run.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Internal bookkeeping disagrees with the lattice.
    #[error("Invariant violated at tick {tick} (cell {cell_id}): {detail}")]
    InvariantViolation {
        tick: u64,
        cell_id: CellId,
        detail: String,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a new invalid parameter error.
    #[must_use]
    pub fn invalid<S: Into<String>>(name: &'static str, reason: S) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates a new invariant violation error.
    #[must_use]
    pub fn invariant<S: Into<String>>(tick: u64, cell_id: CellId, detail: S) -> Self {
        Self::InvariantViolation {
            tick,
            cell_id,
            detail: detail.into(),
        }
    }

    /// Returns true for errors raised by configuration checks.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. } | Self::ConfigParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::invalid("temperature", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `temperature`: must be positive"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_invariant_display_names_tick_and_cell() {
        let err = EngineError::invariant(12, 7, "volume drifted");
        let msg = err.to_string();
        assert!(msg.contains("tick 12"));
        assert!(msg.contains("cell 7"));
        assert!(!err.is_config());
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let err: EngineError = parse.into();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }
}
