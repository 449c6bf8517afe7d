//! Error types for difftext.
//!
//! Reaching either end of the history is not an error: `undo` and `redo`
//! report it with `None`. The enums here cover caller mistakes that should
//! fail loudly instead.

use thiserror::Error;

/// Errors raised by the matching and delta utilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    /// A numeric restore direction other than `1` (side A) or `2` (side B).
    #[error("Unknown delta direction {code} (must be 1 or 2)")]
    InvalidDirection {
        /// The rejected code.
        code: u8,
    },

    /// `get_close_matches` was asked for zero results.
    #[error("Number of close matches must be > 0, got {n}")]
    InvalidMatchCount {
        /// The rejected count.
        n: usize,
    },

    /// A similarity cutoff outside `[0.0, 1.0]`.
    #[error("Cutoff must be in [0.0, 1.0], got {cutoff}")]
    InvalidCutoff {
        /// The rejected cutoff.
        cutoff: f64,
    },
}

/// Errors related to history configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration for '{key}': {value}")]
    InvalidConfiguration {
        /// The configuration key.
        key: String,
        /// The invalid value.
        value: String,
    },
}
