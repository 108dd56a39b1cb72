//! Error types

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while building logger configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("action log capacity must be at least 1")]
    ZeroCapacity,
}
