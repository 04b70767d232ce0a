use thiserror::Error;

/// Errors raised while building a position configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tab width must be at least 1, got {0}")]
    ZeroTabWidth(usize),
}
