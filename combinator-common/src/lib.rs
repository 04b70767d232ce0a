//! Combinator Common
//!
//! Shared building blocks for combinator-framework: ordering and comparator
//! injection, source positions, and position configuration.

pub mod config;
pub mod error;
pub mod ordering;
pub mod source_pos;

pub use config::PositionConfig;
pub use error::ConfigError;
pub use ordering::{
    compare_numbers, compare_slices, compare_strings, Comparable, Comparator, Natural,
    SliceComparator,
};
pub use source_pos::{SourcePosition, TabWidth};
pub use std::cmp::Ordering;
