//! Combinator Framework
//!
//! The substrate a parser-combinator engine runs on: mergeable parse
//! errors, the [`Stream`] capability set with an in-memory reference
//! backend, and offset to line/column tracking threaded through [`State`].

pub mod array_stream;
pub mod chunk;
pub mod error;
pub mod position;
pub mod state;
pub mod stream;

pub use array_stream::ArrayStream;
pub use chunk::ArrayChunk;
pub use combinator_common::{Ordering, PositionConfig, SourcePosition, TabWidth};
pub use error::{merge_errors, merge_optional, ErrorFancy, ErrorItem, ErrorSet, ItemError, ParseError};
pub use position::Position;
pub use state::State;
pub use stream::{Stream, TextToken};
