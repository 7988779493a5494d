//! Boundary analysis: break oracles, the boundary index, mappings and the
//! cursors that walk them.

pub mod bookmark;
pub mod break_cursor;
pub mod index;
pub mod iter;
pub mod mapping;
pub mod oracle;
pub mod token_cursor;
pub mod types;

pub use bookmark::Bookmark;
pub use break_cursor::BreakCursor;
pub use index::BoundaryIndex;
pub use iter::{BreakPoint, Breaks, Segment, Tokens};
pub use mapping::{CursorKind, Mapping};
pub use oracle::{BreakOracle, OracleOptions, UnicodeOracle};
pub use token_cursor::TokenCursor;
pub use types::{ALL, BoundaryKind, BreakEntry, RuleMask, character, line, parse_mask, sentence, word};
