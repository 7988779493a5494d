//! Error types for boundary analysis.

use thiserror::Error;

/// Result type for boundary operations.
pub type Result<T> = std::result::Result<T, BoundaryError>;

/// Errors that can occur while building or walking a boundary index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    /// A cursor was dereferenced at a position that holds no break or token.
    #[error("break position {position} is out of range (index holds {len} entries)")]
    OutOfRange { position: usize, len: usize },

    /// The cursor was default-constructed and never attached to a mapping.
    #[error("cursor is not attached to a mapping")]
    Unbound,

    /// A bookmark was restored against a mapping it was not taken from.
    #[error("bookmark belongs to a different mapping")]
    ForeignCursor,

    /// A bookmark was taken before the mapping was rebuilt.
    #[error("stale cursor: taken at generation {cursor}, mapping is at generation {mapping}")]
    StaleCursor { cursor: u64, mapping: u64 },

    /// The locale name is malformed or names an unsupported charset.
    #[error("locale error: {0}")]
    Locale(String),

    /// The text is not valid in the encoding it is interpreted with.
    #[error("invalid {charset} text at code unit {offset}")]
    Encoding { charset: &'static str, offset: usize },

    /// A mask expression could not be parsed.
    #[error("invalid mask expression: {0}")]
    InvalidMask(String),

    /// A boundary kind name was not recognized.
    #[error("unknown boundary kind `{0}`")]
    UnknownKind(String),

    /// The break oracle produced entries that violate the index invariants.
    #[error("malformed boundary index: {0}")]
    MalformedIndex(String),

    /// A mapping was rebound to a text of a different length.
    #[error("text length {actual} does not match mapped length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
