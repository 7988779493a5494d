//! Text boundary analysis.
//!
//! `textbound` splits text into characters (grapheme clusters), words,
//! sentences or line break opportunities. A [`Mapping`] runs a
//! [`BreakOracle`] over a text once and keeps the classified breaks in a
//! [`BoundaryIndex`]; [`BreakCursor`]s and [`TokenCursor`]s then walk that
//! index, skipping breaks whose marks do not intersect the active mask.
//!
//! ```
//! use textbound::{BoundaryKind, Locale, Mapping, word};
//!
//! let mapping = Mapping::with_mask(
//!     BoundaryKind::Word,
//!     "10 Hello Windows7",
//!     word::ANY,
//!     &Locale::classic(),
//! )?;
//! let words: Vec<&str> = mapping.tokens().map(|t| t.text).collect();
//! assert_eq!(words, ["10", "Hello", "Windows7"]);
//! # Ok::<(), textbound::BoundaryError>(())
//! ```

pub mod boundary;
pub mod error;
pub mod locale;
pub mod segmenter;
pub mod text;
pub mod unicode;

pub use boundary::{
    ALL, Bookmark, BoundaryIndex, BoundaryKind, BreakCursor, BreakEntry, BreakOracle, BreakPoint,
    Breaks, CursorKind, Mapping, OracleOptions, RuleMask, Segment, TokenCursor, Tokens,
    UnicodeOracle, character, line, parse_mask, sentence, word,
};
pub use error::{BoundaryError, Result};
pub use locale::{Charset, Locale};
pub use segmenter::Segmenter;
pub use text::{Chunked, ChunkedStr, CodeUnit, TextSource};
