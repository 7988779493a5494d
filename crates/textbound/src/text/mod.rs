//! Text sources a [`Mapping`](crate::Mapping) can be built over.
//!
//! A source is a cheap, copyable handle to caller-owned text. It reports its
//! length in code units, exposes its storage as one slice when it has one,
//! and materializes the text between two offsets for token cursors.
//! Contiguous sources of bytes or UTF-16 units are handed to the break
//! oracle in place; everything else is copied into a buffer first.

pub mod sources;
pub mod transcode;

use core::fmt;
use core::ops::Range;

pub use sources::{Chunked, ChunkedStr};
pub use transcode::OffsetMap;

/// Storage width of a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitWidth {
    /// 8-bit units, interpreted through the locale charset.
    Narrow,
    /// UTF-16 code units.
    Utf16,
    /// Unicode scalar values.
    Utf32,
}

impl fmt::Display for UnitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitWidth::Narrow => "narrow",
            UnitWidth::Utf16 => "utf-16",
            UnitWidth::Utf32 => "utf-32",
        })
    }
}

/// A code unit type text can be stored in.
///
/// The slice views resolve at compile time which oracle entry point a
/// contiguous buffer of this unit can be passed to without conversion.
pub trait CodeUnit: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const WIDTH: UnitWidth;

    fn as_bytes(_units: &[Self]) -> Option<&[u8]> {
        None
    }

    fn as_utf16(_units: &[Self]) -> Option<&[u16]> {
        None
    }

    fn as_chars(_units: &[Self]) -> Option<&[char]> {
        None
    }
}

impl CodeUnit for u8 {
    const WIDTH: UnitWidth = UnitWidth::Narrow;

    fn as_bytes(units: &[Self]) -> Option<&[u8]> {
        Some(units)
    }
}

impl CodeUnit for u16 {
    const WIDTH: UnitWidth = UnitWidth::Utf16;

    fn as_utf16(units: &[Self]) -> Option<&[u16]> {
        Some(units)
    }
}

impl CodeUnit for char {
    const WIDTH: UnitWidth = UnitWidth::Utf32;

    fn as_chars(units: &[Self]) -> Option<&[char]> {
        Some(units)
    }
}

/// A borrowed text range that boundaries can be computed over.
///
/// Offsets are counted in `Unit`s from the start of the range.
pub trait TextSource: Copy + fmt::Debug {
    type Unit: CodeUnit;
    /// Materialized text between two offsets.
    type Slice;

    /// Narrow text that is UTF-8 by construction, whatever the locale says.
    const UTF8: bool = false;

    /// Length of the text in code units.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole text as a `str`, when it is stored as one.
    fn as_utf8(&self) -> Option<&str> {
        None
    }

    /// The whole text as one slice, when it is stored contiguously.
    fn as_contiguous(&self) -> Option<&[Self::Unit]>;

    /// Append every code unit of the text to `buf`.
    fn copy_into(&self, buf: &mut Vec<Self::Unit>);

    /// Whether `offset` may end or start a slice. Break offsets are checked
    /// against it before an index is accepted.
    fn is_boundary(&self, _offset: usize) -> bool {
        true
    }

    /// The text between two offsets. `range` must lie on break offsets
    /// produced for this text.
    fn slice(&self, range: Range<usize>) -> Self::Slice;
}
