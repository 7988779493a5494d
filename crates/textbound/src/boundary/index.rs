use core::slice;

use super::oracle::BreakOracle;
use super::types::{BoundaryKind, BreakEntry};
use crate::error::{BoundaryError, Result};
use crate::locale::Locale;
use crate::text::transcode::{encode_chars_utf16, validate_utf8, widen_single_byte};
use crate::text::{CodeUnit, TextSource};

/// The ordered, classified break positions of one text for one boundary
/// kind.
///
/// Always holds at least the start entry (offset 0, mask 0); the last entry
/// sits at the text length and offsets are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryIndex {
    entries: Vec<BreakEntry>,
}

impl BoundaryIndex {
    /// Run `oracle` over `text` and validate what it returns.
    ///
    /// UTF-8 strings, UTF-8 byte slices and UTF-16 slices are handed to the
    /// oracle in place. Single-byte charsets and `char` slices are widened to
    /// UTF-16 first, and non-contiguous sources are copied into one buffer.
    ///
    /// # Errors
    /// Returns [`BoundaryError::Encoding`] for text that is malformed under
    /// its encoding, [`BoundaryError::MalformedIndex`] when the oracle breaks
    /// the index invariants or puts a break where the source cannot be
    /// sliced, and any error the oracle reports.
    pub fn build<S: TextSource>(
        oracle: &dyn BreakOracle,
        kind: BoundaryKind,
        locale: &Locale,
        text: &S,
    ) -> Result<Self> {
        let entries = if let Some(utf8) = text.as_utf8() {
            tracing::trace!(%kind, units = utf8.len(), path = "direct", "locating breaks");
            oracle.locate_utf8(kind, locale, utf8)?
        } else if let Some(units) = text.as_contiguous() {
            locate_units(oracle, kind, locale, units, S::UTF8)?
        } else {
            let mut buf = Vec::with_capacity(text.len());
            text.copy_into(&mut buf);
            tracing::trace!(%kind, units = buf.len(), "copied non-contiguous text");
            locate_units(oracle, kind, locale, &buf, S::UTF8)?
        };

        let index = Self::from_entries(entries, text.len())?;
        if let Some(entry) = index.iter().find(|entry| !text.is_boundary(entry.offset)) {
            return Err(BoundaryError::MalformedIndex(format!(
                "break at {} falls inside a character",
                entry.offset
            )));
        }
        tracing::debug!(%kind, breaks = index.len(), units = text.len(), "built boundary index");
        Ok(index)
    }

    /// Wrap precomputed entries, checking that they start at 0, end at
    /// `len` and increase strictly.
    ///
    /// # Errors
    /// Returns [`BoundaryError::MalformedIndex`] describing the first
    /// violation.
    pub fn from_entries(entries: Vec<BreakEntry>, len: usize) -> Result<Self> {
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            return Err(BoundaryError::MalformedIndex("no entries".to_string()));
        };
        if first.offset != 0 {
            return Err(BoundaryError::MalformedIndex(format!(
                "first break at {} instead of 0",
                first.offset
            )));
        }
        if last.offset != len {
            return Err(BoundaryError::MalformedIndex(format!(
                "last break at {} but text has {len} units",
                last.offset
            )));
        }
        if let Some(pair) = entries.windows(2).find(|w| w[0].offset >= w[1].offset) {
            return Err(BoundaryError::MalformedIndex(format!(
                "break at {} does not follow {}",
                pair[1].offset, pair[0].offset
            )));
        }
        Ok(Self { entries })
    }

    /// Position of the first entry whose offset is not less than `offset`,
    /// or `len()` if there is none.
    pub fn lower_bound(&self, offset: usize) -> usize {
        self.entries.partition_point(|entry| entry.offset < offset)
    }

    /// Number of entries, including the start entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// # Errors
    /// Returns [`BoundaryError::OutOfRange`] past the last entry.
    pub fn get(&self, position: usize) -> Result<BreakEntry> {
        self.entries
            .get(position)
            .copied()
            .ok_or(BoundaryError::OutOfRange {
                position,
                len: self.entries.len(),
            })
    }

    pub fn entries(&self) -> &[BreakEntry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, BreakEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BoundaryIndex {
    type Item = &'a BreakEntry;
    type IntoIter = slice::Iter<'a, BreakEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pick the oracle entry point for a contiguous run of code units.
fn locate_units<U: CodeUnit>(
    oracle: &dyn BreakOracle,
    kind: BoundaryKind,
    locale: &Locale,
    units: &[U],
    utf8: bool,
) -> Result<Vec<BreakEntry>> {
    if let Some(bytes) = U::as_bytes(units) {
        if utf8 || locale.is_utf8() {
            tracing::trace!(%kind, units = bytes.len(), path = "direct", "locating breaks");
            return oracle.locate_utf8(kind, locale, validate_utf8(bytes)?);
        }
        let wide = widen_single_byte(bytes, locale.charset())?;
        tracing::trace!(%kind, units = wide.len(), path = "buffered", charset = %locale.charset(), "locating breaks");
        return oracle.locate_utf16(kind, locale, &wide);
    }

    if let Some(wide) = U::as_utf16(units) {
        tracing::trace!(%kind, units = wide.len(), path = "direct", "locating breaks");
        return oracle.locate_utf16(kind, locale, wide);
    }

    if let Some(chars) = U::as_chars(units) {
        let (wide, map) = encode_chars_utf16(chars);
        tracing::trace!(%kind, units = chars.len(), path = "buffered", "locating breaks");
        return oracle
            .locate_utf16(kind, locale, &wide)?
            .into_iter()
            .map(|entry| {
                map.translate(entry.offset)
                    .map(|offset| BreakEntry::new(offset, entry.mask))
                    .ok_or_else(|| {
                        BoundaryError::MalformedIndex(format!(
                            "break at unit {} splits a surrogate pair",
                            entry.offset
                        ))
                    })
            })
            .collect();
    }

    Err(BoundaryError::Encoding {
        charset: "unsupported code unit",
        offset: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::oracle::UnicodeOracle;
    use crate::boundary::types::word;
    use crate::text::Chunked;

    fn offsets(index: &BoundaryIndex) -> Vec<usize> {
        index.iter().map(|e| e.offset).collect()
    }

    #[test]
    fn rejects_malformed_entries() {
        let e = BreakEntry::new;
        assert!(matches!(
            BoundaryIndex::from_entries(vec![], 0),
            Err(BoundaryError::MalformedIndex(_))
        ));
        assert!(matches!(
            BoundaryIndex::from_entries(vec![e(1, 0), e(3, 0)], 3),
            Err(BoundaryError::MalformedIndex(_))
        ));
        assert!(matches!(
            BoundaryIndex::from_entries(vec![e(0, 0), e(2, 0)], 3),
            Err(BoundaryError::MalformedIndex(_))
        ));
        assert!(matches!(
            BoundaryIndex::from_entries(vec![e(0, 0), e(2, 0), e(2, 0), e(3, 0)], 3),
            Err(BoundaryError::MalformedIndex(_))
        ));
        assert!(BoundaryIndex::from_entries(vec![e(0, 0)], 0).is_ok());
    }

    #[test]
    fn lower_bound_finds_first_not_less() {
        let e = BreakEntry::new;
        let index = BoundaryIndex::from_entries(vec![e(0, 0), e(5, 1), e(6, 1), e(11, 1)], 11)
            .unwrap();
        assert_eq!(index.lower_bound(0), 0);
        assert_eq!(index.lower_bound(3), 1);
        assert_eq!(index.lower_bound(5), 1);
        assert_eq!(index.lower_bound(6), 2);
        assert_eq!(index.lower_bound(11), 3);
        assert_eq!(index.lower_bound(12), 4);
    }

    #[test]
    fn get_reports_out_of_range() {
        let index = BoundaryIndex::from_entries(vec![BreakEntry::new(0, 0)], 0).unwrap();
        assert_eq!(index.get(0).unwrap(), BreakEntry::new(0, 0));
        assert_eq!(
            index.get(1).unwrap_err(),
            BoundaryError::OutOfRange { position: 1, len: 1 }
        );
    }

    #[test]
    fn sources_agree_on_breaks() {
        let oracle = UnicodeOracle::default();
        let locale = Locale::classic();
        let text = "one two";

        let from_str = BoundaryIndex::build(&oracle, BoundaryKind::Word, &locale, &text).unwrap();
        assert_eq!(offsets(&from_str), vec![0, 3, 4, 7]);
        assert_eq!(from_str.get(1).unwrap().mask, word::LETTER);

        let bytes: &[u8] = text.as_bytes();
        let from_bytes =
            BoundaryIndex::build(&oracle, BoundaryKind::Word, &locale, &bytes).unwrap();
        assert_eq!(from_bytes, from_str);

        let parts: [&[u8]; 2] = [b"one t", b"wo"];
        let chunked = Chunked::new(&parts);
        let from_chunks =
            BoundaryIndex::build(&oracle, BoundaryKind::Word, &locale, &chunked).unwrap();
        assert_eq!(from_chunks, from_str);
    }

    #[test]
    fn char_offsets_are_scalar_indices() {
        let chars: Vec<char> = "a😀 b".chars().collect();
        let source: &[char] = &chars;
        let index = BoundaryIndex::build(
            &UnicodeOracle::default(),
            BoundaryKind::Character,
            &Locale::classic(),
            &source,
        )
        .unwrap();
        assert_eq!(offsets(&index), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn latin1_bytes_are_widened() {
        let locale = Locale::parse("fr_FR.ISO-8859-1").unwrap();
        let bytes: &[u8] = b"caf\xe9 noir";
        let index =
            BoundaryIndex::build(&UnicodeOracle::default(), BoundaryKind::Word, &locale, &bytes)
                .unwrap();
        assert_eq!(offsets(&index), vec![0, 4, 5, 9]);
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let bytes: &[u8] = b"ok \xff";
        let err = BoundaryIndex::build(
            &UnicodeOracle::default(),
            BoundaryKind::Word,
            &Locale::classic(),
            &bytes,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BoundaryError::Encoding {
                charset: "UTF-8",
                offset: 3
            }
        );
    }
}
