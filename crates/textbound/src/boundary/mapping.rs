use std::sync::atomic::{AtomicU64, Ordering};

use super::bookmark::Bookmark;
use super::index::BoundaryIndex;
use super::iter::{Breaks, Tokens};
use super::oracle::{BreakOracle, UnicodeOracle};
use super::types::{ALL, BoundaryKind, RuleMask};
use crate::error::{BoundaryError, Result};
use crate::locale::Locale;
use crate::text::TextSource;

static NEXT_MAPPING_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_MAPPING_ID.fetch_add(1, Ordering::Relaxed)
}

/// A cursor type that can be positioned at either end of a [`Mapping`].
pub trait CursorKind<'m, S: TextSource>: Sized {
    fn begin(mapping: &'m Mapping<S>) -> Self;
    fn end(mapping: &'m Mapping<S>) -> Self;
}

/// A text together with its boundary index and the active filter mask.
///
/// The mapping owns the index and holds a copy of the text handle; the text
/// itself stays with the caller. Cursors borrow the mapping, so remapping in
/// place needs every cursor to be gone first. Use a
/// [`Bookmark`] to keep a position across a remap.
#[derive(Debug)]
pub struct Mapping<S> {
    id: u64,
    generation: u64,
    kind: BoundaryKind,
    text: S,
    index: BoundaryIndex,
    mask: RuleMask,
}

impl<S: TextSource> Mapping<S> {
    /// Map `text` with the default oracle and no filtering.
    ///
    /// # Errors
    /// Fails if the text is malformed under its encoding.
    pub fn new(kind: BoundaryKind, text: S, locale: &Locale) -> Result<Self> {
        Self::with_mask(kind, text, ALL, locale)
    }

    /// Map `text` with the default oracle and the given mask.
    ///
    /// # Errors
    /// Fails if the text is malformed under its encoding.
    pub fn with_mask(kind: BoundaryKind, text: S, mask: RuleMask, locale: &Locale) -> Result<Self> {
        Self::with_oracle(&UnicodeOracle::default(), kind, text, mask, locale)
    }

    /// # Errors
    /// Propagates whatever [`BoundaryIndex::build`] reports.
    pub fn with_oracle(
        oracle: &dyn BreakOracle,
        kind: BoundaryKind,
        text: S,
        mask: RuleMask,
        locale: &Locale,
    ) -> Result<Self> {
        let index = BoundaryIndex::build(oracle, kind, locale, &text)?;
        Ok(Self {
            id: next_id(),
            generation: 0,
            kind,
            text,
            index,
            mask,
        })
    }

    /// Rebuild the mapping over new text, keeping the current mask.
    ///
    /// # Errors
    /// On failure the mapping is left exactly as it was.
    pub fn map(&mut self, kind: BoundaryKind, text: S, locale: &Locale) -> Result<()> {
        self.map_with_oracle(&UnicodeOracle::default(), kind, text, None, locale)
    }

    /// Rebuild the mapping over new text with a new mask.
    ///
    /// # Errors
    /// On failure the mapping is left exactly as it was.
    pub fn map_with_mask(
        &mut self,
        kind: BoundaryKind,
        text: S,
        mask: RuleMask,
        locale: &Locale,
    ) -> Result<()> {
        self.map_with_oracle(&UnicodeOracle::default(), kind, text, Some(mask), locale)
    }

    /// Rebuild the mapping with an explicit oracle. `None` keeps the mask.
    ///
    /// The new index is built before anything is replaced, and the
    /// generation only advances once the swap is done.
    ///
    /// # Errors
    /// On failure the mapping is left exactly as it was.
    pub fn map_with_oracle(
        &mut self,
        oracle: &dyn BreakOracle,
        kind: BoundaryKind,
        text: S,
        mask: Option<RuleMask>,
        locale: &Locale,
    ) -> Result<()> {
        let index = match BoundaryIndex::build(oracle, kind, locale, &text) {
            Ok(index) => index,
            Err(err) => {
                tracing::warn!(mapping = self.id, %kind, error = %err, "remap failed, keeping previous index");
                return Err(err);
            }
        };

        self.kind = kind;
        self.text = text;
        self.index = index;
        if let Some(mask) = mask {
            self.mask = mask;
        }
        self.generation += 1;
        tracing::debug!(
            mapping = self.id,
            generation = self.generation,
            %kind,
            breaks = self.index.len(),
            "remapped text"
        );
        Ok(())
    }

    pub fn mask(&self) -> RuleMask {
        self.mask
    }

    /// Replace the filter mask. Existing cursors keep the mask they were
    /// created with; the index is not rebuilt.
    pub fn set_mask(&mut self, mask: RuleMask) {
        self.mask = mask;
    }

    /// A cursor at the first position, e.g. `let c: BreakCursor<_> = m.begin();`.
    pub fn begin<'m, C: CursorKind<'m, S>>(&'m self) -> C {
        C::begin(self)
    }

    /// A cursor at the end sentinel.
    pub fn end<'m, C: CursorKind<'m, S>>(&'m self) -> C {
        C::end(self)
    }

    /// Every valid break position, in order.
    pub fn breaks(&self) -> Breaks<'_, S> {
        Breaks::new(self)
    }

    /// Every token, in order.
    pub fn tokens(&self) -> Tokens<'_, S> {
        Tokens::new(self)
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn text(&self) -> S {
        self.text
    }

    /// Length of the mapped text in code units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn index(&self) -> &BoundaryIndex {
        &self.index
    }

    /// Number of successful remaps since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Process-unique identity of this mapping object.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Copy the index, kind and mask onto another source type holding the
    /// same text in the same code units.
    ///
    /// # Errors
    /// Returns [`BoundaryError::LengthMismatch`] if `text` differs in length
    /// and [`BoundaryError::MalformedIndex`] if a break cannot be sliced in
    /// `text`.
    pub fn rebind<T>(&self, text: T) -> Result<Mapping<T>>
    where
        T: TextSource<Unit = S::Unit>,
    {
        if text.len() != self.len() {
            return Err(BoundaryError::LengthMismatch {
                expected: self.len(),
                actual: text.len(),
            });
        }
        if let Some(entry) = self.index.iter().find(|entry| !text.is_boundary(entry.offset)) {
            return Err(BoundaryError::MalformedIndex(format!(
                "break at {} falls inside a character",
                entry.offset
            )));
        }
        Ok(Mapping {
            id: next_id(),
            generation: 0,
            kind: self.kind,
            text,
            index: self.index.clone(),
            mask: self.mask,
        })
    }

    /// Check that `bookmark` was taken from this mapping at its current
    /// generation and still points into the index.
    pub(crate) fn check_bookmark(&self, bookmark: &Bookmark) -> Result<()> {
        if bookmark.mapping_id != self.id {
            return Err(BoundaryError::ForeignCursor);
        }
        if bookmark.generation != self.generation {
            return Err(BoundaryError::StaleCursor {
                cursor: bookmark.generation,
                mapping: self.generation,
            });
        }
        if bookmark.position > self.index.len() {
            return Err(BoundaryError::OutOfRange {
                position: bookmark.position,
                len: self.index.len(),
            });
        }
        Ok(())
    }
}

impl<S: TextSource> Clone for Mapping<S> {
    /// The clone is a distinct mapping: cursors and bookmarks of one do not
    /// compare equal to, or restore against, the other.
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            generation: self.generation,
            kind: self.kind,
            text: self.text,
            index: self.index.clone(),
            mask: self.mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::types::{BreakEntry, word};

    /// Breaks after every byte, whatever the text.
    #[derive(Debug)]
    struct ByteOracle;

    impl BreakOracle for ByteOracle {
        fn locate_utf8(
            &self,
            _kind: BoundaryKind,
            _locale: &Locale,
            text: &str,
        ) -> Result<Vec<BreakEntry>> {
            Ok((0..=text.len())
                .map(|offset| BreakEntry::new(offset, if offset == 0 { 0 } else { ALL }))
                .collect())
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn mappings_cross_threads() {
        assert_send_sync::<Mapping<&str>>();
        assert_send_sync::<Mapping<&[u16]>>();
        assert_send_sync::<Mapping<crate::text::ChunkedStr<'static>>>();
    }

    #[test]
    fn oracle_breaks_inside_characters_are_rejected() {
        let locale = Locale::classic();
        let err = Mapping::with_oracle(&ByteOracle, BoundaryKind::Character, "é", ALL, &locale)
            .unwrap_err();
        assert!(matches!(err, BoundaryError::MalformedIndex(_)));

        // The same breaks are fine over bytes, which slice anywhere.
        let bytes: &[u8] = "é".as_bytes();
        let mapping =
            Mapping::with_oracle(&ByteOracle, BoundaryKind::Character, bytes, ALL, &locale)
                .unwrap();
        assert_eq!(mapping.index().len(), 3);
        assert_eq!(mapping.tokens().count(), 2);

        // Carrying them over to a str is refused.
        assert!(matches!(
            mapping.rebind("é"),
            Err(BoundaryError::MalformedIndex(_))
        ));

        // A failed remap keeps the old index.
        let mut mapping = Mapping::new(BoundaryKind::Word, "ok", &locale).unwrap();
        let before = mapping.index().clone();
        assert!(
            mapping
                .map_with_oracle(&ByteOracle, BoundaryKind::Word, "añ", Some(ALL), &locale)
                .is_err()
        );
        assert_eq!(mapping.index(), &before);
        assert_eq!(mapping.text(), "ok");
    }

    #[test]
    fn remap_bumps_generation_and_keeps_mask() {
        let locale = Locale::classic();
        let mut mapping =
            Mapping::with_mask(BoundaryKind::Word, "one two", word::ANY, &locale).unwrap();
        assert_eq!(mapping.generation(), 0);

        mapping.map(BoundaryKind::Word, "three", &locale).unwrap();
        assert_eq!(mapping.generation(), 1);
        assert_eq!(mapping.mask(), word::ANY);
        assert_eq!(mapping.len(), 5);

        mapping
            .map_with_mask(BoundaryKind::Character, "ab", ALL, &locale)
            .unwrap();
        assert_eq!(mapping.generation(), 2);
        assert_eq!(mapping.mask(), ALL);
        assert_eq!(mapping.kind(), BoundaryKind::Character);
        assert_eq!(mapping.index().len(), 3);
    }

    #[test]
    fn set_mask_does_not_rebuild() {
        let mut mapping = Mapping::new(BoundaryKind::Word, "a b", &Locale::classic()).unwrap();
        let before = mapping.index().clone();
        mapping.set_mask(word::LETTER);
        assert_eq!(mapping.mask(), word::LETTER);
        assert_eq!(mapping.generation(), 0);
        assert_eq!(mapping.index(), &before);
    }

    #[test]
    fn clones_get_fresh_identity() {
        let mapping = Mapping::new(BoundaryKind::Word, "a b", &Locale::classic()).unwrap();
        let copy = mapping.clone();
        assert_ne!(mapping.id(), copy.id());
        assert_eq!(mapping.index(), copy.index());
    }

    #[test]
    fn rebind_requires_same_length() {
        let owned = String::from("a b");
        let mapping = Mapping::new(BoundaryKind::Word, "a b", &Locale::classic()).unwrap();

        let bytes: &[u8] = owned.as_bytes();
        let rebound = mapping.rebind(bytes).unwrap();
        assert_eq!(rebound.index(), mapping.index());
        assert_ne!(rebound.id(), mapping.id());

        let short: &[u8] = b"ab";
        assert_eq!(
            mapping.rebind(short).unwrap_err(),
            BoundaryError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }
}
