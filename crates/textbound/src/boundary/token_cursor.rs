use core::ops::Range;
use core::{fmt, ptr};

use super::bookmark::Bookmark;
use super::mapping::{CursorKind, Mapping};
use super::types::{ALL, BreakEntry, RuleMask};
use crate::error::{BoundaryError, Result};
use crate::text::TextSource;

/// A bidirectional cursor over the tokens of a [`Mapping`].
///
/// The position names the break that ends the current token. Position 0 has
/// no token before it and `index.len()` is the end sentinel; unlike
/// [`BreakCursor`](super::BreakCursor), the final break of the text is
/// filtered by the mask like any other.
pub struct TokenCursor<'m, S> {
    mapping: Option<&'m Mapping<S>>,
    position: usize,
    mask: RuleMask,
    full_select: bool,
}

impl<'m, S: TextSource> TokenCursor<'m, S> {
    pub(crate) fn at(mapping: &'m Mapping<S>, position: usize, mask: RuleMask) -> Self {
        Self {
            mapping: Some(mapping),
            position,
            mask,
            full_select: false,
        }
    }

    /// Rebuild a cursor from a bookmark taken on `mapping`.
    ///
    /// # Errors
    /// [`BoundaryError::ForeignCursor`] if the bookmark comes from another
    /// mapping, [`BoundaryError::StaleCursor`] if the mapping was remapped
    /// since.
    pub fn restore(mapping: &'m Mapping<S>, bookmark: &Bookmark) -> Result<Self> {
        mapping.check_bookmark(bookmark)?;
        let mut cursor = Self::at(mapping, bookmark.position, bookmark.mask);
        cursor.full_select = bookmark.full_select;
        Ok(cursor)
    }

    fn entries(&self) -> &'m [BreakEntry] {
        self.mapping
            .map(|mapping| mapping.index().entries())
            .unwrap_or_default()
    }

    fn is_stop(&self, position: usize) -> bool {
        let entries = self.entries();
        position == 0 || position == entries.len() || entries[position].mask & self.mask != 0
    }

    /// Step to the end of the next token, or to the end sentinel. Returns
    /// `false` if the cursor was already at the end.
    pub fn move_next(&mut self) -> bool {
        let len = self.entries().len();
        if self.position >= len {
            return false;
        }
        self.position += 1;
        while self.position < len && !self.is_stop(self.position) {
            self.position += 1;
        }
        true
    }

    /// Step to the end of the previous token. Returns `false` if the cursor
    /// was already at position 0.
    pub fn move_prev(&mut self) -> bool {
        if self.position == 0 || self.mapping.is_none() {
            return false;
        }
        self.position -= 1;
        while self.position > 0 && !self.is_stop(self.position) {
            self.position -= 1;
        }
        true
    }

    /// The token as a range of code-unit offsets.
    ///
    /// With `full_select` the token starts at the previous stop, taking in
    /// any filtered breaks; otherwise it starts at the break just before.
    ///
    /// # Errors
    /// [`BoundaryError::OutOfRange`] at position 0 or at the end sentinel,
    /// [`BoundaryError::Unbound`] for a default cursor.
    pub fn range(&self) -> Result<Range<usize>> {
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        let entries = mapping.index().entries();
        if self.position == 0 || self.position >= entries.len() {
            return Err(BoundaryError::OutOfRange {
                position: self.position,
                len: entries.len(),
            });
        }

        let mut start = self.position - 1;
        if self.full_select {
            while !self.is_stop(start) {
                start -= 1;
            }
        }
        Ok(entries[start].offset..entries[self.position].offset)
    }

    /// The text of the current token.
    ///
    /// # Errors
    /// As [`range`](Self::range).
    pub fn get(&self) -> Result<S::Slice> {
        let range = self.range()?;
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        Ok(mapping.text().slice(range))
    }

    /// Classification of the token, i.e. of the break that ends it.
    ///
    /// # Errors
    /// [`BoundaryError::OutOfRange`] at the end sentinel.
    pub fn mark(&self) -> Result<RuleMask> {
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        mapping.index().get(self.position).map(|entry| entry.mask)
    }

    /// Move to the end of the token containing `offset`.
    ///
    /// Lands on the first stop at or after `offset`; an offset of 0 means
    /// the first token, and offsets past the text land on the last token.
    ///
    /// # Errors
    /// [`BoundaryError::Unbound`] for a default cursor.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        let index = mapping.index();
        self.position = index.lower_bound(offset).min(index.len() - 1);
        if self.position == 0 {
            self.move_next();
        }
        while self.position < index.len() && !self.is_stop(self.position) {
            self.position += 1;
        }
        Ok(())
    }

    pub fn full_select(&self) -> bool {
        self.full_select
    }

    /// Merge filtered breaks into the token on dereference. Stepping is
    /// unaffected.
    pub fn set_full_select(&mut self, full_select: bool) {
        self.full_select = full_select;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn mask(&self) -> RuleMask {
        self.mask
    }

    pub fn mapping(&self) -> Option<&'m Mapping<S>> {
        self.mapping
    }

    /// Detach the cursor state from the mapping borrow.
    ///
    /// # Errors
    /// [`BoundaryError::Unbound`] for a default cursor.
    pub fn bookmark(&self) -> Result<Bookmark> {
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        Ok(Bookmark {
            mapping_id: mapping.id(),
            generation: mapping.generation(),
            position: self.position,
            mask: self.mask,
            full_select: self.full_select,
        })
    }
}

impl<'m, S: TextSource> CursorKind<'m, S> for TokenCursor<'m, S> {
    fn begin(mapping: &'m Mapping<S>) -> Self {
        let mut cursor = Self::at(mapping, 0, mapping.mask());
        cursor.move_next();
        cursor
    }

    fn end(mapping: &'m Mapping<S>) -> Self {
        Self::at(mapping, mapping.index().len(), mapping.mask())
    }
}

impl<S> Default for TokenCursor<'_, S> {
    fn default() -> Self {
        Self {
            mapping: None,
            position: 0,
            mask: ALL,
            full_select: false,
        }
    }
}

impl<S> Clone for TokenCursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TokenCursor<'_, S> {}

impl<S> PartialEq for TokenCursor<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        let same_mapping = match (self.mapping, other.mapping) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_mapping && self.position == other.position && self.mask == other.mask
    }
}

impl<S> Eq for TokenCursor<'_, S> {}

impl<S: TextSource> fmt::Debug for TokenCursor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCursor")
            .field("mapping", &self.mapping.map(|m| m.id()))
            .field("position", &self.position)
            .field("mask", &format_args!("{:#x}", self.mask))
            .field("full_select", &self.full_select)
            .finish()
    }
}
