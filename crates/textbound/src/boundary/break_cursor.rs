use core::{fmt, ptr};

use super::bookmark::Bookmark;
use super::mapping::{CursorKind, Mapping};
use super::types::{ALL, BreakEntry, RuleMask};
use crate::error::{BoundaryError, Result};
use crate::text::TextSource;

/// A bidirectional cursor over the break positions of a [`Mapping`].
///
/// Position 0 (start of text) and the last break (end of text) are always
/// stops; every other break is a stop only when its mark intersects the
/// cursor's mask. Position `index.len()` is the end sentinel.
pub struct BreakCursor<'m, S> {
    mapping: Option<&'m Mapping<S>>,
    position: usize,
    mask: RuleMask,
}

impl<'m, S: TextSource> BreakCursor<'m, S> {
    pub(crate) fn at(mapping: &'m Mapping<S>, position: usize, mask: RuleMask) -> Self {
        Self {
            mapping: Some(mapping),
            position,
            mask,
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
        Ok(Self::at(mapping, bookmark.position, bookmark.mask))
    }

    fn entries(&self) -> &'m [BreakEntry] {
        self.mapping
            .map(|mapping| mapping.index().entries())
            .unwrap_or_default()
    }

    fn is_stop(&self, position: usize) -> bool {
        let entries = self.entries();
        position == 0 || position + 1 >= entries.len() || entries[position].mask & self.mask != 0
    }

    /// Step to the next stop, or to the end sentinel. Returns `false` if the
    /// cursor was already at the end.
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

    /// Step to the previous stop. Returns `false` if the cursor was already
    /// at the start, or if the text is empty and has no stop to step back to.
    pub fn move_prev(&mut self) -> bool {
        if self.position == 0 || self.entries().len() <= 1 {
            return false;
        }
        self.position -= 1;
        while self.position > 0 && !self.is_stop(self.position) {
            self.position -= 1;
        }
        true
    }

    fn entry(&self) -> Result<BreakEntry> {
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        mapping.index().get(self.position)
    }

    /// Offset of the break in code units from the start of the text.
    ///
    /// # Errors
    /// [`BoundaryError::OutOfRange`] at the end sentinel,
    /// [`BoundaryError::Unbound`] for a default cursor.
    pub fn get(&self) -> Result<usize> {
        self.entry().map(|entry| entry.offset)
    }

    /// Classification of the break.
    ///
    /// # Errors
    /// As [`get`](Self::get).
    pub fn mark(&self) -> Result<RuleMask> {
        self.entry().map(|entry| entry.mask)
    }

    /// Move to the first stop at or after `offset`.
    ///
    /// Offsets past the end of the text land on the final break. An empty
    /// text lands on the end sentinel, like [`begin`](CursorKind::begin).
    ///
    /// # Errors
    /// [`BoundaryError::Unbound`] for a default cursor.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        let mapping = self.mapping.ok_or(BoundaryError::Unbound)?;
        let index = mapping.index();
        let len = index.len();
        if len <= 1 {
            self.position = len;
            return Ok(());
        }
        self.position = index.lower_bound(offset).min(len - 1);
        while self.position < len && !self.is_stop(self.position) {
            self.position += 1;
        }
        Ok(())
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
            full_select: false,
        })
    }
}

impl<'m, S: TextSource> CursorKind<'m, S> for BreakCursor<'m, S> {
    fn begin(mapping: &'m Mapping<S>) -> Self {
        // An empty text has only its start entry; begin coincides with end.
        let len = mapping.index().len();
        let position = if len > 1 { 0 } else { len };
        Self::at(mapping, position, mapping.mask())
    }

    fn end(mapping: &'m Mapping<S>) -> Self {
        Self::at(mapping, mapping.index().len(), mapping.mask())
    }
}

impl<S> Default for BreakCursor<'_, S> {
    fn default() -> Self {
        Self {
            mapping: None,
            position: 0,
            mask: ALL,
        }
    }
}

impl<S> Clone for BreakCursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BreakCursor<'_, S> {}

impl<S> PartialEq for BreakCursor<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        let same_mapping = match (self.mapping, other.mapping) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_mapping && self.position == other.position && self.mask == other.mask
    }
}

impl<S> Eq for BreakCursor<'_, S> {}

impl<S: TextSource> fmt::Debug for BreakCursor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakCursor")
            .field("mapping", &self.mapping.map(|m| m.id()))
            .field("position", &self.position)
            .field("mask", &format_args!("{:#x}", self.mask))
            .finish()
    }
}
