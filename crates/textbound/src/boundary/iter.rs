//! Iterator adapters over a mapping's cursors.
//!
//! Both adapters walk a front and a back cursor towards each other and stop
//! when they meet, so mixing `next` and `next_back` never yields an item
//! twice.

use core::iter::FusedIterator;
use core::ops::Range;

use super::break_cursor::BreakCursor;
use super::mapping::{CursorKind, Mapping};
use super::token_cursor::TokenCursor;
use super::types::RuleMask;
use crate::text::TextSource;

/// A break position and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BreakPoint {
    pub offset: usize,
    pub mark: RuleMask,
}

/// A token: its text, its offsets and the mark of the break ending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<T> {
    pub text: T,
    pub range: Range<usize>,
    pub mark: RuleMask,
}

/// Iterator over the valid break positions of a [`Mapping`].
#[derive(Debug)]
pub struct Breaks<'m, S: TextSource> {
    front: BreakCursor<'m, S>,
    back: BreakCursor<'m, S>,
}

impl<'m, S: TextSource> Breaks<'m, S> {
    pub(crate) fn new(mapping: &'m Mapping<S>) -> Self {
        Self {
            front: BreakCursor::begin(mapping),
            back: BreakCursor::end(mapping),
        }
    }

    fn point(cursor: &BreakCursor<'m, S>) -> Option<BreakPoint> {
        Some(BreakPoint {
            offset: cursor.get().ok()?,
            mark: cursor.mark().ok()?,
        })
    }
}

impl<S: TextSource> Iterator for Breaks<'_, S> {
    type Item = BreakPoint;

    fn next(&mut self) -> Option<BreakPoint> {
        if self.front.position() >= self.back.position() {
            return None;
        }
        let point = Self::point(&self.front);
        self.front.move_next();
        point
    }
}

impl<S: TextSource> DoubleEndedIterator for Breaks<'_, S> {
    fn next_back(&mut self) -> Option<BreakPoint> {
        if self.front.position() >= self.back.position() {
            return None;
        }
        self.back.move_prev();
        Self::point(&self.back)
    }
}

impl<S: TextSource> FusedIterator for Breaks<'_, S> {}

/// Iterator over the tokens of a [`Mapping`].
#[derive(Debug)]
pub struct Tokens<'m, S: TextSource> {
    front: TokenCursor<'m, S>,
    back: TokenCursor<'m, S>,
}

impl<'m, S: TextSource> Tokens<'m, S> {
    pub(crate) fn new(mapping: &'m Mapping<S>) -> Self {
        Self {
            front: TokenCursor::begin(mapping),
            back: TokenCursor::end(mapping),
        }
    }

    /// Merge filtered breaks into the tokens yielded from now on.
    pub fn full_select(mut self, full_select: bool) -> Self {
        self.front.set_full_select(full_select);
        self.back.set_full_select(full_select);
        self
    }

    fn segment(cursor: &TokenCursor<'m, S>) -> Option<Segment<S::Slice>> {
        let range = cursor.range().ok()?;
        Some(Segment {
            text: cursor.get().ok()?,
            range,
            mark: cursor.mark().ok()?,
        })
    }
}

impl<S: TextSource> Iterator for Tokens<'_, S> {
    type Item = Segment<S::Slice>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front.position() >= self.back.position() {
            return None;
        }
        let segment = Self::segment(&self.front);
        self.front.move_next();
        segment
    }
}

impl<S: TextSource> DoubleEndedIterator for Tokens<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front.position() >= self.back.position() {
            return None;
        }
        self.back.move_prev();
        Self::segment(&self.back)
    }
}

impl<S: TextSource> FusedIterator for Tokens<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::types::{BoundaryKind, word};
    use crate::locale::Locale;

    #[test]
    fn breaks_both_ways() {
        let mapping = Mapping::new(BoundaryKind::Word, "a b", &Locale::classic()).unwrap();
        let forward: Vec<usize> = mapping.breaks().map(|b| b.offset).collect();
        let mut backward: Vec<usize> = mapping.breaks().rev().map(|b| b.offset).collect();
        backward.reverse();
        assert_eq!(forward, vec![0, 1, 2, 3]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn front_and_back_meet_once() {
        let mapping = Mapping::new(BoundaryKind::Word, "a b c", &Locale::classic()).unwrap();
        let mut tokens = mapping.tokens();
        assert_eq!(tokens.next().map(|s| s.text), Some("a"));
        assert_eq!(tokens.next_back().map(|s| s.text), Some("c"));
        assert_eq!(tokens.next().map(|s| s.text), Some(" "));
        assert_eq!(tokens.next_back().map(|s| s.text), Some(" "));
        assert_eq!(tokens.next_back().map(|s| s.text), Some("b"));
        assert!(tokens.next().is_none());
        assert!(tokens.next_back().is_none());
    }

    #[test]
    fn tokens_carry_ranges_and_marks() {
        let mapping = Mapping::with_mask(
            BoundaryKind::Word,
            "Hi, you",
            word::ANY,
            &Locale::classic(),
        )
        .unwrap();
        let segments: Vec<_> = mapping.tokens().collect();
        assert_eq!(
            segments,
            vec![
                Segment {
                    text: "Hi",
                    range: 0..2,
                    mark: word::LETTER
                },
                Segment {
                    text: "you",
                    range: 4..7,
                    mark: word::LETTER
                },
            ]
        );

        let merged: Vec<_> = mapping.tokens().full_select(true).map(|s| s.text).collect();
        assert_eq!(merged, vec!["Hi", ", you"]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        let mapping = Mapping::new(BoundaryKind::Word, "", &Locale::classic()).unwrap();
        assert_eq!(mapping.breaks().count(), 0);
        assert_eq!(mapping.tokens().count(), 0);
    }
}
