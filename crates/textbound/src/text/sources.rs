use core::ops::Range;

use super::{CodeUnit, TextSource};

impl<'t> TextSource for &'t str {
    type Unit = u8;
    type Slice = &'t str;

    const UTF8: bool = true;

    fn len(&self) -> usize {
        str::len(self)
    }

    fn as_utf8(&self) -> Option<&str> {
        Some(*self)
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }

    fn copy_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }

    fn is_boundary(&self, offset: usize) -> bool {
        self.is_char_boundary(offset)
    }

    fn slice(&self, range: Range<usize>) -> &'t str {
        let text: &'t str = *self;
        &text[range]
    }
}

impl<'t, U: CodeUnit> TextSource for &'t [U] {
    type Unit = U;
    type Slice = &'t [U];

    fn len(&self) -> usize {
        <[U]>::len(self)
    }

    fn as_contiguous(&self) -> Option<&[U]> {
        Some(*self)
    }

    fn copy_into(&self, buf: &mut Vec<U>) {
        buf.extend_from_slice(self);
    }

    fn slice(&self, range: Range<usize>) -> &'t [U] {
        let units: &'t [U] = *self;
        &units[range]
    }
}

/// Text split across several non-contiguous slices, e.g. the pieces of a
/// rope or a gap buffer.
///
/// Boundaries are computed over the concatenation; tokens that cross a chunk
/// boundary are materialized into an owned buffer.
#[derive(Debug, Clone, Copy)]
pub struct Chunked<'t, U> {
    chunks: &'t [&'t [U]],
    len: usize,
}

impl<'t, U: CodeUnit> Chunked<'t, U> {
    pub fn new(chunks: &'t [&'t [U]]) -> Self {
        let len = chunks.iter().map(|chunk| chunk.len()).sum();
        Self { chunks, len }
    }

    pub fn chunks(&self) -> &'t [&'t [U]] {
        self.chunks
    }
}

impl<U: CodeUnit> TextSource for Chunked<'_, U> {
    type Unit = U;
    type Slice = Vec<U>;

    fn len(&self) -> usize {
        self.len
    }

    fn as_contiguous(&self) -> Option<&[U]> {
        None
    }

    fn copy_into(&self, buf: &mut Vec<U>) {
        for chunk in self.chunks {
            buf.extend_from_slice(chunk);
        }
    }

    fn slice(&self, range: Range<usize>) -> Vec<U> {
        let mut out = Vec::with_capacity(range.len());
        for (i, sub) in pieces(self.chunks.iter().map(|c| c.len()), range) {
            out.extend_from_slice(&self.chunks[i][sub]);
        }
        out
    }
}

/// UTF-8 text split across several string slices.
#[derive(Debug, Clone, Copy)]
pub struct ChunkedStr<'t> {
    chunks: &'t [&'t str],
    len: usize,
}

impl<'t> ChunkedStr<'t> {
    pub fn new(chunks: &'t [&'t str]) -> Self {
        let len = chunks.iter().map(|chunk| chunk.len()).sum();
        Self { chunks, len }
    }

    pub fn chunks(&self) -> &'t [&'t str] {
        self.chunks
    }
}

impl TextSource for ChunkedStr<'_> {
    type Unit = u8;
    type Slice = String;

    const UTF8: bool = true;

    fn len(&self) -> usize {
        self.len
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        None
    }

    fn copy_into(&self, buf: &mut Vec<u8>) {
        for chunk in self.chunks {
            buf.extend_from_slice(chunk.as_bytes());
        }
    }

    fn is_boundary(&self, offset: usize) -> bool {
        let mut start = 0;
        for chunk in self.chunks {
            if offset < start + chunk.len() {
                return chunk.is_char_boundary(offset - start);
            }
            start += chunk.len();
        }
        offset == start
    }

    fn slice(&self, range: Range<usize>) -> String {
        let mut out = String::with_capacity(range.len());
        for (i, sub) in pieces(self.chunks.iter().map(|c| c.len()), range) {
            out.push_str(&self.chunks[i][sub]);
        }
        out
    }
}

/// Split a global `range` into per-chunk sub-ranges, given chunk lengths.
fn pieces<I>(chunk_lens: I, range: Range<usize>) -> impl Iterator<Item = (usize, Range<usize>)>
where
    I: Iterator<Item = usize>,
{
    let (lo, hi) = (range.start, range.end);
    chunk_lens
        .enumerate()
        .scan(0usize, |base, (i, len)| {
            let start = *base;
            *base += len;
            Some((i, start, len))
        })
        .take_while(move |&(_, start, _)| start < hi)
        .filter_map(move |(i, start, len)| {
            let end = start + len;
            if end <= lo || len == 0 {
                return None;
            }
            let from = lo.saturating_sub(start);
            let to = (hi - start).min(len);
            Some((i, from..to))
        })
}
