//! Break oracles: the segmentation engines a boundary index is built from.
//!
//! An oracle turns a text into the full, unfiltered list of classified break
//! entries for one boundary kind. It must start the list at offset 0, end it
//! at the text length, and keep offsets strictly increasing. Offsets are in
//! the code units of the slice it was given.

use core::fmt;

use unicode_linebreak::{BreakOpportunity, linebreaks};
use unicode_segmentation::UnicodeSegmentation;

use super::types::{BoundaryKind, BreakEntry, RuleMask, character, line, sentence, word};
use crate::error::{BoundaryError, Result};
use crate::locale::Locale;
use crate::text::transcode::decode_utf16;
use crate::unicode::{
    ScriptRun, is_closing_punctuation, is_hard_line_terminator, is_ideographic, is_kana,
    is_sentence_terminator,
};

/// A segmentation engine producing classified breaks.
pub trait BreakOracle: fmt::Debug {
    /// Locate the breaks of UTF-8 text; offsets are byte offsets.
    ///
    /// # Errors
    /// Implementations report locale or encoding failures; they are
    /// propagated unchanged by the index builder.
    fn locate_utf8(
        &self,
        kind: BoundaryKind,
        locale: &Locale,
        text: &str,
    ) -> Result<Vec<BreakEntry>>;

    /// Locate the breaks of UTF-16 text; offsets are UTF-16 unit offsets.
    ///
    /// The default implementation decodes the text, runs [`locate_utf8`]
    /// and maps the offsets back.
    ///
    /// # Errors
    /// Returns [`BoundaryError::Encoding`] for unpaired surrogates, and
    /// whatever [`locate_utf8`] reports.
    ///
    /// [`locate_utf8`]: BreakOracle::locate_utf8
    fn locate_utf16(
        &self,
        kind: BoundaryKind,
        locale: &Locale,
        text: &[u16],
    ) -> Result<Vec<BreakEntry>> {
        let (decoded, map) = decode_utf16(text)?;
        self.locate_utf8(kind, locale, &decoded)?
            .into_iter()
            .map(|entry| {
                map.translate(entry.offset)
                    .map(|offset| BreakEntry::new(offset, entry.mask))
                    .ok_or_else(|| {
                        BoundaryError::MalformedIndex(format!(
                            "break at byte {} is not on a character boundary",
                            entry.offset
                        ))
                    })
            })
            .collect()
    }
}

/// Tailoring switches for [`UnicodeOracle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleOptions {
    /// Join adjacent ideographs (and adjacent hiragana) into one word.
    /// UAX #29 alone breaks between every such character.
    pub merge_cjk_runs: bool,
}

impl Default for OracleOptions {
    fn default() -> Self {
        Self {
            merge_cjk_runs: true,
        }
    }
}

/// Break oracle built on the Unicode segmentation algorithms: UAX #29 for
/// graphemes, words and sentences, UAX #14 for line breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeOracle {
    options: OracleOptions,
}

impl UnicodeOracle {
    pub fn new(options: OracleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> OracleOptions {
        self.options
    }
}

impl BreakOracle for UnicodeOracle {
    fn locate_utf8(
        &self,
        kind: BoundaryKind,
        _locale: &Locale,
        text: &str,
    ) -> Result<Vec<BreakEntry>> {
        let mut entries = vec![BreakEntry::new(0, 0)];
        match kind {
            BoundaryKind::Character => character_breaks(text, &mut entries),
            BoundaryKind::Word => word_breaks(text, self.options.merge_cjk_runs, &mut entries),
            BoundaryKind::Sentence => sentence_breaks(text, &mut entries),
            BoundaryKind::Line => line_breaks(text, &mut entries),
        }
        Ok(entries)
    }
}

fn character_breaks(text: &str, entries: &mut Vec<BreakEntry>) {
    entries.extend(
        text.grapheme_indices(true)
            .map(|(start, g)| BreakEntry::new(start + g.len(), character::ANY)),
    );
}

/// Mark of a word segment: the OR of the groups its characters fall into.
fn word_mark(segment: &str) -> RuleMask {
    let mark = segment.chars().fold(0, |mark, c| {
        mark | if c.is_numeric() {
            word::NUMBER
        } else if is_kana(c) {
            word::KANA
        } else if is_ideographic(c) {
            word::IDEO
        } else if c.is_alphabetic() {
            word::LETTER
        } else {
            0
        }
    });
    if mark == 0 { word::NONE } else { mark }
}

fn word_breaks(text: &str, merge_cjk_runs: bool, entries: &mut Vec<BreakEntry>) {
    let mut last_run = ScriptRun::Other;

    for (start, segment) in text.split_word_bound_indices() {
        let end = start + segment.len();
        let mark = word_mark(segment);
        let run = if merge_cjk_runs {
            ScriptRun::of(segment)
        } else {
            ScriptRun::Other
        };

        // The previous segment ends where this one starts; extend it.
        match entries.last_mut() {
            Some(last) if last.offset > 0 && last_run.joins(run) => {
                last.offset = end;
                last.mask |= mark;
            }
            _ => entries.push(BreakEntry::new(end, mark)),
        }
        last_run = run;
    }
}

fn line_breaks(text: &str, entries: &mut Vec<BreakEntry>) {
    let ends_hard = text.chars().next_back().is_some_and(is_hard_line_terminator);

    for (offset, opportunity) in linebreaks(text) {
        if offset == 0 {
            continue;
        }
        let mask = if offset == text.len() {
            // UAX #14 always breaks at end of text; only a real terminator
            // makes that break mandatory.
            if ends_hard { line::HARD } else { line::SOFT }
        } else {
            match opportunity {
                BreakOpportunity::Mandatory => line::HARD,
                BreakOpportunity::Allowed => line::SOFT,
            }
        };
        entries.push(BreakEntry::new(offset, mask));
    }
}

/// Mark of a sentence segment: `TERM` when its content ends in terminating
/// punctuation, `SEP` otherwise.
fn sentence_mark(segment: &str) -> RuleMask {
    let terminated = segment
        .trim_end()
        .trim_end_matches(is_closing_punctuation)
        .chars()
        .next_back()
        .is_some_and(is_sentence_terminator);
    if terminated { sentence::TERM } else { sentence::SEP }
}

fn sentence_breaks(text: &str, entries: &mut Vec<BreakEntry>) {
    entries.extend(
        text.split_sentence_bound_indices()
            .map(|(start, s)| BreakEntry::new(start + s.len(), sentence_mark(s))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(kind: BoundaryKind, text: &str) -> Vec<BreakEntry> {
        UnicodeOracle::default()
            .locate_utf8(kind, &Locale::classic(), text)
            .unwrap()
    }

    fn offsets(entries: &[BreakEntry]) -> Vec<usize> {
        entries.iter().map(|e| e.offset).collect()
    }

    #[test]
    fn empty_text_has_only_the_start() {
        for kind in BoundaryKind::ALL {
            assert_eq!(locate(kind, ""), vec![BreakEntry::new(0, 0)]);
        }
    }

    #[test]
    fn character_breaks_follow_graphemes() {
        let text = "a\u{0301}b"; // a + COMBINING ACUTE, b
        let entries = locate(BoundaryKind::Character, text);
        assert_eq!(offsets(&entries), vec![0, 3, 4]);
        assert!(entries[1..].iter().all(|e| e.mask == character::ANY));
    }

    #[test]
    fn word_marks() {
        let text = "Hello, world 42";
        let entries = locate(BoundaryKind::Word, text);
        assert_eq!(offsets(&entries), vec![0, 5, 6, 7, 12, 13, 15]);
        let marks: Vec<_> = entries.iter().map(|e| e.mask).collect();
        assert_eq!(
            marks,
            vec![
                0,
                word::LETTER,
                word::NONE,
                word::NONE,
                word::LETTER,
                word::NONE,
                word::NUMBER
            ]
        );
    }

    #[test]
    fn mixed_letters_and_digits_carry_both_groups() {
        let entries = locate(BoundaryKind::Word, "Windows7");
        assert_eq!(entries[1], BreakEntry::new(8, word::LETTER | word::NUMBER));
    }

    #[test]
    fn cjk_runs_merge_only_when_enabled() {
        let text = "平仮名ひらがな";
        let merged = locate(BoundaryKind::Word, text);
        assert_eq!(offsets(&merged), vec![0, 9, 21]);
        assert_eq!(merged[1].mask, word::IDEO);
        assert_eq!(merged[2].mask, word::KANA);

        let split = UnicodeOracle::new(OracleOptions {
            merge_cjk_runs: false,
        })
        .locate_utf8(BoundaryKind::Word, &Locale::classic(), text)
        .unwrap();
        assert_eq!(split.len(), 8);
    }

    #[test]
    fn line_break_kinds() {
        let text = "a b\nc";
        let entries = locate(BoundaryKind::Line, text);
        assert_eq!(
            entries,
            vec![
                BreakEntry::new(0, 0),
                BreakEntry::new(2, line::SOFT),
                BreakEntry::new(4, line::HARD),
                BreakEntry::new(5, line::SOFT),
            ]
        );

        let trailing = locate(BoundaryKind::Line, "a\n");
        assert_eq!(trailing.last(), Some(&BreakEntry::new(2, line::HARD)));
    }

    #[test]
    fn sentence_marks() {
        let text = "Hello!How\nAre you?\n";
        let entries = locate(BoundaryKind::Sentence, text);
        assert_eq!(
            entries,
            vec![
                BreakEntry::new(0, 0),
                BreakEntry::new(6, sentence::TERM),
                BreakEntry::new(10, sentence::SEP),
                BreakEntry::new(20, sentence::TERM),
            ]
        );
    }

    #[test]
    fn sentence_mark_sees_through_closing_quotes() {
        assert_eq!(sentence_mark("He said \"stop.\" "), sentence::TERM);
        assert_eq!(sentence_mark("no ending"), sentence::SEP);
        assert_eq!(sentence_mark("line\n"), sentence::SEP);
    }

    #[test]
    fn utf16_offsets_are_in_units() {
        let units: Vec<u16> = "日本 語".encode_utf16().collect();
        let entries = UnicodeOracle::default()
            .locate_utf16(BoundaryKind::Character, &Locale::classic(), &units)
            .unwrap();
        assert_eq!(offsets(&entries), vec![0, 1, 2, 3, 4]);
    }
}
