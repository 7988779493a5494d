use core::fmt;
use core::str::FromStr;

use crate::error::{BoundaryError, Result};

/// Classification bits attached to a break, and the filter cursors apply.
pub type RuleMask = u32;

/// Mask with every bit set: no filtering.
pub const ALL: RuleMask = 0xFFFF_FFFF;

/// Marks for character boundaries.
pub mod character {
    use super::RuleMask;

    /// Every character break carries this mark.
    pub const ANY: RuleMask = 0xF;
    pub const MASK: RuleMask = 0xF;
}

/// Marks for word boundaries, describing the token that ends at the break.
///
/// A break may carry several groups at once, e.g. `LETTER | NUMBER` for
/// `Windows7`.
pub mod word {
    use super::RuleMask;

    /// Not a word: whitespace, punctuation and the like.
    pub const NONE: RuleMask = 0x0000F;
    pub const NUMBER: RuleMask = 0x000F0;
    /// Letters other than kana and ideographs.
    pub const LETTER: RuleMask = 0x00F00;
    /// Hiragana and katakana.
    pub const KANA: RuleMask = 0x0F000;
    pub const IDEO: RuleMask = 0xF0000;
    /// Any word, excluding `NONE`.
    pub const ANY: RuleMask = 0xFFFF0;
    /// Any word containing letters, kana or ideographs.
    pub const LETTERS: RuleMask = 0xFFF00;
    pub const KANA_IDEO: RuleMask = 0xFF000;
    pub const MASK: RuleMask = 0xFFFFF;
}

/// Marks for line break opportunities.
pub mod line {
    use super::RuleMask;

    /// A line may be broken here.
    pub const SOFT: RuleMask = 0x0F;
    /// A line must be broken here.
    pub const HARD: RuleMask = 0xF0;
    pub const ANY: RuleMask = 0xFF;
    pub const MASK: RuleMask = 0xFF;
}

/// Marks for sentence boundaries.
pub mod sentence {
    use super::RuleMask;

    /// The sentence ends with terminating punctuation such as `.` or `?`.
    pub const TERM: RuleMask = 0x0F;
    /// The sentence ends with a paragraph separator or the end of text.
    pub const SEP: RuleMask = 0xF0;
    pub const ANY: RuleMask = 0xFF;
    pub const MASK: RuleMask = 0xFF;
}

const MASK_NAMES: &[(&str, RuleMask)] = &[
    ("all", ALL),
    ("character_any", character::ANY),
    ("character_mask", character::MASK),
    ("word_none", word::NONE),
    ("word_number", word::NUMBER),
    ("word_letter", word::LETTER),
    ("word_kana", word::KANA),
    ("word_ideo", word::IDEO),
    ("word_any", word::ANY),
    ("word_letters", word::LETTERS),
    ("word_kana_ideo", word::KANA_IDEO),
    ("word_mask", word::MASK),
    ("line_soft", line::SOFT),
    ("line_hard", line::HARD),
    ("line_any", line::ANY),
    ("line_mask", line::MASK),
    ("sentence_term", sentence::TERM),
    ("sentence_sep", sentence::SEP),
    ("sentence_any", sentence::ANY),
    ("sentence_mask", sentence::MASK),
];

/// Parse a mask expression: `|`-separated constant names, hex (`0xF00`) or
/// decimal literals, OR-ed together.
///
/// # Errors
/// Returns [`BoundaryError::InvalidMask`] for empty terms and unknown names.
pub fn parse_mask(expr: &str) -> Result<RuleMask> {
    expr.split('|').try_fold(0, |acc, term| {
        let term = term.trim();
        let value = if let Some(hex) = term
            .strip_prefix("0x")
            .or_else(|| term.strip_prefix("0X"))
        {
            RuleMask::from_str_radix(hex, 16).ok()
        } else if term.starts_with(|c: char| c.is_ascii_digit()) {
            term.parse::<RuleMask>().ok()
        } else {
            let name = term.to_ascii_lowercase().replace(['.', '-'], "_");
            MASK_NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|&(_, value)| value)
        };
        value
            .map(|value| acc | value)
            .ok_or_else(|| BoundaryError::InvalidMask(format!("`{term}` in `{expr}`")))
    })
}

/// Granularity of segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Extended grapheme clusters.
    Character,
    Word,
    Sentence,
    /// Line break opportunities.
    Line,
}

impl BoundaryKind {
    pub const ALL: [BoundaryKind; 4] = [
        BoundaryKind::Character,
        BoundaryKind::Word,
        BoundaryKind::Sentence,
        BoundaryKind::Line,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BoundaryKind::Character => "character",
            BoundaryKind::Word => "word",
            BoundaryKind::Sentence => "sentence",
            BoundaryKind::Line => "line",
        }
    }

    /// All mark bits this kind can produce.
    pub fn mask_bits(self) -> RuleMask {
        match self {
            BoundaryKind::Character => character::MASK,
            BoundaryKind::Word => word::MASK,
            BoundaryKind::Sentence => sentence::MASK,
            BoundaryKind::Line => line::MASK,
        }
    }

    /// Render a break mark as `|`-separated group names.
    pub fn describe_mark(self, mark: RuleMask) -> String {
        let groups: &[(RuleMask, &str)] = match self {
            BoundaryKind::Character => &[(character::ANY, "character")],
            BoundaryKind::Word => &[
                (word::NUMBER, "number"),
                (word::LETTER, "letter"),
                (word::KANA, "kana"),
                (word::IDEO, "ideo"),
            ],
            BoundaryKind::Sentence => &[(sentence::TERM, "term"), (sentence::SEP, "sep")],
            BoundaryKind::Line => &[(line::SOFT, "soft"), (line::HARD, "hard")],
        };
        let names: Vec<&str> = groups
            .iter()
            .filter(|(bits, _)| mark & bits != 0)
            .map(|&(_, name)| name)
            .collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join("|")
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryKind {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" | "char" | "grapheme" => Ok(BoundaryKind::Character),
            "word" => Ok(BoundaryKind::Word),
            "sentence" => Ok(BoundaryKind::Sentence),
            "line" => Ok(BoundaryKind::Line),
            other => Err(BoundaryError::UnknownKind(other.to_string())),
        }
    }
}

/// One classified cut point: a code-unit offset from the start of the text
/// and the mark of the token that ends there.
///
/// Entries are ordered and searched by `offset` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BreakEntry {
    pub offset: usize,
    pub mask: RuleMask,
}

impl BreakEntry {
    pub const fn new(offset: usize, mask: RuleMask) -> Self {
        Self { offset, mask }
    }
}
