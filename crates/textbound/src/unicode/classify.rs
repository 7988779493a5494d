/// Returns `true` for hiragana letters and marks.
pub fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{309F}' | '\u{1B001}'..='\u{1B11F}')
}

/// Returns `true` for hiragana or katakana, including halfwidth katakana.
pub fn is_kana(c: char) -> bool {
    is_hiragana(c)
        || matches!(
            c,
            '\u{30A0}'..='\u{30FF}'
                | '\u{31F0}'..='\u{31FF}'
                | '\u{FF66}'..='\u{FF9F}'
                | '\u{1B000}'
                | '\u{1B120}'..='\u{1B16F}'
        )
}

/// Returns `true` for CJK ideographs and the ideographic iteration marks.
pub fn is_ideographic(c: char) -> bool {
    matches!(
        c,
        '\u{3005}'
            | '\u{3007}'
            | '\u{3021}'..='\u{3029}'
            | '\u{3038}'..='\u{303B}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{3134F}'
    )
}

/// Returns `true` for characters that end a sentence (UAX #29 STerm/ATerm).
pub fn is_sentence_terminator(c: char) -> bool {
    matches!(
        c,
        '.' | '!'
            | '?'
            | '\u{0589}'
            | '\u{061F}'
            | '\u{06D4}'
            | '\u{0964}'
            | '\u{0965}'
            | '\u{203C}'
            | '\u{203D}'
            | '\u{2047}'..='\u{2049}'
            | '\u{2E2E}'
            | '\u{3002}'
            | '\u{FE52}'
            | '\u{FE56}'
            | '\u{FE57}'
            | '\u{FF01}'
            | '\u{FF0E}'
            | '\u{FF1F}'
            | '\u{FF61}'
    )
}

/// Returns `true` for closing quotes and brackets that may trail a terminator.
pub fn is_closing_punctuation(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | ')'
            | ']'
            | '}'
            | '\u{00BB}'
            | '\u{2019}'
            | '\u{201D}'
            | '\u{203A}'
            | '\u{300D}'
            | '\u{300F}'
            | '\u{3011}'
            | '\u{FF09}'
            | '\u{FF63}'
    )
}

/// Returns `true` for characters after which a line must break (UAX #14 BK, CR, LF, NL).
pub fn is_hard_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Script class of a whole word segment, used to join CJK runs that UAX #29
/// splits into one segment per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptRun {
    Ideographic,
    Hiragana,
    Other,
}

impl ScriptRun {
    /// Classify a segment: `Ideographic` or `Hiragana` only if every char is.
    pub fn of(segment: &str) -> Self {
        if segment.is_empty() {
            ScriptRun::Other
        } else if segment.chars().all(is_ideographic) {
            ScriptRun::Ideographic
        } else if segment.chars().all(is_hiragana) {
            ScriptRun::Hiragana
        } else {
            ScriptRun::Other
        }
    }

    /// Returns `true` if two adjacent segments of this class form one word.
    pub fn joins(self, next: ScriptRun) -> bool {
        self == next && self != ScriptRun::Other
    }
}
