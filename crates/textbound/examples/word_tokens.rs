//! Print the words of a Japanese sample with their classifications.
//!
//! Run with: cargo run -p textbound --example word_tokens

use textbound::{BoundaryKind, Locale, Mapping, word};

fn main() -> Result<(), textbound::BoundaryError> {
    let locale = Locale::parse("ja_JP.UTF-8")?;
    let text = "10 Hello Windows7 平仮名ひらがなヒラガナ";
    let mapping = Mapping::with_mask(BoundaryKind::Word, text, word::ANY, &locale)?;

    for token in mapping.tokens() {
        println!(
            "{:>2}..{:<2} {:<12} {}",
            token.range.start,
            token.range.end,
            BoundaryKind::Word.describe_mark(token.mark),
            token.text
        );
    }
    Ok(())
}
