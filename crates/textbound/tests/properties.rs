use std::collections::BTreeSet;

use anyhow::Result;
use textbound::{
    ALL, BoundaryIndex, BoundaryKind, BreakCursor, Locale, Mapping, RuleMask, TokenCursor,
    UnicodeOracle, line, sentence, word,
};

const SAMPLES: &[&str] = &[
    "",
    "a",
    "Hello, world 42",
    "10 Hello Windows7 平仮名ひらがなヒラガナ",
    "Hello!How\nAre you?\n",
    "Mr. Smith went to Washington. He said \"hi.\"  Then left.",
    "e\u{0301}le\u{0300}ve  👍🏽 🇫🇷\r\n",
    "tab\tseparated\u{2029}paragraphs  ",
];

fn mappings() -> Result<Vec<Mapping<&'static str>>> {
    let locale = Locale::classic();
    let mut out = Vec::new();
    for &text in SAMPLES {
        for kind in BoundaryKind::ALL {
            out.push(Mapping::new(kind, text, &locale)?);
        }
    }
    Ok(out)
}

#[test]
fn index_invariants_hold() -> Result<()> {
    for mapping in mappings()? {
        let entries = mapping.index().entries();
        assert_eq!(entries[0].offset, 0);
        assert_eq!(entries[0].mask, 0);
        assert_eq!(entries[entries.len() - 1].offset, mapping.len());
        assert!(entries.windows(2).all(|w| w[0].offset < w[1].offset));
        assert!(entries.iter().all(|e| mapping.text().is_char_boundary(e.offset)));
    }
    Ok(())
}

#[test]
fn lower_bound_is_first_not_less() -> Result<()> {
    for mapping in mappings()? {
        let index = mapping.index();
        assert_eq!(index.lower_bound(0), 0);
        assert_eq!(index.lower_bound(mapping.len() + 1), index.len());
        for offset in 0..=mapping.len() {
            let i = index.lower_bound(offset);
            assert!(index.entries()[i].offset >= offset);
            assert!(i == 0 || index.entries()[i - 1].offset < offset);
        }
    }
    Ok(())
}

#[test]
fn building_is_idempotent() -> Result<()> {
    let oracle = UnicodeOracle::default();
    let locale = Locale::classic();
    for &text in SAMPLES {
        for kind in BoundaryKind::ALL {
            let first = BoundaryIndex::build(&oracle, kind, &locale, &text)?;
            let second = BoundaryIndex::build(&oracle, kind, &locale, &text)?;
            assert_eq!(first, second);
        }
    }
    Ok(())
}

#[test]
fn unfiltered_tokens_reassemble_the_text() -> Result<()> {
    for mapping in mappings()? {
        let joined: String = mapping.tokens().map(|t| t.text).collect();
        assert_eq!(joined, mapping.text(), "{} tokens", mapping.kind());

        let ranges: Vec<_> = mapping.tokens().map(|t| t.range).collect();
        assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));
    }
    Ok(())
}

fn stops(mapping: &Mapping<&str>) -> BTreeSet<usize> {
    mapping.breaks().map(|b| b.offset).collect()
}

#[test]
fn narrower_masks_stop_less_often() -> Result<()> {
    let chains: &[(BoundaryKind, &[RuleMask])] = &[
        (
            BoundaryKind::Word,
            &[0, word::LETTER, word::LETTERS, word::ANY, ALL],
        ),
        (BoundaryKind::Line, &[0, line::HARD, line::ANY, ALL]),
        (BoundaryKind::Sentence, &[0, sentence::TERM, sentence::ANY]),
    ];
    let locale = Locale::classic();

    for &text in SAMPLES.iter().filter(|t| !t.is_empty()) {
        for &(kind, masks) in chains {
            let mut mapping = Mapping::new(kind, text, &locale)?;
            let mut previous: Option<BTreeSet<usize>> = None;
            for &mask in masks {
                mapping.set_mask(mask);
                let current = stops(&mapping);
                assert!(current.contains(&0));
                assert!(current.contains(&text.len()));
                if let Some(previous) = &previous {
                    assert!(previous.is_subset(&current), "{kind} mask {mask:#x}");
                }
                previous = Some(current);
            }
        }
    }
    Ok(())
}

#[test]
fn forward_and_backward_walks_mirror() -> Result<()> {
    for mut mapping in mappings()? {
        for mask in [ALL, word::LETTERS, 0] {
            mapping.set_mask(mask);

            let mut cursor: BreakCursor<_> = mapping.begin();
            let mut forward = vec![cursor.position()];
            while cursor.move_next() {
                forward.push(cursor.position());
            }
            let mut backward = vec![cursor.position()];
            while cursor.move_prev() {
                backward.push(cursor.position());
            }
            backward.reverse();
            assert_eq!(forward, backward, "{} over {:?}", mapping.kind(), mapping.text());

            let mut cursor: TokenCursor<_> = mapping.begin();
            let mut forward = vec![cursor.position()];
            while cursor.move_next() {
                forward.push(cursor.position());
            }
            let end: TokenCursor<_> = mapping.end();
            assert_eq!(cursor, end);
            let mut backward = vec![cursor.position()];
            while backward.len() < forward.len() && cursor.move_prev() {
                backward.push(cursor.position());
            }
            backward.reverse();
            assert_eq!(forward, backward);
        }
    }
    Ok(())
}

#[test]
fn iterators_agree_with_cursors() -> Result<()> {
    for mapping in mappings()? {
        let mut cursor: BreakCursor<_> = mapping.begin();
        let mut offsets = Vec::new();
        while let Ok(offset) = cursor.get() {
            offsets.push(offset);
            cursor.move_next();
        }
        let from_iter: Vec<usize> = mapping.breaks().map(|b| b.offset).collect();
        assert_eq!(offsets, from_iter);

        let reversed: Vec<usize> = mapping.breaks().rev().map(|b| b.offset).collect();
        assert_eq!(reversed, from_iter.iter().rev().copied().collect::<Vec<_>>());
    }
    Ok(())
}
