//! Unicode utilities for textbound.
//!
//! Character classes used to tag the breaks produced by the segmentation
//! crates: script runs for word tokens, terminators for sentences and hard
//! line terminators.

pub mod classify;

pub use classify::{
    is_closing_punctuation,
    is_hard_line_terminator,
    is_hiragana,
    is_ideographic,
    is_kana,
    is_sentence_terminator,
    ScriptRun,
};
