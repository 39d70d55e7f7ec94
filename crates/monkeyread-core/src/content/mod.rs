//! Text ingestion: raw string in, ordered display units out.

mod text_utils;

use alloc::{string::String, vec::Vec};

use log::debug;

pub(crate) use text_utils::first_units_excerpt;

/// Built-in text shown when the reader starts without any loaded content.
pub const SAMPLE_TEXT: &str = "Rapid serial visual presentation shows one word at a time, \
always in the same place, so the eye never has to travel across a line. Each word is \
aligned on its optical recognition point, the letter the eye should fixate on, which is \
highlighted. Sentences end with a longer pause, clauses with a shorter one, and long words \
linger a little. Press space to start, arrows to change the pace, and r to start over.";

/// Split `text` on runs of whitespace, keeping source order.
///
/// No normalization is applied: punctuation stays attached to its word so the
/// timing rules can see it. Empty or whitespace-only input yields no units.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut units = Vec::with_capacity(text_utils::count_units(text));
    let mut cursor = 0usize;

    while let Some((unit, next_cursor)) = text_utils::next_unit_at(text, cursor) {
        units.push(String::from(unit));
        cursor = next_cursor;
    }

    debug!("tokenize: {} bytes -> {} units", text.len(), units.len());
    units
}

/// Number of units [`tokenize`] would produce, without allocating them.
pub fn count_units(text: &str) -> usize {
    text_utils::count_units(text)
}
