//! Shared text shaping and truncation policies for compact UI surfaces.

use core::{fmt::Write, str};

use heapless::String as HeaplessString;

pub const COMPACT_MAX_WORDS: usize = 7;
pub const COMPACT_MAX_CHARS: usize = 34;
pub const PROGRESS_LABEL_BYTES: usize = 24;

pub fn preview_compact<'a>(source: &str, out: &'a mut [u8]) -> &'a str {
    preview_limited(source, out, COMPACT_MAX_WORDS, COMPACT_MAX_CHARS)
}

/// Copy at most `max_words` words / `max_chars` chars of `source` into `out`,
/// collapsing whitespace and appending `...` when something was cut.
pub fn preview_limited<'a>(
    source: &str,
    out: &'a mut [u8],
    max_words: usize,
    max_chars: usize,
) -> &'a str {
    if out.is_empty() {
        return "";
    }

    let mut len = 0usize;
    let mut char_count = 0usize;
    let mut truncated = false;

    for (word_count, word) in source.split_whitespace().enumerate() {
        if word_count >= max_words {
            truncated = true;
            break;
        }

        if word_count > 0 {
            if len + 1 > out.len() || char_count >= max_chars {
                truncated = true;
                break;
            }
            out[len] = b' ';
            len += 1;
            char_count += 1;
        }

        for ch in word.chars() {
            let mut utf8 = [0u8; 4];
            let encoded = ch.encode_utf8(&mut utf8).as_bytes();
            if char_count >= max_chars || len + encoded.len() > out.len() {
                truncated = true;
                break;
            }

            out[len..len + encoded.len()].copy_from_slice(encoded);
            len += encoded.len();
            char_count += 1;
        }

        if truncated {
            break;
        }
    }

    if len == 0 {
        return "";
    }

    if truncated && len + 3 <= out.len() {
        out[len..len + 3].copy_from_slice(b"...");
        len += 3;
    }

    str::from_utf8(&out[..len]).unwrap_or("?")
}

/// `"{position}/{total}"` with a 1-based position, `"0/0"` when empty.
pub fn progress_label(cursor: Option<usize>, total: usize) -> HeaplessString<PROGRESS_LABEL_BYTES> {
    let mut label = HeaplessString::new();
    let position = cursor.map(|index| index + 1).unwrap_or(0);
    let _ = write!(label, "{}/{}", position, total);
    label
}

/// Share of the text shown so far, 0..=100.
pub fn progress_percent(cursor: Option<usize>, total: usize) -> u8 {
    match cursor {
        Some(index) if total > 0 => (((index + 1).min(total) * 100) / total) as u8,
        _ => 0,
    }
}
