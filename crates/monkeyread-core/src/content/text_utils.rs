/// Unicode `White_Space` plus U+FEFF, so a byte-order mark never sticks to
/// the first unit.
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

pub(super) fn count_units(text: &str) -> usize {
    let mut count = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_unit_at(text, cursor) {
        count += 1;
        cursor = next_cursor;
    }

    count
}

/// Returns the unit starting at or after byte offset `cursor` together with
/// the byte offset just past it.
pub(super) fn next_unit_at(text: &str, cursor: usize) -> Option<(&str, usize)> {
    let rest = text.get(cursor..)?;
    let skipped = rest.len() - rest.trim_start_matches(is_separator).len();
    let start = cursor + skipped;
    if start >= text.len() {
        return None;
    }

    let tail = &text[start..];
    let len = tail
        .char_indices()
        .find(|&(_, ch)| is_separator(ch))
        .map(|(idx, _)| idx)
        .unwrap_or(tail.len());

    Some((&tail[..len], start + len))
}

pub(crate) fn first_units_excerpt(text: &str, max_units: usize) -> &str {
    if text.is_empty() || max_units == 0 {
        return "";
    }

    let mut units = 0usize;
    let mut end = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_unit_at(text, cursor) {
        units += 1;
        end = next_cursor;
        cursor = next_cursor;
        if units >= max_units {
            break;
        }
    }

    text[..end].trim_start_matches(is_separator)
}
