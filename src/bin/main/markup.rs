//! Markup-to-text flattening for HTML/XHTML sources.
//!
//! Block-level tags become line breaks, inline formatting tags vanish and
//! any other tag becomes a space. Entities are decoded. Text inside
//! `<head>`, `<script>` and `<style>` is dropped, and once a `<body>` has
//! been seen only body text is kept.

const FLAG_IN_HEAD: u8 = 0b0000_0001;
const FLAG_IN_BODY: u8 = 0b0000_0010;
const FLAG_BODY_SEEN: u8 = 0b0000_0100;
const FLAG_IN_SCRIPT: u8 = 0b0000_1000;
const FLAG_IN_STYLE: u8 = 0b0001_0000;
const ENTITY_MAX_CHARS: usize = 12;

#[derive(Clone, Copy, Debug, Default)]
struct MarkupState {
    flags: u8,
}

impl MarkupState {
    fn has(self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    fn set(&mut self, flag: u8, enabled: bool) {
        if enabled {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    fn emits_text(self) -> bool {
        if self.has(FLAG_IN_SCRIPT) || self.has(FLAG_IN_STYLE) {
            return false;
        }

        if self.has(FLAG_BODY_SEEN) {
            return self.has(FLAG_IN_BODY);
        }

        !self.has(FLAG_IN_HEAD)
    }

    fn apply_tag(&mut self, tag: &TagInfo<'_>) {
        let closing = tag.is_closing;
        let opens = !closing && !tag.is_self_closing;

        match tag.local_name.to_ascii_lowercase().as_str() {
            "head" => self.set(FLAG_IN_HEAD, opens),
            "body" if closing => self.set(FLAG_IN_BODY, false),
            "body" => {
                self.set(FLAG_BODY_SEEN, true);
                self.set(FLAG_IN_HEAD, false);
                self.set(FLAG_IN_BODY, opens);
            }
            "script" => self.set(FLAG_IN_SCRIPT, opens),
            "style" => self.set(FLAG_IN_STYLE, opens),
            _ => {}
        }
    }
}

struct TagInfo<'a> {
    local_name: &'a str,
    is_closing: bool,
    is_self_closing: bool,
}

fn parse_tag(raw: &str) -> Option<TagInfo<'_>> {
    let tag = raw.trim();
    if tag.is_empty() || tag.starts_with('!') || tag.starts_with('?') {
        return None;
    }

    let (is_closing, rest) = match tag.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, tag),
    };
    let is_self_closing = rest.ends_with('/');
    let name_end = rest
        .find(|ch: char| ch.is_whitespace() || ch == '/' || ch == '>')
        .unwrap_or(rest.len());
    if name_end == 0 {
        return None;
    }

    let name = &rest[..name_end];
    let local_name = name.rsplit(':').next().unwrap_or(name);
    Some(TagInfo {
        local_name,
        is_closing,
        is_self_closing,
    })
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Spacing {
    /// Inline formatting, text continues without a gap.
    None,
    Space,
    LineBreak,
}

fn tag_spacing(local_name: &str) -> Spacing {
    match local_name.to_ascii_lowercase().as_str() {
        "p" | "div" | "section" | "article" | "aside" | "header" | "footer" | "nav" | "li"
        | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre"
        | "table" | "tr" | "td" | "th" | "dt" | "dd" | "br" | "hr" => Spacing::LineBreak,
        "a" | "abbr" | "b" | "code" | "em" | "i" | "mark" | "s" | "small" | "span" | "strong"
        | "sub" | "sup" | "u" => Spacing::None,
        _ => Spacing::Space,
    }
}

fn decode_entity(entity: &str) -> Option<char> {
    let named = match entity.to_ascii_lowercase().as_str() {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" | "ldquo" | "rdquo" | "laquo" | "raquo" => Some('"'),
        "apos" | "lsquo" | "rsquo" => Some('\''),
        "nbsp" => Some(' '),
        "ndash" | "mdash" => Some('-'),
        "hellip" => Some('…'),
        "aacute" => Some('á'),
        "eacute" => Some('é'),
        "iacute" => Some('í'),
        "oacute" => Some('ó'),
        "uacute" => Some('ú'),
        "ntilde" => Some('ñ'),
        "uuml" => Some('ü'),
        "ccedil" => Some('ç'),
        "iexcl" => Some('¡'),
        "iquest" => Some('¿'),
        _ => None,
    };

    named.or_else(|| decode_numeric_entity(entity))
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}

/// Flatten `markup` to plain text with collapsed whitespace.
pub(super) fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() / 2);
    let mut state = MarkupState::default();
    let mut rest = markup;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => {
                let Some(end) = rest.find('>') else {
                    break;
                };
                let raw = &rest[1..end];
                rest = &rest[end + 1..];

                let Some(tag) = parse_tag(raw) else {
                    continue;
                };
                let spacing = tag_spacing(tag.local_name);
                state.apply_tag(&tag);
                if state.emits_text() {
                    push_spacing(&mut out, spacing);
                }
            }
            '&' => {
                let entity_end = rest[1..]
                    .char_indices()
                    .take(ENTITY_MAX_CHARS + 1)
                    .find(|(_, ch)| *ch == ';')
                    .map(|(idx, _)| idx + 1);

                match entity_end.and_then(|end| decode_entity(&rest[1..end]).map(|ch| (end, ch))) {
                    Some((end, decoded)) => {
                        if state.emits_text() {
                            push_char(&mut out, decoded);
                        }
                        rest = &rest[end + 1..];
                    }
                    None => {
                        if state.emits_text() {
                            push_char(&mut out, '&');
                        }
                        rest = &rest[1..];
                    }
                }
            }
            _ => {
                if state.emits_text() && (ch.is_whitespace() || !ch.is_control()) {
                    push_char(&mut out, ch);
                }
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}

fn push_spacing(out: &mut String, spacing: Spacing) {
    match spacing {
        Spacing::None => {}
        Spacing::Space => push_char(out, ' '),
        Spacing::LineBreak => {
            while out.ends_with(' ') {
                out.pop();
            }
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

fn push_char(out: &mut String, ch: char) {
    if ch.is_whitespace() {
        if out.is_empty() || out.ends_with(' ') || out.ends_with('\n') {
            return;
        }
        out.push(' ');
        return;
    }

    out.push(ch);
}
