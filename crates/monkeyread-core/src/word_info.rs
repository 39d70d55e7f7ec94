//! Per-unit optical pivot, pause multiplier and emphasis split.
//!
//! All values are derived on demand from the unit text; nothing here is
//! cached, so callers can recompute freely whenever the emphasis flag or the
//! cursor changes. Lengths are measured in chars and every slice lands on a
//! char boundary.

/// Pause multiplier applied to the base inter-word interval.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DelayFactor {
    /// 1.0
    Neutral,
    /// 1.2, unit longer than [`LONG_UNIT_CHARS`].
    LongWord,
    /// 1.5, unit ends a clause (`,` `;` `:`).
    Clause,
    /// 2.5, unit ends a sentence (`.` `!` `?`).
    Sentence,
}

impl DelayFactor {
    pub const fn value(self) -> f32 {
        match self {
            Self::Neutral => 1.0,
            Self::LongWord => 1.2,
            Self::Clause => 1.5,
            Self::Sentence => 2.5,
        }
    }

    /// Exact integer form of [`Self::value`], used for interval arithmetic.
    pub const fn per_mille(self) -> u32 {
        match self {
            Self::Neutral => 1_000,
            Self::LongWord => 1_200,
            Self::Clause => 1_500,
            Self::Sentence => 2_500,
        }
    }
}

/// Units longer than this many chars get [`DelayFactor::LongWord`].
pub const LONG_UNIT_CHARS: usize = 8;

/// Leading bold part and trailing plain part of a unit in emphasis mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EmphasisSplit<'a> {
    pub bold: &'a str,
    pub rest: &'a str,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordInfo<'a> {
    pub word: &'a str,
    pub pivot_index: usize,
    pub delay_factor: DelayFactor,
    pub emphasis: Option<EmphasisSplit<'a>>,
}

impl<'a> WordInfo<'a> {
    pub fn layout(&self) -> WordLayout<'a> {
        WordLayout::compose(self)
    }
}

pub fn word_info(word: &str, emphasis_enabled: bool) -> WordInfo<'_> {
    WordInfo {
        word,
        pivot_index: pivot_index(word),
        delay_factor: delay_factor(word),
        emphasis: emphasis_enabled.then(|| emphasis_split(word)),
    }
}

/// Optical recognition point: char offset the eye should fixate on.
pub fn pivot_index(word: &str) -> usize {
    match word.chars().count() {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// First matching rule wins: sentence end, clause end, long unit, neutral.
pub fn delay_factor(word: &str) -> DelayFactor {
    match word.chars().next_back() {
        Some('.' | '!' | '?') => DelayFactor::Sentence,
        Some(',' | ';' | ':') => DelayFactor::Clause,
        _ if word.chars().count() > LONG_UNIT_CHARS => DelayFactor::LongWord,
        _ => DelayFactor::Neutral,
    }
}

/// Bold covers the first `ceil(len / 2)` chars.
pub fn emphasis_split(word: &str) -> EmphasisSplit<'_> {
    let bold_chars = word.chars().count().div_ceil(2);
    let (bold, rest) = word.split_at(byte_offset(word, bold_chars));
    EmphasisSplit { bold, rest }
}

/// One run of text inside a rendering region.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Run<'a> {
    pub text: &'a str,
    pub bold: bool,
}

/// A rendering region made of an optional bold run followed by a plain run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Region<'a> {
    pub bold: &'a str,
    pub plain: &'a str,
}

impl<'a> Region<'a> {
    pub fn runs(&self) -> [Run<'a>; 2] {
        [
            Run {
                text: self.bold,
                bold: true,
            },
            Run {
                text: self.plain,
                bold: false,
            },
        ]
    }

    pub fn chars(&self) -> usize {
        self.bold.chars().count() + self.plain.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.bold.is_empty() && self.plain.is_empty()
    }
}

/// Unit split into before-pivot, pivot and after-pivot regions.
///
/// The pivot is always computed against the whole unit. In emphasis mode
/// each region takes whatever part of the bold prefix falls inside it as its
/// bold run and the remainder as its plain run; without emphasis all text is
/// plain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WordLayout<'a> {
    pub before: Region<'a>,
    pub pivot: Run<'a>,
    pub after: Region<'a>,
}

impl<'a> WordLayout<'a> {
    pub fn compose(info: &WordInfo<'a>) -> Self {
        let word = info.word;
        let pivot_start = byte_offset(word, info.pivot_index);
        let pivot_end = byte_offset(word, info.pivot_index + 1);
        let bold_end = info.emphasis.map(|split| split.bold.len()).unwrap_or(0);

        let region = |start: usize, end: usize| {
            let split = bold_end.clamp(start, end);
            Region {
                bold: &word[start..split],
                plain: &word[split..end],
            }
        };

        Self {
            before: region(0, pivot_start),
            pivot: Run {
                text: &word[pivot_start..pivot_end],
                bold: pivot_start < bold_end,
            },
            after: region(pivot_end, word.len()),
        }
    }
}

fn byte_offset(word: &str, char_index: usize) -> usize {
    word.char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(word.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIVOT_BREAKPOINTS: [(usize, usize); 9] = [
        (0, 0),
        (1, 0),
        (2, 1),
        (5, 1),
        (6, 2),
        (9, 2),
        (10, 3),
        (13, 3),
        (14, 4),
    ];

    fn word_of_len(len: usize) -> alloc::string::String {
        core::iter::repeat_n('x', len).collect()
    }

    #[test]
    fn pivot_breakpoints_hold_exactly() {
        for (len, expected) in PIVOT_BREAKPOINTS {
            assert_eq!(pivot_index(&word_of_len(len)), expected, "len {len}");
        }
        assert_eq!(pivot_index(&word_of_len(40)), 4);
    }

    #[test]
    fn pivot_stays_inside_the_word() {
        for len in 0..32 {
            let pivot = pivot_index(&word_of_len(len));
            assert!(pivot < len.max(1), "len {len} pivot {pivot}");
        }
    }

    #[test]
    fn pivot_counts_chars_not_bytes() {
        assert_eq!(pivot_index("é"), 0);
        assert_eq!(pivot_index("ñandú"), 1);
    }

    #[test]
    fn punctuation_beats_length() {
        assert_eq!(delay_factor("extraordinary."), DelayFactor::Sentence);
        assert_eq!(delay_factor("extraordinary,"), DelayFactor::Clause);
        assert_eq!(delay_factor("extraordinary"), DelayFactor::LongWord);
        assert_eq!(delay_factor("why?"), DelayFactor::Sentence);
        assert_eq!(delay_factor("wow!"), DelayFactor::Sentence);
        assert_eq!(delay_factor("note:"), DelayFactor::Clause);
        assert_eq!(delay_factor("then;"), DelayFactor::Clause);
    }

    #[test]
    fn long_word_rule_is_strictly_greater_than_eight() {
        assert_eq!(delay_factor("abcdefgh"), DelayFactor::Neutral);
        assert_eq!(delay_factor("abcdefghi"), DelayFactor::LongWord);
        assert_eq!(delay_factor(""), DelayFactor::Neutral);
    }

    #[test]
    fn factor_values() {
        let values = [
            DelayFactor::Neutral,
            DelayFactor::LongWord,
            DelayFactor::Clause,
            DelayFactor::Sentence,
        ]
        .map(DelayFactor::value);
        assert_eq!(values, [1.0, 1.2, 1.5, 2.5]);
    }

    #[test]
    fn emphasis_split_rounds_up() {
        let split = emphasis_split("reading");
        assert_eq!((split.bold, split.rest), ("read", "ing"));

        let split = emphasis_split("a");
        assert_eq!((split.bold, split.rest), ("a", ""));

        let split = emphasis_split("");
        assert_eq!((split.bold, split.rest), ("", ""));
    }

    #[test]
    fn word_info_only_splits_in_emphasis_mode() {
        assert!(word_info("reading", false).emphasis.is_none());
        let info = word_info("reading", true);
        assert_eq!(info.pivot_index, 2);
        assert_eq!(info.delay_factor, DelayFactor::Neutral);
        assert_eq!(info.emphasis.map(|s| s.bold), Some("read"));
    }

    #[test]
    fn emphasis_layout_renders_pivot_bold_inside_prefix() {
        let layout = word_info("reading", true).layout();
        assert_eq!(layout.before, Region { bold: "re", plain: "" });
        assert_eq!(layout.pivot, Run { text: "a", bold: true });
        assert_eq!(layout.after, Region { bold: "d", plain: "ing" });
    }

    #[test]
    fn pivot_past_the_bold_prefix_is_plain() {
        // "on": bold "o", pivot 1 -> 'n'
        let layout = word_info("on", true).layout();
        assert_eq!(layout.before, Region { bold: "o", plain: "" });
        assert_eq!(layout.pivot, Run { text: "n", bold: false });
        assert!(layout.after.is_empty());
    }

    #[test]
    fn plain_layout_has_no_bold_runs() {
        let layout = word_info("cat", false).layout();
        assert_eq!(layout.before, Region { bold: "", plain: "c" });
        assert_eq!(layout.pivot, Run { text: "a", bold: false });
        assert_eq!(layout.after, Region { bold: "", plain: "t" });
    }

    #[test]
    fn empty_word_layout_is_empty() {
        let layout = word_info("", true).layout();
        assert!(layout.before.is_empty());
        assert_eq!(layout.pivot.text, "");
        assert!(layout.after.is_empty());
    }

    #[test]
    fn layout_handles_multibyte_chars() {
        let layout = word_info("señorita", true).layout();
        assert_eq!(layout.before, Region { bold: "se", plain: "" });
        assert_eq!(layout.pivot, Run { text: "ñ", bold: true });
        assert_eq!(layout.after, Region { bold: "o", plain: "rita" });
        assert_eq!(layout.before.chars() + 1 + layout.after.chars(), 8);
    }
}
