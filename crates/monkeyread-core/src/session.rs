//! Mutable run-time reading record: units, cursor, rate, play flag, counters.
//!
//! Every mutation is a single `&mut self` call, so callers never observe a
//! partial update. Observable changes bump [`Session::revision`], which the
//! host polls to decide when to re-render.

use alloc::{string::String, vec::Vec};

pub const MIN_WPM: u16 = 50;
pub const MAX_WPM: u16 = 2_000;
pub const DEFAULT_WPM: u16 = 300;

pub const fn clamp_wpm(wpm: u16) -> u16 {
    if wpm < MIN_WPM {
        MIN_WPM
    } else if wpm > MAX_WPM {
        MAX_WPM
    } else {
        wpm
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReadingStats {
    /// Forward auto-advances since the process started.
    pub session_word_count: u64,
    /// Forward auto-advances across runs (seeded from persisted settings).
    pub total_words_read: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdvanceOutcome {
    /// Cursor moved forward one unit; counters were incremented.
    Advanced,
    /// Cursor was already on the last unit; playback stopped.
    ReachedEnd,
    /// Nothing loaded; playback stopped.
    Empty,
}

/// Borrowed, read-only view of a [`Session`] for rendering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionSnapshot<'a> {
    pub units: &'a [String],
    pub cursor: Option<usize>,
    pub wpm: u16,
    pub playing: bool,
    pub stats: ReadingStats,
    pub revision: u32,
}

impl<'a> SessionSnapshot<'a> {
    pub fn current_unit(&self) -> Option<&'a str> {
        self.cursor
            .and_then(|index| self.units.get(index))
            .map(String::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    units: Vec<String>,
    cursor: usize,
    wpm: u16,
    playing: bool,
    stats: ReadingStats,
    revision: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_WPM)
    }
}

impl Session {
    pub fn new(wpm: u16) -> Self {
        Self {
            units: Vec::new(),
            cursor: 0,
            wpm: clamp_wpm(wpm),
            playing: false,
            stats: ReadingStats::default(),
            revision: 0,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            units: &self.units,
            cursor: self.current_index(),
            wpm: self.wpm,
            playing: self.playing,
            stats: self.stats,
            revision: self.revision,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Cursor position, `None` when nothing is loaded.
    pub fn current_index(&self) -> Option<usize> {
        (!self.units.is_empty()).then_some(self.cursor)
    }

    pub fn current_unit(&self) -> Option<&str> {
        self.units.get(self.cursor).map(String::as_str)
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn stats(&self) -> ReadingStats {
        self.stats
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Replace the unit sequence; cursor returns to 0 and playback stops.
    pub fn load(&mut self, units: Vec<String>) {
        self.units = units;
        self.cursor = 0;
        self.playing = false;
        self.touch();
    }

    pub fn set_rate(&mut self, wpm: u16) {
        let wpm = clamp_wpm(wpm);
        if wpm != self.wpm {
            self.wpm = wpm;
            self.touch();
        }
    }

    /// Direct flag set; the caller guarantees there is something to play.
    pub fn set_playing(&mut self, playing: bool) {
        if playing != self.playing {
            self.playing = playing;
            self.touch();
        }
    }

    /// Manual scrub, clamped to the sequence. Counters are untouched.
    pub fn set_cursor(&mut self, index: usize) {
        if self.units.is_empty() {
            return;
        }

        let index = index.min(self.units.len() - 1);
        if index != self.cursor {
            self.cursor = index;
            self.touch();
        }
    }

    /// Manual step back by one unit. Counters are untouched.
    pub fn step_back(&mut self) {
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    /// Forward step. Leaving the last unit stops playback instead of moving
    /// past the end; only a genuine move counts as a word read.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.units.is_empty() {
            self.set_playing(false);
            return AdvanceOutcome::Empty;
        }

        if self.cursor + 1 >= self.units.len() {
            self.cursor = self.units.len() - 1;
            self.set_playing(false);
            return AdvanceOutcome::ReachedEnd;
        }

        self.cursor += 1;
        self.stats.session_word_count = self.stats.session_word_count.saturating_add(1);
        self.stats.total_words_read = self.stats.total_words_read.saturating_add(1);
        self.touch();
        AdvanceOutcome::Advanced
    }

    pub fn reset(&mut self) {
        if self.cursor != 0 || self.playing {
            self.cursor = 0;
            self.playing = false;
            self.touch();
        }
    }

    /// Add to the cumulative counter only, e.g. when restoring a total.
    pub fn add_words_read(&mut self, count: u64) {
        if count > 0 {
            self.stats.total_words_read = self.stats.total_words_read.saturating_add(count);
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
