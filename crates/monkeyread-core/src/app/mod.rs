//! Application state machine tying session, clock and input together.

use alloc::{string::String, vec::Vec};

use heapless::String as HeaplessString;
use log::{debug, info};

use crate::{
    clock::{FireOutcome, PlaybackClock},
    content::{first_units_excerpt, tokenize},
    input::{InputEvent, InputProvider},
    render::{GALLERY_RADIUS, Gallery, Screen},
    session::{DEFAULT_WPM, MAX_WPM, MIN_WPM, Session, SessionSnapshot, clamp_wpm},
    settings::PersistedSettings,
    text_policy::{preview_compact, progress_label, progress_percent},
    word_info::word_info,
};

const WPM_STEP: u16 = 25;
const JUMP_UNITS: usize = 10;
const TITLE_BYTES: usize = 48;
const TITLE_SOURCE_UNITS: usize = 12;
const EMPTY_HINT: &str = "load some text to start";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub wpm_step: u16,
    /// Placeholder for multi-unit flashes; playback shows one unit.
    pub word_chunk_size: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            min_wpm: MIN_WPM,
            max_wpm: MAX_WPM,
            wpm_step: WPM_STEP,
            word_chunk_size: 1,
        }
    }
}

pub struct ReaderApp<IN>
where
    IN: InputProvider,
{
    input: IN,
    config: ReaderConfig,
    app_title: &'static str,
    session: Session,
    clock: PlaybackClock,
    emphasis: bool,
    title: HeaplessString<TITLE_BYTES>,
    rendered_revision: Option<u32>,
    pending_redraw: bool,
    quit_requested: bool,
    words_since_drain: u32,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");

#[cfg(test)]
mod tests;
