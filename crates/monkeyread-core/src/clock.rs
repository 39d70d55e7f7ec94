//! Cooperative playback clock.
//!
//! The clock never sleeps. It records at most one pending tick (a generation
//! number plus a due time) and the host's event loop calls back into it once
//! that time has passed. Cancelling is dropping the pending tick; a callback
//! carrying an older generation is recognized as stale and ignored, so a
//! superseded schedule can never move the cursor.

use alloc::{string::String, vec::Vec};

use log::debug;

use crate::{
    session::{AdvanceOutcome, Session, clamp_wpm},
    word_info::{DelayFactor, delay_factor},
};

/// Interval for one unit at `wpm`, rounded to the nearest millisecond.
pub fn interval_ms(wpm: u16, factor: DelayFactor) -> u64 {
    let wpm = clamp_wpm(wpm) as u64;
    let numerator = 60_000u64 * factor.per_mille() as u64;
    let denominator = wpm * 1_000;
    (numerator + denominator / 2) / denominator
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PendingTick {
    pub generation: u32,
    pub due_ms: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FireOutcome {
    /// Cursor advanced and the next tick was scheduled.
    Advanced,
    /// Last unit finished; the clock is stopped.
    Finished,
    /// Callback does not belong to the current schedule.
    Stale,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackClock {
    pending: Option<PendingTick>,
    next_generation: u32,
}

impl PlaybackClock {
    pub const fn new() -> Self {
        Self {
            pending: None,
            next_generation: 0,
        }
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Start playback. Restarting while running replaces the pending tick.
    /// Returns `false` when there is nothing to play.
    pub fn play(&mut self, session: &mut Session, now_ms: u64) -> bool {
        self.cancel();
        if session.current_unit().is_none() {
            session.set_playing(false);
            return false;
        }

        session.set_playing(true);
        self.schedule(session, now_ms);
        debug!(
            "clock: play at unit {} wpm={}",
            session.current_index().unwrap_or(0),
            session.wpm()
        );
        true
    }

    pub fn pause(&mut self, session: &mut Session) {
        self.cancel();
        session.set_playing(false);
    }

    pub fn reset(&mut self, session: &mut Session) {
        self.cancel();
        session.reset();
    }

    pub fn load(&mut self, session: &mut Session, units: Vec<String>) {
        self.cancel();
        session.load(units);
    }

    /// Manual cursor move, accepted only while stopped.
    pub fn scrub(&mut self, session: &mut Session, index: usize) -> bool {
        if self.is_running() || session.is_empty() {
            return false;
        }

        session.set_cursor(index);
        true
    }

    /// Timer callback for the tick identified by `generation`.
    pub fn fire(&mut self, session: &mut Session, generation: u32, now_ms: u64) -> FireOutcome {
        match self.pending {
            Some(tick) if tick.generation == generation => {}
            _ => return FireOutcome::Stale,
        }
        self.pending = None;

        if !session.is_playing() {
            return FireOutcome::Stale;
        }

        match session.advance() {
            AdvanceOutcome::Advanced => {
                self.schedule(session, now_ms);
                FireOutcome::Advanced
            }
            AdvanceOutcome::ReachedEnd | AdvanceOutcome::Empty => {
                debug!("clock: end of text");
                FireOutcome::Finished
            }
        }
    }

    /// Fire the pending tick if it is due at `now_ms`.
    pub fn poll(&mut self, session: &mut Session, now_ms: u64) -> Option<FireOutcome> {
        let tick = self.pending?;
        if now_ms < tick.due_ms {
            return None;
        }

        Some(self.fire(session, tick.generation, now_ms))
    }

    fn schedule(&mut self, session: &Session, now_ms: u64) {
        let factor = session
            .current_unit()
            .map(delay_factor)
            .unwrap_or(DelayFactor::Neutral);

        self.next_generation = self.next_generation.wrapping_add(1);
        self.pending = Some(PendingTick {
            generation: self.next_generation,
            due_ms: now_ms + interval_ms(session.wpm(), factor),
        });
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}
