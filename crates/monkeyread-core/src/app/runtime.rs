impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    pub fn new(input: IN, mut config: ReaderConfig, app_title: &'static str) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        config.min_wpm = clamp_wpm(config.min_wpm);
        config.max_wpm = clamp_wpm(config.max_wpm);
        config.wpm = config.wpm.clamp(config.min_wpm, config.max_wpm);
        config.wpm_step = config.wpm_step.max(1);
        config.word_chunk_size = config.word_chunk_size.max(1);

        Self {
            input,
            config,
            app_title,
            session: Session::new(config.wpm),
            clock: PlaybackClock::new(),
            emphasis: false,
            title: HeaplessString::new(),
            rendered_revision: None,
            pending_redraw: true,
            quit_requested: false,
            words_since_drain: 0,
        }
    }

    /// Drain pending input, fire the clock if due and report whether the
    /// visible state changed since the last render.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);

        if let Some(outcome) = self.clock.poll(&mut self.session, now_ms) {
            match outcome {
                FireOutcome::Advanced => {
                    self.words_since_drain = self.words_since_drain.saturating_add(1);
                }
                FireOutcome::Finished => {
                    info!(
                        "reader: finished {} units, session words={}",
                        self.session.len(),
                        self.session.stats().session_word_count
                    );
                }
                FireOutcome::Stale => {}
            }
        }

        let revision = self.session.revision();
        if self.pending_redraw || self.rendered_revision != Some(revision) {
            self.pending_redraw = false;
            self.rendered_revision = Some(revision);
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// When the host should call [`Self::tick`] again at the latest.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.clock.pending().map(|tick| tick.due_ms)
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        self.session.snapshot()
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn emphasis_enabled(&self) -> bool {
        self.emphasis
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Forward advances since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    /// Tokenize `text` and replace the current content. Returns the unit count.
    pub fn load_text(&mut self, text: &str) -> usize {
        self.set_title_from(first_units_excerpt(text, TITLE_SOURCE_UNITS));
        self.replace_units(tokenize(text))
    }

    pub fn load_units(&mut self, units: Vec<String>) -> usize {
        let mut joined = String::new();
        for unit in units.iter().take(TITLE_SOURCE_UNITS) {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(unit);
        }
        self.set_title_from(&joined);
        self.replace_units(units)
    }

    /// Drop all content.
    pub fn clear(&mut self) {
        self.title.clear();
        self.clock.load(&mut self.session, Vec::new());
        self.pending_redraw = true;
    }

    pub fn play(&mut self, now_ms: u64) -> bool {
        let started = self.clock.play(&mut self.session, now_ms);
        if !started {
            debug!("reader: play ignored, nothing to show");
        }
        started
    }

    pub fn pause(&mut self) {
        self.clock.pause(&mut self.session);
    }

    pub fn toggle_playback(&mut self, now_ms: u64) -> bool {
        if self.clock.is_running() {
            self.pause();
            false
        } else {
            self.play(now_ms)
        }
    }

    pub fn reset(&mut self) {
        self.clock.reset(&mut self.session);
    }

    /// Store a new rate. A running clock keeps its pending tick; the rate
    /// applies from the next scheduled unit.
    pub fn set_wpm(&mut self, wpm: u16) {
        let wpm = wpm.clamp(self.config.min_wpm, self.config.max_wpm);
        self.config.wpm = wpm;
        self.session.set_rate(wpm);
    }

    pub fn nudge_wpm(&mut self, increase: bool) -> bool {
        let current = self.session.wpm();
        let next = if increase {
            current
                .saturating_add(self.config.wpm_step)
                .min(self.config.max_wpm)
        } else {
            current
                .saturating_sub(self.config.wpm_step)
                .max(self.config.min_wpm)
        };

        if next != current {
            self.set_wpm(next);
            true
        } else {
            false
        }
    }

    /// Move the cursor to `index` (clamped). Rejected while playing.
    pub fn scrub(&mut self, index: usize) -> bool {
        self.clock.scrub(&mut self.session, index)
    }

    /// Relative scrub by `delta` units. Rejected while playing.
    pub fn step(&mut self, delta: isize) -> bool {
        let Some(cursor) = self.session.current_index() else {
            return false;
        };

        let target = if delta < 0 {
            cursor.saturating_sub(delta.unsigned_abs())
        } else {
            cursor.saturating_add(delta as usize)
        };
        self.scrub(target)
    }

    pub fn set_emphasis(&mut self, enabled: bool) {
        if self.emphasis != enabled {
            self.emphasis = enabled;
            self.pending_redraw = true;
        }
    }

    pub fn toggle_emphasis(&mut self) {
        self.set_emphasis(!self.emphasis);
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings {
            wpm: self.session.wpm(),
            emphasis_enabled: self.emphasis,
            word_chunk_size: self.config.word_chunk_size,
            total_words_read: self.session.stats().total_words_read,
        }
    }

    /// Restore persisted preferences and seed the cumulative counter.
    pub fn apply_settings(&mut self, settings: &PersistedSettings) {
        self.set_wpm(settings.wpm);
        self.set_emphasis(settings.emphasis_enabled);
        self.config.word_chunk_size = settings.word_chunk_size.max(1);

        let current = self.session.stats().total_words_read;
        self.session
            .add_words_read(settings.total_words_read.saturating_sub(current));
    }

    fn replace_units(&mut self, units: Vec<String>) -> usize {
        let count = units.len();
        self.clock.load(&mut self.session, units);
        self.pending_redraw = true;
        info!("reader: loaded {} units", count);
        count
    }

    fn set_title_from(&mut self, text: &str) {
        let mut buf = [0u8; TITLE_BYTES];
        let preview = preview_compact(text, &mut buf);
        self.title.clear();
        let _ = self.title.push_str(preview);
    }
}
