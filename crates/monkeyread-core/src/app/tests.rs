use super::*;
use crate::{
    input::QueuedInput,
    word_info::{DelayFactor, Run},
};

fn app() -> ReaderApp<QueuedInput> {
    ReaderApp::new(QueuedInput::new(), ReaderConfig::default(), "Test")
}

fn app_with(text: &str) -> ReaderApp<QueuedInput> {
    let mut app = app();
    app.load_text(text);
    app
}

fn press(app: &mut ReaderApp<QueuedInput>, event: InputEvent, now_ms: u64) -> TickResult {
    app.input_mut().push(event);
    app.tick(now_ms)
}

#[test]
fn three_word_scenario_through_tick() {
    let mut app = app_with("The cat sat.");
    assert_eq!(press(&mut app, InputEvent::Play, 0), TickResult::RenderRequested);
    assert_eq!(app.next_deadline_ms(), Some(200));

    assert_eq!(app.tick(100), TickResult::NoRender);
    assert_eq!(app.tick(200), TickResult::RenderRequested);
    assert_eq!(app.tick(400), TickResult::RenderRequested);
    assert_eq!(app.snapshot().current_unit(), Some("sat."));
    assert_eq!(app.next_deadline_ms(), Some(900));

    app.tick(900);
    let snapshot = app.snapshot();
    assert!(!snapshot.playing);
    assert_eq!(snapshot.cursor, Some(2));
    assert_eq!(snapshot.stats.total_words_read, 2);
    assert_eq!(app.next_deadline_ms(), None);
    assert_eq!(app.drain_word_updates(), 2);
    assert_eq!(app.drain_word_updates(), 0);
}

#[test]
fn rapid_double_play_advances_once_per_interval() {
    let mut app = app_with("a b c d e f g h");
    app.input_mut().push(InputEvent::Play);
    app.input_mut().push(InputEvent::Play);
    app.tick(0);

    for now in 1..=600 {
        app.tick(now);
    }
    assert_eq!(app.snapshot().cursor, Some(3));
    assert_eq!(app.snapshot().stats.session_word_count, 3);
}

#[test]
fn toggle_twice_pauses() {
    let mut app = app_with("a b c");
    app.input_mut().push(InputEvent::TogglePlay);
    app.input_mut().push(InputEvent::TogglePlay);
    app.tick(0);
    assert!(!app.snapshot().playing);
    assert_eq!(app.next_deadline_ms(), None);
    app.tick(10_000);
    assert_eq!(app.snapshot().cursor, Some(0));
}

#[test]
fn play_without_content_is_noop() {
    let mut app = app();
    assert!(!app.play(0));
    press(&mut app, InputEvent::TogglePlay, 0);
    assert!(!app.snapshot().playing);
    assert_eq!(app.next_deadline_ms(), None);
}

#[test]
fn whitespace_only_text_is_nothing_to_play() {
    let mut app = app();
    assert_eq!(app.load_text("  \n\t "), 0);
    assert!(!app.play(0));

    let mut empty = false;
    app.with_screen(|screen| empty = matches!(screen, Screen::Empty { .. }));
    assert!(empty);
}

#[test]
fn manual_steps_only_while_paused_and_never_count() {
    let mut app = app_with("one two three four five six seven eight nine ten eleven twelve");

    press(&mut app, InputEvent::StepForward, 0);
    assert_eq!(app.snapshot().cursor, Some(1));
    press(&mut app, InputEvent::JumpForward, 0);
    assert_eq!(app.snapshot().cursor, Some(11));
    press(&mut app, InputEvent::StepBack, 0);
    assert_eq!(app.snapshot().cursor, Some(10));
    press(&mut app, InputEvent::JumpBack, 0);
    assert_eq!(app.snapshot().cursor, Some(0));
    assert_eq!(app.snapshot().stats.session_word_count, 0);

    press(&mut app, InputEvent::Play, 0);
    assert!(!app.scrub(5));
    press(&mut app, InputEvent::StepForward, 1);
    assert_eq!(app.snapshot().cursor, Some(0));
}

#[test]
fn wpm_nudges_respect_bounds() {
    let mut app = app();
    app.set_wpm(1_990);
    assert!(app.nudge_wpm(true));
    assert_eq!(app.snapshot().wpm, MAX_WPM);
    assert!(!app.nudge_wpm(true));

    app.set_wpm(60);
    press(&mut app, InputEvent::Slower, 0);
    assert_eq!(app.snapshot().wpm, MIN_WPM);

    app.set_wpm(10);
    assert_eq!(app.snapshot().wpm, MIN_WPM);
}

#[test]
fn config_bounds_are_normalized() {
    let config = ReaderConfig {
        wpm: 5_000,
        min_wpm: 800,
        max_wpm: 100,
        wpm_step: 0,
        word_chunk_size: 0,
    };
    let app = ReaderApp::new(QueuedInput::new(), config, "Test");
    let config = app.config();
    assert_eq!((config.min_wpm, config.max_wpm), (100, 800));
    assert_eq!(config.wpm, 800);
    assert_eq!(config.wpm_step, 1);
    assert_eq!(config.word_chunk_size, 1);
    assert_eq!(app.snapshot().wpm, 800);
}

#[test]
fn rate_change_mid_tick_is_lazy() {
    let mut app = app_with("a b c");
    app.play(0);
    press(&mut app, InputEvent::Faster, 50);
    assert_eq!(app.snapshot().wpm, 325);
    assert_eq!(app.next_deadline_ms(), Some(200));

    app.tick(200);
    // 60000 / 325 = 184.6
    assert_eq!(app.next_deadline_ms(), Some(385));
}

#[test]
fn render_is_requested_only_on_change() {
    let mut app = app_with("a b");
    assert_eq!(app.tick(0), TickResult::RenderRequested);
    assert_eq!(app.tick(1), TickResult::NoRender);

    press(&mut app, InputEvent::ToggleEmphasis, 2);
    assert!(app.emphasis_enabled());
    assert_eq!(app.tick(3), TickResult::NoRender);

    assert_eq!(press(&mut app, InputEvent::Reset, 4), TickResult::NoRender);
    assert_eq!(press(&mut app, InputEvent::StepForward, 5), TickResult::RenderRequested);
}

#[test]
fn reading_screen_carries_layout_and_progress() {
    let mut app = app_with("Speed reading works.");
    app.set_emphasis(true);
    app.scrub(1);

    let mut seen = None;
    app.with_screen(|screen| {
        if let Screen::Reading {
            layout,
            delay,
            progress_pct,
            progress_label,
            gallery,
            emphasis,
            ..
        } = screen
        {
            seen = Some((
                delay,
                layout.pivot == Run { text: "a", bold: true },
                layout.before.bold.len(),
                progress_pct,
                progress_label.len(),
                gallery.len(),
                emphasis,
            ));
        }
    });

    // "reading": pivot 'a' inside the bold "read"
    assert_eq!(
        seen,
        Some((DelayFactor::Neutral, true, 2, 66, 3, 3, true))
    );
}

#[test]
fn title_comes_from_loaded_text() {
    let mut app = app_with("  Call   me Ishmael. Some years ago");
    let mut title = alloc::string::String::new();
    app.with_screen(|screen| {
        if let Screen::Reading { title: t, .. } = screen {
            title.push_str(t);
        }
    });
    assert_eq!(title, "Call me Ishmael. Some years ago");

    app.clear();
    app.with_screen(|screen| {
        if let Screen::Empty { title: t, .. } = screen {
            assert_eq!(t, "Test");
        } else {
            panic!("expected empty screen");
        }
    });
}

#[test]
fn load_while_playing_stops_and_rewinds() {
    let mut app = app_with("a b c d");
    app.play(0);
    app.tick(200);
    assert_eq!(app.snapshot().cursor, Some(1));

    app.load_units(tokenize("x y"));
    assert!(!app.snapshot().playing);
    assert_eq!(app.snapshot().cursor, Some(0));
    assert_eq!(app.next_deadline_ms(), None);
    app.tick(10_000);
    assert_eq!(app.snapshot().current_unit(), Some("x"));
}

#[test]
fn quit_pauses_playback() {
    let mut app = app_with("a b c");
    app.play(0);
    press(&mut app, InputEvent::Quit, 10);
    assert!(app.quit_requested());
    assert!(!app.snapshot().playing);
}

#[test]
fn settings_round_trip_and_seed_total() {
    let mut app = app_with("a b c");
    let stored = PersistedSettings::new(450)
        .with_emphasis(true)
        .with_total_words_read(1_000);
    app.apply_settings(&stored);

    app.play(0);
    app.tick(10_000);

    let settings = app.persisted_settings();
    assert_eq!(settings.wpm, 450);
    assert!(settings.emphasis_enabled);
    assert_eq!(settings.word_chunk_size, 1);
    assert_eq!(settings.total_words_read, 1_001);
    assert_eq!(app.snapshot().stats.session_word_count, 1);
}
