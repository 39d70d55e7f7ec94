use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{Either3, select3};
use embassy_sync::{channel::Channel, signal::Signal};
use embassy_time::{Instant, Timer};
use env_logger::Target;
use log::{LevelFilter, info, warn};
use monkeyread_core::{
    app::{ReaderApp, ReaderConfig, TickResult},
    content::SAMPLE_TEXT,
    input::QueuedInput,
    session::clamp_wpm,
    settings::SettingsStore,
};

use extract::extract_text_from_file;
use file_settings::FileSettingsStore;
use keys::{InputChannel, RedrawSignal, spawn_key_reader};
use settings_sync::SettingsSyncState;
use terminal::TerminalRenderer;

#[path = "main/extract.rs"]
mod extract;
#[path = "main/file_settings.rs"]
mod file_settings;
#[path = "main/keys.rs"]
mod keys;
#[path = "main/markup.rs"]
mod markup;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/terminal.rs"]
mod terminal;

const TITLE: &str = "monkeyread";
const ORP_ANCHOR_PERCENT: u16 = 42;
const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const IDLE_POLL_MS: u64 = 250;
const INPUT_QUEUE_DEPTH: usize = 32;
const WPM_REPORT_INTERVAL_MS: u64 = 5_000;
const LOG_FILE_NAME: &str = "monkeyread.log";

static INPUT_EVENTS: InputChannel<INPUT_QUEUE_DEPTH> = Channel::new();
static REDRAW: RedrawSignal = Signal::new();

/// Terminal speed reader: flashes one word at a time at a fixed anchor.
#[derive(Debug, Parser)]
#[command(name = "monkeyread", version, about)]
struct Args {
    /// Text, Markdown or HTML file to read.
    file: Option<PathBuf>,

    /// Read this text instead of a file.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Reading rate in words per minute, clamped to the supported range.
    #[arg(long, value_parser = parse_wpm, allow_hyphen_values = true)]
    wpm: Option<u64>,

    /// Start with bold emphasis on the first half of every word.
    #[arg(long)]
    emphasis: bool,

    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log file; the terminal itself is taken over by the reader.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Neither load nor save settings.
    #[arg(long)]
    no_save: bool,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let args = Args::parse();
    // The executor never returns on its own; leave through the process.
    let code = match run(args).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("monkeyread: {err}");
            1
        }
    };
    std::process::exit(code)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME));
    init_logging(&log_path, args.log_level)?;
    info!("boot: monkeyread starting, log={}", log_path.display());

    let text = match (&args.file, &args.text) {
        (Some(path), _) => match extract_text_from_file(path) {
            Ok(text) => text,
            Err(err) => {
                warn!("extract: {}", err);
                return Err(err.into());
            }
        },
        (None, Some(text)) => text.clone(),
        (None, None) => SAMPLE_TEXT.into(),
    };

    let mut settings_store = if args.no_save {
        None
    } else {
        args.settings
            .clone()
            .or_else(FileSettingsStore::default_path)
            .map(FileSettingsStore::new)
    };

    let mut app = ReaderApp::new(QueuedInput::new(), ReaderConfig::default(), TITLE);
    if let Some(store) = settings_store.as_mut() {
        match store.load() {
            Ok(Some(settings)) => {
                info!(
                    "settings: loaded {} wpm={} emphasis={} total_words={}",
                    store.path().display(),
                    settings.wpm,
                    settings.emphasis_enabled,
                    settings.total_words_read
                );
                app.apply_settings(&settings);
            }
            Ok(None) => info!("settings: none at {}", store.path().display()),
            Err(err) => warn!("settings: ignoring {}: {}", store.path().display(), err),
        }
    }
    let mut settings_sync = SettingsSyncState::new(app.persisted_settings());
    apply_overrides(&mut app, &args);

    let units = app.load_text(&text);
    info!("content: {} units loaded", units);

    let mut renderer = TerminalRenderer::enter(ORP_ANCHOR_PERCENT)?;
    spawn_key_reader(&INPUT_EVENTS, &REDRAW)?;

    let mut force_render = true;
    let mut report_words = 0u64;
    let mut report_start_ms = now_ms();

    loop {
        let now = now_ms();
        let app_requests_render = app.tick(now) == TickResult::RenderRequested;

        if app_requests_render || force_render {
            let mut result = Ok(());
            app.with_screen(|screen| result = renderer.render(screen));
            if let Err(err) = result {
                warn!("terminal: render failed: {}", err);
            }
            force_render = false;
        }

        settings_sync.track_current(app.persisted_settings(), now);
        settings_sync.flush_if_due(settings_store.as_mut(), now, app.quit_requested());

        if app.quit_requested() {
            if settings_sync.has_pending() {
                warn!("settings: exiting with unsaved changes");
            }
            info!(
                "exit: session words={} total words={}",
                app.session().stats().session_word_count,
                app.session().stats().total_words_read
            );
            renderer.leave()?;
            return Ok(());
        }

        report_words = report_words.saturating_add(app.drain_word_updates() as u64);
        let elapsed_ms = now.saturating_sub(report_start_ms);
        if elapsed_ms >= WPM_REPORT_INTERVAL_MS {
            let wpm_x100 = report_words * 6_000_000 / elapsed_ms.max(1);
            info!(
                "effective_wpm={}.{:02} words={} elapsed_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                report_words,
                elapsed_ms
            );
            report_words = 0;
            report_start_ms = now;
        }

        let deadline_ms = app
            .next_deadline_ms()
            .unwrap_or(now.saturating_add(IDLE_POLL_MS))
            .min(report_start_ms.saturating_add(WPM_REPORT_INTERVAL_MS));
        match select3(
            Timer::at(Instant::from_millis(deadline_ms)),
            INPUT_EVENTS.receive(),
            REDRAW.wait(),
        )
        .await
        {
            Either3::First(()) => {}
            Either3::Second(event) => {
                app.input_mut().push(event);
                while let Ok(event) = INPUT_EVENTS.try_receive() {
                    app.input_mut().push(event);
                }
            }
            Either3::Third(()) => force_render = true,
        }
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

fn init_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}

/// Whole number of words per minute. Oversized values saturate and negative
/// ones read as zero; both are clamped later instead of rejected.
fn parse_wpm(raw: &str) -> Result<u64, String> {
    let (negative, digits) = match raw.trim().strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw.trim()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected a whole number, got '{raw}'"));
    }
    if negative {
        return Ok(0);
    }
    Ok(digits.parse::<u64>().unwrap_or(u64::MAX))
}

fn cli_wpm(raw: u64) -> u16 {
    clamp_wpm(raw.min(u16::MAX as u64) as u16)
}

fn apply_overrides(app: &mut ReaderApp<QueuedInput>, args: &Args) {
    if let Some(wpm) = args.wpm {
        let clamped = cli_wpm(wpm);
        if clamped as u64 != wpm {
            warn!("cli: wpm {} clamped to {}", wpm, clamped);
        }
        app.set_wpm(clamped);
    }
    if args.emphasis {
        app.set_emphasis(true);
    }
}
