use std::{io, thread, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, signal::Signal};
use log::{debug, warn};
use monkeyread_core::input::InputEvent;

pub(super) type InputChannel<const N: usize> = Channel<CriticalSectionRawMutex, InputEvent, N>;
pub(super) type RedrawSignal = Signal<CriticalSectionRawMutex, ()>;

const QUIT_RETRY: Duration = Duration::from_millis(10);

/// Space play/pause, arrows or hjkl for pace and stepping, `[`/`]` jump,
/// `r` reset, `b` bold prefix, `q`/Esc/Ctrl-C quit.
pub(super) fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(InputEvent::Quit);
    }

    let event = match key.code {
        KeyCode::Char(' ') => InputEvent::TogglePlay,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('+') => InputEvent::Faster,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('-') => InputEvent::Slower,
        KeyCode::Left | KeyCode::Char('h') => InputEvent::StepBack,
        KeyCode::Right | KeyCode::Char('l') => InputEvent::StepForward,
        KeyCode::Char('[') => InputEvent::JumpBack,
        KeyCode::Char(']') => InputEvent::JumpForward,
        KeyCode::Char('r') | KeyCode::Home => InputEvent::Reset,
        KeyCode::Char('b') => InputEvent::ToggleEmphasis,
        KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
        _ => return None,
    };
    Some(event)
}

/// Blocking terminal reader on its own thread. Key events are forwarded to
/// the UI task through `events`; resizes only raise `redraw`.
pub(super) fn spawn_key_reader<const N: usize>(
    events: &'static InputChannel<N>,
    redraw: &'static RedrawSignal,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("monkeyread-keys".into())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        let Some(input) = map_key(key) else {
                            continue;
                        };
                        if deliver(events, input) && input == InputEvent::Quit {
                            break;
                        }
                    }
                    Ok(Event::Resize(..)) => redraw.signal(()),
                    Ok(_) => {}
                    Err(err) => {
                        warn!("keys: terminal read failed: {}", err);
                        deliver(events, InputEvent::Quit);
                        break;
                    }
                }
            }
        })
}

/// Forward one event. Ordinary keys are dropped when the queue is full;
/// `Quit` waits for room, since the reader stops right after sending it.
fn deliver<const N: usize>(events: &InputChannel<N>, input: InputEvent) -> bool {
    if input != InputEvent::Quit {
        let sent = events.try_send(input).is_ok();
        if !sent {
            debug!("keys: queue full, dropped {:?}", input);
        }
        return sent;
    }

    while events.try_send(InputEvent::Quit).is_err() {
        thread::sleep(QUIT_RETRY);
    }
    true
}
