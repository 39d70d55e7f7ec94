//! Input abstraction layer.

mod queued;

pub use queued::QueuedInput;

/// Logical actions consumed by the reader app.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    TogglePlay,
    Play,
    Pause,
    Reset,
    Faster,
    Slower,
    StepBack,
    StepForward,
    JumpBack,
    JumpForward,
    ToggleEmphasis,
    Quit,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
