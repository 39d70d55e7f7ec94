//! Persisted user settings abstraction.

use crate::session::{DEFAULT_WPM, clamp_wpm};

/// User-tunable settings that should survive restarts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub emphasis_enabled: bool,
    /// Units shown per flash. Stored for forward compatibility; playback
    /// always shows one unit.
    pub word_chunk_size: u8,
    pub total_words_read: u64,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WPM)
    }
}

impl PersistedSettings {
    pub const fn new(wpm: u16) -> Self {
        Self {
            wpm: clamp_wpm(wpm),
            emphasis_enabled: false,
            word_chunk_size: 1,
            total_words_read: 0,
        }
    }

    pub const fn with_emphasis(mut self, emphasis_enabled: bool) -> Self {
        self.emphasis_enabled = emphasis_enabled;
        self
    }

    pub const fn with_total_words_read(mut self, total_words_read: u64) -> Self {
        self.total_words_read = total_words_read;
        self
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
