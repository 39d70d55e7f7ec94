use log::{info, warn};
use monkeyread_core::settings::{PersistedSettings, SettingsStore};

use super::{SETTINGS_SAVE_DEBOUNCE_MS, file_settings::FileSettingsStore};

pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    /// Persist the pending change once it has been stable for the debounce
    /// window, or right away when `force` is set.
    pub(super) fn flush_if_due(
        &mut self,
        store: Option<&mut FileSettingsStore>,
        now_ms: u64,
        force: bool,
    ) {
        let Some((candidate, changed_at_ms)) = self.pending else {
            return;
        };

        if !force && now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }

        match store {
            Some(store) => match store.save(&candidate) {
                Ok(()) => {
                    info!(
                        "settings: saved wpm={} emphasis={} total_words={}",
                        candidate.wpm, candidate.emphasis_enabled, candidate.total_words_read
                    );
                    self.last_saved = candidate;
                    self.pending = None;
                }
                Err(err) => {
                    // Keep pending changes and retry after another debounce window.
                    warn!("settings: save failed: {}", err);
                    self.pending = Some((candidate, now_ms));
                }
            },
            None => {
                self.last_saved = candidate;
                self.pending = None;
            }
        }
    }

    pub(super) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
