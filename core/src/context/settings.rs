//! Shared, in-memory option store
//!
//! Overlays read their enable flags through [`FlagStore`] on every render
//! pass, and an option editor may flip them at any time. The store never
//! validates; that is the editor's job.

use std::sync::{PoisonError, RwLock};

use super::config::{Flag, OverlaySettings};

/// Key/value view of the boolean options.
pub trait FlagStore: Send + Sync {
    fn get_flag(&self, flag: Flag) -> bool;
    fn set_flag(&self, flag: Flag, value: bool);
}

/// `OverlaySettings` behind a lock, shared between the engine and whatever
/// edits options.
#[derive(Debug, Default)]
pub struct SettingsStore {
    inner: RwLock<OverlaySettings>,
}

impl SettingsStore {
    pub fn new(settings: OverlaySettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    /// Copy of the current settings (for persistence or layout queries)
    pub fn snapshot(&self) -> OverlaySettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutate the settings in place
    pub fn update<F: FnOnce(&mut OverlaySettings)>(&self, f: F) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl FlagStore for SettingsStore {
    fn get_flag(&self, flag: Flag) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .flag(flag)
    }

    fn set_flag(&self, flag: Flag, value: bool) {
        self.update(|s| s.set_flag(flag, value));
    }
}
