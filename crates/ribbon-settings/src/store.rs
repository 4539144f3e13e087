//! Thread-safe live-tuning store

use parking_lot::RwLock;

use crate::cartoon::CartoonSettings;
use crate::error::SettingError;

/// Thread-safe holder of the current cartoon settings
///
/// Edits are validated before they are committed. Builds copy the record
/// with [`snapshot`](Self::snapshot), so a build in flight never observes a
/// concurrent edit.
#[derive(Debug)]
pub struct SettingsStore {
    inner: RwLock<CartoonSettings>,
}

impl SettingsStore {
    /// Create a store holding the defaults
    pub fn new() -> Self {
        SettingsStore {
            inner: RwLock::new(CartoonSettings::default()),
        }
    }

    /// Create a store from an existing record
    pub fn with_settings(settings: CartoonSettings) -> Result<Self, SettingError> {
        settings.validate()?;
        Ok(SettingsStore {
            inner: RwLock::new(settings),
        })
    }

    /// Copy of the current settings, for one build
    pub fn snapshot(&self) -> CartoonSettings {
        self.inner.read().clone()
    }

    /// Apply an edit; the edit is dropped if the result fails validation
    pub fn update<F>(&self, edit: F) -> Result<(), SettingError>
    where
        F: FnOnce(&mut CartoonSettings),
    {
        let mut guard = self.inner.write();
        let mut candidate = guard.clone();
        edit(&mut candidate);
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected cartoon settings edit: {}", e);
            return Err(e);
        }
        *guard = candidate;
        Ok(())
    }

    /// Replace the whole record
    pub fn replace(&self, settings: CartoonSettings) -> Result<(), SettingError> {
        settings.validate()?;
        *self.inner.write() = settings;
        Ok(())
    }

    /// Reset all settings to defaults
    pub fn reset(&self) {
        *self.inner.write() = CartoonSettings::default();
    }

    /// Load settings from JSON, replacing the current record
    pub fn load_json(&self, json: &str) -> Result<(), SettingError> {
        let settings = CartoonSettings::from_json_str(json)?;
        *self.inner.write() = settings;
        log::debug!("Loaded cartoon settings from JSON");
        Ok(())
    }

    /// Serialize the current record
    pub fn to_json(&self) -> Result<String, SettingError> {
        self.inner.read().to_json_string()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        SettingsStore {
            inner: RwLock::new(self.inner.read().clone()),
        }
    }
}
