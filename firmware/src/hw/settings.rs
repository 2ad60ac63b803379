//! Volatile settings store.
//!
//! The persistent backend is an external collaborator; this in-RAM table
//! keeps the engine fully functional without it and is where a flash-backed
//! store would mirror its contents after boot.

use obc_core::settings::{SettingKey, SettingValue, SettingsStore};

pub struct RamSettingsStore {
    values: [Option<SettingValue>; SettingKey::COUNT],
}

impl RamSettingsStore {
    pub const fn new() -> Self {
        Self {
            values: [None; SettingKey::COUNT],
        }
    }

    /// Seeds one value, e.g. while mirroring a persistent store at boot.
    pub fn seed(&mut self, key: SettingKey, value: SettingValue) {
        self.values[key.as_index()] = Some(value);
    }
}

impl Default for RamSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for RamSettingsStore {
    fn read(&self, key: SettingKey) -> Option<SettingValue> {
        self.values[key.as_index()]
    }

    fn write(&mut self, key: SettingKey, value: SettingValue) {
        self.values[key.as_index()] = Some(value);
    }
}
