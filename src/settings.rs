//! Player settings and preferences
//!
//! Persisted separately from the leaderboard under their own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError, Storage};
use crate::sim::GameMode;

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Ball trail
    pub trails: bool,
    /// Flames on a hoop after a make
    pub rim_fire_effects: bool,

    // === Gameplay ===
    /// Mode entered on startup
    pub default_mode: GameMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            trails: true,
            rim_fire_effects: true,

            default_mode: GameMode::Regular,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bb_settings_v1";

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unreadable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_save_load() {
        let mut storage = MemoryStorage::default();
        let settings = Settings {
            trails: false,
            default_mode: GameMode::Challenge,
            ..Default::default()
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut storage = MemoryStorage::default();
        storage
            .set_item(Settings::STORAGE_KEY, r#"{"muted":true}"#)
            .unwrap();
        let settings = Settings::load(&storage);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.default_mode, GameMode::Regular);
    }

    #[test]
    fn test_corrupt_falls_back() {
        let mut storage = MemoryStorage::default();
        storage.set_item(Settings::STORAGE_KEY, "][").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
