//! Round timings and input policy
//!
//! Kept in LocalStorage on the web: the running config is written back at
//! startup, and edits to the stored JSON apply on the next load.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::OvershootPolicy;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Countdown length per round (seconds)
    pub round_seconds: u32,
    /// How long the door stays open before closing itself
    pub auto_close_seconds: f32,
    /// Delay between launch and the first countdown
    pub start_delay_seconds: f32,
    /// Pause after the time-up spin, so "Time's Up!" stays readable
    pub reset_hold_seconds: f32,
    /// How mixed-direction clicks count toward a step
    pub overshoot: OvershootPolicy,
    /// Log each secret combination as it is drawn
    pub reveal_combination: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            auto_close_seconds: AUTO_CLOSE_SECONDS,
            start_delay_seconds: START_DELAY_SECONDS,
            reset_hold_seconds: RESET_HOLD_SECONDS,
            overshoot: OvershootPolicy::default(),
            reveal_combination: true,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Clamp values that would stall the game
    pub fn sanitized(mut self) -> Self {
        self.round_seconds = self.round_seconds.max(1);
        self.auto_close_seconds = self.auto_close_seconds.max(0.0);
        self.start_delay_seconds = self.start_delay_seconds.max(0.0);
        self.reset_hold_seconds = self.reset_hold_seconds.max(0.0);
        self
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "vault_door_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Stored config, or defaults when none is stored or it fails to parse
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(config)) => {
                log::info!("Loaded config from LocalStorage: {:?}", config);
                config
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored config: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Write this config under the storage key
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, config not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to write config to LocalStorage");
                }
            }
            Err(e) => log::error!("Failed to serialize config: {}", e),
        }
    }

    /// Native builds have no storage; always the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.round_seconds, 30);
        assert_eq!(config.auto_close_seconds, 8.0);
        assert_eq!(config.start_delay_seconds, 8.0);
        assert_eq!(config.overshoot, OvershootPolicy::Accumulate);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{"round_seconds": 45, "overshoot": "reset_on_direction_change"}"#)
                .unwrap();
        assert_eq!(config.round_seconds, 45);
        assert_eq!(config.overshoot, OvershootPolicy::ResetOnDirectionChange);
        assert_eq!(config.auto_close_seconds, AUTO_CLOSE_SECONDS);
    }

    #[test]
    fn test_sanitize_clamps() {
        let config = GameConfig::from_json(r#"{"round_seconds": 0, "auto_close_seconds": -3.0}"#).unwrap();
        assert_eq!(config.round_seconds, 1);
        assert_eq!(config.auto_close_seconds, 0.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(GameConfig::from_json("{not json").is_err());
        assert!(GameConfig::from_json(r#"{"overshoot": "sideways"}"#).is_err());
    }

    #[test]
    fn test_to_json_uses_snake_case_policy() {
        let config = GameConfig {
            overshoot: OvershootPolicy::ResetOnDirectionChange,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains(r#""overshoot":"reset_on_direction_change""#));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = GameConfig {
            reveal_combination: false,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
