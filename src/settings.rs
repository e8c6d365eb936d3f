//! Runner settings and preferences
//!
//! Physics constants live in `crate::consts` and are not configurable; these
//! only steer the driver (seed, audio, demo autopilot).

use serde::{Deserialize, Serialize};

/// Runner settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for block kinds and debris
    pub seed: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Demo runner ===
    /// Let the runner steer the paddle toward the ball
    pub autopilot: bool,
    /// Simulated seconds before the headless runner stops
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            master_volume: 0.8,
            muted: false,
            autopilot: true,
            demo_seconds: 60.0,
        }
    }
}

impl Settings {
    /// Environment variable holding settings JSON
    pub const ENV_KEY: &'static str = "BREAKOUT_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse optional JSON, falling back to defaults
    pub fn load_from(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::ENV_KEY);
                settings
            }
            Err(err) => {
                log::warn!("Ignoring invalid {}: {err}", Self::ENV_KEY);
                Self::default()
            }
        }
    }

    /// Load settings from the environment
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_KEY).ok();
        Self::load_from(json.as_deref())
    }
}
