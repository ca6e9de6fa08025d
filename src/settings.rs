//! Simulation settings
//!
//! Tunable numbers that are not part of the combat rules: starting inventory,
//! room transition pacing and the random drop table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Chances used when no forced drop applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropChances {
    /// Roll below this yields a heart
    pub heart: f32,
    /// Roll below this (and not below `heart`) yields a green rupee
    pub green_rupee: f32,
}

impl Default for DropChances {
    fn default() -> Self {
        Self {
            heart: 0.05,
            green_rupee: 0.15,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Starting inventory ===
    /// Heart containers at start (health in hearts)
    pub starting_hearts: f32,
    pub starting_rupees: u32,
    pub starting_bombs: u32,

    // === Room transitions ===
    /// Camera scroll speed in pixels per second
    pub transition_speed: f32,
    /// Fraction of camera motion applied to the player during a scroll
    pub player_drift_ratio: f32,

    // === Drops ===
    pub drops: DropChances,
    /// Seconds before a dropped item disappears
    pub item_lifetime: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_hearts: 3.0,
            starting_rupees: 50,
            starting_bombs: 4,

            transition_speed: 500.0,
            player_drift_ratio: 0.08,

            drops: DropChances::default(),
            item_lifetime: 10.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unspecified fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
