//! Game tuning
//!
//! Loaded once at startup and shared read-only with every component.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable constants for a game. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Session ===
    pub duration_secs: u32,
    pub score_per_item: u64,

    // === Spawning ===
    pub initial_spawn_interval_ms: u32,
    pub min_spawn_interval_ms: u32,
    pub spawn_interval_decrement_ms: u32,
    pub bomb_spawn_interval_ms: u32,

    // === Falling ===
    pub initial_fall_speed: f32,
    pub max_fall_speed: f32,
    pub speed_increment: f32,

    // === Player ===
    pub player_speed: f32,
    pub touch_sensitivity: f32,
    pub player_size: f32,
    pub player_bottom_margin: f32,
    pub player_hitbox_adjust: f32,

    // === Entities ===
    pub item_size: f32,
    pub bomb_size: f32,
    pub entity_hitbox_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: GAME_DURATION_SECS,
            score_per_item: SCORE_PER_ITEM,

            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_decrement_ms: SPAWN_INTERVAL_DECREMENT_MS,
            bomb_spawn_interval_ms: BOMB_SPAWN_INTERVAL_MS,

            initial_fall_speed: INITIAL_FALL_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            speed_increment: SPEED_INCREMENT,

            player_speed: PLAYER_SPEED,
            touch_sensitivity: PLAYER_TOUCH_SENSITIVITY,
            player_size: PLAYER_SIZE,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_hitbox_adjust: PLAYER_HITBOX_ADJUST,

            item_size: ITEM_SIZE,
            bomb_size: BOMB_SIZE,
            entity_hitbox_scale: ENTITY_HITBOX_SCALE,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject combinations the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.duration_secs == 0 {
            return Err(invalid("duration_secs", "must be at least one second"));
        }
        if self.min_spawn_interval_ms == 0 {
            return Err(invalid("min_spawn_interval_ms", "must be positive"));
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(invalid(
                "min_spawn_interval_ms",
                "must not exceed initial_spawn_interval_ms",
            ));
        }
        if self.bomb_spawn_interval_ms == 0 {
            return Err(invalid("bomb_spawn_interval_ms", "must be positive"));
        }
        if self.initial_fall_speed <= 0.0 {
            return Err(invalid("initial_fall_speed", "must be positive"));
        }
        if self.max_fall_speed < self.initial_fall_speed {
            return Err(invalid(
                "max_fall_speed",
                "must not be below initial_fall_speed",
            ));
        }
        if self.speed_increment < 0.0 {
            return Err(invalid("speed_increment", "must not be negative"));
        }
        if self.player_speed <= 0.0 {
            return Err(invalid("player_speed", "must be positive"));
        }
        if self.player_size <= 0.0 || self.item_size <= 0.0 || self.bomb_size <= 0.0 {
            return Err(invalid("player_size", "sprite sizes must be positive"));
        }
        if self.player_hitbox_adjust < 0.0 || self.player_hitbox_adjust >= self.player_size {
            return Err(invalid(
                "player_hitbox_adjust",
                format!("must be in [0, {})", self.player_size),
            ));
        }
        if !(self.entity_hitbox_scale > 0.0 && self.entity_hitbox_scale <= 1.0) {
            return Err(invalid("entity_hitbox_scale", "must be in (0, 1]"));
        }
        Ok(())
    }
}
