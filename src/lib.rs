//! Fortune Catch - a falling-treasure arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, difficulty, timers, input, collisions)
//! - `renderer`: Maps numeric simulation state onto a sprite surface
//! - `platform`: Collaborator traits (render surface, audio sink, HUD) plus browser/headless impls
//! - `assets`: Preload manifest and the all-or-nothing asset bundle
//! - `audio`: Routes game events to sound playback
//! - `config`: Data-driven game tuning

pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod frontend;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::Config;
pub use error::{AssetError, ConfigError};
pub use frontend::Frontend;

/// Default tuning constants (the shipped balance)
pub mod consts {
    /// Session length in seconds
    pub const GAME_DURATION_SECS: u32 = 30;

    /// Item spawn interval at session start (ms)
    pub const INITIAL_SPAWN_INTERVAL_MS: u32 = 800;
    /// Item spawn interval floor (ms)
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 200;
    /// Spawn interval reduction per elapsed second (ms)
    pub const SPAWN_INTERVAL_DECREMENT_MS: u32 = 20;
    /// Bomb spawn interval, fixed for the whole session (ms)
    pub const BOMB_SPAWN_INTERVAL_MS: u32 = 5000;

    /// Fall speed at session start (px per frame)
    pub const INITIAL_FALL_SPEED: f32 = 2.0;
    /// Fall speed ceiling (px per frame)
    pub const MAX_FALL_SPEED: f32 = 8.0;
    /// Fall speed increase per elapsed second
    pub const SPEED_INCREMENT: f32 = 0.1;

    /// Keyboard / pointer-follow speed (px per 16ms)
    pub const PLAYER_SPEED: f32 = 25.0;
    /// Touch drag multiplier
    pub const PLAYER_TOUCH_SENSITIVITY: f32 = 1.5;
    /// Player sprite is square
    pub const PLAYER_SIZE: f32 = 150.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    /// Total hitbox shrink (split evenly between opposite sides)
    pub const PLAYER_HITBOX_ADJUST: f32 = 30.0;

    pub const ITEM_SIZE: f32 = 50.0;
    pub const BOMB_SIZE: f32 = 60.0;
    /// Entity hitbox is this fraction of the sprite, centered
    pub const ENTITY_HITBOX_SCALE: f32 = 0.6;

    pub const SCORE_PER_ITEM: u64 = 10;

    /// Milliseconds per nominal frame (velocity is expressed per this unit)
    pub const NOMINAL_FRAME_MS: f64 = 16.0;
    /// Longest frame delta the loop will integrate (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Difficulty tick and countdown cadence (ms)
    pub const SECOND_MS: u32 = 1000;
}
