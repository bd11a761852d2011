//! Session state and core simulation types
//!
//! A `GameSession` exclusively owns the live entities and the player.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::EntityStore;
use crate::config::Config;

/// Lifecycle phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session has been started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Session ended; final score stays on screen until the next start
    GameOver,
}

/// The seven collectible item kinds, all equally likely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    GoldIngot,
    RedEnvelope,
    LuckyBag,
    GoldBar,
    Diamond,
    PaperEnvelope,
    GrandEnvelope,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::GoldIngot,
        ItemKind::RedEnvelope,
        ItemKind::LuckyBag,
        ItemKind::GoldBar,
        ItemKind::Diamond,
        ItemKind::PaperEnvelope,
        ItemKind::GrandEnvelope,
    ];

    /// Asset key of the sprite for this item
    pub fn sprite_key(&self) -> &'static str {
        match self {
            ItemKind::GoldIngot => "yuanbao",
            ItemKind::RedEnvelope => "hongbao",
            ItemKind::LuckyBag => "fudai",
            ItemKind::GoldBar => "jintiao",
            ItemKind::Diamond => "zhuanshi",
            ItemKind::PaperEnvelope => "zhihongbao",
            ItemKind::GrandEnvelope => "dahongbao",
        }
    }
}

/// What a falling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Item(ItemKind),
    Bomb,
}

impl EntityKind {
    pub fn is_bomb(&self) -> bool {
        matches!(self, EntityKind::Bomb)
    }

    pub fn sprite_key(&self) -> &'static str {
        match self {
            EntityKind::Item(kind) => kind.sprite_key(),
            EntityKind::Bomb => "bomb",
        }
    }
}

/// A falling item or bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

/// Playfield dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's catcher. Only `x` moves; y comes from the arena and config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Left edge
    pub x: f32,
    /// Horizontal velocity in px per nominal frame
    pub velocity: f32,
    pub size: f32,
}

impl Player {
    /// Player centered horizontally in the arena
    pub fn centered(arena: &Arena, config: &Config) -> Self {
        let mut player = Self {
            x: 0.0,
            velocity: 0.0,
            size: config.player_size,
        };
        player.set_x((arena.width - config.player_size) / 2.0, arena);
        player
    }

    /// Largest legal left edge
    pub fn max_x(&self, arena: &Arena) -> f32 {
        (arena.width - self.size).max(0.0)
    }

    /// Move to `x`, clamped to the arena
    pub fn set_x(&mut self, x: f32, arena: &Arena) {
        self.x = x.clamp(0.0, self.max_x(arena));
    }

    /// Top edge (the sprite sits `bottom_margin` above the arena floor)
    pub fn top(&self, arena: &Arena, config: &Config) -> f32 {
        arena.height - self.size - config.player_bottom_margin
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TimeUp,
    Bomb,
}

/// Things the presentation layer reacts to (audio, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { duration_secs: u32 },
    ItemCollected { kind: ItemKind, score: u64 },
    BombDetonated,
    CountdownTick { remaining_secs: u32 },
    DifficultyChanged { fall_speed: f32, spawn_interval_ms: u32 },
    GameOver { reason: GameOverReason, final_score: u64 },
}

/// One play-through from start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    pub seed: u64,
    pub score: u64,
    /// Whole seconds since start (drives difficulty)
    pub elapsed_secs: u32,
    pub seconds_remaining: u32,
    pub current_fall_speed: f32,
    pub current_spawn_interval_ms: u32,
    pub arena: Arena,
    pub player: Player,
    pub entities: EntityStore,
    pub rng: Pcg32,
}

impl GameSession {
    /// Fresh session with initial difficulty and a centered player
    pub fn new(seed: u64, arena: Arena, config: &Config) -> Self {
        Self {
            seed,
            score: 0,
            elapsed_secs: 0,
            seconds_remaining: config.duration_secs,
            current_fall_speed: config.initial_fall_speed,
            current_spawn_interval_ms: config.initial_spawn_interval_ms,
            arena,
            player: Player::centered(&arena, config),
            entities: EntityStore::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

/// Final numbers of a session, for logging and the native summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub score: u64,
    pub elapsed_secs: u32,
    pub reason: Option<GameOverReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_starts_centered() {
        let config = Config::default();
        let arena = Arena::new(800.0, 600.0);
        let player = Player::centered(&arena, &config);
        assert_eq!(player.x, 325.0);
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.top(&arena, &config), 600.0 - 150.0 - 20.0);
    }

    #[test]
    fn player_clamps_to_arena() {
        let arena = Arena::new(300.0, 600.0);
        let mut player = Player {
            x: 100.0,
            velocity: 0.0,
            size: 150.0,
        };
        player.set_x(200.0, &arena);
        assert_eq!(player.x, 150.0);
        player.set_x(-40.0, &arena);
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn narrow_arena_pins_player_left() {
        let arena = Arena::new(100.0, 600.0);
        let player = Player::centered(&arena, &Config::default());
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn sprite_keys_are_distinct() {
        let mut keys: Vec<_> = ItemKind::ALL.iter().map(|k| k.sprite_key()).collect();
        keys.push(EntityKind::Bomb.sprite_key());
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }
}
