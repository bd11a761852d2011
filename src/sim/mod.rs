//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the caller (frame timestamps), never from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod game;
pub mod input;
pub mod scheduler;
pub mod spawn;
pub mod state;

pub use collision::{CollisionOutcome, Rect, entity_hitbox, player_hitbox, resolve_collisions};
pub use entities::EntityStore;
pub use game::Game;
pub use input::{ArrowKey, InputController, InputEvent, InputIntent};
pub use scheduler::{Scheduler, TimerKind};
pub use state::{
    Arena, Entity, EntityKind, GameEvent, GameOverReason, GamePhase, GameSession, ItemKind,
    Player, SessionSummary,
};
