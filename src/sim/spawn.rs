//! Timer-driven entity creation

use rand::Rng;

use super::state::{EntityKind, GameSession, ItemKind};
use crate::config::Config;

/// Uniform x for a sprite of `size` so it fits inside the arena
fn random_x(session: &mut GameSession, size: f32) -> f32 {
    let span = (session.arena.width - size).max(0.0);
    session.rng.random::<f32>() * span
}

/// Item spawn trigger: one of the seven kinds, uniformly
pub fn spawn_item(session: &mut GameSession, config: &Config) -> EntityKind {
    let kind = ItemKind::ALL[session.rng.random_range(0..ItemKind::ALL.len())];
    let x = random_x(session, config.item_size);
    let arena = session.arena;
    session.entities.spawn_item(kind, x, &arena, config);
    EntityKind::Item(kind)
}

/// Bomb spawn trigger
pub fn spawn_bomb(session: &mut GameSession, config: &Config) -> EntityKind {
    let x = random_x(session, config.bomb_size);
    let arena = session.arena;
    session.entities.spawn_bomb(x, &arena, config);
    EntityKind::Bomb
}
