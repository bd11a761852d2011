//! Hitboxes and overlap resolution
//!
//! Hitboxes are smaller than sprites: the player box is inset on
//! every side, entity boxes are scaled down around their center.

use glam::Vec2;

use super::state::{Arena, Entity, EntityKind, GameSession, ItemKind, Player};
use crate::config::Config;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Shrink by `total` on each axis, split evenly between opposite sides
    pub fn inset(&self, total: f32) -> Rect {
        Rect {
            min: self.min + Vec2::splat(total / 2.0),
            size: self.size - Vec2::splat(total),
        }
    }

    /// Scale around the center
    pub fn scaled(&self, factor: f32) -> Rect {
        let margin = self.size * (1.0 - factor) / 2.0;
        Rect {
            min: self.min + margin,
            size: self.size * factor,
        }
    }
}

pub fn player_hitbox(player: &Player, arena: &Arena, config: &Config) -> Rect {
    Rect::new(
        player.x,
        player.top(arena, config),
        player.size,
        player.size,
    )
    .inset(config.player_hitbox_adjust)
}

pub fn entity_hitbox(entity: &Entity, config: &Config) -> Rect {
    Rect {
        min: entity.pos,
        size: entity.size,
    }
    .scaled(config.entity_hitbox_scale)
}

/// What happened to an entity that touched the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    Collected { id: u32, kind: ItemKind },
    Detonated { id: u32 },
}

/// Test the player against every entity, back-to-front. Every overlapping
/// entity is removed; items add to the score. A bomb does not stop the pass.
pub fn resolve_collisions(session: &mut GameSession, config: &Config) -> Vec<CollisionOutcome> {
    let player_box = player_hitbox(&session.player, &session.arena, config);
    let mut outcomes = Vec::new();

    // Back-to-front, so outcomes list the newest entity first
    let hits: Vec<(u32, EntityKind)> = session
        .entities
        .iter()
        .rev()
        .filter(|e| player_box.overlaps(&entity_hitbox(e, config)))
        .map(|e| (e.id, e.kind))
        .collect();

    for (id, kind) in hits {
        if session.entities.remove(id).is_none() {
            continue;
        }
        match kind {
            EntityKind::Bomb => {
                log::trace!("bomb #{} hit the player", id);
                outcomes.push(CollisionOutcome::Detonated { id });
            }
            EntityKind::Item(kind) => {
                session.score += config.score_per_item;
                log::trace!("collected {:?} #{}, score {}", kind, id, session.score);
                outcomes.push(CollisionOutcome::Collected { id, kind });
            }
        }
    }

    outcomes
}
