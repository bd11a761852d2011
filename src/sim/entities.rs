//! Falling entity storage
//!
//! Entities are kept in spawn order. Removal during traversal walks indices
//! back-to-front so a removal never skips the next element.

use glam::Vec2;

use super::state::{Arena, Entity, EntityKind, ItemKind};
use crate::config::Config;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Add an entity of `kind` at the top of the arena. `x` is clamped so the
    /// whole sprite stays inside the arena.
    pub fn spawn(&mut self, kind: EntityKind, x: f32, size: f32, arena: &Arena) -> &Entity {
        let max_x = (arena.width - size).max(0.0);
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            kind,
            pos: Vec2::new(x.clamp(0.0, max_x), 0.0),
            size: Vec2::splat(size),
        });
        log::trace!("spawned {:?} #{} at x={:.1}", kind, id, x);
        &self.entities[self.entities.len() - 1]
    }

    pub fn spawn_item(&mut self, kind: ItemKind, x: f32, arena: &Arena, config: &Config) -> &Entity {
        self.spawn(EntityKind::Item(kind), x, config.item_size, arena)
    }

    pub fn spawn_bomb(&mut self, x: f32, arena: &Arena, config: &Config) -> &Entity {
        self.spawn(EntityKind::Bomb, x, config.bomb_size, arena)
    }

    /// Move every entity down by `fall_speed` and drop the ones whose top edge
    /// went past the bottom of the arena. Returns how many expired.
    pub fn advance(&mut self, fall_speed: f32, arena: &Arena) -> usize {
        let mut expired = 0;
        for i in (0..self.entities.len()).rev() {
            self.entities[i].pos.y += fall_speed;
            if self.entities[i].pos.y > arena.height {
                let gone = self.entities.remove(i);
                log::trace!("{:?} #{} fell off screen", gone.kind, gone.id);
                expired += 1;
            }
        }
        expired
    }

    /// Remove by id. Returns the entity if it was live.
    pub fn remove(&mut self, id: u32) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(400.0, 600.0)
    }

    #[test]
    fn spawn_places_at_top_within_bounds() {
        let config = Config::default();
        let mut store = EntityStore::new();
        let e = store.spawn_item(ItemKind::Diamond, 390.0, &arena(), &config).clone();
        assert_eq!(e.pos, Vec2::new(350.0, 0.0));
        assert_eq!(e.size, Vec2::splat(50.0));

        let b = store.spawn_bomb(-5.0, &arena(), &config).clone();
        assert_eq!(b.pos.x, 0.0);
        assert_eq!(b.size, Vec2::splat(60.0));
        assert_ne!(e.id, b.id);
    }

    #[test]
    fn advance_keeps_entity_exactly_at_floor() {
        let config = Config::default();
        let mut store = EntityStore::new();
        store.spawn_item(ItemKind::GoldBar, 0.0, &arena(), &config);
        // 598 + 2 == 600 == height: stays
        store.entities[0].pos.y = 598.0;
        assert_eq!(store.advance(2.0, &arena()), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.entities[0].pos.y, 600.0);
        // 600 + 2 > 600: removed
        assert_eq!(store.advance(2.0, &arena()), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn advance_removes_consecutive_expired_entities() {
        let config = Config::default();
        let mut store = EntityStore::new();
        for _ in 0..4 {
            store.spawn_item(ItemKind::LuckyBag, 10.0, &arena(), &config);
        }
        store.entities[1].pos.y = 599.0;
        store.entities[2].pos.y = 599.5;
        assert_eq!(store.advance(3.0, &arena()), 2);
        let ys: Vec<f32> = store.iter().map(|e| e.pos.y).collect();
        assert_eq!(ys, vec![3.0, 3.0]);
    }

    #[test]
    fn remove_by_id() {
        let config = Config::default();
        let mut store = EntityStore::new();
        let a = store.spawn_item(ItemKind::GoldIngot, 0.0, &arena(), &config).id;
        let b = store.spawn_bomb(100.0, &arena(), &config).id;
        assert_eq!(store.remove(a).map(|e| e.id), Some(a));
        assert!(store.remove(a).is_none());
        assert_eq!(store.iter().next().map(|e| e.id), Some(b));
    }

    proptest! {
        #[test]
        fn advance_moves_by_fall_speed_or_removes(
            start_y in 0.0f32..700.0,
            speed in 0.5f32..8.0,
        ) {
            let config = Config::default();
            let mut store = EntityStore::new();
            store.spawn_item(ItemKind::RedEnvelope, 0.0, &arena(), &config);
            store.entities[0].pos.y = start_y;
            store.advance(speed, &arena());
            let moved = start_y + speed;
            if moved > 600.0 {
                prop_assert!(store.is_empty());
            } else {
                prop_assert_eq!(store.entities[0].pos.y, moved);
                prop_assert!(store.entities[0].pos.y > start_y);
            }
        }

        #[test]
        fn spawned_x_always_in_bounds(x in -1000.0f32..2000.0, width in 10.0f32..1200.0) {
            let config = Config::default();
            let arena = Arena::new(width, 600.0);
            let mut store = EntityStore::new();
            let e = store.spawn_bomb(x, &arena, &config);
            prop_assert!(e.pos.x >= 0.0);
            prop_assert!(e.pos.x <= (width - 60.0).max(0.0));
        }
    }
}
