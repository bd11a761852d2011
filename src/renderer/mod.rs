//! Sprite rendering
//!
//! Presentation is a separate pass over numeric simulation state: `layout`
//! turns a session into positioned sprites, `draw_frame` hands them to a
//! `RenderSurface`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::assets::{AssetBundle, PLAYER_SPRITE};
use crate::config::Config;
use crate::platform::RenderSurface;
use crate::sim::GameSession;

/// A sprite placed in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub key: &'static str,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Entities in spawn order, then the player on top
pub fn layout(session: &GameSession, config: &Config) -> Vec<Sprite> {
    let mut sprites: Vec<Sprite> = session
        .entities
        .iter()
        .map(|e| Sprite {
            key: e.kind.sprite_key(),
            x: e.pos.x,
            y: e.pos.y,
            w: e.size.x,
            h: e.size.y,
        })
        .collect();

    let player = &session.player;
    sprites.push(Sprite {
        key: PLAYER_SPRITE,
        x: player.x,
        y: player.top(&session.arena, config),
        w: player.size,
        h: player.size,
    });
    sprites
}

/// Clear and draw one frame
pub fn draw_frame<R: RenderSurface, A>(
    surface: &mut R,
    assets: &AssetBundle<R::Image, A>,
    session: &GameSession,
    config: &Config,
) {
    surface.clear();
    for sprite in layout(session, config) {
        match assets.image(sprite.key) {
            Ok(image) => surface.draw_sprite(image, sprite.x, sprite.y, sprite.w, sprite.h),
            Err(err) => log::warn!("skipping sprite: {}", err),
        }
    }
}
