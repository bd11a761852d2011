//! Presentation glue
//!
//! Once per frame the game's events are fanned out to audio and HUD, then the
//! frame is drawn. The simulation never sees any of these collaborators.

use crate::assets::AssetBundle;
use crate::audio::{SoundBoard, SoundEffect};
use crate::platform::{AudioSink, Hud, RenderSurface};
use crate::renderer;
use crate::sim::{Game, GameEvent, GamePhase};

pub struct Frontend<R: RenderSurface, S: AudioSink, H: Hud> {
    pub surface: R,
    pub sounds: SoundBoard<S>,
    pub hud: H,
    assets: AssetBundle<R::Image, S::Handle>,
}

impl<R: RenderSurface, S: AudioSink, H: Hud> Frontend<R, S, H> {
    pub fn new(
        surface: R,
        sounds: SoundBoard<S>,
        hud: H,
        assets: AssetBundle<R::Image, S::Handle>,
    ) -> Self {
        Self {
            surface,
            sounds,
            hud,
            assets,
        }
    }

    /// UI click feedback
    pub fn play_button(&mut self) {
        self.sounds.play(SoundEffect::Button, &self.assets);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.sounds.set_muted(muted, &self.assets);
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.sounds.on_event(event, &self.assets);
        match *event {
            GameEvent::SessionStarted { duration_secs } => {
                self.hud.hide_result();
                self.hud.set_score(0);
                self.hud.set_time_left(duration_secs);
            }
            GameEvent::ItemCollected { score, .. } => self.hud.set_score(score),
            GameEvent::CountdownTick { remaining_secs } => self.hud.set_time_left(remaining_secs),
            GameEvent::GameOver { final_score, .. } => {
                self.hud.set_score(final_score);
                self.hud.show_final_score(final_score);
            }
            GameEvent::BombDetonated | GameEvent::DifficultyChanged { .. } => {}
        }
    }

    /// Drain events into audio/HUD, then render. Nothing is drawn before the
    /// first session; the frame that ends a session is drawn once and then
    /// stays up.
    pub fn present(&mut self, game: &mut Game) {
        let mut ended = false;
        for event in game.drain_events() {
            ended |= matches!(event, GameEvent::GameOver { .. });
            self.on_event(&event);
        }
        if ended || game.phase() == GamePhase::Running {
            renderer::draw_frame(&mut self.surface, &self.assets, game.session(), game.config());
        }
    }
}
