//! Sound playback driven by game events
//!
//! Sounds are preloaded clips; collect sounds are cloned per play so rapid
//! pickups overlap instead of cutting each other off.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::AssetBundle;
use crate::platform::AudioSink;
use crate::sim::GameEvent;

/// Looping music key
pub const BACKGROUND_MUSIC: &str = "background";

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Item collected (one of four variants, chosen at random)
    Collect,
    /// Bomb hit the player
    Bomb,
    /// UI button press
    Button,
}

const COLLECT_VARIANTS: [&str; 4] = ["collect1", "collect2", "collect3", "collect4"];

/// Routes effects and music to an `AudioSink`
pub struct SoundBoard<S: AudioSink> {
    sink: S,
    rng: Pcg32,
    muted: bool,
}

impl<S: AudioSink> SoundBoard<S> {
    pub fn new(sink: S, seed: u64) -> Self {
        Self {
            sink,
            rng: Pcg32::seed_from_u64(seed),
            muted: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mute/unmute. Muting also stops the music.
    pub fn set_muted<I>(&mut self, muted: bool, assets: &AssetBundle<I, S::Handle>) {
        self.muted = muted;
        if muted {
            self.stop_music(assets);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effect_key(&mut self, effect: SoundEffect) -> &'static str {
        match effect {
            SoundEffect::Collect => {
                COLLECT_VARIANTS[self.rng.random_range(0..COLLECT_VARIANTS.len())]
            }
            SoundEffect::Bomb => "bomb",
            SoundEffect::Button => "button",
        }
    }

    /// Play a sound effect
    pub fn play<I>(&mut self, effect: SoundEffect, assets: &AssetBundle<I, S::Handle>) {
        if self.muted {
            return;
        }
        let key = self.effect_key(effect);
        let Ok(handle) = assets.audio(key) else {
            log::warn!("no audio loaded for `{}`", key);
            return;
        };

        if effect == SoundEffect::Collect {
            match self.sink.clone_for_overlap(handle) {
                Some(copy) => self.sink.play(&copy),
                None => self.sink.play(handle),
            }
        } else {
            self.sink.play(handle);
        }
    }

    pub fn start_music<I>(&mut self, assets: &AssetBundle<I, S::Handle>) {
        if self.muted {
            return;
        }
        if let Ok(handle) = assets.audio(BACKGROUND_MUSIC) {
            self.sink.play_looped(handle);
        }
    }

    /// Stop and rewind the music
    pub fn stop_music<I>(&mut self, assets: &AssetBundle<I, S::Handle>) {
        if let Ok(handle) = assets.audio(BACKGROUND_MUSIC) {
            self.sink.stop(handle);
        }
    }

    pub fn on_event<I>(&mut self, event: &GameEvent, assets: &AssetBundle<I, S::Handle>) {
        match event {
            GameEvent::SessionStarted { .. } => self.start_music(assets),
            GameEvent::ItemCollected { .. } => self.play(SoundEffect::Collect, assets),
            GameEvent::BombDetonated => self.play(SoundEffect::Bomb, assets),
            GameEvent::GameOver { .. } => self.stop_music(assets),
            GameEvent::CountdownTick { .. } | GameEvent::DifficultyChanged { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{AudioCall, RecordingAudio, headless_assets};
    use crate::sim::{GameOverReason, ItemKind};

    #[test]
    fn session_lifecycle_drives_music() {
        let assets = headless_assets();
        let mut board = SoundBoard::new(RecordingAudio::default(), 1);

        board.on_event(&GameEvent::SessionStarted { duration_secs: 30 }, &assets);
        assert!(board.sink().is_looping(BACKGROUND_MUSIC));

        board.on_event(
            &GameEvent::GameOver {
                reason: GameOverReason::Bomb,
                final_score: 0,
            },
            &assets,
        );
        assert!(!board.sink().is_looping(BACKGROUND_MUSIC));
    }

    #[test]
    fn collect_plays_one_of_four_variants() {
        let assets = headless_assets();
        let mut board = SoundBoard::new(RecordingAudio::default(), 9);
        for _ in 0..40 {
            board.on_event(
                &GameEvent::ItemCollected {
                    kind: ItemKind::GoldBar,
                    score: 10,
                },
                &assets,
            );
        }
        let calls = &board.sink().calls;
        assert_eq!(calls.len(), 40);
        assert!(calls.iter().all(|c| matches!(
            c,
            AudioCall::Play(k) if COLLECT_VARIANTS.contains(&k.as_str())
        )));
        let distinct: std::collections::HashSet<_> = calls.iter().collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn muted_board_stays_quiet() {
        let assets = headless_assets();
        let mut board = SoundBoard::new(RecordingAudio::default(), 1);
        board.set_muted(true, &assets);
        board.play(SoundEffect::Bomb, &assets);
        board.start_music(&assets);
        assert_eq!(
            board.sink().calls,
            vec![AudioCall::Stop(BACKGROUND_MUSIC.to_string())]
        );
    }
}
