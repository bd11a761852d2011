//! Recording collaborators for native runs and tests
//!
//! Images and sound handles are just their asset keys.

use super::{AudioSink, Hud, RenderSurface};
use crate::assets::{AssetBundle, IMAGES, SOUNDS};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Sprite {
        image: String,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

/// Keeps the draw calls of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub frames: u64,
}

impl RenderSurface for RecordingSurface {
    type Image = String;

    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
        self.frames += 1;
    }

    fn draw_sprite(&mut self, image: &String, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Sprite {
            image: image.clone(),
            x,
            y,
            w,
            h,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AudioCall {
    Play(String),
    Loop(String),
    Stop(String),
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    /// Whether `key` is looping and has not been stopped since
    pub fn is_looping(&self, key: &str) -> bool {
        for call in self.calls.iter().rev() {
            match call {
                AudioCall::Loop(k) if k == key => return true,
                AudioCall::Stop(k) if k == key => return false,
                _ => {}
            }
        }
        false
    }
}

impl AudioSink for RecordingAudio {
    type Handle = String;

    fn play(&mut self, handle: &String) {
        self.calls.push(AudioCall::Play(handle.clone()));
    }

    fn play_looped(&mut self, handle: &String) {
        self.calls.push(AudioCall::Loop(handle.clone()));
    }

    fn stop(&mut self, handle: &String) {
        self.calls.push(AudioCall::Stop(handle.clone()));
    }

    fn clone_for_overlap(&mut self, handle: &String) -> Option<String> {
        Some(handle.clone())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingHud {
    pub score: u64,
    pub time_left: u32,
    pub final_score: Option<u64>,
}

impl Hud for RecordingHud {
    fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    fn set_time_left(&mut self, secs: u32) {
        self.time_left = secs;
    }

    fn show_final_score(&mut self, score: u64) {
        self.final_score = Some(score);
    }

    fn hide_result(&mut self) {
        self.final_score = None;
    }
}

/// Every manifest entry, keyed by itself
pub fn headless_assets() -> AssetBundle<String, String> {
    let images = IMAGES.iter().map(|(key, _)| Ok((key.to_string(), key.to_string())));
    let sounds = SOUNDS.iter().map(|(key, _)| Ok((key.to_string(), key.to_string())));
    // Built from the manifest itself, so nothing can be missing
    match AssetBundle::from_loaded(images, sounds) {
        Ok(bundle) => bundle,
        Err(err) => unreachable!("headless manifest incomplete: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looping_tracks_last_call() {
        let mut audio = RecordingAudio::default();
        let bgm = "background".to_string();
        audio.play_looped(&bgm);
        assert!(audio.is_looping("background"));
        audio.stop(&bgm);
        assert!(!audio.is_looping("background"));
    }

    #[test]
    fn headless_bundle_has_every_key() {
        let assets = headless_assets();
        for (key, _) in IMAGES {
            assert_eq!(assets.image(key).ok(), Some(&key.to_string()));
        }
        for (key, _) in SOUNDS {
            assert!(assets.audio(key).is_ok());
        }
    }
}
