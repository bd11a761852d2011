//! Platform abstraction layer
//!
//! The simulation never talks to the browser. These traits are the seams the
//! presentation layer drives:
//! - Render surface (sprite drawing)
//! - Audio sink (sound playback)
//! - HUD (score / countdown / result text)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Something sprites can be drawn onto
pub trait RenderSurface {
    type Image;

    fn clear(&mut self);
    fn draw_sprite(&mut self, image: &Self::Image, x: f32, y: f32, w: f32, h: f32);
}

/// Something sounds can be played through
pub trait AudioSink {
    type Handle;

    fn play(&mut self, handle: &Self::Handle);
    /// Play on repeat until stopped
    fn play_looped(&mut self, handle: &Self::Handle);
    /// Stop and rewind
    fn stop(&mut self, handle: &Self::Handle);
    /// Independent copy so rapid plays of one sound can overlap
    fn clone_for_overlap(&mut self, handle: &Self::Handle) -> Option<Self::Handle>;
}

/// On-screen score and countdown
pub trait Hud {
    fn set_score(&mut self, score: u64);
    fn set_time_left(&mut self, secs: u32);
    fn show_final_score(&mut self, score: u64);
    fn hide_result(&mut self);
}
