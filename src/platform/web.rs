//! Browser collaborators: HTML audio elements and DOM text for the HUD

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAudioElement, HtmlElement};

use super::{AudioSink, Hud};

/// Plays preloaded `<audio>` elements
#[derive(Default)]
pub struct HtmlAudio;

impl AudioSink for HtmlAudio {
    type Handle = HtmlAudioElement;

    fn play(&mut self, handle: &HtmlAudioElement) {
        // Autoplay rejections are fine; the next gesture retries
        if let Err(e) = handle.play() {
            log::warn!("audio play rejected: {:?}", e);
        }
    }

    fn play_looped(&mut self, handle: &HtmlAudioElement) {
        handle.set_loop(true);
        self.play(handle);
    }

    fn stop(&mut self, handle: &HtmlAudioElement) {
        let _ = handle.pause();
        handle.set_current_time(0.0);
    }

    fn clone_for_overlap(&mut self, handle: &HtmlAudioElement) -> Option<HtmlAudioElement> {
        handle.clone_node().ok()?.dyn_into::<HtmlAudioElement>().ok()
    }
}

/// HUD backed by the page's `#score`, `#time` and `.result-modal` elements
pub struct DomHud {
    document: Document,
}

impl DomHud {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(&self, selector: &str, display: &str) {
        if let Some(el) = self
            .document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }
}

impl Hud for DomHud {
    fn set_score(&mut self, score: u64) {
        self.set_text("#score", &score.to_string());
    }

    fn set_time_left(&mut self, secs: u32) {
        self.set_text("#time", &secs.to_string());
    }

    fn show_final_score(&mut self, score: u64) {
        self.set_text(".result-modal .final-score", &score.to_string());
        self.set_display(".result-modal", "flex");
    }

    fn hide_result(&mut self) {
        self.set_display(".result-modal", "none");
    }
}
