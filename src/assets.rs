//! Asset manifest and preload gate
//!
//! The game cannot start until every entry below has loaded. A bundle is only
//! ever built from a complete, successful load.

use std::collections::HashMap;

use crate::error::AssetError;

/// Image keys and their URLs
pub const IMAGES: &[(&str, &str)] = &[
    ("welcome_background", "image/welcome_background.jpeg"),
    ("game_background", "image/game_background.jpeg"),
    ("user", "image/user.png"),
    ("yuanbao", "image/yuanbao.png"),
    ("hongbao", "image/hongbao.png"),
    ("fudai", "image/fudai.png"),
    ("jintiao", "image/jintiao.png"),
    ("zhuanshi", "image/zhuanshi.png"),
    ("zhihongbao", "image/zhihongbao.png"),
    ("dahongbao", "image/dahongbao.png"),
    ("bomb", "image/bomb.png"),
];

/// Sound keys and their URLs
pub const SOUNDS: &[(&str, &str)] = &[
    ("background", "music/background_music.mp3"),
    ("button", "music/button.mp3"),
    ("collect1", "music/music1.mp3"),
    ("collect2", "music/music2.mp3"),
    ("collect3", "music/music3.mp3"),
    ("collect4", "music/music4.mp3"),
    ("bomb", "music/bomb.mp3"),
];

/// Sprite drawn for the player
pub const PLAYER_SPRITE: &str = "user";

pub fn total_assets() -> usize {
    IMAGES.len() + SOUNDS.len()
}

/// Loaded images (`I`) and sounds (`A`), keyed by manifest key
#[derive(Debug, Clone)]
pub struct AssetBundle<I, A> {
    images: HashMap<String, I>,
    audio: HashMap<String, A>,
}

impl<I, A> AssetBundle<I, A> {
    /// All-or-nothing: the first failed load is returned and nothing is kept.
    /// Every manifest key must be present.
    pub fn from_loaded(
        images: impl IntoIterator<Item = Result<(String, I), AssetError>>,
        audio: impl IntoIterator<Item = Result<(String, A), AssetError>>,
    ) -> Result<Self, AssetError> {
        let images = images.into_iter().collect::<Result<HashMap<_, _>, _>>()?;
        let audio = audio.into_iter().collect::<Result<HashMap<_, _>, _>>()?;

        let missing = IMAGES
            .iter()
            .map(|(key, _)| (key, images.contains_key(*key)))
            .chain(SOUNDS.iter().map(|(key, _)| (key, audio.contains_key(*key))))
            .find(|(_, present)| !present);
        if let Some((key, _)) = missing {
            return Err(AssetError::Missing {
                key: key.to_string(),
            });
        }

        Ok(Self { images, audio })
    }

    pub fn image(&self, key: &str) -> Result<&I, AssetError> {
        self.images.get(key).ok_or_else(|| AssetError::Missing {
            key: key.to_string(),
        })
    }

    pub fn audio(&self, key: &str) -> Result<&A, AssetError> {
        self.audio.get(key).ok_or_else(|| AssetError::Missing {
            key: key.to_string(),
        })
    }
}

/// Browser loader: every request starts up front, then results are awaited in
/// manifest order so progress can be reported.
#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlAudioElement, HtmlImageElement};

    use super::{AssetBundle, IMAGES, SOUNDS, total_assets};
    use crate::error::AssetError;

    pub type WebAssets = AssetBundle<HtmlImageElement, HtmlAudioElement>;

    fn begin_image(key: &str, url: &str) -> Result<(HtmlImageElement, JsFuture), AssetError> {
        let err = || AssetError::ImageLoad {
            key: key.to_string(),
            url: url.to_string(),
        };
        let img = HtmlImageElement::new().map_err(|_| err())?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            img.set_onload(Some(&resolve));
            img.set_onerror(Some(&reject));
        });
        img.set_src(url);
        Ok((img, JsFuture::from(promise)))
    }

    fn begin_audio(key: &str, url: &str) -> Result<(HtmlAudioElement, JsFuture), AssetError> {
        let err = || AssetError::AudioLoad {
            key: key.to_string(),
            url: url.to_string(),
        };
        let audio = HtmlAudioElement::new().map_err(|_| err())?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            audio.set_oncanplaythrough(Some(&resolve));
            audio.set_onerror(Some(&reject));
        });
        audio.set_preload("auto");
        audio.set_src(url);
        Ok((audio, JsFuture::from(promise)))
    }

    /// Load the whole manifest. `progress(loaded, total)` is called after each
    /// asset resolves.
    pub async fn load_all(mut progress: impl FnMut(usize, usize)) -> Result<WebAssets, AssetError> {
        let total = total_assets();

        let mut pending_images = Vec::with_capacity(IMAGES.len());
        for (key, url) in IMAGES {
            pending_images.push((*key, *url, begin_image(key, url)?));
        }
        let mut pending_audio = Vec::with_capacity(SOUNDS.len());
        for (key, url) in SOUNDS {
            pending_audio.push((*key, *url, begin_audio(key, url)?));
        }

        let mut loaded = 0;
        let mut images = Vec::with_capacity(IMAGES.len());
        for (key, url, (img, done)) in pending_images {
            if done.await.is_err() {
                log::error!("image `{}` failed to load from {}", key, url);
                return Err(AssetError::ImageLoad {
                    key: key.to_string(),
                    url: url.to_string(),
                });
            }
            img.set_onload(None);
            img.set_onerror(None);
            loaded += 1;
            progress(loaded, total);
            images.push(Ok((key.to_string(), img)));
        }

        let mut audio = Vec::with_capacity(SOUNDS.len());
        for (key, url, (element, done)) in pending_audio {
            if done.await.is_err() {
                log::error!("audio `{}` failed to load from {}", key, url);
                return Err(AssetError::AudioLoad {
                    key: key.to_string(),
                    url: url.to_string(),
                });
            }
            element.set_oncanplaythrough(None);
            element.set_onerror(None);
            loaded += 1;
            progress(loaded, total);
            audio.push(Ok((key.to_string(), element)));
        }

        log::info!("preloaded {} assets", loaded);
        AssetBundle::from_loaded(images, audio)
    }
}
