//! Background music
//!
//! One looping track played through an `<audio>` element. Browsers refuse
//! playback until the first user gesture, so the host calls `unlock` from
//! a click or key handler. Every failure is logged and swallowed: the game
//! keeps running silently.

#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

use crate::config::GameConfig;

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    bgm: Option<HtmlAudioElement>,
    bg_volume: f32,
    muted: bool,
    /// Set once playback has been requested after a user gesture
    unlocked: bool,
}

impl AudioManager {
    /// Prepare the looping track named in the asset config
    pub fn new(config: &GameConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        let bgm = match HtmlAudioElement::new_with_src(&config.assets.bgm) {
            Ok(el) => {
                el.set_loop(true);
                Some(el)
            }
            Err(e) => {
                log::warn!("Failed to create audio element for {}: {:?}", config.assets.bgm, e);
                None
            }
        };

        let manager = Self {
            #[cfg(target_arch = "wasm32")]
            bgm,
            bg_volume: config.audio.bg_volume.clamp(0.0, 1.0),
            muted: false,
            unlocked: false,
        };
        manager.apply_volume();
        manager
    }

    /// Start playback (call from a user gesture handler)
    pub fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;
        if !self.muted {
            self.play();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute/unmute the music
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
        if !muted && self.unlocked {
            self.play();
        }
        log::info!("Music {}", if muted { "muted" } else { "unmuted" });
    }

    /// Flip the mute flag; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.bg_volume }
    }

    #[cfg(target_arch = "wasm32")]
    fn apply_volume(&self) {
        if let Some(el) = &self.bgm {
            el.set_volume(f64::from(self.effective_volume()));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_volume(&self) {}

    #[cfg(target_arch = "wasm32")]
    fn play(&self) {
        use wasm_bindgen_futures::JsFuture;

        let Some(el) = &self.bgm else { return };
        match el.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("Background music did not start: {:?}", e);
                    }
                });
            }
            Err(e) => log::warn!("Background music did not start: {:?}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play(&self) {
        log::debug!("No audio output on this platform");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_zeroes_volume() {
        let mut audio = AudioManager::new(&GameConfig::default());
        assert!((audio.effective_volume() - 0.35).abs() < 1e-6);
        assert!(audio.toggle_mute());
        assert_eq!(audio.effective_volume(), 0.0);
        assert!(!audio.toggle_mute());
        assert!((audio.effective_volume() - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_unlock_once() {
        let mut audio = AudioManager::new(&GameConfig::default());
        assert!(!audio.unlocked);
        audio.unlock();
        audio.unlock();
        assert!(audio.unlocked);
        assert!(!audio.is_muted());
    }

    #[test]
    fn test_volume_clamped() {
        let mut config = GameConfig::default();
        config.audio.bg_volume = 3.0;
        let audio = AudioManager::new(&config);
        assert_eq!(audio.effective_volume(), 1.0);
    }
}
