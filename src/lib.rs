//! Herdsman - a sheep-herding arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, capture, delivery, spawning, shop)
//! - `config`: Static game tuning, loaded once per session
//! - `scene`: Renderer-facing view of the world (transforms in z-order)
//! - `renderer`: WebGPU rendering of vector fallback visuals
//! - `platform`: Browser/native input abstraction
//! - `ui`: HUD, menu and shop label contract
//! - `audio`: Background music with mute

pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod ui;

pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Heading (radians) of a direction vector, `atan2(dy, dx)`
#[inline]
pub fn heading(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_heading_axes() {
        assert!((heading(Vec2::X) - 0.0).abs() < 1e-6);
        assert!((heading(Vec2::Y) - PI / 2.0).abs() < 1e-6);
        assert!((heading(-Vec2::X) - PI).abs() < 1e-6);
    }
}
