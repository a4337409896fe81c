//! Game configuration
//!
//! Static tuning for a session: playfield, entity radii and speeds, capture,
//! spawner, upgrade tables and asset identifiers. Loaded once, never reloaded.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Yard;

/// Configuration load/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("upgrade track `{track}` has no levels")]
    EmptyTrack { track: &'static str },
    #[error("upgrade track `{track}` has {levels} levels but {costs} costs")]
    TrackLengthMismatch {
        track: &'static str,
        levels: usize,
        costs: usize,
    },
    #[error("spawn interval min {min}s is greater than max {max}s")]
    SpawnInterval { min: f32, max: f32 },
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("yard ({width}x{height} + margin {margin}) does not fit the playfield")]
    YardTooLarge { width: f32, height: f32, margin: f32 },
    #[error("yard plus animal radius {radius} leaves no open ground to place animals")]
    NoOpenGround { radius: f32 },
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Delivery zone, anchored to the bottom-right corner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YardConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 140.0,
            margin: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    /// Pixels per second
    pub speed: f32,
    /// Distance at which a click target counts as reached
    pub arrival_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: 24.0,
            speed: 220.0,
            arrival_radius: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub radius: f32,
    pub speed: f32,
    pub arrival_radius: f32,
    /// Offset from the player where the assistant appears when hired
    pub spawn_offset: (f32, f32),
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            radius: 22.0,
            speed: 200.0,
            arrival_radius: 4.0,
            spawn_offset: (32.0, 32.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimalConfig {
    pub radius: f32,
    pub follow_speed: f32,
    pub patrol_speed: f32,
    /// Arrival threshold for both following and patrolling
    pub min_distance: f32,
}

impl Default for AnimalConfig {
    fn default() -> Self {
        Self {
            radius: 16.0,
            follow_speed: 160.0,
            patrol_speed: 100.0,
            min_distance: 18.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Animals placed at session start
    pub count: usize,
    /// Population cap for the timed spawner
    pub limit: usize,
    pub interval_min_sec: f32,
    pub interval_max_sec: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 20,
            limit: 40,
            interval_min_sec: 2.0,
            interval_max_sec: 6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub radius: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { radius: 60.0 }
    }
}

/// Level and cost tables for the shop
///
/// `*_costs[i]` is the price of reaching level `i`; index 0 is the free
/// starting level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTables {
    pub capacity_levels: Vec<usize>,
    pub capacity_costs: Vec<u64>,
    pub score_per_levels: Vec<u64>,
    pub score_per_costs: Vec<u64>,
    /// Spawn rate multiplier (interval / multiplier). Tracked but not applied.
    pub spawn_rate_levels: Vec<f32>,
    pub spawn_rate_costs: Vec<u64>,
    pub assistant_cost: u64,
}

impl Default for UpgradeTables {
    fn default() -> Self {
        Self {
            capacity_levels: vec![1, 2, 3, 5],
            capacity_costs: vec![0, 5, 10, 25],
            score_per_levels: vec![1, 2, 3, 5],
            score_per_costs: vec![0, 5, 10, 25],
            spawn_rate_levels: vec![1.0, 1.5, 2.0],
            spawn_rate_costs: vec![0, 10, 25],
            assistant_cost: 50,
        }
    }
}

/// Shop zone, anchored to the top-right corner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub width: f32,
    pub height: f32,
    pub inset: f32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            width: 128.0,
            height: 128.0,
            inset: 16.0,
        }
    }
}

/// Resource identifiers, resolved relative to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub sheep: String,
    pub player: String,
    pub corral: String,
    pub shop: String,
    pub assistant: String,
    pub bgm: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            sheep: "/sheep.png".into(),
            player: "/herdsman.png".into(),
            corral: "/corral.png".into(),
            shop: "/shop.png".into(),
            assistant: "/herdsman.png".into(),
            bgm: "/bg.mp3".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Background music volume (0.0 - 1.0)
    pub bg_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { bg_volume: 0.35 }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub yard: YardConfig,
    pub player: PlayerConfig,
    pub assistant: AssistantConfig,
    pub animal: AnimalConfig,
    pub spawn: SpawnConfig,
    pub capture: CaptureConfig,
    pub upgrades: UpgradeTables,
    pub shop: ShopConfig,
    pub assets: AssetConfig,
    pub audio: AudioConfig,
}

impl GameConfig {
    /// Parse a JSON document; missing sections fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let u = &self.upgrades;
        check_track("capacity", u.capacity_levels.len(), u.capacity_costs.len())?;
        check_track("score_per", u.score_per_levels.len(), u.score_per_costs.len())?;
        check_track("spawn_rate", u.spawn_rate_levels.len(), u.spawn_rate_costs.len())?;

        for (what, value) in [
            ("playfield.width", self.playfield.width),
            ("playfield.height", self.playfield.height),
            ("yard.width", self.yard.width),
            ("yard.height", self.yard.height),
            ("player.radius", self.player.radius),
            ("player.speed", self.player.speed),
            ("assistant.speed", self.assistant.speed),
            ("animal.radius", self.animal.radius),
            ("capture.radius", self.capture.radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { what, value });
            }
        }

        if self.spawn.interval_min_sec > self.spawn.interval_max_sec {
            return Err(ConfigError::SpawnInterval {
                min: self.spawn.interval_min_sec,
                max: self.spawn.interval_max_sec,
            });
        }

        let y = &self.yard;
        if y.width + y.margin > self.playfield.width || y.height + y.margin > self.playfield.height {
            return Err(ConfigError::YardTooLarge {
                width: y.width,
                height: y.height,
                margin: y.margin,
            });
        }

        // Spawn and patrol points are drawn from [0, w) x [0, h) outside this rect
        let size = Vec2::new(self.playfield.width, self.playfield.height);
        let excluded = Yard::bottom_right(size, y.width, y.height, y.margin)
            .rect()
            .expanded(self.animal.radius);
        if excluded.min().cmple(Vec2::ZERO).all() && excluded.max().cmpge(size).all() {
            return Err(ConfigError::NoOpenGround {
                radius: self.animal.radius,
            });
        }

        Ok(())
    }
}

fn check_track(track: &'static str, levels: usize, costs: usize) -> Result<(), ConfigError> {
    if levels == 0 {
        return Err(ConfigError::EmptyTrack { track });
    }
    if levels != costs {
        return Err(ConfigError::TrackLengthMismatch {
            track,
            levels,
            costs,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "capture": { "radius": 80.0 } }"#).unwrap();
        assert_eq!(config.capture.radius, 80.0);
        assert_eq!(config.spawn.limit, 40);
        assert_eq!(config.upgrades.capacity_levels, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_mismatched_track_rejected() {
        let json = r#"{ "upgrades": {
            "capacity_levels": [1, 2], "capacity_costs": [0],
            "score_per_levels": [1], "score_per_costs": [0],
            "spawn_rate_levels": [1.0], "spawn_rate_costs": [0],
            "assistant_cost": 50 } }"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TrackLengthMismatch {
                track: "capacity",
                ..
            }
        ));
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let mut config = GameConfig::default();
        config.spawn.interval_min_sec = 7.0;
        assert!(matches!(config.validate(), Err(ConfigError::SpawnInterval { .. })));
    }

    #[test]
    fn test_yard_covering_field_rejected() {
        // 232 - 200 - 16 margin - 16 radius leaves nothing left of the yard
        let json = r#"{ "playfield": { "width": 232.0, "height": 172.0 } }"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::NoOpenGround { .. })
        ));

        // A strip of open ground is enough
        let json = r#"{ "playfield": { "width": 240.0, "height": 172.0 } }"#;
        assert!(GameConfig::from_json(json).is_ok());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(GameConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }
}
