//! The herdsman: keyboard-driven, clamped to the playfield

use glam::Vec2;

use super::entity::{Entity, EntityKind, Transform};
use super::motion::step_toward;
use crate::config::PlayerConfig;
use crate::heading;

#[derive(Debug, Clone)]
pub struct Player {
    pub transform: Transform,
    pub radius: f32,
    pub speed: f32,
    pub arrival_radius: f32,
    /// Click-to-move target. Keyboard input always clears it.
    target: Option<Vec2>,
}

impl Player {
    pub fn new(pos: Vec2, config: &PlayerConfig) -> Self {
        Self {
            transform: Transform::at(pos),
            radius: config.radius,
            speed: config.speed,
            arrival_radius: config.arrival_radius,
            target: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.transform.pos += delta;
    }

    /// Move along a unit `intent` for `dt`, keeping the body inside `bounds`
    ///
    /// Returns false (and leaves the player untouched) for a zero intent.
    pub fn apply_intent(&mut self, intent: Vec2, dt: f32, bounds: Vec2) -> bool {
        if intent == Vec2::ZERO {
            return false;
        }
        self.move_by(intent * self.speed * dt);
        self.transform.rotation = heading(intent);
        self.clamp_to(bounds);
        true
    }

    /// Clamp the center to `[radius, bounds - radius]` on both axes
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let r = Vec2::splat(self.radius);
        let max = (bounds - r).max(r);
        self.transform.pos = self.transform.pos.clamp(r, max);
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Walk toward the click target, if any
    fn update(&mut self, dt: f32) {
        let Some(target) = self.target else { return };
        let step = step_toward(self.transform.pos, target, dt, self.speed, self.arrival_radius);
        self.transform.pos = step.pos;
        if let Some(h) = step.heading {
            self.transform.rotation = h;
        }
        if step.arrived {
            self.target = None;
        }
    }
}
