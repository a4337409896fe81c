//! Hired helper that escorts one animal at a time to the yard

use glam::Vec2;

use super::animal::Animal;
use super::entity::{Entity, EntityKind, Transform};
use super::motion::step_toward;
use crate::config::AssistantConfig;

#[derive(Debug, Clone)]
pub struct Assistant {
    pub transform: Transform,
    pub radius: f32,
    pub speed: f32,
    pub arrival_radius: f32,
    target: Option<Vec2>,
}

impl Assistant {
    pub fn new(pos: Vec2, config: &AssistantConfig) -> Self {
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
}

/// Nearest free animal to `from`, with its distance
///
/// Full scan; ties keep the earliest animal in population order.
pub fn nearest_free(animals: &[Animal], from: Vec2) -> Option<(usize, f32)> {
    animals
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.is_following())
        .map(|(i, a)| (i, a.pos().distance(from)))
        .fold(None, |best, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
}

impl Entity for Assistant {
    fn kind(&self) -> EntityKind {
        EntityKind::Assistant
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::animal::AnimalState;

    #[test]
    fn test_nearest_free_picks_closest() {
        let from = Vec2::new(100.0, 100.0);
        let animals = vec![
            Animal::new(1, Vec2::new(130.0, 100.0), 16.0),
            Animal::new(2, Vec2::new(110.0, 100.0), 16.0),
        ];
        let (idx, dist) = nearest_free(&animals, from).unwrap();
        assert_eq!(animals[idx].id, 2);
        assert!((dist - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_free_skips_following() {
        let from = Vec2::ZERO;
        let mut near = Animal::new(1, Vec2::new(5.0, 0.0), 16.0);
        near.state = AnimalState::FollowingPlayer { index: 0 };
        let far = Animal::new(2, Vec2::new(50.0, 0.0), 16.0);
        let animals = vec![near, far];
        assert_eq!(nearest_free(&animals, from).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn test_nearest_free_empty() {
        assert!(nearest_free(&[], Vec2::ZERO).is_none());
    }

    #[test]
    fn test_update_walks_to_target() {
        let mut a = Assistant::new(Vec2::ZERO, &AssistantConfig::default());
        a.set_target(Vec2::new(0.0, 50.0));
        a.update(0.1);
        assert!((a.pos() - Vec2::new(0.0, 20.0)).length() < 1e-4);
        a.update(1.0);
        assert_eq!(a.pos(), Vec2::new(0.0, 50.0));
        assert!(a.target().is_none());
    }
}
