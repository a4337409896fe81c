//! Animals: patrol while free, trail a leader once captured

use glam::Vec2;

use super::entity::{Entity, EntityKind, Transform};
use super::motion::{Step, step_toward};

/// Role of an animal; exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimalState {
    /// Free, walking toward a random point outside the yard
    Patrolling { target: Option<Vec2> },
    /// In the player's chain at `index` (0 = directly behind the player)
    FollowingPlayer { index: usize },
    /// Sole follower of the assistant
    FollowingAssistant,
}

#[derive(Debug, Clone)]
pub struct Animal {
    pub id: u32,
    pub transform: Transform,
    pub radius: f32,
    pub state: AnimalState,
}

impl Animal {
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            transform: Transform::at(pos),
            radius,
            state: AnimalState::Patrolling { target: None },
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    pub fn is_following(&self) -> bool {
        !matches!(self.state, AnimalState::Patrolling { .. })
    }

    /// Position in the leader's chain, `None` while free
    pub fn follow_index(&self) -> Option<usize> {
        match self.state {
            AnimalState::Patrolling { .. } => None,
            AnimalState::FollowingPlayer { index } => Some(index),
            AnimalState::FollowingAssistant => Some(0),
        }
    }

    pub fn patrol_target(&self) -> Option<Vec2> {
        match self.state {
            AnimalState::Patrolling { target } => target,
            _ => None,
        }
    }

    /// Step toward `target`, turning to face the direction of travel
    pub fn move_towards(&mut self, target: Vec2, dt: f32, speed: f32, min_distance: f32) -> Step {
        let step = step_toward(self.transform.pos, target, dt, speed, min_distance);
        self.transform.pos = step.pos;
        if let Some(h) = step.heading {
            self.transform.rotation = h;
        }
        step
    }
}

impl Entity for Animal {
    fn kind(&self) -> EntityKind {
        EntityKind::Animal
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }
}
