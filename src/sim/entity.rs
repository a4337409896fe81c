//! Shared entity capabilities and the static scenery entities

use glam::Vec2;

use super::rect::Rect;

/// Which kind of entity a transform belongs to (selects the visual)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Field,
    Yard,
    Player,
    Assistant,
    Animal,
}

/// Position, rotation and visibility mirrored onto screen each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec2,
    /// Heading in radians (0 = +x)
    pub rotation: f32,
    pub visible: bool,
}

impl Transform {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            visible: true,
        }
    }
}

/// Common interface for everything that lives in the world
pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn transform(&self) -> &Transform;

    /// Per-frame hook; `dt` is in seconds
    fn update(&mut self, _dt: f32) {}
}

/// Background covering the whole playfield
#[derive(Debug, Clone)]
pub struct Field {
    pub transform: Transform,
    pub size: Vec2,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            transform: Transform::at(Vec2::ZERO),
            size: Vec2::new(width, height),
        }
    }
}

impl Entity for Field {
    fn kind(&self) -> EntityKind {
        EntityKind::Field
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }
}

/// Delivery zone; immutable once placed
#[derive(Debug, Clone)]
pub struct Yard {
    pub transform: Transform,
    pub size: Vec2,
}

impl Yard {
    /// Place a yard in the bottom-right corner of the field, inset by `margin`
    pub fn bottom_right(field: Vec2, width: f32, height: f32, margin: f32) -> Self {
        let origin = Vec2::new(field.x - width - margin, field.y - height - margin);
        Self {
            transform: Transform::at(origin),
            size: Vec2::new(width, height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.transform.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

impl Entity for Yard {
    fn kind(&self) -> EntityKind {
        EntityKind::Yard
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }
}
