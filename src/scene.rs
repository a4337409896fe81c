//! Renderer-facing snapshot of the world
//!
//! Built once per frame from `GameState`. Carries only what a renderer
//! needs: which visual to draw, where, facing which way.

use glam::Vec2;

use crate::sim::{EntityKind, GameState, Rect};

/// One visual in draw order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub kind: EntityKind,
    /// Center for round visuals, top-left corner for rectangles
    pub pos: Vec2,
    /// Heading in radians (0 = +x)
    pub rotation: f32,
    pub visible: bool,
    /// Radius for round visuals, width/height for rectangles
    pub size: Vec2,
}

/// Everything to draw this frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub playfield: Vec2,
    /// Back to front
    pub drawables: Vec<Drawable>,
    pub shop_zone: Option<Rect>,
    pub shop_open: bool,
}

impl Scene {
    pub fn from_state(state: &GameState) -> Self {
        let drawables = state
            .entities()
            .into_iter()
            .map(|e| {
                let t = e.transform();
                let size = match e.kind() {
                    EntityKind::Field => state.field.size,
                    EntityKind::Yard => state.yard.size,
                    EntityKind::Player => Vec2::splat(state.player.radius),
                    EntityKind::Assistant => Vec2::splat(state.config.assistant.radius),
                    EntityKind::Animal => Vec2::splat(state.config.animal.radius),
                };
                Drawable {
                    kind: e.kind(),
                    pos: t.pos,
                    rotation: t.rotation,
                    visible: t.visible,
                    size,
                }
            })
            .collect();

        Self {
            playfield: state.field.size,
            drawables,
            shop_zone: Some(state.shop_zone),
            shop_open: state.shop_open,
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter().filter(|d| d.visible)
    }
}
