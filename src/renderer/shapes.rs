//! Shape generation for 2D primitives
//!
//! All coordinates are playfield pixels (y down); `RenderState` maps them
//! to NDC at upload time.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::scene::{Drawable, Scene};
use crate::sim::EntityKind;

const CIRCLE_SEGMENTS: u32 = 24;
const SMALL_SEGMENTS: u32 = 10;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), 0.0, color, segments)
}

/// Filled ellipse with semi-axes `radii`, rotated by `rotation` about its center
pub fn ellipse(center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let rot = Vec2::from_angle(rotation);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let p1 = center + rot.rotate(Vec2::new(radii.x * theta1.cos(), radii.y * theta1.sin()));
        let p2 = center + rot.rotate(Vec2::new(radii.x * theta2.cos(), radii.y * theta2.sin()));

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Sheep built from legs, body, head and ears; the head points along `rotation`
pub fn sheep(center: Vec2, radius: f32, rotation: f32) -> Vec<Vertex> {
    let rot = Vec2::from_angle(rotation);
    let at = |x: f32, y: f32| center + rot.rotate(Vec2::new(x * radius, y * radius));

    let mut vertices = Vec::new();
    for (x, y) in [(-0.5, -0.6), (0.5, -0.6), (-0.5, 0.6), (0.5, 0.6)] {
        vertices.extend(circle(at(x, y), radius * 0.18, colors::ANIMAL_LEG, SMALL_SEGMENTS));
    }
    vertices.extend(ellipse(
        center,
        Vec2::new(radius * 0.9, radius * 1.2),
        rotation,
        colors::ANIMAL,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(circle(at(0.9, 0.0), radius * 0.55, colors::ANIMAL_HEAD, SMALL_SEGMENTS));
    for y in [-0.3, 0.3] {
        vertices.extend(circle(at(1.3, y), radius * 0.18, colors::ANIMAL_EAR, SMALL_SEGMENTS));
    }
    vertices
}

/// Vertices for a single drawable
pub fn drawable(d: &Drawable) -> Vec<Vertex> {
    match d.kind {
        EntityKind::Field => rect(d.pos, d.size, colors::FIELD),
        EntityKind::Yard => rect(d.pos, d.size, colors::YARD),
        EntityKind::Player | EntityKind::Assistant => {
            circle(d.pos, d.size.x, colors::PLAYER, CIRCLE_SEGMENTS)
        }
        EntityKind::Animal => sheep(d.pos, d.size.x, d.rotation),
    }
}

/// Tessellate a whole scene back to front
pub fn build_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut drawables = scene.visible().peekable();

    // Field and yard first, then the shop marker, then actors on top
    while let Some(d) = drawables.next_if(|d| matches!(d.kind, EntityKind::Field | EntityKind::Yard)) {
        vertices.extend(drawable(d));
    }
    if let Some(zone) = scene.shop_zone {
        let color = if scene.shop_open { colors::SHOP_OPEN } else { colors::SHOP };
        vertices.extend(rect(zone.origin, zone.size, color));
    }
    for d in drawables {
        vertices.extend(drawable(d));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::GameState;

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::ZERO, 10.0, colors::PLAYER, 16);
        assert_eq!(v.len(), 48);
        for vert in &v {
            let p = Vec2::from(vert.position);
            assert!(p.length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_rect_bounds() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), colors::YARD);
        assert_eq!(v.len(), 6);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = v.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!((max_x, max_y), (40.0, 60.0));
    }

    #[test]
    fn test_sheep_head_follows_rotation() {
        let head_x = |rotation: f32| {
            sheep(Vec2::ZERO, 16.0, rotation)
                .iter()
                .filter(|v| v.color == colors::ANIMAL_HEAD)
                .map(|v| v.position[0])
                .sum::<f32>()
        };
        assert!(head_x(0.0) > 0.0);
        assert!(head_x(PI) < 0.0);
    }

    #[test]
    fn test_scene_starts_with_field() {
        let state = GameState::new(GameConfig::default(), 5);
        let v = build_vertices(&Scene::from_state(&state));
        assert_eq!(v[0].color, colors::FIELD);
        assert!(v.iter().any(|v| v.color == colors::ANIMAL));
        assert!(v.iter().any(|v| v.color == colors::PLAYER));
    }
}
