//! Axis-aligned rectangle geometry for the yard, field and shop zone
//!
//! Screen coordinates: origin top-left, y grows downward.

use glam::Vec2;
use rand::Rng;

/// An axis-aligned rectangle (origin is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Inclusive point containment (edges count as inside)
    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            origin: self.origin - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

/// Draw a point uniformly over `bounds`, rejecting points inside `excluded`
///
/// `GameConfig::validate` rejects layouts where `excluded` covers `bounds`, so the loop ends.
pub fn random_point_outside<R: Rng>(rng: &mut R, bounds: Vec2, excluded: &Rect) -> Vec2 {
    loop {
        let p = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
        );
        if !excluded.contains(p) {
            return p;
        }
    }
}
