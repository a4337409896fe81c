//! Move-toward-target primitive shared by the player, animals and assistant

use glam::Vec2;

use crate::heading;

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Position after the step
    pub pos: Vec2,
    /// True when the mover is within the arrival threshold or snapped onto the target
    pub arrived: bool,
    /// Direction of travel when movement occurred
    pub heading: Option<f32>,
}

/// Advance `pos` toward `target` by at most `speed * dt`
///
/// Within `arrival` nothing moves. A step that would reach or pass the target
/// lands exactly on it, so movers never oscillate around their goal.
pub fn step_toward(pos: Vec2, target: Vec2, dt: f32, speed: f32, arrival: f32) -> Step {
    let delta = target - pos;
    let dist = delta.length();
    if dist <= arrival {
        return Step {
            pos,
            arrived: true,
            heading: None,
        };
    }

    let step = speed * dt;
    let facing = Some(heading(delta));
    if step >= dist {
        return Step {
            pos: target,
            arrived: true,
            heading: facing,
        };
    }

    Step {
        pos: pos + delta / dist * step,
        arrived: false,
        heading: facing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_within_arrival_does_not_move() {
        let s = step_toward(Vec2::ZERO, Vec2::new(5.0, 0.0), 1.0, 100.0, 10.0);
        assert_eq!(s.pos, Vec2::ZERO);
        assert!(s.arrived);
        assert!(s.heading.is_none());
    }

    #[test]
    fn test_partial_step() {
        let s = step_toward(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.5, 100.0, 1.0);
        assert!((s.pos - Vec2::new(50.0, 0.0)).length() < 1e-4);
        assert!(!s.arrived);
        assert!((s.heading.unwrap() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_snaps() {
        let target = Vec2::new(30.0, 40.0);
        let s = step_toward(Vec2::ZERO, target, 1.0, 100.0, 1.0);
        assert_eq!(s.pos, target);
        assert!(s.arrived);
        assert!(s.heading.is_some());
    }

    proptest! {
        #[test]
        fn prop_step_never_overshoots(
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            tx in -500.0f32..500.0, ty in -500.0f32..500.0,
            dt in 0.0f32..0.5, speed in 0.0f32..400.0,
        ) {
            let (pos, target) = (Vec2::new(px, py), Vec2::new(tx, ty));
            let arrival = 1.0;
            let d = pos.distance(target);
            prop_assume!(d > arrival);

            let s = step_toward(pos, target, dt, speed, arrival);
            let expected = (d - speed * dt).max(0.0);
            let remaining = s.pos.distance(target);
            prop_assert!((remaining - expected).abs() < 1e-3 * d.max(1.0));
            if speed * dt >= d {
                prop_assert_eq!(s.pos, target);
            }
        }
    }
}
