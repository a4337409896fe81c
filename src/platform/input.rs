//! Keyboard state
//!
//! Key transitions overwrite flags (last write wins); nothing is queued.

use glam::Vec2;

/// Directional keys currently held (WASD or arrows)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Keys the host reacts to, decoded from `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Up,
    Down,
    Left,
    Right,
    /// Pin/unpin the shop panel
    Shop,
    /// Toggle background music
    Mute,
}

impl HostKey {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(HostKey::Up),
            "KeyS" | "ArrowDown" => Some(HostKey::Down),
            "KeyA" | "ArrowLeft" => Some(HostKey::Left),
            "KeyD" | "ArrowRight" => Some(HostKey::Right),
            "KeyM" => Some(HostKey::Shop),
            "KeyB" => Some(HostKey::Mute),
            _ => None,
        }
    }

    pub fn is_direction(&self) -> bool {
        matches!(
            self,
            HostKey::Up | HostKey::Down | HostKey::Left | HostKey::Right
        )
    }
}

impl HeldKeys {
    /// Record a key transition; non-directional keys are ignored
    pub fn set(&mut self, key: HostKey, down: bool) {
        match key {
            HostKey::Up => self.up = down,
            HostKey::Down => self.down = down,
            HostKey::Left => self.left = down,
            HostKey::Right => self.right = down,
            HostKey::Shop | HostKey::Mute => {}
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Unit move direction (screen space, y down); zero when idle or cancelled
    pub fn intent(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v.normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(HostKey::from_code("KeyW"), Some(HostKey::Up));
        assert_eq!(HostKey::from_code("ArrowLeft"), Some(HostKey::Left));
        assert_eq!(HostKey::from_code("KeyM"), Some(HostKey::Shop));
        assert_eq!(HostKey::from_code("KeyB"), Some(HostKey::Mute));
        assert_eq!(HostKey::from_code("Space"), None);
        assert!(!HostKey::Mute.is_direction());
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let keys = HeldKeys {
            up: true,
            right: true,
            ..Default::default()
        };
        let i = keys.intent();
        assert!((i.length() - 1.0).abs() < 1e-6);
        assert!(i.x > 0.0 && i.y < 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut keys = HeldKeys::default();
        keys.set(HostKey::Left, true);
        keys.set(HostKey::Right, true);
        assert!(keys.any());
        assert_eq!(keys.intent(), Vec2::ZERO);
        keys.set(HostKey::Left, false);
        assert_eq!(keys.intent(), Vec2::X);
    }
}
