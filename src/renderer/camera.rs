//! Camera state and the key-driven movement contract
//!
//! The camera holds a position, a yaw, and the look direction derived from
//! that yaw once per frame. The driver owns the physical key mapping and
//! routes movement actions here with the frame's delta time.

use super::math::{Mat4, Vec3};

/// Camera movement actions. Keys the driver does not map never reach
/// `keypress`, so unrecognized input is a no-op by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Backward,
    YawLeft,
    YawRight,
    Rise,
    Fall,
    SlideLeft,
    SlideRight,
}

const MOVE_SPEED: f32 = 0.08; // units per millisecond
const YAW_SPEED: f32 = 0.02; // radians per millisecond

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub look_dir: Vec3,
    pub yaw: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            look_dir: Vec3::new(0.0, 0.0, 1.0),
            yaw: 0.0,
        }
    }

    /// Recompute the look direction from the current yaw by spinning the
    /// fixed forward vector about Y. Called once per frame by the pipeline.
    pub fn update_look(&mut self) {
        self.look_dir = Vec3::new(0.0, 0.0, 1.0) * Mat4::rotation_y(self.yaw);
    }

    pub fn keypress(&mut self, key: Key, delta_ms: f32) {
        let forward = self.look_dir * (MOVE_SPEED * delta_ms);
        match key {
            Key::Forward => self.position = self.position + forward,
            Key::Backward => self.position = self.position - forward,
            Key::YawLeft => self.yaw -= YAW_SPEED * delta_ms,
            Key::YawRight => self.yaw += YAW_SPEED * delta_ms,
            Key::Rise => self.position.y += MOVE_SPEED * delta_ms,
            Key::Fall => self.position.y -= MOVE_SPEED * delta_ms,
            // Screen X is mirrored in the viewport mapping, so +x is left.
            Key::SlideLeft => self.position.x += MOVE_SPEED * delta_ms,
            Key::SlideRight => self.position.x -= MOVE_SPEED * delta_ms,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
