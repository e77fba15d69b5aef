use crate::utils::AABB;
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Eye height as a fraction of the player's height.
const EYE_HEIGHT_RATIO: f32 = 0.9;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Everything the integrator reads and writes for one player.
///
/// `position` is the minimum corner of the player's box, so the box is
/// always `[position, position + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub size: Vec3,
    pub velocity: Vec3,
    pub on_ground: bool,
    pub jumping: bool,
    pub rotation: Vec2, // pitch, yaw
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(0.6, 1.8, 0.6))
    }
}

impl PlayerState {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            size,
            velocity: Vec3::ZERO,
            on_ground: false,
            jumping: false,
            rotation: Vec2::ZERO,
        }
    }

    pub fn aabb(&self) -> AABB {
        AABB::from_position_size(self.position, self.size)
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position
            + Vec3::new(
                self.size.x * 0.5,
                self.size.y * EYE_HEIGHT_RATIO,
                self.size.z * 0.5,
            )
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Turns the view. Pitch stops just short of straight up or down; yaw wraps.
    pub fn rotate(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.rotation.x = (self.rotation.x + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.rotation.y = (self.rotation.y + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }

    /// Unit view direction. Zero rotation looks down -Z.
    pub fn forward(&self) -> Vec3 {
        let orientation = Quat::from_rotation_y(self.yaw()) * Quat::from_rotation_x(self.pitch());
        orientation * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_uses_min_corner() {
        let player = PlayerState::new(Vec3::new(5.2, 5.0, 5.2), Vec3::new(0.6, 1.8, 0.6));
        let aabb = player.aabb();
        assert_eq!(aabb.min, Vec3::new(5.2, 5.0, 5.2));
        assert!((aabb.max - Vec3::new(5.8, 6.8, 5.8)).length() < 1e-6);
    }

    #[test]
    fn test_eye_is_inside_box() {
        let player = PlayerState::default();
        let eye = player.eye_position();
        assert!(player.aabb().contains_point(eye));
        assert!((eye.y - 1.62).abs() < 1e-5);
    }

    #[test]
    fn test_forward_directions() {
        let mut player = PlayerState::default();
        assert!((player.forward() - Vec3::NEG_Z).length() < 1e-6);

        player.rotate(0.0, FRAC_PI_2);
        assert!((player.forward() - Vec3::NEG_X).length() < 1e-5);

        player.rotate(-FRAC_PI_2, 0.0);
        assert!(player.forward().y < -0.99);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut player = PlayerState::default();
        player.rotate(10.0, 0.0);
        assert!(player.pitch() < FRAC_PI_2);
        player.rotate(-20.0, 0.0);
        assert!(player.pitch() > -FRAC_PI_2);
    }
}
