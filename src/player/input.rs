use glam::Vec3;

/// Movement intent for one tick: a world-space horizontal direction and
/// whether jump is held.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub direction: Vec3,
    pub jump: bool,
}

impl PlayerInput {
    /// Vertical components are dropped and diagonals are capped at unit length.
    pub fn new(direction: Vec3, jump: bool) -> Self {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        let direction = if flat.length_squared() > 1.0 {
            flat.normalize()
        } else {
            flat
        };
        Self { direction, jump }
    }

    pub fn idle() -> Self {
        Self::default()
    }

    /// Builds the intent from stick/key axes in the player's frame.
    ///
    /// `forward` and `strafe` are in `[-1, 1]` (W/S and D/A); `yaw` is the
    /// player's heading.
    pub fn from_axes(forward: f32, strafe: f32, yaw: f32, jump: bool) -> Self {
        let (sin, cos) = yaw.sin_cos();
        let ahead = Vec3::new(-sin, 0.0, -cos);
        let right = Vec3::new(cos, 0.0, -sin);
        Self::new(ahead * forward + right * strafe, jump)
    }

    pub fn is_moving(&self) -> bool {
        self.direction != Vec3::ZERO
    }
}
