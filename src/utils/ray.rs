use glam::Vec3;

#[derive(Debug, Clone)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Parametric distance to the boundary after the current one along a single axis.
    pub(crate) fn axis_step(&self, axis: usize) -> (i32, f32, f32) {
        let d = self.direction[axis];
        let cell = self.origin[axis].floor();
        if d > 0.0 {
            (1, (cell + 1.0 - self.origin[axis]) / d, 1.0 / d)
        } else if d < 0.0 {
            (-1, (cell - self.origin[axis]) / d, -1.0 / d)
        } else {
            (0, f32::INFINITY, f32::INFINITY)
        }
    }
}
