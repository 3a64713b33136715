use glam::DVec3;

/// Kinematic state of the local player. Angles are radians in the internal convention.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEntity {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Eye height above the feet; stance = y + height
    pub height: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub on_ground: bool,
}

impl Default for PlayerEntity {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            height: 1.62,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: false,
        }
    }
}

impl PlayerEntity {
    pub fn stance(&self) -> f64 {
        self.position.y + self.height
    }

    pub fn ground_speed(&self) -> f64 {
        self.velocity.x.hypot(self.velocity.z)
    }
}
