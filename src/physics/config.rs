use serde::{Deserialize, Serialize};

/// How collision treats cells inside columns that are not loaded yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnloadedPolicy {
    /// Unloaded cells never block
    #[default]
    Passable,
    /// Unloaded cells block like stone
    Solid,
}

/// Tuned movement constants. Speeds are in blocks per second, angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub max_ground_speed: f64,
    pub terminal_velocity: f64,
    pub walking_acceleration: f64,
    pub gravity: f64,
    pub ground_friction: f64,
    /// Half-width of the player's horizontal bounding box
    pub player_apothem: f64,
    pub player_height: f64,
    pub jump_speed: f64,
    /// Maximum reported turn rate, radians per second
    pub yaw_speed: f64,
    pub unloaded_policy: UnloadedPolicy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_ground_speed: 4.27,
            terminal_velocity: 20.0,
            walking_acceleration: 100.0,
            gravity: 27.0,
            ground_friction: 0.9,
            // the server rejects moves with the client's own 0.30
            player_apothem: 0.32,
            player_height: 1.74,
            jump_speed: 9.0,
            yaw_speed: 3.0,
            unloaded_policy: UnloadedPolicy::Passable,
        }
    }
}
