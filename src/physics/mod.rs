pub mod collision;
pub mod config;
pub mod control;
pub mod engine;
pub mod entity;
pub mod look;

pub use config::{PhysicsConfig, UnloadedPolicy};
pub use control::{Control, ControlState};
pub use engine::PhysicsEngine;
pub use entity::PlayerEntity;
pub use look::YawSmoother;
