use crate::event::{Event, EventQueue};
use crate::physics::collision::{collision_in_range, BoundingBox};
use crate::physics::config::PhysicsConfig;
use crate::physics::control::{Control, ControlState};
use crate::physics::entity::PlayerEntity;
use crate::world::block::BlockLookup;
use glam::{DVec3, IVec3};

/// Steps shorter than this are skipped; friction divides by the step.
const EPSILON: f64 = 0.000001;
/// Gap left between the player and a block it was pushed out of
const SEPARATION: f64 = 0.001;
/// Share of ground friction that still applies in the air
const AIR_FRICTION_SCALE: f64 = 0.05;

#[derive(Debug)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
    entity: PlayerEntity,
    controls: ControlState,
    events: EventQueue,
}

impl PhysicsEngine {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            entity: PlayerEntity::default(),
            controls: ControlState::default(),
            events: EventQueue::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn entity(&self) -> &PlayerEntity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut PlayerEntity {
        &mut self.entity
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn set_control(&mut self, control: Control, state: bool) {
        self.controls.set(control, state);
    }

    pub fn clear_controls(&mut self) {
        self.controls.clear();
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain()
    }

    /// Advances the player by one step of `delta_seconds`
    pub fn tick<L: BlockLookup>(&mut self, world: &L, delta_seconds: f64) {
        if delta_seconds < EPSILON {
            return;
        }

        let was_on_ground = self.entity.on_ground;
        self.entity.on_ground = false;

        let mut acceleration = self.input_acceleration();

        if self.controls.take_jump() && was_on_ground {
            self.entity.velocity.y = self.config.jump_speed;
        }

        acceleration.y -= self.config.gravity;
        acceleration += self.friction(was_on_ground, delta_seconds);

        self.entity.velocity += acceleration * delta_seconds;
        self.limit_speed();
        self.move_and_collide(world, delta_seconds);

        self.events.push(Event::EntityMoved(self.entity.position));
    }

    fn input_acceleration(&self) -> DVec3 {
        let (forward, right) = self.controls.movement();
        if forward == 0.0 && right == 0.0 {
            return DVec3::ZERO;
        }

        let input_yaw = self.entity.yaw + (-right).atan2(forward);
        DVec3::new(
            self.config.walking_acceleration * -input_yaw.sin(),
            0.0,
            self.config.walking_acceleration * -input_yaw.cos(),
        )
    }

    /// Horizontal deceleration opposing the current ground velocity
    fn friction(&mut self, on_ground: bool, delta_seconds: f64) -> DVec3 {
        let velocity = &mut self.entity.velocity;
        let speed_squared = velocity.x * velocity.x + velocity.z * velocity.z;
        if speed_squared < EPSILON {
            velocity.x = 0.0;
            velocity.z = 0.0;
            return DVec3::ZERO;
        }

        let speed = speed_squared.sqrt();
        let mut friction = self.config.ground_friction * self.config.walking_acceleration;
        if !on_ground {
            friction *= AIR_FRICTION_SCALE;
        }
        // never enough to reverse direction within the step
        friction = friction.min(speed / delta_seconds);

        DVec3::new(
            -velocity.x / speed * friction,
            0.0,
            -velocity.z / speed * friction,
        )
    }

    fn limit_speed(&mut self) {
        let max_ground_speed = self.config.max_ground_speed;
        let terminal_velocity = self.config.terminal_velocity;
        let velocity = &mut self.entity.velocity;

        let speed_squared = velocity.x * velocity.x + velocity.z * velocity.z;
        if speed_squared > max_ground_speed * max_ground_speed {
            let correction = max_ground_speed / speed_squared.sqrt();
            velocity.x *= correction;
            velocity.z *= correction;
        }
        velocity.y = velocity.y.clamp(-terminal_velocity, terminal_velocity);
    }

    /// Moves along X, then Z, then Y, pushing the player out of any block it enters
    fn move_and_collide<L: BlockLookup>(&mut self, world: &L, delta_seconds: f64) {
        let apothem = self.config.player_apothem;
        let height = self.config.player_height;
        let policy = self.config.unloaded_policy;
        let entity = &mut self.entity;

        if entity.velocity.x != 0.0 {
            entity.position.x += entity.velocity.x * delta_seconds;
            let bb = BoundingBox::around(entity.position, apothem, height);
            let block_x = (entity.position.x + entity.velocity.x.signum() * apothem).floor() as i32;
            let face_min = IVec3::new(block_x, bb.min.y, bb.min.z);
            let face_max = IVec3::new(block_x, bb.max.y, bb.max.z);
            if collision_in_range(world, face_min, face_max, policy) {
                entity.position.x = if entity.velocity.x < 0.0 {
                    block_x as f64 + 1.0 + apothem + SEPARATION
                } else {
                    block_x as f64 - apothem - SEPARATION
                };
                entity.velocity.x = 0.0;
            }
        }

        if entity.velocity.z != 0.0 {
            entity.position.z += entity.velocity.z * delta_seconds;
            let bb = BoundingBox::around(entity.position, apothem, height);
            let block_z = (entity.position.z + entity.velocity.z.signum() * apothem).floor() as i32;
            let face_min = IVec3::new(bb.min.x, bb.min.y, block_z);
            let face_max = IVec3::new(bb.max.x, bb.max.y, block_z);
            if collision_in_range(world, face_min, face_max, policy) {
                entity.position.z = if entity.velocity.z < 0.0 {
                    block_z as f64 + 1.0 + apothem + SEPARATION
                } else {
                    block_z as f64 - apothem - SEPARATION
                };
                entity.velocity.z = 0.0;
            }
        }

        if entity.velocity.y != 0.0 {
            entity.position.y += entity.velocity.y * delta_seconds;
            let bb = BoundingBox::around(entity.position, apothem, height);
            let falling = entity.velocity.y < 0.0;
            let block_y = if falling {
                entity.position.y.floor() as i32
            } else {
                (entity.position.y + height).floor() as i32
            };
            let face_min = IVec3::new(bb.min.x, block_y, bb.min.z);
            let face_max = IVec3::new(bb.max.x, block_y, bb.max.z);
            if collision_in_range(world, face_min, face_max, policy) {
                entity.position.y = if falling {
                    block_y as f64 + 1.0 + SEPARATION
                } else {
                    block_y as f64 - height - SEPARATION
                };
                entity.on_ground = falling;
                entity.velocity.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::config::UnloadedPolicy;
    use crate::world::block::Block;
    use std::collections::HashSet;
    use std::f64::consts::PI;

    const DT: f64 = 0.05;

    /// Infinite stone floor at y < 64 plus any extra solid cells
    struct TestWorld {
        solid: HashSet<IVec3>,
        loaded_radius: i32,
    }

    impl TestWorld {
        fn floor() -> Self {
            Self {
                solid: HashSet::new(),
                loaded_radius: i32::MAX,
            }
        }

        fn with_block(mut self, cell: IVec3) -> Self {
            self.solid.insert(cell);
            self
        }
    }

    impl BlockLookup for TestWorld {
        fn block_at_cell(&self, cell: IVec3) -> Option<Block> {
            if cell.x.abs() > self.loaded_radius || cell.z.abs() > self.loaded_radius {
                return None;
            }
            let solid = cell.y < 64 || self.solid.contains(&cell);
            Some(Block {
                type_id: if solid { 1 } else { 0 },
                ..Block::default()
            })
        }
    }

    fn standing_engine() -> PhysicsEngine {
        let mut engine = PhysicsEngine::new(PhysicsConfig::default());
        let entity = engine.entity_mut();
        entity.position = DVec3::new(0.5, 64.001, 0.5);
        entity.on_ground = true;
        engine
    }

    #[test]
    fn test_tiny_step_is_noop() {
        let mut engine = standing_engine();
        let before = engine.entity().clone();
        engine.tick(&TestWorld::floor(), 0.0);
        assert_eq!(engine.entity(), &before);
        assert_eq!(engine.drain_events().count(), 0);
    }

    #[test]
    fn test_rest_on_ground_stays_still() {
        let mut engine = standing_engine();
        engine.tick(&TestWorld::floor(), DT);

        let entity = engine.entity().clone();
        assert_eq!(entity.velocity.x, 0.0);
        assert_eq!(entity.velocity.z, 0.0);
        assert_eq!(entity.velocity.y, 0.0);
        assert!(entity.on_ground);
        assert!((entity.position.y - 64.001).abs() < 1e-9);
        assert_eq!(
            engine.drain_events().collect::<Vec<_>>(),
            vec![Event::EntityMoved(entity.position)]
        );
    }

    #[test]
    fn test_walk_forward_follows_yaw() {
        let mut engine = standing_engine();
        engine.set_control(Control::Forward, true);
        engine.tick(&TestWorld::floor(), DT);

        // yaw 0 faces -z
        let entity = engine.entity();
        assert!(entity.velocity.z < 0.0);
        assert!(entity.velocity.x.abs() < 1e-9);

        let mut engine = standing_engine();
        engine.entity_mut().yaw = PI / 2.0;
        engine.set_control(Control::Forward, true);
        engine.tick(&TestWorld::floor(), DT);
        assert!(engine.entity().velocity.x < 0.0);
    }

    #[test]
    fn test_speed_limits_hold() {
        let mut engine = standing_engine();
        engine.set_control(Control::Forward, true);
        engine.set_control(Control::Right, true);
        let world = TestWorld::floor();
        let config = engine.config().clone();

        for _ in 0..100 {
            engine.tick(&world, DT);
            let entity = engine.entity();
            assert!(entity.ground_speed() <= config.max_ground_speed + 1e-9);
            assert!(entity.velocity.y.abs() <= config.terminal_velocity);
        }

        let mut engine = PhysicsEngine::new(PhysicsConfig::default());
        engine.entity_mut().position = DVec3::new(0.5, 500.0, 0.5);
        for _ in 0..100 {
            engine.tick(&world, DT);
            assert!(engine.entity().velocity.y >= -config.terminal_velocity);
        }
    }

    #[test]
    fn test_friction_stops_without_reversing() {
        let mut engine = standing_engine();
        engine.entity_mut().velocity = DVec3::new(0.5, 0.0, 0.0);
        engine.tick(&TestWorld::floor(), DT);
        assert!(engine.entity().velocity.x.abs() < 1e-12);
    }

    #[test]
    fn test_wall_stops_motion() {
        let wall = IVec3::new(2, 64, 0);
        let world = TestWorld::floor()
            .with_block(wall)
            .with_block(wall + IVec3::Y);
        let mut engine = standing_engine();
        engine.entity_mut().yaw = -PI / 2.0;
        engine.set_control(Control::Forward, true);

        for _ in 0..40 {
            engine.tick(&world, DT);
        }

        let entity = engine.entity();
        let apothem = engine.config().player_apothem;
        assert!(entity.position.x + apothem < wall.x as f64);
        assert!(entity.position.x > 1.0);
        assert_eq!(entity.velocity.x, 0.0);
    }

    #[test]
    fn test_jump_and_land() {
        let world = TestWorld::floor();
        let mut engine = standing_engine();
        engine.set_control(Control::Jump, true);
        engine.tick(&world, DT);
        engine.set_control(Control::Jump, false);

        assert!(!engine.entity().on_ground);
        assert!(engine.entity().position.y > 64.2);

        for _ in 0..40 {
            engine.tick(&world, DT);
        }
        let entity = engine.entity();
        assert!(entity.on_ground);
        assert!((entity.position.y - 64.001).abs() < 1e-9);
    }

    #[test]
    fn test_ceiling_stops_jump() {
        let world = TestWorld::floor().with_block(IVec3::new(0, 66, 0));
        let mut engine = standing_engine();
        engine.set_control(Control::Jump, true);
        engine.tick(&world, DT);
        engine.tick(&world, DT);

        let entity = engine.entity();
        let height = engine.config().player_height;
        assert!(entity.position.y + height < 66.0);
        assert!(!entity.on_ground);
    }

    #[test]
    fn test_unloaded_policy_solid_blocks_fall() {
        let world = TestWorld {
            solid: HashSet::new(),
            loaded_radius: -1,
        };
        let mut config = PhysicsConfig::default();
        config.unloaded_policy = UnloadedPolicy::Solid;
        let mut engine = PhysicsEngine::new(config);
        engine.entity_mut().position = DVec3::new(0.5, 100.0, 0.5);
        engine.tick(&world, DT);
        assert!(engine.entity().on_ground);

        let mut engine = PhysicsEngine::new(PhysicsConfig::default());
        engine.entity_mut().position = DVec3::new(0.5, 100.0, 0.5);
        engine.tick(&world, DT);
        assert!(!engine.entity().on_ground);
        assert!(engine.entity().position.y < 100.0);
    }
}
