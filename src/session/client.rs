use crate::config::ClientConfig;
use crate::error::{GliderError, Result};
use crate::event::{Event, EventQueue};
use crate::logger::{log, LogSeverity::*};
use crate::physics::look::{from_network_yaw_pitch, to_network_yaw_pitch, YawSmoother};
use crate::physics::{Control, PhysicsEngine, PlayerEntity};
use crate::protocol::block_change::BlockEdit;
use crate::protocol::compression::inflate;
use crate::protocol::{ClientPositionAndLook, InboundPacket, ServerPositionAndLook};
use crate::session::state::SessionState;
use crate::world::{Block, WorldStore};
use glam::DVec3;
use tokio::time::Instant;

/// The local player's view of one connection: world, physics and the position sync clock
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    world: WorldStore,
    physics: PhysicsEngine,
    /// Last dimension announced by the server
    dimension: Option<i32>,
    state: SessionState,
    yaw_smoother: Option<YawSmoother>,
    events: EventQueue,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            physics: PhysicsEngine::new(config.physics.clone()),
            config,
            world: WorldStore::new(),
            dimension: None,
            state: SessionState::Uninitialized,
            yaw_smoother: None,
            events: EventQueue::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn dimension(&self) -> Option<i32> {
        self.dimension
    }

    pub fn world(&self) -> &WorldStore {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldStore {
        &mut self.world
    }

    pub fn entity(&self) -> &PlayerEntity {
        self.physics.entity()
    }

    pub fn entity_mut(&mut self) -> &mut PlayerEntity {
        self.physics.entity_mut()
    }

    pub fn block_at(&self, point: DVec3) -> Option<Block> {
        self.world.block_at(point)
    }

    /// Applies one inbound message. Returns the packets that must go out in reply.
    pub fn handle_packet(
        &mut self,
        packet: InboundPacket,
        now: Instant,
    ) -> Result<Vec<ClientPositionAndLook>> {
        if self.state == SessionState::Terminated {
            log("Ignoring packet after session end".to_string(), Debug);
            return Ok(Vec::new());
        }

        self.dispatch(packet, now).map_err(|err| {
            if matches!(
                err,
                GliderError::DecodeError { .. } | GliderError::IoError(_)
            ) {
                log(format!("Dropped packet: {}", err), Error);
                self.events.push(Event::DecodeError(err.to_string()));
            } else {
                log(format!("Dropped packet: {}", err), Warning);
            }
            err
        })
    }

    fn dispatch(
        &mut self,
        packet: InboundPacket,
        now: Instant,
    ) -> Result<Vec<ClientPositionAndLook>> {
        match packet {
            InboundPacket::Login(login) => {
                log(format!("Logged in to dimension {}", login.dimension), Info);
                self.dimension = Some(login.dimension as i32);
            }
            InboundPacket::Respawn(respawn) => self.change_dimension(respawn.dimension),
            InboundPacket::PositionAndLook(position) => {
                return Ok(vec![self.on_position(&position, now)]);
            }
            InboundPacket::MapChunk(chunk) => {
                let payload = inflate(&chunk.compressed)?;
                self.world
                    .load_column(chunk.chunk_x, chunk.chunk_z, chunk.layout(), &payload)?;
            }
            InboundPacket::MapChunkBulk(bulk) => {
                let payload = inflate(&bulk.compressed)?;
                self.world
                    .load_bulk(&bulk.columns, bulk.sky_light, &payload)?;
            }
            InboundPacket::MultiBlockChange(change) => {
                for edit in change.edits() {
                    self.apply_edit(edit);
                }
            }
            InboundPacket::BlockChange(change) => self.apply_edit(change.edit()),
            InboundPacket::Explosion(explosion) => {
                for cell in explosion.affected_cells() {
                    self.apply_edit(BlockEdit {
                        cell,
                        type_id: 0,
                        metadata: 0,
                    });
                }
            }
        }
        Ok(Vec::new())
    }

    /// A failed edit only loses that one cell
    fn apply_edit(&mut self, edit: BlockEdit) {
        if let Err(err) = self
            .world
            .apply_block_edit(edit.cell, edit.type_id, edit.metadata)
        {
            log(format!("Skipped block edit at {}: {}", edit.cell, err), Warning);
        }
    }

    fn change_dimension(&mut self, dimension: i32) {
        if self.dimension == Some(dimension) {
            return;
        }
        log(
            format!(
                "Dimension changed to {}, dropping {} columns",
                dimension,
                self.world.column_count()
            ),
            Info,
        );
        self.dimension = Some(dimension);
        self.world.reset();
        self.events.push(Event::WorldReset { dimension });
    }

    /// Takes the server's position as truth and builds the echo it expects.
    /// The first one also starts the session.
    pub fn on_position(
        &mut self,
        packet: &ServerPositionAndLook,
        now: Instant,
    ) -> ClientPositionAndLook {
        let entity = self.physics.entity_mut();
        entity.position = DVec3::new(packet.x, packet.y, packet.z);
        entity.height = packet.stance - packet.y;
        entity.on_ground = packet.on_ground;

        if self.state == SessionState::Uninitialized {
            let (yaw, pitch) = from_network_yaw_pitch(packet.yaw, packet.pitch);
            entity.yaw = yaw;
            entity.pitch = pitch;
            self.yaw_smoother = Some(YawSmoother::new(
                yaw,
                now,
                self.config.physics.yaw_speed,
            ));
            self.state = SessionState::Active;
            self.events.push(Event::Spawned);
            log(
                format!(
                    "Spawned at ({:.2}, {:.2}, {:.2})",
                    packet.x, packet.y, packet.z
                ),
                Info,
            );
        }

        ClientPositionAndLook::from(packet)
    }

    pub fn set_control(&mut self, control: Control, state: bool) {
        self.physics.set_control(control, state);
    }

    /// Sets a control by its name: forward, back, left, right or jump
    pub fn set_control_by_name(&mut self, name: &str, state: bool) -> Result<()> {
        self.set_control(name.parse()?, state);
        Ok(())
    }

    pub fn clear_controls(&mut self) {
        self.physics.clear_controls();
    }

    /// Runs one physics step. Does nothing before spawn or after the session ends.
    pub fn tick(&mut self, delta_seconds: f64) {
        if self.state.is_active() {
            self.physics.tick(&self.world, delta_seconds);
        }
    }

    /// The scheduled position/look report, with the yaw turned at a bounded rate
    pub fn position_update(&mut self, now: Instant) -> Option<ClientPositionAndLook> {
        if !self.state.is_active() {
            return None;
        }
        let smoother = self.yaw_smoother.as_mut()?;
        let entity = self.physics.entity();
        let sent_yaw = smoother.advance(entity.yaw, now);
        let (yaw, pitch) = to_network_yaw_pitch(sent_yaw, entity.pitch);

        Some(ClientPositionAndLook {
            x: entity.position.x,
            y: entity.position.y,
            stance: entity.stance(),
            z: entity.position.z,
            yaw,
            pitch,
            on_ground: entity.on_ground,
        })
    }

    /// Stops physics and position updates. The world is kept until the client is dropped.
    pub fn terminate(&mut self) {
        if self.state != SessionState::Terminated {
            log("Session terminated".to_string(), Info);
            self.state = SessionState::Terminated;
            self.yaw_smoother = None;
        }
    }

    /// Events from the world, the physics engine and the session, in that order
    pub fn drain_events(&mut self) -> Vec<Event> {
        let mut events: Vec<Event> = self.world.drain_events().collect();
        events.extend(self.physics.drain_events());
        events.extend(self.events.drain());
        events
    }
}
