use crate::protocol::packet::{Packet, PacketBuffer};
use std::io;

pub const POSITION_AND_LOOK_ID: u8 = 0x0D;

/// Player Position And Look (clientbound)
/// Authoritative position from the server. Stance precedes y on this side of the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerPositionAndLook {
    pub x: f64,
    /// Eye level, absolute
    pub stance: f64,
    pub y: f64,
    pub z: f64,
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    pub on_ground: bool,
}

impl Packet for ServerPositionAndLook {
    fn packet_id() -> u8 {
        POSITION_AND_LOOK_ID
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        Ok(Self {
            x: buffer.read_f64()?,
            stance: buffer.read_f64()?,
            y: buffer.read_f64()?,
            z: buffer.read_f64()?,
            yaw: buffer.read_f32()?,
            pitch: buffer.read_f32()?,
            on_ground: buffer.read_bool()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_f64(self.x)?;
        buffer.write_f64(self.stance)?;
        buffer.write_f64(self.y)?;
        buffer.write_f64(self.z)?;
        buffer.write_f32(self.yaw)?;
        buffer.write_f32(self.pitch)?;
        buffer.write_bool(self.on_ground);
        Ok(())
    }
}

/// Player Position And Look (serverbound)
/// Same opcode as the clientbound packet, but y precedes stance.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientPositionAndLook {
    pub x: f64,
    pub y: f64,
    pub stance: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Packet for ClientPositionAndLook {
    fn packet_id() -> u8 {
        POSITION_AND_LOOK_ID
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        Ok(Self {
            x: buffer.read_f64()?,
            y: buffer.read_f64()?,
            stance: buffer.read_f64()?,
            z: buffer.read_f64()?,
            yaw: buffer.read_f32()?,
            pitch: buffer.read_f32()?,
            on_ground: buffer.read_bool()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_f64(self.x)?;
        buffer.write_f64(self.y)?;
        buffer.write_f64(self.stance)?;
        buffer.write_f64(self.z)?;
        buffer.write_f32(self.yaw)?;
        buffer.write_f32(self.pitch)?;
        buffer.write_bool(self.on_ground);
        Ok(())
    }
}

impl From<&ServerPositionAndLook> for ClientPositionAndLook {
    /// The verbatim echo the server expects after correcting our position
    fn from(packet: &ServerPositionAndLook) -> Self {
        Self {
            x: packet.x,
            y: packet.y,
            stance: packet.stance,
            z: packet.z,
            yaw: packet.yaw,
            pitch: packet.pitch,
            on_ground: packet.on_ground,
        }
    }
}
