use crate::protocol::packet::{Packet, PacketBuffer};
use std::io;

/// Login Request (0x01), clientbound
#[derive(Debug, Clone, PartialEq)]
pub struct LoginPacket {
    pub entity_id: i32,
    pub level_type: String,
    pub game_mode: i8,
    pub dimension: i8,
    pub difficulty: i8,
    pub max_players: i8,
}

impl Packet for LoginPacket {
    fn packet_id() -> u8 {
        0x01
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        let entity_id = buffer.read_i32()?;
        let level_type = buffer.read_string()?;
        let game_mode = buffer.read_i8()?;
        let dimension = buffer.read_i8()?;
        let difficulty = buffer.read_i8()?;
        // unused
        buffer.read_i8()?;
        let max_players = buffer.read_i8()?;

        Ok(Self {
            entity_id,
            level_type,
            game_mode,
            dimension,
            difficulty,
            max_players,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_i32(self.entity_id)?;
        buffer.write_string(&self.level_type)?;
        buffer.write_i8(self.game_mode);
        buffer.write_i8(self.dimension);
        buffer.write_i8(self.difficulty);
        buffer.write_i8(0);
        buffer.write_i8(self.max_players);
        Ok(())
    }
}

/// Respawn (0x09), clientbound
#[derive(Debug, Clone, PartialEq)]
pub struct RespawnPacket {
    pub dimension: i32,
    pub difficulty: i8,
    pub game_mode: i8,
    pub world_height: i16,
    pub level_type: String,
}

impl Packet for RespawnPacket {
    fn packet_id() -> u8 {
        0x09
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        Ok(Self {
            dimension: buffer.read_i32()?,
            difficulty: buffer.read_i8()?,
            game_mode: buffer.read_i8()?,
            world_height: buffer.read_i16()?,
            level_type: buffer.read_string()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_i32(self.dimension)?;
        buffer.write_i8(self.difficulty);
        buffer.write_i8(self.game_mode);
        buffer.write_i16(self.world_height)?;
        buffer.write_string(&self.level_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_dimension_is_signed_byte() {
        let packet = LoginPacket {
            entity_id: 17,
            level_type: "default".to_string(),
            game_mode: 0,
            dimension: -1,
            difficulty: 1,
            max_players: 20,
        };
        let mut buffer = PacketBuffer::new();
        packet.write_to_buffer(&mut buffer).unwrap();
        // entity id, string length + 7 units, game mode, then dimension
        assert_eq!(buffer.buffer[4 + 2 + 14 + 1], 0xff);

        let mut read = PacketBuffer::from_bytes(buffer.buffer);
        assert_eq!(LoginPacket::read_from_buffer(&mut read).unwrap(), packet);
        assert_eq!(read.remaining(), 0);
    }

    #[test]
    fn test_respawn_layout() {
        let packet = RespawnPacket {
            dimension: 1,
            difficulty: 2,
            game_mode: 1,
            world_height: 256,
            level_type: "flat".to_string(),
        };
        let mut buffer = PacketBuffer::new();
        packet.write_to_buffer(&mut buffer).unwrap();
        assert_eq!(&buffer.buffer[..8], &[0, 0, 0, 1, 2, 1, 1, 0]);

        let mut read = PacketBuffer::from_bytes(buffer.buffer);
        assert_eq!(RespawnPacket::read_from_buffer(&mut read).unwrap(), packet);
    }
}
