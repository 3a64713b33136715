use crate::error::{GliderError, Result};
use crate::protocol::block_change::{BlockChangePacket, ExplosionPacket, MultiBlockChangePacket};
use crate::protocol::chunk_data::{MapChunkBulkPacket, MapChunkPacket};
use crate::protocol::dimension::{LoginPacket, RespawnPacket};
use crate::protocol::packet::{Packet, PacketBuffer};
use crate::protocol::player_position_and_look::ServerPositionAndLook;

/// Every clientbound message the session reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InboundPacket {
    Login(LoginPacket),
    Respawn(RespawnPacket),
    PositionAndLook(ServerPositionAndLook),
    MapChunk(MapChunkPacket),
    MultiBlockChange(MultiBlockChangePacket),
    BlockChange(BlockChangePacket),
    MapChunkBulk(MapChunkBulkPacket),
    Explosion(ExplosionPacket),
}

impl InboundPacket {
    /// Decodes one opcode-prefixed frame
    pub fn decode(frame: &[u8]) -> Result<Self> {
        let mut buffer = PacketBuffer::from_bytes(frame.to_vec());
        let packet_id = buffer.read_u8()?;

        let packet = match packet_id {
            0x01 => InboundPacket::Login(LoginPacket::read_from_buffer(&mut buffer)?),
            0x09 => InboundPacket::Respawn(RespawnPacket::read_from_buffer(&mut buffer)?),
            0x0D => InboundPacket::PositionAndLook(ServerPositionAndLook::read_from_buffer(
                &mut buffer,
            )?),
            0x33 => InboundPacket::MapChunk(MapChunkPacket::read_from_buffer(&mut buffer)?),
            0x34 => InboundPacket::MultiBlockChange(MultiBlockChangePacket::read_from_buffer(
                &mut buffer,
            )?),
            0x35 => InboundPacket::BlockChange(BlockChangePacket::read_from_buffer(&mut buffer)?),
            0x38 => {
                InboundPacket::MapChunkBulk(MapChunkBulkPacket::read_from_buffer(&mut buffer)?)
            }
            0x3C => InboundPacket::Explosion(ExplosionPacket::read_from_buffer(&mut buffer)?),
            _ => return Err(GliderError::UnknownPacket(packet_id)),
        };
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::encode_packet;
    use assert_matches::assert_matches;

    #[test]
    fn test_decode_dispatches_on_opcode() {
        let respawn = RespawnPacket {
            dimension: -1,
            difficulty: 0,
            game_mode: 0,
            world_height: 256,
            level_type: "default".to_string(),
        };
        let frame = encode_packet(&respawn).unwrap();
        assert_eq!(
            InboundPacket::decode(&frame).unwrap(),
            InboundPacket::Respawn(respawn)
        );

        let change = BlockChangePacket {
            x: 3,
            y: 70,
            z: -9,
            type_id: 1,
            metadata: 0,
        };
        let frame = encode_packet(&change).unwrap();
        assert_matches!(
            InboundPacket::decode(&frame),
            Ok(InboundPacket::BlockChange(BlockChangePacket { y: 70, .. }))
        );
    }

    #[test]
    fn test_unknown_opcode() {
        assert_matches!(
            InboundPacket::decode(&[0x36, 0, 0]),
            Err(GliderError::UnknownPacket(0x36))
        );
    }

    #[test]
    fn test_truncated_frame_is_io_error() {
        assert_matches!(InboundPacket::decode(&[]), Err(GliderError::IoError(_)));
        assert_matches!(
            InboundPacket::decode(&[0x35, 0, 0]),
            Err(GliderError::IoError(_))
        );
    }
}
