pub mod block_change;
pub mod chunk_data;
pub mod compression;
pub mod dimension;
pub mod inbound;
pub mod packet;
pub mod player_position_and_look;

pub use inbound::InboundPacket;
pub use packet::{encode_packet, send_packet, Packet, PacketBuffer};
pub use player_position_and_look::{ClientPositionAndLook, ServerPositionAndLook};
