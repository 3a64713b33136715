use crate::protocol::packet::{Packet, PacketBuffer};
use crate::world::store::BulkColumnMeta;
use crate::world::ColumnLayout;
use bytes::Bytes;
use std::io;

/// Map Chunk (0x33)
/// One column, zlib-compressed. Sky light is always present on this packet.
#[derive(Debug, Clone, PartialEq)]
pub struct MapChunkPacket {
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// Biome data follows the sections
    pub full_column: bool,
    pub section_mask: u16,
    pub add_mask: u16,
    pub compressed: Bytes,
}

impl MapChunkPacket {
    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout {
            section_mask: self.section_mask,
            add_mask: self.add_mask,
            sky_light: true,
            full_column: self.full_column,
        }
    }
}

impl Packet for MapChunkPacket {
    fn packet_id() -> u8 {
        0x33
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        let chunk_x = buffer.read_i32()?;
        let chunk_z = buffer.read_i32()?;
        let full_column = buffer.read_bool()?;
        let section_mask = buffer.read_u16()?;
        let add_mask = buffer.read_u16()?;
        let compressed_length = buffer.read_length_i32()?;

        Ok(Self {
            chunk_x,
            chunk_z,
            full_column,
            section_mask,
            add_mask,
            compressed: buffer.read_bytes(compressed_length)?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_i32(self.chunk_x)?;
        buffer.write_i32(self.chunk_z)?;
        buffer.write_bool(self.full_column);
        buffer.write_u16(self.section_mask)?;
        buffer.write_u16(self.add_mask)?;
        buffer.write_i32(self.compressed.len() as i32)?;
        buffer.write_bytes_raw(&self.compressed);
        Ok(())
    }
}

/// Map Chunk Bulk (0x38)
/// Several full columns sharing one compressed payload. Column headers trail the data.
#[derive(Debug, Clone, PartialEq)]
pub struct MapChunkBulkPacket {
    pub sky_light: bool,
    pub compressed: Bytes,
    pub columns: Vec<BulkColumnMeta>,
}

impl Packet for MapChunkBulkPacket {
    fn packet_id() -> u8 {
        0x38
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        let column_count = buffer.read_i16()?;
        let compressed_length = buffer.read_length_i32()?;
        let sky_light = buffer.read_bool()?;
        let compressed = buffer.read_bytes(compressed_length)?;

        let column_count = usize::try_from(column_count).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Negative column count: {}", column_count),
            )
        })?;
        let mut columns = Vec::with_capacity(column_count);
        for _ in 0..column_count {
            columns.push(BulkColumnMeta {
                cx: buffer.read_i32()?,
                cz: buffer.read_i32()?,
                section_mask: buffer.read_u16()?,
                add_mask: buffer.read_u16()?,
            });
        }

        Ok(Self {
            sky_light,
            compressed,
            columns,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_i16(self.columns.len() as i16)?;
        buffer.write_i32(self.compressed.len() as i32)?;
        buffer.write_bool(self.sky_light);
        buffer.write_bytes_raw(&self.compressed);
        for column in &self.columns {
            buffer.write_i32(column.cx)?;
            buffer.write_i32(column.cz)?;
            buffer.write_u16(column.section_mask)?;
            buffer.write_u16(column.add_mask)?;
        }
        Ok(())
    }
}
