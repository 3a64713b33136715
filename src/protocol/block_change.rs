use crate::protocol::packet::{Packet, PacketBuffer};
use glam::{DVec3, IVec3};
use std::io;

/// One decoded block edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    pub cell: IVec3,
    pub type_id: u16,
    pub metadata: u8,
}

/// Multi Block Change (0x34)
/// Records pack, from the low bits up: metadata (4), type (12), y (8), local z (4), local x (4)
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBlockChangePacket {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub records: Vec<u32>,
}

impl MultiBlockChangePacket {
    pub fn pack_record(local_x: u8, local_z: u8, y: u8, type_id: u16, metadata: u8) -> u32 {
        ((local_x as u32 & 0xf) << 28)
            | ((local_z as u32 & 0xf) << 24)
            | ((y as u32) << 16)
            | ((type_id as u32 & 0xfff) << 4)
            | (metadata as u32 & 0xf)
    }

    /// Absolute edits, in record order. `chunk_x`/`chunk_z` are added to the local offsets
    /// as they arrive; records whose cell would leave the i32 range are dropped.
    pub fn edits(&self) -> impl Iterator<Item = BlockEdit> + '_ {
        self.records.iter().filter_map(move |&record| {
            let x = self.chunk_x.checked_add(((record >> 28) & 0xf) as i32)?;
            let z = self.chunk_z.checked_add(((record >> 24) & 0xf) as i32)?;
            Some(BlockEdit {
                cell: IVec3::new(x, ((record >> 16) & 0xff) as i32, z),
                type_id: ((record >> 4) & 0xfff) as u16,
                metadata: (record & 0xf) as u8,
            })
        })
    }
}

impl Packet for MultiBlockChangePacket {
    fn packet_id() -> u8 {
        0x34
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        let chunk_x = buffer.read_i32()?;
        let chunk_z = buffer.read_i32()?;
        let record_count = buffer.read_i16()?;
        let data_length = buffer.read_length_i32()?;

        let record_count = usize::try_from(record_count).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Negative record count: {}", record_count),
            )
        })?;
        if data_length != record_count * 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} records need {} bytes, packet declares {}",
                    record_count,
                    record_count * 4,
                    data_length
                ),
            ));
        }

        let mut records = Vec::with_capacity(record_count);
        for _ in 0..record_count {
            records.push(buffer.read_u32()?);
        }

        Ok(Self {
            chunk_x,
            chunk_z,
            records,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        let record_count = i16::try_from(self.records.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "Too many block records")
        })?;
        buffer.write_i32(self.chunk_x)?;
        buffer.write_i32(self.chunk_z)?;
        buffer.write_i16(record_count)?;
        buffer.write_i32(record_count as i32 * 4)?;
        for record in &self.records {
            buffer.write_u32(*record)?;
        }
        Ok(())
    }
}

/// Block Change (0x35)
#[derive(Debug, Clone, PartialEq)]
pub struct BlockChangePacket {
    pub x: i32,
    pub y: u8,
    pub z: i32,
    pub type_id: u16,
    pub metadata: u8,
}

impl BlockChangePacket {
    pub fn edit(&self) -> BlockEdit {
        BlockEdit {
            cell: IVec3::new(self.x, self.y as i32, self.z),
            type_id: self.type_id,
            metadata: self.metadata,
        }
    }
}

impl Packet for BlockChangePacket {
    fn packet_id() -> u8 {
        0x35
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        Ok(Self {
            x: buffer.read_i32()?,
            y: buffer.read_u8()?,
            z: buffer.read_i32()?,
            type_id: buffer.read_u16()?,
            metadata: buffer.read_u8()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_i32(self.x)?;
        buffer.write_u8(self.y);
        buffer.write_i32(self.z)?;
        buffer.write_u16(self.type_id)?;
        buffer.write_u8(self.metadata);
        Ok(())
    }
}

/// Explosion (0x3C)
/// Each record is a signed offset from the centre; the cells it covers are destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionPacket {
    pub center: DVec3,
    pub radius: f32,
    pub records: Vec<[i8; 3]>,
    pub player_motion: [f32; 3],
}

impl ExplosionPacket {
    pub fn affected_cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.records.iter().map(move |offset| {
            let point = self.center
                + DVec3::new(offset[0] as f64, offset[1] as f64, offset[2] as f64);
            point.floor().as_ivec3()
        })
    }
}

impl Packet for ExplosionPacket {
    fn packet_id() -> u8 {
        0x3C
    }

    fn read_from_buffer(buffer: &mut PacketBuffer) -> io::Result<Self> {
        let center = DVec3::new(buffer.read_f64()?, buffer.read_f64()?, buffer.read_f64()?);
        let radius = buffer.read_f32()?;
        let record_count = buffer.read_length_i32()?;
        if record_count * 3 > buffer.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Explosion declares {} records", record_count),
            ));
        }

        let mut records = Vec::with_capacity(record_count);
        for _ in 0..record_count {
            records.push([buffer.read_i8()?, buffer.read_i8()?, buffer.read_i8()?]);
        }
        let player_motion = [buffer.read_f32()?, buffer.read_f32()?, buffer.read_f32()?];

        Ok(Self {
            center,
            radius,
            records,
            player_motion,
        })
    }

    fn write_to_buffer(&self, buffer: &mut PacketBuffer) -> io::Result<()> {
        buffer.write_f64(self.center.x)?;
        buffer.write_f64(self.center.y)?;
        buffer.write_f64(self.center.z)?;
        buffer.write_f32(self.radius)?;
        buffer.write_i32(self.records.len() as i32)?;
        for record in &self.records {
            for offset in record {
                buffer.write_i8(*offset);
            }
        }
        for motion in self.player_motion {
            buffer.write_f32(motion)?;
        }
        Ok(())
    }
}
