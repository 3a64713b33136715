#![allow(dead_code)]

use bytes::Bytes;
use glider::protocol::chunk_data::MapChunkPacket;
use glider::protocol::compression::deflate;
use glider::protocol::{InboundPacket, ServerPositionAndLook};
use glider::world::ColumnLayout;

pub const TYPE_BYTES: usize = 4096;
pub const NIBBLE_BYTES: usize = 2048;

/// Deterministic filler so every byte of a payload differs from its neighbours
pub fn pattern_byte(offset: usize) -> u8 {
    ((offset as u32).wrapping_mul(2_654_435_761) >> 24) as u8
}

/// A full-column payload built by hand, with the expected value of every field
pub struct SyntheticColumn {
    pub layout: ColumnLayout,
    pub payload: Vec<u8>,
}

impl SyntheticColumn {
    pub fn patterned(section_mask: u16, add_mask: u16) -> Self {
        let layout = ColumnLayout {
            section_mask,
            add_mask,
            sky_light: true,
            full_column: true,
        };
        let payload = (0..layout.payload_len()).map(pattern_byte).collect();
        Self { layout, payload }
    }

    /// Section 0 solid stone, nothing else
    pub fn stone_floor() -> Self {
        let layout = ColumnLayout {
            section_mask: 0b1,
            add_mask: 0,
            sky_light: true,
            full_column: true,
        };
        let mut payload = vec![0u8; layout.payload_len()];
        payload[..TYPE_BYTES].fill(1);
        Self { layout, payload }
    }

    fn sections(&self) -> usize {
        self.layout.section_mask.count_ones() as usize
    }

    fn rank(mask: u16, section: usize) -> usize {
        (mask & ((1u16 << section) - 1)).count_ones() as usize
    }

    fn nibble(&self, offset: usize, index: usize) -> u8 {
        let byte = self.payload[offset + index / 2];
        if index % 2 == 1 {
            byte & 0x0f
        } else {
            byte >> 4
        }
    }

    pub fn expected_type(&self, section: usize, index: usize) -> u16 {
        let rank = Self::rank(self.layout.section_mask, section);
        let base = self.payload[rank * TYPE_BYTES + index] as u16;
        base | (self.expected_add(section, index) as u16) << 8
    }

    pub fn expected_metadata(&self, section: usize, index: usize) -> u8 {
        let rank = Self::rank(self.layout.section_mask, section);
        self.nibble(self.sections() * TYPE_BYTES + rank * NIBBLE_BYTES, index)
    }

    pub fn expected_light(&self, section: usize, index: usize) -> u8 {
        let rank = Self::rank(self.layout.section_mask, section);
        let n = self.sections();
        self.nibble(n * TYPE_BYTES + (n + rank) * NIBBLE_BYTES, index)
    }

    pub fn expected_sky_light(&self, section: usize, index: usize) -> u8 {
        let rank = Self::rank(self.layout.section_mask, section);
        let n = self.sections();
        self.nibble(n * TYPE_BYTES + (2 * n + rank) * NIBBLE_BYTES, index)
    }

    pub fn expected_add(&self, section: usize, index: usize) -> u8 {
        if self.layout.add_mask & (1 << section) == 0 {
            return 0;
        }
        let rank = Self::rank(self.layout.add_mask, section);
        let n = self.sections();
        self.nibble(n * TYPE_BYTES + (3 * n + rank) * NIBBLE_BYTES, index)
    }

    pub fn expected_biome(&self, lx: usize, lz: usize) -> u8 {
        let n = self.sections();
        let adds = self.layout.add_mask.count_ones() as usize;
        self.payload[n * TYPE_BYTES + (3 * n + adds) * NIBBLE_BYTES + lx + 16 * lz]
    }

    pub fn map_chunk_packet(&self, cx: i32, cz: i32) -> MapChunkPacket {
        MapChunkPacket {
            chunk_x: cx,
            chunk_z: cz,
            full_column: self.layout.full_column,
            section_mask: self.layout.section_mask,
            add_mask: self.layout.add_mask,
            compressed: Bytes::from(deflate(&self.payload).expect("deflate")),
        }
    }

    pub fn map_chunk(&self, cx: i32, cz: i32) -> InboundPacket {
        InboundPacket::MapChunk(self.map_chunk_packet(cx, cz))
    }
}

pub fn spawn_position(x: f64, y: f64, z: f64) -> ServerPositionAndLook {
    ServerPositionAndLook {
        x,
        stance: y + 1.62,
        y,
        z,
        yaw: 0.0,
        pitch: 0.0,
        on_ground: true,
    }
}
