use crate::error::{GliderError, Result};
use crate::world::block::Block;
use crate::world::location::{Location, SECTION_COUNT};
use crate::world::nibble::{popcount16, read_nibble, write_nibble};

pub const BLOCK_TYPE_BYTES: usize = 4096;
pub const NIBBLE_BYTES: usize = 2048;
pub const BIOME_BYTES: usize = 256;

type SectionArrays = [Option<Vec<u8>>; SECTION_COUNT];

/// Which arrays a column payload carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub section_mask: u16,
    pub add_mask: u16,
    pub sky_light: bool,
    /// Biome ids follow the section data
    pub full_column: bool,
}

impl ColumnLayout {
    /// Exact byte length of a payload with this layout
    pub fn payload_len(&self) -> usize {
        let per_section =
            BLOCK_TYPE_BYTES + 2 * NIBBLE_BYTES + if self.sky_light { NIBBLE_BYTES } else { 0 };
        let biome = if self.full_column { BIOME_BYTES } else { 0 };

        per_section * popcount16(self.section_mask) as usize
            + NIBBLE_BYTES * popcount16(self.add_mask) as usize
            + biome
    }
}

/// Walks a payload left to right, handing out field slices
struct PayloadSlicer<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> PayloadSlicer<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset + len;
        let slice = self
            .payload
            .get(self.offset..end)
            .ok_or(GliderError::DecodeError {
                consumed: end,
                length: self.payload.len(),
            })?;
        self.offset = end;
        Ok(slice)
    }

    /// One array of `len` bytes for every section whose bit is set in `mask`
    fn take_sections(&mut self, mask: u16, len: usize) -> Result<SectionArrays> {
        let mut arrays = SectionArrays::default();
        for (y, array) in arrays.iter_mut().enumerate() {
            if mask & (1 << y) != 0 {
                *array = Some(self.take(len)?.to_vec());
            }
        }
        Ok(arrays)
    }

    fn finish(self) -> Result<()> {
        if self.offset != self.payload.len() {
            return Err(GliderError::DecodeError {
                consumed: self.offset,
                length: self.payload.len(),
            });
        }
        Ok(())
    }
}

/// One 16-wide, 16-deep stack of sections. Absent arrays read as zero.
#[derive(Debug, Clone, Default)]
pub struct Column {
    block_type: SectionArrays,
    metadata: SectionArrays,
    light: SectionArrays,
    sky_light: SectionArrays,
    add: SectionArrays,
    biome: Option<Vec<u8>>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the column's arrays with the ones in `payload`. Nothing changes on error.
    pub fn load(&mut self, layout: ColumnLayout, payload: &[u8]) -> Result<()> {
        let mut slicer = PayloadSlicer::new(payload);

        let block_type = slicer.take_sections(layout.section_mask, BLOCK_TYPE_BYTES)?;
        let metadata = slicer.take_sections(layout.section_mask, NIBBLE_BYTES)?;
        let light = slicer.take_sections(layout.section_mask, NIBBLE_BYTES)?;
        let sky_light = if layout.sky_light {
            Some(slicer.take_sections(layout.section_mask, NIBBLE_BYTES)?)
        } else {
            None
        };
        let add = slicer.take_sections(layout.add_mask, NIBBLE_BYTES)?;
        let biome = if layout.full_column {
            Some(slicer.take(BIOME_BYTES)?.to_vec())
        } else {
            None
        };
        slicer.finish()?;

        self.block_type = block_type;
        self.metadata = metadata;
        self.light = light;
        self.add = add;
        if let Some(sky_light) = sky_light {
            self.sky_light = sky_light;
        }
        if biome.is_some() {
            self.biome = biome;
        }
        Ok(())
    }

    pub fn has_biome(&self) -> bool {
        self.biome.is_some()
    }

    pub fn is_section_present(&self, section: usize) -> bool {
        self.block_type
            .get(section)
            .map_or(false, |array| array.is_some())
    }

    pub fn block(&self, location: &Location) -> Block {
        let biome_id = self
            .biome
            .as_ref()
            .map(|biome| biome[location.biome_index]);

        let Some(section) = location.section_index() else {
            return Block {
                biome_id,
                ..Block::default()
            };
        };

        let base = self.block_type[section]
            .as_ref()
            .map_or(0, |array| array[location.block_index]);
        let nib = |arrays: &SectionArrays| {
            arrays[section]
                .as_ref()
                .map_or(0, |array| read_nibble(array, location.block_index))
        };
        let add = nib(&self.add);

        Block {
            type_id: base as u16 | (add as u16) << 8,
            metadata: nib(&self.metadata),
            light: nib(&self.light),
            sky_light: nib(&self.sky_light),
            add,
            biome_id,
        }
    }

    /// Writes one cell, allocating zeroed arrays for a section that was all air
    pub fn set_block(&mut self, section: usize, block_index: usize, type_id: u16, metadata: u8) {
        let block_type = self.block_type[section].get_or_insert_with(|| vec![0; BLOCK_TYPE_BYTES]);
        block_type[block_index] = (type_id & 0xff) as u8;

        let metadata_array = self.metadata[section].get_or_insert_with(|| vec![0; NIBBLE_BYTES]);
        write_nibble(metadata_array, block_index, metadata);

        let high = ((type_id >> 8) & 0x0f) as u8;
        if high != 0 || self.add[section].is_some() {
            let add = self.add[section].get_or_insert_with(|| vec![0; NIBBLE_BYTES]);
            write_nibble(add, block_index, high);
        }
    }
}
