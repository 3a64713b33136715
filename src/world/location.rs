use glam::{DVec3, IVec3};

pub const SECTION_WIDTH: i32 = 16;
pub const SECTION_COUNT: usize = 16;

/// Chunk coordinates of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Where an absolute block cell lives inside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub cell: IVec3,
    pub column: ColumnPos,
    /// Offset of the cell within its 16x16x16 section
    pub local: IVec3,
    /// May fall outside 0..16 for cells below or above the world
    pub section_y: i32,
    /// `x + 16 z + 256 y` within the section
    pub block_index: usize,
    /// `x + 16 z` within the column's biome array
    pub biome_index: usize,
}

impl Location {
    pub fn from_cell(cell: IVec3) -> Self {
        let local = IVec3::new(
            cell.x.rem_euclid(SECTION_WIDTH),
            cell.y.rem_euclid(SECTION_WIDTH),
            cell.z.rem_euclid(SECTION_WIDTH),
        );
        let column = ColumnPos::new(
            cell.x.div_euclid(SECTION_WIDTH),
            cell.z.div_euclid(SECTION_WIDTH),
        );
        let biome_index = (local.x + SECTION_WIDTH * local.z) as usize;

        Self {
            cell,
            column,
            local,
            section_y: cell.y.div_euclid(SECTION_WIDTH),
            block_index: biome_index + (SECTION_WIDTH * SECTION_WIDTH * local.y) as usize,
            biome_index,
        }
    }

    pub fn from_point(point: DVec3) -> Self {
        Self::from_cell(point.floor().as_ivec3())
    }

    /// Section slot holding the cell, if the cell is inside the world's height
    pub fn section_index(&self) -> Option<usize> {
        usize::try_from(self.section_y)
            .ok()
            .filter(|&section| section < SECTION_COUNT)
    }
}
