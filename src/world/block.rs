use glam::IVec3;

/// Legacy ids a player walks through: air, plants, liquids, rails, torches,
/// redstone dust, signs, ladders, portals, buttons and plates.
const PASSABLE_IDS: &[u16] = &[
    0, 6, 8, 9, 10, 11, 27, 28, 30, 31, 32, 37, 38, 39, 40, 50, 51, 55, 59, 63, 65, 66, 68, 69,
    70, 72, 75, 76, 77, 78, 83, 90, 104, 105, 106, 115, 119, 131, 132, 141, 142, 143, 147, 148,
    157,
];

/// A point-in-time view of one cell, composed from the column's arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Block {
    /// Base id with the add nibble in bits 8..12
    pub type_id: u16,
    pub metadata: u8,
    pub light: u8,
    pub sky_light: u8,
    pub add: u8,
    /// `None` when the column arrived without biome data
    pub biome_id: Option<u8>,
}

impl Block {
    pub fn is_air(&self) -> bool {
        self.type_id == 0
    }

    /// Whether the block stops player movement
    pub fn is_physical(&self) -> bool {
        !PASSABLE_IDS.contains(&self.type_id)
    }
}

/// The read path physics takes into the world
pub trait BlockLookup {
    /// `None` when the owning column is not loaded
    fn block_at_cell(&self, cell: IVec3) -> Option<Block>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(type_id: u16) -> Block {
        Block {
            type_id,
            ..Block::default()
        }
    }

    #[test]
    fn test_physical_blocks() {
        assert!(!block(0).is_physical());
        assert!(block(1).is_physical());
        assert!(block(2).is_physical());
        assert!(!block(9).is_physical());
        assert!(!block(50).is_physical());
        assert!(block(256 + 1).is_physical());
    }

    #[test]
    fn test_air() {
        assert!(Block::default().is_air());
        assert!(!block(4).is_air());
    }
}
