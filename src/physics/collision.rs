use crate::physics::config::UnloadedPolicy;
use crate::world::block::BlockLookup;
use glam::{DVec3, IVec3};

/// Player box with both corners floored to block cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl BoundingBox {
    /// Box for feet at `position`
    pub fn around(position: DVec3, apothem: f64, height: f64) -> Self {
        let min = DVec3::new(position.x - apothem, position.y, position.z - apothem);
        let max = DVec3::new(
            position.x + apothem,
            position.y + height,
            position.z + apothem,
        );
        Self {
            min: min.floor().as_ivec3(),
            max: max.floor().as_ivec3(),
        }
    }
}

/// Whether any physical block lies in the inclusive cell range `min..=max`
pub fn collision_in_range<L: BlockLookup>(
    world: &L,
    min: IVec3,
    max: IVec3,
    policy: UnloadedPolicy,
) -> bool {
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let blocking = match world.block_at_cell(IVec3::new(x, y, z)) {
                    Some(block) => block.is_physical(),
                    None => policy == UnloadedPolicy::Solid,
                };
                if blocking {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::Block;
    use std::collections::HashSet;

    struct Cells(HashSet<IVec3>);

    impl BlockLookup for Cells {
        fn block_at_cell(&self, cell: IVec3) -> Option<Block> {
            if cell.x > 100 {
                return None;
            }
            let type_id = if self.0.contains(&cell) { 1 } else { 0 };
            Some(Block {
                type_id,
                ..Block::default()
            })
        }
    }

    #[test]
    fn test_bounding_box_floors() {
        let bb = BoundingBox::around(DVec3::new(0.5, 64.001, -0.1), 0.32, 1.74);
        assert_eq!(bb.min, IVec3::new(0, 64, -1));
        assert_eq!(bb.max, IVec3::new(0, 65, 0));
    }

    #[test]
    fn test_range_hits_single_cell() {
        let world = Cells([IVec3::new(2, 3, 4)].into_iter().collect());
        let policy = UnloadedPolicy::Passable;
        assert!(collision_in_range(&world, IVec3::new(2, 0, 4), IVec3::new(2, 5, 4), policy));
        assert!(!collision_in_range(&world, IVec3::new(3, 0, 0), IVec3::new(3, 5, 9), policy));
    }

    #[test]
    fn test_unloaded_policy() {
        let world = Cells(HashSet::new());
        let cell = IVec3::new(200, 0, 0);
        assert!(!collision_in_range(&world, cell, cell, UnloadedPolicy::Passable));
        assert!(collision_in_range(&world, cell, cell, UnloadedPolicy::Solid));
    }
}
