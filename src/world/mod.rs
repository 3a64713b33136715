pub mod block;
pub mod column;
pub mod location;
pub mod nibble;
pub mod store;

pub use block::{Block, BlockLookup};
pub use column::{Column, ColumnLayout};
pub use location::{ColumnPos, Location};
pub use store::{BulkColumnMeta, WorldStore};
