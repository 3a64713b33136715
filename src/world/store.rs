use crate::error::{GliderError, Result};
use crate::event::{Event, EventQueue};
use crate::logger::{log, LogSeverity::*};
use crate::world::block::{Block, BlockLookup};
use crate::world::column::{Column, ColumnLayout};
use crate::world::location::{ColumnPos, Location};
use glam::{DVec3, IVec3};
use std::collections::HashMap;

/// Per-column header of a bulk load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkColumnMeta {
    pub cx: i32,
    pub cz: i32,
    pub section_mask: u16,
    pub add_mask: u16,
}

/// Every loaded column, keyed by chunk coordinates
#[derive(Debug, Default)]
pub struct WorldStore {
    columns: HashMap<ColumnPos, Column>,
    events: EventQueue,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads or replaces a column. An empty section mask unloads it instead.
    pub fn load_column(
        &mut self,
        cx: i32,
        cz: i32,
        layout: ColumnLayout,
        payload: &[u8],
    ) -> Result<()> {
        let pos = ColumnPos::new(cx, cz);
        if layout.section_mask == 0 {
            self.columns.remove(&pos);
            log(format!("Unloaded column ({}, {})", cx, cz), Debug);
            self.events.push(Event::ColumnUnloaded { cx, cz });
            return Ok(());
        }

        match self.columns.get_mut(&pos) {
            Some(column) => column.load(layout, payload)?,
            None => {
                let mut column = Column::new();
                column.load(layout, payload)?;
                self.columns.insert(pos, column);
            }
        }

        log(format!("Loaded column ({}, {})", cx, cz), Debug);
        self.events.push(Event::ColumnLoaded { cx, cz });
        Ok(())
    }

    /// Loads a run of full columns packed back to back in one payload
    pub fn load_bulk(
        &mut self,
        columns: &[BulkColumnMeta],
        sky_light: bool,
        payload: &[u8],
    ) -> Result<()> {
        let layouts: Vec<ColumnLayout> = columns
            .iter()
            .map(|meta| ColumnLayout {
                section_mask: meta.section_mask,
                add_mask: meta.add_mask,
                sky_light,
                full_column: true,
            })
            .collect();

        let total: usize = layouts.iter().map(ColumnLayout::payload_len).sum();
        if total != payload.len() {
            return Err(GliderError::DecodeError {
                consumed: total,
                length: payload.len(),
            });
        }

        let mut offset = 0;
        for (meta, layout) in columns.iter().zip(layouts) {
            let end = offset + layout.payload_len();
            self.load_column(meta.cx, meta.cz, layout, &payload[offset..end])?;
            offset = end;
        }
        Ok(())
    }

    pub fn apply_block_edit(&mut self, cell: IVec3, type_id: u16, metadata: u8) -> Result<()> {
        let location = Location::from_cell(cell);
        let section = location
            .section_index()
            .ok_or(GliderError::OutOfWorld { y: cell.y })?;
        let column =
            self.columns
                .get_mut(&location.column)
                .ok_or(GliderError::ColumnNotLoaded {
                    cx: location.column.x,
                    cz: location.column.z,
                })?;

        column.set_block(section, location.block_index, type_id, metadata);
        log(
            format!("Block {} set to {}:{}", cell, type_id, metadata),
            Debug,
        );
        self.events.push(Event::BlockUpdated(cell));
        Ok(())
    }

    pub fn reset(&mut self) {
        self.columns.clear();
    }

    pub fn column(&self, cx: i32, cz: i32) -> Option<&Column> {
        self.columns.get(&ColumnPos::new(cx, cz))
    }

    pub fn is_loaded(&self, cx: i32, cz: i32) -> bool {
        self.columns.contains_key(&ColumnPos::new(cx, cz))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The block containing `point`, or `None` if its column is not loaded
    pub fn block_at(&self, point: DVec3) -> Option<Block> {
        self.block_at_location(&Location::from_point(point))
    }

    fn block_at_location(&self, location: &Location) -> Option<Block> {
        self.columns
            .get(&location.column)
            .map(|column| column.block(location))
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain()
    }
}

impl BlockLookup for WorldStore {
    fn block_at_cell(&self, cell: IVec3) -> Option<Block> {
        self.block_at_location(&Location::from_cell(cell))
    }
}
