//! Row module - six blocks side by side
//!
//! Index 0 is the leftmost block. A row is born dirty so its first match scan
//! always happens; the board clears the flag after scanning.

use crate::block::Block;
use crate::config::Geometry;
use crate::timer::TimerRegistry;
use crate::types::{BlockColor, GridPos, ROW_WIDTH};

#[derive(Debug, Clone)]
pub struct Row {
    blocks: [Block; ROW_WIDTH],
    /// Set when a block changed since the last horizontal scan.
    pub dirty: bool,
    /// Spawn counter value when this row was created.
    serial: u64,
}

impl Row {
    pub fn new(blocks: [Block; ROW_WIDTH], serial: u64) -> Self {
        Self {
            blocks,
            dirty: true,
            serial,
        }
    }

    /// Build a row from six colors, creating a blink timer per block.
    pub fn from_colors(
        colors: [BlockColor; ROW_WIDTH],
        timers: &mut TimerRegistry,
        blink_ms: u32,
        serial: u64,
    ) -> Self {
        let blocks = colors.map(|color| Block::new(color, timers, blink_ms));
        Self::new(blocks, serial)
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn blocks(&self) -> &[Block; ROW_WIDTH] {
        &self.blocks
    }

    pub fn block(&self, column: usize) -> &Block {
        &self.blocks[column]
    }

    pub fn block_mut(&mut self, column: usize) -> &mut Block {
        &mut self.blocks[column]
    }

    pub fn colors(&self) -> [BlockColor; ROW_WIDTH] {
        let mut out = [BlockColor::Empty; ROW_WIDTH];
        for (slot, block) in out.iter_mut().zip(&self.blocks) {
            *slot = block.color();
        }
        out
    }

    /// Advance every block. `row_index` is this row's place on the board (0 = newest).
    pub fn update(
        &mut self,
        row_index: usize,
        scroll_offset: i32,
        geometry: &Geometry,
        timers: &mut TimerRegistry,
        fade_step: u8,
    ) {
        for (column, block) in self.blocks.iter_mut().enumerate() {
            let point = geometry.block_point(GridPos::new(row_index, column), scroll_offset);
            block.update(timers, point, fade_step);
        }
    }

    /// Hand every block's timer back to the registry.
    pub fn release(self, timers: &mut TimerRegistry) {
        for block in self.blocks {
            block.release(timers);
        }
    }
}
