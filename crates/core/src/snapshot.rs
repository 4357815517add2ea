use serde::Serialize;

use crate::row::Row;
use crate::types::{BlockColor, LifecycleState, ROW_WIDTH};

/// Running counters of the match detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanStats {
    /// Horizontal scans performed (one per dirty row per frame).
    pub row_scans: u64,
    /// Vertical scans performed (one per dirty column per frame).
    pub column_scans: u64,
    /// Blocks that entered the blink phase.
    pub matched: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSnapshot {
    pub serial: u64,
    pub colors: [BlockColor; ROW_WIDTH],
    pub states: [LifecycleState; ROW_WIDTH],
}

impl From<&Row> for RowSnapshot {
    fn from(row: &Row) -> Self {
        let mut states = [LifecycleState::Idle; ROW_WIDTH];
        for (slot, block) in states.iter_mut().zip(row.blocks()) {
            *slot = block.state();
        }
        Self {
            serial: row.serial(),
            colors: row.colors(),
            states,
        }
    }
}

/// Number of non-empty blocks in each lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StateCounts {
    pub idle: u32,
    pub blinking: u32,
    pub disappearing: u32,
    pub removed: u32,
}

impl StateCounts {
    pub fn add(&mut self, state: LifecycleState) {
        match state {
            LifecycleState::Idle => self.idle += 1,
            LifecycleState::Blinking => self.blinking += 1,
            LifecycleState::Disappearing => self.disappearing += 1,
            LifecycleState::Removed => self.removed += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.idle + self.blinking + self.disappearing + self.removed
    }
}

/// Point-in-time summary of a board, newest row first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub frame: u64,
    pub scroll_offset: i32,
    pub rows_spawned: u64,
    pub rows: Vec<RowSnapshot>,
    pub counts: StateCounts,
    pub stats: ScanStats,
}

impl BoardSnapshot {
    /// True once every matched block has finished its removal sequence.
    pub fn is_settled(&self) -> bool {
        self.counts.blinking == 0 && self.counts.disappearing == 0
    }
}
