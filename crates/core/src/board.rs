//! Board module - the scrolling grid and its per-frame orchestration
//!
//! Rows are kept newest-first in a `VecDeque`, so row index 0 is always the most
//! recently spawned row and a new row is a `push_front`. Columns are not stored:
//! column `c` is read on demand as `rows[i].block(c)` for every `i`, which keeps rows
//! and columns in lockstep by construction. Each column still has its own dirty flag.
//!
//! One call to [`GameBoard::update`]:
//!
//! 1. scrolls the board up by one unit
//! 2. spawns a row when the scroll offset reaches `row_height - 1` (and rewinds it)
//! 3. scans every dirty row and dirty column for runs, de-duplicates the hits and
//!    marks each hit block as matched
//! 4. updates every block (position + lifecycle)
//!
//! [`GameBoard::tick`] runs the board's timers first and then `update`, which is the
//! order a frame driver should use.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::block::Block;
use crate::config::{BoardConfig, ConfigError};
use crate::matcher::scan_runs;
use crate::rng::{ColorSource, RandomColors};
use crate::row::Row;
use crate::snapshot::{BoardSnapshot, RowSnapshot, ScanStats, StateCounts};
use crate::timer::TimerRegistry;
use crate::types::{BlockColor, BlockDraw, GridPos, ROW_WIDTH};

#[derive(Debug, Clone)]
pub struct GameBoard<S: ColorSource = RandomColors> {
    config: BoardConfig,
    /// Newest first.
    rows: VecDeque<Row>,
    column_dirty: [bool; ROW_WIDTH],
    scroll_offset: i32,
    timers: TimerRegistry,
    source: S,
    rows_spawned: u64,
    frame: u64,
    stats: ScanStats,
    /// Reused across frames by the column scan.
    column_colors: Vec<BlockColor>,
    column_hits: Vec<usize>,
    matched: Vec<GridPos>,
}

impl GameBoard<RandomColors> {
    /// Board with the default configuration and seeded random colors.
    pub fn new(seed: u32) -> Self {
        Self::from_parts(BoardConfig::default(), RandomColors::new(seed))
    }
}

impl<S: ColorSource> GameBoard<S> {
    /// Board with an explicit configuration and color source.
    pub fn with_source(config: BoardConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, source))
    }

    fn from_parts(config: BoardConfig, source: S) -> Self {
        Self {
            config,
            rows: VecDeque::new(),
            column_dirty: [true; ROW_WIDTH],
            scroll_offset: 0,
            timers: TimerRegistry::new(),
            source,
            rows_spawned: 0,
            frame: 0,
            stats: ScanStats::default(),
            column_colors: Vec::new(),
            column_hits: Vec::new(),
            matched: Vec::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows, newest first.
    pub fn rows(&self) -> &VecDeque<Row> {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Blocks of column `column`, newest row first.
    ///
    /// Panics if `column >= ROW_WIDTH`.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &Block> + '_ {
        assert!(column < ROW_WIDTH, "column {} out of range", column);
        self.rows.iter().map(move |row| row.block(column))
    }

    pub fn block(&self, pos: GridPos) -> Option<&Block> {
        if pos.column >= ROW_WIDTH {
            return None;
        }
        self.rows.get(pos.row).map(|row| row.block(pos.column))
    }

    pub fn column_dirty(&self, column: usize) -> bool {
        self.column_dirty[column]
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Number of `update` calls so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rows_spawned(&self) -> u64 {
        self.rows_spawned
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One full frame: count the timers down, then update the board.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.advance_timers(elapsed_ms);
        self.update();
    }

    /// Count every running timer down by `elapsed_ms`. Returns how many fired.
    pub fn advance_timers(&mut self, elapsed_ms: u32) -> usize {
        self.timers.tick(elapsed_ms)
    }

    /// Advance the board by one frame. See the module docs for the step order.
    pub fn update(&mut self) {
        self.frame += 1;

        self.scroll_offset += 1;
        if self.scroll_offset == self.config.row_height() - 1 {
            self.spawn_row();
            self.scroll_offset = 0;
        }

        self.detect_matches();

        let geometry = self.config.geometry;
        let fade_step = self.config.fade_step;
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.update(
                index,
                self.scroll_offset,
                &geometry,
                &mut self.timers,
                fade_step,
            );
        }
    }

    /// Insert a freshly colored row at the bottom (index 0) and dirty every column.
    ///
    /// Does not touch the scroll offset; `update` rewinds it when the cadence spawns.
    pub fn spawn_row(&mut self) {
        let policy = self.config.spawn;
        let mut colors = [BlockColor::Empty; ROW_WIDTH];
        for slot in colors.iter_mut() {
            *slot = self.source.next_color(policy);
        }

        let serial = self.rows_spawned;
        self.rows_spawned += 1;
        let row = Row::from_colors(colors, &mut self.timers, self.config.blink_ms, serial);
        self.rows.push_front(row);
        self.column_dirty = [true; ROW_WIDTH];

        log::trace!(
            "spawned row {} {:?} ({} rows)",
            serial,
            colors,
            self.rows.len()
        );
    }

    /// Scan dirty rows and columns and start the removal sequence of every hit.
    ///
    /// Returns the number of blocks newly marked as matched.
    fn detect_matches(&mut self) -> usize {
        self.matched.clear();
        let mut row_scans = 0u64;
        let mut column_scans = 0u64;

        let mut hits: ArrayVec<usize, ROW_WIDTH> = ArrayVec::new();
        for (index, row) in self.rows.iter_mut().enumerate() {
            if !row.dirty {
                continue;
            }
            hits.clear();
            scan_runs(&row.colors(), &mut hits);
            self.matched
                .extend(hits.iter().map(|&column| GridPos::new(index, column)));
            row.dirty = false;
            row_scans += 1;
        }

        for column in 0..ROW_WIDTH {
            if !self.column_dirty[column] {
                continue;
            }
            self.column_colors.clear();
            self.column_colors
                .extend(self.rows.iter().map(|row| row.block(column).color()));
            self.column_hits.clear();
            scan_runs(&self.column_colors, &mut self.column_hits);
            self.matched
                .extend(self.column_hits.iter().map(|&index| GridPos::new(index, column)));
            self.column_dirty[column] = false;
            column_scans += 1;
        }

        // The same block can be reached from its row and its column.
        self.matched.sort_unstable();
        self.matched.dedup();

        let mut newly_matched = 0;
        for i in 0..self.matched.len() {
            let pos = self.matched[i];
            debug_assert!(pos.row < self.rows.len(), "match {:?} outside the board", pos);
            if self.rows[pos.row]
                .block_mut(pos.column)
                .on_matched(&mut self.timers)
            {
                newly_matched += 1;
            }
        }

        self.stats.row_scans += row_scans;
        self.stats.column_scans += column_scans;
        self.stats.matched += newly_matched as u64;

        if row_scans + column_scans > 0 {
            log::trace!(
                "frame {}: scanned {} rows, {} columns",
                self.frame,
                row_scans,
                column_scans
            );
        }
        if newly_matched > 0 {
            log::debug!(
                "frame {}: {} blocks matched at {:?}",
                self.frame,
                newly_matched,
                self.matched
            );
        }
        newly_matched
    }

    /// Drop the oldest rows so at most `max_rows` remain, releasing their timers.
    ///
    /// The board itself never discards rows; this is for the caller's off-board
    /// policy. Returns how many rows were dropped.
    pub fn retain_rows(&mut self, max_rows: usize) -> usize {
        let mut dropped = 0;
        while self.rows.len() > max_rows {
            if let Some(row) = self.rows.pop_back() {
                row.release(&mut self.timers);
                dropped += 1;
            }
        }
        if dropped > 0 {
            self.column_dirty = [true; ROW_WIDTH];
            log::trace!("discarded {} rows, {} left", dropped, self.rows.len());
        }
        dropped
    }

    /// Collect the draw state of every block that is visible this frame.
    ///
    /// `out` is cleared first; reuse it across frames to avoid allocating.
    pub fn draw_into(&self, out: &mut Vec<BlockDraw>) {
        out.clear();
        for (index, row) in self.rows.iter().enumerate() {
            for (column, block) in row.blocks().iter().enumerate() {
                if !block.is_drawn() {
                    continue;
                }
                out.push(BlockDraw {
                    pos: GridPos::new(index, column),
                    color: block.color(),
                    state: block.state(),
                    point: block.point(),
                    tint: block.tint(),
                });
            }
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut counts = StateCounts::default();
        for block in self.rows.iter().flat_map(|row| row.blocks().iter()) {
            if !block.color().is_empty() {
                counts.add(block.state());
            }
        }
        BoardSnapshot {
            frame: self.frame,
            scroll_offset: self.scroll_offset,
            rows_spawned: self.rows_spawned,
            rows: self.rows.iter().map(RowSnapshot::from).collect(),
            counts,
            stats: self.stats,
        }
    }
}
