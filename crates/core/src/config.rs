//! Board configuration
//!
//! Defaults come straight from the constants in `panel-league-types`; a front end
//! only needs to override what it changes and call [`BoardConfig::validate`].

use thiserror::Error;

use crate::types::{
    GridPos, Point, ALPHA_MAX, BLINK_MS, BLOCK_HEIGHT, BLOCK_WIDTH, BOARD_X_ANCHOR, FADE_STEP,
    VIEWPORT_HEIGHT,
};

/// Which colors a spawned row may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnPolicy {
    /// Every slot gets a solid color.
    #[default]
    Full,
    /// Slots may also be left empty.
    Sparse,
}

/// Screen-space layout of the board (already scaled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub block_width: i32,
    pub block_height: i32,
    /// Screen x of column 0.
    pub x_anchor: i32,
    /// Baseline the newest row is drawn up from.
    pub viewport_height: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            x_anchor: BOARD_X_ANCHOR,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

impl Geometry {
    /// Screen-space top-left of the block at `pos`, with the board scrolled up by
    /// `scroll_offset` units.
    pub fn block_point(&self, pos: GridPos, scroll_offset: i32) -> Point {
        Point::new(
            self.x_anchor + self.block_width * pos.column as i32,
            self.viewport_height - scroll_offset - self.block_height * pos.row as i32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub geometry: Geometry,
    pub blink_ms: u32,
    pub fade_step: u8,
    pub spawn: SpawnPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            blink_ms: BLINK_MS,
            fade_step: FADE_STEP,
            spawn: SpawnPolicy::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("block height must be at least 2 units, got {0}")]
    BlockHeight(i32),
    #[error("block width must be positive, got {0}")]
    BlockWidth(i32),
    #[error("blink duration must be positive")]
    BlinkDuration,
    #[error("fade step must be in 1..={max}, got {0}", max = ALPHA_MAX)]
    FadeStep(u8),
}

impl BoardConfig {
    pub fn with_spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Scroll units between two spawned rows.
    ///
    /// A row spawns when the scroll offset reaches `row_height() - 1`.
    pub fn row_height(&self) -> i32 {
        self.geometry.block_height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // The cadence resets at row_height - 1, which has to be reachable from 1.
        if self.geometry.block_height < 2 {
            return Err(ConfigError::BlockHeight(self.geometry.block_height));
        }
        if self.geometry.block_width <= 0 {
            return Err(ConfigError::BlockWidth(self.geometry.block_width));
        }
        if self.blink_ms == 0 {
            return Err(ConfigError::BlinkDuration);
        }
        if self.fade_step == 0 {
            return Err(ConfigError::FadeStep(self.fade_step));
        }
        Ok(())
    }

    /// Frames a disappearing block takes to fade from fully opaque to removed.
    pub fn fade_frames(&self) -> u32 {
        let step = u32::from(self.fade_step.max(1));
        u32::from(ALPHA_MAX).div_ceil(step)
    }
}
