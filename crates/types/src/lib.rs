//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data shared by the rule engine and whatever
//! presents it (terminal view, headless report, tests). Nothing in here knows
//! about timers, rows or the board; those live in `panel-league-core`.
//!
//! # Board Geometry
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROW_WIDTH` | 6 | Blocks per row (columns on the board) |
//! | `BLOCK_WIDTH` | 54 | Block width in screen units |
//! | `BLOCK_HEIGHT` | 54 | Block height in screen units; also the scroll distance per spawned row |
//! | `BOARD_X_ANCHOR` | 306 | Screen x of column 0 |
//! | `VIEWPORT_HEIGHT` | 720 | Screen height; row 0 sits on this baseline |
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BLINK_MS` | 1000 | Time a matched block blinks before it starts fading |
//! | `FADE_STEP` | 5 | Opacity removed per frame while disappearing |
//!
//! # Examples
//!
//! ```
//! use panel_league_types::{BlockColor, LifecycleState, ROW_WIDTH};
//!
//! let color = BlockColor::from_str("red").unwrap();
//! assert_eq!(color, BlockColor::Red);
//! assert!(!color.is_empty());
//!
//! assert!(LifecycleState::Idle < LifecycleState::Blinking);
//! assert_eq!(ROW_WIDTH, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Number of blocks in a row (and number of columns on the board)
pub const ROW_WIDTH: usize = 6;

/// Block width in screen units
pub const BLOCK_WIDTH: i32 = 54;

/// Block height in screen units
pub const BLOCK_HEIGHT: i32 = 54;

/// Screen x coordinate of the leftmost column
pub const BOARD_X_ANCHOR: i32 = 306;

/// Screen height; the newest row is drawn upward from this baseline
pub const VIEWPORT_HEIGHT: i32 = 720;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Blink phase duration of a matched block
pub const BLINK_MS: u32 = 1000;

/// Opacity decrement per frame while a block disappears
pub const FADE_STEP: u8 = 5;

/// Fully opaque
pub const ALPHA_MAX: u8 = 255;

/// Color of a block. `Empty` marks a hole: it never matches and is never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    #[default]
    Empty,
    Red,
    Pink,
    Yellow,
    Green,
    Blue,
}

impl BlockColor {
    /// Every drawable color, in discriminant order.
    pub const SOLID: [BlockColor; 5] = [
        BlockColor::Red,
        BlockColor::Pink,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Blue,
    ];

    /// Every color including `Empty`, in discriminant order.
    pub const ALL: [BlockColor; 6] = [
        BlockColor::Empty,
        BlockColor::Red,
        BlockColor::Pink,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Blue,
    ];

    pub fn is_empty(self) -> bool {
        self == BlockColor::Empty
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" | "-" => Some(BlockColor::Empty),
            "red" | "r" => Some(BlockColor::Red),
            "pink" | "p" => Some(BlockColor::Pink),
            "yellow" | "y" => Some(BlockColor::Yellow),
            "green" | "g" => Some(BlockColor::Green),
            "blue" | "b" => Some(BlockColor::Blue),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Empty => "empty",
            BlockColor::Red => "red",
            BlockColor::Pink => "pink",
            BlockColor::Yellow => "yellow",
            BlockColor::Green => "green",
            BlockColor::Blue => "blue",
        }
    }
}

/// Removal sequence of a block. Ordered: a block only ever moves forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Idle,
    Blinking,
    Disappearing,
    Removed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Blinking => "blinking",
            LifecycleState::Disappearing => "disappearing",
            LifecycleState::Removed => "removed",
        }
    }
}

/// Screen-space point (top-left of a block)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// RGBA tint applied on top of a block's textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::white(ALPHA_MAX);

    /// White with the given opacity.
    pub const fn white(alpha: u8) -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: alpha,
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

/// Grid coordinate: `row` 0 is the most recently spawned row, `column` 0 is leftmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Everything a renderer needs to draw one block this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDraw {
    pub pos: GridPos,
    pub color: BlockColor,
    pub state: LifecycleState,
    pub point: Point,
    pub tint: Tint,
}
