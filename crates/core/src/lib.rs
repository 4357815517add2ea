//! Core rule engine - pure, deterministic, and testable
//!
//! This crate holds the rules of the panel-matching puzzle: a grid of colored
//! blocks that scrolls upward, spawns a new row at a fixed cadence, finds runs of
//! three or more equal colors in any row or column, and takes every matched block
//! through a timed removal sequence. It has no dependencies on rendering, input or
//! I/O; a frame driver feeds it elapsed time and reads back the draw state.
//!
//! # Module Structure
//!
//! - [`board`]: the scrolling grid, spawn cadence, dirty-flag driven match detection
//! - [`block`]: one cell and its `Idle -> Blinking -> Disappearing -> Removed` sequence
//! - [`row`]: six blocks side by side plus the row's dirty flag
//! - [`matcher`]: the run scanner shared by rows and columns
//! - [`timer`]: owned countdown timers with latched completions
//! - [`rng`]: color sources (seeded random, scripted)
//! - [`config`]: tunables and geometry with validation
//! - [`snapshot`]: serialisable board summaries and scan counters
//!
//! # Example
//!
//! ```
//! use panel_league_core::{BoardConfig, GameBoard, ScriptedColors};
//! use panel_league_core::types::{LifecycleState, BLINK_MS};
//!
//! let colors = ScriptedColors::parse("r r r b b g").unwrap();
//! let mut board = GameBoard::with_source(BoardConfig::default(), colors).unwrap();
//!
//! board.spawn_row();
//! board.update();
//! let row = board.row(0).unwrap();
//! assert_eq!(row.block(0).state(), LifecycleState::Blinking);
//! assert_eq!(row.block(3).state(), LifecycleState::Idle);
//!
//! // Once the blink timer runs out the matched blocks start fading.
//! board.tick(BLINK_MS);
//! assert_eq!(board.row(0).unwrap().block(0).state(), LifecycleState::Disappearing);
//! ```
//!
//! # Timing
//!
//! - **Frame**: call [`GameBoard::tick`] once per frame with the elapsed milliseconds
//!   (16ms at the default fixed timestep); it ticks the timers, then updates the board.
//! - **Spawn**: one row every `block_height - 1` frames (53 with the default geometry).
//! - **Blink**: 1000ms, timer driven.
//! - **Fade**: 5 opacity units per frame, 51 frames from opaque to removed.

pub mod block;
pub mod board;
pub mod config;
pub mod matcher;
pub mod rng;
pub mod row;
pub mod snapshot;
pub mod timer;

pub use panel_league_types as types;

// Re-export commonly used types for convenience
pub use block::Block;
pub use board::GameBoard;
pub use config::{BoardConfig, ConfigError, Geometry, SpawnPolicy};
pub use matcher::{find_runs, scan_runs};
pub use rng::{ColorSource, RandomColors, ScriptedColors, SimpleRng};
pub use row::Row;
pub use snapshot::{BoardSnapshot, RowSnapshot, ScanStats, StateCounts};
pub use timer::{TimerId, TimerRegistry, TimerState};
