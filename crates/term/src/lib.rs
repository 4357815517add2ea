//! Terminal presenter for the panel board.
//!
//! Renders a board's draw list into a simple framebuffer of styled cells and
//! flushes that to a terminal with crossterm. The board itself never sees any of
//! this: the view reads [`BlockDraw`](crate::types::BlockDraw) records and a few
//! counters, nothing else.
//!
//! - [`fb`]: framebuffer and cell styles
//! - [`board_view`]: pure mapping from draw list to framebuffer (unit tested)
//! - [`renderer`]: raw-mode terminal output with line diffing

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use panel_league_core as core;
pub use panel_league_types as types;

pub use board_view::{palette, BoardView, HudInfo, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_changed_lines_into, encode_full_into, TerminalRenderer};
