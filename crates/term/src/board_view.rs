//! BoardView: maps a board's draw list into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn as a six column well, two terminal columns per block. Row 0
//! (the newest) sits on the bottom line and older rows stack above it, so the field
//! visibly climbs as rows spawn. Rows that do not fit are clipped at the top.

use crate::core::{ColorSource, GameBoard};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, BlockDraw, LifecycleState, ROW_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Numbers shown next to the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudInfo {
    pub frame: u64,
    pub rows: usize,
    pub rows_spawned: u64,
    pub scroll_offset: i32,
    pub row_height: i32,
    pub matched: u64,
}

impl HudInfo {
    pub fn of<S: ColorSource>(board: &GameBoard<S>) -> Self {
        Self {
            frame: board.frame(),
            rows: board.row_count(),
            rows_spawned: board.rows_spawned(),
            scroll_offset: board.scroll_offset(),
            row_height: board.config().row_height(),
            matched: board.stats().matched,
        }
    }

    /// Progress toward the next spawn, 0..=100.
    pub fn rise_percent(&self) -> u32 {
        if self.row_height <= 1 {
            return 0;
        }
        let span = (self.row_height - 1) as u32;
        (self.scroll_offset.max(0) as u32 * 100 / span).min(100)
    }
}

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

pub struct BoardView {
    /// Block width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Number of board rows the well can show in `viewport`.
    pub fn visible_rows(&self, viewport: Viewport) -> usize {
        viewport.height.saturating_sub(2) as usize
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        draws: &[BlockDraw],
        hud: &HudInfo,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let well_w = ROW_WIDTH as u16 * self.cell_w;
        let frame_w = well_w + 2;
        let frame_h = viewport.height;
        if frame_h < 3 || viewport.width < frame_w {
            fb.put_str(0, 0, "terminal too small", CellStyle::default());
            return;
        }
        let well_h = frame_h - 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;

        let empty = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        for dy in 0..well_h {
            for col in 0..ROW_WIDTH as u16 {
                fb.put_char(start_x + 1 + col * self.cell_w, 1 + dy, '·', empty);
                for dx in 1..self.cell_w {
                    fb.put_char(start_x + 1 + col * self.cell_w + dx, 1 + dy, ' ', empty);
                }
            }
        }
        draw_border(fb, start_x, 0, frame_w, frame_h);

        let bottom = frame_h - 2;
        for draw in draws {
            if draw.pos.row >= well_h as usize {
                continue;
            }
            let line = bottom - draw.pos.row as u16;
            let x = start_x + 1 + draw.pos.column as u16 * self.cell_w;
            fb.fill_rect(x, line, self.cell_w, 1, '█', block_style(draw));
        }

        self.draw_side_panel(fb, hud, viewport, start_x + frame_w + 2);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, draws: &[BlockDraw], hud: &HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(draws, hud, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, hud: &HudInfo, viewport: Viewport, x: u16) {
        if x.saturating_add(12) > viewport.width {
            return;
        }
        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let entries = [
            ("FRAME", hud.frame.to_string()),
            ("ROWS", format!("{} / {}", hud.rows, hud.rows_spawned)),
            ("RISE", format!("{}%", hud.rise_percent())),
            ("MATCHED", hud.matched.to_string()),
        ];
        let mut y = 1;
        for (name, text) in entries {
            if y + 1 >= viewport.height {
                return;
            }
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &text, value);
            y += 3;
        }
        if y < viewport.height {
            fb.put_str(x, y, "q: quit", value.dim());
        }
    }
}

/// Display color of a block at full opacity.
pub fn palette(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Empty => WELL_BG,
        BlockColor::Red => Rgb::new(224, 108, 117),
        BlockColor::Pink => Rgb::new(198, 120, 221),
        BlockColor::Yellow => Rgb::new(229, 192, 123),
        BlockColor::Green => Rgb::new(152, 195, 121),
        BlockColor::Blue => Rgb::new(97, 175, 239),
    }
}

fn block_style(draw: &BlockDraw) -> CellStyle {
    let fg = palette(draw.color).over(WELL_BG, draw.tint.a);
    let style = CellStyle::new(fg, WELL_BG);
    match draw.state {
        LifecycleState::Idle => style.bold(),
        _ => style,
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
