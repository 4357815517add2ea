//! Panel board runner (default binary).
//!
//! Drives a board at a fixed 16ms timestep. By default it draws into the terminal
//! with the framebuffer renderer; `--headless` skips the terminal and prints board
//! snapshots as JSON lines instead.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};

use panel_league::core::{
    BoardConfig, ColorSource, GameBoard, Geometry, RandomColors, ScriptedColors, SpawnPolicy,
};
use panel_league::term::{BoardView, FrameBuffer, HudInfo, TerminalRenderer, Viewport};
use panel_league::types::{BlockDraw, BLINK_MS, BLOCK_HEIGHT, FADE_STEP, TICK_MS};

/// Frames simulated by `--headless` when `--frames` is not given.
const DEFAULT_HEADLESS_FRAMES: u64 = 600;

/// Rising panel board: rows spawn from the bottom, runs of three clear.
#[derive(Debug, Parser)]
#[command(name = "panel-league", version)]
pub struct Args {
    /// Seed for the row color generator.
    #[arg(short, long, default_value_t = 1)]
    pub seed: u32,

    /// Allow empty slots in spawned rows.
    #[arg(long)]
    pub sparse: bool,

    /// Spawn colors from a fixed, repeating script instead of the generator,
    /// e.g. "r r r b b g" (r/p/y/g/b, `-` for empty).
    #[arg(long, value_name = "SCRIPT")]
    pub colors: Option<String>,

    /// Print JSON snapshots to stdout instead of drawing to the terminal.
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Headless mode: print a snapshot every N frames.
    #[arg(long, default_value_t = 60, value_name = "N")]
    pub report_every: u64,

    /// How long a matched block blinks before it fades.
    #[arg(long, default_value_t = BLINK_MS, value_name = "MS")]
    pub blink_ms: u32,

    /// Opacity lost per frame while a block fades.
    #[arg(long, default_value_t = FADE_STEP, value_name = "N")]
    pub fade_step: u8,

    /// Block height in screen units; a row spawns every `height - 1` frames.
    #[arg(long, default_value_t = BLOCK_HEIGHT, value_name = "UNITS")]
    pub block_height: i32,
}

impl Args {
    fn board_config(&self) -> BoardConfig {
        let spawn = if self.sparse {
            SpawnPolicy::Sparse
        } else {
            SpawnPolicy::Full
        };
        let geometry = Geometry {
            block_height: self.block_height,
            ..Geometry::default()
        };
        BoardConfig {
            blink_ms: self.blink_ms,
            fade_step: self.fade_step,
            ..BoardConfig::default()
        }
        .with_spawn(spawn)
        .with_geometry(geometry)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.board_config();
    if let Err(err) = config.validate() {
        warn!("rejected configuration: {}", err);
        return Err(err.into());
    }

    match &args.colors {
        Some(script) => {
            let Some(colors) = ScriptedColors::parse(script) else {
                warn!("rejected color script: {:?}", script);
                anyhow::bail!("unknown color in script {:?}", script);
            };
            info!("scripted colors ({} entries)", colors.len());
            run(GameBoard::with_source(config, colors)?, &args)
        }
        None => {
            info!("random colors, seed {}", args.seed);
            run(GameBoard::with_source(config, RandomColors::new(args.seed))?, &args)
        }
    }
}

fn run<S: ColorSource>(mut board: GameBoard<S>, args: &Args) -> Result<()> {
    if args.headless {
        let frames = args.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
        let stdout = io::stdout();
        return run_headless(&mut board, frames, args.report_every, &mut stdout.lock());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run_terminal(&mut term, &mut board, args.frames);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Simulate `frames` frames and write a snapshot line every `report_every` frames,
/// plus one for the final frame.
fn run_headless<S: ColorSource, W: Write>(
    board: &mut GameBoard<S>,
    frames: u64,
    report_every: u64,
    out: W,
) -> Result<()> {
    let mut out = BufWriter::new(out);
    let report_every = report_every.max(1);

    for frame in 1..=frames {
        board.tick(TICK_MS);
        if frame % report_every == 0 || frame == frames {
            serde_json::to_writer(&mut out, &board.snapshot())?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    let stats = board.stats();
    info!(
        "headless run done: {} frames, {} rows spawned, {} blocks matched",
        board.frame(),
        board.rows_spawned(),
        stats.matched
    );
    Ok(())
}

fn run_terminal<S: ColorSource>(
    term: &mut TerminalRenderer,
    board: &mut GameBoard<S>,
    frames: Option<u64>,
) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut draws: Vec<BlockDraw> = Vec::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        if frames.is_some_and(|limit| board.frame() >= limit) {
            return Ok(());
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        board.draw_into(&mut draws);
        view.render_into(&draws, &HudInfo::of(board), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            board.tick(TICK_MS);

            let dropped = board.retain_rows(view.visible_rows(viewport));
            if dropped > 0 {
                log::trace!("dropped {} rows above the viewport", dropped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("panel-league").chain(extra.iter().copied()))
    }

    #[test]
    fn defaults_build_a_valid_config() {
        let config = args(&[]).board_config();
        assert_eq!(config, BoardConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn flags_reach_the_config() {
        let config = args(&[
            "--sparse",
            "--blink-ms",
            "500",
            "--block-height",
            "10",
        ])
        .board_config();
        assert_eq!(config.spawn, SpawnPolicy::Sparse);
        assert_eq!(config.blink_ms, 500);
        assert_eq!(config.row_height(), 10);
    }

    #[test]
    fn bad_flags_fail_validation() {
        assert!(args(&["--block-height", "1"]).board_config().validate().is_err());
        assert!(args(&["--fade-step", "0"]).board_config().validate().is_err());
    }

    #[test]
    fn headless_prints_one_line_per_report() {
        let mut board = GameBoard::new(7);
        let mut out = Vec::new();
        run_headless(&mut board, 130, 60, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        // Frames 60, 120 and the final frame 130.
        assert_eq!(lines.len(), 3);
        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["frame"], 130);
        assert_eq!(last["rows_spawned"], 2);
    }
}
