use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use panel_league::core::{BoardConfig, GameBoard, ScriptedColors};
use panel_league::types::{BlockDraw, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn board_frame_loop_does_not_allocate_once_warm() {
    // Identical rows: every spawn extends six column runs, so the loop keeps
    // matching, blinking, fading and recycling timers.
    let colors = ScriptedColors::parse("r g b y p g").unwrap();
    let mut board = GameBoard::with_source(BoardConfig::default(), colors).unwrap();
    let mut draws = Vec::new();

    let frame = |board: &mut GameBoard<ScriptedColors>, draws: &mut Vec<BlockDraw>| {
        board.tick(TICK_MS);
        board.retain_rows(8);
        board.draw_into(draws);
    };

    // Warm-up: fill the board and run the pattern through several periods so every
    // scratch buffer has reached its steady-state capacity.
    for _ in 0..2_000 {
        frame(&mut board, &mut draws);
    }
    assert_eq!(board.row_count(), 8);

    let allocs = with_alloc_counting(|| {
        for _ in 0..1_000 {
            frame(&mut board, &mut draws);
        }
    });

    assert_eq!(allocs, 0);
}
