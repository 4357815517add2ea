use criterion::{black_box, criterion_group, criterion_main, Criterion};
use panel_league::core::{find_runs, scan_runs, GameBoard};
use panel_league::term::{BoardView, FrameBuffer, HudInfo, Viewport};
use panel_league::types::{BlockColor, TICK_MS};

fn warm_board(seed: u32) -> GameBoard {
    let mut board = GameBoard::new(seed);
    for _ in 0..1_000 {
        board.tick(TICK_MS);
        board.retain_rows(12);
    }
    board
}

fn bench_tick(c: &mut Criterion) {
    let mut board = warm_board(12345);

    c.bench_function("board_tick_16ms", |b| {
        b.iter(|| {
            board.tick(black_box(TICK_MS));
            board.retain_rows(12);
        })
    });
}

fn bench_spawn_and_scan(c: &mut Criterion) {
    let mut board = warm_board(777);

    c.bench_function("spawn_row_then_update", |b| {
        b.iter(|| {
            board.spawn_row();
            board.update();
            board.retain_rows(12);
        })
    });
}

fn bench_scan_runs(c: &mut Criterion) {
    use BlockColor::*;
    let column = [Red, Red, Green, Green, Green, Blue, Blue, Blue, Blue, Red, Pink, Red];
    let mut hits = Vec::with_capacity(column.len());

    c.bench_function("scan_runs_12", |b| {
        b.iter(|| {
            hits.clear();
            scan_runs(black_box(&column), &mut hits);
        })
    });

    c.bench_function("find_runs_row", |b| {
        b.iter(|| find_runs(black_box(&[Yellow, Red, Red, Red, Blue, Yellow])))
    });
}

fn bench_render(c: &mut Criterion) {
    let board = warm_board(42);
    let view = BoardView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(80, 24);
    let mut draws = Vec::new();

    c.bench_function("render_board_80x24", |b| {
        b.iter(|| {
            board.draw_into(&mut draws);
            view.render_into(&draws, &HudInfo::of(&board), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_spawn_and_scan,
    bench_scan_runs,
    bench_render
);
criterion_main!(benches);
