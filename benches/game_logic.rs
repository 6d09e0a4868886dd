use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blocks::core::{Board, CycleOutcome, GameConfig, GameSession, GameSnapshot, ManualTime, PieceSequence, SimpleRng};
use tui_blocks::term::{FrameBuffer, GameView, Viewport};
use tui_blocks::types::{GameCommand, PieceKind, Rotation};

fn bench_frame(c: &mut Criterion) {
    let time = ManualTime::shared();
    let mut game = GameSession::new(GameConfig::default(), time.clone(), SimpleRng::new(12345));
    game.apply_command(GameCommand::Confirm);

    c.bench_function("game_frame_20ms", |b| {
        b.iter(|| {
            time.advance(black_box(20));
            if matches!(game.frame(), CycleOutcome::GameOver { .. }) {
                game.apply_command(GameCommand::Confirm);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for row in 18..22 {
                for col in 0..10 {
                    board.set(col, row, Some(PieceKind::I));
                }
            }
            black_box(board.check_lines());
        })
    });
}

fn bench_is_valid_and_empty(c: &mut Criterion) {
    let mut board = Board::new();
    for col in 0..9 {
        board.set(col, 21, Some(PieceKind::T));
    }

    c.bench_function("is_valid_and_empty", |b| {
        b.iter(|| {
            for rotation in Rotation::ALL {
                black_box(board.is_valid_and_empty(black_box(PieceKind::T), 4, 19, rotation));
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = GameSession::new(
        GameConfig::default(),
        ManualTime::shared(),
        PieceSequence::repeat(PieceKind::T),
    );
    game.apply_command(GameCommand::Confirm);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.rotate(black_box(true));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = GameSession::new(
        GameConfig::default(),
        ManualTime::shared(),
        PieceSequence::new(vec![PieceKind::L, PieceKind::S]),
    );
    game.apply_command(GameCommand::Confirm);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render_80x24", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            black_box(fb.cells().len());
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_line_clear,
    bench_is_valid_and_empty,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
