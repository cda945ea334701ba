//! Move generation benchmark for profiling with cargo-flamegraph.
//!
//! Runs `legal_moves_into` and `check_endgame` repeatedly on positions taken
//! from the bundled variants and from a few scripted openings.
//!
//! Usage:
//!   cargo flamegraph --example movegen_bench -p tafl_core

use std::time::{Duration, Instant};

use tafl_core::{
    board::Board, check_endgame, config::VariantConfig, game::Game, movegen::legal_moves_into,
    types::Side, Move, Square,
};

const ITERATIONS: usize = 100_000;

fn mv(fr: u8, fc: u8, tr: u8, tc: u8) -> Move {
    Move::new(Square::new(fr, fc), Square::new(tr, tc))
}

/// Plays `moves` from the start of `config` and returns the game.
fn after(config: VariantConfig, moves: &[Move]) -> Game {
    let mut game = match Game::new(config) {
        Ok(g) => g,
        Err(e) => panic!("bad variant: {e}"),
    };
    for m in moves {
        if let Err(e) = game.play(*m) {
            panic!("scripted move {m} rejected: {e}");
        }
    }
    game
}

fn positions() -> Vec<(&'static str, Game)> {
    vec![
        ("Brandubh start", after(VariantConfig::brandubh(), &[])),
        (
            "Brandubh opened",
            after(
                VariantConfig::brandubh(),
                &[mv(1, 3, 1, 1), mv(2, 3, 2, 5), mv(3, 1, 2, 1)],
            ),
        ),
        ("Tablut start", after(VariantConfig::tablut(), &[])),
        (
            "Tablut opened",
            after(
                VariantConfig::tablut(),
                &[mv(0, 3, 2, 3), mv(2, 4, 2, 6), mv(4, 1, 1, 1)],
            ),
        ),
    ]
}

fn main() {
    println!("=== Move Generation Benchmark ===");
    println!("Iterations per position: {ITERATIONS}");
    println!();

    let mut move_buf = Vec::with_capacity(256);
    let mut total_moves = 0usize;
    let mut total_time = Duration::ZERO;
    let positions = positions();

    for (name, game) in &positions {
        let board: &Board = game.board();
        let side: Side = game.side_to_move();
        print!("{name:.<20}");

        let start = Instant::now();
        let mut moves_generated = 0usize;
        for _ in 0..ITERATIONS {
            legal_moves_into(board, side, &mut move_buf);
            moves_generated += move_buf.len();
        }
        let elapsed = start.elapsed();

        let endgame_start = Instant::now();
        for _ in 0..ITERATIONS / 10 {
            std::hint::black_box(check_endgame(
                board,
                game.history(),
                game.last_move(),
                side,
                game.turn(),
            ));
        }
        let endgame_elapsed = endgame_start.elapsed();

        total_moves += moves_generated;
        total_time += elapsed;

        let moves_per_pos = moves_generated as f64 / ITERATIONS as f64;
        let pps = if elapsed.as_secs_f64() > 0.0 {
            ITERATIONS as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        println!(
            " {moves_per_pos:>5.1} moves/pos, {pps:>10.0} pos/sec ({elapsed:>8.3?}), endgame {endgame_elapsed:>8.3?}"
        );
    }

    println!();
    println!("{:=<70}", "");
    let avg = if total_time.as_secs_f64() > 0.0 {
        (ITERATIONS * positions.len()) as f64 / total_time.as_secs_f64()
    } else {
        0.0
    };
    println!("TOTAL: {total_moves} moves in {total_time:.3?} ({avg:.0} positions/sec)");
}
