//! Barrel Climb headless runner
//!
//! There is no window here: an autopilot plays a fixed number of ticks,
//! restarting after every finished run, and the leaderboard is logged at the
//! end. Set `RUST_LOG=debug` to watch spawns and hits.

use barrel_climb::{HighScores, Tuning};
use barrel_climb::consts::FPS;
use barrel_climb::sim::{GameState, Rect, TickInput};

const DEMO_SEED: u64 = 0x0BA2_2E15;
/// Ten minutes of simulated play
const DEMO_TICKS: u64 = 10 * 60 * FPS as u64;

/// Horizontal distance at which an incoming barrel triggers a jump
const JUMP_RANGE: f32 = 70.0;

/// Pick an input for this tick: climb when possible, dodge barrels,
/// otherwise walk to the nearest ladder leading up (or toward the goal)
fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.rect();
    let mut input = TickInput::default();

    let incoming = state.barrels.iter().any(|barrel| {
        let b = barrel.rect();
        let dx = b.center_x() - player.center_x();
        (b.bottom() - player.bottom()).abs() < 12.0
            && dx.abs() < JUMP_RANGE
            && dx.signum() != f32::from(barrel.direction).signum()
    });
    if incoming && state.player.body.on_ground {
        input.jump = true;
        return input;
    }

    if state.player.on_ladder || at_ladder(state, player) {
        input.move_up = true;
        return input;
    }

    // Ladders whose foot is level with the player's feet lead upward
    let target_x = state
        .ladders()
        .iter()
        .filter(|l| (l.bottom() - player.bottom()).abs() < 2.0)
        .map(|l| l.center_x())
        .min_by(|a, b| {
            (a - player.center_x())
                .abs()
                .total_cmp(&(b - player.center_x()).abs())
        })
        .unwrap_or_else(|| state.goal().center_x());

    if target_x < player.center_x() - 2.0 {
        input.move_left = true;
    } else if target_x > player.center_x() + 2.0 {
        input.move_right = true;
    } else {
        input.jump = true;
    }
    input
}

fn at_ladder(state: &GameState, player: &Rect) -> bool {
    state
        .level
        .ladder_at(player, state.tuning.ladder_tolerance)
        .is_some_and(|ladder| player.bottom() > ladder.top() + 1.0)
}

fn main() {
    env_logger::init();
    log::info!("Barrel Climb (headless) starting, seed {}", DEMO_SEED);

    // The autopilot needs ladders that lead onto the row above
    let tuning = Tuning {
        climb_through_platforms: true,
        ..Default::default()
    };
    let mut state = GameState::with_tuning(DEMO_SEED, tuning);
    let mut scores = HighScores::new();
    let mut runs = 0u32;

    for _ in 0..DEMO_TICKS {
        let input = autopilot(&state);
        state.update(&input);

        if !state.is_running() {
            runs += 1;
            log::info!(
                "Run {} ended: {:?}, score {}, {} ticks",
                runs,
                state.phase(),
                state.score(),
                state.time_ticks()
            );
            scores.record(&state);
            state.update(&TickInput {
                restart: true,
                ..Default::default()
            });
        }
    }

    log::info!("Finished {} runs", runs);
    for (rank, entry) in scores.entries.iter().enumerate() {
        println!(
            "#{:<2} {:>6}  {:>6} ticks  {}",
            rank + 1,
            entry.score,
            entry.ticks,
            if entry.won { "won" } else { "lost" }
        );
    }
    if scores.is_empty() {
        println!("No finished runs with a score");
    }
}
