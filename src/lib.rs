//! Barrel Climb - a single-screen barrel-dodging platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory leaderboard of finished runs
//!
//! Rendering, windowing and input polling live outside this crate. A shell
//! feeds one [`sim::TickInput`] per frame into [`sim::tick`] and draws from
//! the read-only queries on [`sim::GameState`].

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate; one tick per rendered frame
    pub const FPS: u32 = 60;

    /// World dimensions (pixels, origin top-left, y down)
    pub const WORLD_WIDTH: f32 = 900.0;
    pub const WORLD_HEIGHT: f32 = 640.0;

    /// Per-tick accelerations and speeds (pixels/tick)
    pub const GRAVITY: f32 = 0.9;
    /// Terminal fall speed, kept below platform thickness so nothing tunnels
    pub const TERMINAL_VELOCITY: f32 = 15.0;
    pub const MOVE_SPEED: f32 = 4.0;
    pub const JUMP_SPEED: f32 = 16.0;
    pub const CLIMB_SPEED: f32 = 3.0;
    pub const BARREL_SPEED: f32 = 3.1;

    /// Horizontal slack when testing whether the player stands at a ladder
    pub const LADDER_TOLERANCE: f32 = 6.0;

    /// Player size and spawn point (top-left)
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;
    pub const PLAYER_SPAWN_X: f32 = 60.0;
    pub const PLAYER_SPAWN_Y: f32 = WORLD_HEIGHT - 120.0;

    /// Barrel size
    pub const BARREL_SIZE: f32 = 24.0;
    /// Ticks between barrel spawns (3 seconds)
    pub const BARREL_SPAWN_EVERY: u32 = 180;
    pub const MAX_BARRELS: usize = 12;
    /// Chance per tick that a landed barrel over a ladder drops
    pub const BARREL_DROP_CHANCE: f64 = 0.18;
    /// Downward kick given to a dropping barrel
    pub const BARREL_DROP_SPEED: f32 = 2.0;
    /// Distance below the floor before a barrel is discarded
    pub const BARREL_REMOVE_MARGIN: f32 = 40.0;

    /// Session rules
    pub const START_LIVES: u32 = 3;
    /// Invulnerability after a hit (1.5 seconds)
    pub const INVULN_TICKS: u32 = 90;
    /// Score added for every full second survived
    pub const SURVIVAL_BONUS: u64 = 100;
}
