//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A shell may override any subset of
//! fields from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::level::{MIN_WORLD_HEIGHT, MIN_WORLD_WIDTH};

/// Every tunable the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Ticks per simulated second (drives survival scoring)
    pub fps: u32,

    // === Kinematics ===
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub move_speed: f32,
    pub jump_speed: f32,
    pub climb_speed: f32,
    pub ladder_tolerance: f32,
    /// Climbing players pass up through the underside of platforms
    /// (off by default: platforms always stop a rising head)
    pub climb_through_platforms: bool,

    // === Barrels ===
    pub barrel_speed: f32,
    pub barrel_spawn_every: u32,
    pub max_barrels: usize,
    pub barrel_drop_chance: f64,
    pub barrel_drop_speed: f32,
    pub barrel_remove_margin: f32,

    // === Session ===
    pub start_lives: u32,
    pub invuln_ticks: u32,
    pub survival_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            fps: FPS,

            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            move_speed: MOVE_SPEED,
            jump_speed: JUMP_SPEED,
            climb_speed: CLIMB_SPEED,
            ladder_tolerance: LADDER_TOLERANCE,
            climb_through_platforms: false,

            barrel_speed: BARREL_SPEED,
            barrel_spawn_every: BARREL_SPAWN_EVERY,
            max_barrels: MAX_BARRELS,
            barrel_drop_chance: BARREL_DROP_CHANCE,
            barrel_drop_speed: BARREL_DROP_SPEED,
            barrel_remove_margin: BARREL_REMOVE_MARGIN,

            start_lives: START_LIVES,
            invuln_ticks: INVULN_TICKS,
            survival_bonus: SURVIVAL_BONUS,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON and sanitize the result
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !self.world_width.is_finite() {
            log::warn!("Invalid world_width {}, using default", self.world_width);
            self.world_width = defaults.world_width;
        } else if self.world_width < MIN_WORLD_WIDTH {
            log::warn!(
                "world_width {} too small, using {}",
                self.world_width,
                MIN_WORLD_WIDTH
            );
            self.world_width = MIN_WORLD_WIDTH;
        }
        if !self.world_height.is_finite() {
            log::warn!("Invalid world_height {}, using default", self.world_height);
            self.world_height = defaults.world_height;
        } else if self.world_height < MIN_WORLD_HEIGHT {
            log::warn!(
                "world_height {} too small, using {}",
                self.world_height,
                MIN_WORLD_HEIGHT
            );
            self.world_height = MIN_WORLD_HEIGHT;
        }

        // Probability must stay in [0, 1] for Rng::random_bool
        self.barrel_drop_chance = if self.barrel_drop_chance.is_finite() {
            self.barrel_drop_chance.clamp(0.0, 1.0)
        } else {
            defaults.barrel_drop_chance
        };

        self.fps = self.fps.max(1);
        self.barrel_spawn_every = self.barrel_spawn_every.max(1);
        self.start_lives = self.start_lives.max(1);
        self.terminal_velocity = self.terminal_velocity.abs();
        self
    }
}
