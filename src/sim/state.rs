//! Game session state
//!
//! `GameState` owns every entity, the level and the RNG. Shells mutate it
//! only through [`GameState::reset`] and [`GameState::update`] and read it
//! through the query methods.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrel::{Barrel, BarrelPose};
use super::level::{Level, build_level_with};
use super::player::{Player, PlayerPose};
use super::rect::Rect;
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances
    Running,
    /// Player reached the goal
    Won,
    /// Out of lives
    Lost,
}

/// Things that happened during the last tick (for audio/effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BarrelSpawned { id: u32 },
    BarrelDropped { id: u32 },
    BarrelRemoved { id: u32 },
    PlayerJumped,
    PlayerLanded,
    PlayerHit { barrel: u32, lives_left: u32 },
    Won,
    Lost,
    Restarted,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed; the RNG restarts from it on every reset
    pub seed: u64,
    pub tuning: Tuning,
    pub level: Level,
    pub player: Player,
    /// Live barrels in spawn order
    pub barrels: Vec<Barrel>,
    pub lives: u32,
    pub score: u64,
    /// Running ticks since the last reset
    pub time_ticks: u64,
    /// Ticks until the next spawn attempt
    pub spawn_countdown: u32,
    pub phase: GamePhase,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
    /// Barrels spawned since reset (drives direction alternation)
    spawned: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let state = Self::fresh(seed, tuning.sanitized());
        log::info!("Session started (seed {})", seed);
        state
    }

    /// Initial session for `seed`; the only place initial values live
    fn fresh(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            level: build_level_with(&tuning),
            player: Player::new(),
            barrels: Vec::new(),
            lives: tuning.start_lives,
            score: 0,
            time_ticks: 0,
            spawn_countdown: tuning.barrel_spawn_every,
            phase: GamePhase::Running,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            spawned: 0,
            next_id: 1,
            tuning,
        }
    }

    /// Rebuild the level and restore every entity and counter
    pub fn reset(&mut self) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::fresh(self.seed, tuning);
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Advance exactly one tick
    pub fn update(&mut self, input: &TickInput) {
        tick(self, input);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a barrel at the hazard source; directions alternate, first right
    pub fn spawn_barrel(&mut self) -> u32 {
        let id = self.next_entity_id();
        let direction = if self.spawned % 2 == 0 { 1 } else { -1 };
        self.spawned += 1;
        self.barrels
            .push(Barrel::spawn(id, &self.level.hazard_source, direction, &self.tuning));
        self.events.push(GameEvent::BarrelSpawned { id });
        log::debug!("Spawned barrel {} rolling {}", id, direction);
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    // === Read-only queries for rendering ===

    pub fn player_pose(&self) -> PlayerPose {
        self.player.pose()
    }

    pub fn barrel_poses(&self) -> Vec<BarrelPose> {
        self.barrels.iter().map(Barrel::pose).collect()
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.level.platforms
    }

    pub fn ladders(&self) -> &[Rect] {
        &self.level.ladders
    }

    pub fn goal(&self) -> Rect {
        self.level.goal
    }

    pub fn hazard_source(&self) -> Rect {
        self.level.hazard_source
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
