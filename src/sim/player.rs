//! Player controller
//!
//! Turns one tick of input intent into player motion: walking, jumping,
//! ladder climbing, then the shared platform resolution.

use serde::{Deserialize, Serialize};

use super::collision::{self, Body, ResolveOptions, VerticalContact};
use super::level::Level;
use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::{PLAYER_HEIGHT, PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_WIDTH};
use crate::tuning::Tuning;

/// Movement mode derived from the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Grounded,
    Airborne,
    Climbing,
}

/// Render-facing snapshot of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub rect: Rect,
    /// -1 facing left, +1 facing right
    pub facing: i8,
    /// Hits are ignored; shells usually flicker the sprite
    pub invulnerable: bool,
    pub climbing: bool,
}

/// What happened to the player during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStep {
    pub jumped: bool,
    pub landed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub on_ladder: bool,
    pub facing: i8,
    pub invuln_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(Self::spawn_rect()),
            on_ladder: false,
            facing: 1,
            invuln_ticks: 0,
        }
    }

    /// Rect the player occupies at (re)spawn
    pub fn spawn_rect() -> Rect {
        Rect::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn stance(&self) -> Stance {
        if self.on_ladder {
            Stance::Climbing
        } else if self.body.on_ground {
            Stance::Grounded
        } else {
            Stance::Airborne
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    pub fn pose(&self) -> PlayerPose {
        PlayerPose {
            rect: self.body.rect,
            facing: self.facing,
            invulnerable: self.is_invulnerable(),
            climbing: self.on_ladder,
        }
    }

    /// Read input for this tick: sets velocity, ladder state and jumps
    ///
    /// Returns true if a jump started.
    pub fn handle_input(&mut self, input: &TickInput, level: &Level, tuning: &Tuning) -> bool {
        self.body.vel.x = 0.0;
        if input.move_left {
            self.body.vel.x = -tuning.move_speed;
            self.facing = -1;
        }
        if input.move_right {
            self.body.vel.x = tuning.move_speed;
            self.facing = 1;
        }

        let was_on_ladder = self.on_ladder;
        self.on_ladder = false;
        let ladder = level.ladder_at(&self.body.rect, tuning.ladder_tolerance).copied();

        match ladder {
            Some(ladder) if input.move_up || input.move_down => {
                self.on_ladder = true;
                self.body.rect.set_center_x(ladder.center_x());
                self.body.vel.y = if input.move_up {
                    -tuning.climb_speed
                } else {
                    tuning.climb_speed
                };
                false
            }
            _ => {
                // Letting go of a ladder drops climb speed
                if was_on_ladder {
                    self.body.vel.y = 0.0;
                }
                // Grounded state is the one left by the previous tick
                if input.jump && self.body.on_ground {
                    self.body.vel.y = -tuning.jump_speed;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Integrate motion and resolve against the level
    pub fn physics(&mut self, level: &Level, tuning: &Tuning) -> VerticalContact {
        collision::sanitize(&mut self.body);

        collision::move_horizontal(&mut self.body);
        collision::clamp_horizontal(&mut self.body, level.world_width);

        if !self.on_ladder {
            collision::apply_gravity(&mut self.body, tuning.gravity, tuning.terminal_velocity);
        }

        let opts = ResolveOptions {
            head_bump: !(self.on_ladder && tuning.climb_through_platforms),
            floor: Some(level.world_height),
            skip: None,
        };
        collision::resolve_vertical(&mut self.body, &level.platforms, opts)
    }

    /// Count invulnerability down toward zero
    pub fn tick_invulnerability(&mut self) {
        self.invuln_ticks = self.invuln_ticks.saturating_sub(1);
    }

    /// Full per-tick update: input, physics, invulnerability
    pub fn update(&mut self, input: &TickInput, level: &Level, tuning: &Tuning) -> PlayerStep {
        let was_grounded = self.body.on_ground;
        let jumped = self.handle_input(input, level, tuning);
        let contact = self.physics(level, tuning);
        self.tick_invulnerability();
        PlayerStep {
            jumped,
            landed: contact.is_landing() && !was_grounded,
        }
    }

    /// Hit response: back to spawn, motionless, briefly invulnerable
    pub fn hit(&mut self, invuln_ticks: u32) {
        self.body = Body::new(Self::spawn_rect());
        self.on_ladder = false;
        self.invuln_ticks = invuln_ticks;
    }
}
