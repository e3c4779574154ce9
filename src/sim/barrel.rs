//! Barrel controller
//!
//! Barrels roll at a fixed speed, bounce off the world edges, fall between
//! platforms, and sometimes drop through a platform where a ladder meets it.
//! The drop decision takes the RNG as a parameter so callers control it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{self, Body, ResolveOptions, VerticalContact};
use super::level::Level;
use super::rect::Rect;
use crate::consts::BARREL_SIZE;
use crate::tuning::Tuning;

/// Height above the hazard source's bottom edge where barrels appear
const SPAWN_LIFT: f32 = 20.0;

/// Render-facing snapshot of a barrel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarrelPose {
    pub id: u32,
    pub rect: Rect,
    pub direction: i8,
    pub falling: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrel {
    pub id: u32,
    pub body: Body,
    /// -1 rolling left, +1 rolling right
    pub direction: i8,
    /// Platform this barrel is falling through, ignored until it is clear
    ///
    /// A landed barrel only overlaps the ladder rising from its own platform,
    /// so a drop has to pass through that platform to reach the row below.
    pub dropping_through: Option<usize>,
}

impl Barrel {
    pub fn new(id: u32, rect: Rect, direction: i8, speed: f32) -> Self {
        let mut body = Body::new(rect);
        body.vel.x = direction as f32 * speed;
        Self {
            id,
            body,
            direction,
            dropping_through: None,
        }
    }

    /// New barrel at the hazard source, rolling in `direction`
    pub fn spawn(id: u32, source: &Rect, direction: i8, tuning: &Tuning) -> Self {
        let rect = Rect::new(
            source.center_x() - BARREL_SIZE / 2.0,
            source.bottom() - SPAWN_LIFT,
            BARREL_SIZE,
            BARREL_SIZE,
        );
        Self::new(id, rect, direction, tuning.barrel_speed)
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn pose(&self) -> BarrelPose {
        BarrelPose {
            id: self.id,
            rect: self.body.rect,
            direction: self.direction,
            falling: !self.body.on_ground,
        }
    }

    /// Whether the barrel has fallen far enough below the world to discard
    pub fn is_out_of_world(&self, world_height: f32, margin: f32) -> bool {
        self.body.rect.top() > world_height + margin
    }

    /// Roll one step and bounce off the world edges
    fn roll(&mut self, world_width: f32, speed: f32) {
        self.body.vel.x = self.direction as f32 * speed;
        collision::move_horizontal(&mut self.body);

        if self.body.rect.left() <= 0.0 {
            self.body.rect.set_left(0.0);
            self.direction = 1;
        } else if self.body.rect.right() >= world_width {
            self.body.rect.set_right(world_width);
            self.direction = -1;
        }
        self.body.vel.x = self.direction as f32 * speed;
    }
}

/// Advance a barrel by one tick
///
/// Returns true if the barrel started dropping through a platform.
pub fn update_barrel<R: Rng>(barrel: &mut Barrel, level: &Level, tuning: &Tuning, rng: &mut R) -> bool {
    collision::sanitize(&mut barrel.body);
    barrel.roll(level.world_width, tuning.barrel_speed);

    // Done passing through once fully below the platform
    if let Some(i) = barrel.dropping_through {
        let cleared = level
            .platforms
            .get(i)
            .is_none_or(|p| barrel.body.rect.top() >= p.bottom());
        if cleared {
            barrel.dropping_through = None;
        }
    }

    collision::apply_gravity(&mut barrel.body, tuning.gravity, tuning.terminal_velocity);
    let opts = ResolveOptions {
        head_bump: false,
        floor: None,
        skip: barrel.dropping_through,
    };
    let contact = collision::resolve_vertical(&mut barrel.body, &level.platforms, opts);

    if let VerticalContact::Landed(platform) = contact {
        if level.ladder_at(&barrel.body.rect, 0.0).is_some()
            && rng.random_bool(tuning.barrel_drop_chance)
        {
            barrel.body.on_ground = false;
            barrel.body.vel.y = tuning.barrel_drop_speed;
            barrel.dropping_through = Some(platform);
            return true;
        }
    }

    false
}
