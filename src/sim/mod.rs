//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (platforms by build order, barrels by spawn order)
//! - No rendering or platform dependencies

pub mod barrel;
pub mod collision;
pub mod level;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use barrel::{Barrel, BarrelPose, update_barrel};
pub use collision::{Body, ResolveOptions, VerticalContact};
pub use level::{Level, build_level, build_level_with};
pub use player::{Player, PlayerPose};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
