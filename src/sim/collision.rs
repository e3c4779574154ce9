//! Kinematic bodies and platform collision
//!
//! Players and barrels share the same motion model: horizontal and vertical
//! motion are resolved as separate passes against axis-aligned platforms.
//! Each entity owns a [`Body`] and calls the free functions here with its own
//! options, so there is no base type to inherit from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Position, velocity and ground contact of a moving entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    /// Pixels per tick
    pub vel: Vec2,
    /// Set only by the vertical pass of the current tick
    pub on_ground: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }
}

/// What the vertical pass ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    None,
    /// Came down onto the top of platform `i`
    Landed(usize),
    /// Hit the underside of platform `i` while rising
    Bumped(usize),
    /// Caught by the bottom of the world
    Floor,
}

impl VerticalContact {
    pub fn is_landing(&self) -> bool {
        matches!(self, VerticalContact::Landed(_) | VerticalContact::Floor)
    }
}

/// Per-entity switches for [`resolve_vertical`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolveOptions {
    /// Rising bodies stop at the underside of platforms
    pub head_bump: bool,
    /// Clamp the body's bottom to this world height
    pub floor: Option<f32>,
    /// Platform index to pass through
    pub skip: Option<usize>,
}

/// Zero any velocity component that has drifted to NaN/inf
pub fn sanitize(body: &mut Body) {
    if !body.vel.x.is_finite() {
        body.vel.x = 0.0;
    }
    if !body.vel.y.is_finite() {
        body.vel.y = 0.0;
    }
}

/// Integrate horizontal velocity
#[inline]
pub fn move_horizontal(body: &mut Body) {
    body.rect.x += body.vel.x;
}

/// Keep the body inside `[0, world_width]`; returns true if it was clamped
pub fn clamp_horizontal(body: &mut Body, world_width: f32) -> bool {
    if body.rect.left() < 0.0 {
        body.rect.set_left(0.0);
        true
    } else if body.rect.right() > world_width {
        body.rect.set_right(world_width);
        true
    } else {
        false
    }
}

/// Accelerate downward, capped at `terminal`
#[inline]
pub fn apply_gravity(body: &mut Body, gravity: f32, terminal: f32) {
    body.vel.y = (body.vel.y + gravity).min(terminal);
}

/// Integrate vertical velocity and resolve against platforms
///
/// Every platform is visited in order and the last qualifying overlap
/// decides the outcome. Once a contact zeroes `vel.y`, later overlaps are
/// ignored for the rest of the pass.
pub fn resolve_vertical(body: &mut Body, platforms: &[Rect], opts: ResolveOptions) -> VerticalContact {
    body.on_ground = false;
    body.rect.y += body.vel.y;

    let mut contact = VerticalContact::None;
    for (i, platform) in platforms.iter().enumerate() {
        if opts.skip == Some(i) || !body.rect.overlaps(platform) {
            continue;
        }
        if body.vel.y > 0.0 {
            body.rect.set_bottom(platform.top());
            body.vel.y = 0.0;
            body.on_ground = true;
            contact = VerticalContact::Landed(i);
        } else if body.vel.y < 0.0 && opts.head_bump {
            body.rect.set_top(platform.bottom());
            body.vel.y = 0.0;
            contact = VerticalContact::Bumped(i);
        }
    }

    if let Some(floor) = opts.floor {
        if body.rect.bottom() > floor {
            body.rect.set_bottom(floor);
            body.vel.y = 0.0;
            body.on_ground = true;
            contact = VerticalContact::Floor;
        }
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORM: Rect = Rect::new(0.0, 100.0, 200.0, 16.0);

    fn body_at(x: f32, y: f32, vy: f32) -> Body {
        let mut body = Body::new(Rect::new(x, y, 20.0, 20.0));
        body.vel.y = vy;
        body
    }

    #[test]
    fn test_landing_zeroes_velocity_and_grounds() {
        let mut body = body_at(10.0, 78.0, 5.0);
        let contact = resolve_vertical(&mut body, &[PLATFORM], ResolveOptions::default());
        assert_eq!(contact, VerticalContact::Landed(0));
        assert_eq!(body.rect.bottom(), 100.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.on_ground);
    }

    #[test]
    fn test_head_bump_only_when_enabled() {
        let opts = ResolveOptions {
            head_bump: true,
            ..Default::default()
        };
        let mut body = body_at(10.0, 120.0, -8.0);
        assert_eq!(resolve_vertical(&mut body, &[PLATFORM], opts), VerticalContact::Bumped(0));
        assert_eq!(body.rect.top(), 116.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.on_ground);

        let mut body = body_at(10.0, 120.0, -8.0);
        let contact = resolve_vertical(&mut body, &[PLATFORM], ResolveOptions::default());
        assert_eq!(contact, VerticalContact::None);
        assert_eq!(body.rect.top(), 112.0);
        assert_eq!(body.vel.y, -8.0);
    }

    #[test]
    fn test_grounded_is_not_carried_over() {
        let mut body = body_at(10.0, 0.0, 0.0);
        body.on_ground = true;
        resolve_vertical(&mut body, &[PLATFORM], ResolveOptions::default());
        assert!(!body.on_ground);
    }

    #[test]
    fn test_skip_passes_through() {
        let opts = ResolveOptions {
            skip: Some(0),
            ..Default::default()
        };
        let mut body = body_at(10.0, 85.0, 5.0);
        assert_eq!(resolve_vertical(&mut body, &[PLATFORM], opts), VerticalContact::None);
        assert_eq!(body.rect.y, 90.0);
    }

    #[test]
    fn test_floor_clamp() {
        let opts = ResolveOptions {
            floor: Some(300.0),
            ..Default::default()
        };
        let mut body = body_at(10.0, 275.0, 10.0);
        assert_eq!(resolve_vertical(&mut body, &[], opts), VerticalContact::Floor);
        assert_eq!(body.rect.bottom(), 300.0);
        assert!(body.on_ground);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_first_contact_stops_later_overlaps() {
        // Two thin stacked platforms both overlapped after the move
        let upper = Rect::new(0.0, 100.0, 200.0, 4.0);
        let lower = Rect::new(0.0, 106.0, 200.0, 4.0);
        let mut body = body_at(10.0, 80.0, 10.0);
        let contact = resolve_vertical(&mut body, &[upper, lower], ResolveOptions::default());
        assert_eq!(contact, VerticalContact::Landed(0));
        assert_eq!(body.rect.bottom(), 100.0);
    }

    #[test]
    fn test_gravity_caps_at_terminal() {
        let mut body = body_at(0.0, 0.0, 14.5);
        apply_gravity(&mut body, 0.9, 15.0);
        assert_eq!(body.vel.y, 15.0);
        body.vel.y = -16.0;
        apply_gravity(&mut body, 0.9, 15.0);
        assert!((body.vel.y + 15.1).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_horizontal() {
        let mut body = body_at(-3.0, 0.0, 0.0);
        assert!(clamp_horizontal(&mut body, 100.0));
        assert_eq!(body.rect.x, 0.0);
        body.rect.x = 90.0;
        assert!(clamp_horizontal(&mut body, 100.0));
        assert_eq!(body.rect.right(), 100.0);
        assert!(!clamp_horizontal(&mut body, 100.0));
    }

    #[test]
    fn test_sanitize_zeroes_non_finite() {
        let mut body = body_at(0.0, 0.0, f32::NAN);
        body.vel.x = f32::INFINITY;
        sanitize(&mut body);
        assert_eq!(body.vel, Vec2::ZERO);
    }
}
