//! Axis-aligned rectangle geometry
//!
//! Every entity, platform and ladder is a `Rect` in world pixels:
//! - origin at the top-left of the screen
//! - x grows to the right, y grows downward
//! - `x`/`y` name the rectangle's top-left corner

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_center_x(&mut self, cx: f32) {
        self.x = cx - self.w / 2.0;
    }

    /// Move the rectangle by a displacement
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether `x` lies in `[left - slack, right + slack]`
    #[inline]
    pub fn spans_x(&self, x: f32, slack: f32) -> bool {
        x >= self.left() - slack && x <= self.right() + slack
    }
}
