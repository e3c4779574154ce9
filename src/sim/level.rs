//! Level layout generation
//!
//! The layout is a pure function of the world size: stacked platform rows
//! that alternate left/right offsets, two ladders between each pair of rows,
//! a full-width ground strip, and the hazard source and goal on the top row.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Number of staggered platform rows (ground excluded)
pub const PLATFORM_ROWS: usize = 6;
/// Vertical distance between row tops
pub const ROW_SPACING: f32 = 100.0;
/// Gap between the floor and the lowest row top
pub const BOTTOM_MARGIN: f32 = 60.0;
/// Distance from the world edges to the outermost platform edge
pub const SIDE_MARGIN: f32 = 40.0;
/// How far each row is shortened/shifted to create the zigzag
pub const ROW_SHIFT: f32 = 60.0;
pub const PLATFORM_THICKNESS: f32 = 16.0;
pub const GROUND_THICKNESS: f32 = 20.0;
pub const LADDER_WIDTH: f32 = 24.0;
/// Ladders placed between each pair of adjacent rows
pub const LADDERS_PER_GAP: usize = 2;
/// Candidate ladder offsets from the row's anchor side
const LADDER_OFFSETS: [f32; 3] = [80.0, 240.0, 400.0];

/// Narrowest world that still fits every row, ladder and the player
pub const MIN_WORLD_WIDTH: f32 = 2.0 * SIDE_MARGIN + 2.0 * ROW_SHIFT + LADDER_OFFSETS[2];
/// Shortest world that keeps the hazard source on screen above the top row
pub const MIN_WORLD_HEIGHT: f32 =
    BOTTOM_MARGIN + (PLATFORM_ROWS - 1) as f32 * ROW_SPACING + 60.0;

/// Static level geometry (immutable once built)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub world_width: f32,
    pub world_height: f32,
    /// Rows bottom to top, then the ground platform last
    pub platforms: Vec<Rect>,
    /// Ladders bottom to top, two per row gap
    pub ladders: Vec<Rect>,
    /// Touching this ends the run in a win
    pub goal: Rect,
    /// Where barrels are spawned
    pub hazard_source: Rect,
}

/// Y coordinate of a row's top surface (row 0 is the lowest)
fn row_top(world_height: f32, row: usize) -> f32 {
    world_height - BOTTOM_MARGIN - row as f32 * ROW_SPACING
}

/// Build the fixed level for a world of the given size
pub fn build_level(world_width: f32, world_height: f32) -> Level {
    let left = SIDE_MARGIN;
    let right = world_width - SIDE_MARGIN;
    let span = right - left;

    let mut platforms = Vec::with_capacity(PLATFORM_ROWS + 1);
    let mut ladders = Vec::with_capacity((PLATFORM_ROWS - 1) * LADDERS_PER_GAP);

    for row in 0..PLATFORM_ROWS {
        let y = row_top(world_height, row);

        // Even rows lean right with ladders on their left, odd rows the reverse
        let (platform, ladder_xs) = if row % 2 == 0 {
            (
                Rect::new(left + ROW_SHIFT, y, span - 2.0 * ROW_SHIFT, PLATFORM_THICKNESS),
                LADDER_OFFSETS.map(|dx| left + dx),
            )
        } else {
            (
                Rect::new(left, y, span - 2.0 * ROW_SHIFT, PLATFORM_THICKNESS),
                LADDER_OFFSETS.map(|dx| right - dx),
            )
        };
        platforms.push(platform);

        // The top row has nothing above it to climb to
        if row + 1 < PLATFORM_ROWS {
            let next_y = row_top(world_height, row + 1);
            let ladder_top = next_y + PLATFORM_THICKNESS;
            for &lx in ladder_xs.iter().take(LADDERS_PER_GAP) {
                ladders.push(Rect::new(
                    lx - LADDER_WIDTH / 2.0,
                    ladder_top,
                    LADDER_WIDTH,
                    y - ladder_top,
                ));
            }
        }
    }

    platforms.push(Rect::new(
        0.0,
        world_height - GROUND_THICKNESS,
        world_width,
        GROUND_THICKNESS,
    ));

    let top_y = row_top(world_height, PLATFORM_ROWS - 1);
    let hazard_source = Rect::new(70.0, top_y - 56.0, 48.0, 48.0);
    let goal = Rect::new(world_width - 120.0, top_y - 50.0, 30.0, 40.0);

    Level {
        world_width,
        world_height,
        platforms,
        ladders,
        goal,
        hazard_source,
    }
}

/// Build the level for the world size configured in `tuning`
pub fn build_level_with(tuning: &Tuning) -> Level {
    build_level(tuning.world_width, tuning.world_height)
}

impl Level {
    /// First ladder the point-with-slack test accepts for `body`
    ///
    /// A body is at a ladder when the rects overlap and its horizontal
    /// center lies within the ladder span widened by `slack` on both sides.
    pub fn ladder_at(&self, body: &Rect, slack: f32) -> Option<&Rect> {
        let cx = body.center_x();
        self.ladders
            .iter()
            .find(|ladder| ladder.spans_x(cx, slack) && body.overlaps(ladder))
    }

    /// The ground strip along the bottom of the world
    pub fn ground(&self) -> Option<&Rect> {
        self.platforms.last()
    }
}
