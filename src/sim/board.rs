//! Peg lattice geometry
//!
//! The board is a triangle of pegs: row `r` holds `r + 2` pegs centred on the
//! board, with the slot line one row spacing below the last row. All
//! coordinates are canvas pixels with y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_BOARD_WIDTH;
use crate::settings::Settings;

/// A single peg position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peg {
    pub row: u32,
    pub col: u32,
    pub pos: Vec2,
}

/// Board geometry for one container size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub rows: u32,
    pub slots: usize,
    pub width: f32,
    pub height: f32,
    /// Horizontal distance between neighbouring pegs (also the slot width)
    pub spacing_x: f32,
    /// Vertical distance between rows
    pub spacing_y: f32,
    /// Ball spawn point at the top center
    pub apex: Vec2,
    pub peg_radius: f32,
}

impl Board {
    /// Derive the board from the width of the element hosting the canvas
    pub fn from_container_width(settings: &Settings, container_width: f32) -> Self {
        let available = container_width - settings.container_padding;
        let width = available
            .min(settings.max_board_width)
            .max(MIN_BOARD_WIDTH.min(settings.max_board_width));
        Self::with_width(settings, width)
    }

    /// Board of an exact pixel width
    pub fn with_width(settings: &Settings, width: f32) -> Self {
        let height = width * settings.board_aspect;
        let spacing_x = width / (settings.slots as f32 + 1.0);
        let spacing_y = height / (settings.rows as f32 + 4.0);

        Self {
            rows: settings.rows,
            slots: settings.slots,
            width,
            height,
            spacing_x,
            spacing_y,
            apex: Vec2::new(width / 2.0, spacing_y),
            peg_radius: settings.peg_radius,
        }
    }

    /// Number of pegs in a row
    #[inline]
    pub fn pegs_in_row(&self, row: u32) -> u32 {
        row + 2
    }

    /// Vertical center of a peg row
    #[inline]
    pub fn row_y(&self, row: u32) -> f32 {
        self.apex.y + (row as f32 + 1.0) * self.spacing_y
    }

    /// Pegs of one row, left to right
    pub fn row_pegs(&self, row: u32) -> impl Iterator<Item = Peg> + '_ {
        let count = self.pegs_in_row(row);
        let offset_x = (self.width - (count as f32 - 1.0) * self.spacing_x) / 2.0;
        let y = self.row_y(row);
        (0..count).map(move |col| Peg {
            row,
            col,
            pos: Vec2::new(offset_x + col as f32 * self.spacing_x, y),
        })
    }

    /// Every peg, row by row
    pub fn pegs(&self) -> impl Iterator<Item = Peg> + '_ {
        (0..self.rows).flat_map(move |row| self.row_pegs(row))
    }

    /// Row a vertical position falls in, if it's inside the lattice
    ///
    /// A ball enters row `r` once its center passes the row's peg centers.
    pub fn row_at(&self, y: f32) -> Option<u32> {
        let row = ((y - self.apex.y) / self.spacing_y).floor() - 1.0;
        if row >= 0.0 && row < self.rows as f32 {
            Some(row as u32)
        } else {
            None
        }
    }

    /// Y past which a ball is considered landed
    #[inline]
    pub fn slot_line(&self) -> f32 {
        self.apex.y + (self.rows as f32 + 1.0) * self.spacing_y
    }

    /// Slot index for a horizontal position, clamped to the valid range
    pub fn slot_at(&self, x: f32) -> usize {
        let index = (x / self.spacing_x).floor();
        index.clamp(0.0, (self.slots - 1) as f32) as usize
    }

    /// Horizontal band `[left, right)` that resolves to a slot
    pub fn slot_bounds(&self, slot: usize) -> (f32, f32) {
        let left = slot as f32 * self.spacing_x;
        (left, left + self.spacing_x)
    }

    /// Height of the slot markers under the slot line
    #[inline]
    pub fn slot_height(&self) -> f32 {
        self.spacing_y * 1.5
    }

    /// Valid range for a ball center of the given radius
    #[inline]
    pub fn x_bounds(&self, ball_radius: f32) -> (f32, f32) {
        (ball_radius, self.width - ball_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_400() -> Board {
        Board::from_container_width(&Settings::default(), 448.0)
    }

    #[test]
    fn test_geometry_from_container() {
        let board = board_400();
        assert_eq!(board.width, 400.0);
        assert!((board.height - 520.0).abs() < 0.001);
        assert!((board.spacing_x - 40.0).abs() < 0.001);
        assert!((board.spacing_y - 520.0 / 12.0).abs() < 0.001);
        assert_eq!(board.apex.x, 200.0);
        assert_eq!(board.apex.y, board.spacing_y);
    }

    #[test]
    fn test_width_is_capped_and_floored() {
        let settings = Settings::default();
        assert_eq!(Board::from_container_width(&settings, 2000.0).width, 400.0);
        assert_eq!(Board::from_container_width(&settings, 300.0).width, 252.0);
        assert_eq!(Board::from_container_width(&settings, 10.0).width, MIN_BOARD_WIDTH);
    }

    #[test]
    fn test_rows_are_centred_triangle() {
        let board = board_400();
        for row in 0..board.rows {
            let pegs: Vec<Peg> = board.row_pegs(row).collect();
            assert_eq!(pegs.len() as u32, row + 2);
            let first = pegs.first().unwrap().pos.x;
            let last = pegs.last().unwrap().pos.x;
            assert!((first + last - board.width).abs() < 0.001);
            assert!(pegs.iter().all(|p| (p.pos.y - board.row_y(row)).abs() < 0.001));
        }
        assert_eq!(board.pegs().count(), (2..10).sum::<usize>());
    }

    #[test]
    fn test_row_at() {
        let board = board_400();
        assert_eq!(board.row_at(board.apex.y), None);
        assert_eq!(board.row_at(board.row_y(0) - 0.01), None);
        assert_eq!(board.row_at(board.row_y(0) + 0.01), Some(0));
        assert_eq!(board.row_at(board.row_y(7) + 0.01), Some(7));
        assert_eq!(board.row_at(board.slot_line() + 1.0), None);
    }

    #[test]
    fn test_slot_at_clamps() {
        let board = board_400();
        assert_eq!(board.slot_at(-5.0), 0);
        assert_eq!(board.slot_at(20.0), 0);
        assert_eq!(board.slot_at(180.0), 4);
        assert_eq!(board.slot_at(200.0), 5);
        assert_eq!(board.slot_at(395.0), 8);
        assert_eq!(board.slot_at(10_000.0), 8);
    }
}
