//! Turns board state into a triangle list
//!
//! Everything is emitted in board pixel coordinates; the pipeline maps them to
//! clip space.

use glam::Vec2;

use super::shapes::{circle, rect, ring};
use super::vertex::{Vertex, colors};
use crate::sim::{Ball, Board, Paytable, SlotTier};

const PEG_SEGMENTS: u32 = 12;
const BALL_SEGMENTS: u32 = 24;
const BALL_OUTLINE_WIDTH: f32 = 2.0;
/// Fraction of a slot band left empty on each side of its marker
const SLOT_INSET: f32 = 0.1;

pub fn slot_color(tier: SlotTier) -> [f32; 4] {
    match tier {
        SlotTier::High => colors::SLOT_HIGH,
        SlotTier::Even => colors::SLOT_EVEN,
        SlotTier::Loss => colors::SLOT_LOSS,
    }
}

/// Top-left corner and size of a slot marker
pub fn slot_rect(board: &Board, slot: usize) -> (Vec2, Vec2) {
    let (left, _) = board.slot_bounds(slot);
    let inset = board.spacing_x * SLOT_INSET;
    (
        Vec2::new(left + inset, board.slot_line()),
        Vec2::new(board.spacing_x - 2.0 * inset, board.slot_height()),
    )
}

/// Build one frame: slot markers, then pegs, then the ball on top
pub fn build_scene(board: &Board, paytable: &Paytable, ball: Option<&Ball>) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for slot in 0..board.slots {
        let (top_left, size) = slot_rect(board, slot);
        vertices.extend(rect(top_left, size, slot_color(paytable.tier(slot))));
    }

    for peg in board.pegs() {
        vertices.extend(circle(peg.pos, board.peg_radius, colors::PEG, PEG_SEGMENTS));
    }

    if let Some(ball) = ball {
        vertices.extend(circle(ball.pos, ball.radius, colors::BALL, BALL_SEGMENTS));
        // Stroke straddles the ball edge
        let half = BALL_OUTLINE_WIDTH / 2.0;
        vertices.extend(ring(
            ball.pos,
            ball.radius - half,
            ball.radius + half,
            colors::BALL_OUTLINE,
            BALL_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn setup() -> (Settings, Board, Paytable) {
        let settings = Settings::default();
        let board = Board::from_container_width(&settings, 448.0);
        let paytable = settings.paytable();
        (settings, board, paytable)
    }

    #[test]
    fn test_vertex_count_without_ball() {
        let (_, board, paytable) = setup();
        let verts = build_scene(&board, &paytable, None);
        let pegs = board.pegs().count();
        assert_eq!(verts.len(), 9 * 6 + pegs * PEG_SEGMENTS as usize * 3);
    }

    #[test]
    fn test_ball_drawn_last() {
        let (settings, board, paytable) = setup();
        let ball = Ball::new(&board, &settings);
        let without = build_scene(&board, &paytable, None);
        let with = build_scene(&board, &paytable, Some(&ball));
        let extra = BALL_SEGMENTS as usize * 3 + BALL_SEGMENTS as usize * 6;
        assert_eq!(with.len(), without.len() + extra);
        assert_eq!(with.last().unwrap().color, colors::BALL_OUTLINE);
    }

    #[test]
    fn test_ball_outline_straddles_edge() {
        let (settings, board, paytable) = setup();
        let ball = Ball::new(&board, &settings);
        let verts = build_scene(&board, &paytable, Some(&ball));
        let outline = &verts[verts.len() - BALL_SEGMENTS as usize * 6..];
        for v in outline {
            assert_eq!(v.color, colors::BALL_OUTLINE);
            let r = (Vec2::from(v.position) - ball.pos).length();
            assert!(r >= ball.radius - 1.001 && r <= ball.radius + 1.001);
        }
        assert!(outline.iter().any(|v| (Vec2::from(v.position) - ball.pos).length() < ball.radius));
    }

    #[test]
    fn test_slot_markers_sit_in_their_band() {
        let (_, board, paytable) = setup();
        for slot in 0..board.slots {
            let (top_left, size) = slot_rect(&board, slot);
            let center = top_left.x + size.x / 2.0;
            assert_eq!(board.slot_at(center), slot);
            assert_eq!(top_left.y, board.slot_line());
        }
        // Outer slots pay most and are drawn in the high tier color
        let verts = build_scene(&board, &paytable, None);
        assert_eq!(verts[0].color, colors::SLOT_HIGH);
        assert_eq!(verts[4 * 6].color, colors::SLOT_LOSS);
    }

    #[test]
    fn test_scene_inside_board() {
        let (settings, board, paytable) = setup();
        let ball = Ball::new(&board, &settings);
        for v in build_scene(&board, &paytable, Some(&ball)) {
            let [x, y] = v.position;
            assert!(x >= -0.001 && x <= board.width + 0.001);
            assert!(y >= -0.001 && y <= board.slot_line() + board.slot_height() + 0.001);
        }
    }
}
