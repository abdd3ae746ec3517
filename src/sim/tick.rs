//! Per-frame drop step
//!
//! Advances one ball by one frame against a board.

use super::board::Board;
use super::collision::{ball_peg_collision, clamp_to_walls, resolve_peg_hit};
use super::rng::SignSource;
use super::state::Ball;

/// Advance the ball by one frame
///
/// Returns the landing slot on the frame the ball crosses the slot line, and
/// `None` on every other frame (including all frames after landing).
///
/// Pegs are only tested in the row the ball is in at the end of the frame,
/// and only the first frame it is there. Row 0 counts as already resolved.
/// At the default constants the ball can't fall more than one row spacing
/// per frame, so no row after it is skipped.
pub fn step<S: SignSource + ?Sized>(ball: &mut Ball, board: &Board, signs: &mut S) -> Option<usize> {
    if ball.finished {
        return None;
    }

    // Integrate
    ball.vel.y += ball.gravity;
    ball.pos += ball.vel;

    // Peg row the ball just entered
    if let Some(row) = board.row_at(ball.pos.y)
        && row > ball.last_row
    {
        ball.last_row = row;
        for peg in board.row_pegs(row) {
            let result = ball_peg_collision(ball.pos, ball.radius, peg.pos, board.peg_radius);
            if result.hit {
                let sign = signs.next_sign();
                resolve_peg_hit(ball, &result, sign);
            }
        }
    }

    clamp_to_walls(ball, board);

    if ball.pos.y > board.slot_line() {
        ball.finished = true;
        return Some(board.slot_at(ball.pos.x));
    }

    None
}

/// Step a ball until it lands and return its slot
pub fn run_drop<S: SignSource + ?Sized>(ball: &mut Ball, board: &Board, signs: &mut S) -> usize {
    if ball.finished {
        return board.slot_at(ball.pos.x);
    }
    loop {
        if let Some(slot) = step(ball, board, signs) {
            return slot;
        }
    }
}
