//! Collision detection and response for pegs and side walls
//!
//! Pegs are static circles. A hit snaps the ball onto the peg surface and
//! knocks it sideways; which side is decided by the caller's `SignSource`.

use glam::Vec2;

use super::board::Board;
use super::state::Ball;
use crate::consts::HEAD_ON_KICK;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the peg surface (if hit)
    pub point: Vec2,
    /// Unit vector from peg center toward ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between the ball and one peg
///
/// Overlap is strict: a ball exactly touching the peg is a miss.
pub fn ball_peg_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    peg_pos: Vec2,
    peg_radius: f32,
) -> CollisionResult {
    let contact = ball_radius + peg_radius;
    let delta = ball_pos - peg_pos;
    let dist = delta.length();

    if dist >= contact {
        return CollisionResult::miss();
    }

    // Concentric ball and peg: atan2(0, 0) is 0, i.e. push along +x
    let normal = delta.try_normalize().unwrap_or(Vec2::X);
    CollisionResult {
        hit: true,
        point: peg_pos + normal * peg_radius,
        normal,
        penetration: contact - dist,
    }
}

/// Apply a peg hit to the ball
///
/// The ball is moved out to the peg surface along the contact normal, gets a
/// horizontal kick of `normal.x * deflect_speed` with the given sign, and
/// keeps falling at `|vy| * bounce`. Near-vertical normals are widened to
/// `HEAD_ON_KICK` so the sign always moves the ball.
pub fn resolve_peg_hit(ball: &mut Ball, result: &CollisionResult, sign: f32) {
    if !result.hit {
        return;
    }
    let lateral = if result.normal.x.abs() < HEAD_ON_KICK {
        HEAD_ON_KICK.copysign(result.normal.x)
    } else {
        result.normal.x
    };
    ball.pos += result.normal * result.penetration;
    ball.vel.x = lateral * ball.deflect_speed * sign;
    ball.vel.y = ball.vel.y.abs() * ball.bounce;
}

/// Keep the ball between the side walls
///
/// Returns true if a wall was touched this frame.
pub fn clamp_to_walls(ball: &mut Ball, board: &Board) -> bool {
    let (min_x, max_x) = board.x_bounds(ball.radius);
    if ball.pos.x < min_x {
        ball.pos.x = min_x;
        ball.vel.x *= -ball.bounce;
        true
    } else if ball.pos.x > max_x {
        ball.pos.x = max_x;
        ball.vel.x *= -ball.bounce;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn board() -> Board {
        Board::with_width(&Settings::default(), 400.0)
    }

    #[test]
    fn test_peg_collision_overlap() {
        let peg = Vec2::new(100.0, 100.0);
        // 10px apart, contact distance 12
        let result = ball_peg_collision(Vec2::new(106.0, 108.0), 8.0, peg, 4.0);
        assert!(result.hit);
        assert!((result.penetration - 2.0).abs() < 0.001);
        assert!((result.normal - Vec2::new(0.6, 0.8)).length() < 0.001);
        assert!((result.point - Vec2::new(102.4, 103.2)).length() < 0.001);
    }

    #[test]
    fn test_peg_collision_miss() {
        let peg = Vec2::new(100.0, 100.0);
        assert!(!ball_peg_collision(Vec2::new(120.0, 100.0), 8.0, peg, 4.0).hit);
        // Exactly touching is not a hit
        assert!(!ball_peg_collision(Vec2::new(112.0, 100.0), 8.0, peg, 4.0).hit);
    }

    #[test]
    fn test_concentric_pushes_right() {
        let peg = Vec2::new(50.0, 50.0);
        let result = ball_peg_collision(peg, 8.0, peg, 4.0);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
        assert!((result.penetration - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_resolve_moves_to_surface_and_deflects() {
        let peg = Vec2::new(100.0, 100.0);
        let mut ball = Ball::at(&Settings::default(), Vec2::new(106.0, 108.0), Vec2::new(0.5, 5.0));

        let result = ball_peg_collision(ball.pos, ball.radius, peg, 4.0);
        resolve_peg_hit(&mut ball, &result, -1.0);

        // Now exactly on the surface
        assert!(((ball.pos - peg).length() - 12.0).abs() < 0.001);
        // Kick is normal.x * 3 with the chosen sign
        assert!((ball.vel.x - (-0.6 * 3.0)).abs() < 0.001);
        // Downward speed damped by bounce
        assert!((ball.vel.y - 3.5).abs() < 0.001);
    }

    #[test]
    fn test_resolve_keeps_falling_after_upward_motion() {
        let peg = Vec2::new(100.0, 100.0);
        let mut ball = Ball::at(&Settings::default(), Vec2::new(100.0, 108.0), Vec2::new(0.0, -2.0));
        let result = ball_peg_collision(ball.pos, ball.radius, peg, 4.0);
        resolve_peg_hit(&mut ball, &result, 1.0);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_head_on_hit_follows_sign() {
        let peg = Vec2::new(200.0, 100.0);
        let settings = Settings::default();
        let start = Vec2::new(200.0, 105.0);

        let mut right = Ball::at(&settings, start, Vec2::new(0.0, 4.0));
        let result = ball_peg_collision(right.pos, right.radius, peg, 4.0);
        assert_eq!(result.normal.x, 0.0);
        resolve_peg_hit(&mut right, &result, 1.0);

        let mut left = Ball::at(&settings, start, Vec2::new(0.0, 4.0));
        resolve_peg_hit(&mut left, &result, -1.0);

        assert!((right.vel.x - HEAD_ON_KICK * 3.0).abs() < 0.0001);
        assert!((left.vel.x + HEAD_ON_KICK * 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_glancing_hit_keeps_full_kick() {
        let peg = Vec2::new(100.0, 100.0);
        let mut ball = Ball::at(&Settings::default(), Vec2::new(106.0, 108.0), Vec2::new(0.0, 2.0));
        let result = ball_peg_collision(ball.pos, ball.radius, peg, 4.0);
        resolve_peg_hit(&mut ball, &result, 1.0);
        assert!((ball.vel.x - 0.6 * 3.0).abs() < 0.001);
    }

    #[test]
    fn test_walls() {
        let board = board();
        let settings = Settings::default();

        let mut ball = Ball::at(&settings, Vec2::new(3.0, 50.0), Vec2::new(-2.0, 1.0));
        assert!(clamp_to_walls(&mut ball, &board));
        assert_eq!(ball.pos.x, 8.0);
        assert!((ball.vel.x - 1.4).abs() < 0.001);

        let mut ball = Ball::at(&settings, Vec2::new(399.0, 50.0), Vec2::new(2.0, 1.0));
        assert!(clamp_to_walls(&mut ball, &board));
        assert_eq!(ball.pos.x, 392.0);
        assert!((ball.vel.x + 1.4).abs() < 0.001);

        let mut ball = Ball::at(&settings, Vec2::new(200.0, 50.0), Vec2::new(2.0, 1.0));
        assert!(!clamp_to_walls(&mut ball, &board));
        assert_eq!(ball.vel.x, 2.0);
    }
}
