//! Ball and session state
//!
//! A session owns at most one ball. Starting a drop while one is in flight is
//! a no-op, which is what keeps the drop button single-shot.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::paytable::Paytable;
use super::rng::{RandomSigns, SignSource};
use super::tick::step;
use crate::ledger::{Ledger, Settlement};
use crate::settings::{Settings, SettingsError};

/// A falling ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    pub bounce: f32,
    pub deflect_speed: f32,
    /// Last peg row resolved; starts at 0, so row 0 is never tested
    pub last_row: u32,
    /// Set once the ball crosses the slot line
    pub finished: bool,
}

impl Ball {
    /// Ball resting at the board apex
    pub fn new(board: &Board, settings: &Settings) -> Self {
        Self::at(settings, board.apex, Vec2::ZERO)
    }

    /// Ball at an arbitrary position and velocity
    pub fn at(settings: &Settings, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: settings.ball_radius,
            gravity: settings.gravity,
            bounce: settings.bounce,
            deflect_speed: settings.deflect_speed,
            last_row: 0,
            finished: false,
        }
    }
}

/// One visitor's plinko session: board, payouts, ledger and the active drop
#[derive(Debug, Clone)]
pub struct Session<S = RandomSigns<Pcg32>> {
    settings: Settings,
    board: Board,
    paytable: Paytable,
    ledger: Ledger,
    ball: Option<Ball>,
    /// Wager placed on the active drop
    wager: f64,
    signs: S,
}

impl Session {
    /// Session with a seeded coin flip for peg deflections
    pub fn new(settings: Settings, container_width: f32, seed: u64) -> Result<Self, SettingsError> {
        Self::with_signs(settings, container_width, RandomSigns::seeded(seed))
    }
}

impl<S: SignSource> Session<S> {
    pub fn with_signs(
        settings: Settings,
        container_width: f32,
        signs: S,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let board = Board::from_container_width(&settings, container_width);
        let paytable = settings.paytable();
        log::info!(
            "Session ready: {} rows, {} slots, board {:.0}x{:.0}",
            board.rows,
            board.slots,
            board.width,
            board.height
        );
        Ok(Self {
            settings,
            board,
            paytable,
            ledger: Ledger::default(),
            ball: None,
            wager: 0.0,
            signs,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The ball in flight, if any
    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn is_dropping(&self) -> bool {
        self.ball.is_some()
    }

    /// Spawn a ball at the apex
    ///
    /// Returns false (and changes nothing) while another drop is in flight.
    pub fn start_drop(&mut self, wager: f64) -> bool {
        if self.is_dropping() {
            log::debug!("Drop ignored, one already in flight");
            return false;
        }
        self.ball = Some(Ball::new(&self.board, &self.settings));
        self.wager = wager;
        log::debug!("Drop started (wager {:.2})", wager);
        true
    }

    /// Advance the active drop by one frame
    ///
    /// When the ball lands the wager is settled and the ball is discarded.
    pub fn advance(&mut self) -> Option<Settlement> {
        let ball = self.ball.as_mut()?;
        let slot = step(ball, &self.board, &mut self.signs)?;
        self.ball = None;

        let settlement = self.ledger.settle(slot, self.wager, &self.paytable);
        log::debug!(
            "Ball landed in slot {} ({}x): wager {:.2}, win {:.2}",
            slot,
            settlement.multiplier,
            settlement.wager,
            settlement.win
        );
        Some(settlement)
    }

    /// Rebuild the board for a new container width
    ///
    /// Multipliers stay attached to the same slots. A ball in flight is
    /// scaled with the board so it keeps its place in the lattice.
    pub fn resize(&mut self, container_width: f32) {
        let board = Board::from_container_width(&self.settings, container_width);
        if board == self.board {
            return;
        }
        if let Some(ball) = self.ball.as_mut() {
            let scale = board.width / self.board.width;
            ball.pos *= scale;
            let (min_x, max_x) = board.x_bounds(ball.radius);
            ball.pos.x = ball.pos.x.clamp(min_x, max_x);
        }
        log::info!("Board resized to {:.0}x{:.0}", board.width, board.height);
        self.board = board;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{Alternating, FixedSign};

    fn session() -> Session {
        Session::new(Settings::default(), 448.0, 12345).unwrap()
    }

    fn run_to_landing<S: SignSource>(session: &mut Session<S>) -> Settlement {
        for _ in 0..10_000 {
            if let Some(settlement) = session.advance() {
                return settlement;
            }
        }
        panic!("drop never landed");
    }

    #[test]
    fn test_start_drop_is_single_shot() {
        let mut session = session();
        assert!(!session.is_dropping());
        assert!(session.start_drop(10.0));
        assert!(session.is_dropping());

        // Second press while in flight does nothing
        let before = session.ball().cloned();
        assert!(!session.start_drop(50.0));
        assert_eq!(session.ball().cloned(), before);

        let settlement = run_to_landing(&mut session);
        assert_eq!(settlement.wager, 10.0);
        assert!(!session.is_dropping());
        assert!(session.start_drop(5.0));
    }

    #[test]
    fn test_advance_without_ball() {
        let mut session = session();
        assert!(session.advance().is_none());
        assert_eq!(session.ledger().drops(), 0);
    }

    #[test]
    fn test_ledger_follows_drops() {
        let mut session = Session::with_signs(Settings::default(), 448.0, Alternating::default()).unwrap();
        let mut wagered = 0.0;
        let mut won = 0.0;
        for bet in [1.0, 2.5, 10.0] {
            assert!(session.start_drop(bet));
            let settlement = run_to_landing(&mut session);
            assert!(settlement.slot < 9);
            assert_eq!(settlement.multiplier, session.paytable().multiplier(settlement.slot));
            wagered += bet;
            won += settlement.win;
        }
        let ledger = session.ledger();
        assert_eq!(ledger.drops(), 3);
        assert!((ledger.total_wagered() - wagered).abs() < 1e-9);
        assert!((ledger.total_won() - won).abs() < 1e-9);
        assert!((ledger.net() - (won - wagered)).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_results() {
        let mut a = session();
        let mut b = session();
        for _ in 0..5 {
            a.start_drop(1.0);
            b.start_drop(1.0);
            assert_eq!(run_to_landing(&mut a).slot, run_to_landing(&mut b).slot);
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Session::new(Settings::default(), 448.0, 1).unwrap();
        let mut b = Session::new(Settings::default(), 448.0, 2).unwrap();
        let mut slots_a = Vec::new();
        let mut slots_b = Vec::new();
        for _ in 0..20 {
            a.start_drop(1.0);
            b.start_drop(1.0);
            slots_a.push(run_to_landing(&mut a).slot);
            slots_b.push(run_to_landing(&mut b).slot);
        }
        assert_ne!(slots_a, slots_b);
        assert!(slots_a.iter().chain(&slots_b).any(|slot| *slot != slots_a[0]));
    }

    #[test]
    fn test_resize_keeps_multipliers() {
        let mut session = Session::with_signs(Settings::default(), 448.0, FixedSign(1.0)).unwrap();
        let before = session.paytable().clone();
        session.resize(300.0);
        assert_eq!(session.board().width, 252.0);
        assert_eq!(session.paytable(), &before);
        assert_eq!(session.board().slots, before.len());
    }

    #[test]
    fn test_resize_mid_drop_scales_ball() {
        let mut session = Session::with_signs(Settings::default(), 448.0, FixedSign(1.0)).unwrap();
        session.start_drop(1.0);
        for _ in 0..10 {
            assert!(session.advance().is_none());
        }
        let old = session.ball().unwrap().pos;
        session.resize(248.0);
        let new = session.ball().unwrap().pos;
        assert!((new.x - old.x * 0.5).abs() < 0.001);
        assert!((new.y - old.y * 0.5).abs() < 0.001);

        let settlement = run_to_landing(&mut session);
        assert!(settlement.slot < 9);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            multipliers: vec![1.0],
            ..Default::default()
        };
        assert!(Session::new(settings, 448.0, 1).is_err());
    }
}
