//! Drop simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `step` per 60 Hz frame
//! - Randomness only through an injected `SignSource`
//! - Geometry derived from `Settings` and the container width

pub mod board;
pub mod collision;
pub mod paytable;
pub mod rng;
pub mod state;
pub mod tick;

pub use board::{Board, Peg};
pub use collision::{CollisionResult, ball_peg_collision, clamp_to_walls, resolve_peg_hit};
pub use paytable::{Paytable, SlotTier};
pub use rng::{Alternating, FixedSign, RandomSigns, SignSource};
pub use state::{Ball, Session};
pub use tick::{run_drop, step};
