//! Plinko Odds - A plinko probability visualization
//!
//! Core modules:
//! - `sim`: Drop simulation (board geometry, peg collisions, slot resolution)
//! - `ledger`: Running bet/win totals for a session
//! - `stats`: Slot distributions and expected return
//! - `advice`: Static educational messages about gambling odds
//! - `renderer`: WebGPU rendering pipeline

pub mod advice;
pub mod ledger;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod stats;

pub use ledger::{Ledger, Settlement, parse_wager};
pub use settings::{Settings, SettingsError};

/// Default configuration constants
///
/// Physics values are per-frame quantities (pixels/frame, pixels/frame²) at
/// the fixed 60 Hz simulation rate.
pub mod consts {
    /// Fixed simulation timestep (one step per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Lattice shape
    pub const ROWS: u32 = 8;
    pub const SLOTS: usize = 9;

    pub const PEG_RADIUS: f32 = 4.0;
    pub const BALL_RADIUS: f32 = 8.0;

    /// Downward acceleration added to vy every step
    pub const GRAVITY: f32 = 0.4;
    /// Damping applied to reflected velocity (pegs and walls)
    pub const BOUNCE: f32 = 0.7;
    /// Horizontal speed scale after a peg hit
    pub const DEFLECT_SPEED: f32 = 3.0;
    /// Smallest |normal.x| used for a peg kick, so a head-on hit still picks a side
    pub const HEAD_ON_KICK: f32 = 0.1;

    /// Payout multipliers, outer slots pay highest
    pub const MULTIPLIERS: [f64; SLOTS] = [5.0, 2.0, 1.0, 0.5, 0.2, 0.5, 1.0, 2.0, 5.0];

    /// Board sizing
    pub const MAX_BOARD_WIDTH: f32 = 400.0;
    pub const MIN_BOARD_WIDTH: f32 = 120.0;
    /// Height = width * aspect
    pub const BOARD_ASPECT: f32 = 1.3;
    /// Horizontal padding of the canvas container
    pub const CONTAINER_PADDING: f32 = 48.0;

    /// Wager used when the bet input is empty or not a positive number
    pub const DEFAULT_WAGER: f64 = 1.0;
}

/// Format a money amount the way the results panel shows it (`12.50$`)
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}$", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2.0), "2.00$");
        assert_eq!(format_amount(-8.0), "-8.00$");
        assert_eq!(format_amount(0.456), "0.46$");
    }
}
