//! Board and physics configuration
//!
//! Persisted in LocalStorage as JSON so the board can be tuned without a rebuild.
//! Results are never stored, only this configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Paytable;

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Lattice needs at least one peg row
    NoRows,
    /// Board needs at least one slot
    NoSlots,
    /// One multiplier per slot
    MultiplierCount { expected: usize, found: usize },
    /// Multipliers must mirror around the center slot
    AsymmetricMultipliers { index: usize },
    /// Multipliers can't be negative or non-finite
    InvalidMultiplier { index: usize },
    /// A length or acceleration that must be > 0
    NonPositive(&'static str),
    /// Bounce damping must be in (0, 1]
    BounceOutOfRange(f32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoRows => write!(f, "board must have at least one peg row"),
            SettingsError::NoSlots => write!(f, "board must have at least one slot"),
            SettingsError::MultiplierCount { expected, found } => {
                write!(f, "expected {} multipliers (one per slot), found {}", expected, found)
            }
            SettingsError::AsymmetricMultipliers { index } => {
                write!(f, "multiplier table is not symmetric at slot {}", index)
            }
            SettingsError::InvalidMultiplier { index } => {
                write!(f, "multiplier at slot {} is negative or not a number", index)
            }
            SettingsError::NonPositive(name) => write!(f, "{} must be greater than zero", name),
            SettingsError::BounceOutOfRange(value) => {
                write!(f, "bounce damping {} is outside (0, 1]", value)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Plinko configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Lattice ===
    /// Peg rows (row `r` holds `r + 2` pegs)
    pub rows: u32,
    /// Landing slots
    pub slots: usize,
    pub peg_radius: f32,
    pub ball_radius: f32,

    // === Physics (per frame) ===
    pub gravity: f32,
    /// Damping for peg and wall bounces
    pub bounce: f32,
    /// Horizontal speed scale after a peg hit
    pub deflect_speed: f32,

    // === Payouts ===
    /// One multiplier per slot, left to right
    pub multipliers: Vec<f64>,

    // === Layout ===
    pub max_board_width: f32,
    /// Board height / width
    pub board_aspect: f32,
    /// Subtracted from the container width before sizing the board
    pub container_padding: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: ROWS,
            slots: SLOTS,
            peg_radius: PEG_RADIUS,
            ball_radius: BALL_RADIUS,

            gravity: GRAVITY,
            bounce: BOUNCE,
            deflect_speed: DEFLECT_SPEED,

            multipliers: MULTIPLIERS.to_vec(),

            max_board_width: MAX_BOARD_WIDTH,
            board_aspect: BOARD_ASPECT,
            container_padding: CONTAINER_PADDING,
        }
    }
}

impl Settings {
    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rows == 0 {
            return Err(SettingsError::NoRows);
        }
        if self.slots == 0 {
            return Err(SettingsError::NoSlots);
        }
        if self.multipliers.len() != self.slots {
            return Err(SettingsError::MultiplierCount {
                expected: self.slots,
                found: self.multipliers.len(),
            });
        }
        if let Some(index) = self
            .multipliers
            .iter()
            .position(|m| !m.is_finite() || *m < 0.0)
        {
            return Err(SettingsError::InvalidMultiplier { index });
        }
        let n = self.multipliers.len();
        if let Some(index) = (0..n / 2).find(|&i| self.multipliers[i] != self.multipliers[n - 1 - i]) {
            return Err(SettingsError::AsymmetricMultipliers { index });
        }

        let positive = [
            ("peg_radius", self.peg_radius),
            ("ball_radius", self.ball_radius),
            ("gravity", self.gravity),
            ("deflect_speed", self.deflect_speed),
            ("max_board_width", self.max_board_width),
            ("board_aspect", self.board_aspect),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NonPositive(name));
            }
        }
        if self.container_padding < 0.0 || !self.container_padding.is_finite() {
            return Err(SettingsError::NonPositive("container_padding"));
        }
        if self.bounce.is_nan() || self.bounce <= 0.0 || self.bounce > 1.0 {
            return Err(SettingsError::BounceOutOfRange(self.bounce));
        }

        Ok(())
    }

    /// Multiplier table for these settings
    pub fn paytable(&self) -> Paytable {
        Paytable::new(self.multipliers.clone())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "plinko_odds_settings";

    /// Load settings from LocalStorage (WASM only)
    ///
    /// Stored settings that fail validation are ignored.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) => match settings.validate() {
                        Ok(()) => {
                            log::info!("Loaded settings from LocalStorage");
                            return settings;
                        }
                        Err(e) => log::warn!("Stored settings rejected: {}", e),
                    },
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
