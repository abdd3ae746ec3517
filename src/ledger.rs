//! Running bet/win totals for a session
//!
//! Lives only as long as the page; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_WAGER;
use crate::sim::Paytable;

/// Outcome of one drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub slot: usize,
    pub multiplier: f64,
    pub wager: f64,
    pub win: f64,
}

impl Settlement {
    /// Win minus wager for this drop
    pub fn net(&self) -> f64 {
        self.win - self.wager
    }
}

/// Session totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    total_wagered: f64,
    total_won: f64,
    drops: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pay out a landed drop and add it to the totals
    pub fn settle(&mut self, slot: usize, wager: f64, paytable: &Paytable) -> Settlement {
        let multiplier = paytable.multiplier(slot);
        let win = wager * multiplier;

        self.total_wagered += wager;
        self.total_won += win;
        self.drops += 1;

        Settlement {
            slot,
            multiplier,
            wager,
            win,
        }
    }

    pub fn total_wagered(&self) -> f64 {
        self.total_wagered
    }

    pub fn total_won(&self) -> f64 {
        self.total_won
    }

    /// Total won minus total wagered (negative when losing)
    pub fn net(&self) -> f64 {
        self.total_won - self.total_wagered
    }

    pub fn drops(&self) -> u64 {
        self.drops
    }

    /// Fraction of wagers paid back so far (0 before the first drop)
    pub fn return_ratio(&self) -> f64 {
        if self.total_wagered > 0.0 {
            self.total_won / self.total_wagered
        } else {
            0.0
        }
    }
}

/// Read the bet input
///
/// Accepts a leading number like `parseFloat` does (`"10$"` is 10). Empty,
/// non-numeric, zero, negative or non-finite input falls back to the default
/// wager.
pub fn parse_wager(input: &str) -> f64 {
    let text = input.trim();
    let value = text.parse::<f64>().ok().or_else(|| {
        let end = text
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        text[..end].parse::<f64>().ok()
    });

    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_WAGER,
    }
}
