//! Slot distributions and expected return
//!
//! Backs the "the house always wins" messages with numbers: how often each
//! slot is hit, and what a unit wager returns on average.

use serde::{Deserialize, Serialize};

use crate::settings::{Settings, SettingsError};
use crate::sim::{Ball, Board, Paytable, RandomSigns, run_drop};

/// Landing counts per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotHistogram {
    counts: Vec<u64>,
}

impl SlotHistogram {
    pub fn new(slots: usize) -> Self {
        Self {
            counts: vec![0; slots],
        }
    }

    /// Count one landing (out-of-range slots are ignored)
    pub fn record(&mut self, slot: usize) {
        if let Some(count) = self.counts.get_mut(slot) {
            *count += 1;
        }
    }

    pub fn slots(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, slot: usize) -> u64 {
        self.counts.get(slot).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of landings in a slot (0 when empty)
    pub fn frequency(&self, slot: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(slot) as f64 / total as f64
        }
    }

    /// Average payout per unit wagered over the recorded drops
    pub fn expected_multiplier(&self, paytable: &Paytable) -> f64 {
        (0..self.slots())
            .map(|slot| self.frequency(slot) * paytable.multiplier(slot))
            .sum()
    }
}

/// Share of each wager the house keeps on average
pub fn house_edge(expected_multiplier: f64) -> f64 {
    1.0 - expected_multiplier
}

/// Ideal Galton-board distribution: `C(n, i) / 2^n` with `n = slots - 1`
pub fn binomial_slot_probabilities(slots: usize) -> Vec<f64> {
    if slots == 0 {
        return Vec::new();
    }
    let n = (slots - 1) as f64;
    let mut probabilities = Vec::with_capacity(slots);
    let mut p = 0.5f64.powf(n);
    for i in 0..slots {
        probabilities.push(p);
        p *= (n - i as f64) / (i as f64 + 1.0);
    }
    probabilities
}

/// Expected multiplier if landings followed the ideal binomial distribution
pub fn binomial_return(paytable: &Paytable) -> f64 {
    binomial_slot_probabilities(paytable.len())
        .iter()
        .zip(paytable.multipliers())
        .map(|(p, m)| p * m)
        .sum()
}

/// Run a batch of drops from the apex and histogram the landings
pub fn simulate(
    settings: &Settings,
    container_width: f32,
    drops: u32,
    seed: u64,
) -> Result<SlotHistogram, SettingsError> {
    settings.validate()?;
    let board = Board::from_container_width(settings, container_width);
    let mut signs = RandomSigns::seeded(seed);
    let mut histogram = SlotHistogram::new(board.slots);

    for _ in 0..drops {
        let mut ball = Ball::new(&board, settings);
        histogram.record(run_drop(&mut ball, &board, &mut signs));
    }

    log::info!(
        "Simulated {} drops (seed {}), expected multiplier {:.4}",
        drops,
        seed,
        histogram.expected_multiplier(&settings.paytable())
    );
    Ok(histogram)
}
