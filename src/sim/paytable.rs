//! Slot multiplier table

use serde::{Deserialize, Serialize};

/// Colour class of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotTier {
    /// Pays 2x or more
    High,
    /// Returns at least the wager
    Even,
    /// Returns less than the wager
    Loss,
}

impl SlotTier {
    pub fn for_multiplier(multiplier: f64) -> Self {
        if multiplier >= 2.0 {
            SlotTier::High
        } else if multiplier >= 1.0 {
            SlotTier::Even
        } else {
            SlotTier::Loss
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotTier::High => "high",
            SlotTier::Even => "even",
            SlotTier::Loss => "loss",
        }
    }
}

/// Payout multipliers, one per slot, left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paytable {
    multipliers: Vec<f64>,
}

impl Paytable {
    pub fn new(multipliers: Vec<f64>) -> Self {
        Self { multipliers }
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    /// Multiplier of a slot (0 for out-of-range slots)
    pub fn multiplier(&self, slot: usize) -> f64 {
        self.multipliers.get(slot).copied().unwrap_or(0.0)
    }

    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    pub fn tier(&self, slot: usize) -> SlotTier {
        SlotTier::for_multiplier(self.multiplier(slot))
    }

    /// Text shown on a slot, e.g. `0.5x`
    pub fn label(&self, slot: usize) -> String {
        format!("{}x", self.multiplier(slot))
    }

    /// True if the table mirrors around its center
    pub fn is_symmetric(&self) -> bool {
        self.multipliers
            .iter()
            .zip(self.multipliers.iter().rev())
            .all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MULTIPLIERS;

    #[test]
    fn test_default_table() {
        let table = Paytable::new(MULTIPLIERS.to_vec());
        assert_eq!(table.len(), 9);
        assert!(table.is_symmetric());
        assert_eq!(table.multiplier(0), 5.0);
        assert_eq!(table.multiplier(4), 0.2);
        assert_eq!(table.multiplier(42), 0.0);
    }

    #[test]
    fn test_tiers_and_labels() {
        let table = Paytable::new(MULTIPLIERS.to_vec());
        assert_eq!(table.tier(0), SlotTier::High);
        assert_eq!(table.tier(1), SlotTier::High);
        assert_eq!(table.tier(2), SlotTier::Even);
        assert_eq!(table.tier(3), SlotTier::Loss);
        assert_eq!(table.tier(4), SlotTier::Loss);

        assert_eq!(table.label(0), "5x");
        assert_eq!(table.label(3), "0.5x");
        assert_eq!(table.label(4), "0.2x");
    }

    #[test]
    fn test_asymmetric_table() {
        assert!(!Paytable::new(vec![1.0, 2.0]).is_symmetric());
        assert!(Paytable::new(vec![3.0]).is_symmetric());
    }
}
