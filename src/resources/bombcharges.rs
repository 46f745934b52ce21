//! Regenerating bomb charges.
//!
//! The player carries at most [`MAX_CHARGES`] bombs. One charge comes back
//! every [`RECHARGE_INTERVAL`] seconds while below the cap. Spending is
//! always explicit through [`BombCharges::try_spend`].

/// Maximum number of bombs held at once.
pub const MAX_CHARGES: u32 = 5;
/// Seconds needed to regain one charge.
pub const RECHARGE_INTERVAL: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombCharges {
    current: u32,
    accumulator: f32,
}

impl Default for BombCharges {
    fn default() -> Self {
        Self::new()
    }
}

impl BombCharges {
    /// Start full, with an empty regen timer.
    pub fn new() -> Self {
        BombCharges {
            current: MAX_CHARGES,
            accumulator: 0.0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Seconds accumulated toward the next charge.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Advance the regen timer by `dt` seconds. Returns true if a charge was
    /// regained.
    ///
    /// At the cap the timer keeps running, so the first tick after a spend
    /// may regain the charge right away.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= RECHARGE_INTERVAL && self.current < MAX_CHARGES {
            self.current += 1;
            self.accumulator = 0.0;
            return true;
        }
        false
    }

    /// Use one charge if any is left.
    pub fn try_spend(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_until_empty_then_refuse() {
        let mut charges = BombCharges::new();
        for _ in 0..MAX_CHARGES {
            assert!(charges.try_spend());
        }
        assert_eq!(charges.current(), 0);
        assert!(!charges.try_spend());
        assert_eq!(charges.current(), 0);
    }

    #[test]
    fn regains_one_charge_per_interval() {
        let mut charges = BombCharges::new();
        charges.try_spend();
        charges.try_spend();
        assert!(!charges.tick(9.5));
        assert_eq!(charges.current(), 3);
        assert!(charges.tick(0.5));
        assert_eq!(charges.current(), 4);
        assert_eq!(charges.accumulator(), 0.0);
        assert!(!charges.tick(5.0));
        assert_eq!(charges.current(), 4);
    }

    #[test]
    fn full_charges_do_not_overflow() {
        let mut charges = BombCharges::new();
        for _ in 0..12 {
            charges.tick(1.0);
        }
        assert_eq!(charges.current(), MAX_CHARGES);

        // The timer kept running at the cap, so the spent charge comes back on the next tick.
        assert!(charges.try_spend());
        assert_eq!(charges.current(), MAX_CHARGES - 1);
        assert!(charges.tick(0.016));
        assert_eq!(charges.current(), MAX_CHARGES);
    }

    #[test]
    fn count_stays_in_range_over_mixed_frames() {
        let mut charges = BombCharges::new();
        for frame in 0..2_000 {
            charges.tick(0.1);
            if frame % 7 == 0 {
                charges.try_spend();
            }
            assert!(charges.current() <= MAX_CHARGES);
        }
    }

    #[test]
    fn reset_restores_full_charges() {
        let mut charges = BombCharges::new();
        charges.try_spend();
        charges.tick(3.0);
        charges.reset();
        assert_eq!(charges, BombCharges::new());
    }
}
