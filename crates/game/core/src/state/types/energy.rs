//! Per-actor energy accumulator gating how many actions fit in one world tick.

/// Energy meter consulted by the turn engine.
///
/// # Invariants
///
/// - `energy` never goes negative: [`burn_turn`](Self::burn_turn) only
///   subtracts when at least `threshold` is available.
/// - `refill == 0` means the actor never reaches the threshold on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyMeter {
    pub energy: u32,
    pub refill: u32,
    pub threshold: u32,
}

impl EnergyMeter {
    /// Creates an empty meter. A zero threshold is raised to 1 so a tick always ends.
    pub const fn new(refill: u32, threshold: u32) -> Self {
        Self {
            energy: 0,
            refill,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Fills the meter as if a tick had just started, so the actor can act at once.
    #[must_use]
    pub const fn primed(mut self) -> Self {
        self.energy = self.refill;
        self
    }

    /// Start-of-tick replenishment.
    pub fn add_energy(&mut self) {
        self.energy = self.energy.saturating_add(self.refill);
    }

    /// Spends one action slot if available.
    ///
    /// Returns `false` and leaves the meter untouched when `energy < threshold`.
    pub fn burn_turn(&mut self) -> bool {
        if self.energy >= self.threshold {
            self.energy -= self.threshold;
            true
        } else {
            false
        }
    }

    /// Loop-exit condition for an actor's share of a tick.
    pub fn burned_out(&self) -> bool {
        self.energy < self.threshold
    }

    /// Stops the actor from acting again (used for corpses).
    pub fn drain(&mut self) {
        self.energy = 0;
        self.refill = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn burn_requires_threshold() {
        let mut meter = EnergyMeter::new(100, 100);
        assert!(meter.burned_out());
        assert!(!meter.burn_turn());
        assert_eq!(meter.energy, 0);

        meter.add_energy();
        assert!(!meter.burned_out());
        assert!(meter.burn_turn());
        assert_eq!(meter.energy, 0);
        assert!(meter.burned_out());
    }

    #[test]
    fn fast_actor_gets_two_slots() {
        let mut meter = EnergyMeter::new(200, 100);
        meter.add_energy();
        assert!(meter.burn_turn());
        assert!(meter.burn_turn());
        assert!(!meter.burn_turn());
    }

    #[test]
    fn zero_refill_never_acts() {
        let mut meter = EnergyMeter::new(0, 100);
        for _ in 0..1_000 {
            meter.add_energy();
            assert!(!meter.burn_turn());
        }
    }

    #[test]
    fn primed_meter_acts_immediately() {
        let mut meter = EnergyMeter::new(100, 100).primed();
        assert!(meter.burn_turn());
    }

    proptest! {
        #[test]
        fn burn_never_underflows(refill in 0u32..500, threshold in 1u32..500, ticks in 0usize..20) {
            let mut meter = EnergyMeter::new(refill, threshold);
            for _ in 0..ticks {
                meter.add_energy();
                let before = meter.energy;
                let burned = meter.burn_turn();
                prop_assert_eq!(burned, before >= threshold);
                if burned {
                    prop_assert_eq!(meter.energy, before - threshold);
                } else {
                    prop_assert_eq!(meter.energy, before);
                }
            }
        }
    }
}
