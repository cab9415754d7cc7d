use super::rng::{RngOracle, RollContext, compute_seed};

/// Seed plus roll sequence number. Lives in the battle state so that a
/// match is replayable from its seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollCounter {
    seed: u64,
    nonce: u64,
}

impl RollCounter {
    pub const fn new(seed: u64) -> Self {
        Self { seed, nonce: 0 }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rolls made so far.
    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, context as u32);
        self.nonce += 1;
        seed
    }
}

/// Short-lived roll handle binding an oracle to a counter.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    counter: &'a mut RollCounter,
    context: RollContext,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, counter: &'a mut RollCounter, context: RollContext) -> Self {
        Self {
            rng,
            counter,
            context,
        }
    }

    /// Uniform value in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        let seed = self.counter.next_seed(self.context);
        self.rng.below(seed, bound)
    }

    /// Uniform value in `0..100`.
    pub fn percent(&mut self) -> u32 {
        self.below(100)
    }

    pub fn pick<'t, T>(&mut self, items: &'t [T]) -> Option<&'t T> {
        if items.is_empty() {
            return None;
        }
        let index = self.below(items.len() as u32) as usize;
        items.get(index)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn same_seed_same_rolls() {
        let mut a = RollCounter::new(7);
        let mut b = RollCounter::new(7);
        let rolls_a: Vec<u32> = {
            let mut dice = Dice::new(&PcgRng, &mut a, RollContext::Dodge);
            (0..20).map(|_| dice.percent()).collect()
        };
        let rolls_b: Vec<u32> = {
            let mut dice = Dice::new(&PcgRng, &mut b, RollContext::Dodge);
            (0..20).map(|_| dice.percent()).collect()
        };
        assert_eq!(rolls_a, rolls_b);
        assert_eq!(a.nonce(), 20);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut counter = RollCounter::new(99);
        let mut dice = Dice::new(&PcgRng, &mut counter, RollContext::Layout);
        let mut items: Vec<u32> = (0..10).collect();
        dice.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }
}
