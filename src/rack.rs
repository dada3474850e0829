//! The coderack: a priority-weighted stochastic task pool.
//!
//! `Rack<T>` holds `(item, urgency)` pairs and draws one item at a time with probability
//! proportional to its urgency among everything still in the pool. No exhaustive search, no
//! insertion-order scheduling: the entire engine's "randomness with a thumb on the scale" feel
//! comes from this one data structure.

use crate::Urgency;
use rand::Rng;

pub const URGENCY_MICRO: Urgency = 1;
pub const URGENCY_LOW: Urgency = 10;
pub const URGENCY_MID: Urgency = 30;
pub const URGENCY_HIGH: Urgency = 70;
pub const URGENCY_HIGHEST: Urgency = 100;

/// a flat, unordered, draw-without-replacement weighted pool
pub struct Rack<T> {
    items: Vec<(T, Urgency)>,
}

impl<T> Rack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// urgency must be positive; a zero-urgency item could never be drawn and would only
    /// ever pad `len()`, so we reject it rather than silently accept dead weight
    pub fn add(&mut self, item: T, urgency: Urgency) {
        debug_assert!(urgency > 0, "urgency must be a positive integer");
        self.items.push((item, urgency));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// remove and return one item, drawn with probability proportional to urgency.
    /// ties among the accumulated range are broken by insertion order.
    ///
    /// # Panics
    /// panics if the pool is empty; callers must gate on `len() > 0`.
    pub fn take(&mut self, rng: &mut impl Rng) -> T {
        assert!(!self.items.is_empty(), "Rack::take on empty pool");
        let total: Urgency = self.items.iter().map(|(_, u)| *u).sum();
        let mut threshold = rng.random_range(1..=total);
        let mut index = self.items.len() - 1;
        for (i, (_, urgency)) in self.items.iter().enumerate() {
            if threshold <= *urgency {
                index = i;
                break;
            }
            threshold -= urgency;
        }
        self.items.remove(index).0
    }

    pub fn iter(&self) -> impl Iterator<Item = &(T, Urgency)> {
        self.items.iter()
    }
}

impl<T> Default for Rack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draws_proportional_to_urgency() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut counts = [0usize; 3];
        const DRAWS: usize = 20_000;
        for _ in 0..DRAWS {
            let mut rack = Rack::new();
            rack.add(0usize, URGENCY_LOW); // weight 10
            rack.add(1usize, URGENCY_MID); // weight 30
            rack.add(2usize, URGENCY_HIGH); // weight 70
            counts[rack.take(&mut rng)] += 1;
        }
        let total = (URGENCY_LOW + URGENCY_MID + URGENCY_HIGH) as f64;
        for (i, expected_weight) in [URGENCY_LOW, URGENCY_MID, URGENCY_HIGH].iter().enumerate() {
            let observed = counts[i] as f64 / DRAWS as f64;
            let expected = *expected_weight as f64 / total;
            assert!(
                (observed - expected).abs() < 0.02,
                "bucket {i}: observed {observed:.3}, expected {expected:.3}"
            );
        }
    }

    #[test]
    fn take_removes_item() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut rack = Rack::new();
        rack.add("only", URGENCY_LOW);
        assert_eq!(rack.take(&mut rng), "only");
        assert_eq!(rack.len(), 0);
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn take_on_empty_panics() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut rack: Rack<()> = Rack::new();
        rack.take(&mut rng);
    }
}
