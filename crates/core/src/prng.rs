//! Seedable Xorshift64 generator behind every random choice in the crate.
//!
//! Template selection, palette jitter and use-case shuffling all draw from an
//! explicitly passed [`Xorshift64`], so a pinned seed reproduces a response
//! byte for byte.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a fixed non-zero value, since 0 is the
/// algorithm's only fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Seeds from the wall clock. Used when the operator does not pin a seed.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(Self::FALLBACK_SEED);
        Self::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in [0, len). Returns 0 when `len` is 0.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Picks one element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.next_index(items.len()))
        }
    }

    /// Picks one element of a non-empty static table, falling back to the
    /// first entry if the table is somehow empty.
    pub fn pick<T: Copy + Default>(&mut self, items: &[T]) -> T {
        self.choose(items).copied().unwrap_or_default()
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }

    /// Derives an independent generator, e.g. one per request.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_golden_value_for_seed_42() {
        // Pinned: changing this invalidates every seeded advice fixture.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn choose_on_empty_is_none() {
        let mut rng = Xorshift64::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn choose_visits_every_element_eventually() {
        let mut rng = Xorshift64::new(99);
        let items = ["a", "b", "c", "d"];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let picked = rng.choose(&items).unwrap();
            let idx = items.iter().position(|i| i == picked).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "{seen:?}");
    }

    #[test]
    fn pick_returns_member_of_table() {
        let mut rng = Xorshift64::new(5);
        let shifts = [-10.0, 0.0, 10.0];
        for _ in 0..50 {
            assert!(shifts.contains(&rng.pick(&shifts)));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Xorshift64::new(1234);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn fork_is_deterministic() {
        let mut a = Xorshift64::new(3);
        let mut b = Xorshift64::new(3);
        assert_eq!(a.fork().next_u64(), b.fork().next_u64());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }

            #[test]
            fn next_index_in_bounds(seed: u64, len in 1_usize..1000) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_index(len) < len);
                }
            }
        }
    }
}
