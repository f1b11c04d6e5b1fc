use std::marker::PhantomData;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::models::keys::HandleKey;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyGenerationError {
    #[error("no unused key found after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    #[error("invalid key range {lower}..={upper}")]
    InvalidRange { lower: u64, upper: u64 },
}

/// Allocates handles from a bounded inclusive range, skipping live values.
///
/// A cursor starts at the range's lower bound. Each call probes forward from
/// the cursor (wrapping at the upper bound) for at most one full sweep,
/// returns the first value not reported live, and leaves the cursor just
/// past it. Assignment is therefore monotonically increasing with
/// wraparound. A failed sweep leaves the cursor where it was.
///
/// Nothing is persisted: a new generator starts over at the lower bound.
#[derive(Debug, Clone)]
pub struct KeyGenerator<K: HandleKey> {
    lower: u64,
    width: u64,
    /// Offset of the next candidate from `lower`, always `< width`.
    cursor: u64,
    _key: PhantomData<K>,
}

impl<K: HandleKey> KeyGenerator<K> {
    /// `range` must be non-empty and must not contain `K::SENTINEL`.
    pub fn new(range: RangeInclusive<K>) -> Result<Self, KeyGenerationError> {
        let lower = range.start().to_u64();
        let upper = range.end().to_u64();
        if lower > upper || range.end().is_sentinel() {
            return Err(KeyGenerationError::InvalidRange { lower, upper });
        }
        Ok(Self {
            lower,
            width: upper - lower + 1,
            cursor: 0,
            _key: PhantomData,
        })
    }

    pub fn generate(&mut self, is_live: impl Fn(K) -> bool) -> Result<K, KeyGenerationError> {
        for attempt in 0..self.width {
            let offset = (self.cursor + attempt) % self.width;
            let candidate = K::from_u64(self.lower + offset);
            if !is_live(candidate) {
                self.cursor = (offset + 1) % self.width;
                return Ok(candidate);
            }
        }
        Err(KeyGenerationError::AttemptsExhausted {
            attempts: self.width,
        })
    }

    /// The first value the next call to `generate` will probe.
    pub fn peek(&self) -> K {
        K::from_u64(self.lower + self.cursor)
    }

    /// Number of distinct handles in the range.
    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn contains(&self, key: K) -> bool {
        let value = key.to_u64();
        value >= self.lower && value - self.lower < self.width
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sequential_allocation_from_lower_bound() {
        let mut generator = KeyGenerator::<u8>::new(3..=10).unwrap();
        let mut live = HashSet::new();
        for expected in 3..=5u8 {
            let key = generator.generate(|k| live.contains(&k)).unwrap();
            assert_eq!(key, expected);
            live.insert(key);
        }
    }

    #[test]
    fn skips_live_keys() {
        let mut generator = KeyGenerator::<u16>::new(0..=9).unwrap();
        let live: HashSet<u16> = [0, 1, 2, 4].into_iter().collect();

        assert_eq!(generator.generate(|k| live.contains(&k)), Ok(3));
        assert_eq!(generator.generate(|k| live.contains(&k)), Ok(5));
    }

    #[test]
    fn wraps_around_and_reuses_freed_keys() {
        let mut generator = KeyGenerator::<u8>::new(0..=2).unwrap();
        let mut live = HashSet::new();
        for _ in 0..3 {
            let key = generator.generate(|k| live.contains(&k)).unwrap();
            live.insert(key);
        }

        live.remove(&1);
        // cursor wrapped to 0, which is live; 1 is the first free value
        assert_eq!(generator.generate(|k| live.contains(&k)), Ok(1));
    }

    #[test]
    fn freed_key_is_not_reused_before_the_cursor_wraps() {
        let mut generator = KeyGenerator::<u8>::new(0..=9).unwrap();
        let mut live = HashSet::new();
        let first = generator.generate(|k| live.contains(&k)).unwrap();
        live.insert(first);
        let second = generator.generate(|k| live.contains(&k)).unwrap();
        live.insert(second);

        live.remove(&first);
        assert_eq!(generator.generate(|k| live.contains(&k)), Ok(2));
    }

    #[test]
    fn exhaustion_fails_and_keeps_cursor() {
        let mut generator = KeyGenerator::<u8>::new(0..=3).unwrap();
        let mut live = HashSet::new();
        for _ in 0..4 {
            let key = generator.generate(|k| live.contains(&k)).unwrap();
            live.insert(key);
        }
        let cursor_before = generator.peek();

        let err = generator.generate(|k| live.contains(&k)).unwrap_err();
        assert_eq!(err, KeyGenerationError::AttemptsExhausted { attempts: 4 });
        assert_eq!(generator.peek(), cursor_before);
    }

    #[test]
    fn single_value_range_is_exhausted_after_first_use() {
        let mut generator = KeyGenerator::<u16>::new(7..=7).unwrap();
        let mut live = HashSet::new();

        let key = generator.generate(|k| live.contains(&k)).unwrap();
        assert_eq!(key, 7);
        live.insert(key);

        assert!(generator.generate(|k| live.contains(&k)).is_err());

        live.clear();
        assert_eq!(generator.generate(|k| live.contains(&k)), Ok(7));
    }

    #[test]
    fn never_issues_the_sentinel() {
        let mut generator = KeyGenerator::<u8>::new(0..=254).unwrap();
        let mut live = HashSet::new();
        while let Ok(key) = generator.generate(|k| live.contains(&k)) {
            assert_ne!(key, u8::MAX);
            assert!(live.insert(key), "key {key} issued twice");
        }
        assert_eq!(live.len(), 255);
    }

    #[test]
    fn rejects_ranges_touching_the_sentinel() {
        assert!(KeyGenerator::<u8>::new(0..=255).is_err());
        assert!(matches!(
            KeyGenerator::<u16>::new(5..=4),
            Err(KeyGenerationError::InvalidRange { lower: 5, upper: 4 })
        ));
    }

    #[test]
    fn contains_checks_range_membership() {
        let generator = KeyGenerator::<u16>::new(10..=20).unwrap();
        assert!(generator.contains(10));
        assert!(generator.contains(20));
        assert!(!generator.contains(9));
        assert!(!generator.contains(21));
    }
}
