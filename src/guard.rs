//! Anti dead-code-elimination guard.
//!
//! A timed loop that computes a digest and throws it away can be optimised
//! into an empty loop. Folding a slice of every digest into a counter that
//! is inspected after the loop keeps the hashing observable.

use std::hint::black_box;

use crate::BenchError;

/// Run-scoped wrapping sum of digest slices.
///
/// One accumulator belongs to exactly one case run (see [`crate::Session`]).
/// A sum of zero at the end marks the run as suspect. This is not a
/// correctness check: a real zero sum is possible, just astronomically
/// unlikely for any hash on non-degenerate input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Accumulator {
    sum: u64,
    feeds: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn add(&mut self, value: u64) {
        self.sum = self.sum.wrapping_add(black_box(value));
        self.feeds += 1;
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Number of values folded in so far.
    pub fn feeds(&self) -> u64 {
        self.feeds
    }

    /// Ends the run: returns the sum, or [`BenchError::GuardFailure`] if it is zero.
    pub fn check(&self) -> Result<u64, BenchError> {
        if self.sum == 0 {
            return Err(BenchError::GuardFailure {
                iterations: self.feeds,
            });
        }
        Ok(self.sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stream_fails() {
        let mut acc = Accumulator::new();
        for _ in 0..1_000 {
            acc.add(0);
        }
        match acc.check() {
            Err(BenchError::GuardFailure { iterations }) => assert_eq!(iterations, 1_000),
            other => panic!("expected guard failure, got {:?}", other),
        }
    }

    #[test]
    fn untouched_guard_fails() {
        assert!(matches!(
            Accumulator::new().check(),
            Err(BenchError::GuardFailure { iterations: 0 })
        ));
    }

    #[test]
    fn single_non_zero_value_passes() {
        let mut acc = Accumulator::new();
        acc.add(0);
        acc.add(0x2a);
        acc.add(0);
        assert_eq!(acc.check().unwrap(), 0x2a);
        assert_eq!(acc.feeds(), 3);
    }

    #[test]
    fn sum_wraps_instead_of_overflowing() {
        let mut acc = Accumulator::new();
        acc.add(u64::MAX);
        acc.add(3);
        assert_eq!(acc.sum(), 2);
        // wrapping back onto zero is the one false negative the guard accepts
        acc.add(u64::MAX - 1);
        assert!(acc.check().is_err());
    }
}
