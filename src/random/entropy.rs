//! Entropy source trait and permutation helpers.
//!
//! Every randomized construction in the crate (rotor wirings, reflector
//! pairings, random start positions) draws from an explicit
//! [`EntropySource`] handed in by the caller. Nothing reads an ambient global
//! generator, so a fixed seed reproduces a machine exactly.

use crate::utils::ring::ALPHABET_SIZE;

/// Source of pseudorandom values used to build machine parts.
///
/// Implementations only need [`next_u64`](Self::next_u64); the bounded and
/// byte draws have default implementations built on it.
pub trait EntropySource {
    /// Returns the next 64-bit pseudorandom value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed value in `[0, bound)`.
    ///
    /// A `bound` of 0 or 1 always yields 0.
    fn next_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        let n = bound as u64;
        let limit = u64::MAX - (u64::MAX % n);
        loop {
            let v = self.next_u64();
            if v < limit {
                return (v % n) as usize;
            }
        }
    }

    /// Returns a pseudorandom byte (taken from the high bits).
    fn next_byte(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn next_below(&mut self, bound: usize) -> usize {
        (**self).next_below(bound)
    }

    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}

/// Shuffles `values` in place (Fisher-Yates).
pub fn shuffle<E: EntropySource + ?Sized>(entropy: &mut E, values: &mut [u8]) {
    for i in (1..values.len()).rev() {
        let k = entropy.next_below(i + 1);
        values.swap(i, k);
    }
}

/// Returns a uniformly random permutation of every byte value.
pub fn byte_permutation<E: EntropySource + ?Sized>(entropy: &mut E) -> [u8; ALPHABET_SIZE] {
    let mut table = identity_table();
    shuffle(entropy, &mut table);
    table
}

/// Returns the identity table `[0, 1, ..., 255]`.
pub(crate) fn identity_table() -> [u8; ALPHABET_SIZE] {
    let mut table = [0u8; ALPHABET_SIZE];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = i as u8;
    }
    table
}
