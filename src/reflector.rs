//! Reflector: the fixed involution between the forward and backward passes.

use crate::error::{Result, RotorMachineError};
use crate::random::entropy::{byte_permutation, identity_table, EntropySource};
use crate::utils::ring::ALPHABET_SIZE;

/// Fixed involutory permutation of the byte alphabet.
///
/// A random reflector pairs all 256 values into 128 disjoint swaps, so it
/// has no fixed points. A reflector built from explicit pairs maps every
/// byte not named in a pair to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    table: [u8; ALPHABET_SIZE],
}

impl Reflector {
    /// Creates a reflector from 128 random disjoint pairs.
    ///
    /// The byte values are shuffled and consecutive slots are paired.
    pub fn random<E: EntropySource + ?Sized>(entropy: &mut E) -> Self {
        let order = byte_permutation(entropy);
        let mut table = [0u8; ALPHABET_SIZE];
        for pair in order.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);
            table[a as usize] = b;
            table[b as usize] = a;
        }
        Reflector { table }
    }

    /// Creates a reflector from explicit disjoint pairs.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::InvalidReflectorPair`] for a self pair
    /// or for a pair that names a byte already used by an earlier pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::Reflector;
    ///
    /// let reflector = Reflector::from_pairs(&[(0, 1)]).unwrap();
    /// assert_eq!(reflector.reflect(0), 1);
    /// assert_eq!(reflector.reflect(1), 0);
    /// assert_eq!(reflector.reflect(2), 2);
    ///
    /// assert!(Reflector::from_pairs(&[(0, 1), (1, 2)]).is_err());
    /// ```
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Result<Self> {
        let mut table = identity_table();
        let mut used = [false; ALPHABET_SIZE];
        for &(a, b) in pairs {
            if a == b || used[a as usize] || used[b as usize] {
                return Err(RotorMachineError::InvalidReflectorPair { a, b });
            }
            used[a as usize] = true;
            used[b as usize] = true;
            table[a as usize] = b;
            table[b as usize] = a;
        }
        Ok(Reflector { table })
    }

    /// Reflects a single value.
    #[inline]
    pub fn reflect(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// Returns the full reflection table.
    pub fn as_table(&self) -> &[u8; ALPHABET_SIZE] {
        &self.table
    }
}
