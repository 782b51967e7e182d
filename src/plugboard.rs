//! Plugboard: reconfigurable involution applied around the rotor stack.

use crate::random::entropy::identity_table;
use crate::utils::ring::ALPHABET_SIZE;

/// Pairwise byte swaps applied before and after the rotor stack.
///
/// The table is an involution at all times and every byte is connected to at
/// most one other byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    table: [u8; ALPHABET_SIZE],
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugboard {
    /// Creates a plugboard with no connections (identity).
    pub fn new() -> Self {
        Plugboard {
            table: identity_table(),
        }
    }

    /// Removes every connection.
    pub fn reset(&mut self) {
        self.table = identity_table();
    }

    /// Connects `a` and `b`.
    ///
    /// A byte that is already connected is first disconnected from its
    /// current partner, which goes back to mapping to itself.
    ///
    /// # Returns
    /// `false` (and no change) for a self connection, `true` otherwise.
    pub fn connect(&mut self, a: u8, b: u8) -> bool {
        if a == b {
            return false;
        }
        self.disconnect(a);
        self.disconnect(b);
        self.table[a as usize] = b;
        self.table[b as usize] = a;
        true
    }

    /// Disconnects `value` and its partner, if any.
    pub fn disconnect(&mut self, value: u8) {
        let partner = self.table[value as usize];
        self.table[partner as usize] = partner;
        self.table[value as usize] = value;
    }

    /// Resets the plugboard and installs `pairs` in order.
    ///
    /// Self pairs are skipped. When two pairs share a byte the later one
    /// wins.
    ///
    /// # Returns
    /// The number of pairs that were installed.
    pub fn set_connections(&mut self, pairs: &[(u8, u8)]) -> usize {
        self.reset();
        pairs.iter().filter(|&&(a, b)| self.connect(a, b)).count()
    }

    /// Substitutes a single value.
    #[inline]
    pub fn swap(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// Returns the active connections, smaller byte first, ascending.
    pub fn connections(&self) -> Vec<(u8, u8)> {
        self.table
            .iter()
            .enumerate()
            .filter(|&(a, &b)| (a as u8) < b)
            .map(|(a, &b)| (a as u8, b))
            .collect()
    }

    /// Returns the full substitution table.
    pub fn as_table(&self) -> &[u8; ALPHABET_SIZE] {
        &self.table
    }
}
