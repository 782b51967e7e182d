//! Rotor: a rotating byte permutation with a ring setting and a notch.
//!
//! A rotor owns its wiring (a fixed-point-free permutation of the byte
//! alphabet) and the cached inverse of that wiring. Substitution aligns the
//! incoming value to the rotor's electrical frame (`+ position - ring`),
//! looks it up, and realigns the result to the outer frame.

use std::fmt;

use crate::error::{Result, RotorMachineError};
use crate::random::entropy::{byte_permutation, EntropySource};
use crate::utils::ring::{self, ALPHABET_SIZE};

/// A single rotor of the machine.
#[derive(Clone, PartialEq, Eq)]
pub struct Rotor {
    wiring: [u8; ALPHABET_SIZE],
    reverse_wiring: [u8; ALPHABET_SIZE],
    position: u8,
    ring_setting: u8,
    notch: u8,
}

impl Rotor {
    /// Creates a rotor with a random fixed-point-free wiring.
    ///
    /// Position and ring setting start at 0.
    ///
    /// # Parameters
    /// - `entropy`: Source used to shuffle the wiring.
    /// - `notch`: Position whose departure steps the neighbouring rotor.
    pub fn random<E: EntropySource + ?Sized>(entropy: &mut E, notch: u8) -> Self {
        let mut wiring = byte_permutation(entropy);
        Self::remove_fixed_points(&mut wiring);
        Self::assemble(wiring, notch)
    }

    /// Creates a rotor from an explicit wiring table.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::InvalidWiring`] if `wiring` is not a
    /// permutation of `0..=255` or maps some value to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::Rotor;
    ///
    /// let mut wiring = [0u8; 256];
    /// for (i, slot) in wiring.iter_mut().enumerate() {
    ///     *slot = (i as u8).wrapping_add(1);
    /// }
    /// let rotor = Rotor::with_wiring(wiring, 0).unwrap();
    /// assert_eq!(rotor.forward(10), 11);
    /// assert_eq!(rotor.backward(11), 10);
    /// ```
    pub fn with_wiring(wiring: [u8; ALPHABET_SIZE], notch: u8) -> Result<Self> {
        let mut seen = [false; ALPHABET_SIZE];
        for (i, &target) in wiring.iter().enumerate() {
            if target as usize == i {
                return Err(RotorMachineError::InvalidWiring {
                    reason: format!("value {} maps to itself", i),
                });
            }
            if seen[target as usize] {
                return Err(RotorMachineError::InvalidWiring {
                    reason: format!("value {} is the target of more than one input", target),
                });
            }
            seen[target as usize] = true;
        }
        Ok(Self::assemble(wiring, notch))
    }

    /// Builds the rotor and its inverse table from a validated wiring.
    fn assemble(wiring: [u8; ALPHABET_SIZE], notch: u8) -> Self {
        let mut reverse_wiring = [0u8; ALPHABET_SIZE];
        for (i, &target) in wiring.iter().enumerate() {
            reverse_wiring[target as usize] = i as u8;
        }
        Rotor {
            wiring,
            reverse_wiring,
            position: 0,
            ring_setting: 0,
            notch,
        }
    }

    /// Repairs fixed points by swapping with the next slot (255 wraps to 0).
    ///
    /// Slot `i` holding `i` receives the old value of slot `i + 1`, which
    /// cannot be `i`, and slot `i + 1` receives `i`, which cannot equal
    /// `i + 1`. The swap therefore never creates a new fixed point.
    fn remove_fixed_points(wiring: &mut [u8; ALPHABET_SIZE]) {
        for i in 0..ALPHABET_SIZE {
            if wiring[i] as usize == i {
                let next = (i + 1) % ALPHABET_SIZE;
                wiring.swap(i, next);
            }
        }
        debug_assert!(wiring.iter().enumerate().all(|(i, &w)| w as usize != i));
    }

    // --- Getters and Setters ---

    /// Returns the current rotational position.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Sets the position, taken modulo 256.
    pub fn set_position(&mut self, position: i64) {
        self.position = ring::wrap(position);
    }

    /// Returns the ring setting.
    pub fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    /// Sets the ring setting, taken modulo 256.
    pub fn set_ring_setting(&mut self, setting: i64) {
        self.ring_setting = ring::wrap(setting);
    }

    /// Returns the notch position.
    pub fn notch(&self) -> u8 {
        self.notch
    }

    /// Returns the forward wiring table.
    pub fn wiring(&self) -> &[u8; ALPHABET_SIZE] {
        &self.wiring
    }

    /// Returns the inverse wiring table.
    pub fn reverse_wiring(&self) -> &[u8; ALPHABET_SIZE] {
        &self.reverse_wiring
    }

    /// Returns `true` when the rotor sits exactly on its notch.
    pub fn is_at_notch(&self) -> bool {
        self.position == self.notch
    }

    // --- Stepping ---

    /// Rotates the rotor by `step` positions and reports a notch crossing.
    ///
    /// The swept interval is half-open in ring order, with the lower end
    /// included and the upper end excluded:
    ///
    /// - advancing by `k`: crossed iff the notch is in `[old, old + k)`, so
    ///   leaving the notch crosses and landing on it does not;
    /// - retreating by `k`: crossed iff the notch is in `[old - k, old)`, so
    ///   landing on the notch crosses and backing off it does not.
    ///
    /// A step of 0 never crosses; a step of a full revolution or more
    /// always does.
    ///
    /// # Parameters
    /// - `step`: Number of positions to move (negative retreats).
    ///
    /// # Returns
    /// `true` if the notch was crossed.
    pub fn rotate(&mut self, step: i32) -> bool {
        let old = self.position;
        self.position = ring::wrap(i64::from(old) + i64::from(step));

        let span = step.unsigned_abs();
        if span == 0 {
            return false;
        }
        if span >= ALPHABET_SIZE as u32 {
            return true;
        }
        if step > 0 {
            // notch in [old, old + span)
            ring::distance(old, self.notch) < span
        } else {
            // notch in [old - span, old)
            let behind = ring::distance(self.notch, old);
            behind >= 1 && behind <= span
        }
    }

    // --- Substitution ---

    /// Substitutes a value right-to-left through the wiring.
    #[inline]
    pub fn forward(&self, value: u8) -> u8 {
        let shifted = ring::enter_frame(value, self.position, self.ring_setting);
        let wired = self.wiring[shifted as usize];
        ring::leave_frame(wired, self.position, self.ring_setting)
    }

    /// Substitutes a value left-to-right through the inverse wiring.
    ///
    /// At a fixed position and ring setting this is the exact inverse of
    /// [`forward`](Self::forward).
    #[inline]
    pub fn backward(&self, value: u8) -> u8 {
        let shifted = ring::enter_frame(value, self.position, self.ring_setting);
        let wired = self.reverse_wiring[shifted as usize];
        ring::leave_frame(wired, self.position, self.ring_setting)
    }
}

impl fmt::Debug for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotor")
            .field("position", &self.position)
            .field("ring_setting", &self.ring_setting)
            .field("notch", &self.notch)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rotor(pos={:02X}, notch={:02X}, ring={:02X})",
            self.position, self.notch, self.ring_setting
        )
    }
}

impl Drop for Rotor {
    /// Clears the wiring tables on drop.
    fn drop(&mut self) {
        self.wiring.fill(0);
        self.reverse_wiring.fill(0);
        self.position = 0;
        self.ring_setting = 0;
        self.notch = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::mersenne_twister::MersenneTwisterPlus;

    fn shift_by_one() -> [u8; ALPHABET_SIZE] {
        let mut wiring = [0u8; ALPHABET_SIZE];
        for (i, slot) in wiring.iter_mut().enumerate() {
            *slot = (i as u8).wrapping_add(1);
        }
        wiring
    }

    #[test]
    fn test_random_wiring_has_no_fixed_points() {
        for seed in 0..50 {
            let mut mt = MersenneTwisterPlus::with_seed(seed);
            let rotor = Rotor::random(&mut mt, 0);
            for (i, &w) in rotor.wiring().iter().enumerate() {
                assert_ne!(w as usize, i, "fixed point at {} for seed {}", i, seed);
            }
        }
    }

    #[test]
    fn test_reverse_wiring_is_inverse() {
        let mut mt = MersenneTwisterPlus::with_seed(77);
        let rotor = Rotor::random(&mut mt, 0);
        for x in 0..=255u8 {
            assert_eq!(rotor.reverse_wiring()[rotor.wiring()[x as usize] as usize], x);
        }
    }

    #[test]
    fn test_remove_fixed_points_identity() {
        // Worst case: every slot is a fixed point, including the 255 -> 0 wrap.
        let mut wiring = crate::random::entropy::identity_table();
        Rotor::remove_fixed_points(&mut wiring);
        let rotor = Rotor::with_wiring(wiring, 0).unwrap();
        assert_eq!(rotor.wiring().len(), ALPHABET_SIZE);
    }

    #[test]
    fn test_remove_fixed_points_last_slot() {
        let mut wiring = shift_by_one();
        // Make 255 a fixed point and keep the table a permutation.
        let holder = wiring.iter().position(|&w| w == 255).unwrap();
        wiring.swap(holder, 255);
        assert_eq!(wiring[255], 255);
        Rotor::remove_fixed_points(&mut wiring);
        assert_ne!(wiring[255], 255);
        assert_ne!(wiring[0], 0);
    }

    #[test]
    fn test_with_wiring_rejects_fixed_point() {
        let wiring = crate::random::entropy::identity_table();
        assert!(matches!(
            Rotor::with_wiring(wiring, 0),
            Err(RotorMachineError::InvalidWiring { .. })
        ));
    }

    #[test]
    fn test_with_wiring_rejects_duplicates() {
        let mut wiring = shift_by_one();
        wiring[0] = 2; // 2 is now the image of both 0 and 1
        assert!(matches!(
            Rotor::with_wiring(wiring, 0),
            Err(RotorMachineError::InvalidWiring { .. })
        ));
    }

    #[test]
    fn test_set_position_wraps() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 0).unwrap();
        rotor.set_position(300);
        assert_eq!(rotor.position(), 44);
        rotor.set_position(-1);
        assert_eq!(rotor.position(), 255);
        rotor.set_ring_setting(512 + 3);
        assert_eq!(rotor.ring_setting(), 3);
    }

    #[test]
    fn test_forward_backward_inverse_all_frames() {
        let mut mt = MersenneTwisterPlus::with_seed(1);
        let mut rotor = Rotor::random(&mut mt, 40);
        for (pos, ring) in [(0, 0), (1, 0), (0, 1), (128, 77), (255, 255)] {
            rotor.set_position(pos);
            rotor.set_ring_setting(ring);
            for x in 0..=255u8 {
                assert_eq!(rotor.backward(rotor.forward(x)), x);
                assert_eq!(rotor.forward(rotor.backward(x)), x);
            }
        }
    }

    #[test]
    fn test_forward_shift_wiring_arithmetic() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 0).unwrap();
        rotor.set_position(5);
        rotor.set_ring_setting(2);
        // shifted = 10 + 5 - 2 = 13, wired = 14, out = 14 - 5 + 2 = 11
        assert_eq!(rotor.forward(10), 11);
        assert_eq!(rotor.forward(255), 0);
        assert_eq!(rotor.backward(0), 255);
    }

    #[test]
    fn test_rotate_leaving_notch_crosses() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 10).unwrap();
        rotor.set_position(10);
        assert!(rotor.rotate(1));
        assert_eq!(rotor.position(), 11);
    }

    #[test]
    fn test_rotate_landing_on_notch_does_not_cross() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 10).unwrap();
        rotor.set_position(9);
        assert!(!rotor.rotate(1));
        assert!(rotor.is_at_notch());
    }

    #[test]
    fn test_rotate_wraparound() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 255).unwrap();
        rotor.set_position(255);
        assert!(rotor.rotate(1));
        assert_eq!(rotor.position(), 0);

        let mut rotor = Rotor::with_wiring(shift_by_one(), 0).unwrap();
        rotor.set_position(250);
        assert!(rotor.rotate(10));
        assert_eq!(rotor.position(), 4);
    }

    #[test]
    fn test_rotate_multi_step_interval() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 20).unwrap();
        rotor.set_position(15);
        assert!(rotor.rotate(6)); // [15, 21) holds the notch
        rotor.set_position(15);
        assert!(!rotor.rotate(5)); // [15, 20) excludes the notch
    }

    #[test]
    fn test_rotate_backward() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 20).unwrap();
        rotor.set_position(21);
        assert!(rotor.rotate(-1)); // [20, 21) holds the notch
        assert_eq!(rotor.position(), 20);
        assert!(!rotor.rotate(-1)); // [19, 20) excludes the notch
        assert_eq!(rotor.position(), 19);

        let mut rotor = Rotor::with_wiring(shift_by_one(), 255).unwrap();
        rotor.set_position(1);
        assert!(rotor.rotate(-2)); // [255, 1) wraps over the notch
    }

    #[test]
    fn test_rotate_interval_direction() {
        // Moving off the notch crosses forwards but not backwards; moving
        // onto it crosses backwards but not forwards.
        let mut rotor = Rotor::with_wiring(shift_by_one(), 20).unwrap();
        rotor.set_position(20);
        assert!(rotor.rotate(1));
        rotor.set_position(20);
        assert!(!rotor.rotate(-1));
        rotor.set_position(19);
        assert!(!rotor.rotate(1));
        rotor.set_position(21);
        assert!(rotor.rotate(-1));

        // Multi-step retreat: [10, 20) excludes 20, [10, 21) holds it.
        rotor.set_position(20);
        assert!(!rotor.rotate(-10));
        rotor.set_position(21);
        assert!(rotor.rotate(-11));
    }

    #[test]
    fn test_rotate_zero_and_full_turn() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 3).unwrap();
        rotor.set_position(3);
        assert!(!rotor.rotate(0));
        assert!(rotor.rotate(256));
        assert_eq!(rotor.position(), 3);
        assert!(rotor.rotate(-300));
    }

    #[test]
    fn test_display() {
        let mut rotor = Rotor::with_wiring(shift_by_one(), 0x55).unwrap();
        rotor.set_position(10);
        assert_eq!(format!("{}", rotor), "Rotor(pos=0A, notch=55, ring=00)");
    }
}
