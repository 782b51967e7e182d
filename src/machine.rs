//! RotorMachine: rotor stack, reflector and plugboard.
//!
//! Orchestrates N rotors with the odometer stepping rule (including the
//! double-step anomaly), a fixed reflector and a reconfigurable plugboard.
//! Every stage is an involution, so encryption and decryption are the same
//! pipeline.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Result, RotorMachineError};
use crate::plugboard::Plugboard;
use crate::random::entropy::EntropySource;
use crate::random::mersenne_twister::MersenneTwisterPlus;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::utils::converter;
use crate::utils::ring::{self, ALPHABET_SIZE};

/// Enigma-style rotor machine over the 256-value byte alphabet.
///
/// # Stepping
///
/// Before each character the rightmost rotor advances one step. The
/// second-to-last rotor advances when the rightmost one leaves its notch,
/// or unconditionally when it is itself sitting on its notch (double-step
/// anomaly). When the second-to-last rotor leaves its notch, the
/// third-to-last rotor advances once. Rotors further left never step.
///
/// # Round trips
///
/// Each call advances the rotors, so a message is decrypted by running the
/// ciphertext through a machine in the same starting state that encrypted
/// it.
///
/// ```
/// use rotormachine::RotorMachine;
///
/// let mut machine = RotorMachine::with_seed(3, 42).unwrap();
/// machine.set_rotor_positions(&[1, 2, 3]).unwrap();
/// let ciphertext = machine.process_bytes(b"attack at dawn");
///
/// machine.set_rotor_positions(&[1, 2, 3]).unwrap();
/// assert_eq!(machine.process_bytes(&ciphertext), b"attack at dawn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorMachine {
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
}

impl RotorMachine {
    /// Creates a machine with `rotor_count` random rotors.
    ///
    /// The reflector is drawn first, then the rotors left to right. Rotor
    /// `i` gets the notch `i * (256 / N) mod 256`. The plugboard starts
    /// empty and every position and ring setting starts at 0.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::InvalidRotorCount`] if `rotor_count < 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::random::mersenne_twister::MersenneTwisterPlus;
    /// use rotormachine::RotorMachine;
    ///
    /// let mut entropy = MersenneTwisterPlus::with_seed(7);
    /// let machine = RotorMachine::new(3, &mut entropy).unwrap();
    /// assert_eq!(machine.notches(), vec![0, 85, 170]);
    ///
    /// assert!(RotorMachine::new(0, &mut entropy).is_err());
    /// ```
    pub fn new<E: EntropySource + ?Sized>(rotor_count: usize, entropy: &mut E) -> Result<Self> {
        if rotor_count < 1 {
            debug!(rotor_count, "rejected rotor count");
            return Err(RotorMachineError::InvalidRotorCount { count: rotor_count });
        }

        let reflector = Reflector::random(entropy);
        let spacing = ALPHABET_SIZE / rotor_count;
        let rotors = (0..rotor_count)
            .map(|i| Rotor::random(entropy, ((i * spacing) % ALPHABET_SIZE) as u8))
            .collect();

        debug!(rotor_count, "built rotor machine");
        Ok(RotorMachine {
            rotors,
            reflector,
            plugboard: Plugboard::new(),
        })
    }

    /// Creates a machine from a deterministic Mersenne Twister seed.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::InvalidRotorCount`] if `rotor_count < 1`.
    pub fn with_seed(rotor_count: usize, seed: u64) -> Result<Self> {
        let mut entropy = MersenneTwisterPlus::with_seed(seed);
        Self::new(rotor_count, &mut entropy)
    }

    /// Assembles a machine from explicit rotors (left to right) and a
    /// reflector. The plugboard starts empty.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::InvalidRotorCount`] if `rotors` is empty.
    pub fn from_parts(rotors: Vec<Rotor>, reflector: Reflector) -> Result<Self> {
        if rotors.is_empty() {
            return Err(RotorMachineError::InvalidRotorCount { count: 0 });
        }
        debug!(rotor_count = rotors.len(), "assembled rotor machine from parts");
        Ok(RotorMachine {
            rotors,
            reflector,
            plugboard: Plugboard::new(),
        })
    }

    // ──────── Queries ────────

    /// Returns the number of rotors.
    pub fn rotor_count(&self) -> usize {
        self.rotors.len()
    }

    /// Returns the rotors, leftmost first.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Returns the rotor at `index` (0 is leftmost).
    pub fn rotor(&self, index: usize) -> Option<&Rotor> {
        self.rotors.get(index)
    }

    /// Returns the current position of every rotor, leftmost first.
    pub fn rotor_positions(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Returns the ring setting of every rotor, leftmost first.
    pub fn ring_settings(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::ring_setting).collect()
    }

    /// Returns the notch of every rotor, leftmost first.
    pub fn notches(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::notch).collect()
    }

    /// Returns the reflector.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Returns the plugboard.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    // ──────── Configuration ────────

    /// Checks that a per-rotor list has one entry per rotor.
    fn check_len(&self, what: &'static str, actual: usize) -> Result<()> {
        let expected = self.rotors.len();
        if actual != expected {
            let err = RotorMachineError::LengthMismatch {
                what,
                expected,
                actual,
            };
            debug!(%err, "rejected per-rotor list");
            return Err(err);
        }
        Ok(())
    }

    /// Sets every rotor position (each taken modulo 256).
    ///
    /// # Errors
    /// Returns [`RotorMachineError::LengthMismatch`] unless exactly one value
    /// per rotor is given. No rotor is changed in that case.
    pub fn set_rotor_positions(&mut self, positions: &[i64]) -> Result<()> {
        self.check_len("positions", positions.len())?;
        for (rotor, &position) in self.rotors.iter_mut().zip(positions) {
            rotor.set_position(position);
        }
        debug!(positions = ?self.rotor_positions(), "set rotor positions");
        Ok(())
    }

    /// Sets every ring setting (each taken modulo 256).
    ///
    /// # Errors
    /// Returns [`RotorMachineError::LengthMismatch`] unless exactly one value
    /// per rotor is given. No rotor is changed in that case.
    pub fn set_ring_settings(&mut self, settings: &[i64]) -> Result<()> {
        self.check_len("ring settings", settings.len())?;
        for (rotor, &setting) in self.rotors.iter_mut().zip(settings) {
            rotor.set_ring_setting(setting);
        }
        debug!(ring_settings = ?self.ring_settings(), "set ring settings");
        Ok(())
    }

    /// Moves one rotor by `delta` positions without stepping any other rotor.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::RotorIndexOutOfRange`] for an unknown
    /// index.
    pub fn adjust_rotor(&mut self, index: usize, delta: i64) -> Result<u8> {
        let count = self.rotors.len();
        let rotor = self
            .rotors
            .get_mut(index)
            .ok_or(RotorMachineError::RotorIndexOutOfRange { index, count })?;
        rotor.set_position(i64::from(rotor.position()) + delta);
        Ok(rotor.position())
    }

    /// Gives every rotor a random position.
    pub fn randomize_positions<E: EntropySource + ?Sized>(&mut self, entropy: &mut E) {
        for rotor in self.rotors.iter_mut() {
            rotor.set_position(i64::from(entropy.next_byte()));
        }
        debug!(positions = ?self.rotor_positions(), "randomized rotor positions");
    }

    /// Replaces the plugboard wiring with `connections`.
    ///
    /// The plugboard is reset to identity first. Self pairs are skipped and a
    /// later pair naming an already connected byte replaces the earlier
    /// connection. Use [`converter::terminal_from_str`] or
    /// [`converter::terminal_from_int`] to turn human-entered terminals into
    /// bytes.
    pub fn set_plugboard(&mut self, connections: &[(u8, u8)]) {
        let installed = self.plugboard.set_connections(connections);
        debug!(
            requested = connections.len(),
            installed,
            "configured plugboard"
        );
    }

    /// Resets every rotor position to 0.
    ///
    /// Ring settings, wirings, reflector and plugboard are left untouched.
    pub fn reset(&mut self) {
        for rotor in self.rotors.iter_mut() {
            rotor.set_position(0);
        }
        debug!("reset rotor positions");
    }

    // ──────── Stepping ────────

    /// Advances the rotors for one character.
    pub fn rotate_rotors(&mut self) {
        let count = self.rotors.len();
        let right = count - 1;
        let mut rotate_next = self.rotors[right].rotate(1);

        if count > 1 {
            let middle = count - 2;
            if self.rotors[middle].is_at_notch() {
                trace!(rotor = middle, "double step");
                rotate_next = true;
            }
            if rotate_next {
                let carry = self.rotors[middle].rotate(1);
                if count > 2 && carry {
                    trace!(rotor = middle - 1, "carry into third rotor");
                    self.rotors[middle - 1].rotate(1);
                }
            }
        }
        trace!(positions = ?self.rotor_positions(), "stepped");
    }

    // ──────── Substitution ────────

    /// Passes a byte through plugboard, rotors, reflector and back.
    fn substitute(&self, value: u8) -> u8 {
        let mut signal = self.plugboard.swap(value);
        for rotor in self.rotors.iter().rev() {
            signal = rotor.forward(signal);
        }
        signal = self.reflector.reflect(signal);
        for rotor in self.rotors.iter() {
            signal = rotor.backward(signal);
        }
        self.plugboard.swap(signal)
    }

    /// Steps the rotors and encrypts one byte.
    pub fn encrypt_byte(&mut self, value: u8) -> u8 {
        self.rotate_rotors();
        self.substitute(value)
    }

    /// Steps the rotors and decrypts one byte (same pipeline as encryption).
    pub fn decrypt_byte(&mut self, value: u8) -> u8 {
        self.encrypt_byte(value)
    }

    /// Encrypts one character value.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::OutOfRangeValue`] if `value` is outside
    /// `0..=255`. The rotors do not move in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::error::ErrorKind;
    /// use rotormachine::RotorMachine;
    ///
    /// let mut machine = RotorMachine::with_seed(3, 1).unwrap();
    /// assert!(machine.encrypt(65).is_ok());
    /// assert_eq!(machine.encrypt(256).unwrap_err().kind(), ErrorKind::OutOfRangeValue);
    /// ```
    pub fn encrypt(&mut self, value: i64) -> Result<u8> {
        let byte = ring::checked_byte(value).ok_or_else(|| {
            debug!(value, "rejected out-of-range character");
            RotorMachineError::OutOfRangeValue { value }
        })?;
        Ok(self.encrypt_byte(byte))
    }

    /// Decrypts one character value (same pipeline as encryption).
    ///
    /// # Errors
    /// Returns [`RotorMachineError::OutOfRangeValue`] if `value` is outside
    /// `0..=255`. The rotors do not move in that case.
    pub fn decrypt(&mut self, value: i64) -> Result<u8> {
        self.encrypt(value)
    }

    /// Runs every byte of `input` through the machine.
    pub fn process_bytes(&mut self, input: &[u8]) -> Vec<u8> {
        input.iter().map(|&b| self.encrypt_byte(b)).collect()
    }

    /// Runs every byte of `buffer` through the machine in place.
    pub fn process_in_place(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.encrypt_byte(*byte);
        }
    }

    /// Runs text through the machine, one character at a time.
    ///
    /// Characters with a code point in `0..=255` are encrypted and emitted
    /// as the character with the resulting code. Any other character is
    /// copied unchanged and does not advance the rotors.
    pub fn process_text(&mut self, text: &str) -> String {
        text.chars()
            .map(|c| match converter::char_to_byte(c) {
                Some(byte) => converter::byte_to_char(self.encrypt_byte(byte)),
                None => c,
            })
            .collect()
    }
}

impl fmt::Display for RotorMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RotorMachine(rotors={}, positions={:?}, rings={:?})",
            self.rotors.len(),
            self.rotor_positions(),
            self.ring_settings()
        )
    }
}
