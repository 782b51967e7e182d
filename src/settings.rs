//! Machine configuration.
//!
//! [`MachineSettings`] describes a machine declaratively (rotor count, seed,
//! start positions, ring settings, plugboard) and builds it in one validated
//! step.

use tracing::debug;

use crate::error::{Result, RotorMachineError};
use crate::machine::RotorMachine;
use crate::random::mersenne_twister::MersenneTwisterPlus;

/// Rotor count used when none is configured.
pub const DEFAULT_ROTOR_COUNT: usize = 3;

/// Declarative description of a rotor machine.
///
/// # Examples
///
/// ```
/// use rotormachine::MachineSettings;
///
/// let settings = MachineSettings::new()
///     .rotor_count(3)
///     .seed(2024)
///     .positions(vec![1, 2, 3])
///     .ring_settings(vec![0, 0, 5])
///     .plug_pair(b'A', b'Z');
///
/// let mut sender = settings.build().unwrap();
/// let mut receiver = settings.build().unwrap();
/// let ciphertext = sender.process_text("HELLO");
/// assert_eq!(receiver.process_text(&ciphertext), "HELLO");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSettings {
    rotor_count: usize,
    seed: Option<u64>,
    positions: Option<Vec<i64>>,
    ring_settings: Option<Vec<i64>>,
    plug_pairs: Vec<(u8, u8)>,
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            rotor_count: DEFAULT_ROTOR_COUNT,
            seed: None,
            positions: None,
            ring_settings: None,
            plug_pairs: Vec::new(),
        }
    }
}

impl MachineSettings {
    /// Creates default settings: three rotors, no seed, no plugs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of rotors.
    pub fn rotor_count(mut self, count: usize) -> Self {
        self.rotor_count = count;
        self
    }

    /// Sets the seed of the generator that wires the machine.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the start positions, leftmost rotor first.
    pub fn positions(mut self, positions: Vec<i64>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Sets the ring settings, leftmost rotor first.
    pub fn ring_settings(mut self, settings: Vec<i64>) -> Self {
        self.ring_settings = Some(settings);
        self
    }

    /// Adds one plugboard connection.
    pub fn plug_pair(mut self, a: u8, b: u8) -> Self {
        self.plug_pairs.push((a, b));
        self
    }

    /// Adds several plugboard connections.
    pub fn plug_pairs(mut self, pairs: &[(u8, u8)]) -> Self {
        self.plug_pairs.extend_from_slice(pairs);
        self
    }

    /// Returns the configured seed, if any.
    pub fn configured_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks the settings without building anything.
    fn validate(&self) -> Result<()> {
        if self.rotor_count < 1 {
            return Err(RotorMachineError::InvalidRotorCount {
                count: self.rotor_count,
            });
        }
        let lists = [
            ("positions", &self.positions),
            ("ring settings", &self.ring_settings),
        ];
        for (what, list) in lists {
            if let Some(values) = list {
                if values.len() != self.rotor_count {
                    return Err(RotorMachineError::LengthMismatch {
                        what,
                        expected: self.rotor_count,
                        actual: values.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validates the settings and builds the machine.
    ///
    /// Without a configured seed the generator is seeded from the system
    /// clock; the chosen seed is logged at debug level.
    ///
    /// # Errors
    /// Returns [`RotorMachineError::InvalidRotorCount`] or
    /// [`RotorMachineError::LengthMismatch`] for inconsistent settings.
    pub fn build(&self) -> Result<RotorMachine> {
        if let Err(err) = self.validate() {
            debug!(%err, "rejected machine settings");
            return Err(err);
        }

        let mut entropy = match self.seed {
            Some(seed) => MersenneTwisterPlus::with_seed(seed),
            None => MersenneTwisterPlus::from_time(),
        };
        debug!(
            rotor_count = self.rotor_count,
            seed = entropy.seed(),
            "building machine from settings"
        );

        let mut machine = RotorMachine::new(self.rotor_count, &mut entropy)?;
        if let Some(settings) = &self.ring_settings {
            machine.set_ring_settings(settings)?;
        }
        if let Some(positions) = &self.positions {
            machine.set_rotor_positions(positions)?;
        }
        machine.set_plugboard(&self.plug_pairs);
        Ok(machine)
    }
}
