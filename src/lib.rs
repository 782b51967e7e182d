//! Enigma-style rotor cipher engine over the full byte alphabet.
//!
//! The machine chains N rotors, a reflector and a plugboard. Each rotor is a
//! fixed-point-free permutation of the 256 byte values that rotates one step
//! per character following the odometer rule with the Enigma double-step
//! anomaly. Because every stage is an involution, encryption and decryption
//! are the same operation.
//!
//! This is an educational toy cipher, not a secure primitive.
//!
//! # Architecture
//!
//! ```text
//! Rotor        (permutation + inverse, ring setting, position, notch)
//!     ↕ N rotors, stepped right to left
//! RotorMachine (plugboard → rotors → reflector → rotors → plugboard)
//!     ↑ built directly or from MachineSettings
//! EntropySource (explicit, seedable randomness for wirings and pairings)
//! ```
//!
//! # Examples
//!
//! Encrypt a message and decrypt it from the same starting state:
//!
//! ```
//! use rotormachine::RotorMachine;
//!
//! let mut machine = RotorMachine::with_seed(3, 2024).unwrap();
//! machine.set_plugboard(&[(b'a', b'e')]);
//!
//! let ciphertext = machine.process_text("rotor machines");
//! assert_ne!(ciphertext, "rotor machines");
//!
//! machine.reset();
//! assert_eq!(machine.process_text(&ciphertext), "rotor machines");
//! ```
//!
//! Build a machine from settings:
//!
//! ```
//! use rotormachine::MachineSettings;
//!
//! let mut machine = MachineSettings::new()
//!     .rotor_count(4)
//!     .seed(7)
//!     .positions(vec![0, 10, 20, 30])
//!     .build()
//!     .unwrap();
//!
//! let c = machine.encrypt(b'A' as i64).unwrap();
//! assert_ne!(c, b'A');
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod random;
pub mod utils;

mod machine;
mod plugboard;
mod reflector;
mod rotor;
mod settings;

pub use error::{ErrorKind, Result, RotorMachineError};
pub use machine::RotorMachine;
pub use plugboard::Plugboard;
pub use reflector::Reflector;
pub use rotor::Rotor;
pub use settings::{MachineSettings, DEFAULT_ROTOR_COUNT};
