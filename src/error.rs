//! Error types for the rotormachine library.
//!
//! Every error is local to the call that produced it. Validation runs before
//! any state is written, so a machine that returned an error is left exactly
//! as it was before the call.

use thiserror::Error;

/// Result type alias for rotormachine operations.
pub type Result<T> = std::result::Result<T, RotorMachineError>;

/// Coarse classification of [`RotorMachineError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The machine or one of its parts was given an unusable configuration.
    InvalidConfiguration,
    /// A value handed to encrypt/decrypt is outside the byte range.
    OutOfRangeValue,
}

/// Errors produced by the rotormachine library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotorMachineError {
    /// A machine needs at least one rotor.
    #[error("Number of rotors must be at least 1, got {count}")]
    InvalidRotorCount {
        /// Rotor count that was requested.
        count: usize,
    },

    /// A per-rotor list does not have one entry per rotor.
    #[error("Expected {expected} {what}, got {actual}")]
    LengthMismatch {
        /// What the list holds ("positions", "ring settings", ...).
        what: &'static str,
        /// Number of rotors in the machine.
        expected: usize,
        /// Number of values received.
        actual: usize,
    },

    /// A rotor index does not name a rotor of this machine.
    #[error("Rotor index {index} is out of range for {count} rotors")]
    RotorIndexOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of rotors in the machine.
        count: usize,
    },

    /// A supplied rotor wiring is not a fixed-point-free permutation.
    #[error("Invalid rotor wiring: {reason}")]
    InvalidWiring {
        /// Human readable description of the defect.
        reason: String,
    },

    /// A reflector pair is a self pair or reuses a byte already paired.
    #[error("Invalid reflector pair ({a}, {b})")]
    InvalidReflectorPair {
        /// First byte of the rejected pair.
        a: u8,
        /// Second byte of the rejected pair.
        b: u8,
    },

    /// A character value is outside the byte range `0..=255`.
    #[error("Character must be in range 0-255, got {value}")]
    OutOfRangeValue {
        /// The rejected value.
        value: i64,
    },
}

impl RotorMachineError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RotorMachineError::OutOfRangeValue { .. } => ErrorKind::OutOfRangeValue,
            RotorMachineError::InvalidRotorCount { .. }
            | RotorMachineError::LengthMismatch { .. }
            | RotorMachineError::RotorIndexOutOfRange { .. }
            | RotorMachineError::InvalidWiring { .. }
            | RotorMachineError::InvalidReflectorPair { .. } => ErrorKind::InvalidConfiguration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_rotor_count() {
        let err = RotorMachineError::InvalidRotorCount { count: 0 };
        assert_eq!(
            format!("{}", err),
            "Number of rotors must be at least 1, got 0"
        );
    }

    #[test]
    fn test_display_length_mismatch() {
        let err = RotorMachineError::LengthMismatch {
            what: "positions",
            expected: 3,
            actual: 2,
        };
        assert_eq!(format!("{}", err), "Expected 3 positions, got 2");
    }

    #[test]
    fn test_display_out_of_range() {
        let err = RotorMachineError::OutOfRangeValue { value: 256 };
        assert_eq!(
            format!("{}", err),
            "Character must be in range 0-255, got 256"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            RotorMachineError::OutOfRangeValue { value: -1 }.kind(),
            ErrorKind::OutOfRangeValue
        );
        assert_eq!(
            RotorMachineError::InvalidRotorCount { count: 0 }.kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            RotorMachineError::RotorIndexOutOfRange { index: 4, count: 3 }.kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            RotorMachineError::InvalidReflectorPair { a: 1, b: 1 }.kind(),
            ErrorKind::InvalidConfiguration
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            RotorMachineError::OutOfRangeValue { value: 300 },
            RotorMachineError::OutOfRangeValue { value: 300 }
        );
        assert_ne!(
            RotorMachineError::OutOfRangeValue { value: 300 },
            RotorMachineError::OutOfRangeValue { value: -1 }
        );
    }
}
