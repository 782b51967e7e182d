//! Conversions between human-entered values and byte values.
//!
//! The engine itself is strictly byte-typed. These helpers sit at the
//! boundary where a caller holds characters, strings or wide integers
//! (plugboard terminals typed by a user, text to be processed).

use super::ring::wrap;

/// Converts an integer plugboard terminal to a byte (taken modulo 256).
pub fn terminal_from_int(value: i64) -> u8 {
    wrap(value)
}

/// Converts a string plugboard terminal to a byte.
///
/// The terminal is the code of the first character, taken modulo 256. An
/// empty string names byte 0.
pub fn terminal_from_str(terminal: &str) -> u8 {
    terminal
        .chars()
        .next()
        .map(|c| wrap(i64::from(u32::from(c))))
        .unwrap_or(0)
}

/// Converts a list of string terminal pairs to byte pairs.
pub fn pairs_from_strs(pairs: &[(&str, &str)]) -> Vec<(u8, u8)> {
    pairs
        .iter()
        .map(|&(a, b)| (terminal_from_str(a), terminal_from_str(b)))
        .collect()
}

/// Returns the byte value of `c` if its code point is in `0..=255`.
pub fn char_to_byte(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

/// Returns the character whose code point equals `byte` (Latin-1).
pub fn byte_to_char(byte: u8) -> char {
    char::from(byte)
}
