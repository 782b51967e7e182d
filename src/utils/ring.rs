//! Modulo-256 arithmetic on the byte ring.
//!
//! Positions, ring settings and substituted values all live in `Z/256`.
//! Integers coming from outside the engine are normalized with the
//! Euclidean remainder so that `-1` becomes 255 and `256` becomes 0.

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Reduces an arbitrary integer into the byte ring.
pub fn wrap(value: i64) -> u8 {
    value.rem_euclid(ALPHABET_SIZE as i64) as u8
}

/// Returns `value` as a byte if it lies in `0..=255`.
pub fn checked_byte(value: i64) -> Option<u8> {
    u8::try_from(value).ok()
}

/// Moves a value from the outer frame into a rotor's electrical frame.
///
/// Computes `value + position - ring_setting (mod 256)`.
#[inline]
pub fn enter_frame(value: u8, position: u8, ring_setting: u8) -> u8 {
    value.wrapping_add(position).wrapping_sub(ring_setting)
}

/// Moves a value from a rotor's electrical frame back to the outer frame.
///
/// Computes `value - position + ring_setting (mod 256)`.
#[inline]
pub fn leave_frame(value: u8, position: u8, ring_setting: u8) -> u8 {
    value.wrapping_sub(position).wrapping_add(ring_setting)
}

/// Forward distance from `from` to `to` around the ring (`0..=255`).
#[inline]
pub fn distance(from: u8, to: u8) -> u32 {
    to.wrapping_sub(from) as u32
}
