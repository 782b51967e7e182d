//! Byte-ring arithmetic and boundary conversion helpers.

pub mod converter;
pub mod ring;
