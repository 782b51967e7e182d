//! Random number generation subsystem.
//!
//! Provides the explicit entropy sources that drive rotor wiring, reflector
//! pairing and random start positions.

pub mod entropy;
pub mod mersenne_twister;
