//! Random number generation subsystem for Odocrypt.
//!
//! Provides the seed-driven generator that derives every schedule table
//! from a 32-bit epoch key.

pub mod odo_random;

pub use odo_random::OdoRandom;
