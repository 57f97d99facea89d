//! Low-level helpers shared by the state transforms and finalization.

pub(crate) mod bits;
pub(crate) mod converter;
