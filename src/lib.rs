//! Odocrypt key-scheduled cipher and proof-of-work hash.
//!
//! Odocrypt is an 800-bit substitution-permutation cipher whose every table
//! is derived from a 32-bit epoch key. Chained into Keccak-p[800], it yields
//! a 256-bit digest used as a proof-of-work function whose shape changes
//! every shape-change period, so fixed-function hardware goes stale.
//!
//! # Architecture
//!
//! ```text
//! OdoRandom   (jump LCG — every seed yields its own sequence)
//!     ↓ drives
//! Schedule    (2 pboxes + 40 small sboxes + 10 large sboxes + rotations + round keys)
//!     ↓ read-only, shared
//! OdoCrypt    (84 rounds: pbox → sboxes → pbox → linear mix → round key)
//!     ↓ 80-byte cipher block inside a 100-byte buffer
//! Keccak-p[800], 12 rounds → first 32 bytes are the digest
//! ```
//!
//! # Examples
//!
//! Hash a block header under the schedule of its epoch:
//!
//! ```
//! use odocrypt::params::OdoParams;
//! use odocrypt::OdoCrypt;
//!
//! let params = OdoParams::mainnet();
//! let odo = OdoCrypt::new(params.epoch_key(1_560_384_123));
//!
//! let header = [0u8; 80];
//! let digest = odo.hash(&header).unwrap();
//! assert_eq!(digest, odo.hash_header(&header));
//! ```
//!
//! Share one schedule across the blocks of an epoch:
//!
//! ```
//! use odocrypt::cache::ScheduleCache;
//! use odocrypt::params::OdoParams;
//!
//! let cache = ScheduleCache::new();
//! let params = OdoParams::mainnet();
//! let a = cache.hash(&params, 1_560_384_123, b"first").unwrap();
//! let b = cache.hash(&params, 1_560_384_500, b"second").unwrap();
//! assert_ne!(a, b);
//! assert_eq!(cache.cached_key(), Some(1_560_384_000));
//! ```

#![deny(clippy::all)]

pub mod cache;
pub mod consts;
pub mod error;
pub mod params;
pub mod random;
pub mod schedule;
pub mod state;

mod finalize;
mod odocrypt;
pub(crate) mod utils;

pub use crate::odocrypt::{encrypt, hash, OdoCrypt};
pub use error::OdoCryptError;
pub use schedule::Schedule;
