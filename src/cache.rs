//! Per-epoch cipher cache.
//!
//! Building a schedule costs far more than one hash, and every block of a
//! shape-change period shares the same key. Block timestamps are not
//! monotonic, so headers near a boundary alternate between two epochs. The
//! cache keeps the ciphers of the two most recently built epochs and only
//! builds when a third key shows up.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::consts::HASH_SIZE;
use crate::error::OdoCryptError;
use crate::odocrypt::OdoCrypt;
use crate::params::OdoParams;

/// Shared cache of the last two epochs' [`OdoCrypt`].
///
/// Readers hashing under a cached key never block each other; a new key
/// takes the write lock once to build and evicts the older slot.
#[derive(Debug, Default)]
pub struct ScheduleCache {
    slots: RwLock<EpochSlots>,
}

#[derive(Debug, Default)]
struct EpochSlots {
    current: Option<Arc<OdoCrypt>>,
    previous: Option<Arc<OdoCrypt>>,
}

impl EpochSlots {
    fn find(&self, epoch_key: u32) -> Option<&Arc<OdoCrypt>> {
        [&self.current, &self.previous]
            .into_iter()
            .flatten()
            .find(|odo| odo.key() == epoch_key)
    }
}

impl ScheduleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cipher for `epoch_key`, building it on a miss.
    ///
    /// A miss moves the current cipher to the previous slot and drops the
    /// one that was there.
    ///
    /// # Examples
    ///
    /// ```
    /// use odocrypt::cache::ScheduleCache;
    ///
    /// let cache = ScheduleCache::new();
    /// let a = cache.get(1);
    /// let b = cache.get(1);
    /// assert!(std::sync::Arc::ptr_eq(&a, &b));
    /// ```
    pub fn get(&self, epoch_key: u32) -> Arc<OdoCrypt> {
        if let Some(odo) = self.lookup(epoch_key) {
            trace!(epoch_key, "odocrypt cache hit");
            return odo;
        }

        let mut slots = self.slots.write();
        if let Some(odo) = slots.find(epoch_key) {
            return Arc::clone(odo);
        }
        debug!(
            epoch_key,
            evicted = ?slots.previous.as_ref().map(|odo| odo.key()),
            "building odocrypt schedule"
        );
        let odo = Arc::new(OdoCrypt::new(epoch_key));
        slots.previous = slots.current.replace(Arc::clone(&odo));
        odo
    }

    /// Returns the key of the most recently built cipher, if any.
    pub fn cached_key(&self) -> Option<u32> {
        self.slots.read().current.as_ref().map(|odo| odo.key())
    }

    /// Returns the keys of both cached ciphers, most recent first.
    pub fn cached_keys(&self) -> [Option<u32>; 2] {
        let slots = self.slots.read();
        [&slots.current, &slots.previous].map(|slot| slot.as_ref().map(|odo| odo.key()))
    }

    /// Drops both cached ciphers.
    pub fn clear(&self) {
        *self.slots.write() = EpochSlots::default();
    }

    /// Hashes `data` under the epoch that contains `n_time`.
    ///
    /// # Errors
    /// Returns [`OdoCryptError::InputTooLong`] if `data` exceeds 80 bytes.
    pub fn hash(
        &self,
        params: &OdoParams,
        n_time: u32,
        data: &[u8],
    ) -> Result<[u8; HASH_SIZE], OdoCryptError> {
        self.get(params.epoch_key(n_time)).hash(data)
    }

    fn lookup(&self, epoch_key: u32) -> Option<Arc<OdoCrypt>> {
        self.slots.read().find(epoch_key).map(Arc::clone)
    }
}
