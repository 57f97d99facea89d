//! Shape-change parameters supplied by the surrounding chain.
//!
//! The cipher schedule changes whenever the block time crosses a multiple of
//! the shape-change interval. The epoch key is the start of that period.

use crate::consts::SHAPECHANGE_INTERVAL;
use crate::error::OdoCryptError;

/// Chain-side configuration of the Odocrypt proof of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OdoParams {
    shapechange_interval: u32,
}

impl Default for OdoParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl OdoParams {
    /// Parameters with the ten-day shape-change interval.
    pub fn mainnet() -> Self {
        OdoParams {
            shapechange_interval: SHAPECHANGE_INTERVAL,
        }
    }

    /// Parameters with a custom shape-change interval.
    ///
    /// # Parameters
    /// - `shapechange_interval`: Interval in seconds.
    ///
    /// # Errors
    /// Returns [`OdoCryptError::InvalidInterval`] if the interval is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use odocrypt::params::OdoParams;
    ///
    /// let params = OdoParams::new(24 * 60 * 60).unwrap();
    /// assert_eq!(params.epoch_key(100_000), 86_400);
    /// assert!(OdoParams::new(0).is_err());
    /// ```
    pub fn new(shapechange_interval: u32) -> Result<Self, OdoCryptError> {
        if shapechange_interval == 0 {
            return Err(OdoCryptError::InvalidInterval);
        }
        Ok(OdoParams {
            shapechange_interval,
        })
    }

    /// Returns the shape-change interval in seconds.
    pub fn shapechange_interval(&self) -> u32 {
        self.shapechange_interval
    }

    /// Returns the epoch key for a block timestamp.
    ///
    /// # Parameters
    /// - `n_time`: Block time in seconds since the Unix epoch.
    ///
    /// # Returns
    /// `n_time` rounded down to a multiple of the shape-change interval.
    pub fn epoch_key(&self, n_time: u32) -> u32 {
        n_time - n_time % self.shapechange_interval
    }
}
