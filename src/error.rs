//! Error types for the Odocrypt library.

use std::fmt;

/// Errors produced by the Odocrypt library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdoCryptError {
    /// Hash input is longer than the cipher block.
    InputTooLong {
        /// Length of the rejected input in bytes.
        len: usize,
        /// Largest accepted input length in bytes.
        max: usize,
    },
    /// A substitution table is not a permutation of its domain.
    SboxNotBijective,
    /// The rotation set has a zero, out-of-range or repeated amount, or an even sum.
    InvalidRotationSet,
    /// The shape-change interval is zero.
    InvalidInterval,
}

impl OdoCryptError {
    /// Returns `true` for errors that can only come from a broken schedule builder.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            OdoCryptError::SboxNotBijective | OdoCryptError::InvalidRotationSet
        )
    }
}

impl fmt::Display for OdoCryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdoCryptError::InputTooLong { len, max } => {
                write!(f, "Input of {} bytes exceeds the {} byte block", len, max)
            }
            OdoCryptError::SboxNotBijective => {
                write!(f, "Substitution table is not a bijection")
            }
            OdoCryptError::InvalidRotationSet => {
                write!(
                    f,
                    "Rotation set must hold distinct non-zero amounts with odd sum"
                )
            }
            OdoCryptError::InvalidInterval => {
                write!(f, "Shape-change interval must be greater than zero")
            }
        }
    }
}

impl std::error::Error for OdoCryptError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_input_too_long() {
        let err = OdoCryptError::InputTooLong { len: 81, max: 80 };
        assert_eq!(
            format!("{}", err),
            "Input of 81 bytes exceeds the 80 byte block"
        );
    }

    #[test]
    fn test_display_sbox_not_bijective() {
        let err = OdoCryptError::SboxNotBijective;
        assert_eq!(format!("{}", err), "Substitution table is not a bijection");
    }

    #[test]
    fn test_display_invalid_rotation_set() {
        let err = OdoCryptError::InvalidRotationSet;
        assert_eq!(
            format!("{}", err),
            "Rotation set must hold distinct non-zero amounts with odd sum"
        );
    }

    #[test]
    fn test_display_invalid_interval() {
        let err = OdoCryptError::InvalidInterval;
        assert_eq!(
            format!("{}", err),
            "Shape-change interval must be greater than zero"
        );
    }

    #[test]
    fn test_invariant_classification() {
        assert!(OdoCryptError::SboxNotBijective.is_invariant_violation());
        assert!(OdoCryptError::InvalidRotationSet.is_invariant_violation());
        assert!(!OdoCryptError::InvalidInterval.is_invariant_violation());
        assert!(!OdoCryptError::InputTooLong { len: 81, max: 80 }.is_invariant_violation());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            OdoCryptError::InputTooLong { len: 81, max: 80 },
            OdoCryptError::InputTooLong { len: 81, max: 80 }
        );
        assert_ne!(
            OdoCryptError::InputTooLong { len: 81, max: 80 },
            OdoCryptError::InputTooLong { len: 90, max: 80 }
        );
    }
}
