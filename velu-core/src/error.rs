//! Error types for velu isogeny operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during key generation, agreement or encapsulation.
///
/// Field and curve arithmetic never fail; every variant here is raised by
/// the protocol layers before any secret-dependent work starts, or by the
/// randomness source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid ciphertext length.
    InvalidCiphertextLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid plaintext length for public-key encryption.
    InvalidMessageLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// The key belongs to a different variant than the operation requires.
    WrongKeyVariant,

    /// The randomness source failed to produce bytes.
    RandomnessFailure,

    /// A public key failed validation.
    InvalidPublicKey,

    /// Encoding or decoding error.
    EncodingError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidCiphertextLength { expected, actual } => {
                write!(
                    f,
                    "invalid ciphertext length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidMessageLength { expected, actual } => {
                write!(
                    f,
                    "invalid message length: expected {expected}, got {actual}"
                )
            }
            Error::WrongKeyVariant => write!(f, "key variant does not match the operation"),
            Error::RandomnessFailure => write!(f, "randomness source failed"),
            Error::InvalidPublicKey => write!(f, "public key failed validation"),
            Error::EncodingError => write!(f, "encoding or decoding error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lengths() {
        let err = Error::InvalidKeyLength {
            expected: 330,
            actual: 12,
        };
        assert_eq!(
            format!("{err}"),
            "invalid key length: expected 330, got 12"
        );

        let err = Error::InvalidMessageLength {
            expected: 24,
            actual: 16,
        };
        assert_eq!(
            format!("{err}"),
            "invalid message length: expected 24, got 16"
        );
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(Error::WrongKeyVariant, Error::WrongKeyVariant);
        assert_ne!(Error::RandomnessFailure, Error::InvalidPublicKey);
    }
}
