use std::fmt;

use crate::{CeremonyError, CryptoError, KeyUsages};

/// Errors produced by enrollment and key derivation.
///
/// Every failure is terminal, nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "content")]
pub enum Error {
    /// The salt is not exactly 64 bytes long. Raised before any ceremony.
    InvalidSaltLength {
        /// The length of the rejected salt.
        len: usize,
    },
    /// The credential creation ceremony was rejected or cancelled.
    EnrollmentFailure(CeremonyError),
    /// The assertion ceremony was rejected or cancelled.
    AssertionFailure(CeremonyError),
    /// The assertion succeeded but did not carry PRF results, the authenticator or the credential
    /// does not support the PRF extension.
    UnsupportedExtension,
    /// The usages are empty or not compatible with the requested key type.
    UnsupportedUsage(KeyUsages),
    /// The requested key type is not supported.
    UnsupportedKeyType,
    /// Any other failure of the [`CryptoProvider`](crate::CryptoProvider).
    Crypto(CryptoError),
}

impl From<CryptoError> for Error {
    fn from(value: CryptoError) -> Self {
        match value {
            CryptoError::UnsupportedUsage(usages) => Error::UnsupportedUsage(usages),
            CryptoError::UnsupportedKeyType => Error::UnsupportedKeyType,
            other => Error::Crypto(other),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSaltLength { len } => {
                write!(f, "the salt must be 64 bytes long, got {len}")
            }
            Error::EnrollmentFailure(cause) => write!(f, "credential creation failed: {cause}"),
            Error::AssertionFailure(cause) => write!(f, "assertion failed: {cause}"),
            Error::UnsupportedExtension => {
                write!(f, "the authenticator did not return PRF results")
            }
            Error::UnsupportedUsage(usages) => {
                write!(f, "usages {usages} are not supported for the key type")
            }
            Error::UnsupportedKeyType => write!(f, "the key type is not supported"),
            Error::Crypto(cause) => write!(f, "key derivation failed: {cause}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::EnrollmentFailure(cause) | Error::AssertionFailure(cause) => Some(cause),
            Error::Crypto(cause) => Some(cause),
            _ => None,
        }
    }
}
