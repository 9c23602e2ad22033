//! The seam between key derivation and the WebAuthn ceremonies.

use std::fmt;

use passkey_prf_authenticator::AuthenticatorError;
use passkey_prf_types::webauthn::{
    AuthenticatedPublicKeyCredential, CreatedPublicKeyCredential,
    PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
};
use typeshare::typeshare;

mod software;

pub use self::software::SoftwarePlatform;

/// Errors surfaced by a [`CeremonyProvider`].
#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "content")]
pub enum CeremonyError {
    /// The user dismissed the ceremony.
    Cancelled,
    /// The user or the platform refused the ceremony.
    NotAllowed,
    /// No RP ID was given and the platform has no default one.
    InvalidRpId,
    /// No credential is scoped to the RP ID.
    CredentialNotFound,
    /// None of the requested algorithms are supported.
    UnsupportedAlgorithm,
    /// The request uses a feature the platform does not support.
    NotSupported,
    /// Internal authenticator error whose value represents a CTAP2 status code.
    Authenticator(u8),
}

impl From<AuthenticatorError> for CeremonyError {
    fn from(value: AuthenticatorError) -> Self {
        match value {
            AuthenticatorError::NoCredentials => CeremonyError::CredentialNotFound,
            AuthenticatorError::OperationDenied => CeremonyError::NotAllowed,
            AuthenticatorError::UnsupportedAlgorithm => CeremonyError::UnsupportedAlgorithm,
            AuthenticatorError::KeepAliveCancel => CeremonyError::Cancelled,
            AuthenticatorError::UnsupportedOption => CeremonyError::NotSupported,
            other => CeremonyError::Authenticator(other.into()),
        }
    }
}

impl fmt::Display for CeremonyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CeremonyError::Cancelled => write!(f, "the ceremony was cancelled"),
            CeremonyError::NotAllowed => write!(f, "the ceremony was not allowed"),
            CeremonyError::InvalidRpId => write!(f, "the RP ID is missing or invalid"),
            CeremonyError::CredentialNotFound => write!(f, "no credential was found"),
            CeremonyError::UnsupportedAlgorithm => write!(f, "no supported algorithm was offered"),
            CeremonyError::NotSupported => write!(f, "the request is not supported"),
            CeremonyError::Authenticator(code) => {
                write!(f, "the authenticator failed with status 0x{code:02X}")
            }
        }
    }
}

impl std::error::Error for CeremonyError {}

/// Runs WebAuthn ceremonies against an authenticator, e.g. through `navigator.credentials` or an
/// in process [`SoftwarePlatform`].
///
/// Both ceremonies suspend until the user has interacted with the authenticator. Cancellation
/// must resolve to an error rather than never completing.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait CeremonyProvider {
    /// Create a new credential.
    async fn create(
        &mut self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<CreatedPublicKeyCredential, CeremonyError>;

    /// Assert a discoverable credential. PRF inputs are given unhashed, in
    /// [`PublicKeyCredentialRequestOptions::extensions`].
    async fn assert(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<AuthenticatedPublicKeyCredential, CeremonyError>;
}
