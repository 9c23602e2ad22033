//! Request and response types exchanged with the [`Authenticator`](crate::Authenticator).
//!
//! These are a trimmed down mirror of the CTAP2 `authenticatorMakeCredential` and
//! `authenticatorGetAssertion` commands. PRF salts arrive already hashed by the client, as they
//! would be for the `hmac-secret` extension.

pub mod get_assertion;
pub mod make_credential;

use std::fmt;

use passkey_prf_types::webauthn::AuthenticationExtensionsPrfValues;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The already hashed PRF salts, or the PRF outputs computed from them.
///
/// This struct is a more opiniated mirror of [`AuthenticationExtensionsPrfValues`]. Outputs are
/// secret, so the values are zeroed on drop and left out of the `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthenticatorPrfValues {
    /// The first value.
    pub first: [u8; 32],

    /// The second value.
    pub second: Option<[u8; 32]>,
}

impl fmt::Debug for AuthenticatorPrfValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorPrfValues")
            .field("second", &self.second.is_some())
            .finish_non_exhaustive()
    }
}

impl From<AuthenticatorPrfValues> for AuthenticationExtensionsPrfValues {
    fn from(value: AuthenticatorPrfValues) -> Self {
        Self {
            first: value.first.as_slice().into(),
            second: value.second.as_ref().map(|second| second.as_slice().into()),
        }
    }
}
