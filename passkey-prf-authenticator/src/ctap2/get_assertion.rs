//! `authenticatorGetAssertion` request and response.

use passkey_prf_types::Bytes;

use super::AuthenticatorPrfValues;

/// Request to assert a discoverable credential of a relying party.
#[derive(Debug, Clone)]
pub struct Request {
    /// The relying party whose credentials are eligible.
    pub rp_id: String,

    /// Hash of the serialized client data, signed over in the assertion.
    pub client_data_hash: Bytes,

    /// Authenticator options.
    pub options: Options,

    /// Hashed PRF salts, `None` when the extension is not requested.
    pub prf: Option<AuthenticatorPrfValues>,
}

/// Options of a get assertion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Require user presence.
    pub up: bool,
    /// Require user verification.
    pub uv: bool,
}

/// The result of asserting a credential.
#[derive(Debug, Clone)]
pub struct Response {
    /// The id of the credential that was used.
    pub credential_id: Bytes,

    /// The user handle stored with the credential.
    pub user_handle: Option<Bytes>,

    /// Authenticator data, signed over.
    pub auth_data: Bytes,

    /// DER encoded ES256 signature over `auth_data || client_data_hash`.
    pub signature: Bytes,

    /// PRF results. `None` when PRF was not requested or the credential has no PRF secret.
    pub prf: Option<AuthenticatorPrfValues>,
}
