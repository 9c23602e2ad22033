//! `authenticatorMakeCredential` request and response.

use coset::iana;
use passkey_prf_types::{
    webauthn::{
        PublicKeyCredentialParameters, PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity,
    },
    Bytes,
};

use super::AuthenticatorPrfValues;

/// Request to create a new credential.
#[derive(Debug, Clone)]
pub struct Request {
    /// Hash of the serialized client data, signed over in the attestation.
    pub client_data_hash: Bytes,

    /// The relying party. Its `id` scopes the credential and must be set.
    pub rp: PublicKeyCredentialRpEntity,

    /// The user account the credential belongs to.
    pub user: PublicKeyCredentialUserEntity,

    /// Algorithms in order of preference.
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// Authenticator options.
    pub options: Options,

    /// PRF input, `None` when the extension is not requested.
    pub prf: Option<PrfInput>,
}

/// The PRF extension as requested during creation.
#[derive(Debug, Clone, Default)]
pub struct PrfInput {
    /// Salts to evaluate immediately, only honored by authenticators configured to do so.
    pub eval: Option<AuthenticatorPrfValues>,
}

/// Options of a make credential request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Create a discoverable credential. Must be set, server-side credentials are not supported.
    pub rk: bool,
    /// Require user presence.
    pub up: bool,
    /// Require user verification.
    pub uv: bool,
}

/// The result of creating a credential.
#[derive(Debug, Clone)]
pub struct Response {
    /// The new credential's id.
    pub credential_id: Bytes,

    /// Authenticator data including the attested credential data.
    pub auth_data: Bytes,

    /// The credential's public key as a DER encoded SubjectPublicKeyInfo.
    pub public_key: Bytes,

    /// The algorithm chosen for the credential.
    pub algorithm: iana::Algorithm,

    /// PRF output, `None` when the authenticator does not support the extension or it was not
    /// requested.
    pub prf: Option<PrfMakeOutput>,
}

/// PRF output of a make credential request.
#[derive(Debug, Clone)]
pub struct PrfMakeOutput {
    /// Whether PRF evaluation is available for the new credential.
    pub enabled: bool,

    /// Results of evaluating [`PrfInput::eval`] during creation.
    pub results: Option<AuthenticatorPrfValues>,
}
