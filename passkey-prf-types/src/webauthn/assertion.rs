//! Types used for public key authentication

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::ignore_unknown,
    webauthn::{
        AuthenticationExtensionsClientInputs, PublicKeyCredential, UserVerificationRequirement,
    },
    Bytes,
};

/// The response to the successful authentication of a [`PublicKeyCredential`]
#[typeshare]
pub type AuthenticatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAssertionResponse>;

/// The options of an assertion. No allow list is carried, only discoverable credentials scoped
/// to [`Self::rp_id`] take part.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrequestoptions>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialRequestOptions {
    /// Signed with the authenticator data. Empty when nobody verifies the signature.
    pub challenge: Bytes,

    /// A hint in milliseconds, not enforced by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// The [RP ID] whose credentials may answer. The platform default applies when omitted.
    ///
    /// [RP ID]: https://w3c.github.io/webauthn/#rp-id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,

    /// The Relying Party's requirements regarding user verification for the `get()` operation.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,

    /// Client extension inputs requesting additional processing by the client and authenticator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// The authenticator's answer to an assertion.
///
/// <https://w3c.github.io/webauthn/#authenticatorassertionresponse>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAssertionResponse {
    /// The authenticator data returned by the authenticator.
    pub authenticator_data: Bytes,

    /// The raw signature returned from the authenticator.
    pub signature: Bytes,

    /// The user handle of the credential that produced the assertion, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Bytes>,
}
