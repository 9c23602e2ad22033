//! Implementation of the types defined in [WebAuthn Level 3] that take part in creating a
//! PRF-capable credential and asserting it.
//!
//! [WebAuthn Level 3]: https://w3c.github.io/webauthn

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{utils::serde::ignore_unknown, Bytes};

mod assertion;
mod attestation;
mod common;
mod extensions;

// re-export types
pub use self::{assertion::*, attestation::*, common::*, extensions::*};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::AuthenticatorAssertionResponse {}
    impl Sealed for super::AuthenticatorAttestationResponse {}
}

/// Marker trait for response types
pub trait AuthenticatorResponse: sealed::Sealed {}

impl AuthenticatorResponse for AuthenticatorAssertionResponse {}
impl AuthenticatorResponse for AuthenticatorAttestationResponse {}

/// A credential returned by a completed ceremony, see [CreatedPublicKeyCredential] and
/// [AuthenticatedPublicKeyCredential].
///
/// <https://w3c.github.io/webauthn/#iface-pkcredential>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredential<R: AuthenticatorResponse> {
    /// The base64url encoding of [Self::raw_id].
    pub id: String,

    /// The credential ID chosen by the authenticator.
    pub raw_id: Bytes,

    /// [PublicKeyCredentialType::PublicKey]
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// What the authenticator returned for the ceremony.
    pub response: R,

    /// How the authenticator is attached to the client.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,

    /// Extension outputs, including PRF results.
    #[serde(default)]
    pub client_extension_results: AuthenticationExtensionsClientOutputs,
}
