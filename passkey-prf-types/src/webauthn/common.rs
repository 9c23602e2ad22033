//! Common types used in both Attestation (registration) and Assertion (authentication).

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[cfg(doc)]
use crate::webauthn::PublicKeyCredentialCreationOptions;

/// The valid credential types. Unknown values are kept as [`PublicKeyCredentialType::Unknown`]
/// so they can be ignored instead of failing deserialization.
///
/// <https://w3c.github.io/webauthn/#enumdef-publickeycredentialtype>
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum PublicKeyCredentialType {
    /// An asymmetric key pair credential.
    PublicKey,
    /// Any value this crate does not know.
    #[default]
    Unknown,
}

/// Whether a ceremony needs [user verification], beyond user presence.
///
/// <https://w3c.github.io/webauthn/#enumdef-userverificationrequirement>
///
/// [user verification]: https://w3c.github.io/webauthn/#user-verification
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum UserVerificationRequirement {
    /// The operation fails if the user cannot be verified.
    Required,

    /// User verification is used if possible, but the operation does not fail without it.
    #[default]
    Preferred,

    /// User verification is not asked for.
    Discouraged,
}

impl UserVerificationRequirement {
    /// Whether an authenticator must verify the user to satisfy this requirement.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

/// How an authenticator is attached to the client, as preferred in
/// [`PublicKeyCredentialCreationOptions`] or reported once a ceremony completes.
///
/// <https://w3c.github.io/webauthn/#enumdef-authenticatorattachment>
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorAttachment {
    /// Attached using a client device-specific transport and usually not removable.
    Platform,

    /// Attached using cross-platform transports and able to roam between client devices.
    CrossPlatform,
}
