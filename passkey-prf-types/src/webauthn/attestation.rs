//! Types specific to public key credential creation
use coset::iana;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{i64_to_iana, ignore_unknown},
    webauthn::{
        AuthenticationExtensionsClientInputs, AuthenticatorAttachment, PublicKeyCredential,
        PublicKeyCredentialType, UserVerificationRequirement,
    },
    Bytes,
};

/// The response to the successful creation of a PublicKeyCredential
#[typeshare]
pub type CreatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAttestationResponse>;

/// The options of a credential creation.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialcreationoptions>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialCreationOptions {
    /// The relying party the credential is scoped to.
    pub rp: PublicKeyCredentialRpEntity,

    /// The account the credential is created for.
    pub user: PublicKeyCredentialUserEntity,

    /// Hashed into the client data. Empty when nobody verifies the attestation.
    pub challenge: Bytes,

    /// Acceptable algorithms, most preferred first. Creation fails when the authenticator supports
    /// none of them.
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// A hint in milliseconds, not enforced by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Requirements on the authenticator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,

    /// Client extension inputs requesting additional processing by the client and authenticator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// The relying party a credential is created for.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrpentity>
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[typeshare]
pub struct PublicKeyCredentialRpEntity {
    /// The [RP ID]. The platform picks one when omitted.
    ///
    /// [RP ID]: https://w3c.github.io/webauthn/#rp-id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name.
    pub name: String,
}

/// The user account a credential is created for.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialuserentity>
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialUserEntity {
    /// Opaque user handle of at most 64 bytes. A new discoverable credential replaces the one
    /// with the same RP ID and user handle.
    pub id: Bytes,

    /// Display name.
    pub display_name: String,

    /// Account name, such as an email address.
    pub name: String,
}

/// A credential type and algorithm acceptable for a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialparameters>
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[typeshare]
pub struct PublicKeyCredentialParameters {
    /// The credential type.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The COSE signature algorithm of the key pair.
    #[serde(with = "i64_to_iana")]
    #[typeshare(serialized_as = "I54")] // because i64 fails for js
    pub alg: iana::Algorithm,
}

impl PublicKeyCredentialParameters {
    /// Public key parameters for the given algorithm.
    pub fn public_key(alg: iana::Algorithm) -> Self {
        Self {
            ty: PublicKeyCredentialType::PublicKey,
            alg,
        }
    }

    /// ES256 then RS256, used when
    /// [`PublicKeyCredentialCreationOptions::pub_key_cred_params`] is empty.
    ///
    /// <https://w3c.github.io/webauthn/#ref-for-list-size>
    pub fn default_algorithms() -> Vec<Self> {
        vec![
            Self::public_key(iana::Algorithm::ES256),
            Self::public_key(iana::Algorithm::RS256),
        ]
    }
}

/// Requirements on the authenticator creating a credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticatorselectioncriteria>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorSelectionCriteria {
    /// The required attachment, if any.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown",
        default
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,

    /// Whether the credential must be discoverable. See [`Self::effective_resident_key`] when
    /// absent.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown",
        default
    )]
    pub resident_key: Option<ResidentKeyRequirement>,

    /// Level 1 form of [`Self::resident_key`].
    #[serde(default)]
    pub require_resident_key: bool,

    /// User verification for the creation.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,
}

impl AuthenticatorSelectionCriteria {
    /// The effective resident key requirement, taking the legacy boolean into account.
    pub fn effective_resident_key(&self) -> ResidentKeyRequirement {
        match (self.resident_key, self.require_resident_key) {
            (Some(rk), _) => rk,
            (None, true) => ResidentKeyRequirement::Required,
            (None, false) => ResidentKeyRequirement::Discouraged,
        }
    }
}

/// How strongly a [discoverable credential] is wanted.
///
/// [discoverable credential]: https://w3c.github.io/webauthn/#client-side-discoverable-credential
///
/// <https://w3c.github.io/webauthn/#enumdef-residentkeyrequirement>
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum ResidentKeyRequirement {
    /// A server-side credential is preferred.
    Discouraged,

    /// A discoverable credential is preferred.
    Preferred,

    /// Creation fails unless the credential is discoverable.
    Required,
}

/// The authenticator's answer to a credential creation.
///
/// <https://w3c.github.io/webauthn/#authenticatorattestationresponse>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAttestationResponse {
    /// The authenticator data of the newly created credential.
    pub authenticator_data: Bytes,

    /// The DER SubjectPublicKeyInfo of the new credential, when the client can express it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Bytes>,

    /// The COSE algorithm identifier of the new credential.
    #[typeshare(serialized_as = "I54")]
    pub public_key_algorithm: i64,
}
