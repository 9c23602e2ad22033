//! Caller facing configuration of enrollment and derivation, with every default resolved once.

use passkey_prf_types::{
    webauthn::{
        PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity, UserVerificationRequirement,
    },
    Bytes,
};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{DerivedKeyType, Error, KeyUsages, Salt};

fn discouraged() -> UserVerificationRequirement {
    UserVerificationRequirement::Discouraged
}

/// Options of [`Client::enroll`](crate::Client::enroll).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollOptions {
    /// The relying party the credential is scoped to, passed through unmodified.
    pub rp: PublicKeyCredentialRpEntity,

    /// The user account of the credential. Defaults to [`EnrollOptions::default_user`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicKeyCredentialUserEntity>,

    /// Defaults to [`UserVerificationRequirement::Discouraged`]. It is never upgraded.
    #[serde(default = "discouraged")]
    pub user_verification: UserVerificationRequirement,
}

impl EnrollOptions {
    /// Enroll a credential for `rp` with the default user and user verification.
    pub fn new(rp: PublicKeyCredentialRpEntity) -> Self {
        Self {
            rp,
            user: None,
            user_verification: discouraged(),
        }
    }

    /// Builder method for the user account.
    pub fn with_user(self, user: PublicKeyCredentialUserEntity) -> Self {
        Self {
            user: Some(user),
            ..self
        }
    }

    /// Builder method for the user verification requirement.
    pub fn with_user_verification(self, user_verification: UserVerificationRequirement) -> Self {
        Self {
            user_verification,
            ..self
        }
    }

    /// The user of credentials enrolled without one: `{ id: "user", name: "user", displayName: "User" }`.
    pub fn default_user() -> PublicKeyCredentialUserEntity {
        PublicKeyCredentialUserEntity {
            id: b"user".to_vec().into(),
            display_name: "User".into(),
            name: "user".into(),
        }
    }
}

/// Options of [`Client::derive_key`](crate::Client::derive_key).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriveOptions {
    /// The PRF half and the HKDF half of the salt. Defaults to 64 zero bytes.
    #[serde(default)]
    #[typeshare(serialized_as = "String")]
    pub salt: Salt,

    /// The relying party of the credential. Defaults to the platform's default scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,

    /// The HKDF info, binding the key to a purpose. It has no default, an empty info must be
    /// given explicitly.
    pub info: Bytes,

    /// The shape of the derived key.
    pub key_type: DerivedKeyType,

    /// The operations the derived key may be used for.
    #[typeshare(serialized_as = "Vec<String>")]
    pub usages: KeyUsages,

    /// Whether the derived key may be exported. Defaults to `false`.
    #[serde(default)]
    pub extractable: bool,

    /// Defaults to [`UserVerificationRequirement::Discouraged`].
    #[serde(default = "discouraged")]
    pub user_verification: UserVerificationRequirement,
}

impl DeriveOptions {
    /// Derive a non-extractable key of `key_type` for `info`, using the default salt, scope and
    /// user verification.
    pub fn new(info: impl Into<Bytes>, key_type: DerivedKeyType, usages: KeyUsages) -> Self {
        Self {
            salt: Salt::default(),
            rp_id: None,
            info: info.into(),
            key_type,
            usages,
            extractable: false,
            user_verification: discouraged(),
        }
    }

    /// Builder method for the salt, failing with [`Error::InvalidSaltLength`] unless it is 64
    /// bytes long.
    pub fn with_salt(self, salt: impl AsRef<[u8]>) -> Result<Self, Error> {
        Ok(Self {
            salt: Salt::try_from(salt.as_ref())?,
            ..self
        })
    }

    /// Builder method for the relying party.
    pub fn with_rp_id(self, rp_id: impl Into<String>) -> Self {
        Self {
            rp_id: Some(rp_id.into()),
            ..self
        }
    }

    /// Builder method for the extractability of the derived key.
    pub fn extractable(self, extractable: bool) -> Self {
        Self {
            extractable,
            ..self
        }
    }

    /// Builder method for the user verification requirement.
    pub fn with_user_verification(self, user_verification: UserVerificationRequirement) -> Self {
        Self {
            user_verification,
            ..self
        }
    }
}
