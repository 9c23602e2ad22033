use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::Bytes;

/// One or two PRF values.
///
/// As inputs they are hashed by the client into the salts handed to the authenticator. As outputs
/// they hold the 32 byte PRF results, in the same slots as the inputs they came from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsPrfValues {
    /// The first PRF value.
    pub first: Bytes,

    /// The optional second value, evaluated in the same ceremony.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<Bytes>,
}

impl AuthenticationExtensionsPrfValues {
    /// Values holding only the first slot.
    pub fn first(first: impl Into<Bytes>) -> Self {
        Self {
            first: first.into(),
            second: None,
        }
    }
}

/// PRF extension inputs, valid on both creation and assertion.
///
/// Each credential carries its own PRF, mapping inputs of any length to 32 bytes.
/// `evalByCredential` is left out since requests never carry an allow list.
///
/// <https://w3c.github.io/webauthn/#prf-extension>
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsPrfInputs {
    /// The inputs to evaluate. On creation the authenticator may ignore them, in which case an
    /// assertion is needed to get the outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval: Option<AuthenticationExtensionsPrfValues>,
}

/// PRF extension outputs.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsPrfOutputs {
    /// Whether the new credential has a PRF. Only set on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// The PRF evaluated over `eval`, when the authenticator did evaluate it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AuthenticationExtensionsPrfValues>,
}
