use serde::{Deserialize, Serialize};
use typeshare::typeshare;

mod pseudo_random_function;

pub use pseudo_random_function::*;

/// Extension inputs of a ceremony. The [PRF extension] is the only one understood here.
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticationextensionsclientinputs>
///
/// [PRF extension]: https://w3c.github.io/webauthn/#prf-extension
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsClientInputs {
    /// PRF evaluation request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prf: Option<AuthenticationExtensionsPrfInputs>,
}

/// Extension outputs reported by the client once a ceremony completes.
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticationextensionsclientoutputs>
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsClientOutputs {
    /// PRF support and results, absent when PRF was not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prf: Option<AuthenticationExtensionsPrfOutputs>,
}
