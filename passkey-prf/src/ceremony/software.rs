use coset::iana::EnumI64;
use passkey_prf_authenticator::{
    ctap2::{get_assertion, make_credential, AuthenticatorPrfValues},
    Authenticator, AuthenticatorError, CredentialStore, UserValidationMethod,
};
use passkey_prf_types::{
    crypto::sha256,
    encoding,
    webauthn::{
        AuthenticatedPublicKeyCredential, AuthenticationExtensionsClientOutputs,
        AuthenticationExtensionsPrfOutputs, AuthenticationExtensionsPrfValues,
        AuthenticatorAssertionResponse, AuthenticatorAttestationResponse,
        CreatedPublicKeyCredential, PublicKeyCredential, PublicKeyCredentialCreationOptions,
        PublicKeyCredentialParameters, PublicKeyCredentialRequestOptions,
        PublicKeyCredentialRpEntity, PublicKeyCredentialType, ResidentKeyRequirement,
    },
    Bytes,
};
use serde::Serialize;

use super::{CeremonyError, CeremonyProvider};

/// A [`CeremonyProvider`] running the ceremonies against an in process [`Authenticator`], the way
/// a browser would against a platform authenticator.
///
/// PRF inputs are hashed into `hmac-secret` salts before they reach the authenticator, so outputs
/// match those of a browser for the same credential secret.
pub struct SoftwarePlatform<S, U> {
    authenticator: Authenticator<S, U>,
    default_rp_id: Option<String>,
}

impl<S, U> SoftwarePlatform<S, U> {
    /// Wrap an authenticator. Requests must name their RP ID until a default is set with
    /// [`Self::with_default_rp_id`].
    pub fn new(authenticator: Authenticator<S, U>) -> Self {
        Self {
            authenticator,
            default_rp_id: None,
        }
    }

    /// Builder method for the RP ID used by requests which do not name one.
    pub fn with_default_rp_id(self, rp_id: impl Into<String>) -> Self {
        Self {
            default_rp_id: Some(rp_id.into()),
            ..self
        }
    }

    /// Access the wrapped authenticator.
    pub fn authenticator(&self) -> &Authenticator<S, U> {
        &self.authenticator
    }

    /// Exclusively access the wrapped authenticator.
    pub fn authenticator_mut(&mut self) -> &mut Authenticator<S, U> {
        &mut self.authenticator
    }

    fn resolve_rp_id(&self, rp_id: Option<&str>) -> Result<String, CeremonyError> {
        rp_id
            .or(self.default_rp_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(CeremonyError::InvalidRpId)
    }
}

#[async_trait::async_trait]
impl<S, U> CeremonyProvider for SoftwarePlatform<S, U>
where
    S: CredentialStore + Send + Sync,
    U: UserValidationMethod + Send + Sync,
{
    async fn create(
        &mut self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<CreatedPublicKeyCredential, CeremonyError> {
        let rp_id = self.resolve_rp_id(options.rp.id.as_deref())?;
        let selection = options.authenticator_selection.unwrap_or_default();
        let client_data_hash =
            client_data_hash(ClientDataType::Create, &options.challenge, &rp_id)?;

        let pub_key_cred_params = if options.pub_key_cred_params.is_empty() {
            PublicKeyCredentialParameters::default_algorithms()
        } else {
            options.pub_key_cred_params
        };

        let prf = options
            .extensions
            .and_then(|ext| ext.prf)
            .map(|prf| make_credential::PrfInput {
                eval: prf.eval.as_ref().map(prf_salts),
            });
        let prf_requested = prf.is_some();

        log::debug!("Creating a credential for {rp_id}");
        let response = self
            .authenticator
            .make_credential(make_credential::Request {
                client_data_hash,
                rp: PublicKeyCredentialRpEntity {
                    id: Some(rp_id),
                    name: options.rp.name,
                },
                user: options.user,
                pub_key_cred_params,
                options: make_credential::Options {
                    rk: selection.effective_resident_key() != ResidentKeyRequirement::Discouraged,
                    up: true,
                    uv: selection.user_verification.is_required(),
                },
                prf,
            })
            .await?;

        // A platform without PRF support reports the extension as disabled.
        let prf = prf_requested.then(|| match response.prf {
            Some(prf) => AuthenticationExtensionsPrfOutputs {
                enabled: Some(prf.enabled),
                results: prf.results.map(Into::into),
            },
            None => AuthenticationExtensionsPrfOutputs {
                enabled: Some(false),
                results: None,
            },
        });

        Ok(PublicKeyCredential {
            id: encoding::base64url(&response.credential_id),
            raw_id: response.credential_id,
            ty: PublicKeyCredentialType::PublicKey,
            response: AuthenticatorAttestationResponse {
                authenticator_data: response.auth_data,
                public_key: Some(response.public_key),
                public_key_algorithm: response.algorithm.to_i64(),
            },
            authenticator_attachment: Some(self.authenticator.attachment_type()),
            client_extension_results: AuthenticationExtensionsClientOutputs { prf },
        })
    }

    async fn assert(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<AuthenticatedPublicKeyCredential, CeremonyError> {
        let rp_id = self.resolve_rp_id(options.rp_id.as_deref())?;
        let client_data_hash = client_data_hash(ClientDataType::Get, &options.challenge, &rp_id)?;

        let prf_eval = options
            .extensions
            .and_then(|ext| ext.prf)
            .map(|prf| prf.eval.as_ref().map(prf_salts));
        let prf_requested = prf_eval.is_some();

        log::debug!("Asserting a credential of {rp_id}");
        let response = self
            .authenticator
            .get_assertion(get_assertion::Request {
                rp_id,
                client_data_hash,
                options: get_assertion::Options {
                    up: true,
                    uv: options.user_verification.is_required(),
                },
                prf: prf_eval.flatten(),
            })
            .await?;

        let prf = prf_requested.then(|| AuthenticationExtensionsPrfOutputs {
            enabled: None,
            results: response.prf.map(Into::into),
        });

        Ok(PublicKeyCredential {
            id: encoding::base64url(&response.credential_id),
            raw_id: response.credential_id,
            ty: PublicKeyCredentialType::PublicKey,
            response: AuthenticatorAssertionResponse {
                authenticator_data: response.auth_data,
                signature: response.signature,
                user_handle: response.user_handle,
            },
            authenticator_attachment: Some(self.authenticator.attachment_type()),
            client_extension_results: AuthenticationExtensionsClientOutputs { prf },
        })
    }
}

#[derive(Serialize)]
enum ClientDataType {
    #[serde(rename = "webauthn.create")]
    Create,
    #[serde(rename = "webauthn.get")]
    Get,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectedClientData {
    #[serde(rename = "type")]
    ty: ClientDataType,
    challenge: String,
    origin: String,
    cross_origin: bool,
}

/// SHA-256 of the client data JSON a browser would produce for an `https://{rp_id}` origin.
fn client_data_hash(
    ty: ClientDataType,
    challenge: &[u8],
    rp_id: &str,
) -> Result<Bytes, CeremonyError> {
    let client_data = CollectedClientData {
        ty,
        challenge: encoding::base64url(challenge),
        origin: format!("https://{rp_id}"),
        cross_origin: false,
    };
    let json = serde_json::to_vec(&client_data)
        .map_err(|_| CeremonyError::Authenticator(AuthenticatorError::Other.into()))?;
    Ok(sha256(&json).into())
}

/// Hash a PRF input into the salt given to the authenticator:
/// `SHA-256("WebAuthn PRF" || 0x00 || input)`.
fn prf_salt(input: &[u8]) -> [u8; 32] {
    sha256(
        &b"WebAuthn PRF"
            .iter()
            .chain(std::iter::once(&0x0))
            .chain(input)
            .cloned()
            .collect::<Vec<_>>(),
    )
}

fn prf_salts(eval: &AuthenticationExtensionsPrfValues) -> AuthenticatorPrfValues {
    AuthenticatorPrfValues {
        first: prf_salt(&eval.first),
        second: eval.second.as_ref().map(|second| prf_salt(second)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prf_salt_is_domain_separated() {
        let input = [0; 32];

        let salt = prf_salt(&input);

        let mut expected = b"WebAuthn PRF\0".to_vec();
        expected.extend_from_slice(&input);
        assert_eq!(salt, sha256(&expected));
        assert_ne!(salt, sha256(&input));
    }
}
