use passkey_prf_types::{
    crypto::hmac_sha256,
    webauthn::{
        AuthenticatedPublicKeyCredential, AuthenticationExtensionsClientOutputs,
        AuthenticationExtensionsPrfOutputs, AuthenticationExtensionsPrfValues,
        AuthenticatorAssertionResponse, AuthenticatorAttestationResponse,
        CreatedPublicKeyCredential, PublicKeyCredential, PublicKeyCredentialRequestOptions,
        PublicKeyCredentialRpEntity, PublicKeyCredentialType,
    },
};

use super::*;


/// The PRF output returned by the stubbed authenticator.
pub(crate) const PRF_FIXTURE: [u8; 32] = [0x5A; 32];

pub(crate) fn rp() -> PublicKeyCredentialRpEntity {
    PublicKeyCredentialRpEntity {
        id: Some("example.com".into()),
        name: "Example".into(),
    }
}

/// An assertion whose PRF entry carries `first` as its results, or no results when `None`.
pub(crate) fn assertion_with_prf(first: Option<&[u8]>) -> AuthenticatedPublicKeyCredential {
    PublicKeyCredential {
        id: "AAAA".into(),
        raw_id: vec![0; 3].into(),
        ty: PublicKeyCredentialType::PublicKey,
        response: AuthenticatorAssertionResponse {
            authenticator_data: vec![0; 37].into(),
            signature: vec![0; 64].into(),
            user_handle: Some(b"user".to_vec().into()),
        },
        authenticator_attachment: None,
        client_extension_results: AuthenticationExtensionsClientOutputs {
            prf: Some(AuthenticationExtensionsPrfOutputs {
                enabled: None,
                results: first.map(AuthenticationExtensionsPrfValues::first),
            }),
        },
    }
}

pub(crate) fn created_credential(prf_enabled: Option<bool>) -> CreatedPublicKeyCredential {
    PublicKeyCredential {
        id: "AAAA".into(),
        raw_id: vec![0; 3].into(),
        ty: PublicKeyCredentialType::PublicKey,
        response: AuthenticatorAttestationResponse {
            authenticator_data: vec![0; 37].into(),
            public_key: None,
            public_key_algorithm: -7,
        },
        authenticator_attachment: None,
        client_extension_results: AuthenticationExtensionsClientOutputs {
            prf: prf_enabled.map(|enabled| AuthenticationExtensionsPrfOutputs {
                enabled: Some(enabled),
                results: None,
            }),
        },
    }
}

fn requested_prf_salt(options: &PublicKeyCredentialRequestOptions) -> Option<Vec<u8>> {
    options
        .extensions
        .as_ref()
        .and_then(|ext| ext.prf.as_ref())
        .and_then(|prf| prf.eval.as_ref())
        .map(|eval| eval.first.to_vec())
}

/// A ceremony always returning [`PRF_FIXTURE`], whatever the salt.
pub(crate) fn fixed_prf_ceremony(times: usize) -> MockCeremonyProvider {
    let mut ceremony = MockCeremonyProvider::new();
    ceremony
        .expect_assert()
        .returning(|_| Ok(assertion_with_prf(Some(PRF_FIXTURE.as_slice()))))
        .times(times);
    ceremony
}

/// A ceremony whose PRF is keyed with `secret`, so that its output depends on the salt like a
/// real authenticator's.
pub(crate) fn keyed_prf_ceremony(secret: [u8; 32], times: usize) -> MockCeremonyProvider {
    let mut ceremony = MockCeremonyProvider::new();
    ceremony
        .expect_assert()
        .returning(move |options| {
            let salt = requested_prf_salt(&options).ok_or(CeremonyError::NotSupported)?;
            let output = hmac_sha256(&secret, &salt).ok_or(CeremonyError::NotSupported)?;
            Ok(assertion_with_prf(Some(output.as_slice())))
        })
        .times(times);
    ceremony
}
