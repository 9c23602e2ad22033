use std::sync::Arc;

use coset::iana;
use p256::{
    ecdsa::{signature::Verifier, DerSignature, VerifyingKey},
    pkcs8::DecodePublicKey,
};
use passkey_prf_types::{
    crypto::sha256,
    rand::random_vec,
    webauthn::{
        PublicKeyCredentialParameters, PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity,
    },
};
use tokio::sync::Mutex;

use super::*;
use crate::{
    ctap2::{get_assertion, make_credential, AuthenticatorPrfValues},
    MemoryStore, MockUserValidationMethod, UserCheck,
};

fn make_request(prf: Option<make_credential::PrfInput>) -> make_credential::Request {
    make_credential::Request {
        client_data_hash: random_vec(32).into(),
        rp: PublicKeyCredentialRpEntity {
            id: Some("vault.example.com".into()),
            name: "Vault".into(),
        },
        user: PublicKeyCredentialUserEntity {
            id: random_vec(16).into(),
            display_name: "wendy".into(),
            name: "Appleseed".into(),
        },
        pub_key_cred_params: vec![PublicKeyCredentialParameters::public_key(
            iana::Algorithm::ES256,
        )],
        options: make_credential::Options {
            rk: true,
            up: true,
            uv: false,
        },
        prf,
    }
}

fn assertion_request(prf: Option<AuthenticatorPrfValues>) -> get_assertion::Request {
    get_assertion::Request {
        rp_id: "vault.example.com".into(),
        client_data_hash: random_vec(32).into(),
        options: get_assertion::Options {
            up: true,
            uv: false,
        },
        prf,
    }
}

fn salts(first: u8) -> AuthenticatorPrfValues {
    AuthenticatorPrfValues {
        first: [first; 32],
        second: None,
    }
}

#[tokio::test]
async fn make_credential_saves_to_the_store() {
    // Arrange
    let shared_store = Arc::new(Mutex::new(MemoryStore::new()));
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        shared_store.clone(),
        MockUserValidationMethod::present_user(1),
    );

    // Act
    let response = authenticator
        .make_credential(make_request(None))
        .await
        .expect("failed to make credential");

    // Assert
    let store = shared_store.lock().await;
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.iter().next().map(|c| &c.credential_id),
        Some(&response.credential_id)
    );
    assert_eq!(response.algorithm, iana::Algorithm::ES256);
}

#[tokio::test]
async fn make_credential_rejects_unsupported_algorithms_before_asking_the_user() {
    // Arrange
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::new(),
    );
    let mut request = make_request(None);
    request.pub_key_cred_params = vec![
        PublicKeyCredentialParameters::public_key(iana::Algorithm::EdDSA),
        PublicKeyCredentialParameters::public_key(iana::Algorithm::RS256),
    ];

    // Act
    let err = authenticator
        .make_credential(request)
        .await
        .expect_err("made a credential without a supported algorithm");

    // Assert
    assert_eq!(err, AuthenticatorError::UnsupportedAlgorithm);
    assert!(authenticator.store().is_empty());
}

#[tokio::test]
async fn make_credential_requires_an_rp_id() {
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::new(),
    );
    let mut request = make_request(None);
    request.rp.id = None;

    let err = authenticator
        .make_credential(request)
        .await
        .expect_err("made a credential without an rp id");

    assert_eq!(err, AuthenticatorError::InvalidParameter);
}

#[tokio::test]
async fn cancelled_prompt_saves_nothing() {
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::cancelling_user(1),
    );

    let err = authenticator
        .make_credential(make_request(None))
        .await
        .expect_err("made a credential without consent");

    assert_eq!(err, AuthenticatorError::KeepAliveCancel);
    assert!(authenticator.store().is_empty());
}

#[tokio::test]
async fn user_verification_requires_a_capable_method() {
    // Arrange
    let mut user_mock = MockUserValidationMethod::new();
    user_mock
        .expect_is_verification_enabled()
        .returning(|| None)
        .once();
    user_mock.expect_check_user().never();
    let mut authenticator = Authenticator::new(Aaguid::new_empty(), MemoryStore::new(), user_mock);
    let mut request = make_request(None);
    request.options.uv = true;

    // Act
    let err = authenticator
        .make_credential(request)
        .await
        .expect_err("verified a user without a verification method");

    // Assert
    assert_eq!(err, AuthenticatorError::UnsupportedOption);
}

#[tokio::test]
async fn user_presence_requires_a_capable_method() {
    // Arrange
    let mut user_mock = MockUserValidationMethod::new();
    user_mock.expect_is_presence_enabled().return_const(false);
    user_mock.expect_check_user().never();
    let mut authenticator = Authenticator::new(Aaguid::new_empty(), MemoryStore::new(), user_mock);

    // Act
    let err = authenticator
        .make_credential(make_request(None))
        .await
        .expect_err("tested presence without a presence capable method");

    // Assert
    assert_eq!(err, AuthenticatorError::UnsupportedOption);
    assert!(authenticator.store().is_empty());
}

#[tokio::test]
async fn server_side_credentials_are_not_supported() {
    // Arrange
    let mut user_mock = MockUserValidationMethod::new();
    user_mock.expect_check_user().never();
    let mut authenticator = Authenticator::new(Aaguid::new_empty(), MemoryStore::new(), user_mock);
    let mut request = make_request(None);
    request.options.rk = false;

    // Act
    let err = authenticator
        .make_credential(request)
        .await
        .expect_err("made a non discoverable credential");

    // Assert
    assert_eq!(err, AuthenticatorError::UnsupportedOption);
    assert!(authenticator.store().is_empty());
}

#[tokio::test]
async fn user_check_not_satisfying_the_request_is_denied() {
    // Arrange
    let mut user_mock = MockUserValidationMethod::new();
    user_mock.expect_is_presence_enabled().return_const(true);
    user_mock
        .expect_check_user()
        .returning(|_, _, _| {
            Ok(UserCheck {
                presence: false,
                verification: false,
            })
        })
        .once();
    let mut authenticator = Authenticator::new(Aaguid::new_empty(), MemoryStore::new(), user_mock);

    // Act
    let err = authenticator
        .make_credential(make_request(None))
        .await
        .expect_err("made a credential without user presence");

    // Assert
    assert_eq!(err, AuthenticatorError::OperationDenied);
}

#[tokio::test]
async fn attested_credential_data_layout() {
    // Arrange
    let aaguid = Aaguid([0xA5; 16]);
    let mut authenticator = Authenticator::new(
        aaguid,
        MemoryStore::new(),
        MockUserValidationMethod::present_user(1),
    );

    // Act
    let response = authenticator
        .make_credential(make_request(None))
        .await
        .expect("failed to make credential");

    // Assert
    let data = response.auth_data.as_slice();
    assert_eq!(&data[..32], &sha256(b"vault.example.com"));
    assert_eq!(data[32], flags::UP | flags::AT);
    assert_eq!(&data[33..37], &[0; 4]);
    assert_eq!(&data[37..53], &aaguid.0);
    let id_len = usize::from(u16::from_be_bytes([data[53], data[54]]));
    assert_eq!(&data[55..55 + id_len], response.credential_id.as_slice());
    assert!(data.len() > 55 + id_len);
}

#[tokio::test]
async fn prf_is_not_enabled_without_config() {
    // Arrange
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::present_user(2),
    );

    // Act
    let made = authenticator
        .make_credential(make_request(Some(Default::default())))
        .await
        .expect("failed to make credential");
    let asserted = authenticator
        .get_assertion(assertion_request(Some(salts(1))))
        .await
        .expect("failed to get assertion");

    // Assert
    assert!(made.prf.is_none());
    assert!(asserted.prf.is_none());
}

#[tokio::test]
async fn prf_is_only_enabled_when_requested() {
    // Arrange
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::present_user(2),
    )
    .prf(PrfConfig::new());

    // Act
    let made = authenticator
        .make_credential(make_request(None))
        .await
        .expect("failed to make credential");
    let asserted = authenticator
        .get_assertion(assertion_request(Some(salts(1))))
        .await
        .expect("failed to get assertion");

    // Assert
    assert!(made.prf.is_none());
    assert!(asserted.prf.is_none());
}

#[tokio::test]
async fn prf_outputs_are_stable_per_salt() {
    // Arrange
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::present_user(4),
    )
    .prf(PrfConfig::new());

    // Act
    let made = authenticator
        .make_credential(make_request(Some(make_credential::PrfInput {
            eval: Some(salts(1)),
        })))
        .await
        .expect("failed to make credential");
    let mut outputs = Vec::new();
    for first in [1, 1, 2] {
        let response = authenticator
            .get_assertion(assertion_request(Some(salts(first))))
            .await
            .expect("failed to get assertion");
        outputs.push(response.prf.expect("missing prf output"));
    }

    // Assert
    let made = made.prf.expect("missing prf output");
    assert!(made.enabled);
    assert_eq!(made.results, None);
    assert_eq!(outputs[0], outputs[1]);
    assert_ne!(outputs[0].first, outputs[2].first);
}

#[tokio::test]
async fn prf_evaluated_on_creation_matches_assertion() {
    // Arrange
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::present_user(2),
    )
    .prf(PrfConfig::new().enable_on_make_credential());

    // Act
    let made = authenticator
        .make_credential(make_request(Some(make_credential::PrfInput {
            eval: Some(salts(9)),
        })))
        .await
        .expect("failed to make credential");
    let asserted = authenticator
        .get_assertion(assertion_request(Some(salts(9))))
        .await
        .expect("failed to get assertion");

    // Assert
    assert_eq!(made.prf.and_then(|prf| prf.results), asserted.prf);
}

#[tokio::test]
async fn assertion_without_credentials_informs_the_user() {
    // Arrange
    let mut user_mock = MockUserValidationMethod::new();
    user_mock
        .expect_check_user()
        .withf(|hint, _, _| matches!(hint, UiHint::InformNoCredentialsFound))
        .returning(|_, _, _| {
            Ok(UserCheck {
                presence: false,
                verification: false,
            })
        })
        .once();
    let authenticator = Authenticator::new(Aaguid::new_empty(), MemoryStore::new(), user_mock);

    // Act
    let err = authenticator
        .get_assertion(assertion_request(None))
        .await
        .expect_err("asserted a missing credential");

    // Assert
    assert_eq!(err, AuthenticatorError::NoCredentials);
}

#[tokio::test]
async fn assertion_signature_verifies_with_created_public_key() {
    // Arrange
    let mut authenticator = Authenticator::new(
        Aaguid::new_empty(),
        MemoryStore::new(),
        MockUserValidationMethod::present_user(2),
    );
    let made = authenticator
        .make_credential(make_request(None))
        .await
        .expect("failed to make credential");
    let request = assertion_request(None);
    let client_data_hash = request.client_data_hash.clone();

    // Act
    let asserted = authenticator
        .get_assertion(request)
        .await
        .expect("failed to get assertion");

    // Assert
    assert_eq!(asserted.credential_id, made.credential_id);
    assert_eq!(asserted.auth_data[32], flags::UP);
    let verifying_key =
        VerifyingKey::from_public_key_der(&made.public_key).expect("not a valid SPKI");
    let signature =
        DerSignature::try_from(asserted.signature.as_slice()).expect("not a DER signature");
    let signed = [asserted.auth_data.as_slice(), client_data_hash.as_slice()].concat();
    verifying_key
        .verify(&signed, &signature)
        .expect("failed to verify signature");
}
