//! Enroll a credential with the software platform authenticator, then derive and use an
//! AES-256-GCM key from it.

use passkey_prf::{
    Client, DeriveOptions, DerivedKeyType, EnrollOptions, KeyUsages, SoftwarePlatform,
    AES_GCM_NONCE_LEN,
};
use passkey_prf_authenticator::{
    Aaguid, Authenticator, AuthenticatorError, MemoryStore, PrfConfig, UiHint, UserCheck,
    UserValidationMethod,
};
use passkey_prf_types::{rand::random_vec, webauthn::PublicKeyCredentialRpEntity};

/// Approves every prompt, standing in for a user tapping "Continue".
struct ApproveAll;

#[async_trait::async_trait]
impl UserValidationMethod for ApproveAll {
    async fn check_user<'a>(
        &self,
        hint: UiHint<'a>,
        presence: bool,
        _verification: bool,
    ) -> Result<UserCheck, AuthenticatorError> {
        println!("prompt: {hint:?}");
        Ok(UserCheck {
            presence,
            verification: false,
        })
    }

    fn is_presence_enabled(&self) -> bool {
        true
    }

    fn is_verification_enabled(&self) -> Option<bool> {
        None
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let authenticator = Authenticator::new(Aaguid::new_empty(), MemoryStore::new(), ApproveAll)
        .prf(PrfConfig::new());
    let mut client = Client::new(SoftwarePlatform::new(authenticator));

    let credential = client
        .enroll(EnrollOptions::new(PublicKeyCredentialRpEntity {
            id: Some("example.com".into()),
            name: "Example".into(),
        }))
        .await?;
    println!("enrolled credential {}", credential.id);

    let options = DeriveOptions::new(
        b"notes encryption".to_vec(),
        DerivedKeyType::AES_256_GCM,
        KeyUsages::ENCRYPT | KeyUsages::DECRYPT,
    )
    .with_rp_id("example.com");
    let key = client.derive_key(options.clone()).await?;

    let nonce = random_vec(AES_GCM_NONCE_LEN);
    let ciphertext = key.encrypt(&nonce, b"meet at noon", b"")?;

    // A later session derives the same key again.
    let again = client.derive_key(options).await?;
    let plaintext = again.decrypt(&nonce, &ciphertext, b"")?;
    println!("decrypted: {}", String::from_utf8_lossy(&plaintext));

    Ok(())
}
