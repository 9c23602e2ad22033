use std::fmt;

use coset::{iana, CborSerializable, CoseKeyBuilder};
use p256::{
    ecdsa::{signature::Signer, Signature, SigningKey},
    pkcs8::EncodePublicKey,
    SecretKey,
};
use passkey_prf_types::{rand::random_vec, Bytes};
use zeroize::Zeroizing;

use crate::AuthenticatorError;

/// A discoverable credential as kept by a [`CredentialStore`](crate::CredentialStore).
///
/// The `Debug` output never includes the private key or the PRF secret.
#[derive(Clone)]
pub struct Credential {
    /// The credential's id, chosen by the authenticator.
    pub credential_id: Bytes,

    /// The relying party the credential is scoped to.
    pub rp_id: String,

    /// The user handle given at creation.
    pub user_handle: Option<Bytes>,

    /// The algorithm of [`Self::private_key`].
    pub algorithm: iana::Algorithm,

    /// The P-256 private scalar.
    pub private_key: Zeroizing<Vec<u8>>,

    /// The `CredRandom` of the hmac-secret extension, used as the key of the PRF.
    pub prf_secret: Option<Zeroizing<Vec<u8>>>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("credential_id", &self.credential_id)
            .field("rp_id", &self.rp_id)
            .field("user_handle", &self.user_handle)
            .field("algorithm", &self.algorithm)
            .field("prf_enabled", &self.prf_secret.is_some())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.credential_id == other.credential_id && self.rp_id == other.rp_id
    }
}

impl Credential {
    /// Generate a new ES256 credential with a random 16 byte id.
    pub(crate) fn generate(
        rp_id: String,
        user_handle: Option<Bytes>,
        prf_secret: Option<Zeroizing<Vec<u8>>>,
    ) -> Self {
        let private_key = {
            let mut rng = rand::thread_rng();
            SecretKey::random(&mut rng)
        };

        Self {
            credential_id: random_vec(16).into(),
            rp_id,
            user_handle,
            algorithm: iana::Algorithm::ES256,
            private_key: Zeroizing::new(private_key.to_bytes().to_vec()),
            prf_secret,
        }
    }

    fn secret_key(&self) -> Result<SecretKey, AuthenticatorError> {
        if self.algorithm != iana::Algorithm::ES256 {
            return Err(AuthenticatorError::UnsupportedAlgorithm);
        }
        SecretKey::from_slice(&self.private_key).map_err(|_| AuthenticatorError::InvalidCredential)
    }

    /// The public key as a DER encoded SubjectPublicKeyInfo.
    pub fn public_key_der(&self) -> Result<Bytes, AuthenticatorError> {
        self.secret_key()?
            .public_key()
            .to_public_key_der()
            .map(|der| der.as_ref().to_vec().into())
            .map_err(|_| AuthenticatorError::InvalidCredential)
    }

    /// The public key as a CBOR encoded COSE key, as found in attested credential data.
    pub(crate) fn public_key_cose(&self) -> Result<Vec<u8>, AuthenticatorError> {
        let public_key = SigningKey::from(self.secret_key()?)
            .verifying_key()
            .to_encoded_point(false);
        let (Some(x), Some(y)) = (public_key.x(), public_key.y()) else {
            return Err(AuthenticatorError::InvalidCredential);
        };

        CoseKeyBuilder::new_ec2_pub_key(iana::EllipticCurve::P_256, x.to_vec(), y.to_vec())
            .algorithm(self.algorithm)
            .build()
            .to_vec()
            .map_err(|_| AuthenticatorError::Other)
    }

    /// Sign `data` with the credential's private key, returning a DER encoded signature.
    pub(crate) fn sign(&self, data: &[u8]) -> Result<Bytes, AuthenticatorError> {
        let signing_key = SigningKey::from(self.secret_key()?);
        let signature: Signature = signing_key.sign(data);
        Ok(signature.to_der().as_bytes().to_vec().into())
    }
}

#[cfg(test)]
mod tests {
    use p256::{
        ecdsa::{signature::Verifier, DerSignature, VerifyingKey},
        pkcs8::DecodePublicKey,
    };

    use super::*;

    #[test]
    fn signature_verifies_with_exported_public_key() {
        let credential = Credential::generate("example.com".into(), None, None);
        let data = b"authenticator data and client data hash";

        let signature = credential.sign(data).expect("failed to sign");
        let public_key = credential.public_key_der().expect("failed to export");

        let verifying_key =
            VerifyingKey::from_public_key_der(&public_key).expect("not a valid SPKI");
        let signature = DerSignature::try_from(signature.as_slice()).expect("not a DER signature");
        verifying_key
            .verify(data, &signature)
            .expect("failed to verify signature");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let credential = Credential::generate(
            "example.com".into(),
            None,
            Some(Zeroizing::new(vec![0xAB; 32])),
        );

        let debug = format!("{credential:?}");

        assert!(debug.contains("prf_enabled: true"));
        assert!(!debug.contains("prf_secret"));
        assert!(!debug.contains("private_key"));
    }
}
