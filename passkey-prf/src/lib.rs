//! # Passkey PRF
//!
//! This crate derives symmetric keys bound to a passkey. Instead of a password, possession of a
//! discoverable credential whose authenticator supports the [PRF extension] unlocks the key:
//!
//! 1. [`Client::enroll`] creates the credential once, probing for PRF support.
//! 2. [`Client::derive_key`] splits a 64 byte [`Salt`] in two halves, asks the authenticator to
//!    evaluate its PRF over the first half during an assertion, and expands the PRF output with
//!    HKDF-SHA-256 over the second half and the caller's `info`.
//!
//! The same credential, salt and info always derive the same key. The PRF output never leaves the
//! crate and derived keys are non-extractable unless requested otherwise.
//!
//! Ceremonies go through a [`CeremonyProvider`], such as the in process [`SoftwarePlatform`], and
//! the primitives through a [`CryptoProvider`], by default the [`RustCryptoProvider`].
//!
//! [PRF extension]: https://w3c.github.io/webauthn/#prf-extension

mod ceremony;
mod crypto;
mod derive;
mod error;
mod options;
mod prf;
mod provision;
mod salt;

#[cfg(test)]
mod tests;

use passkey_prf_types::webauthn::CreatedPublicKeyCredential;

pub use self::{
    ceremony::{CeremonyError, CeremonyProvider, SoftwarePlatform},
    crypto::{
        CryptoError, CryptoKey, CryptoProvider, DerivedKeyType, HashAlgorithm, HkdfParams,
        ImportAlgorithm, KeyAlgorithm, KeyFormat, KeyUsages, RustCryptoProvider,
        AES_GCM_NONCE_LEN,
    },
    error::Error,
    options::{DeriveOptions, EnrollOptions},
    salt::{split as split_salt, HkdfSalt, PrfSalt, Salt, HALF_SALT_LEN, SALT_LEN},
};

#[cfg(any(test, feature = "testable"))]
pub use self::{ceremony::MockCeremonyProvider, crypto::MockCryptoProvider};

/// A `Client` enrolls a PRF capable credential and derives keys from it, through a
/// [`CeremonyProvider`] and a [`CryptoProvider`].
pub struct Client<C, P = RustCryptoProvider> {
    ceremony: C,
    crypto: P,
}

impl<C> Client<C, RustCryptoProvider>
where
    C: CeremonyProvider,
{
    /// Create a `Client` deriving keys with the [`RustCryptoProvider`].
    pub fn new(ceremony: C) -> Self {
        Self {
            ceremony,
            crypto: RustCryptoProvider,
        }
    }
}

impl<C, P> Client<C, P>
where
    C: CeremonyProvider,
    P: CryptoProvider,
{
    /// Create a `Client` with a custom [`CryptoProvider`].
    pub fn with_crypto_provider(ceremony: C, crypto: P) -> Self {
        Self { ceremony, crypto }
    }

    /// Access the [`CeremonyProvider`].
    pub fn ceremony(&self) -> &C {
        &self.ceremony
    }

    /// Create a discoverable credential for `options.rp`, requesting the PRF extension.
    ///
    /// The returned credential is informative, it does not need to be kept to derive keys.
    /// An authenticator reporting PRF as disabled is logged but does not fail enrollment.
    pub async fn enroll(
        &mut self,
        options: EnrollOptions,
    ) -> Result<CreatedPublicKeyCredential, Error> {
        provision::create(&mut self.ceremony, options).await
    }

    /// Derive a key from the PRF of the discoverable credential of `options.rp_id`.
    ///
    /// The salt is split before the assertion, the extension results are checked before anything
    /// is handed to the [`CryptoProvider`], and the PRF output is zeroed once the key is derived.
    pub async fn derive_key(&self, options: DeriveOptions) -> Result<P::Key, Error> {
        let (prf_salt, hkdf_salt) = salt::split(options.salt.as_bytes())?;

        let secret = prf::evaluate(
            &self.ceremony,
            options.rp_id,
            &prf_salt,
            options.user_verification,
        )
        .await?;

        derive::derive(
            &self.crypto,
            &secret,
            &hkdf_salt,
            &options.info,
            &options.key_type,
            options.extractable,
            options.usages,
        )
    }
}
