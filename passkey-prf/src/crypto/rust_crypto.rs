use std::fmt;

use aes_gcm::{
    aead::{consts::U12, Aead, AeadCore, KeyInit, Payload},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{
    CryptoError, CryptoProvider, DerivedKeyType, HashAlgorithm, HkdfParams, ImportAlgorithm,
    KeyAlgorithm, KeyFormat, KeyUsages,
};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Length of an AES-GCM nonce in bytes.
pub const AES_GCM_NONCE_LEN: usize = 12;

/// A [`CryptoProvider`] backed by the RustCrypto crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

/// A key handle of the [`RustCryptoProvider`].
///
/// The key material is zeroed when the handle is dropped and is only readable through
/// [`Self::export_raw`] if the key was created extractable.
#[derive(Clone)]
pub struct CryptoKey {
    algorithm: KeyAlgorithm,
    extractable: bool,
    usages: KeyUsages,
    material: Zeroizing<Vec<u8>>,
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("algorithm", &self.algorithm)
            .field("extractable", &self.extractable)
            .field("usages", &self.usages)
            .finish_non_exhaustive()
    }
}

impl CryptoKey {
    /// The algorithm this key is bound to.
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// Whether [`Self::export_raw`] is allowed.
    pub fn extractable(&self) -> bool {
        self.extractable
    }

    /// The operations this key may be used for.
    pub fn usages(&self) -> KeyUsages {
        self.usages
    }

    /// Export the raw key material.
    pub fn export_raw(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        if !self.extractable {
            return Err(CryptoError::NotExtractable);
        }
        Ok(self.material.clone())
    }

    /// Encrypt `plaintext` with AES-GCM, returning the ciphertext followed by the tag.
    pub fn encrypt(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let length = self.aes_gcm_length(KeyUsages::ENCRYPT, nonce)?;
        let payload = Payload {
            msg: plaintext,
            aad,
        };
        match length {
            128 => seal::<Aes128Gcm>(&self.material, nonce, payload),
            192 => seal::<Aes192Gcm>(&self.material, nonce, payload),
            256 => seal::<Aes256Gcm>(&self.material, nonce, payload),
            _ => Err(CryptoError::UnsupportedKeyType),
        }
    }

    /// Decrypt and authenticate an AES-GCM `ciphertext` produced by [`Self::encrypt`].
    pub fn decrypt(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let length = self.aes_gcm_length(KeyUsages::DECRYPT, nonce)?;
        let payload = Payload {
            msg: ciphertext,
            aad,
        };
        match length {
            128 => open::<Aes128Gcm>(&self.material, nonce, payload),
            192 => open::<Aes192Gcm>(&self.material, nonce, payload),
            256 => open::<Aes256Gcm>(&self.material, nonce, payload),
            _ => Err(CryptoError::UnsupportedKeyType),
        }
    }

    /// Compute the HMAC-SHA-256 tag of `data`.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mac = self.hmac(KeyUsages::SIGN, data)?;
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Check an HMAC-SHA-256 `tag` of `data` in constant time.
    pub fn verify(&self, data: &[u8], tag: &[u8]) -> Result<bool, CryptoError> {
        let mac = self.hmac(KeyUsages::VERIFY, data)?;
        Ok(mac.verify_slice(tag).is_ok())
    }

    fn require(&self, usage: KeyUsages) -> Result<(), CryptoError> {
        if !self.usages.contains(usage) {
            return Err(CryptoError::UsageNotPermitted(usage));
        }
        Ok(())
    }

    fn aes_gcm_length(&self, usage: KeyUsages, nonce: &[u8]) -> Result<u32, CryptoError> {
        let KeyAlgorithm::Derived(DerivedKeyType::AesGcm { length }) = self.algorithm else {
            return Err(CryptoError::UnsupportedKeyType);
        };
        self.require(usage)?;
        if nonce.len() != AES_GCM_NONCE_LEN {
            return Err(CryptoError::InvalidNonce);
        }
        Ok(length)
    }

    fn hmac(&self, usage: KeyUsages, data: &[u8]) -> Result<Hmac<Sha256>, CryptoError> {
        let KeyAlgorithm::Derived(DerivedKeyType::Hmac {
            hash: HashAlgorithm::Sha256,
            ..
        }) = self.algorithm
        else {
            return Err(CryptoError::UnsupportedKeyType);
        };
        self.require(usage)?;

        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&self.material)
            .map_err(|_| CryptoError::InvalidKeyMaterial)?;
        mac.update(data);
        Ok(mac)
    }
}

fn seal<C>(key: &[u8], nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, CryptoError>
where
    C: KeyInit + Aead + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyMaterial)?;
    cipher
        .encrypt(Nonce::from_slice(nonce), payload)
        .map_err(|_| CryptoError::OperationFailed)
}

fn open<C>(key: &[u8], nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, CryptoError>
where
    C: KeyInit + Aead + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyMaterial)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), payload)
        .map_err(|_| CryptoError::OperationFailed)
}

impl CryptoProvider for RustCryptoProvider {
    type Key = CryptoKey;

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &[u8],
        algorithm: ImportAlgorithm,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<CryptoKey, CryptoError> {
        let KeyFormat::Raw = format;
        let ImportAlgorithm::Hkdf = algorithm;

        if extractable {
            return Err(CryptoError::NotExtractable);
        }
        let allowed = KeyUsages::DERIVE_KEY | KeyUsages::DERIVE_BITS;
        if usages.is_empty() || !allowed.contains(usages) {
            return Err(CryptoError::UnsupportedUsage(usages));
        }
        if key_data.is_empty() {
            return Err(CryptoError::InvalidKeyMaterial);
        }

        Ok(CryptoKey {
            algorithm: KeyAlgorithm::Hkdf,
            extractable,
            usages,
            material: Zeroizing::new(key_data.to_vec()),
        })
    }

    fn derive_key(
        &self,
        params: &HkdfParams,
        base_key: &CryptoKey,
        key_type: &DerivedKeyType,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<CryptoKey, CryptoError> {
        if base_key.algorithm != KeyAlgorithm::Hkdf {
            return Err(CryptoError::UnsupportedKeyType);
        }
        base_key.require(KeyUsages::DERIVE_KEY)?;
        key_type.check_usages(usages)?;
        let len = key_type.key_len()?;

        let HashAlgorithm::Sha256 = params.hash;
        let hkdf = Hkdf::<Sha256>::new(Some(params.salt.as_slice()), &base_key.material);
        let mut material = Zeroizing::new(vec![0; len]);
        hkdf.expand(&params.info, &mut material)
            .map_err(|_| CryptoError::UnsupportedKeyType)?;

        log::debug!("Derived a {key_type:?} key with usages {usages}");

        Ok(CryptoKey {
            algorithm: KeyAlgorithm::Derived(*key_type),
            extractable,
            usages,
            material,
        })
    }
}
