//! The seam between key derivation and the raw cryptographic primitives.
//!
//! The vocabulary mirrors WebCrypto's `importKey` and `deriveKey` so that a [`CryptoProvider`] can
//! be backed by a browser's `SubtleCrypto` as well as by [`RustCryptoProvider`].

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod rust_crypto;

pub use self::rust_crypto::{CryptoKey, RustCryptoProvider, AES_GCM_NONCE_LEN};

bitflags! {
    /// The operations a key may be used for.
    ///
    /// Serialized as a list of WebCrypto usage strings, e.g. `["encrypt", "decrypt"]`.
    ///
    /// <https://w3c.github.io/webcrypto/#dfn-KeyUsage>
    #[repr(transparent)]
    #[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct KeyUsages: u8 {
        /// `encrypt`
        const ENCRYPT = 1 << 0;
        /// `decrypt`
        const DECRYPT = 1 << 1;
        /// `sign`
        const SIGN = 1 << 2;
        /// `verify`
        const VERIFY = 1 << 3;
        /// `deriveKey`
        const DERIVE_KEY = 1 << 4;
        /// `deriveBits`
        const DERIVE_BITS = 1 << 5;
        /// `wrapKey`
        const WRAP_KEY = 1 << 6;
        /// `unwrapKey`
        const UNWRAP_KEY = 1 << 7;
    }
}

const USAGE_NAMES: [(KeyUsages, &str); 8] = [
    (KeyUsages::ENCRYPT, "encrypt"),
    (KeyUsages::DECRYPT, "decrypt"),
    (KeyUsages::SIGN, "sign"),
    (KeyUsages::VERIFY, "verify"),
    (KeyUsages::DERIVE_KEY, "deriveKey"),
    (KeyUsages::DERIVE_BITS, "deriveBits"),
    (KeyUsages::WRAP_KEY, "wrapKey"),
    (KeyUsages::UNWRAP_KEY, "unwrapKey"),
];

impl KeyUsages {
    /// The WebCrypto names of the usages in this set.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        USAGE_NAMES
            .iter()
            .filter(|(usage, _)| self.contains(*usage))
            .map(|(_, name)| *name)
    }

    /// Parse a single WebCrypto usage name.
    pub fn from_webcrypto_name(name: &str) -> Option<Self> {
        USAGE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(usage, _)| *usage)
    }
}

impl fmt::Display for KeyUsages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.names().collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl Serialize for KeyUsages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for KeyUsages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(KeyUsages::empty(), |usages, name| {
            KeyUsages::from_webcrypto_name(name).map(|usage| usages | usage).ok_or_else(|| {
                <D::Error as serde::de::Error>::unknown_variant(
                    name,
                    &[
                        "encrypt",
                        "decrypt",
                        "sign",
                        "verify",
                        "deriveKey",
                        "deriveBits",
                        "wrapKey",
                        "unwrapKey",
                    ],
                )
            })
        })
    }
}

/// Hash functions usable with HKDF and HMAC.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
}

/// The shape of a key to derive, in the manner of a WebCrypto algorithm dictionary such as
/// `{"name": "AES-GCM", "length": 256}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum DerivedKeyType {
    /// An AES key for Galois/Counter Mode.
    #[serde(rename = "AES-GCM")]
    AesGcm {
        /// Key length in bits: 128, 192 or 256.
        length: u32,
    },
    /// An AES key for Counter Mode.
    #[serde(rename = "AES-CTR")]
    AesCtr {
        /// Key length in bits: 128, 192 or 256.
        length: u32,
    },
    /// An AES key for Cipher Block Chaining.
    #[serde(rename = "AES-CBC")]
    AesCbc {
        /// Key length in bits: 128, 192 or 256.
        length: u32,
    },
    /// An AES key wrapping key.
    #[serde(rename = "AES-KW")]
    AesKw {
        /// Key length in bits: 128, 192 or 256.
        length: u32,
    },
    /// An HMAC key.
    #[serde(rename = "HMAC")]
    Hmac {
        /// The hash function of the HMAC.
        #[serde(default)]
        hash: HashAlgorithm,
        /// Key length in bits, defaulting to the block size of `hash`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<u32>,
    },
}

/// Largest output of HKDF-SHA-256: 255 blocks of 32 bytes.
const MAX_HKDF_SHA256_LEN: usize = 255 * 32;

impl DerivedKeyType {
    /// AES-256-GCM
    pub const AES_256_GCM: Self = Self::AesGcm { length: 256 };

    /// The usages a key of this type may be created with.
    pub fn allowed_usages(&self) -> KeyUsages {
        match self {
            Self::AesGcm { .. } | Self::AesCtr { .. } | Self::AesCbc { .. } => {
                KeyUsages::ENCRYPT
                    | KeyUsages::DECRYPT
                    | KeyUsages::WRAP_KEY
                    | KeyUsages::UNWRAP_KEY
            }
            Self::AesKw { .. } => KeyUsages::WRAP_KEY | KeyUsages::UNWRAP_KEY,
            Self::Hmac { .. } => KeyUsages::SIGN | KeyUsages::VERIFY,
        }
    }

    /// Check that `usages` is a non empty subset of [`Self::allowed_usages`].
    pub fn check_usages(&self, usages: KeyUsages) -> Result<(), CryptoError> {
        if usages.is_empty() || !self.allowed_usages().contains(usages) {
            return Err(CryptoError::UnsupportedUsage(usages));
        }
        Ok(())
    }

    /// The length of the key material in bytes.
    pub fn key_len(&self) -> Result<usize, CryptoError> {
        let bits = match *self {
            Self::AesGcm { length }
            | Self::AesCtr { length }
            | Self::AesCbc { length }
            | Self::AesKw { length } => match length {
                128 | 192 | 256 => length,
                _ => return Err(CryptoError::UnsupportedKeyType),
            },
            Self::Hmac {
                hash: HashAlgorithm::Sha256,
                length,
            } => length.unwrap_or(512),
        };

        if bits == 0 || bits % 8 != 0 {
            return Err(CryptoError::UnsupportedKeyType);
        }
        let len = usize::try_from(bits / 8).map_err(|_| CryptoError::UnsupportedKeyType)?;
        if len > MAX_HKDF_SHA256_LEN {
            return Err(CryptoError::UnsupportedKeyType);
        }
        Ok(len)
    }
}

/// Format of the key data given to [`CryptoProvider::import_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// Unformatted key bytes.
    Raw,
}

/// Algorithm of a key imported with [`CryptoProvider::import_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAlgorithm {
    /// HKDF input key material, only usable to derive other keys.
    Hkdf,
}

/// The algorithm a key is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    /// HKDF input key material.
    Hkdf,
    /// A key derived for the given type.
    Derived(DerivedKeyType),
}

/// Parameters of an HKDF derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HkdfParams {
    /// The hash function, always SHA-256.
    pub hash: HashAlgorithm,
    /// The HKDF salt.
    pub salt: Vec<u8>,
    /// Application specific context binding the derived key to a purpose.
    pub info: Vec<u8>,
}

/// Errors produced by a [`CryptoProvider`] or by using a [`CryptoKey`].
#[typeshare::typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content")]
pub enum CryptoError {
    /// The usages are empty or not permitted for the key type.
    UnsupportedUsage(KeyUsages),
    /// The key type, its length, or the algorithm of the key used, is not supported.
    UnsupportedKeyType,
    /// The key material is empty or cannot be used by the algorithm.
    InvalidKeyMaterial,
    /// The key cannot be exported, or an HKDF key was requested to be extractable.
    NotExtractable,
    /// The key was not created with the usage required by the operation.
    UsageNotPermitted(KeyUsages),
    /// The nonce does not have the length required by the algorithm.
    InvalidNonce,
    /// The primitive failed, e.g. a ciphertext did not authenticate.
    OperationFailed,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::UnsupportedUsage(usages) => {
                write!(f, "usages {usages} are not supported for this key type")
            }
            CryptoError::UnsupportedKeyType => write!(f, "the key type is not supported"),
            CryptoError::InvalidKeyMaterial => write!(f, "the key material is invalid"),
            CryptoError::NotExtractable => write!(f, "the key is not extractable"),
            CryptoError::UsageNotPermitted(usage) => {
                write!(f, "the key was not created with usage {usage}")
            }
            CryptoError::InvalidNonce => write!(f, "the nonce has an invalid length"),
            CryptoError::OperationFailed => write!(f, "the cryptographic operation failed"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// Raw cryptographic primitives used to turn a PRF output into a key.
///
/// Derivation first imports the PRF output as a non-extractable HKDF key with
/// [`KeyUsages::DERIVE_KEY`], then derives the caller's key from it.
#[cfg_attr(any(test, feature = "testable"), mockall::automock(type Key = CryptoKey;))]
pub trait CryptoProvider {
    /// The provider's key handle.
    type Key;

    /// Import `key_data` as a key of `algorithm`.
    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &[u8],
        algorithm: ImportAlgorithm,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::Key, CryptoError>;

    /// Derive a key of `key_type` from `base_key`.
    fn derive_key(
        &self,
        params: &HkdfParams,
        base_key: &Self::Key,
        key_type: &DerivedKeyType,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::Key, CryptoError>;
}
