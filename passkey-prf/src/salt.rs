//! Partitioning of the caller's salt between the PRF evaluation and HKDF.

use passkey_prf_types::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Length of a [`Salt`] in bytes.
pub const SALT_LEN: usize = 64;

/// Length of each half of a [`Salt`] in bytes.
pub const HALF_SALT_LEN: usize = SALT_LEN / 2;

/// A 64 byte salt, the concatenation of a [`PrfSalt`] and a [`HkdfSalt`].
///
/// The default salt is 64 zero bytes. Any other length is rejected with
/// [`Error::InvalidSaltLength`], it is never truncated or padded.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// The salt's bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl Default for Salt {
    fn default() -> Self {
        Self([0; SALT_LEN])
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Salt")
            .field(&passkey_prf_types::encoding::base64url(&self.0))
            .finish()
    }
}

impl From<[u8; SALT_LEN]> for Salt {
    fn from(value: [u8; SALT_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Salt {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        value
            .try_into()
            .map(Self)
            .map_err(|_| Error::InvalidSaltLength { len: value.len() })
    }
}

impl Serialize for Salt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Bytes::from(self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Bytes::deserialize(deserializer)?;
        Salt::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::invalid_length(bytes.len(), &"a 64 byte salt"))
    }
}

/// The first half of a [`Salt`], evaluated by the authenticator's PRF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrfSalt([u8; HALF_SALT_LEN]);

/// The second half of a [`Salt`], used as the HKDF salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HkdfSalt([u8; HALF_SALT_LEN]);

impl PrfSalt {
    /// The salt's bytes.
    pub fn as_bytes(&self) -> &[u8; HALF_SALT_LEN] {
        &self.0
    }
}

impl HkdfSalt {
    /// The salt's bytes.
    pub fn as_bytes(&self) -> &[u8; HALF_SALT_LEN] {
        &self.0
    }
}

/// Split `salt` into its PRF half `[0, 32)` and its HKDF half `[32, 64)`.
///
/// The halves are copied byte for byte. Fails with [`Error::InvalidSaltLength`] unless `salt` is
/// exactly [`SALT_LEN`] bytes long.
pub fn split(salt: &[u8]) -> Result<(PrfSalt, HkdfSalt), Error> {
    let salt = Salt::try_from(salt)?;

    let mut prf = [0; HALF_SALT_LEN];
    let mut hkdf = [0; HALF_SALT_LEN];
    prf.copy_from_slice(&salt.0[..HALF_SALT_LEN]);
    hkdf.copy_from_slice(&salt.0[HALF_SALT_LEN..]);

    Ok((PrfSalt(prf), HkdfSalt(hkdf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_are_exact() {
        let salt: Vec<u8> = (0..64).collect();

        let (prf, hkdf) = split(&salt).expect("64 bytes is a valid salt");

        assert_eq!(prf.as_bytes().as_slice(), &salt[..32]);
        assert_eq!(hkdf.as_bytes().as_slice(), &salt[32..]);
        let rejoined = [prf.as_bytes().as_slice(), hkdf.as_bytes().as_slice()].concat();
        assert_eq!(rejoined, salt);
    }

    #[test]
    fn any_other_length_is_rejected() {
        for len in [0, 1, 32, 63, 65, 128] {
            let err = split(&vec![0; len]).expect_err("split a salt of the wrong length");
            assert_eq!(err, Error::InvalidSaltLength { len });
        }
    }

    #[test]
    fn default_salt_is_all_zeros() {
        let (prf, hkdf) = split(Salt::default().as_bytes()).expect("default salt is valid");

        assert_eq!(prf.as_bytes(), &[0; 32]);
        assert_eq!(hkdf.as_bytes(), &[0; 32]);
    }

    #[test]
    fn deserialization_checks_length() {
        let salt: Salt = serde_json::from_value(serde_json::json!(vec![1u8; 64]))
            .expect("could not deserialize a 64 byte salt");
        assert_eq!(salt.as_bytes(), &[1; 64]);

        let too_short = serde_json::from_value::<Salt>(serde_json::json!(vec![1u8; 32]));
        assert!(too_short.is_err());
    }
}
