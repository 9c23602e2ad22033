//! HKDF expansion of a PRF output into the caller's key.

use crate::{
    prf::PrfSecret, salt::HkdfSalt, CryptoProvider, DerivedKeyType, Error, HashAlgorithm,
    HkdfParams, ImportAlgorithm, KeyFormat, KeyUsages,
};

/// Derive a key of `key_type` from `secret` with HKDF-SHA-256.
///
/// The secret is imported as a non-extractable HKDF key restricted to [`KeyUsages::DERIVE_KEY`],
/// whatever the extractability of the derived key.
pub(crate) fn derive<P>(
    crypto: &P,
    secret: &PrfSecret,
    hkdf_salt: &HkdfSalt,
    info: &[u8],
    key_type: &DerivedKeyType,
    extractable: bool,
    usages: KeyUsages,
) -> Result<P::Key, Error>
where
    P: CryptoProvider + ?Sized,
{
    let base_key = crypto.import_key(
        KeyFormat::Raw,
        secret.as_bytes(),
        ImportAlgorithm::Hkdf,
        false,
        KeyUsages::DERIVE_KEY,
    )?;

    let params = HkdfParams {
        hash: HashAlgorithm::Sha256,
        salt: hkdf_salt.as_bytes().to_vec(),
        info: info.to_vec(),
    };

    crypto
        .derive_key(&params, &base_key, key_type, extractable, usages)
        .map_err(Error::from)
}
