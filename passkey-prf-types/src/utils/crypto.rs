//! Collection of the hashing primitives shared by the client and authenticator sides.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// Compute the SHA-256 of the given `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute the HMAC-SHA-256 of `data` keyed with `key`.
///
/// Returns `None` only if the underlying MAC refuses the key, which HMAC never does.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Option<[u8; 32]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).ok()?;
    mac.update(data);
    Some(mac.finalize().into_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_is_keyed() {
        let data = b"WebAuthn PRF";
        let a = hmac_sha256(&[1; 32], data).expect("hmac accepts any key length");
        let b = hmac_sha256(&[2; 32], data).expect("hmac accepts any key length");

        assert_ne!(a, b);
        assert_eq!(a, hmac_sha256(&[1; 32], data).unwrap());
    }
}
