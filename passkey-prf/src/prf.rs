//! Evaluation of the credential's PRF through an assertion ceremony.

use std::fmt;

use passkey_prf_types::webauthn::{
    AuthenticatedPublicKeyCredential, AuthenticationExtensionsClientInputs,
    AuthenticationExtensionsPrfInputs, AuthenticationExtensionsPrfValues,
    PublicKeyCredentialRequestOptions, UserVerificationRequirement,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{salt::PrfSalt, CeremonyProvider, Error};

/// The output of the credential's PRF, used as HKDF input key material.
///
/// It is never logged, serialized or handed to the caller, and is zeroed when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct PrfSecret(Vec<u8>);

impl PrfSecret {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PrfSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrfSecret(..)")
    }
}

/// The assertion requesting the PRF over `prf_salt`, in the first slot only.
///
/// The challenge is empty and no credential is listed, the authenticator picks the discoverable
/// credential of `rp_id`.
pub(crate) fn request_options(
    rp_id: Option<String>,
    prf_salt: &PrfSalt,
    user_verification: UserVerificationRequirement,
) -> PublicKeyCredentialRequestOptions {
    PublicKeyCredentialRequestOptions {
        challenge: Vec::<u8>::new().into(),
        timeout: None,
        rp_id,
        user_verification,
        extensions: Some(AuthenticationExtensionsClientInputs {
            prf: Some(AuthenticationExtensionsPrfInputs {
                eval: Some(AuthenticationExtensionsPrfValues::first(*prf_salt.as_bytes())),
            }),
        }),
    }
}

/// Take the first PRF result out of an assertion, or fail with [`Error::UnsupportedExtension`].
pub(crate) fn extract(credential: AuthenticatedPublicKeyCredential) -> Result<PrfSecret, Error> {
    let Some(results) = credential
        .client_extension_results
        .prf
        .and_then(|prf| prf.results)
    else {
        log::warn!("The assertion did not return PRF results");
        return Err(Error::UnsupportedExtension);
    };

    Ok(PrfSecret(results.first.into()))
}

/// Run the assertion and return the PRF output for `prf_salt`.
pub(crate) async fn evaluate<C>(
    ceremony: &C,
    rp_id: Option<String>,
    prf_salt: &PrfSalt,
    user_verification: UserVerificationRequirement,
) -> Result<PrfSecret, Error>
where
    C: CeremonyProvider + ?Sized,
{
    let options = request_options(rp_id, prf_salt, user_verification);
    let credential = ceremony.assert(options).await.map_err(|err| {
        log::debug!("Assertion failed: {err}");
        Error::AssertionFailure(err)
    })?;

    extract(credential)
}
