//! Creation of the discoverable, PRF capable credential keys are later derived from.

use coset::iana;
use passkey_prf_types::webauthn::{
    AuthenticationExtensionsClientInputs, AuthenticationExtensionsPrfInputs,
    AuthenticationExtensionsPrfValues, AuthenticatorSelectionCriteria, CreatedPublicKeyCredential,
    PublicKeyCredentialCreationOptions, PublicKeyCredentialParameters, ResidentKeyRequirement,
};

use crate::{CeremonyProvider, EnrollOptions, Error};

/// Algorithms offered during creation, in order of preference.
pub(crate) const ALGORITHMS: [iana::Algorithm; 3] = [
    iana::Algorithm::EdDSA,
    iana::Algorithm::ES256,
    iana::Algorithm::RS256,
];

/// The PRF input evaluated at creation. It only probes for support, its result is never used.
pub(crate) const PRF_PROBE: [u8; 32] = [0; 32];

pub(crate) fn creation_options(options: EnrollOptions) -> PublicKeyCredentialCreationOptions {
    PublicKeyCredentialCreationOptions {
        rp: options.rp,
        user: options.user.unwrap_or_else(EnrollOptions::default_user),
        challenge: Vec::<u8>::new().into(),
        pub_key_cred_params: ALGORITHMS
            .into_iter()
            .map(PublicKeyCredentialParameters::public_key)
            .collect(),
        timeout: None,
        authenticator_selection: Some(AuthenticatorSelectionCriteria {
            authenticator_attachment: None,
            resident_key: Some(ResidentKeyRequirement::Required),
            require_resident_key: true,
            user_verification: options.user_verification,
        }),
        extensions: Some(AuthenticationExtensionsClientInputs {
            prf: Some(AuthenticationExtensionsPrfInputs {
                eval: Some(AuthenticationExtensionsPrfValues::first(PRF_PROBE)),
            }),
        }),
    }
}

/// Create the credential. Failures of the ceremony are not retried.
pub(crate) async fn create<C>(
    ceremony: &mut C,
    options: EnrollOptions,
) -> Result<CreatedPublicKeyCredential, Error>
where
    C: CeremonyProvider + ?Sized,
{
    let credential = ceremony
        .create(creation_options(options))
        .await
        .map_err(|err| {
            log::debug!("Credential creation failed: {err}");
            Error::EnrollmentFailure(err)
        })?;

    match credential
        .client_extension_results
        .prf
        .as_ref()
        .and_then(|prf| prf.enabled)
    {
        Some(true) => log::debug!("Created credential {} with PRF enabled", credential.id),
        Some(false) => log::warn!(
            "Credential {} was created but the authenticator reports PRF as disabled",
            credential.id
        ),
        None => log::warn!(
            "Credential {} was created without reporting PRF support",
            credential.id
        ),
    }

    Ok(credential)
}
