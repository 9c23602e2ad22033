use coset::iana;
use passkey_prf_types::webauthn;

use crate::{AuthenticatorError, CredentialStore, UiHint, UserValidationMethod};

mod get_assertion;
mod make_credential;
mod prf;

pub use self::prf::PrfConfig;

/// Bit flags of the authenticator data.
pub(crate) mod flags {
    /// User Present
    pub const UP: u8 = 1 << 0;
    /// User Verified
    pub const UV: u8 = 1 << 2;
    /// Attested credential data included
    pub const AT: u8 = 1 << 6;
}

/// The Authenticator Attestation GUID, identifying the authenticator model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aaguid(pub [u8; 16]);

impl Aaguid {
    /// An all zero AAGUID, used by authenticators which do not want to be identified.
    pub const fn new_empty() -> Self {
        Self([0; 16])
    }
}

impl Default for Aaguid {
    fn default() -> Self {
        Self::new_empty()
    }
}

/// A software platform authenticator creating discoverable ES256 credentials in `S` after
/// prompting through `U`.
pub struct Authenticator<S, U> {
    aaguid: Aaguid,
    store: S,
    /// Supported algorithms, in order of preference.
    supported: Vec<iana::Algorithm>,
    user_validation: U,
    /// `None` when PRF is disabled.
    prf: Option<PrfConfig>,
}

impl<S, U> Authenticator<S, U>
where
    S: CredentialStore,
    U: UserValidationMethod,
{
    /// An authenticator identified by `aaguid`, keeping credentials in `store` and prompting
    /// through `user_validation`. PRF stays disabled until [`Self::prf`] is called.
    pub fn new(aaguid: Aaguid, store: S, user_validation: U) -> Self {
        Self {
            aaguid,
            store,
            supported: vec![iana::Algorithm::ES256],
            user_validation,
            prf: None,
        }
    }

    /// Builder method for enabling the PRF extension.
    pub fn prf(self, config: PrfConfig) -> Self {
        Self {
            prf: Some(config),
            ..self
        }
    }

    /// Whether new credentials can be created with a PRF secret.
    pub fn supports_prf(&self) -> bool {
        self.prf.is_some()
    }

    /// The credentials created so far.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the credentials, e.g. to remove one.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The [`Aaguid`] reported in attested credential data.
    pub fn aaguid(&self) -> &Aaguid {
        &self.aaguid
    }

    /// Always [`webauthn::AuthenticatorAttachment::Platform`].
    pub fn attachment_type(&self) -> webauthn::AuthenticatorAttachment {
        webauthn::AuthenticatorAttachment::Platform
    }

    /// Choose the first algorithm of `params` that this authenticator supports, or
    /// [`AuthenticatorError::UnsupportedAlgorithm`] when there is none.
    pub fn choose_algorithm(
        &self,
        params: &[webauthn::PublicKeyCredentialParameters],
    ) -> Result<iana::Algorithm, AuthenticatorError> {
        params
            .iter()
            .find(|param| self.supported.contains(&param.alg))
            .map(|param| param.alg)
            .ok_or(AuthenticatorError::UnsupportedAlgorithm)
    }

    /// Collect user consent, returning the UP and UV flags of the authenticator data.
    ///
    /// Requesting `uv` or `up` from a user validation method unable to verify or to test presence
    /// fails with [`AuthenticatorError::UnsupportedOption`] before the user is prompted.
    /// A check that does not satisfy the requested `up`/`uv` is [`AuthenticatorError::OperationDenied`].
    async fn check_user(
        &self,
        hint: UiHint<'_>,
        up: bool,
        uv: bool,
    ) -> Result<u8, AuthenticatorError> {
        if uv && self.user_validation.is_verification_enabled() != Some(true) {
            return Err(AuthenticatorError::UnsupportedOption);
        }
        if up && !self.user_validation.is_presence_enabled() {
            return Err(AuthenticatorError::UnsupportedOption);
        }

        let check_result = self.user_validation.check_user(hint, up, uv).await?;

        if up && !check_result.presence {
            return Err(AuthenticatorError::OperationDenied);
        }

        if uv && !check_result.verification {
            return Err(AuthenticatorError::OperationDenied);
        }

        let mut user_flags = 0;
        if check_result.presence {
            user_flags |= flags::UP;
        }
        if check_result.verification {
            user_flags |= flags::UV;
        }

        Ok(user_flags)
    }
}

/// Build the authenticator data: `rpIdHash || flags || signCount || attestedCredentialData`.
///
/// Credentials never carry a signature counter so it is always zero.
pub(crate) fn authenticator_data(rp_id: &str, flags: u8, attested: Option<&[u8]>) -> Vec<u8> {
    let mut data = Vec::with_capacity(37 + attested.map_or(0, <[u8]>::len));
    data.extend_from_slice(&passkey_prf_types::crypto::sha256(rp_id.as_bytes()));
    data.push(flags);
    data.extend_from_slice(&0u32.to_be_bytes());
    if let Some(attested) = attested {
        data.extend_from_slice(attested);
    }
    data
}

#[cfg(test)]
mod tests;
