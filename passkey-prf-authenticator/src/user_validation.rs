use passkey_prf_types::webauthn::{PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity};

use crate::{AuthenticatorError, Credential};

#[cfg(doc)]
use crate::Authenticator;

/// What the user is being asked about, for the prompt to display.
#[derive(Debug, Clone, PartialEq)]
pub enum UiHint<'a> {
    /// Nothing matches the request. The user is only told, the answer is ignored.
    InformNoCredentialsFound,

    /// Creating a credential for this account and relying party.
    RequestNewCredential(
        &'a PublicKeyCredentialUserEntity,
        &'a PublicKeyCredentialRpEntity,
    ),

    /// Using this stored credential.
    RequestExistingCredential(&'a Credential),
}

/// What a prompt established about the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserCheck {
    /// The user was present, e.g. touched a sensor or accepted a dialog.
    pub presence: bool,

    /// The user was verified, e.g. with biometrics or a PIN.
    pub verification: bool,
}

/// The prompt shown by the [`Authenticator`] before it uses or creates a credential.
///
/// Ceremonies suspend here. A dismissed prompt resolves to [`AuthenticatorError::KeepAliveCancel`].
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait UserValidationMethod {
    /// Prompt the user about `hint`, asking for presence and, if `verification` is set, for
    /// verification too.
    async fn check_user<'a>(
        &self,
        hint: UiHint<'a>,
        presence: bool,
        verification: bool,
    ) -> Result<UserCheck, AuthenticatorError>;

    /// Whether presence can be tested at all.
    fn is_presence_enabled(&self) -> bool;

    /// `Some(true)` when the user can be verified, `Some(false)` when verification is supported
    /// but not set up, `None` when unsupported.
    fn is_verification_enabled(&self) -> Option<bool>;
}

#[cfg(any(test, feature = "testable"))]
impl MockUserValidationMethod {
    /// A mock able to test presence and verify the user, without any `check_user` expectation.
    fn capable() -> Self {
        let mut mock = Self::new();
        mock.expect_is_presence_enabled().return_const(true).times(..);
        mock.expect_is_verification_enabled()
            .return_const(Some(true))
            .times(..);
        mock
    }

    /// A user approving `times` prompts about credentials, present and verified.
    pub fn verified_user(times: usize) -> Self {
        let mut mock = Self::capable();
        mock.expect_check_user()
            .withf(|hint, _, _| !matches!(hint, UiHint::InformNoCredentialsFound))
            .returning(|_, _, _| {
                Ok(UserCheck {
                    presence: true,
                    verification: true,
                })
            })
            .times(times);
        mock
    }

    /// A user approving `times` prompts that ask for presence, verified only when asked to be.
    pub fn present_user(times: usize) -> Self {
        let mut mock = Self::capable();
        mock.expect_check_user()
            .withf(|_, presence, _| *presence)
            .returning(|_, presence, verification| {
                Ok(UserCheck {
                    presence,
                    verification,
                })
            })
            .times(times);
        mock
    }

    /// A user dismissing `times` prompts.
    pub fn cancelling_user(times: usize) -> Self {
        let mut mock = Self::capable();
        mock.expect_check_user()
            .returning(|_, _, _| Err(AuthenticatorError::KeepAliveCancel))
            .times(times);
        mock
    }
}
