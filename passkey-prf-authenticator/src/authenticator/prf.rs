use passkey_prf_types::{crypto::hmac_sha256, rand::random_vec};
use zeroize::Zeroizing;

use crate::{ctap2::AuthenticatorPrfValues, Authenticator, AuthenticatorError};

/// Logical module for configuring the [PRF] extension of the authenticator.
///
/// Credentials created while PRF is requested get a random 32 byte secret. Evaluating the PRF is
/// `HMAC-SHA-256(secret, salt)` over each already hashed salt, in the manner of [hmac-secret].
///
/// [PRF]: https://w3c.github.io/webauthn/#prf-extension
/// [hmac-secret]: https://fidoalliance.org/specs/fido-v2.1-ps-20210615/fido-client-to-authenticator-protocol-v2.1-ps-errata-20220621.html#sctn-hmac-secret-extension
#[derive(Debug, Default, Clone)]
pub struct PrfConfig {
    evaluate_on_make_credential: bool,
}

impl PrfConfig {
    /// Create a configuration which only evaluates the PRF during assertions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also evaluate the `eval` salts given while creating a credential.
    pub fn enable_on_make_credential(self) -> Self {
        Self {
            evaluate_on_make_credential: true,
        }
    }
}

impl<S, U> Authenticator<S, U> {
    pub(super) fn make_prf_secret(&self, requested: bool) -> Option<Zeroizing<Vec<u8>>> {
        self.prf.as_ref()?;

        // Only create secrets that are going to be used.
        if !requested {
            return None;
        }

        Some(Zeroizing::new(random_vec(32)))
    }

    pub(super) fn evaluate_on_make_credential(&self) -> bool {
        self.prf
            .as_ref()
            .is_some_and(|config| config.evaluate_on_make_credential)
    }
}

/// Evaluate the PRF of a credential over both salts.
pub(super) fn evaluate(
    secret: &[u8],
    salts: &AuthenticatorPrfValues,
) -> Result<AuthenticatorPrfValues, AuthenticatorError> {
    let first = hmac_sha256(secret, &salts.first).ok_or(AuthenticatorError::InvalidCredential)?;
    let second = salts
        .second
        .as_ref()
        .map(|salt| hmac_sha256(secret, salt).ok_or(AuthenticatorError::InvalidCredential))
        .transpose()?;

    Ok(AuthenticatorPrfValues { first, second })
}

#[cfg(test)]
mod tests {
    use zeroize::Zeroize;

    use super::*;

    #[test]
    fn evaluation_is_deterministic_per_secret() {
        let salts = AuthenticatorPrfValues {
            first: [1; 32],
            second: Some([2; 32]),
        };

        let a = evaluate(&[7; 32], &salts).expect("could not evaluate");
        let b = evaluate(&[7; 32], &salts).expect("could not evaluate");
        let c = evaluate(&[8; 32], &salts).expect("could not evaluate");

        assert_eq!(a, b);
        assert_ne!(a.first, c.first);
        assert_ne!(Some(a.first), a.second);
    }

    #[test]
    fn second_is_only_evaluated_when_given() {
        let salts = AuthenticatorPrfValues {
            first: [1; 32],
            second: None,
        };

        let result = evaluate(&[7; 32], &salts).expect("could not evaluate");

        assert_eq!(result.second, None);
    }

    #[test]
    fn debug_output_hides_the_values() {
        let outputs = evaluate(&[7; 32], &AuthenticatorPrfValues {
            first: [1; 32],
            second: None,
        })
        .expect("could not evaluate");

        let debug = format!("{outputs:?}");

        assert_eq!(debug, "AuthenticatorPrfValues { second: false, .. }");
    }

    #[test]
    fn zeroize_clears_both_values() {
        let mut outputs = evaluate(&[7; 32], &AuthenticatorPrfValues {
            first: [1; 32],
            second: Some([2; 32]),
        })
        .expect("could not evaluate");

        outputs.zeroize();

        assert_eq!(outputs.first, [0; 32]);
        assert_eq!(outputs.second, None);
    }
}
