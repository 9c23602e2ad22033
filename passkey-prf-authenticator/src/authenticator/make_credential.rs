use crate::{
    authenticator::{authenticator_data, flags, prf},
    ctap2::make_credential::{PrfInput, PrfMakeOutput, Request, Response},
    Aaguid, Authenticator, AuthenticatorError, Credential, CredentialStore, UiHint,
    UserValidationMethod,
};

impl<S, U> Authenticator<S, U>
where
    S: CredentialStore,
    U: UserValidationMethod,
{
    /// This method is invoked by the host to request generation of a new credential in the authenticator.
    ///
    /// Only discoverable credentials can be created, a request without `rk` fails with
    /// [`AuthenticatorError::UnsupportedOption`]. The new credential replaces any credential
    /// previously created for the same user and relying party.
    pub async fn make_credential(&mut self, input: Request) -> Result<Response, AuthenticatorError> {
        let rp_id = input
            .rp
            .id
            .clone()
            .ok_or(AuthenticatorError::InvalidParameter)?;

        if !input.options.rk {
            return Err(AuthenticatorError::UnsupportedOption);
        }

        let algorithm = self.choose_algorithm(&input.pub_key_cred_params)?;

        let user_flags = self
            .check_user(
                UiHint::RequestNewCredential(&input.user, &input.rp),
                input.options.up,
                input.options.uv,
            )
            .await?;

        let prf_secret = self.make_prf_secret(input.prf.is_some());
        let credential = Credential::generate(rp_id, Some(input.user.id.clone()), prf_secret);

        let prf = self.make_prf_output(&credential, input.prf.as_ref())?;

        let attested = attested_credential_data(&self.aaguid, &credential)?;
        let auth_data =
            authenticator_data(&credential.rp_id, user_flags | flags::AT, Some(&attested));
        let public_key = credential.public_key_der()?;
        let credential_id = credential.credential_id.clone();

        log::debug!(
            "Created credential for {} (prf: {})",
            credential.rp_id,
            credential.prf_secret.is_some()
        );

        self.store
            .save_credential(credential, input.user, input.rp)
            .await?;

        Ok(Response {
            credential_id,
            auth_data: auth_data.into(),
            public_key,
            algorithm,
            prf,
        })
    }

    fn make_prf_output(
        &self,
        credential: &Credential,
        input: Option<&PrfInput>,
    ) -> Result<Option<PrfMakeOutput>, AuthenticatorError> {
        if !self.supports_prf() {
            return Ok(None);
        }
        let Some(input) = input else {
            return Ok(None);
        };
        let Some(secret) = credential.prf_secret.as_ref() else {
            return Ok(Some(PrfMakeOutput {
                enabled: false,
                results: None,
            }));
        };

        let results = match &input.eval {
            Some(salts) if self.evaluate_on_make_credential() => Some(prf::evaluate(secret, salts)?),
            _ => None,
        };

        Ok(Some(PrfMakeOutput {
            enabled: true,
            results,
        }))
    }
}

/// `aaguid || credentialIdLength || credentialId || credentialPublicKey`
fn attested_credential_data(
    aaguid: &Aaguid,
    credential: &Credential,
) -> Result<Vec<u8>, AuthenticatorError> {
    let id_len =
        u16::try_from(credential.credential_id.len()).map_err(|_| AuthenticatorError::Other)?;
    let public_key = credential.public_key_cose()?;

    let mut data = Vec::with_capacity(18 + credential.credential_id.len() + public_key.len());
    data.extend_from_slice(&aaguid.0);
    data.extend_from_slice(&id_len.to_be_bytes());
    data.extend_from_slice(&credential.credential_id);
    data.extend_from_slice(&public_key);
    Ok(data)
}
