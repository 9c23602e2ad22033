use crate::{
    authenticator::{authenticator_data, prf},
    ctap2::get_assertion::{Request, Response},
    Authenticator, AuthenticatorError, CredentialStore, UiHint, UserValidationMethod,
};

impl<S, U> Authenticator<S, U>
where
    S: CredentialStore,
    U: UserValidationMethod,
{
    /// This method is used by a host to request cryptographic proof of user authentication as well
    /// as user consent to a given transaction, using a previously generated credential that is
    /// bound to the authenticator and relying party identifier.
    ///
    /// The most recently created credential of the relying party is used. The PRF is evaluated when
    /// requested and the credential was created with a PRF secret, and omitted otherwise.
    pub async fn get_assertion(&self, input: Request) -> Result<Response, AuthenticatorError> {
        let credentials = match self.store.find_credentials(&input.rp_id).await {
            Ok(credentials) if !credentials.is_empty() => credentials,
            Ok(_) | Err(AuthenticatorError::NoCredentials) => {
                // The user is informed even though no consent can be given.
                let _ = self
                    .user_validation
                    .check_user(UiHint::InformNoCredentialsFound, false, false)
                    .await;
                return Err(AuthenticatorError::NoCredentials);
            }
            Err(err) => return Err(err),
        };

        let Some(credential) = credentials.into_iter().next() else {
            return Err(AuthenticatorError::NoCredentials);
        };

        let user_flags = self
            .check_user(
                UiHint::RequestExistingCredential(&credential),
                input.options.up,
                input.options.uv,
            )
            .await?;

        let prf = match (input.prf, credential.prf_secret.as_ref()) {
            (Some(salts), Some(secret)) => Some(prf::evaluate(secret, &salts)?),
            (Some(_), None) => {
                log::debug!("Credential for {} has no PRF secret", input.rp_id);
                None
            }
            (None, _) => None,
        };

        let auth_data = authenticator_data(&input.rp_id, user_flags, None);
        let signature = {
            let mut signed = Vec::with_capacity(auth_data.len() + input.client_data_hash.len());
            signed.extend_from_slice(&auth_data);
            signed.extend_from_slice(&input.client_data_hash);
            credential.sign(&signed)?
        };

        Ok(Response {
            credential_id: credential.credential_id.clone(),
            user_handle: credential.user_handle.clone(),
            auth_data: auth_data.into(),
            signature,
            prf,
        })
    }
}
