#[cfg(any(feature = "tokio", test))]
use std::sync::Arc;

use passkey_prf_types::webauthn::{PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity};

use crate::{AuthenticatorError, Credential};

/// Use this on a type that enables storage and fetching of discoverable credentials.
#[async_trait::async_trait]
pub trait CredentialStore {
    /// Find all credentials scoped to `rp_id`.
    ///
    /// The most recently created credential should come first, as the authenticator uses the first
    /// credential of the list for assertions.
    async fn find_credentials(&self, rp_id: &str) -> Result<Vec<Credential>, AuthenticatorError>;

    /// Save the new credential into your store.
    ///
    /// A credential with the same relying party and user handle as an existing one replaces it.
    async fn save_credential(
        &mut self,
        cred: Credential,
        user: PublicKeyCredentialUserEntity,
        rp: PublicKeyCredentialRpEntity,
    ) -> Result<(), AuthenticatorError>;
}

/// In-memory store for discoverable credentials, kept in creation order.
///
/// Useful for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    credentials: Vec<Credential>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the store holds no credentials.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Iterate over the stored credentials, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryStore {
    async fn find_credentials(&self, rp_id: &str) -> Result<Vec<Credential>, AuthenticatorError> {
        let creds: Vec<Credential> = self
            .credentials
            .iter()
            .rev()
            .filter(|cred| cred.rp_id == rp_id)
            .cloned()
            .collect();
        if creds.is_empty() {
            Err(AuthenticatorError::NoCredentials)
        } else {
            Ok(creds)
        }
    }

    async fn save_credential(
        &mut self,
        cred: Credential,
        _user: PublicKeyCredentialUserEntity,
        _rp: PublicKeyCredentialRpEntity,
    ) -> Result<(), AuthenticatorError> {
        self.credentials.retain(|existing| {
            existing.rp_id != cred.rp_id || existing.user_handle != cred.user_handle
        });
        self.credentials.push(cred);
        Ok(())
    }
}

#[cfg(any(feature = "tokio", test))]
#[async_trait::async_trait]
impl<S: CredentialStore + Send + Sync> CredentialStore for Arc<tokio::sync::Mutex<S>> {
    async fn find_credentials(&self, rp_id: &str) -> Result<Vec<Credential>, AuthenticatorError> {
        self.lock().await.find_credentials(rp_id).await
    }

    async fn save_credential(
        &mut self,
        cred: Credential,
        user: PublicKeyCredentialUserEntity,
        rp: PublicKeyCredentialRpEntity,
    ) -> Result<(), AuthenticatorError> {
        self.lock().await.save_credential(cred, user, rp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &[u8]) -> PublicKeyCredentialUserEntity {
        PublicKeyCredentialUserEntity {
            id: id.into(),
            display_name: "wendy".into(),
            name: "wendy".into(),
        }
    }

    fn rp(id: &str) -> PublicKeyCredentialRpEntity {
        PublicKeyCredentialRpEntity {
            id: Some(id.into()),
            name: id.into(),
        }
    }

    #[tokio::test]
    async fn same_user_replaces_previous_credential() {
        let mut store = MemoryStore::new();
        let first =
            Credential::generate("example.com".into(), Some(b"user".to_vec().into()), None);
        let second =
            Credential::generate("example.com".into(), Some(b"user".to_vec().into()), None);

        store
            .save_credential(first, user(b"user"), rp("example.com"))
            .await
            .unwrap();
        store
            .save_credential(second.clone(), user(b"user"), rp("example.com"))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find_credentials("example.com").await.unwrap(),
            vec![second]
        );
    }

    #[tokio::test]
    async fn find_is_scoped_to_rp_and_newest_first() {
        let mut store = MemoryStore::new();
        let older =
            Credential::generate("example.com".into(), Some(b"alice".to_vec().into()), None);
        let newer =
            Credential::generate("example.com".into(), Some(b"bob".to_vec().into()), None);
        let other =
            Credential::generate("other.com".into(), Some(b"alice".to_vec().into()), None);

        for (cred, handle, rp_id) in [
            (older.clone(), &b"alice"[..], "example.com"),
            (newer.clone(), &b"bob"[..], "example.com"),
            (other, &b"alice"[..], "other.com"),
        ] {
            store
                .save_credential(cred, user(handle), rp(rp_id))
                .await
                .unwrap();
        }

        let found = store.find_credentials("example.com").await.unwrap();

        assert_eq!(found, vec![newer, older]);
        assert_eq!(
            store.find_credentials("missing.com").await.unwrap_err(),
            AuthenticatorError::NoCredentials
        );
    }

    #[tokio::test]
    async fn shared_store_behind_a_mutex() {
        let shared = Arc::new(tokio::sync::Mutex::new(MemoryStore::new()));
        let mut handle = shared.clone();
        let cred = Credential::generate("example.com".into(), None, None);

        handle
            .save_credential(cred.clone(), user(b"user"), rp("example.com"))
            .await
            .unwrap();

        assert_eq!(shared.lock().await.len(), 1);
        assert_eq!(
            shared.find_credentials("example.com").await.unwrap(),
            vec![cred]
        );
    }
}
