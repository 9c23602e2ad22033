//! # Passkey PRF Authenticator
//!
//! This crate defines a software [`Authenticator`] that behaves like a platform authenticator
//! supporting [discoverable credentials] and the [PRF extension] (backed by a per-credential
//! `hmac-secret` style secret). Storage and user interaction are defined through the
//! [`CredentialStore`] and [`UserValidationMethod`] traits so only the vendor specific parts vary.
//!
//! The authenticator only creates ES256 credentials. Callers listing several algorithms get the
//! first one of their list that is ES256, or [`AuthenticatorError::UnsupportedAlgorithm`].
//!
//! [discoverable credentials]: https://w3c.github.io/webauthn/#client-side-discoverable-credential
//! [PRF extension]: https://w3c.github.io/webauthn/#prf-extension

mod authenticator;
mod credential;
mod credential_store;
mod error;
mod user_validation;

pub mod ctap2;

pub use self::{
    authenticator::{Aaguid, Authenticator, PrfConfig},
    credential::Credential,
    credential_store::{CredentialStore, MemoryStore},
    error::AuthenticatorError,
    user_validation::{UiHint, UserCheck, UserValidationMethod},
};

#[cfg(any(test, feature = "testable"))]
pub use self::user_validation::MockUserValidationMethod;
