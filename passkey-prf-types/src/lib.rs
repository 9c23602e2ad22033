//! # Passkey PRF Types
//!
//! Rust type definitions for the subset of the [WebAuthn Level 3] specification needed to create
//! a PRF-capable discoverable credential and to evaluate its [PRF extension] during an assertion.
//!
//! [WebAuthn Level 3]: https://w3c.github.io/webauthn
//! [PRF extension]: https://w3c.github.io/webauthn/#prf-extension

mod utils;

pub mod webauthn;

// Re-exports
pub use utils::{
    bytes::{Bytes, NotBase64Encoded},
    crypto, encoding, rand,
};
