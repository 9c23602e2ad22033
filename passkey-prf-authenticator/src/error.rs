use std::fmt;

/// Errors returned by the [`Authenticator`](crate::Authenticator) and its pluggable parts.
///
/// Each variant carries the CTAP2 status code of the equivalent error, see [`u8::from`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum AuthenticatorError {
    /// A request parameter is missing or malformed.
    InvalidParameter,
    /// The stored credential could not be used.
    InvalidCredential,
    /// None of the requested algorithms are supported.
    UnsupportedAlgorithm,
    /// The user did not consent to the operation.
    OperationDenied,
    /// A requested option, such as user verification, is not supported.
    UnsupportedOption,
    /// The operation was cancelled, e.g. the user dismissed the prompt.
    KeepAliveCancel,
    /// No credential is scoped to the requested relying party.
    NoCredentials,
    /// Any other failure.
    Other,
}

impl From<AuthenticatorError> for u8 {
    fn from(src: AuthenticatorError) -> Self {
        match src {
            AuthenticatorError::InvalidParameter => 0x02,
            AuthenticatorError::InvalidCredential => 0x22,
            AuthenticatorError::UnsupportedAlgorithm => 0x26,
            AuthenticatorError::OperationDenied => 0x27,
            AuthenticatorError::UnsupportedOption => 0x2B,
            AuthenticatorError::KeepAliveCancel => 0x2D,
            AuthenticatorError::NoCredentials => 0x2E,
            AuthenticatorError::Other => 0x7F,
        }
    }
}

impl fmt::Display for AuthenticatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AuthenticatorError::InvalidParameter => "a request parameter is invalid",
            AuthenticatorError::InvalidCredential => "the credential is invalid",
            AuthenticatorError::UnsupportedAlgorithm => "no supported algorithm was requested",
            AuthenticatorError::OperationDenied => "the user denied the operation",
            AuthenticatorError::UnsupportedOption => "a requested option is not supported",
            AuthenticatorError::KeepAliveCancel => "the operation was cancelled",
            AuthenticatorError::NoCredentials => "no credentials were found",
            AuthenticatorError::Other => "the authenticator failed",
        };
        write!(f, "{msg} (0x{:02X})", u8::from(*self))
    }
}

impl std::error::Error for AuthenticatorError {}
