//! Bearer credentials.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors produced when building a [`Credential`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The bearer value was empty or whitespace only.
    #[error("bearer credential is empty")]
    Empty,
}

/// An opaque bearer token presented by a caller.
///
/// The value is wrapped in `SecretString`, so `Debug` never prints it.
/// A credential lives for one request and is never persisted.
#[derive(Debug, Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a raw bearer value (without the `Bearer ` prefix).
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] if `token` is empty after trimming.
    pub fn new(token: impl Into<String>) -> Result<Self, CredentialError> {
        let token: String = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(SecretString::from(trimmed.to_owned())))
    }

    /// Borrow the raw token for forwarding to the identity provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<&str> for Credential {
    type Error = CredentialError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(Credential::new("").unwrap_err(), CredentialError::Empty);
        assert_eq!(Credential::new("   ").unwrap_err(), CredentialError::Empty);
    }

    #[test]
    fn token_is_trimmed() {
        let cred = Credential::new("  tok-valid-1 ").unwrap();
        assert_eq!(cred.expose(), "tok-valid-1");
    }

    #[test]
    fn debug_output_is_redacted() {
        let cred = Credential::try_from("super-secret-token").unwrap();
        let printed = format!("{cred:?}");
        assert!(!printed.contains("super-secret-token"));
    }
}
