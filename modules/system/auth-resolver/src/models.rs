//! Outcomes of authentication and authorization.

use archive_security::Principal;

/// Fixed denial message for callers without the admin role.
pub const ADMIN_REQUIRED: &str = "Admin access required";

/// Outcome of resolving a bearer credential.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthResult {
    /// The provider confirmed the credential.
    Authenticated(Principal),
    /// The credential is missing, unknown, expired, or the provider could
    /// not be asked. Carries a human-readable cause.
    Unauthenticated(String),
}

impl AuthResult {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The authenticated principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(p) => Some(p),
            Self::Unauthenticated(_) => None,
        }
    }
}

/// Outcome of the admin authorization check.
///
/// `Forbidden` is a policy denial; `Error` means the policy could not be
/// evaluated. Callers surface them as different failure classes.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthzResult {
    Authorized(Principal),
    Forbidden(String),
    Error(String),
}

impl AuthzResult {
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }
}
