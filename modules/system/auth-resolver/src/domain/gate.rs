//! Admin authorization gate.

use std::sync::Arc;

use archive_security::{ADMIN_ROLE, Principal, ROLE_ATTRIBUTE};
use identity_provider_sdk::IdentityProviderClient;

use crate::models::{ADMIN_REQUIRED, AuthzResult};

/// Checks that a resolved principal holds the admin role.
///
/// The role is read fresh from the profile store on every call. Any role
/// claim carried by the credential itself is ignored.
#[derive(Clone)]
pub struct AuthorizationGate {
    idp: Arc<dyn IdentityProviderClient>,
}

impl AuthorizationGate {
    #[must_use]
    pub fn new(idp: Arc<dyn IdentityProviderClient>) -> Self {
        Self { idp }
    }

    /// Require the admin role for `principal`.
    ///
    /// `principal` must come from a successful
    /// [`PrincipalResolver::resolve`](crate::PrincipalResolver::resolve) in
    /// the same request.
    #[tracing::instrument(skip_all, fields(principal_id = %principal.principal_id()))]
    pub async fn require_admin(&self, principal: Principal) -> AuthzResult {
        match self
            .idp
            .get_attribute(principal.principal_id(), ROLE_ATTRIBUTE)
            .await
        {
            Ok(Some(role)) if role == ADMIN_ROLE => AuthzResult::Authorized(principal),
            Ok(role) => {
                tracing::debug!(role = ?role, "admin role required");
                AuthzResult::Forbidden(ADMIN_REQUIRED.to_owned())
            }
            Err(e) => {
                tracing::error!(error = %e, "role lookup failed");
                AuthzResult::Error(format!("Error checking admin status: {e}"))
            }
        }
    }
}
