//! Principal resolution.

use std::sync::Arc;

use archive_security::{Credential, Principal};
use identity_provider_sdk::{IdentityProviderClient, IdentityProviderError};

use crate::models::AuthResult;

/// Reason given when the provider does not recognise the credential.
pub const INVALID_CREDENTIALS: &str = "Invalid authentication credentials";

/// Resolves bearer credentials to principals.
///
/// Every provider failure is folded into [`AuthResult::Unauthenticated`];
/// nothing is retried and nothing escapes.
#[derive(Clone)]
pub struct PrincipalResolver {
    idp: Arc<dyn IdentityProviderClient>,
}

impl PrincipalResolver {
    #[must_use]
    pub fn new(idp: Arc<dyn IdentityProviderClient>) -> Self {
        Self { idp }
    }

    /// Verify `credential` with the identity provider.
    ///
    /// One outbound call per invocation, no caching.
    #[tracing::instrument(skip_all)]
    pub async fn resolve(&self, credential: &Credential) -> AuthResult {
        match self.idp.verify_credential(credential).await {
            Ok(Some(verified)) => {
                tracing::debug!(principal_id = %verified.principal_id(), "credential verified");
                AuthResult::Authenticated(Principal::from(verified))
            }
            Ok(None) => {
                tracing::debug!("identity provider did not recognise credential");
                AuthResult::Unauthenticated(INVALID_CREDENTIALS.to_owned())
            }
            Err(e) => {
                log_verification_error(&e);
                AuthResult::Unauthenticated(format!("Could not validate credentials: {e}"))
            }
        }
    }
}

/// Outages and rejections share one external outcome; the log level keeps
/// them apart for operators.
fn log_verification_error(e: &IdentityProviderError) {
    if e.is_outage() {
        tracing::warn!(error = %e, "identity provider unreachable during verification");
    } else {
        tracing::debug!(error = %e, "credential verification failed");
    }
}
