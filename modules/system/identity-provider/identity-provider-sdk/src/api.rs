//! API trait for identity provider clients.

use archive_security::{Credential, VerifiedPrincipal};
use async_trait::async_trait;

use crate::error::IdentityProviderError;

/// Remote identity provider and profile store.
///
/// Implementations hold only fixed connection configuration, so one handle
/// is shared read-only across all requests:
///
/// ```ignore
/// let idp: Arc<dyn IdentityProviderClient> = Arc::new(client);
/// let resolver = PrincipalResolver::new(idp.clone());
/// let gate = AuthorizationGate::new(idp);
/// ```
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    /// Exchange a bearer credential for the user record it identifies.
    ///
    /// Returns `Ok(None)` when the provider does not recognise the
    /// credential (unknown, malformed or expired token).
    ///
    /// # Errors
    ///
    /// Any [`IdentityProviderError`] when the provider could not be asked
    /// or answered with something that is not a user record.
    async fn verify_credential(
        &self,
        credential: &Credential,
    ) -> Result<Option<VerifiedPrincipal>, IdentityProviderError>;

    /// Read a single profile attribute for a principal.
    ///
    /// Returns `Ok(None)` when there is no profile row or the attribute is
    /// null.
    ///
    /// # Errors
    ///
    /// Any [`IdentityProviderError`] when the profile store could not be
    /// queried or returned an unexpected shape.
    async fn get_attribute(
        &self,
        principal_id: &str,
        attribute: &str,
    ) -> Result<Option<String>, IdentityProviderError>;
}
