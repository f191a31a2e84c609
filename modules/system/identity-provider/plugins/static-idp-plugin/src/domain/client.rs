//! Client implementation for the static identity provider plugin.
//!
//! Implements `IdentityProviderClient` using the domain service.

use archive_security::Credential;
use async_trait::async_trait;
use identity_provider_sdk::{IdentityProviderClient, IdentityProviderError, VerifiedPrincipal};

use super::service::Service;

#[async_trait]
impl IdentityProviderClient for Service {
    async fn verify_credential(
        &self,
        credential: &Credential,
    ) -> Result<Option<VerifiedPrincipal>, IdentityProviderError> {
        Ok(self.verify(credential.expose()))
    }

    async fn get_attribute(
        &self,
        principal_id: &str,
        attribute: &str,
    ) -> Result<Option<String>, IdentityProviderError> {
        if self.lookups_fail() {
            return Err(IdentityProviderError::Timeout(
                "static profile store is configured to fail".to_owned(),
            ));
        }
        Ok(self.attribute(principal_id, attribute))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::{IdentityConfig, StaticIdpPluginConfig, TokenMapping};

    fn config(fail_attribute_lookups: bool) -> StaticIdpPluginConfig {
        StaticIdpPluginConfig {
            tokens: vec![TokenMapping {
                token: "tok-valid-1".to_owned(),
                identity: IdentityConfig {
                    principal_id: "u1".to_owned(),
                    email: None,
                    role: Some("admin".to_owned()),
                },
            }],
            fail_attribute_lookups,
            ..StaticIdpPluginConfig::default()
        }
    }

    #[tokio::test]
    async fn plugin_trait_verifies_known_token() {
        let service = Service::from_config(&config(false));
        let plugin: &dyn IdentityProviderClient = &service;

        let cred = Credential::new("tok-valid-1").unwrap();
        let principal = plugin.verify_credential(&cred).await.unwrap().unwrap();
        assert_eq!(principal.principal_id(), "u1");

        let role = plugin.get_attribute("u1", "role").await.unwrap();
        assert_eq!(role.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn plugin_trait_unknown_token_is_none() {
        let service = Service::from_config(&config(false));
        let plugin: &dyn IdentityProviderClient = &service;

        let cred = Credential::new("tok-bad").unwrap();
        assert!(plugin.verify_credential(&cred).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failing_lookups_return_timeout() {
        let service = Service::from_config(&config(true));
        let plugin: &dyn IdentityProviderClient = &service;

        match plugin.get_attribute("u1", "role").await {
            Err(IdentityProviderError::Timeout(_)) => {}
            other => panic!("Expected Timeout, got: {other:?}"),
        }
    }
}
