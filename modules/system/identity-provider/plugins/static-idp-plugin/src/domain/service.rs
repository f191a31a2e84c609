//! Service implementation for the static identity provider plugin.

use std::collections::HashMap;

use archive_security::ROLE_ATTRIBUTE;
use identity_provider_sdk::VerifiedPrincipal;
use serde_json::json;

use crate::config::{IdentityConfig, IdpMode, StaticIdpPluginConfig};

/// Static identity provider service.
///
/// Provides token-to-principal mapping based on configuration mode:
/// - `static_tokens`: Specific tokens map to specific principals
/// - `accept_all`: Any non-empty token maps to the default principal
///
/// Profiles are keyed by principal id and answer `role` and `email` lookups.
pub struct Service {
    mode: IdpMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
    profiles: HashMap<String, IdentityConfig>,
    fail_attribute_lookups: bool,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticIdpPluginConfig) -> Self {
        if cfg.mode == IdpMode::AcceptAll {
            tracing::warn!(
                "Static identity provider is running in `accept_all` mode: \
                 every bearer token resolves to the default principal. \
                 Do NOT use this mode in production."
            );
        }

        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        let mut profiles: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.identity.principal_id.clone(), m.identity.clone()))
            .collect();
        if cfg.mode == IdpMode::AcceptAll {
            profiles
                .entry(cfg.default_identity.principal_id.clone())
                .or_insert_with(|| cfg.default_identity.clone());
        }

        tracing::info!(
            mode = ?cfg.mode,
            token_count = token_map.len(),
            profile_count = profiles.len(),
            "Static identity provider configured"
        );

        Self {
            mode: cfg.mode,
            default_identity: cfg.default_identity.clone(),
            token_map,
            profiles,
            fail_attribute_lookups: cfg.fail_attribute_lookups,
        }
    }

    /// Resolve a bearer token to its principal.
    ///
    /// Returns `None` if the token is empty or not recognized.
    #[must_use]
    pub fn verify(&self, bearer_token: &str) -> Option<VerifiedPrincipal> {
        if bearer_token.is_empty() {
            return None;
        }

        let identity = match self.mode {
            IdpMode::AcceptAll => &self.default_identity,
            IdpMode::StaticTokens => self.token_map.get(bearer_token)?,
        };

        Some(build_principal(identity))
    }

    /// Whether profile lookups are configured to fail.
    #[must_use]
    pub fn lookups_fail(&self) -> bool {
        self.fail_attribute_lookups
    }

    /// Read one profile attribute.
    #[must_use]
    pub fn attribute(&self, principal_id: &str, attribute: &str) -> Option<String> {
        let profile = self.profiles.get(principal_id)?;
        match attribute {
            ROLE_ATTRIBUTE => profile.role.clone(),
            "email" => profile.email.clone(),
            _ => None,
        }
    }
}

fn build_principal(identity: &IdentityConfig) -> VerifiedPrincipal {
    let raw = json!({
        "id": identity.principal_id,
        "email": identity.email,
        "aud": "authenticated",
    });
    VerifiedPrincipal::new(identity.principal_id.clone(), raw)
}
