//! Configuration for the static identity provider plugin.

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticIdpPluginConfig {
    /// Verification mode.
    pub mode: IdpMode,

    /// Principal returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Static token-to-principal mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,

    /// Make every profile lookup fail with a timeout.
    pub fail_attribute_lookups: bool,
}

impl Default for StaticIdpPluginConfig {
    fn default() -> Self {
        Self {
            mode: IdpMode::StaticTokens,
            default_identity: IdentityConfig::default(),
            tokens: Vec::new(),
            fail_attribute_lookups: false,
        }
    }
}

/// Verification mode.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdpMode {
    /// Map specific tokens to specific principals.
    #[default]
    StaticTokens,
    /// Accept any non-empty token and return the default principal.
    AcceptAll,
}

/// Identity and profile data for one principal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Principal identifier.
    pub principal_id: String,

    /// E-mail copied into the raw provider payload.
    pub email: Option<String>,

    /// Value of the `role` profile attribute. `None` means no profile row.
    pub role: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            principal_id: "00000000-0000-0000-0000-000000000001".to_owned(),
            email: Some("dev@localhost".to_owned()),
            role: Some("user".to_owned()),
        }
    }
}

/// Maps a static token to a specific principal.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The principal returned when this token is presented.
    pub identity: IdentityConfig,
}
