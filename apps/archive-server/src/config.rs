//! Layered application settings.
//!
//! Sources, lowest precedence first:
//! 1. struct defaults
//! 2. optional YAML file (`--config`)
//! 3. environment variables

use std::path::Path;

use api_gateway::ApiGatewayConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use static_idp_plugin::StaticIdpPluginConfig;
use supabase_idp_plugin::SupabaseIdpConfig;

use crate::logging::LoggingConfig;

/// Flat environment variables carried over from the deployment environment.
const PLAIN_ENV_KEYS: [&str; 5] = [
    "SUPABASE_URL",
    "SUPABASE_SERVICE_ROLE_KEY",
    "OPENAI_API_KEY",
    "FRONTEND_URL",
    "ENVIRONMENT",
];

/// `ARCHIVE_`-prefixed overrides, listed without the prefix.
const ARCHIVE_ENV_KEYS: [&str; 3] = ["bind_addr", "identity_provider", "log_format"];

const REDACTED: &str = "***";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("{0} is required when identity_provider is supabase")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProviderKind {
    #[default]
    Supabase,
    Static,
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_owned()
}

fn default_environment() -> String {
    "development".to_owned()
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_owned()
}

/// Effective settings for one process.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSettings {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_service_role_key: Option<SecretString>,
    #[serde(default)]
    pub supabase_profiles_table: Option<String>,
    /// Loaded for parity with the deployment environment; not used by the auth core.
    #[serde(default)]
    pub openai_api_key: Option<SecretString>,
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub identity_provider: IdentityProviderKind,
    #[serde(default)]
    pub static_idp: StaticIdpPluginConfig,
    #[serde(default)]
    pub gateway: ApiGatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_service_role_key: None,
            supabase_profiles_table: None,
            openai_api_key: None,
            frontend_url: default_frontend_url(),
            environment: default_environment(),
            bind_addr: default_bind_addr(),
            identity_provider: IdentityProviderKind::default(),
            static_idp: StaticIdpPluginConfig::default(),
            gateway: ApiGatewayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from the optional YAML file and the environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a source cannot be parsed or a required
    /// provider setting is missing.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment = figment
            .merge(Env::raw().only(&PLAIN_ENV_KEYS))
            .merge(
                Env::prefixed("ARCHIVE_")
                    .only(&ARCHIVE_ENV_KEYS)
                    .map(|key| {
                        if key.as_str().eq_ignore_ascii_case("log_format") {
                            "logging.format".into()
                        } else {
                            key.into()
                        }
                    }),
            );

        let settings: Self = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.identity_provider == IdentityProviderKind::Supabase {
            self.supabase_idp_config()?;
        }
        Ok(())
    }

    /// Supabase plugin configuration derived from the flat settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] when the URL or the service key is absent or blank.
    pub fn supabase_idp_config(&self) -> Result<SupabaseIdpConfig, ConfigError> {
        let url = self
            .supabase_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let key = self
            .supabase_service_role_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;

        let mut cfg = SupabaseIdpConfig::new(url, key);
        if let Some(table) = &self.supabase_profiles_table {
            cfg.profiles_table.clone_from(table);
        }
        Ok(cfg)
    }

    /// Gateway configuration with the bind address and frontend origin applied.
    #[must_use]
    pub fn gateway_config(&self) -> ApiGatewayConfig {
        let mut cfg = self.gateway.clone();
        cfg.bind_addr.clone_from(&self.bind_addr);

        let frontend = self.frontend_url.trim();
        if !frontend.is_empty() && !cfg.cors.allowed_origins.iter().any(|o| o == frontend) {
            cfg.cors.allowed_origins.push(frontend.to_owned());
        }
        cfg
    }

    /// Effective settings as JSON with every secret replaced by `***`.
    #[must_use]
    pub fn redacted(&self) -> serde_json::Value {
        let secret = |s: Option<&SecretString>| s.map(|_| REDACTED);
        serde_json::json!({
            "supabase_url": self.supabase_url,
            "supabase_service_role_key": secret(self.supabase_service_role_key.as_ref()),
            "supabase_profiles_table": self.supabase_profiles_table,
            "openai_api_key": secret(self.openai_api_key.as_ref()),
            "frontend_url": self.frontend_url,
            "environment": self.environment,
            "bind_addr": self.bind_addr,
            "identity_provider": self.identity_provider,
            "static_idp": {
                "mode": self.static_idp.mode,
                "tokens": self.static_idp.tokens.len(),
                "fail_attribute_lookups": self.static_idp.fail_attribute_lookups,
            },
            "gateway": self.gateway_config(),
            "logging": self.logging,
        })
    }
}
