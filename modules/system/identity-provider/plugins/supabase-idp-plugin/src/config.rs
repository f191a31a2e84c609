//! Configuration for the Supabase identity provider plugin.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

fn default_profiles_table() -> String {
    "user_profiles".to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupabaseIdpConfig {
    /// Project base URL, e.g. `https://abcd.supabase.co`.
    pub url: String,

    /// Service role key, sent as `apikey` on every call and as the bearer
    /// for profile reads.
    pub service_role_key: SecretString,

    /// Table holding `id` and `role` columns.
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,

    /// Per-request timeout (humantime string such as `"10s"`).
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl SupabaseIdpConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service_role_key: SecretString::from(service_role_key.into()),
            profiles_table: default_profiles_table(),
            timeout: default_timeout(),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}
