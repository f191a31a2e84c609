use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// API gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiGatewayConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Detailed CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Metadata served by the root endpoint
    #[serde(default)]
    pub service: ServiceInfoConfig,

    /// Global defaults
    #[serde(default)]
    pub defaults: Defaults,

    /// If true, routes without an explicit requirement still require authentication.
    /// Off by default so unknown paths answer 404.
    #[serde(default)]
    pub require_auth_by_default: bool,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_enabled: true,
            cors: CorsConfig::default(),
            service: ServiceInfoConfig::default(),
            defaults: Defaults::default(),
            require_auth_by_default: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Defaults {
    /// Global request body size limit in bytes
    pub body_limit_bytes: usize,
    /// Whole-request timeout; exceeded requests get 504
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub request_timeout: Duration,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CorsConfig {
    /// Allowed origins: `["*"]` means any. Empty entries are ignored.
    pub allowed_origins: Vec<String>,
    /// Whether to allow credentials
    pub allow_credentials: bool,
    /// Max age for preflight caching in seconds
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_owned(),
                "http://localhost:3000".to_owned(),
            ],
            allow_credentials: true,
            max_age_seconds: 600,
        }
    }
}

/// Service metadata returned by `GET /`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServiceInfoConfig {
    pub name: String,
    pub version: String,
}

impl Default for ServiceInfoConfig {
    fn default() -> Self {
        Self {
            name: "Arthur Dean Austin Archive API".to_owned(),
            version: "1.0.0".to_owned(),
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

fn serialize_duration<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*value).to_string())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg: ApiGatewayConfig = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(cfg.bind_addr, "0.0.0.0:8000");
        assert!(cfg.cors_enabled);
        assert!(!cfg.require_auth_by_default);
        assert_eq!(cfg.cors.allowed_origins.len(), 2);
        assert_eq!(cfg.defaults.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.service.version, "1.0.0");
    }

    #[test]
    fn request_timeout_round_trips_through_humantime() {
        let cfg: ApiGatewayConfig = serde_json::from_value(serde_json::json!({
            "defaults": { "request_timeout": "5s", "body_limit_bytes": 1024 }
        }))
        .unwrap();
        assert_eq!(cfg.defaults.request_timeout, Duration::from_secs(5));

        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["defaults"]["request_timeout"], "5s");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<ApiGatewayConfig, _> =
            serde_json::from_value(serde_json::json!({ "auth_disabled": true }));
        assert!(res.is_err());
    }
}
