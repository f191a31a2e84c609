//! HTTP client for a Supabase project.
//!
//! Implements `IdentityProviderClient` on top of GoTrue and PostgREST.

use archive_security::Credential;
use async_trait::async_trait;
use identity_provider_sdk::{IdentityProviderClient, IdentityProviderError, VerifiedPrincipal};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use url::Url;

use super::error::{ClientBuildError, from_status, from_transport};
use crate::config::SupabaseIdpConfig;

const APIKEY_HEADER: &str = "apikey";

/// Supabase-backed identity provider client.
///
/// Holds only fixed connection configuration, so a single instance is
/// shared read-only across requests (wrap it in `Arc`).
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    profiles_table: String,
    apikey: HeaderValue,
    service_bearer: HeaderValue,
}

impl SupabaseClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if the URL does not parse, the service
    /// key is empty or not header-safe, or the HTTP client cannot be built.
    pub fn new(cfg: &SupabaseIdpConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&cfg.url)?;

        let key = cfg.service_role_key.expose_secret();
        if key.trim().is_empty() {
            return Err(ClientBuildError::MissingServiceKey);
        }
        let apikey = sensitive_header(key)?;
        let service_bearer = sensitive_header(&format!("Bearer {key}"))?;

        let http = reqwest::Client::builder().timeout(cfg.timeout).build()?;

        tracing::info!(
            base_url = %base_url,
            profiles_table = %cfg.profiles_table,
            timeout_ms = u64::try_from(cfg.timeout.as_millis()).unwrap_or(u64::MAX),
            "Supabase identity provider client created"
        );

        Ok(Self {
            http,
            base_url,
            profiles_table: cfg.profiles_table.clone(),
            apikey,
            service_bearer,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| IdentityProviderError::Network(format!("invalid endpoint '{path}': {e}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientBuildError> {
    // Keep any path prefix: `Url::join` replaces the last segment unless it
    // ends with a slash.
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|source| ClientBuildError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })
}

fn sensitive_header(value: &str) -> Result<HeaderValue, ClientBuildError> {
    let mut header =
        HeaderValue::from_str(value).map_err(|_| ClientBuildError::InvalidServiceKey)?;
    header.set_sensitive(true);
    Ok(header)
}

/// Interpret a GoTrue `/user` body. A user record must carry a non-empty `id`.
fn principal_from_user(body: Value) -> Result<VerifiedPrincipal, IdentityProviderError> {
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            IdentityProviderError::MalformedResponse(
                "verify_credential: user record has no id".to_owned(),
            )
        })?;
    Ok(VerifiedPrincipal::new(id, body))
}

/// Interpret a PostgREST row set for a single-column select.
fn attribute_from_rows(
    body: &Value,
    attribute: &str,
) -> Result<Option<String>, IdentityProviderError> {
    let rows = body.as_array().ok_or_else(|| {
        IdentityProviderError::MalformedResponse("get_attribute: expected a JSON array".to_owned())
    })?;

    let Some(first) = rows.first() else {
        return Ok(None);
    };

    match first.get(attribute) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(IdentityProviderError::MalformedResponse(format!(
            "get_attribute: '{attribute}' is not a string: {other}"
        ))),
    }
}

#[async_trait]
impl IdentityProviderClient for SupabaseClient {
    #[tracing::instrument(skip_all)]
    async fn verify_credential(
        &self,
        credential: &Credential,
    ) -> Result<Option<VerifiedPrincipal>, IdentityProviderError> {
        let op = "verify_credential";
        let Ok(mut bearer) = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
        else {
            tracing::debug!("credential contains characters not allowed in a header");
            return Ok(None);
        };
        bearer.set_sensitive(true);

        let url = self.endpoint("auth/v1/user")?;
        let resp = self
            .http
            .get(url)
            .header(APIKEY_HEADER, self.apikey.clone())
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|e| from_transport(op, e))?;

        let status = resp.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                tracing::debug!(%status, "provider did not recognise credential");
                Ok(None)
            }
            s if s.is_success() => {
                let body: Value = resp.json().await.map_err(|e| from_transport(op, e))?;
                principal_from_user(body).map(Some)
            }
            s => {
                let body = resp.text().await.unwrap_or_default();
                Err(from_status(op, s, &body))
            }
        }
    }

    #[tracing::instrument(skip_all, fields(principal_id = %principal_id, attribute = %attribute))]
    async fn get_attribute(
        &self,
        principal_id: &str,
        attribute: &str,
    ) -> Result<Option<String>, IdentityProviderError> {
        let op = "get_attribute";
        let mut url = self.endpoint(&format!("rest/v1/{}", self.profiles_table))?;
        url.query_pairs_mut()
            .append_pair("select", attribute)
            .append_pair("id", &format!("eq.{principal_id}"));

        let resp = self
            .http
            .get(url)
            .header(APIKEY_HEADER, self.apikey.clone())
            .header(AUTHORIZATION, self.service_bearer.clone())
            .send()
            .await
            .map_err(|e| from_transport(op, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(from_status(op, status, &body));
        }

        let body: Value = resp.json().await.map_err(|e| from_transport(op, e))?;
        attribute_from_rows(&body, attribute)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn base_url_keeps_path_prefix() {
        let url = parse_base_url("http://localhost:54321/proxy").unwrap();
        assert_eq!(
            url.join("auth/v1/user").unwrap().as_str(),
            "http://localhost:54321/proxy/auth/v1/user"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ClientBuildError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn empty_service_key_is_rejected() {
        let cfg = SupabaseIdpConfig::new("https://abcd.supabase.co", "  ");
        assert!(matches!(
            SupabaseClient::new(&cfg),
            Err(ClientBuildError::MissingServiceKey)
        ));
    }

    #[test]
    fn user_without_id_is_malformed() {
        let err = principal_from_user(json!({ "email": "a@b.c" })).unwrap_err();
        assert!(matches!(err, IdentityProviderError::MalformedResponse(_)));

        let err = principal_from_user(json!({ "id": "" })).unwrap_err();
        assert!(matches!(err, IdentityProviderError::MalformedResponse(_)));
    }

    #[test]
    fn rows_are_interpreted() {
        assert_eq!(
            attribute_from_rows(&json!([{ "role": "admin" }]), "role").unwrap(),
            Some("admin".to_owned())
        );
        assert_eq!(attribute_from_rows(&json!([]), "role").unwrap(), None);
        assert_eq!(
            attribute_from_rows(&json!([{ "role": null }]), "role").unwrap(),
            None
        );
        assert!(attribute_from_rows(&json!([{ "role": 7 }]), "role").is_err());
        assert!(attribute_from_rows(&json!({ "role": "admin" }), "role").is_err());
    }
}
