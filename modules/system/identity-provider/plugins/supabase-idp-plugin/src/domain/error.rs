//! Errors for the Supabase identity provider plugin.

use identity_provider_sdk::IdentityProviderError;
use thiserror::Error;

/// Errors raised while constructing a [`super::SupabaseClient`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid Supabase URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("service role key is empty")]
    MissingServiceKey,

    #[error("service role key is not a valid header value")]
    InvalidServiceKey,

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Map a transport-level failure into the provider error taxonomy.
pub(crate) fn from_transport(op: &str, e: reqwest::Error) -> IdentityProviderError {
    let e = e.without_url();
    if e.is_timeout() {
        IdentityProviderError::Timeout(format!("{op}: {e}"))
    } else if e.is_decode() {
        IdentityProviderError::MalformedResponse(format!("{op}: {e}"))
    } else {
        IdentityProviderError::Network(format!("{op}: {e}"))
    }
}

/// Map an unexpected HTTP status into the provider error taxonomy.
pub(crate) fn from_status(
    op: &str,
    status: reqwest::StatusCode,
    body: &str,
) -> IdentityProviderError {
    let message = summarize_body(body);
    if status.is_server_error() {
        IdentityProviderError::Unavailable(format!("{op}: {status}: {message}"))
    } else {
        IdentityProviderError::Rejected {
            status: status.as_u16(),
            message: format!("{op}: {message}"),
        }
    }
}

const MAX_BODY_SNIPPET: usize = 200;

/// Extract a short human-readable message from an error body.
fn summarize_body(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|k| v.get(*k).and_then(serde_json::Value::as_str))
    });

    let text = from_json.unwrap_or(body).trim();
    if text.is_empty() {
        return "empty response body".to_owned();
    }
    text.chars().take(MAX_BODY_SNIPPET).collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn summarize_prefers_json_message() {
        assert_eq!(
            summarize_body(r#"{"code":400,"msg":"bad_jwt"}"#),
            "bad_jwt".to_owned()
        );
        assert_eq!(
            summarize_body(r#"{"message":"relation does not exist"}"#),
            "relation does not exist".to_owned()
        );
    }

    #[test]
    fn summarize_truncates_plain_text() {
        let long = "x".repeat(1000);
        assert_eq!(summarize_body(&long).len(), MAX_BODY_SNIPPET);
        assert_eq!(summarize_body("   "), "empty response body");
    }

    #[test]
    fn server_errors_are_unavailable() {
        let e = from_status("verify_credential", reqwest::StatusCode::BAD_GATEWAY, "");
        assert!(matches!(e, IdentityProviderError::Unavailable(_)));

        let e = from_status("get_attribute", reqwest::StatusCode::BAD_REQUEST, "{}");
        assert!(matches!(e, IdentityProviderError::Rejected { status: 400, .. }));
    }
}
