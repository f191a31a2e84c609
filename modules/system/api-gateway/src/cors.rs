use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::ApiGatewayConfig;

/// Build the CORS layer from gateway configuration.
///
/// Blank origins are skipped and unparsable ones are dropped with a warning.
/// `"*"` allows any origin; with credentials enabled the request origin is
/// mirrored instead, since browsers refuse a wildcard alongside credentials.
#[must_use]
pub fn build_cors_layer(cfg: &ApiGatewayConfig) -> CorsLayer {
    let cors = &cfg.cors;

    let origins: Vec<&str> = cors
        .allowed_origins
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    let allow_origin = if origins.contains(&"*") {
        if cors.allow_credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        }
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(origin = %o, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    tracing::debug!(
        origins = ?origins,
        allow_credentials = cors.allow_credentials,
        "CORS layer configured"
    );

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cors.allow_credentials)
        .max_age(Duration::from_secs(cors.max_age_seconds))
}
