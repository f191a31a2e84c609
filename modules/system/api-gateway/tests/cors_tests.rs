#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for CORS preflight and actual request handling

mod common;

use api_gateway::ApiGatewayConfig;
use api_gateway::config::CorsConfig;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::{MEMBER_TOKEN, router, router_with};
use tower::ServiceExt;

fn preflight(origin: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(path)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn preflight_from_allowed_origin_skips_auth() {
    let resp = router()
        .oneshot(preflight("http://localhost:5173", "/api/admin/status"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    let allowed_headers = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(allowed_headers.contains("authorization"));
}

#[tokio::test]
async fn preflight_from_unknown_origin_gets_no_allow_origin() {
    let resp = router()
        .oneshot(preflight("https://evil.example", "/api/auth/me"))
        .await
        .unwrap();

    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn configured_frontend_origin_is_honoured_on_actual_request() {
    let mut config = ApiGatewayConfig::default();
    config
        .cors
        .allowed_origins
        .push("https://archive.example.org".to_owned());

    let req = Request::builder()
        .uri("/api/auth/me")
        .header(header::ORIGIN, "https://archive.example.org")
        .header(header::AUTHORIZATION, format!("Bearer {MEMBER_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let resp = router_with(config, false).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://archive.example.org"
    );
}

#[tokio::test]
async fn blank_and_invalid_origins_are_skipped() {
    let config = ApiGatewayConfig {
        cors: CorsConfig {
            allowed_origins: vec![
                String::new(),
                "bad\norigin".to_owned(),
                "http://localhost:3000".to_owned(),
            ],
            ..CorsConfig::default()
        },
        ..ApiGatewayConfig::default()
    };

    let resp = router_with(config, false)
        .oneshot(preflight("http://localhost:3000", "/health"))
        .await
        .unwrap();

    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn cors_disabled_emits_no_headers() {
    let config = ApiGatewayConfig {
        cors_enabled: false,
        ..ApiGatewayConfig::default()
    };

    let req = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let resp = router_with(config, false).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
