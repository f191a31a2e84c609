#![allow(dead_code)]

use std::sync::Arc;

use api_gateway::{ApiGateway, ApiGatewayConfig};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use static_idp_plugin::{StaticIdentityProvider, StaticIdpPluginConfig};

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const MEMBER_TOKEN: &str = "tok-member";

pub fn idp_config(fail_attribute_lookups: bool) -> StaticIdpPluginConfig {
    serde_json::from_value(serde_json::json!({
        "mode": "static_tokens",
        "fail_attribute_lookups": fail_attribute_lookups,
        "tokens": [
            {
                "token": ADMIN_TOKEN,
                "identity": { "principal_id": "u-admin", "email": "curator@example.com", "role": "admin" }
            },
            {
                "token": MEMBER_TOKEN,
                "identity": { "principal_id": "u-member", "email": "reader@example.com", "role": "member" }
            }
        ]
    }))
    .unwrap()
}

pub fn router_with(config: ApiGatewayConfig, fail_attribute_lookups: bool) -> Router {
    let idp = StaticIdentityProvider::from_config(&idp_config(fail_attribute_lookups));
    ApiGateway::new(config, Arc::new(idp)).build_router().unwrap()
}

pub fn router() -> Router {
    router_with(ApiGatewayConfig::default(), false)
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
