#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! API Gateway
//!
//! Owns the HTTP surface of the archive backend:
//!
//! - public health endpoints (`/`, `/health`)
//! - bearer authentication and the admin gate, applied per route from a
//!   [`auth::GatewayRoutePolicy`]
//! - CORS, request ids, tracing spans, body limit and request timeout
//!
//! Errors are rendered as RFC 9457 [`Problem`] documents.

pub mod auth;
pub mod config;
pub mod cors;
pub mod middleware;
pub mod module;
pub mod problem;
pub mod web;

pub use config::ApiGatewayConfig;
pub use module::ApiGateway;
pub use problem::Problem;
