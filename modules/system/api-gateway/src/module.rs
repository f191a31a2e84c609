//! API Gateway definition
//!
//! Owns the route table, the middleware stack and the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::Method;
use axum::middleware::from_fn_with_state;
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use auth_resolver::{AuthorizationGate, PrincipalResolver};
use identity_provider_sdk::IdentityProviderClient;

use crate::auth::{self, AuthRequirement};
use crate::config::ApiGatewayConfig;
use crate::middleware;
use crate::web;

/// Main API Gateway: wires the resolver and gate into the router and serves it.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    idp: Arc<dyn IdentityProviderClient>,
}

impl ApiGateway {
    #[must_use]
    pub fn new(config: ApiGatewayConfig, idp: Arc<dyn IdentityProviderClient>) -> Self {
        Self { config, idp }
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Every route the gateway serves with its auth requirement.
    fn route_specs() -> [(Method, &'static str, AuthRequirement); 4] {
        [
            (Method::GET, "/", AuthRequirement::None),
            (Method::GET, "/health", AuthRequirement::None),
            (Method::GET, "/api/auth/me", AuthRequirement::Required),
            (Method::GET, "/api/admin/status", AuthRequirement::Admin),
        ]
    }

    fn build_route_policy_from_specs(&self) -> Result<auth::GatewayRoutePolicy> {
        let specs = Self::route_specs();
        let route_policy = auth::build_route_policy(
            &self.config,
            specs
                .iter()
                .map(|(m, p, r)| (m.clone(), (*p).to_owned(), *r)),
        )?;

        tracing::info!(
            require_auth_by_default = self.config.require_auth_by_default,
            routes_count = specs.len(),
            "Route policy built"
        );

        Ok(route_policy)
    }

    /// Apply all middleware layers to a router.
    fn apply_middleware_stack(&self, mut router: Router) -> Result<Router> {
        // `Router::layer` wraps: the last added layer runs first on the request path.
        //
        // Request execution order (outermost -> innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> Timeout -> BodyLimit -> CORS -> Auth -> Router
        let config = &self.config;

        // 6) Auth
        let auth_state = auth::AuthState {
            resolver: PrincipalResolver::new(Arc::clone(&self.idp)),
            gate: AuthorizationGate::new(Arc::clone(&self.idp)),
            route_policy: self.build_route_policy_from_specs()?,
        };
        router = router.layer(from_fn_with_state(auth_state, auth::auth_middleware));

        // 5) CORS (outer to auth so OPTIONS preflight short-circuits)
        if config.cors_enabled {
            router = router.layer(crate::cors::build_cors_layer(config));
        }

        // 4) Body limit
        router = router.layer(RequestBodyLimitLayer::new(config.defaults.body_limit_bytes));
        router = router.layer(DefaultBodyLimit::max(config.defaults.body_limit_bytes));

        // 3) Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::GATEWAY_TIMEOUT,
            config.defaults.request_timeout,
        ));

        // 2) Trace
        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get(middleware::request_id::header())
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        request_id = %rid,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        );

        // 1) Request ID handling: generate if missing, then echo on the response.
        let x_request_id = middleware::request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(
            x_request_id,
            middleware::request_id::MakeReqId,
        ));

        Ok(router)
    }

    /// Build the HTTP router with every route and the full middleware stack.
    ///
    /// # Errors
    /// Returns an error if the route policy cannot be built.
    pub fn build_router(&self) -> Result<Router> {
        let router = Router::new()
            .route("/", get(web::root))
            .with_state(self.config.service.clone())
            .route("/health", get(web::health_check))
            .route("/api/auth/me", get(web::me))
            .route("/api/admin/status", get(web::admin_status));

        self.apply_middleware_stack(router)
    }

    /// Parse bind address from configuration string.
    fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
        bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
    }

    /// HTTP server: bind, serve until cancelled.
    ///
    /// # Errors
    /// Returns an error if the address is invalid, binding fails or the server dies.
    pub async fn serve(self, cancel: CancellationToken) -> Result<()> {
        let addr = Self::parse_bind_address(&self.config.bind_addr)?;
        let router = self.build_router()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
