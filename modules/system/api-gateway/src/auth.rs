use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::{collections::HashMap, collections::HashSet, sync::Arc};

use archive_security::{Credential, Principal};
use auth_resolver::{AuthResult, AuthorizationGate, AuthzResult, PrincipalResolver};

use crate::problem::Problem;

pub const MISSING_BEARER: &str = "Missing or invalid Authorization header";

/// Path matcher for a single HTTP method.
#[derive(Clone, Default)]
pub struct RouteMatcher {
    matcher: matchit::Router<()>,
}

impl RouteMatcher {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, path: &str) -> Result<(), matchit::InsertError> {
        self.matcher.insert(path, ())
    }

    fn find(&self, path: &str) -> bool {
        self.matcher.at(path).is_ok()
    }
}

/// Convert Axum path syntax `:param` to matchit syntax `{param}`
fn convert_axum_path_to_matchit(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' {
            result.push('{');
            while matches!(chars.peek(), Some(c) if c.is_alphanumeric() || *c == '_') {
                if let Some(c) = chars.next() {
                    result.push(c);
                }
            }
            result.push('}');
        } else {
            result.push(ch);
        }
    }

    result
}

/// What a route demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRequirement {
    /// Public route.
    None,
    /// A verified principal.
    Required,
    /// A verified principal whose stored role is admin.
    Admin,
}

type MatcherMap = Arc<HashMap<Method, RouteMatcher>>;

/// Per-(method, path) authentication policy.
#[derive(Clone)]
pub struct GatewayRoutePolicy {
    admin_matchers: MatcherMap,
    route_matchers: MatcherMap,
    public_matchers: MatcherMap,
    require_auth_by_default: bool,
}

impl GatewayRoutePolicy {
    #[must_use]
    pub fn new(
        admin_matchers: MatcherMap,
        route_matchers: MatcherMap,
        public_matchers: MatcherMap,
        require_auth_by_default: bool,
    ) -> Self {
        Self {
            admin_matchers,
            route_matchers,
            public_matchers,
            require_auth_by_default,
        }
    }

    /// Resolve the requirement for a given (method, path).
    ///
    /// Admin beats authenticated beats public; unknown routes fall back to
    /// `require_auth_by_default`.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> AuthRequirement {
        let hit = |map: &MatcherMap| map.get(method).is_some_and(|m| m.find(path));

        if hit(&self.admin_matchers) {
            return AuthRequirement::Admin;
        }

        let is_authenticated = hit(&self.route_matchers);
        let is_public = hit(&self.public_matchers);

        if is_authenticated || (self.require_auth_by_default && !is_public) {
            AuthRequirement::Required
        } else {
            AuthRequirement::None
        }
    }
}

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub resolver: PrincipalResolver,
    pub gate: AuthorizationGate,
    pub route_policy: GatewayRoutePolicy,
}

fn build_matchers(
    routes: impl IntoIterator<Item = (Method, String)>,
    kind: &str,
) -> anyhow::Result<MatcherMap> {
    let mut map: HashMap<Method, RouteMatcher> = HashMap::new();
    for (method, path) in routes {
        let matcher = map.entry(method).or_insert_with(RouteMatcher::new);
        let matchit_path = convert_axum_path_to_matchit(&path);
        matcher
            .insert(&matchit_path)
            .map_err(|e| anyhow::anyhow!("Failed to insert {kind} route pattern '{path}': {e}"))?;
    }
    Ok(Arc::new(map))
}

/// Build a `GatewayRoutePolicy` from `(method, path, requirement)` triples.
///
/// # Errors
/// Returns an error when two patterns conflict inside one matcher.
pub fn build_route_policy(
    cfg: &crate::config::ApiGatewayConfig,
    routes: impl IntoIterator<Item = (Method, String, AuthRequirement)>,
) -> anyhow::Result<GatewayRoutePolicy> {
    let mut admin = HashSet::new();
    let mut authenticated = HashSet::new();
    let mut public = HashSet::new();

    for (method, path, requirement) in routes {
        let bucket = match requirement {
            AuthRequirement::Admin => &mut admin,
            AuthRequirement::Required => &mut authenticated,
            AuthRequirement::None => &mut public,
        };
        bucket.insert((method, path));
    }

    Ok(GatewayRoutePolicy::new(
        build_matchers(admin, "admin")?,
        build_matchers(authenticated, "authenticated")?,
        build_matchers(public, "public")?,
        cfg.require_auth_by_default,
    ))
}

/// Authentication middleware backed by the principal resolver and the admin gate.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Resolves the route's requirement via `GatewayRoutePolicy`
/// 3. For protected routes: extracts the bearer credential and resolves a `Principal`
/// 4. For admin routes: additionally runs the admin gate
///
/// The resolved `Principal` is inserted into request extensions.
pub async fn auth_middleware(
    axum::extract::State(state): axum::extract::State<AuthState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let requirement = state.route_policy.resolve(req.method(), req.uri().path());
    if requirement == AuthRequirement::None {
        return next.run(req).await;
    }

    let instance = req.uri().path().to_owned();

    let Some(credential) = extract_bearer_token(req.headers()).and_then(|t| Credential::new(t).ok())
    else {
        tracing::debug!(path = %instance, "request without usable bearer credential");
        return unauthorized(MISSING_BEARER, &instance);
    };

    let principal = match state.resolver.resolve(&credential).await {
        AuthResult::Authenticated(principal) => principal,
        AuthResult::Unauthenticated(reason) => return unauthorized(&reason, &instance),
    };

    let principal = if requirement == AuthRequirement::Admin {
        match state.gate.require_admin(principal).await {
            AuthzResult::Authorized(principal) => principal,
            AuthzResult::Forbidden(reason) => {
                tracing::debug!(path = %instance, "admin gate denied request");
                return Problem::new(StatusCode::FORBIDDEN, "Forbidden", reason)
                    .with_instance(instance)
                    .into_response();
            }
            AuthzResult::Error(reason) => {
                return Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    reason,
                )
                .with_instance(instance)
                .into_response();
            }
        }
    } else {
        principal
    };

    req.extensions_mut().insert::<Principal>(principal);
    next.run(req).await
}

fn unauthorized(detail: &str, instance: &str) -> Response {
    let mut resp = Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail)
        .with_instance(instance)
        .into_response();
    resp.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    resp
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively (RFC 7235).
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &axum::http::HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
