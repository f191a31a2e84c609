#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Auth Resolver
//!
//! Request authentication and authorization on top of an
//! [`IdentityProviderClient`](identity_provider_sdk::IdentityProviderClient):
//!
//! - [`PrincipalResolver`] - bearer credential to [`AuthResult`]
//! - [`AuthorizationGate`] - resolved principal to [`AuthzResult`]
//!
//! Both hold the same shared provider handle and never cache anything.
//!
//! ## Usage
//!
//! ```ignore
//! let resolver = PrincipalResolver::new(idp.clone());
//! let gate = AuthorizationGate::new(idp);
//!
//! let AuthResult::Authenticated(principal) = resolver.resolve(&credential).await else {
//!     return unauthorized();
//! };
//! match gate.require_admin(principal).await {
//!     AuthzResult::Authorized(p) => handle(p),
//!     AuthzResult::Forbidden(reason) => forbidden(reason),
//!     AuthzResult::Error(reason) => internal_error(reason),
//! }
//! ```

pub mod domain;
pub mod models;

pub use domain::{AuthorizationGate, PrincipalResolver};
pub use models::{AuthResult, AuthzResult};
