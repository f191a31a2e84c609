#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Identity Provider Plugin
//!
//! This plugin provides a static token-to-principal mapping and an in-memory
//! role table for development and testing.
//!
//! ## Modes
//!
//! - **`static_tokens`** (default): Maps specific tokens to specific principals.
//!   Unknown tokens are rejected.
//!
//! - **`accept_all`**: Accepts any non-empty token and returns the configured
//!   default principal. Useful for local frontend work without a provider.
//!
//! ## Configuration
//!
//! ```yaml
//! static_idp:
//!   mode: static_tokens
//!   tokens:
//!     - token: "tok-valid-1"
//!       identity:
//!         principal_id: "u1"
//!         email: "curator@example.com"
//!         role: "admin"
//!     - token: "tok-valid-2"
//!       identity:
//!         principal_id: "u2"
//!         role: "member"
//! ```

pub mod config;
pub mod domain;

pub use config::{IdentityConfig, IdpMode, StaticIdpPluginConfig, TokenMapping};
pub use domain::Service as StaticIdentityProvider;
