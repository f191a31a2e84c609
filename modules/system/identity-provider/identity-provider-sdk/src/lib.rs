//! Identity Provider SDK
//!
//! This crate provides the contract the authentication core depends on:
//!
//! - [`IdentityProviderClient`] - API trait implemented by provider plugins
//! - [`IdentityProviderError`] - closed set of I/O-boundary failures
//! - [`VerifiedPrincipal`] - the only value a plugin may hand back for a verified credential
//!
//! ## Usage
//!
//! ```ignore
//! use identity_provider_sdk::IdentityProviderClient;
//!
//! let idp: Arc<dyn IdentityProviderClient> = Arc::new(SupabaseClient::new(&cfg)?);
//!
//! if let Some(verified) = idp.verify_credential(&credential).await? {
//!     let role = idp.get_attribute(verified.principal_id(), "role").await?;
//! }
//! ```

pub mod api;
pub mod error;

pub use api::IdentityProviderClient;
pub use error::IdentityProviderError;

pub use archive_security::VerifiedPrincipal;
