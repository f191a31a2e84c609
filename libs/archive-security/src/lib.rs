#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives shared by the archive backend.
//!
//! - [`Credential`] - an opaque bearer token, redacted in `Debug` output
//! - [`VerifiedPrincipal`] - a user record returned by the identity provider
//! - [`Principal`] - the authenticated identity, built only from a [`VerifiedPrincipal`]
//! - [`constants`] - role values and profile attribute names

pub mod constants;
pub mod credential;
pub mod principal;

pub use constants::{ADMIN_ROLE, ROLE_ATTRIBUTE};
pub use credential::{Credential, CredentialError};
pub use principal::{Principal, VerifiedPrincipal};
