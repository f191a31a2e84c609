#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Supabase Identity Provider Plugin
//!
//! Verifies bearer tokens against the project's GoTrue endpoint
//! (`/auth/v1/user`) and reads profile attributes from a PostgREST table
//! (`/rest/v1/<profiles_table>`) using the service role key.
//!
//! ## Configuration
//!
//! ```yaml
//! supabase:
//!   url: "https://abcd.supabase.co"
//!   service_role_key: "<secret>"
//!   profiles_table: "user_profiles"
//!   timeout: "10s"
//! ```

pub mod config;
pub mod domain;

pub use config::SupabaseIdpConfig;
pub use domain::{ClientBuildError, SupabaseClient};
