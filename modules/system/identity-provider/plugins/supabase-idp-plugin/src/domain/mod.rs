//! Domain layer for the Supabase identity provider.

pub mod client;
pub mod error;

pub use client::SupabaseClient;
pub use error::ClientBuildError;
