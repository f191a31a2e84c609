//! Identity provider selection.
//!
//! The client is built once per process and shared by every request.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use identity_provider_sdk::IdentityProviderClient;
use static_idp_plugin::StaticIdentityProvider;
use supabase_idp_plugin::SupabaseClient;

use crate::config::{AppSettings, IdentityProviderKind};

static PROVIDER: OnceLock<Arc<dyn IdentityProviderClient>> = OnceLock::new();

/// Build a fresh client for the configured provider.
///
/// # Errors
/// Returns an error if the provider settings are incomplete or the HTTP client cannot be built.
pub fn build(settings: &AppSettings) -> anyhow::Result<Arc<dyn IdentityProviderClient>> {
    match settings.identity_provider {
        IdentityProviderKind::Supabase => {
            let cfg = settings.supabase_idp_config()?;
            let client = SupabaseClient::new(&cfg).context("failed to build Supabase client")?;
            tracing::info!(url = %cfg.url, profiles_table = %cfg.profiles_table, "using Supabase identity provider");
            Ok(Arc::new(client))
        }
        IdentityProviderKind::Static => {
            tracing::warn!(
                environment = %settings.environment,
                "using static identity provider; not for production"
            );
            Ok(Arc::new(StaticIdentityProvider::from_config(
                &settings.static_idp,
            )))
        }
    }
}

/// The process-wide client, built on first use.
///
/// # Errors
/// Returns an error if the first build fails; a later call retries.
pub fn shared(settings: &AppSettings) -> anyhow::Result<Arc<dyn IdentityProviderClient>> {
    if let Some(existing) = PROVIDER.get() {
        return Ok(Arc::clone(existing));
    }
    let built = build(settings)?;
    Ok(Arc::clone(PROVIDER.get_or_init(|| built)))
}
