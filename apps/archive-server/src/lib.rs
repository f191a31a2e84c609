#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Archive server bootstrap: settings, logging and provider wiring.

pub mod config;
pub mod logging;
pub mod provider;

pub use config::{AppSettings, ConfigError, IdentityProviderKind};
