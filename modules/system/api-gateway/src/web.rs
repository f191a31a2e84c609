#![allow(clippy::unused_async)]

use archive_security::{ADMIN_ROLE, Principal};
use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::config::ServiceInfoConfig;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub id: String,
    pub role: &'static str,
}

pub async fn root(State(info): State<ServiceInfoConfig>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: info.name,
        version: info.version,
        status: "healthy",
    })
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

/// The principal attached by the auth middleware.
pub async fn me(Extension(principal): Extension<Principal>) -> Json<CurrentUser> {
    Json(CurrentUser {
        email: principal.email().map(str::to_owned),
        id: principal.principal_id().to_owned(),
    })
}

pub async fn admin_status(Extension(principal): Extension<Principal>) -> Json<AdminStatus> {
    Json(AdminStatus {
        id: principal.principal_id().to_owned(),
        role: ADMIN_ROLE,
    })
}
