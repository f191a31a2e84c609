#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use archive_security::{Credential, Principal, VerifiedPrincipal};
use async_trait::async_trait;
use identity_provider_sdk::{IdentityProviderClient, IdentityProviderError};
use serde_json::json;

/// Scripted provider: fixed answers per token / principal, counts calls.
#[derive(Default)]
pub struct ScriptedProvider {
    pub verify: HashMap<String, Result<Option<String>, IdentityProviderError>>,
    pub roles: HashMap<String, Result<Option<String>, IdentityProviderError>>,
    pub verify_calls: AtomicUsize,
    pub role_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn with_user(mut self, token: &str, principal_id: &str, role: Option<&str>) -> Self {
        self.verify
            .insert(token.to_owned(), Ok(Some(principal_id.to_owned())));
        self.roles
            .insert(principal_id.to_owned(), Ok(role.map(str::to_owned)));
        self
    }

    pub fn with_verify_error(mut self, token: &str, err: IdentityProviderError) -> Self {
        self.verify.insert(token.to_owned(), Err(err));
        self
    }

    pub fn with_role_error(mut self, principal_id: &str, err: IdentityProviderError) -> Self {
        self.roles.insert(principal_id.to_owned(), Err(err));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl IdentityProviderClient for ScriptedProvider {
    async fn verify_credential(
        &self,
        credential: &Credential,
    ) -> Result<Option<VerifiedPrincipal>, IdentityProviderError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match self.verify.get(credential.expose()) {
            None | Some(Ok(None)) => Ok(None),
            Some(Ok(Some(id))) => Ok(Some(VerifiedPrincipal::new(
                id.clone(),
                json!({ "id": id, "role": "admin" }),
            ))),
            Some(Err(e)) => Err(e.clone()),
        }
    }

    async fn get_attribute(
        &self,
        principal_id: &str,
        _attribute: &str,
    ) -> Result<Option<String>, IdentityProviderError> {
        self.role_calls.fetch_add(1, Ordering::SeqCst);
        match self.roles.get(principal_id) {
            None => Ok(None),
            Some(r) => r.clone(),
        }
    }
}

pub fn cred(token: &str) -> Credential {
    Credential::new(token).expect("non-empty token")
}

/// A principal as the resolver would produce it for `principal_id`.
pub fn principal(principal_id: &str) -> Principal {
    Principal::from(VerifiedPrincipal::new(
        principal_id,
        json!({ "id": principal_id }),
    ))
}
