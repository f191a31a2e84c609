use serde_json::Value;

/// A user record the identity provider has confirmed for a credential.
///
/// Built only by identity provider clients, after the provider answered the
/// verification call. The core turns it into a [`Principal`]; nothing else
/// can produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPrincipal {
    principal_id: String,
    raw: Value,
}

impl VerifiedPrincipal {
    #[must_use]
    pub fn new(principal_id: impl Into<String>, raw: Value) -> Self {
        Self {
            principal_id: principal_id.into(),
            raw,
        }
    }

    #[must_use]
    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// The authenticated identity resolved from a credential.
///
/// Only obtainable from a [`VerifiedPrincipal`]. It carries the provider's
/// raw user record so handlers can read additional claims without another
/// round-trip. Principals are request-scoped and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    principal_id: String,
    raw: Value,
}

impl From<VerifiedPrincipal> for Principal {
    fn from(verified: VerifiedPrincipal) -> Self {
        Self {
            principal_id: verified.principal_id,
            raw: verified.raw,
        }
    }
}

impl Principal {
    /// Stable identifier assigned by the identity provider.
    #[must_use]
    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    /// Raw provider payload.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// E-mail address from the provider payload, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.raw.get("email").and_then(Value::as_str)
    }
}
