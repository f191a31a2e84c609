//! Error types for identity provider clients.

use thiserror::Error;

/// Failures at the identity provider boundary.
///
/// Only I/O-level conditions are represented. Messages never include the
/// bearer credential or the service key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityProviderError {
    /// The request could not be sent or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The provider did not answer in time.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The provider answered with a body we cannot interpret.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The provider refused the request with a non-success status.
    #[error("provider rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The provider reported an outage (5xx).
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl IdentityProviderError {
    /// Whether the failure points at infrastructure rather than the caller.
    #[must_use]
    pub fn is_outage(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Unavailable(_)
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn outage_classification() {
        assert!(IdentityProviderError::Network("reset".to_owned()).is_outage());
        assert!(IdentityProviderError::Timeout("10s".to_owned()).is_outage());
        assert!(IdentityProviderError::Unavailable("503".to_owned()).is_outage());
        assert!(!IdentityProviderError::MalformedResponse("x".to_owned()).is_outage());
        assert!(
            !IdentityProviderError::Rejected {
                status: 400,
                message: "bad".to_owned()
            }
            .is_outage()
        );
    }

    #[test]
    fn display_includes_status() {
        let e = IdentityProviderError::Rejected {
            status: 422,
            message: "unprocessable".to_owned(),
        };
        assert_eq!(
            e.to_string(),
            "provider rejected request with status 422: unprocessable"
        );
    }
}
