use thiserror::Error;

/// Errors surfaced by the AFIP web-service clients.
///
/// Absence ("no such taxpayer", "no such voucher") is not an error — the
/// lookup operations return `Ok(None)` for it. Everything else lands here.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum AfipError {
    /// Business-rule rejection reported by the service itself, either as a
    /// top-level error entry or synthesized from voucher observations.
    /// Carries the authority's numeric code and message unmodified.
    #[error("AFIP service error {code}: {message}")]
    Service {
        /// Numeric error code as reported by AFIP.
        code: i64,
        /// Error message as reported by AFIP.
        message: String,
    },

    /// Caller-supplied data could not be shaped into a valid request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The auth delegate could not supply a credential for the service.
    #[error("credential delegation failed: {0}")]
    Auth(String),

    /// Network, protocol, or SOAP-envelope failure from the transport.
    /// Propagated as-is; this crate adds no retry.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response tree lacked a field this crate must unwrap, or carried
    /// a value it could not interpret.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl AfipError {
    /// The numeric service code, if this is a [`AfipError::Service`].
    pub fn service_code(&self) -> Option<i64> {
        match self {
            Self::Service { code, .. } => Some(*code),
            _ => None,
        }
    }
}
