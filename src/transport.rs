//! SOAP transport boundary.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AfipError;

/// Executes one named SOAP operation against a WSDL-bound endpoint.
///
/// Implementations own WSDL loading, endpoint selection (production vs.
/// testing), and envelope encoding. They must hand back the parsed response
/// tree with the remote field names untouched — including AFIP's habit of
/// returning a single item sometimes as a scalar and sometimes as a
/// one-element list. Normalizing that ambiguity is this crate's job, not
/// the transport's.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Execute `operation` with the given parameter tree and return the
    /// parsed response tree.
    ///
    /// # Errors
    ///
    /// Fails with [`AfipError::Transport`] on network, protocol, or
    /// envelope-level failure, including SOAP faults.
    async fn execute(&self, operation: &str, params: Value) -> Result<Value, AfipError>;
}
