//! Delegated authentication boundary.
//!
//! AFIP services authenticate every call with a token/signature pair issued
//! by the WSAA ticket service. Ticket acquisition and caching live outside
//! this crate, behind [`AuthDelegate`]; the clients only merge the pair into
//! each outbound request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AfipError;

/// A delegated, time-limited token/signature pair for one AFIP service.
///
/// Obtained from an [`AuthDelegate`] per call, or supplied by the caller
/// to batch several calls under one ticket. Not persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// WSAA access token.
    pub token: String,
    /// WSAA signature over the token.
    pub sign: String,
}

/// Supplies a [`Credential`] for a named AFIP service.
///
/// Implementations own WSAA ticket acquisition, expiry tracking, and any
/// caching. `service` is the WSAA service name, e.g. `"wsfe"` or
/// `"ws_sr_padron_a5"`.
#[async_trait]
pub trait AuthDelegate: Send + Sync {
    /// Return a currently valid credential for `service`.
    ///
    /// # Errors
    ///
    /// Fails with [`AfipError::Auth`] when no valid delegation exists.
    async fn credential(&self, service: &str) -> Result<Credential, AfipError>;
}
