//! Taxpayer registry client (padrón, scope A5).
//!
//! One read operation — taxpayer lookup by CUIT/CUIL — plus the service
//! health check. The registry reports a missing record through the wording
//! of its error message, not a code; this client turns that case into
//! `Ok(None)` so callers can tell "no such taxpayer" from a failed lookup.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::auth::{AuthDelegate, Credential};
use crate::error::AfipError;
use crate::response::{is_not_found_message, singularize, unwrap_result};
use crate::transport::SoapTransport;

/// WSAA service name of the registry service.
pub const PADRON_SERVICE: &str = "ws_sr_padron_a5";

/// Client for AFIP's taxpayer registry service (`ws_sr_padron_a5`).
pub struct PadronClient {
    cuit: u64,
    transport: Arc<dyn SoapTransport>,
    auth: Arc<dyn AuthDelegate>,
}

impl PadronClient {
    /// Create a client querying on behalf of the represented `cuit`.
    pub fn new(cuit: u64, transport: Arc<dyn SoapTransport>, auth: Arc<dyn AuthDelegate>) -> Self {
        Self {
            cuit,
            transport,
            auth,
        }
    }

    /// Service health check; returns the application/database/auth server
    /// states unchanged. Carries no auth block.
    pub async fn server_status(&self) -> Result<Value, AfipError> {
        let response = self.transport.execute("dummy", json!({})).await?;
        unwrap_result(response, "dummyReturn")
    }

    /// Identity record for the taxpayer identified by `id` (CUIT/CUIL), or
    /// `None` if the registry has no record for it. Any failure other than
    /// the registry's "does not exist" report propagates unchanged.
    pub async fn taxpayer_details(
        &self,
        id: u64,
        credential: Option<&Credential>,
    ) -> Result<Option<Value>, AfipError> {
        let credential = match credential {
            Some(c) => c.clone(),
            None => self.auth.credential(PADRON_SERVICE).await?,
        };
        let params = json!({
            "token": credential.token,
            "sign": credential.sign,
            "cuitRepresentada": self.cuit,
            "idPersona": id,
        });
        let response = match self.transport.execute("getPersona", params).await {
            Ok(response) => response,
            Err(err) if is_not_found_message(&err) => return Ok(None),
            Err(err) => return Err(err),
        };
        let mut result = unwrap_result(response, "getPersonaReturn")?;
        let persona = result
            .get_mut("persona")
            .map(Value::take)
            .ok_or_else(|| AfipError::Malformed("getPersonaReturn missing persona".into()))?;
        Ok(Some(singularize(persona)))
    }
}
