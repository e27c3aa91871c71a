use std::sync::Arc;

use serde_json::{Value, json};

use crate::auth::{AuthDelegate, Credential};
use crate::error::AfipError;
use crate::response::{check_service_errors, parse_compact_date, unwrap_result};
use crate::transport::SoapTransport;

use super::types::{CreatedVoucher, NextVoucher, VoucherRequest};

/// WSAA service name of the electronic invoicing service.
pub const WSFE_SERVICE: &str = "wsfe";

/// Health-check operation; the only one that carries no auth block.
const DUMMY: &str = "FEDummy";

/// `FECompConsultar` code for a voucher that does not exist.
const VOUCHER_NOT_FOUND: i64 = 602;

/// Client for AFIP's electronic invoicing service (WSFEv1).
///
/// Stateless: every operation is an independent request/response exchange.
/// Each call obtains a fresh [`Credential`] from the delegate unless the
/// caller passes one in, which is how several calls share one WSAA ticket.
pub struct WsfeClient {
    cuit: u64,
    transport: Arc<dyn SoapTransport>,
    auth: Arc<dyn AuthDelegate>,
}

impl WsfeClient {
    /// Create a client issuing requests on behalf of `cuit`.
    pub fn new(cuit: u64, transport: Arc<dyn SoapTransport>, auth: Arc<dyn AuthDelegate>) -> Self {
        Self {
            cuit,
            transport,
            auth,
        }
    }

    /// Highest authorized voucher number for a (sales point, type) pair.
    pub async fn last_voucher(
        &self,
        sales_point: u32,
        voucher_type: u32,
        credential: Option<&Credential>,
    ) -> Result<u64, AfipError> {
        let params = json!({"PtoVta": sales_point, "CbteTipo": voucher_type});
        let result = self
            .execute("FECompUltimoAutorizado", params, credential)
            .await?;
        result
            .get("CbteNro")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                AfipError::Malformed("FECompUltimoAutorizadoResult missing CbteNro".into())
            })
    }

    /// Submit a voucher for authorization and return the issued CAE.
    pub async fn create_voucher(
        &self,
        data: &VoucherRequest,
        credential: Option<&Credential>,
    ) -> Result<CreatedVoucher, AfipError> {
        let result = self.create_voucher_full(data, credential).await?;
        created_voucher(&result)
    }

    /// Like [`create_voucher`](Self::create_voucher), but hands back the
    /// full normalized `FECAESolicitarResult` tree instead of the minimal
    /// CAE pair. The detail section is collapsed to a scalar if the service
    /// wrapped it in a one-element list.
    pub async fn create_voucher_full(
        &self,
        data: &VoucherRequest,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        if data.voucher_to < data.voucher_from {
            return Err(AfipError::InvalidRequest(format!(
                "CbteHasta {} precedes CbteDesde {}",
                data.voucher_to, data.voucher_from
            )));
        }
        let params = json!({
            "FeCAEReq": {
                "FeCabReq": {
                    "CantReg": data.voucher_to - data.voucher_from + 1,
                    "PtoVta": data.sales_point,
                    "CbteTipo": data.voucher_type,
                },
                "FeDetReq": {"FECAEDetRequest": data.detail()},
            }
        });
        self.execute("FECAESolicitar", params, credential).await
    }

    /// Authorize the next sequential voucher for `data`'s sales point and
    /// type: reads the last authorized number and submits last + 1 as both
    /// ends of the range. `data`'s own range fields are ignored.
    ///
    /// Not atomic: two callers running this concurrently for the same
    /// (sales point, type) pair can both read the same last number, and
    /// the second submission will be rejected as a duplicate. Callers
    /// needing exclusivity must serialize per pair themselves.
    pub async fn create_next_voucher(
        &self,
        data: &VoucherRequest,
        credential: Option<&Credential>,
    ) -> Result<NextVoucher, AfipError> {
        let last = self
            .last_voucher(data.sales_point, data.voucher_type, credential)
            .await?;
        let next = last + 1;
        let mut request = data.clone();
        request.voucher_from = next;
        request.voucher_to = next;
        let voucher = self.create_voucher(&request, credential).await?;
        Ok(NextVoucher {
            voucher_number: next,
            voucher,
        })
    }

    /// Full detail of an authorized voucher, or `None` if no voucher with
    /// that number exists (service code 602). Any other service error
    /// propagates.
    pub async fn voucher_info(
        &self,
        number: u64,
        sales_point: u32,
        voucher_type: u32,
        credential: Option<&Credential>,
    ) -> Result<Option<Value>, AfipError> {
        let params = json!({
            "FeCompConsReq": {
                "CbteNro": number,
                "PtoVta": sales_point,
                "CbteTipo": voucher_type,
            }
        });
        match self.execute("FECompConsultar", params, credential).await {
            Ok(result) => Ok(Some(result)),
            Err(err) if err.service_code() == Some(VOUCHER_NOT_FOUND) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Request a CAEA for a period (`yyyymm`) and fortnight (1 or 2).
    pub async fn create_caea(
        &self,
        period: u32,
        fortnight: u8,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        self.caea_request("FECAEASolicitar", period, fortnight, credential)
            .await
    }

    /// Query a previously issued CAEA by period and fortnight.
    pub async fn get_caea(
        &self,
        period: u32,
        fortnight: u8,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        self.caea_request("FECAEAConsultar", period, fortnight, credential)
            .await
    }

    /// Sales points registered for the taxpayer.
    pub async fn sales_points(&self, credential: Option<&Credential>) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetPtosVenta", "PtoVenta", credential)
            .await
    }

    /// Voucher types accepted by the service.
    pub async fn voucher_types(&self, credential: Option<&Credential>) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposCbte", "CbteTipo", credential)
            .await
    }

    /// Concept types (products, services, both).
    pub async fn concept_types(&self, credential: Option<&Credential>) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposConcepto", "ConceptoTipo", credential)
            .await
    }

    /// Receiver document types.
    pub async fn document_types(
        &self,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposDoc", "DocTipo", credential)
            .await
    }

    /// VAT aliquot types.
    pub async fn aliquot_types(&self, credential: Option<&Credential>) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposIva", "IvaTipo", credential)
            .await
    }

    /// Accepted currencies.
    pub async fn currency_types(
        &self,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposMonedas", "Moneda", credential)
            .await
    }

    /// Optional-field types.
    pub async fn option_types(&self, credential: Option<&Credential>) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposOpcional", "OpcionalTipo", credential)
            .await
    }

    /// Tax types usable in the `Tributos` block.
    pub async fn tax_types(&self, credential: Option<&Credential>) -> Result<Value, AfipError> {
        self.reference_data("FEParamGetTiposTributos", "TributoTipo", credential)
            .await
    }

    /// Service health check; returns the application/database/auth server
    /// states unchanged. Carries no auth block.
    pub async fn server_status(&self) -> Result<Value, AfipError> {
        self.execute(DUMMY, json!({}), None).await
    }

    async fn caea_request(
        &self,
        operation: &str,
        period: u32,
        fortnight: u8,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        let params = json!({"Periodo": period, "Orden": fortnight});
        let mut result = self.execute(operation, params, credential).await?;
        result
            .get_mut("ResultGet")
            .map(Value::take)
            .ok_or_else(|| AfipError::Malformed(format!("{operation}Result missing ResultGet")))
    }

    async fn reference_data(
        &self,
        operation: &str,
        field: &str,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        let mut result = self.execute(operation, json!({}), credential).await?;
        result
            .pointer_mut(&format!("/ResultGet/{field}"))
            .map(Value::take)
            .ok_or_else(|| {
                AfipError::Malformed(format!("{operation}Result missing ResultGet.{field}"))
            })
    }

    /// Shared dispatch: merge the auth block (except for the health check),
    /// invoke the transport, classify embedded errors, and unwrap the
    /// `<operation>Result` layer.
    async fn execute(
        &self,
        operation: &str,
        mut params: Value,
        credential: Option<&Credential>,
    ) -> Result<Value, AfipError> {
        if operation != DUMMY {
            let credential = match credential {
                Some(c) => c.clone(),
                None => self.auth.credential(WSFE_SERVICE).await?,
            };
            let auth = json!({
                "Token": credential.token,
                "Sign": credential.sign,
                "Cuit": self.cuit,
            });
            if let Some(map) = params.as_object_mut() {
                map.insert("Auth".into(), auth);
            }
        }
        let response = self.transport.execute(operation, params).await?;
        let mut result = unwrap_result(response, &format!("{operation}Result"))?;
        check_service_errors(operation, &mut result)?;
        Ok(result)
    }
}

fn created_voucher(result: &Value) -> Result<CreatedVoucher, AfipError> {
    let detail = result
        .pointer("/FeDetResp/FECAEDetResponse")
        .ok_or_else(|| AfipError::Malformed("FECAESolicitarResult missing FECAEDetResponse".into()))?;
    let cae = match detail.get("CAE") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(AfipError::Malformed("FECAEDetResponse missing CAE".into())),
    };
    let cae_due_date = detail
        .get("CAEFchVto")
        .ok_or_else(|| AfipError::Malformed("FECAEDetResponse missing CAEFchVto".into()))
        .and_then(parse_compact_date)?;
    Ok(CreatedVoucher { cae, cae_due_date })
}
