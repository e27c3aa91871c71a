use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Caller-supplied voucher data for `FECAESolicitar`.
///
/// Field names follow the WSFE wire vocabulary (`CbteDesde`, `ImpTotal`,
/// ...) through the serde renames on the nested blocks and the submission
/// mapping. Monetary amounts are [`Decimal`]; dates are [`NaiveDate`] and
/// are formatted to the compact `yyyymmdd` form on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherRequest {
    /// Sales point (`PtoVta`) under which the voucher is numbered.
    pub sales_point: u32,
    /// Voucher type code (`CbteTipo`), e.g. 6 for factura B.
    pub voucher_type: u32,
    /// Concept (`Concepto`): 1 products, 2 services, 3 both.
    pub concept: u32,
    /// Receiver document type (`DocTipo`), e.g. 80 CUIT, 99 final consumer.
    pub document_type: u32,
    /// Receiver document number (`DocNro`).
    pub document_number: u64,
    /// First voucher number of the range (`CbteDesde`).
    pub voucher_from: u64,
    /// Last voucher number of the range (`CbteHasta`).
    pub voucher_to: u64,
    /// Voucher date (`CbteFch`); the service defaults it when absent.
    pub voucher_date: Option<NaiveDate>,
    /// Total amount (`ImpTotal`).
    pub total_amount: Decimal,
    /// Untaxed net amount (`ImpTotConc`).
    pub untaxed_amount: Decimal,
    /// Taxed net amount (`ImpNeto`).
    pub net_amount: Decimal,
    /// VAT-exempt amount (`ImpOpEx`).
    pub exempt_amount: Decimal,
    /// Total of other taxes (`ImpTrib`).
    pub tax_amount: Decimal,
    /// Total VAT amount (`ImpIVA`).
    pub vat_amount: Decimal,
    /// Service period start (`FchServDesde`); required for service concepts.
    pub service_from: Option<NaiveDate>,
    /// Service period end (`FchServHasta`).
    pub service_until: Option<NaiveDate>,
    /// Payment due date (`FchVtoPago`).
    pub payment_due_date: Option<NaiveDate>,
    /// Currency code (`MonId`), e.g. "PES", "DOL".
    pub currency: String,
    /// Exchange rate against the peso (`MonCotiz`); 1 for "PES".
    pub currency_rate: Decimal,
    /// Receiver VAT condition (`CondicionIVAReceptorId`).
    pub receiver_vat_condition: Option<u32>,
    /// Other national/provincial taxes (`Tributos`).
    pub taxes: Option<Vec<Tax>>,
    /// VAT breakdown lines (`Iva`).
    pub vat_rates: Option<Vec<VatRate>>,
    /// References to associated vouchers (`CbtesAsoc`), e.g. for credit notes.
    pub associated_vouchers: Option<Vec<AssociatedVoucher>>,
    /// Buyer shares (`Compradores`) for multi-buyer vouchers.
    pub buyers: Option<Vec<Buyer>>,
    /// Regime-specific optional fields (`Opcionales`).
    pub optionals: Option<Vec<OptionalField>>,
}

impl Default for VoucherRequest {
    fn default() -> Self {
        Self {
            sales_point: 1,
            voucher_type: 6,
            concept: 1,
            document_type: 99,
            document_number: 0,
            voucher_from: 1,
            voucher_to: 1,
            voucher_date: None,
            total_amount: Decimal::ZERO,
            untaxed_amount: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            exempt_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            service_from: None,
            service_until: None,
            payment_due_date: None,
            currency: "PES".into(),
            currency_rate: Decimal::ONE,
            receiver_vat_condition: None,
            taxes: None,
            vat_rates: None,
            associated_vouchers: None,
            buyers: None,
            optionals: None,
        }
    }
}

impl VoucherRequest {
    /// Build the `FECAEDetRequest` subtree for submission.
    ///
    /// Sales point and voucher type travel in the submission header, not
    /// the detail, so they are left out here. Each supplied plural block is
    /// wrapped one level deeper under its singular element name
    /// (`Tributos.Tributo`, `Iva.AlicIva`, ...) because the WSFE schema
    /// expects a wrapper object around the repeated child, not a bare
    /// sequence. Borrows `self`; the caller's struct is never mutated.
    pub(crate) fn detail(&self) -> Value {
        let mut det = Map::new();
        det.insert("Concepto".into(), json!(self.concept));
        det.insert("DocTipo".into(), json!(self.document_type));
        det.insert("DocNro".into(), json!(self.document_number));
        det.insert("CbteDesde".into(), json!(self.voucher_from));
        det.insert("CbteHasta".into(), json!(self.voucher_to));
        if let Some(date) = self.voucher_date {
            det.insert("CbteFch".into(), json!(compact(date)));
        }
        det.insert("ImpTotal".into(), json!(self.total_amount));
        det.insert("ImpTotConc".into(), json!(self.untaxed_amount));
        det.insert("ImpNeto".into(), json!(self.net_amount));
        det.insert("ImpOpEx".into(), json!(self.exempt_amount));
        det.insert("ImpTrib".into(), json!(self.tax_amount));
        det.insert("ImpIVA".into(), json!(self.vat_amount));
        if let Some(date) = self.service_from {
            det.insert("FchServDesde".into(), json!(compact(date)));
        }
        if let Some(date) = self.service_until {
            det.insert("FchServHasta".into(), json!(compact(date)));
        }
        if let Some(date) = self.payment_due_date {
            det.insert("FchVtoPago".into(), json!(compact(date)));
        }
        det.insert("MonId".into(), json!(self.currency));
        det.insert("MonCotiz".into(), json!(self.currency_rate));
        if let Some(condition) = self.receiver_vat_condition {
            det.insert("CondicionIVAReceptorId".into(), json!(condition));
        }
        if let Some(taxes) = &self.taxes {
            det.insert("Tributos".into(), json!({"Tributo": taxes}));
        }
        if let Some(rates) = &self.vat_rates {
            det.insert("Iva".into(), json!({"AlicIva": rates}));
        }
        if let Some(associated) = &self.associated_vouchers {
            det.insert("CbtesAsoc".into(), json!({"CbteAsoc": associated}));
        }
        if let Some(buyers) = &self.buyers {
            det.insert("Compradores".into(), json!({"Comprador": buyers}));
        }
        if let Some(optionals) = &self.optionals {
            det.insert("Opcionales".into(), json!({"Opcional": optionals}));
        }
        Value::Object(det)
    }
}

fn compact(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// A national/provincial tax line (`Tributo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    /// Tax type id per `FEParamGetTiposTributos`.
    #[serde(rename = "Id")]
    pub id: u32,
    /// Free-text description.
    #[serde(rename = "Desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Taxable base amount.
    #[serde(rename = "BaseImp")]
    pub base_amount: Decimal,
    /// Rate applied, in percent.
    #[serde(rename = "Alic")]
    pub rate: Decimal,
    /// Resulting tax amount.
    #[serde(rename = "Importe")]
    pub amount: Decimal,
}

/// A VAT breakdown line (`AlicIva`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatRate {
    /// Aliquot id per `FEParamGetTiposIva`, e.g. 5 for 21%.
    #[serde(rename = "Id")]
    pub id: u32,
    /// Taxable base amount.
    #[serde(rename = "BaseImp")]
    pub base_amount: Decimal,
    /// Resulting VAT amount.
    #[serde(rename = "Importe")]
    pub amount: Decimal,
}

/// A reference to a previously authorized voucher (`CbteAsoc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociatedVoucher {
    /// Voucher type code of the referenced voucher.
    #[serde(rename = "Tipo")]
    pub voucher_type: u32,
    /// Sales point of the referenced voucher.
    #[serde(rename = "PtoVta")]
    pub sales_point: u32,
    /// Number of the referenced voucher.
    #[serde(rename = "Nro")]
    pub number: u64,
    /// Issuer CUIT, when the reference crosses taxpayers.
    #[serde(rename = "Cuit", skip_serializing_if = "Option::is_none")]
    pub cuit: Option<u64>,
    /// Issue date of the referenced voucher, compact `yyyymmdd`.
    #[serde(rename = "CbteFch", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A buyer share for multi-buyer vouchers (`Comprador`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    /// Buyer document type.
    #[serde(rename = "DocTipo")]
    pub document_type: u32,
    /// Buyer document number.
    #[serde(rename = "DocNro")]
    pub document_number: u64,
    /// Ownership percentage attributed to this buyer.
    #[serde(rename = "Porcentaje")]
    pub share: Decimal,
}

/// A regime-specific optional field (`Opcional`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionalField {
    /// Optional-field id per `FEParamGetTiposOpcional`.
    #[serde(rename = "Id")]
    pub id: String,
    /// Field value.
    #[serde(rename = "Valor")]
    pub value: String,
}

/// Minimal result of a successful voucher creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedVoucher {
    /// Electronic authorization code issued for the voucher.
    pub cae: String,
    /// CAE expiration date.
    pub cae_due_date: NaiveDate,
}

/// Result of [`WsfeClient::create_next_voucher`].
///
/// [`WsfeClient::create_next_voucher`]: super::WsfeClient::create_next_voucher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextVoucher {
    /// Sequential number assigned to the submitted voucher.
    pub voucher_number: u64,
    /// Authorization result.
    pub voucher: CreatedVoucher,
}
