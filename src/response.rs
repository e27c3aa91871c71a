//! Shared response normalization and error classification.
//!
//! AFIP's services are inconsistent about shape: a single record may come
//! back as a scalar or as a one-element list, dates arrive as compact
//! `yyyymmdd` strings or numbers, and business rejections may surface as a
//! top-level error list or as per-voucher "observations". Every rule for
//! flattening that into predictable results lives here, so each call site
//! applies the same treatment.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::AfipError;

/// Collapse a one-element array to its sole element.
///
/// AFIP returns single records sometimes bare and sometimes wrapped in a
/// list; applying this at every affected extraction point makes the two
/// shapes indistinguishable to callers. Idempotent: anything that is not a
/// one-element array passes through unchanged.
pub fn singularize(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    }
}

/// In-place variant of [`singularize`] for a slot inside a response tree.
pub(crate) fn singularize_in_place(slot: &mut Value) {
    if slot.as_array().is_some_and(|items| items.len() == 1) {
        let taken = std::mem::take(slot);
        *slot = singularize(taken);
    }
}

/// Parse a compact `yyyymmdd` date as AFIP reports it (string or number).
///
/// # Errors
///
/// Fails with [`AfipError::Malformed`] on non-8-digit or non-calendar input.
pub fn parse_compact_date(raw: &Value) -> Result<NaiveDate, AfipError> {
    let text = match raw {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(AfipError::Malformed(format!(
                "expected yyyymmdd date, got {other}"
            )));
        }
    };
    NaiveDate::parse_from_str(&text, "%Y%m%d")
        .map_err(|_| AfipError::Malformed(format!("invalid yyyymmdd date '{text}'")))
}

/// Extract the operation's result field from a response tree.
///
/// WSFE wraps every response in `<operation>Result`, the padrón in
/// `<operation>Return`; callers pass the full field name.
pub(crate) fn unwrap_result(response: Value, field: &str) -> Result<Value, AfipError> {
    match response {
        Value::Object(mut map) => map
            .remove(field)
            .ok_or_else(|| AfipError::Malformed(format!("response missing {field}"))),
        other => Err(AfipError::Malformed(format!(
            "expected response object, got {other}"
        ))),
    }
}

/// Marker WSFE uses for an approved voucher outcome.
const APPROVED: &str = "A";

/// Detect business rejections embedded in an otherwise successful WSFE
/// result. Runs after every invoicing call, before the caller sees it.
///
/// Two rules:
/// - `FECAESolicitar` only: a detail outcome other than approved that
///   carries observation entries is a rejection, reported from the first
///   observation. The detail slot is also collapsed here if the service
///   wrapped it in a one-element list.
/// - any operation: a top-level `Errors` list (single entry or many; many
///   are reduced to the first) is a rejection.
pub(crate) fn check_service_errors(operation: &str, result: &mut Value) -> Result<(), AfipError> {
    if operation == "FECAESolicitar" {
        if let Some(detail) = result.pointer_mut("/FeDetResp/FECAEDetResponse") {
            singularize_in_place(detail);
            let approved = detail.get("Resultado").and_then(Value::as_str) == Some(APPROVED);
            if !approved {
                if let Some(entry) = detail.pointer("/Observaciones/Obs").and_then(first_entry) {
                    return Err(service_error(entry));
                }
            }
        }
    }
    if let Some(entry) = result.pointer("/Errors/Err").and_then(first_entry) {
        return Err(service_error(entry));
    }
    Ok(())
}

/// Whether an error is the padrón's "no such taxpayer" report.
///
/// AFIP signals a missing record only through the wording of the fault
/// message ("No existe persona con ese Id..."), not a distinct code. This
/// is a fragile contract with the upstream service: if the message text
/// changes, the detection breaks with it, which is why the check lives
/// behind this single predicate.
pub(crate) fn is_not_found_message(err: &AfipError) -> bool {
    err.to_string().contains("No existe")
}

fn first_entry(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

fn service_error(entry: &Value) -> AfipError {
    let code = entry.get("Code").map_or(0, error_code);
    let message = entry
        .get("Msg")
        .and_then(Value::as_str)
        .unwrap_or("unknown service error")
        .to_owned();
    AfipError::Service { code, message }
}

fn error_code(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0)
}
