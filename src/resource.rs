//! Generic typed-resource layer shared by all resource clients.
//!
//! Every gateway resource (PayPal account, credit card, customer) follows
//! the same pattern: parameters are serialized under a kind-tagged envelope,
//! responses come back under the same tag, and validation failures arrive as
//! a structured error envelope. This module implements that pattern once so
//! resource clients stay thin.
//!
//! The kind tag is load-bearing: a lookup that finds a record of a
//! *different* kind under the requested identifier is decoded as a lookup
//! failure, never as a mistyped record.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    result::{ApiErrorResponse, GatewayResult},
    transport::TransportResponse,
};

/// A typed gateway resource.
///
/// Implementors bind a record type to its wire envelope key and the label
/// used in caller-facing messages.
pub trait Resource: DeserializeOwned + Send {
    /// Top-level key the gateway wraps this resource in
    /// (e.g. `"paypal_account"`).
    const WIRE_KEY: &'static str;

    /// Human-readable label used in error messages
    /// (e.g. `"paypal account"`).
    const LABEL: &'static str;

    /// The record's own identifier (payment-method token or customer id).
    fn identifier(&self) -> &str;
}

/// Validates a resource identifier before any network I/O.
///
/// Identifiers must be non-empty and restricted to letters, digits,
/// underscore, and dash. The error message echoes the offending value.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidArgument`] with a message of the form
/// `expected {label} id to be set` for empty input, or
/// `{value} is an invalid {label} token` for disallowed characters.
pub(crate) fn validate_identifier(value: &str, label: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GatewayError::InvalidArgument(format!("expected {label} id to be set")));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(GatewayError::InvalidArgument(format!(
            "{value} is an invalid {label} token"
        )));
    }
    Ok(())
}

/// Wraps request parameters in the resource's wire envelope.
///
/// `{"paypal_account": { ...params }}` for a PayPal account, and so on.
pub(crate) fn wire_envelope<P: Serialize>(wire_key: &str, params: &P) -> Result<Vec<u8>> {
    let mut envelope = serde_json::Map::with_capacity(1);
    envelope.insert(wire_key.to_owned(), serde_json::to_value(params)?);
    Ok(serde_json::to_vec(&Value::Object(envelope))?)
}

/// Decodes a kind-tagged resource body.
///
/// Returns `Ok(None)` when the body is valid JSON but its top-level envelope
/// key is not `R::WIRE_KEY`: the record exists but is of a different kind.
fn decode_envelope<R: Resource>(body: &[u8]) -> Result<Option<R>> {
    let value: Value = serde_json::from_slice(body)?;
    let Some(inner) = value.get(R::WIRE_KEY) else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_value(inner.clone())?))
}

/// Maps a raw lookup response into a typed record.
///
/// - 404 becomes [`GatewayError::NotFound`].
/// - A success body under a different kind tag also becomes `NotFound`:
///   lookups never return cross-kind records.
/// - A success record whose identifier differs from the query is
///   [`GatewayError::UnexpectedResponse`]: a lookup never hands back
///   somebody else's record.
/// - Any other non-success status is [`GatewayError::UnexpectedResponse`].
pub(crate) fn decode_find<R: Resource>(
    identifier: &str,
    response: &TransportResponse,
) -> Result<R> {
    match response.status {
        status if is_success(status) => match decode_envelope::<R>(&response.body)? {
            Some(record) => {
                if record.identifier() != identifier {
                    return Err(GatewayError::UnexpectedResponse(format!(
                        "lookup of {} {identifier} returned record {}",
                        R::LABEL,
                        record.identifier()
                    )));
                }
                Ok(record)
            }
            None => Err(GatewayError::NotFound(format!(
                "{identifier} does not identify a {}",
                R::LABEL
            ))),
        },
        404 => Err(GatewayError::NotFound(format!("no {} with id {identifier} found", R::LABEL))),
        status => Err(unexpected_status(status, &response.body)),
    }
}

/// Maps a raw mutation response into a [`GatewayResult`].
///
/// - 2xx with the expected envelope is a success.
/// - 422 with an `api_error_response` envelope is a business-rule failure
///   and becomes [`GatewayResult::Failure`]; it is not an error.
/// - 404 becomes [`GatewayError::NotFound`] (the mutation target is gone).
pub(crate) fn decode_mutation<R: Resource>(
    response: &TransportResponse,
) -> Result<GatewayResult<R>> {
    match response.status {
        status if is_success(status) => match decode_envelope::<R>(&response.body)? {
            Some(record) => Ok(GatewayResult::Success(record)),
            None => Err(GatewayError::UnexpectedResponse(format!(
                "success body is missing the {} envelope",
                R::WIRE_KEY
            ))),
        },
        422 => {
            let value: Value = serde_json::from_slice(&response.body)?;
            let Some(inner) = value.get("api_error_response") else {
                return Err(GatewayError::UnexpectedResponse(
                    "422 body is missing the api_error_response envelope".to_owned(),
                ));
            };
            let error_response: ApiErrorResponse = serde_json::from_value(inner.clone())?;
            Ok(GatewayResult::Failure(error_response.errors))
        }
        404 => Err(GatewayError::NotFound(format!("no {} found to mutate", R::LABEL))),
        status => Err(unexpected_status(status, &response.body)),
    }
}

/// Maps a raw delete response.
pub(crate) fn decode_delete(
    identifier: &str,
    label: &str,
    response: &TransportResponse,
) -> Result<()> {
    match response.status {
        status if is_success(status) => Ok(()),
        404 => Err(GatewayError::NotFound(format!("no {label} with id {identifier} found"))),
        status => Err(unexpected_status(status, &response.body)),
    }
}

/// Returns true for 2xx statuses.
fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Builds the error for a status outside the protocol contract.
fn unexpected_status(status: u16, body: &[u8]) -> GatewayError {
    let snippet: String = String::from_utf8_lossy(body).chars().take(120).collect();
    GatewayError::UnexpectedResponse(format!("gateway returned status {status}: {snippet}"))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        id: String,
    }

    impl Resource for Widget {
        const WIRE_KEY: &'static str = "widget";
        const LABEL: &'static str = "widget";

        fn identifier(&self) -> &str {
            &self.id
        }
    }

    fn ok_response(body: &str) -> TransportResponse {
        TransportResponse { status: 200, body: body.as_bytes().to_vec() }
    }

    #[test]
    fn test_validate_identifier_accepts_allowed_charset() {
        assert!(validate_identifier("PAYPALToken-123_a", "paypal account").is_ok());
    }

    #[test]
    fn test_validate_identifier_empty() {
        let err = validate_identifier("", "paypal account").unwrap_err();
        assert!(err.to_string().contains("expected paypal account id to be set"));
    }

    #[test]
    fn test_validate_identifier_invalid_char() {
        let err = validate_identifier("@", "paypal account").unwrap_err();
        assert!(err.to_string().contains("@ is an invalid paypal account token"));
    }

    #[test]
    fn test_validate_identifier_label_varies_per_resource() {
        let err = validate_identifier("", "credit card").unwrap_err();
        assert!(err.to_string().contains("expected credit card id to be set"));
    }

    #[test]
    fn test_wire_envelope_wraps_params() {
        #[derive(Serialize)]
        struct Params {
            token: String,
        }

        let body = wire_envelope("widget", &Params { token: "t1".to_owned() }).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["widget"]["token"], "t1");
    }

    #[test]
    fn test_decode_find_success() {
        let widget: Widget =
            decode_find("w1", &ok_response(r#"{"widget": {"id": "w1"}}"#)).unwrap();
        assert_eq!(widget.id, "w1");
    }

    #[test]
    fn test_decode_find_404_is_not_found() {
        let response = TransportResponse { status: 404, body: vec![] };
        let err = decode_find::<Widget>("w1", &response).unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[test]
    fn test_decode_find_kind_mismatch_is_not_found() {
        // A gadget came back where a widget was requested.
        let err =
            decode_find::<Widget>("w1", &ok_response(r#"{"gadget": {"id": "w1"}}"#)).unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
        assert!(err.to_string().contains("does not identify a widget"));
    }

    #[test]
    fn test_decode_find_rejects_mismatched_identifier() {
        // The right kind came back, but it is somebody else's record.
        let err =
            decode_find::<Widget>("w1", &ok_response(r#"{"widget": {"id": "w2"}}"#)).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
        assert!(err.to_string().contains("w2"));
    }

    #[test]
    fn test_decode_find_unexpected_status() {
        let response = TransportResponse { status: 500, body: b"boom".to_vec() };
        let err = decode_find::<Widget>("w1", &response).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_decode_mutation_success() {
        let result =
            decode_mutation::<Widget>(&ok_response(r#"{"widget": {"id": "w1"}}"#)).unwrap();
        assert!(result.is_success());
        assert_eq!(result.success().unwrap().id, "w1");
    }

    #[test]
    fn test_decode_mutation_422_is_failure_not_error() {
        let body = r#"
            {
                "api_error_response": {
                    "message": "Token is already in use",
                    "errors": [
                        {"attribute": "token", "code": "92906", "message": "Token is already in use"}
                    ]
                }
            }
        "#;
        let response = TransportResponse { status: 422, body: body.as_bytes().to_vec() };

        let result = decode_mutation::<Widget>(&response).unwrap();
        assert!(result.is_failure());
        let errors = result.errors().unwrap();
        assert!(!errors.is_empty());
        assert_eq!(errors.on_attribute("token").count(), 1);
    }

    #[test]
    fn test_decode_mutation_422_without_envelope_is_unexpected() {
        let response = TransportResponse { status: 422, body: b"{}".to_vec() };
        let err = decode_mutation::<Widget>(&response).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_decode_mutation_404_is_not_found() {
        let response = TransportResponse { status: 404, body: vec![] };
        let err = decode_mutation::<Widget>(&response).unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[test]
    fn test_decode_delete() {
        let response = TransportResponse { status: 200, body: b"{}".to_vec() };
        assert!(decode_delete("w1", "widget", &response).is_ok());

        let response = TransportResponse { status: 404, body: vec![] };
        let err = decode_delete("w1", "widget", &response).unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    proptest! {
        #[test]
        fn prop_valid_identifiers_pass(id in "[A-Za-z0-9_-]{1,64}") {
            prop_assert!(validate_identifier(&id, "paypal account").is_ok());
        }

        #[test]
        fn prop_identifiers_with_disallowed_chars_fail(
            prefix in "[A-Za-z0-9_-]{0,8}",
            bad in "[^A-Za-z0-9_-]",
            suffix in "[A-Za-z0-9_-]{0,8}",
        ) {
            let id = format!("{prefix}{bad}{suffix}");
            prop_assert!(validate_identifier(&id, "paypal account").is_err());
        }
    }
}
