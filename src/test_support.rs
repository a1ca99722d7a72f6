//! In-memory gateway double for unit tests.
//!
//! `FakeVault` implements [`Transport`] over a mutex-guarded store so the
//! resource clients can be exercised end to end without a network: nonce
//! generation, customer and payment-method lifecycles, kind-tagged lookup
//! responses, and 422 validation envelopes for token collisions.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Map, Value, json};

use crate::{
    Gateway,
    config::{Credentials, Environment, GatewayConfig},
    error::Result,
    transport::{RequestContext, Transport, TransportResponse, sealed},
};

/// Sandbox merchant profile used across tests.
pub(crate) fn sandbox_config() -> GatewayConfig {
    GatewayConfig::new(
        Environment::Sandbox,
        "integration_merchant_id",
        "integration_public_key",
        "integration_private_key",
    )
}

/// Gateway wired to a fresh `FakeVault`.
pub(crate) fn sandbox_gateway() -> Gateway<FakeVault> {
    Gateway::with_transport(sandbox_config(), FakeVault::default())
        .expect("sandbox config is valid")
}

#[derive(Default)]
struct VaultState {
    customers: HashMap<String, Value>,
    /// token -> (kind, record)
    methods: HashMap<String, (String, Value)>,
    /// nonce -> consent params
    nonces: HashMap<String, Value>,
    next_id: u64,
}

/// In-memory transport double.
#[derive(Default)]
pub(crate) struct FakeVault {
    state: Mutex<VaultState>,
}

impl FakeVault {
    fn handle(&self, method: &str, path: &str, body: Option<&[u8]>) -> TransportResponse {
        let Some(rest) = path.strip_prefix("/merchants/") else {
            return not_found();
        };
        let Some((_merchant_id, suffix)) = rest.split_once('/') else {
            return not_found();
        };
        let segments: Vec<&str> = suffix.split('/').collect();

        let mut state = self.state.lock().expect("fake vault lock");
        match (method, segments.as_slice()) {
            ("POST", ["client_api", "nonces"]) => state.create_nonce(body),
            ("POST", ["customers"]) => state.create_customer(body),
            ("GET", ["customers", id]) => state.find_customer(id),
            ("DELETE", ["customers", id]) => state.delete_customer(id),
            ("POST", ["payment_methods"]) => state.create_payment_method(body),
            ("GET", ["payment_methods", _kind, token]) => state.find_payment_method(token),
            ("PUT", ["payment_methods", kind, token]) => {
                state.update_payment_method(kind, token, body)
            }
            ("DELETE", ["payment_methods", kind, token]) => {
                state.delete_payment_method(kind, token)
            }
            _ => not_found(),
        }
    }
}

impl VaultState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn create_nonce(&mut self, body: Option<&[u8]>) -> TransportResponse {
        let params = body_object(body, "paypal_account");
        let consent_code = params.get("consent_code").and_then(Value::as_str).unwrap_or("");
        if consent_code.is_empty() {
            return validation_failure("consent_code", "93101", "Consent code is required");
        }

        let nonce = format!("fake-valid-nonce-{}", self.next_id());
        self.nonces.insert(nonce.clone(), Value::Object(params));
        json_response(201, json!({ "nonce": nonce }))
    }

    fn create_customer(&mut self, body: Option<&[u8]>) -> TransportResponse {
        let mut record = body_object(body, "customer");
        let id = format!("cust-{}", self.next_id());
        record.insert("id".to_owned(), json!(id));
        self.customers.insert(id, Value::Object(record.clone()));
        json_response(201, envelope("customer", Value::Object(record)))
    }

    fn find_customer(&self, id: &str) -> TransportResponse {
        match self.customers.get(id) {
            Some(record) => json_response(200, envelope("customer", record.clone())),
            None => not_found(),
        }
    }

    fn delete_customer(&mut self, id: &str) -> TransportResponse {
        match self.customers.remove(id) {
            Some(_) => json_response(200, json!({})),
            None => not_found(),
        }
    }

    fn create_payment_method(&mut self, body: Option<&[u8]>) -> TransportResponse {
        let value: Value =
            body.and_then(|b| serde_json::from_slice(b).ok()).unwrap_or_else(|| json!({}));

        if value.get("paypal_account").is_some() {
            let params = value["paypal_account"].as_object().cloned().unwrap_or_default();
            self.create_paypal_account(&params)
        } else if value.get("credit_card").is_some() {
            let params = value["credit_card"].as_object().cloned().unwrap_or_default();
            self.create_credit_card(&params)
        } else {
            validation_failure("base", "93201", "Payment method kind is required")
        }
    }

    fn create_paypal_account(&mut self, params: &Map<String, Value>) -> TransportResponse {
        let Some(nonce) = params.get("payment_method_nonce").and_then(Value::as_str) else {
            return validation_failure(
                "payment_method_nonce",
                "93103",
                "Payment method nonce is required",
            );
        };
        let Some(consent) = self.nonces.remove(nonce) else {
            return validation_failure(
                "payment_method_nonce",
                "93107",
                "Unknown or expired payment method nonce",
            );
        };

        let token = consent
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("tok-{}", self.next_id()));
        if self.methods.contains_key(&token) {
            return validation_failure("token", "92906", "Token is already in use");
        }

        let customer_id = params.get("customer_id").and_then(Value::as_str).unwrap_or("");
        let record = json!({
            "token": token,
            "email": "jane.doe@example.com",
            "customer_id": customer_id,
            "image_url": "https://assets.vaultgate.com/paypal.png",
            "payer_id": "fake-payer-id",
        });
        self.methods.insert(token, ("paypal_account".to_owned(), record.clone()));
        json_response(201, envelope("paypal_account", record))
    }

    fn create_credit_card(&mut self, params: &Map<String, Value>) -> TransportResponse {
        let token = params
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("tok-{}", self.next_id()));
        if self.methods.contains_key(&token) {
            return validation_failure("token", "92906", "Token is already in use");
        }

        let number = params.get("number").and_then(Value::as_str).unwrap_or("");
        let expiration = params.get("expiration_date").and_then(Value::as_str).unwrap_or("");
        let (month, year) = expiration.split_once('/').unwrap_or(("", ""));
        let bin: String = number.chars().take(6).collect();
        let last_4: String =
            number.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();

        let record = json!({
            "token": token,
            "customer_id": params.get("customer_id").and_then(Value::as_str).unwrap_or(""),
            "cardholder_name": params.get("cardholder_name").cloned().unwrap_or(Value::Null),
            "bin": bin,
            "last_4": last_4,
            "expiration_month": month,
            "expiration_year": year,
        });
        self.methods.insert(token, ("credit_card".to_owned(), record.clone()));
        json_response(201, envelope("credit_card", record))
    }

    /// Lookups answer with the record's *actual* kind tag so the codec's
    /// cross-kind rejection path gets exercised.
    fn find_payment_method(&self, token: &str) -> TransportResponse {
        match self.methods.get(token) {
            Some((kind, record)) => json_response(200, envelope(kind, record.clone())),
            None => not_found(),
        }
    }

    fn update_payment_method(
        &mut self,
        kind: &str,
        token: &str,
        body: Option<&[u8]>,
    ) -> TransportResponse {
        match self.methods.get(token) {
            Some((stored_kind, _)) if stored_kind == kind => {}
            _ => return not_found(),
        }

        let params = body_object(body, kind);
        let new_token = params.get("token").and_then(Value::as_str).map(str::to_owned);
        if let Some(ref candidate) = new_token
            && candidate != token
            && self.methods.contains_key(candidate)
        {
            return validation_failure("token", "92906", "Token is already in use");
        }

        let (stored_kind, mut record) =
            self.methods.remove(token).expect("presence checked above");
        let final_token = new_token.unwrap_or_else(|| token.to_owned());
        if let Value::Object(ref mut fields) = record {
            for (key, value) in params {
                fields.insert(key, value);
            }
            fields.insert("token".to_owned(), json!(final_token));
        }
        self.methods.insert(final_token, (stored_kind.clone(), record.clone()));
        json_response(200, envelope(&stored_kind, record))
    }

    fn delete_payment_method(&mut self, kind: &str, token: &str) -> TransportResponse {
        match self.methods.get(token) {
            Some((stored_kind, _)) if stored_kind == kind => {
                self.methods.remove(token);
                json_response(200, json!({}))
            }
            _ => not_found(),
        }
    }
}

impl sealed::private::Sealed for FakeVault {}

impl Transport for FakeVault {
    async fn get<'a>(
        &'a self,
        _credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> Result<TransportResponse> {
        Ok(self.handle("GET", ctx.path, None))
    }

    async fn post<'a>(
        &'a self,
        _credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        Ok(self.handle("POST", ctx.path, Some(body)))
    }

    async fn put<'a>(
        &'a self,
        _credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        Ok(self.handle("PUT", ctx.path, Some(body)))
    }

    async fn delete<'a>(
        &'a self,
        _credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> Result<TransportResponse> {
        Ok(self.handle("DELETE", ctx.path, None))
    }
}

/// Parses the request body and extracts the object under `key`.
fn body_object(body: Option<&[u8]>, key: &str) -> Map<String, Value> {
    body.and_then(|b| serde_json::from_slice::<Value>(b).ok())
        .and_then(|v| v.get(key).and_then(Value::as_object).cloned())
        .unwrap_or_default()
}

/// Wraps a record under a kind tag.
fn envelope(key: &str, record: Value) -> Value {
    let mut wrapper = Map::with_capacity(1);
    wrapper.insert(key.to_owned(), record);
    Value::Object(wrapper)
}

fn json_response(status: u16, value: Value) -> TransportResponse {
    TransportResponse {
        status,
        body: serde_json::to_vec(&value).expect("fake vault bodies serialize"),
    }
}

fn not_found() -> TransportResponse {
    json_response(404, json!({}))
}

fn validation_failure(attribute: &str, code: &str, message: &str) -> TransportResponse {
    json_response(
        422,
        json!({
            "api_error_response": {
                "message": message,
                "errors": [
                    {"attribute": attribute, "code": code, "message": message}
                ]
            }
        }),
    )
}
