//! Client-API helpers for sandbox integration flows.
//!
//! The gateway's client API is normally driven by a browser-side SDK that
//! tokenizes a payment method into a single-use nonce. For sandbox
//! integration work, [`ClientApi`] calls that endpoint directly so a server
//! can simulate the consent flow: send the consent code and desired token,
//! get back a nonce, and hand it to
//! [`PayPalAccountClient::create`](crate::paypal_account::PayPalAccountClient::create).

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::{GatewayError, Result},
    gateway::Gateway,
    transport::Transport,
};

/// Payload for simulating a PayPal consent grant.
#[derive(Debug, Clone, Serialize)]
pub struct PayPalAccountNonceParams {
    /// Consent code the simulated account holder granted.
    pub consent_code: String,
    /// Token the vaulted record should be created under.
    pub token: String,
}

/// Wire shape of a successful nonce response.
#[derive(Debug, Deserialize)]
struct NonceResponse {
    nonce: String,
}

/// Client for the gateway's nonce-generation endpoint.
///
/// Obtained from [`Gateway::client_api`]. Each nonce is single-use: the
/// gateway consumes it on the `create` call that exchanges it for a
/// durable record.
#[derive(Debug)]
pub struct ClientApi<'g, T: Transport> {
    gateway: &'g Gateway<T>,
}

impl<'g, T: Transport> ClientApi<'g, T> {
    pub(crate) fn new(gateway: &'g Gateway<T>) -> Self {
        Self { gateway }
    }

    /// Exchanges a simulated PayPal consent for a single-use nonce.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnexpectedResponse`] when the endpoint does
    /// not answer with a nonce, and transport errors as-is.
    #[instrument(skip(self, params), fields(token = %params.token))]
    pub async fn nonce_for_paypal_account(
        &self,
        params: PayPalAccountNonceParams,
    ) -> Result<String> {
        let response = self
            .gateway
            .post("/client_api/nonces", "paypal_account", &params)
            .await?;

        if !(200..300).contains(&response.status) {
            return Err(GatewayError::UnexpectedResponse(format!(
                "nonce endpoint returned status {}",
                response.status
            )));
        }

        let decoded: NonceResponse = serde_json::from_slice(&response.body)?;
        info!("paypal account nonce generated");
        Ok(decoded.nonce)
    }
}
