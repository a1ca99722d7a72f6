//! Credit card resource client.
//!
//! Follows the same resource-client pattern as
//! [`paypal_account`](crate::paypal_account): kind-tagged envelopes on the
//! wire, [`GatewayResult`] for mutations, `NotFound` for lookups of tokens
//! that belong to a different payment-method kind.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::{GatewayError, Result},
    gateway::Gateway,
    resource::{Resource, decode_delete, decode_find, decode_mutation, validate_identifier},
    result::GatewayResult,
    transport::Transport,
};

/// A vaulted credit card record.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreditCard {
    /// Payment-method token identifying this record.
    pub token: String,
    /// Owning customer.
    pub customer_id: String,
    /// Name on the card.
    #[serde(default)]
    pub cardholder_name: Option<String>,
    /// Bank identification number (first six digits).
    #[serde(default)]
    pub bin: String,
    /// Last four digits of the card number.
    #[serde(default)]
    pub last_4: String,
    /// Expiration month (`MM`).
    #[serde(default)]
    pub expiration_month: String,
    /// Expiration year (`YY` or `YYYY`).
    #[serde(default)]
    pub expiration_year: String,
}

impl Resource for CreditCard {
    const WIRE_KEY: &'static str = "credit_card";
    const LABEL: &'static str = "credit card";

    fn identifier(&self) -> &str {
        &self.token
    }
}

/// Parameters for creating a credit card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditCardCreateParams {
    /// Owning customer; required.
    pub customer_id: String,
    /// Name on the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
    /// Card number.
    pub number: String,
    /// Expiration date (`MM/YY`).
    pub expiration_date: String,
    /// Requested payment-method token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Parameters for updating a credit card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditCardUpdateParams {
    /// New payment-method token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// New cardholder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
    /// New expiration date (`MM/YY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// Client for the credit card resource family.
///
/// Obtained from [`Gateway::credit_card`].
#[derive(Debug)]
pub struct CreditCardClient<'g, T: Transport> {
    gateway: &'g Gateway<T>,
}

impl<'g, T: Transport> CreditCardClient<'g, T> {
    pub(crate) fn new(gateway: &'g Gateway<T>) -> Self {
        Self { gateway }
    }

    /// Creates a credit card from raw card details.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] before any I/O when
    /// `customer_id`, `number`, or `expiration_date` is empty.
    #[instrument(skip(self, params), fields(customer_id = %params.customer_id))]
    pub async fn create(&self, params: CreditCardCreateParams) -> Result<GatewayResult<CreditCard>> {
        if params.customer_id.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "expected customer id to be set".to_owned(),
            ));
        }
        if params.number.is_empty() || params.expiration_date.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "expected card number and expiration date to be set".to_owned(),
            ));
        }
        if let Some(ref token) = params.token {
            validate_identifier(token, CreditCard::LABEL)?;
        }

        let response = self
            .gateway
            .post("/payment_methods", CreditCard::WIRE_KEY, &params)
            .await?;
        let result = decode_mutation::<CreditCard>(&response)?;

        if let Some(card) = result.success() {
            info!(token = %card.token, "credit card created");
        }
        Ok(result)
    }

    /// Finds the credit card vaulted under `token`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] for a malformed token and
    /// [`GatewayError::NotFound`] when no credit card exists under it
    /// (including tokens vaulted under a different payment-method kind).
    #[instrument(skip(self))]
    pub async fn find(&self, token: &str) -> Result<CreditCard> {
        validate_identifier(token, CreditCard::LABEL)?;

        let response = self
            .gateway
            .get(&format!("/payment_methods/credit_card/{token}"))
            .await?;
        decode_find(token, &response)
    }

    /// Updates the credit card vaulted under `token`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] for a malformed current or
    /// replacement token, and [`GatewayError::NotFound`] when no credit
    /// card exists under `token`.
    #[instrument(skip(self, params))]
    pub async fn update(
        &self,
        token: &str,
        params: CreditCardUpdateParams,
    ) -> Result<GatewayResult<CreditCard>> {
        validate_identifier(token, CreditCard::LABEL)?;
        if let Some(ref new_token) = params.token {
            validate_identifier(new_token, CreditCard::LABEL)?;
        }

        let response = self
            .gateway
            .put(
                &format!("/payment_methods/credit_card/{token}"),
                CreditCard::WIRE_KEY,
                &params,
            )
            .await?;
        decode_mutation::<CreditCard>(&response)
    }

    /// Deletes the credit card vaulted under `token`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] for a malformed token and
    /// [`GatewayError::NotFound`] when no credit card exists under it.
    #[instrument(skip(self))]
    pub async fn delete(&self, token: &str) -> Result<()> {
        validate_identifier(token, CreditCard::LABEL)?;

        let response = self
            .gateway
            .delete(&format!("/payment_methods/credit_card/{token}"))
            .await?;
        decode_delete(token, CreditCard::LABEL, &response)
    }
}
