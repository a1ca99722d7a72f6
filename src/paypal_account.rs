//! PayPal account resource client.
//!
//! PayPal accounts are vaulted payment methods owned by a customer. They
//! are created from a single-use payment-method nonce (see
//! [`ClientApi`](crate::testing::ClientApi) for the nonce flow), looked up
//! and deleted by token, and updated in place; an update may reassign the
//! token itself.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::{GatewayError, Result},
    gateway::Gateway,
    resource::{Resource, decode_delete, decode_find, decode_mutation, validate_identifier},
    result::GatewayResult,
    transport::Transport,
};

/// A vaulted PayPal account record.
///
/// This is a transient read/write projection of the record the gateway
/// owns; it carries no client-side lifecycle of its own.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PayPalAccount {
    /// Payment-method token identifying this record.
    pub token: String,
    /// Email address of the PayPal account holder.
    pub email: String,
    /// Owning customer.
    pub customer_id: String,
    /// URL of the PayPal account image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// PayPal payer identifier.
    #[serde(default)]
    pub payer_id: Option<String>,
    /// Billing agreement backing this account, if one exists.
    #[serde(default)]
    pub billing_agreement_id: Option<String>,
}

impl Resource for PayPalAccount {
    const WIRE_KEY: &'static str = "paypal_account";
    const LABEL: &'static str = "paypal account";

    fn identifier(&self) -> &str {
        &self.token
    }
}

/// Parameters for creating a PayPal account.
///
/// `customer_id` is required, along with either a payment-method nonce or
/// raw account details (`email`). A `token` may be supplied to choose the
/// identifier; otherwise the gateway assigns one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PayPalAccountCreateParams {
    /// Owning customer; required.
    pub customer_id: String,
    /// Single-use nonce obtained from the client API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_nonce: Option<String>,
    /// Requested payment-method token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Raw account email, when creating without a nonce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Parameters for updating a PayPal account.
///
/// All fields are optional; a `token` reassigns the record's identifier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PayPalAccountUpdateParams {
    /// New payment-method token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// New account email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Client for the PayPal account resource family.
///
/// Obtained from [`Gateway::paypal_account`]. Operations that can fail for
/// business reasons (`create`, `update`) return a
/// [`GatewayResult`]; `find` and `delete` raise
/// [`GatewayError::NotFound`] when no PayPal account exists for the token.
#[derive(Debug)]
pub struct PayPalAccountClient<'g, T: Transport> {
    gateway: &'g Gateway<T>,
}

impl<'g, T: Transport> PayPalAccountClient<'g, T> {
    pub(crate) fn new(gateway: &'g Gateway<T>) -> Self {
        Self { gateway }
    }

    /// Creates a PayPal account from a nonce or raw details.
    ///
    /// Duplicate calls create duplicate records unless the gateway enforces
    /// token uniqueness; there is no client-side idempotency.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] before any I/O if
    /// `customer_id` is empty or neither a nonce nor account details are
    /// supplied. Gateway-side validation failures come back as
    /// [`GatewayResult::Failure`], not as errors.
    #[instrument(skip(self, params), fields(customer_id = %params.customer_id))]
    pub async fn create(
        &self,
        params: PayPalAccountCreateParams,
    ) -> Result<GatewayResult<PayPalAccount>> {
        if params.customer_id.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "expected customer id to be set".to_owned(),
            ));
        }
        if params.payment_method_nonce.is_none() && params.email.is_none() {
            return Err(GatewayError::InvalidArgument(
                "expected a payment method nonce or paypal account details".to_owned(),
            ));
        }
        if let Some(ref token) = params.token {
            validate_identifier(token, PayPalAccount::LABEL)?;
        }

        let response = self
            .gateway
            .post("/payment_methods", PayPalAccount::WIRE_KEY, &params)
            .await?;
        let result = decode_mutation::<PayPalAccount>(&response)?;

        if let Some(account) = result.success() {
            info!(token = %account.token, "paypal account created");
        }
        Ok(result)
    }

    /// Finds the PayPal account vaulted under `token`.
    ///
    /// The returned record's token always equals the query token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] before any I/O when the
    /// token is empty or malformed, and [`GatewayError::NotFound`] when no
    /// record exists or the token identifies a payment method of a
    /// different kind.
    #[instrument(skip(self))]
    pub async fn find(&self, token: &str) -> Result<PayPalAccount> {
        validate_identifier(token, PayPalAccount::LABEL)?;

        let response = self
            .gateway
            .get(&format!("/payment_methods/paypal_account/{token}"))
            .await?;
        decode_find(token, &response)
    }

    /// Updates the PayPal account vaulted under `token`.
    ///
    /// May reassign the token itself; on success the record is no longer
    /// retrievable under the old token. A token collision is a business
    /// failure and comes back as [`GatewayResult::Failure`] with the
    /// colliding record left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] for a malformed current or
    /// replacement token, and [`GatewayError::NotFound`] when no PayPal
    /// account exists under `token`.
    #[instrument(skip(self, params))]
    pub async fn update(
        &self,
        token: &str,
        params: PayPalAccountUpdateParams,
    ) -> Result<GatewayResult<PayPalAccount>> {
        validate_identifier(token, PayPalAccount::LABEL)?;
        if let Some(ref new_token) = params.token {
            validate_identifier(new_token, PayPalAccount::LABEL)?;
        }

        let response = self
            .gateway
            .put(
                &format!("/payment_methods/paypal_account/{token}"),
                PayPalAccount::WIRE_KEY,
                &params,
            )
            .await?;
        decode_mutation::<PayPalAccount>(&response)
    }

    /// Deletes the PayPal account vaulted under `token`.
    ///
    /// After a successful delete, `find` on the same token fails with
    /// [`GatewayError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`] for a malformed token and
    /// [`GatewayError::NotFound`] when no PayPal account exists under it.
    #[instrument(skip(self))]
    pub async fn delete(&self, token: &str) -> Result<()> {
        validate_identifier(token, PayPalAccount::LABEL)?;

        let response = self
            .gateway
            .delete(&format!("/payment_methods/paypal_account/{token}"))
            .await?;
        decode_delete(token, PayPalAccount::LABEL, &response)?;
        info!("paypal account deleted");
        Ok(())
    }
}
