//! Customer resource client.
//!
//! Customers own vaulted payment methods; `create` here is the first step
//! of the nonce-driven PayPal account flow. Same resource-client pattern as
//! the payment-method clients, with the gateway assigning the identifier.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::Result,
    gateway::Gateway,
    resource::{Resource, decode_delete, decode_find, decode_mutation, validate_identifier},
    result::GatewayResult,
    transport::Transport,
};

/// A customer record.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Gateway-assigned customer identifier.
    pub id: String,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

impl Resource for Customer {
    const WIRE_KEY: &'static str = "customer";
    const LABEL: &'static str = "customer";

    fn identifier(&self) -> &str {
        &self.id
    }
}

/// Parameters for creating a customer.
///
/// Every field is optional; an empty parameter set creates an anonymous
/// customer, which is all the nonce flow needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerCreateParams {
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Client for the customer resource family.
///
/// Obtained from [`Gateway::customer`].
#[derive(Debug)]
pub struct CustomerClient<'g, T: Transport> {
    gateway: &'g Gateway<T>,
}

impl<'g, T: Transport> CustomerClient<'g, T> {
    pub(crate) fn new(gateway: &'g Gateway<T>) -> Self {
        Self { gateway }
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns a transport or decode error; gateway-side validation
    /// failures come back as [`GatewayResult::Failure`].
    #[instrument(skip(self, params))]
    pub async fn create(&self, params: CustomerCreateParams) -> Result<GatewayResult<Customer>> {
        let response = self.gateway.post("/customers", Customer::WIRE_KEY, &params).await?;
        let result = decode_mutation::<Customer>(&response)?;

        if let Some(customer) = result.success() {
            info!(customer_id = %customer.id, "customer created");
        }
        Ok(result)
    }

    /// Finds the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`](crate::GatewayError::InvalidArgument)
    /// for an empty or malformed id, and
    /// [`GatewayError::NotFound`](crate::GatewayError::NotFound) when no
    /// customer exists.
    #[instrument(skip(self))]
    pub async fn find(&self, id: &str) -> Result<Customer> {
        validate_identifier(id, Customer::LABEL)?;

        let response = self.gateway.get(&format!("/customers/{id}")).await?;
        decode_find(id, &response)
    }

    /// Deletes the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArgument`](crate::GatewayError::InvalidArgument)
    /// for a malformed id and
    /// [`GatewayError::NotFound`](crate::GatewayError::NotFound) when no
    /// customer exists.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        validate_identifier(id, Customer::LABEL)?;

        let response = self.gateway.delete(&format!("/customers/{id}")).await?;
        decode_delete(id, Customer::LABEL, &response)
    }
}
