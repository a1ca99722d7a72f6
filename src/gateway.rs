//! Gateway façade handing out typed resource clients.

use serde::Serialize;

use crate::{
    config::GatewayConfig,
    credit_card::CreditCardClient,
    customer::CustomerClient,
    error::Result,
    paypal_account::PayPalAccountClient,
    resource::wire_envelope,
    testing::ClientApi,
    transport::{HttpTransport, RequestContext, Transport, TransportResponse},
};

/// Entry point for all gateway operations.
///
/// A `Gateway` binds one merchant profile ([`GatewayConfig`]) to a
/// transport and hands out per-resource clients. It holds no mutable
/// state: concurrent use from separate tasks is safe, and two gateways
/// built from different configs never share credentials.
///
/// # Examples
///
/// ```no_run
/// use vaultgate::{Gateway, GatewayConfig, config::Environment};
///
/// # async fn example() -> vaultgate::Result<()> {
/// let config = GatewayConfig::new(
///     Environment::Sandbox,
///     "integration_merchant_id",
///     "integration_public_key",
///     "integration_private_key",
/// );
/// let gateway = Gateway::new(config)?;
///
/// let account = gateway.paypal_account().find("PAYPALToken-123").await?;
/// println!("email: {}", account.email);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway<T: Transport = HttpTransport> {
    config: GatewayConfig,
    transport: T,
}

impl Gateway<HttpTransport> {
    /// Creates a gateway over the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`](crate::GatewayError::Config) if the
    /// configuration fails validation.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new()?)
    }
}

impl<T: Transport> Gateway<T> {
    /// Creates a gateway over a specific transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`](crate::GatewayError::Config) if the
    /// configuration fails validation.
    pub fn with_transport(config: GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Returns the active merchant configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the PayPal account resource client.
    #[must_use]
    pub fn paypal_account(&self) -> PayPalAccountClient<'_, T> {
        PayPalAccountClient::new(self)
    }

    /// Returns the credit card resource client.
    #[must_use]
    pub fn credit_card(&self) -> CreditCardClient<'_, T> {
        CreditCardClient::new(self)
    }

    /// Returns the customer resource client.
    #[must_use]
    pub fn customer(&self) -> CustomerClient<'_, T> {
        CustomerClient::new(self)
    }

    /// Returns the client-API helper used for nonce generation.
    #[must_use]
    pub fn client_api(&self) -> ClientApi<'_, T> {
        ClientApi::new(self)
    }

    /// Sends a signed GET for a merchant-scoped path suffix.
    pub(crate) async fn get(&self, suffix: &str) -> Result<TransportResponse> {
        let path = self.config.merchant_path(suffix);
        let credentials = self.config.credentials();
        let ctx = RequestContext { base_url: self.config.base_url(), path: &path };
        self.transport.get(&credentials, ctx).await
    }

    /// Sends a signed POST with a kind-tagged JSON envelope.
    pub(crate) async fn post<P: Serialize>(
        &self,
        suffix: &str,
        wire_key: &str,
        params: &P,
    ) -> Result<TransportResponse> {
        let body = wire_envelope(wire_key, params)?;
        let path = self.config.merchant_path(suffix);
        let credentials = self.config.credentials();
        let ctx = RequestContext { base_url: self.config.base_url(), path: &path };
        self.transport.post(&credentials, ctx, &body).await
    }

    /// Sends a signed PUT with a kind-tagged JSON envelope.
    pub(crate) async fn put<P: Serialize>(
        &self,
        suffix: &str,
        wire_key: &str,
        params: &P,
    ) -> Result<TransportResponse> {
        let body = wire_envelope(wire_key, params)?;
        let path = self.config.merchant_path(suffix);
        let credentials = self.config.credentials();
        let ctx = RequestContext { base_url: self.config.base_url(), path: &path };
        self.transport.put(&credentials, ctx, &body).await
    }

    /// Sends a signed DELETE for a merchant-scoped path suffix.
    pub(crate) async fn delete(&self, suffix: &str) -> Result<TransportResponse> {
        let path = self.config.merchant_path(suffix);
        let credentials = self.config.credentials();
        let ctx = RequestContext { base_url: self.config.base_url(), path: &path };
        self.transport.delete(&credentials, ctx).await
    }
}
