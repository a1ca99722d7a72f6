//! Gateway configuration types.
//!
//! Configuration is an explicit value passed to every [`Gateway`]
//! construction. There is no process-wide or mutable configuration state:
//! two gateways built from different configs sign their requests with
//! different merchant credentials and never leak state into each other.
//!
//! [`Gateway`]: crate::gateway::Gateway

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use url::Url;

use crate::error::{GatewayError, Result};

/// Base URL for the sandbox environment.
const SANDBOX_BASE_URL: &str = "https://api.sandbox.vaultgate.com";

/// Base URL for the production environment.
const PRODUCTION_BASE_URL: &str = "https://api.vaultgate.com";

/// Gateway environment selector.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Sandbox environment for integration testing.
    #[default]
    Sandbox,
    /// Production environment.
    Production,
}

/// Configuration for one merchant profile.
///
/// TOML-deserializable so deployments can keep merchant profiles in config
/// files:
///
/// ```toml
/// environment = "sandbox"
/// merchant_id = "integration_merchant_id"
/// public_key = "integration_public_key"
/// private_key = "integration_private_key"
/// ```
///
/// # Examples
///
/// ```
/// use vaultgate::config::{Environment, GatewayConfig};
///
/// let config = GatewayConfig::new(
///     Environment::Sandbox,
///     "integration_merchant_id",
///     "integration_public_key",
///     "integration_private_key",
/// );
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Target environment.
    #[serde(default)]
    pub environment: Environment,

    /// Merchant identifier; scopes every request path.
    pub merchant_id: String,

    /// Public half of the API key pair.
    pub public_key: String,

    /// Private half of the API key pair.
    pub private_key: String,

    /// Overrides the environment base URL. Intended for private gateway
    /// deployments; must be HTTPS and must not point at loopback hosts.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl GatewayConfig {
    /// Creates a configuration for the given environment and credentials.
    pub fn new(
        environment: Environment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_url: None,
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the document does not parse.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| GatewayError::Config(format!("invalid TOML: {e}")))
    }

    /// Validates the configuration.
    ///
    /// Checks that the merchant id and both key halves are set and free of
    /// whitespace and control characters, and that any custom base URL is
    /// HTTPS and not a loopback address.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] describing the first failed check.
    pub fn validate(&self) -> Result<()> {
        validate_credential("merchant_id", &self.merchant_id)?;
        validate_credential("public_key", &self.public_key)?;
        validate_credential("private_key", &self.private_key)?;

        if let Some(ref base_url) = self.base_url {
            validate_base_url(base_url)?;
        }

        Ok(())
    }

    /// Returns the base URL requests are sent to.
    ///
    /// A configured `base_url` override wins; otherwise the environment
    /// default is used.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self.base_url {
            Some(ref url) => url,
            None => match self.environment {
                Environment::Sandbox => SANDBOX_BASE_URL,
                Environment::Production => PRODUCTION_BASE_URL,
            },
        }
    }

    /// Returns the merchant-scoped path for an API suffix.
    ///
    /// ```
    /// use vaultgate::config::{Environment, GatewayConfig};
    ///
    /// let config = GatewayConfig::new(Environment::Sandbox, "m1", "pub", "priv");
    /// assert_eq!(config.merchant_path("/customers"), "/merchants/m1/customers");
    /// ```
    #[must_use]
    pub fn merchant_path(&self, suffix: &str) -> String {
        format!("/merchants/{}{suffix}", self.merchant_id)
    }

    /// Returns the signing credentials for this merchant profile.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials { public_key: self.public_key.clone(), private_key: self.private_key.clone() }
    }
}

/// API key pair used to sign requests.
///
/// Requests are authenticated with HTTP Basic credentials formed from the
/// public and private key halves. The private key never appears in `Debug`
/// output or log fields.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    /// Creates credentials from a key pair.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self { public_key: public_key.into(), private_key: private_key.into() }
    }

    /// Returns the public key half.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Returns the `Authorization` header value for a signed request.
    #[must_use]
    pub fn authorization(&self) -> String {
        let pair = format!("{}:{}", self.public_key, self.private_key);
        format!("Basic {}", BASE64.encode(pair))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Validates a credential component: non-empty, no whitespace or control
/// characters.
fn validate_credential(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GatewayError::Config(format!("{name} must be set")));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(GatewayError::Config(format!(
            "{name} must not contain whitespace or control characters"
        )));
    }
    Ok(())
}

/// Validates a custom base URL: HTTPS only, no loopback hosts.
fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)
        .map_err(|e| GatewayError::Config(format!("invalid base_url '{base_url}': {e}")))?;

    if url.scheme() != "https" {
        return Err(GatewayError::Config(format!(
            "base_url must use HTTPS, got: {}",
            url.scheme()
        )));
    }

    if let Some(host) = url.host_str() {
        let host_lower = host.to_lowercase();
        if host_lower == "localhost"
            || host_lower == "::1"
            || host_lower == "[::1]"
            || host_lower.starts_with("127.")
        {
            return Err(GatewayError::Config(format!(
                "base_url must not be localhost or loopback: {host}"
            )));
        }
    }

    Ok(())
}
