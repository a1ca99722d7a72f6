//! Server-side SDK for the Vaultgate payment gateway.
//!
//! The crate is organized around a [`Gateway`] value that binds one
//! merchant profile ([`GatewayConfig`]) to a transport and hands out typed
//! resource clients:
//!
//! - [`paypal_account`] vaults PayPal accounts from single-use nonces and
//!   manages them by token.
//! - [`credit_card`] vaults cards from raw card details.
//! - [`customer`] owns the vaulted payment methods.
//! - [`testing`] drives the gateway's client API directly so sandbox
//!   integrations can simulate the browser-side consent flow.
//!
//! Failures are split along a hard line: argument and lookup problems are
//! [`GatewayError`] values returned through [`Result`], while gateway-side
//! validation of an otherwise well-formed request comes back as
//! [`GatewayResult::Failure`] carrying a [`ValidationErrorSet`].
//!
//! # Examples
//!
//! ```no_run
//! use vaultgate::{Gateway, GatewayConfig, config::Environment};
//! use vaultgate::paypal_account::PayPalAccountCreateParams;
//!
//! # async fn example(nonce: String) -> vaultgate::Result<()> {
//! let config = GatewayConfig::new(
//!     Environment::Sandbox,
//!     "integration_merchant_id",
//!     "integration_public_key",
//!     "integration_private_key",
//! );
//! let gateway = Gateway::new(config)?;
//!
//! let result = gateway
//!     .paypal_account()
//!     .create(PayPalAccountCreateParams {
//!         customer_id: "cust-1".to_owned(),
//!         payment_method_nonce: Some(nonce),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! match result.success() {
//!     Some(account) => println!("vaulted under {}", account.token),
//!     None => eprintln!("rejected: {:?}", result.errors()),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod credit_card;
pub mod customer;
pub mod error;
pub mod gateway;
pub mod paypal_account;
pub(crate) mod resource;
pub mod result;
pub mod testing;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use config::{Environment, GatewayConfig};
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use result::{GatewayResult, ValidationError, ValidationErrorSet};
