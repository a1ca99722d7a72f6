//! Transport layer: signed HTTP requests, raw responses.
//!
//! The transport builds and sends signed requests and hands back the raw
//! status and body. It does not interpret business semantics; mapping a 404
//! to a lookup failure or a 422 to validation errors is the resource layer's
//! job. Each request is terminal in one of two ways: a raw response
//! (whatever the status) or a transport failure (network unreachable,
//! timeout, TLS rejection). There are no retries at this layer.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::{config::Credentials, error::Result};

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Request context for transport operations.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Gateway base URL (e.g. <https://api.sandbox.vaultgate.com>).
    pub base_url: &'a str,
    /// Merchant-scoped request path (e.g. "/merchants/m1/customers").
    pub path: &'a str,
}

/// Raw response from a transport operation.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code, whatever it was; the transport does not judge it.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// Transport abstraction over the gateway's HTTP API.
///
/// This trait is sealed: transports handle merchant credentials, so all
/// implementations live in this crate. Every method signs the request with
/// the supplied credentials; nothing is cached between calls, so successive
/// requests may safely use different merchant profiles.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes a signed GET request.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level failures; non-2xx statuses
    /// come back as ordinary [`TransportResponse`]s.
    fn get<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a signed POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level failures.
    fn post<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a signed PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level failures.
    fn put<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a signed DELETE request.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level failures.
    fn delete<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;
}
