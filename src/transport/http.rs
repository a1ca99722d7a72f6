//! HTTP transport implementation backed by reqwest.

use std::sync::LazyLock;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::{
    RequestContext, Transport, TransportResponse,
    config::HttpConfig,
    sealed,
};
use crate::{
    config::Credentials,
    error::{GatewayError, Result},
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let config = HttpConfig::default();
    Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .expect("failed to create default HTTP client")
});

/// Validates a gateway URL.
///
/// Requests only ever go to HTTPS endpoints; loopback hosts are rejected so
/// a misconfigured profile cannot silently target a local process.
fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(GatewayError::Config("only HTTPS gateway URLs are allowed".to_owned()));
    }

    if let Some(host) = url.host_str()
        && (host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]")
    {
        return Err(GatewayError::Config("loopback gateway URLs are not allowed".to_owned()));
    }

    Ok(())
}

/// Sanitizes a request path.
///
/// Identifiers are validated upstream, but the path check stands on its own:
/// no traversal sequences, no double slashes, must start with `/`.
fn sanitize_path(path: &str) -> Result<&str> {
    if path.contains("..") || path.contains("//") {
        return Err(GatewayError::InvalidArgument(
            "path must not contain traversal sequences".to_owned(),
        ));
    }
    if !path.starts_with('/') {
        return Err(GatewayError::InvalidArgument("path must start with '/'".to_owned()));
    }
    Ok(path)
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Signs every request with HTTP Basic credentials built from the merchant
/// key pair and returns the raw status and body for the resource layer to
/// interpret. Network failures (timeouts, connection refused) surface as
/// [`GatewayError::Http`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// Uses a shared singleton client for connection pooling efficiency:
    /// 30s total timeout, 10s connect timeout, 100 idle connections per
    /// host.
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency
    /// with [`with_config`](Self::with_config).
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or the HTTP
    /// client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { client })
    }

    /// Builds, signs, and sends one request; returns the raw response.
    #[instrument(
        skip(self, credentials, body),
        fields(
            base_url = ctx.base_url,
            path = ctx.path,
            method,
            merchant_public_key = credentials.public_key(),
        )
    )]
    async fn execute_request(
        &self,
        credentials: &Credentials,
        ctx: RequestContext<'_>,
        method: &str,
        body: Option<&[u8]>,
    ) -> Result<TransportResponse> {
        let url = Url::parse(ctx.base_url)
            .map_err(|e| GatewayError::Config(format!("invalid base URL: {e}")))?;
        validate_url(&url)?;
        let path = sanitize_path(ctx.path)?;

        let full_url = format!("{}{path}", ctx.base_url.trim_end_matches('/'));

        let mut request = match method {
            "GET" => self.client.get(&full_url),
            "POST" => self.client.post(&full_url),
            "PUT" => self.client.put(&full_url),
            "DELETE" => self.client.delete(&full_url),
            _ => {
                return Err(GatewayError::InvalidArgument(format!(
                    "unsupported HTTP method: {method}"
                )));
            }
        };

        request = request
            .header("Authorization", credentials.authorization())
            .header("Accept", "application/json");

        if let Some(body_bytes) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body_bytes.to_vec());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_body = response.bytes().await.map_err(GatewayError::Http)?.to_vec();

        Ok(TransportResponse { status, body: response_body })
    }
}

impl Transport for HttpTransport {
    async fn get<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> Result<TransportResponse> {
        self.execute_request(credentials, ctx, "GET", None).await
    }

    async fn post<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_request(credentials, ctx, "POST", Some(body)).await
    }

    async fn put<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_request(credentials, ctx, "PUT", Some(body)).await
    }

    async fn delete<'a>(
        &'a self,
        credentials: &'a Credentials,
        ctx: RequestContext<'a>,
    ) -> Result<TransportResponse> {
        self.execute_request(credentials, ctx, "DELETE", None).await
    }
}
