// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the panel's web interface.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::{Client, RequestBuilder};

use crate::error::ProtocolError;
use crate::protocol::{ApiResponse, Endpoint, Protocol};
use crate::response::ActionResult;

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the panel's web interface.
///
/// # Examples
///
/// ```
/// use lupusec_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.50")
///     .with_credentials("admin", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.50/action/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default socket timeout for every request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Creates a configuration for the panel at `host`.
    ///
    /// A leading `http://` is accepted and ignored.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host
            .strip_prefix("http://")
            .map(str::to_string)
            .unwrap_or(host);

        Self {
            host: host.trim_end_matches('/').to_string(),
            port: Self::DEFAULT_PORT,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets Basic Auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL all action endpoints hang off.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}/action/", self.host)
        } else {
            format!("http://{}:{}/action/", self.host, self.port)
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }

        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        let credentials = self
            .credentials
            .map(|(username, password)| Credentials { username, password });

        Ok(HttpClient {
            base_url,
            client,
            credentials,
            token: Mutex::new(None),
        })
    }
}

// ============================================================================
// HttpClient - Transport implementation
// ============================================================================

/// HTTP client for the panel's web interface.
///
/// Reads are sent as GET requests. Writes are sent as form-encoded POST
/// requests with an `x-token` header; the token is fetched from `tokenGet`
/// on the first write and reused afterwards.
///
/// # Examples
///
/// ```no_run
/// use lupusec_lib::protocol::{Endpoint, HttpConfig, Protocol};
///
/// # async fn example() -> lupusec_lib::Result<()> {
/// let client = HttpConfig::new("192.168.1.50")
///     .with_credentials("admin", "secret")
///     .into_client()?;
/// let response = client.get(Endpoint::Panel).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    credentials: Option<Credentials>,
    token: Mutex<Option<String>>,
}

/// HTTP Basic Auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl HttpClient {
    /// Creates a client for the panel at `host` without credentials.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the web interface.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true once a write token has been obtained.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.lock().is_some()
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.as_str())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<ApiResponse, ProtocolError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        tracing::debug!(endpoint = %endpoint, status = status.as_u16(), "Panel responded");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !status.is_success() {
            return Err(ProtocolError::Status {
                endpoint: endpoint.as_str().to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::trace!(endpoint = %endpoint, body = %body, "Received panel response");

        Ok(ApiResponse::new(body))
    }

    /// Returns the cached write token, fetching it on first use.
    async fn token(&self) -> Result<String, ProtocolError> {
        let cached = self.token.lock().clone();
        if let Some(token) = cached {
            return Ok(token);
        }

        let request = self.client.post(self.url(Endpoint::Token));
        let response = self.send(Endpoint::Token, request).await?;

        let result: ActionResult = response
            .parse()
            .map_err(|e| ProtocolError::TokenFetchFailed(e.to_string()))?;

        if !result.is_success() {
            return Err(ProtocolError::TokenFetchFailed(result.message().to_string()));
        }

        let token = result.message().to_string();
        tracing::debug!("Obtained write token");
        *self.token.lock() = Some(token.clone());
        Ok(token)
    }
}

impl Protocol for HttpClient {
    async fn get(&self, endpoint: Endpoint) -> Result<ApiResponse, ProtocolError> {
        tracing::debug!(endpoint = %endpoint, "GET");
        let request = self.client.get(self.url(endpoint));
        self.send(endpoint, request).await
    }

    async fn post(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, ProtocolError> {
        let token = self.token().await?;

        tracing::debug!(endpoint = %endpoint, "POST");
        let request = self
            .client
            .post(self.url(endpoint))
            .header("x-token", token)
            .form(params);
        self.send(endpoint, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = HttpConfig::new("192.168.1.50");
        assert_eq!(config.host(), "192.168.1.50");
        assert_eq!(config.port(), 80);
        assert!(config.credentials().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn config_strips_scheme() {
        let config = HttpConfig::new("http://192.168.1.50/");
        assert_eq!(config.host(), "192.168.1.50");
    }

    #[test]
    fn base_url_with_custom_port() {
        let config = HttpConfig::new("192.168.1.50").with_port(8080);
        assert_eq!(config.base_url(), "http://192.168.1.50:8080/action/");
    }

    #[test]
    fn config_with_credentials() {
        let config = HttpConfig::new("192.168.1.50").with_credentials("admin", "secret");
        assert_eq!(config.credentials(), Some(("admin", "secret")));
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = HttpConfig::new("").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn client_urls() {
        let client = HttpClient::new("192.168.1.50").unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.50/action/");
        assert_eq!(
            client.url(Endpoint::DeviceList),
            "http://192.168.1.50/action/deviceListGet"
        );
        assert!(!client.has_token());
    }
}
