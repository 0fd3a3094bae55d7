//! Migadu async client implementation.

use crate::{Error, Result};
use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Base URL of the Migadu admin API.
pub const DEFAULT_ENDPOINT: &str = "https://api.migadu.com/v1/";

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT_VALUE: &str = concat!("migadu-client/", env!("CARGO_PKG_VERSION"));

/// Async client for the Migadu admin API, bound to a single domain.
///
/// Use [`Client::new`] for the common case or [`Client::builder`] for custom
/// settings like a proxy or user agent. Cloning is cheap and clones share the
/// underlying connection pool.
///
/// The configured timeout covers the whole exchange. A caller that needs a
/// shorter deadline can wrap any call in `tokio::time::timeout`; whichever
/// deadline is shorter wins. When the client timeout fires the call fails with
/// [`Error::Timeout`].
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    user: String,
    token: String,
    endpoint: String,
    domain: String,
    timeout: Duration,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(
        user: impl Into<String>,
        token: impl Into<String>,
        domain: impl Into<String>,
    ) -> ClientBuilder {
        ClientBuilder::new(user, token, domain)
    }

    /// Create a new Migadu client.
    ///
    /// # Arguments
    /// * `user` - Account email used for basic authentication
    /// * `token` - API key
    /// * `endpoint` - API base URL; `None` or empty uses [`DEFAULT_ENDPOINT`]
    /// * `domain` - Domain whose mailboxes this client manages
    /// * `timeout` - Request timeout; `None` uses [`DEFAULT_TIMEOUT`]
    ///
    /// # Errors
    /// [`Error::MissingField`] when `user`, `token` or `domain` is empty.
    ///
    /// # Examples
    /// ```no_run
    /// # use migadu_client::Client;
    /// # fn main() -> Result<(), migadu_client::Error> {
    /// let client = Client::new("admin@example.com", "api-key", None, "example.com", None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        user: &str,
        token: &str,
        endpoint: Option<&str>,
        domain: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = ClientBuilder::new(user, token, domain);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint(endpoint);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Account used for authentication.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// API base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Domain this client operates on.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Timeout applied to each request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Issue a `GET` against `path` below the domain and return the raw body.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.request(Method::GET, path, None).await
    }

    /// Issue a `POST` with a JSON body and return the raw response body.
    pub async fn post(&self, path: &str, json_body: Vec<u8>) -> Result<Vec<u8>> {
        self.request(Method::POST, path, Some(json_body)).await
    }

    /// Issue a `PUT` with a JSON body and return the raw response body.
    pub async fn put(&self, path: &str, json_body: Vec<u8>) -> Result<Vec<u8>> {
        self.request(Method::PUT, path, Some(json_body)).await
    }

    /// Issue a `DELETE` and return the raw response body.
    pub async fn delete(&self, path: &str) -> Result<Vec<u8>> {
        self.request(Method::DELETE, path, None).await
    }

    /// Full URL for a path below `domains/{domain}/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/domains/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.domain,
            path
        )
    }

    /// Common request pattern shared by every verb.
    ///
    /// Anything other than `200 OK` is returned as [`Error::Status`].
    async fn request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "migadu request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.user, Some(&self.token))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_vec();

        tracing::debug!(%method, %url, status = status.as_u16(), "migadu response");

        if status != StatusCode::OK {
            tracing::warn!(%method, %url, status = status.as_u16(), "migadu request rejected");
            return Err(Error::Status { status, body });
        }

        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Http(err)
        }
    }
}

/// Serialize a request record to a JSON body.
pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::Encode)
}

/// Deserialize a JSON response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(Error::Decode)
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional string-backed field, treating `null` and `""` as absent.
pub(crate) fn non_blank<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.is_empty())
        .map(T::from))
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("domain", &self.domain)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// Builder for configuring a Migadu client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    user: String,
    token: String,
    domain: String,
    endpoint: String,
    timeout: Duration,
    proxy: Option<String>,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - [`DEFAULT_ENDPOINT`]
    /// - [`DEFAULT_TIMEOUT`]
    /// - No proxy
    /// - `migadu-client/<version>` user agent
    pub fn new(
        user: impl Into<String>,
        token: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
            domain: domain.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Override the API base URL.
    ///
    /// An empty string keeps [`DEFAULT_ENDPOINT`]. Useful for testing.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        if !endpoint.is_empty() {
            self.endpoint = endpoint;
        }
        self
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the settings and build the client.
    ///
    /// No network traffic happens here.
    pub fn build(self) -> Result<Client> {
        if self.user.is_empty() {
            return Err(Error::MissingField("user"));
        }
        if self.token.is_empty() {
            return Err(Error::MissingField("token"));
        }
        if self.domain.is_empty() {
            return Err(Error::MissingField("domain"));
        }

        let mut builder = reqwest::Client::builder().timeout(self.timeout);

        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            builder = builder.default_headers([(USER_AGENT, value)].into_iter().collect());
        }

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            user: self.user,
            token: self.token,
            endpoint: self.endpoint,
            domain: self.domain,
            timeout: self.timeout,
            proxy: self.proxy,
        })
    }
}
