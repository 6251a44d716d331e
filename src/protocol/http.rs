// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport and bearer-token authentication for the Dwelo API.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ProtocolError};
use crate::protocol::Method;
use crate::sensor::ReportCache;

const LOGIN_ENDPOINT: &str = "login/";

// ============================================================================
// Credentials
// ============================================================================

/// Dwelo account credentials.
///
/// The password is never printed by the `Debug` implementation.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from an account email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// ClientConfig
// ============================================================================

/// Configuration for a [`DweloClient`].
///
/// # Examples
///
/// ```
/// use dwelo_lib::protocol::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("me@example.com", "hunter2")
///     .with_host("https://api.dwelo.com/v3")
///     .with_timeout(Duration::from_secs(5))
///     .with_report_cache_ttl(Duration::from_secs(2));
///
/// assert_eq!(config.base_url(), "https://api.dwelo.com/v3/");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    host: String,
    credentials: Credentials,
    application_id: String,
    timeout: Duration,
    report_cache_ttl: Duration,
}

impl ClientConfig {
    /// Default Dwelo API host.
    pub const DEFAULT_HOST: &'static str = "https://api.dwelo.com/v3/";
    /// Application identifier sent with every login.
    pub const DEFAULT_APPLICATION_ID: &'static str = "concierge";
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the default host.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::from_credentials(Credentials::new(email, password))
    }

    /// Creates a configuration from existing credentials.
    #[must_use]
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            credentials,
            application_id: Self::DEFAULT_APPLICATION_ID.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            report_cache_ttl: Duration::ZERO,
        }
    }

    /// Sets the API host. A trailing `/` is added if missing.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the application identifier sent at login.
    #[must_use]
    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = application_id.into();
        self
    }

    /// Sets the per-request timeout. An expired request counts as a failed
    /// request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how long a gateway sensor report is reused by devices polling
    /// the same gateway. Zero disables the cache.
    #[must_use]
    pub fn with_report_cache_ttl(mut self, ttl: Duration) -> Self {
        self.report_cache_ttl = ttl;
        self
    }

    /// Returns the credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the report cache TTL.
    #[must_use]
    pub fn report_cache_ttl(&self) -> Duration {
        self.report_cache_ttl
    }

    /// Returns the host, normalized to end with `/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.ends_with('/') {
            self.host.clone()
        } else {
            format!("{}/", self.host)
        }
    }

    /// Creates a [`DweloClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is not a valid URL or the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<DweloClient, ProtocolError> {
        let base_url = self.base_url();
        Url::parse(&base_url)
            .map_err(|e| ProtocolError::InvalidAddress(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(DweloClient {
            base_url,
            client,
            credentials: Arc::new(self.credentials),
            application_id: self.application_id,
            token: Arc::new(RwLock::new(None)),
            report_cache: ReportCache::new(self.report_cache_ttl),
        })
    }
}

// ============================================================================
// DweloClient
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    application_id: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// HTTP client for the Dwelo API.
///
/// Holds the HTTP session and the bearer token obtained by [`login`](Self::login).
/// Cloning is cheap and clones share the token, so one login authorizes every
/// clone handed to the registry and the device façades.
///
/// # Examples
///
/// ```no_run
/// use dwelo_lib::protocol::ClientConfig;
///
/// # async fn example() -> dwelo_lib::Result<()> {
/// let client = ClientConfig::new("me@example.com", "hunter2").into_client()?;
/// client.login().await?;
///
/// let devices = client.get("device/").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DweloClient {
    base_url: String,
    client: Client,
    credentials: Arc<Credentials>,
    application_id: String,
    token: Arc<RwLock<Option<String>>>,
    report_cache: ReportCache,
}

impl DweloClient {
    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` once a login has succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub(crate) fn report_cache(&self) -> &ReportCache {
        &self.report_cache
    }

    /// Builds the full URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Logs in and stores the bearer token.
    ///
    /// May be called again to re-authenticate; a successful call replaces the
    /// stored token. A failed call leaves any previous token in place.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::AuthenticationFailed`] if the API answers with
    /// a non-2xx status or without a token, and [`ProtocolError::Http`] if the
    /// request could not be sent.
    pub async fn login(&self) -> Result<(), Error> {
        let url = self.endpoint(LOGIN_ENDPOINT);
        let body = LoginRequest {
            email: &self.credentials.email,
            password: &self.credentials.password,
            application_id: &self.application_id,
        };

        tracing::debug!(url = %url, email = %self.credentials.email, "Logging in to Dwelo");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        let text = response.text().await.map_err(ProtocolError::Http)?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %text, "Dwelo login rejected");
            return Err(ProtocolError::AuthenticationFailed {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let token = serde_json::from_str::<LoginResponse>(&text)
            .ok()
            .map(|response| response.token)
            .filter(|token| !token.trim().is_empty());
        let Some(token) = token else {
            tracing::error!(status = status.as_u16(), body = %text, "Dwelo login returned no token");
            return Err(ProtocolError::AuthenticationFailed {
                status: status.as_u16(),
                body: text,
            }
            .into());
        };

        *self.token.write() = Some(token);
        tracing::info!(status = status.as_u16(), "Dwelo login succeeded");
        Ok(())
    }

    /// Sends an authorized request and returns the decoded JSON body.
    ///
    /// Returns `Ok(None)` when the call fails at the HTTP level: a network
    /// error, a timeout, a non-2xx status, or a body that is not JSON. A 2xx
    /// response with an empty body yields `Ok(Some(Value::Null))`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingCredential`] without sending anything
    /// if no login has succeeded yet.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Value>, Error> {
        let url = self.endpoint(path);
        let bearer = self.token.read().clone();
        let Some(token) = bearer.filter(|token| !token.trim().is_empty()) else {
            tracing::error!(url = %url, "Dwelo request attempted before login");
            return Err(ProtocolError::MissingCredential.into());
        };

        tracing::debug!(method = %method, url = %url, "Sending Dwelo request");

        let mut request = self
            .client
            .request(method.into(), &url)
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Dwelo request failed");
                return Ok(None);
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to read Dwelo response");
                return Ok(None);
            }
        };

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %text, "Dwelo API returned an error");
            return Ok(None);
        }

        tracing::debug!(status = status.as_u16(), body = %text, "Received Dwelo response");

        if text.trim().is_empty() {
            return Ok(Some(Value::Null));
        }

        match serde_json::from_str(&text) {
            Ok(json) => Ok(Some(json)),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Dwelo response is not JSON");
                Ok(None)
            }
        }
    }

    /// Sends an authorized GET request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, path: &str) -> Result<Option<Value>, Error> {
        self.request::<Value>(Method::Get, path, None).await
    }

    /// Sends an authorized POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, Error> {
        self.request(Method::Post, path, Some(body)).await
    }
}
