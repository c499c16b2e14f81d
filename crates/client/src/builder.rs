//! Client construction

use std::sync::Arc;
use std::time::Duration;

use iam_core::{AuthMethod, AuthOpts, DEFAULT_API_URL, Error, ErrorKind, Result};
use url::Url;

use crate::client::BaseClient;
use crate::services::{
    Certificates, Federations, Groups, Roles, S3Credentials, ServiceUsers, Users,
};

/// Product token at the start of the default user agent
pub const USER_AGENT_NAME: &str = "iam-rs";

/// Total request timeout of the default transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// TCP connect plus TLS handshake timeout of the default transport
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Idle keep-alive timeout of the default transport
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(100);

/// Idle connections kept per host by the default transport
///
/// reqwest has no pool-wide idle limit, so this caps each host separately.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Builder for [`Client`]
///
/// Setters may be called in any order; a later call overrides an earlier one.
#[derive(Default)]
pub struct ClientBuilder {
    api_url: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    user_agent_postfix: Option<String>,
    auth: Option<Arc<dyn AuthMethod>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// API base URL, defaults to [`DEFAULT_API_URL`]
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Use a preconfigured transport instead of the default one
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Total request timeout of the default transport
    ///
    /// Ignored when a transport is supplied through [`Self::http_client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    pub fn user_agent_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.user_agent_postfix = Some(postfix.into());
        self
    }

    /// Configure authentication from options; an empty token clears it
    pub fn auth_opts(mut self, opts: AuthOpts) -> Self {
        self.auth = opts.into_auth_method();
        self
    }

    /// Use a custom authentication strategy
    pub fn auth_method(mut self, auth: Arc<dyn AuthMethod>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the client
    ///
    /// Fails with [`ErrorKind::ClientNoAuthMethod`] when no authentication
    /// was configured. No network traffic happens here.
    pub fn build(self) -> Result<Client> {
        let auth = self.auth.ok_or_else(|| {
            Error::new(
                ErrorKind::ClientNoAuthMethod,
                "No authentication method was provided",
            )
        })?;

        let api_url = Url::parse(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?;

        let http = match self.http_client {
            Some(http) => http,
            None => default_http_client(self.timeout.unwrap_or(DEFAULT_TIMEOUT))?,
        };

        let user_agent = user_agent(
            self.user_agent_prefix.as_deref(),
            self.user_agent_postfix.as_deref(),
        );

        tracing::debug!(api_url = %api_url, user_agent = %user_agent, "built IAM client");

        Ok(Client {
            base: Arc::new(BaseClient::new(http, api_url, auth, user_agent)),
        })
    }
}

fn default_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .pool_idle_timeout(DEFAULT_POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(DEFAULT_POOL_MAX_IDLE_PER_HOST)
        .build()
        .map_err(|e| Error::internal(format!("Failed to create HTTP client: {e}")))
}

fn user_agent(prefix: Option<&str>, postfix: Option<&str>) -> String {
    let mut user_agent = format!("{USER_AGENT_NAME}/{}", env!("CARGO_PKG_VERSION"));
    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        user_agent = format!("{prefix} {user_agent}");
    }
    if let Some(postfix) = postfix.filter(|p| !p.is_empty()) {
        user_agent = format!("{user_agent} {postfix}");
    }
    user_agent
}

/// IAM API client
///
/// Cheap to clone; every service handle shares the same [`BaseClient`].
#[derive(Debug, Clone)]
pub struct Client {
    base: Arc<BaseClient>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Underlying request client, for calls without a typed wrapper
    pub fn base(&self) -> &Arc<BaseClient> {
        &self.base
    }

    pub fn users(&self) -> Users {
        Users::new(Arc::clone(&self.base))
    }

    pub fn service_users(&self) -> ServiceUsers {
        ServiceUsers::new(Arc::clone(&self.base))
    }

    pub fn groups(&self) -> Groups {
        Groups::new(Arc::clone(&self.base))
    }

    pub fn federations(&self) -> Federations {
        Federations::new(Arc::clone(&self.base))
    }

    pub fn certificates(&self) -> Certificates {
        Certificates::new(Arc::clone(&self.base))
    }

    pub fn roles(&self) -> Roles {
        Roles::new(Arc::clone(&self.base))
    }

    pub fn s3_credentials(&self) -> S3Credentials {
        S3Credentials::new(Arc::clone(&self.base))
    }
}
