//! Module containing the main BRI API client.

use crate::{
    apis::{direct_debit::DirectDebitApi, BriClientInner},
    common::{DEFAULT_BASE_URL, DEFAULT_SANDBOX_BASE_URL, DEFAULT_TIMEOUT},
    endpoints::Endpoints,
    logging::{LogLevel, LogSink, Logger, TracingSink},
    middlewares::retry_transport_errors::{
        ConstantBackoff, DynRetryPolicy, RetryTransportErrorsMiddleware,
    },
    signing::{Clock, SystemClock},
    transport::Transport,
    Token,
};
use reqwest_middleware::ClientWithMiddleware;
use retry_policies::RetryPolicy;
use serde::{Deserialize, Deserializer};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
    time::Duration,
};

/// BRI environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Default base URL of the environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => DEFAULT_SANDBOX_BASE_URL,
            Environment::Production => DEFAULT_BASE_URL,
        }
    }
}

/// Configuration of a [`BriClient`].
///
/// Can be deserialized from any `serde` source. The timeout is given in seconds as
/// `timeout_secs` and the log level as an integer from 0 (silent) to 3 (debug):
///
/// ```rust
/// # use bri_rust::client::ClientConfig;
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "base_url": "https://sandbox.partner.api.bri.co.id",
///     "direct_debit_base_url": "https://sandbox.partner.api.bri.co.id",
///     "client_id": "my-client",
///     "client_secret": "my-secret",
///     "timeout_secs": 30,
///     "log_level": 3
/// }"#).unwrap();
///
/// assert_eq!(config.timeout.as_secs(), 30);
/// ```
#[derive(Deserialize, Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub direct_debit_base_url: String,
    pub client_id: String,
    pub client_secret: Token,
    #[serde(default)]
    pub api_key: Option<Token>,
    /// Deadline of a whole call, retries included.
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub timeout: Duration,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub is_production: bool,
}

impl ClientConfig {
    /// Creates a sandbox configuration with all the defaults, sending Direct Debit calls to
    /// `direct_debit_base_url`.
    pub fn new(
        direct_debit_base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<Token>,
    ) -> Self {
        let direct_debit_base_url = direct_debit_base_url.into();

        Self {
            base_url: direct_debit_base_url.clone(),
            direct_debit_base_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            log_level: LogLevel::default(),
            is_production: false,
        }
    }

    /// Configuration pointing at the default URLs of `environment`.
    pub fn for_environment(
        environment: Environment,
        client_id: impl Into<String>,
        client_secret: impl Into<Token>,
    ) -> Self {
        Self {
            is_production: environment == Environment::Production,
            ..Self::new(environment.base_url(), client_id, client_secret)
        }
    }

    pub fn sandbox(client_id: impl Into<String>, client_secret: impl Into<Token>) -> Self {
        Self::for_environment(Environment::Sandbox, client_id, client_secret)
    }

    pub fn production(client_id: impl Into<String>, client_secret: impl Into<Token>) -> Self {
        Self::for_environment(Environment::Production, client_id, client_secret)
    }

    pub fn environment(&self) -> Environment {
        if self.is_production {
            Environment::Production
        } else {
            Environment::Sandbox
        }
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn deserialize_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

/// Client for BRI public APIs.
///
/// Cheap to clone: all clones share the same connection pool and configuration.
/// Transport failures (refused connections, resets, timeouts) are retried up to 3 times
/// in total; HTTP responses are never retried.
#[derive(Debug, Clone)]
pub struct BriClient {
    /// Direct Debit APIs client.
    pub direct_debit: DirectDebitApi,
    inner: Arc<BriClientInner>,
}

impl BriClient {
    /// Builds a new [`BriClient`](crate::client::BriClient) with the default configuration.
    pub fn new(config: ClientConfig) -> BriClient {
        BriClientBuilder::new(config).build()
    }

    /// Returns a new builder to configure a new [`BriClient`](crate::client::BriClient).
    pub fn builder(config: ClientConfig) -> BriClientBuilder {
        BriClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Endpoint table selected when the client was built.
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }
}

/// Builder for a [`BriClient`](crate::client::BriClient).
pub struct BriClientBuilder {
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    config: ClientConfig,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    use_sandbox_prefix: Option<bool>,
}

impl BriClientBuilder {
    /// Creates a new builder to configure a [`BriClient`](crate::client::BriClient).
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: Some(DynRetryPolicy(Arc::new(ConstantBackoff::default()))),
            config,
            sink: Arc::new(TracingSink),
            clock: Arc::new(SystemClock),
            use_sandbox_prefix: None,
        }
    }

    /// Consumes the builder and builds a new [`BriClient`](crate::client::BriClient).
    pub fn build(self) -> BriClient {
        let endpoints = Endpoints::select(
            self.use_sandbox_prefix
                .unwrap_or(!self.config.is_production),
        );
        let logger = Logger::new(self.config.log_level, self.sink);

        let inner = Arc::new(BriClientInner {
            transport: Transport::new(
                build_client_with_middleware(self.client, self.retry_policy),
                self.config.timeout,
                logger,
            ),
            config: self.config,
            endpoints,
            clock: self.clock,
        });

        BriClient {
            direct_debit: DirectDebitApi::new(inner.clone()),
            inner,
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a specific [`RetryPolicy`](retry_policies::RetryPolicy) to use when retrying
    /// transport failures.
    ///
    /// Defaults to [`ConstantBackoff::default()`](crate::transport::ConstantBackoff).
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl RetryPolicy + Send + Sync + 'static,
    ) -> Self {
        self.retry_policy = Some(DynRetryPolicy(Arc::new(retry_policy)));
        self
    }

    /// Disables automatic retrying of failed requests.
    pub fn without_retries(mut self) -> Self {
        self.retry_policy = None;
        self
    }

    /// Sets where log lines go. Defaults to [`TracingSink`](crate::logging::TracingSink),
    /// which prints nothing until the application installs a `tracing` subscriber.
    pub fn with_logger(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the source of the `BRI-Timestamp` values.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Uses the sandbox endpoint paths when `true`, the production ones otherwise.
    ///
    /// Defaults to sandbox unless the configuration says `is_production`.
    pub fn with_sandbox_prefix(mut self, use_sandbox_prefix: bool) -> Self {
        self.use_sandbox_prefix = Some(use_sandbox_prefix);
        self
    }
}

impl Debug for BriClientBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BriClientBuilder")
            .field("retry_policy", &self.retry_policy)
            .field("config", &self.config)
            .field("use_sandbox_prefix", &self.use_sandbox_prefix)
            .finish_non_exhaustive()
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client);

    if let Some(retry_policy) = retry_policy {
        builder = builder.with(RetryTransportErrorsMiddleware::new(retry_policy));
    }

    builder.build()
}
