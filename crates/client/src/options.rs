// ABOUTME: Configuration options for the indexer client.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances.

use std::time::Duration;

use url::Url;

use crate::client::Client;

/// Configuration options for an indexer client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Base endpoint of the indexer, without the `/api` or `/rss` path.
    pub base_url: Url,
    /// API key sent with every request.
    pub api_key: String,
    /// User id sent with RSS requests.
    pub api_user_id: i64,
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
}

impl Options {
    /// Creates options for the given indexer endpoint with defaults for
    /// everything else.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: String::new(),
            api_user_id: 0,
            timeout: Duration::from_secs(30),
            user_agent: "torznab-client/0.1".to_string(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Creates a new ClientBuilder for the given indexer endpoint.
    pub fn new(base_url: Url) -> Self {
        Self {
            opts: Options::new(base_url),
        }
    }

    /// Set the API key sent with every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.opts.api_key = api_key.into();
        self
    }

    /// Set the user id sent with RSS requests.
    pub fn api_user_id(mut self, api_user_id: i64) -> Self {
        self.opts.api_user_id = api_user_id;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}
