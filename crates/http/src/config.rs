use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for [`HttpSourceConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpSourceConfigBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpSourceConfigBuilder {
    /// Creates a builder for the API rooted at `base_url`, for example
    /// `https://example.com/api`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets how long a single request may take, body included.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

/// Configuration for [`HttpSource`](crate::HttpSource).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpSourceConfig {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
}

impl HttpSourceConfig {
    /// Returns the API root, without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
