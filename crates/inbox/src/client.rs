use std::time::Duration;

use inbox_core::{
    ConversationSummary, FailurePolicy, SummaryAggregator,
    SummaryAggregatorBuilder,
};
use inbox_http::{HttpSource, HttpSourceConfigBuilder};
use inbox_model::{FetchError, Session};

/// A client builder.
///
/// See [`InboxClient`].
pub struct InboxClientBuilder {
    config_builder: HttpSourceConfigBuilder,
    http_client: Option<reqwest::Client>,
    concurrency: Option<usize>,
    failure_policy: FailurePolicy,
}

impl InboxClientBuilder {
    /// Creates a builder for the API rooted at `base_url`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            config_builder: HttpSourceConfigBuilder::with_base_url(base_url),
            http_client: None,
            concurrency: None,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Sets how long a single request may take.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.with_timeout(timeout);
        self
    }

    /// Sends requests through a preconfigured HTTP client.
    #[inline]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets how many message lists may be requested at once.
    #[inline]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Sets what happens when a message list cannot be fetched.
    #[inline]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Builds a new client.
    pub fn build(self) -> InboxClient {
        let config = self.config_builder.build();
        debug!("using api at {}", config.base_url());
        let source = match self.http_client {
            Some(client) => HttpSource::with_client(config, client),
            None => HttpSource::new(config),
        };

        let mut aggregator_builder = SummaryAggregatorBuilder::with_source(source)
            .with_failure_policy(self.failure_policy);
        if let Some(concurrency) = self.concurrency {
            aggregator_builder = aggregator_builder.with_concurrency(concurrency);
        }

        InboxClient {
            aggregator: aggregator_builder.build(),
        }
    }
}

/// A ready-to-use client for the conversation REST API.
///
/// It is basically a [`SummaryAggregator`] reading from an [`HttpSource`].
pub struct InboxClient {
    aggregator: SummaryAggregator<HttpSource>,
}

impl InboxClient {
    /// Returns the summaries of the session's conversations, most recent
    /// first.
    #[inline]
    pub async fn recent_conversation_summaries(
        &self,
        session: &Session,
    ) -> Result<Vec<ConversationSummary>, FetchError> {
        self.aggregator.recent_conversation_summaries(session).await
    }
}
