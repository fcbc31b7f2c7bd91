use inbox_model::ConversationSource;

use super::{FailurePolicy, SummaryAggregator};

const DEFAULT_CONCURRENCY: usize = 4;

/// [`SummaryAggregator`] builder.
pub struct SummaryAggregatorBuilder<S> {
    source: S,
    concurrency: usize,
    failure_policy: FailurePolicy,
}

impl<S: ConversationSource> SummaryAggregatorBuilder<S> {
    /// Creates a new builder reading from the specified source.
    #[inline]
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            concurrency: DEFAULT_CONCURRENCY,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Sets how many message lists may be requested at once. Values below
    /// one are treated as one.
    #[inline]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets what happens when a message list cannot be fetched.
    #[inline]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Builds the aggregator.
    #[inline]
    pub fn build(self) -> SummaryAggregator<S> {
        SummaryAggregator {
            source: self.source,
            concurrency: self.concurrency,
            failure_policy: self.failure_policy,
        }
    }
}
