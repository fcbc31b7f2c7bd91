mod builder;
#[cfg(test)]
mod tests;

use std::pin::pin;

use futures_util::future::try_join;
use futures_util::stream::{self, StreamExt};
use inbox_model::{ConversationSource, FetchError, Session};
use tracing::Instrument;

pub use builder::SummaryAggregatorBuilder;

use crate::latest::fetch_latest_message;
use crate::lookup::AvatarLookup;
use crate::sort::sort_summaries;
use crate::summary::{ConversationSummary, format_summary};

/// What to do when the messages of one conversation cannot be fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Fail the whole aggregation with that error.
    #[default]
    Abort,
    /// Log the error and leave the conversation out of the result.
    Skip,
}

/// Collects the latest message of every conversation of a session into a
/// list of summaries, most recent first.
///
/// The conversation list and the user list are requested concurrently.
/// Message lists are then requested with a bounded number of requests in
/// flight. The result does not depend on the order in which responses
/// arrive.
///
/// Conversations without any message are left out of the result.
pub struct SummaryAggregator<S> {
    source: S,
    concurrency: usize,
    failure_policy: FailurePolicy,
}

impl<S: ConversationSource> SummaryAggregator<S> {
    /// Returns the summaries of the session's conversations, sorted by the
    /// creation time of their latest message, descending.
    ///
    /// # Errors
    ///
    /// Fails if the conversation list or the user list cannot be fetched.
    /// A failed message list fails the call only under
    /// [`FailurePolicy::Abort`].
    ///
    /// # Cancel safety
    ///
    /// Dropping the returned future drops every pending request.
    pub async fn recent_conversation_summaries(
        &self,
        session: &Session,
    ) -> Result<Vec<ConversationSummary>, FetchError> {
        self.aggregate(session)
            .instrument(debug_span!("recent conversation summaries"))
            .await
    }

    async fn aggregate(
        &self,
        session: &Session,
    ) -> Result<Vec<ConversationSummary>, FetchError> {
        let (conversations, users) = try_join(
            self.source.conversations(session),
            self.source.users(session),
        )
        .await?;
        debug!(
            "got {} conversations and {} users",
            conversations.len(),
            users.len()
        );

        let lookup = AvatarLookup::from_users(users);

        // `buffered` yields in conversation order whatever the completion
        // order, so the pre-sort order is deterministic.
        let mut latest_messages = pin!(
            stream::iter(conversations)
                .map(|conversation| async move {
                    let result = fetch_latest_message(
                        &self.source,
                        session,
                        &conversation.id,
                    )
                    .await;
                    (conversation.id, result)
                })
                .buffered(self.concurrency)
        );

        let mut summaries = Vec::new();
        while let Some((conversation_id, result)) =
            latest_messages.next().await
        {
            let message = match result {
                Ok(Some(message)) => message,
                Ok(None) => {
                    debug!("conversation {conversation_id} has no messages");
                    continue;
                }
                Err(err) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Skip => {
                        warn!("skipping conversation {conversation_id}: {err}");
                        continue;
                    }
                },
            };
            let avatar_url = lookup.avatar_url(&message.from_user_id);
            if avatar_url.is_none() {
                trace!("no avatar for user {}", message.from_user_id);
            }
            summaries.push(format_summary(conversation_id, &message, avatar_url));
        }

        sort_summaries(&mut summaries);
        Ok(summaries)
    }
}
