//! A local fake conversation source for testing purpose.

mod preset;
mod stub;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use inbox_model::{
    Conversation, ConversationSource, FetchError, Message, Session, Timestamp,
    User,
};
use tokio::time::sleep;

pub use preset::*;
pub use stub::*;

#[derive(Default)]
struct Stats {
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Decrements the in-flight counter even if the request is cancelled.
struct InFlightGuard(Arc<Stats>);

impl InFlightGuard {
    fn enter(stats: &Arc<Stats>) -> Self {
        stats.requests.fetch_add(1, Ordering::SeqCst);
        let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(Arc::clone(stats))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A local fake conversation source for testing purpose.
///
/// Data is served from a [`Fixture`]. Any endpoint can be made to fail, and
/// every request may be delayed to exercise concurrent callers. Requesting
/// the messages of a conversation absent from the fixture fails with a 404
/// status, like a nonexistent path on a real server.
///
/// Clones share their request statistics, so a test can keep a clone around
/// after handing the source to the code under test.
///
/// # Note
///
/// This type clones the served data on every request. You should only use
/// it for testing.
#[derive(Clone, Default)]
pub struct TestSource {
    fixture: Fixture,
    conversations_error: Option<FetchError>,
    users_error: Option<FetchError>,
    message_errors: HashMap<String, FetchError>,
    delay: Option<Duration>,
    message_delays: HashMap<String, Duration>,
    stats: Arc<Stats>,
}

impl TestSource {
    /// Creates a source serving the given fixture.
    #[inline]
    pub fn with_fixture(fixture: Fixture) -> Self {
        Self {
            fixture,
            ..Default::default()
        }
    }

    /// Appends a conversation without messages.
    #[inline]
    pub fn add_conversation(&mut self, id: &str) {
        self.fixture.conversations.push(Conversation { id: id.to_owned() });
        self.fixture.messages.entry(id.to_owned()).or_default();
    }

    /// Appends a user.
    #[inline]
    pub fn add_user(&mut self, id: &str, avatar_url: &str) {
        self.fixture.users.push(User {
            id: id.to_owned(),
            avatar_url: Some(avatar_url.to_owned()),
        });
    }

    /// Appends a message to a conversation, generating its id.
    ///
    /// # Panics
    ///
    /// Panics if `created_at` is not an ISO 8601 date-time.
    pub fn add_message(
        &mut self,
        conversation_id: &str,
        from_user_id: &str,
        body: &str,
        created_at: &str,
    ) {
        let messages = self
            .fixture
            .messages
            .entry(conversation_id.to_owned())
            .or_default();
        messages.push(Message {
            id: format!("{conversation_id}:{}", messages.len()),
            conversation_id: conversation_id.to_owned(),
            body: body.to_owned(),
            from_user_id: from_user_id.to_owned(),
            created_at: Timestamp::parse(created_at)
                .expect("test timestamps must be ISO 8601"),
        });
    }

    /// Makes the conversation listing fail.
    #[inline]
    pub fn fail_conversations(&mut self, err: FetchError) {
        self.conversations_error = Some(err);
    }

    /// Makes the user listing fail.
    #[inline]
    pub fn fail_users(&mut self, err: FetchError) {
        self.users_error = Some(err);
    }

    /// Makes the message listing of one conversation fail.
    #[inline]
    pub fn fail_messages(&mut self, conversation_id: &str, err: FetchError) {
        self.message_errors.insert(conversation_id.to_owned(), err);
    }

    /// Delays every request.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Delays the message listing of one conversation, overriding
    /// [`set_delay`](Self::set_delay).
    #[inline]
    pub fn set_message_delay(&mut self, conversation_id: &str, delay: Duration) {
        self.message_delays.insert(conversation_id.to_owned(), delay);
    }

    /// Returns how many requests have been started.
    #[inline]
    pub fn requests(&self) -> usize {
        self.stats.requests.load(Ordering::SeqCst)
    }

    /// Returns the largest number of requests that were pending at once.
    #[inline]
    pub fn max_in_flight(&self) -> usize {
        self.stats.max_in_flight.load(Ordering::SeqCst)
    }

    fn respond<T: Send + 'static>(
        &self,
        delay: Option<Duration>,
        result: Result<T, FetchError>,
    ) -> impl Future<Output = Result<T, FetchError>> + Send + 'static + use<T>
    {
        let guard = InFlightGuard::enter(&self.stats);
        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            drop(guard);
            result
        }
    }
}

impl ConversationSource for TestSource {
    fn conversations(
        &self,
        _session: &Session,
    ) -> impl Future<Output = Result<Vec<Conversation>, FetchError>> + Send + 'static
    {
        let result = match &self.conversations_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.fixture.conversations.clone()),
        };
        self.respond(self.delay, result)
    }

    fn users(
        &self,
        _session: &Session,
    ) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send + 'static
    {
        let result = match &self.users_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.fixture.users.clone()),
        };
        self.respond(self.delay, result)
    }

    fn messages(
        &self,
        _session: &Session,
        conversation_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, FetchError>> + Send + 'static
    {
        let result = if let Some(err) = self.message_errors.get(conversation_id)
        {
            Err(err.clone())
        } else if let Some(messages) = self.fixture.messages.get(conversation_id)
        {
            Ok(messages.clone())
        } else {
            Err(FetchError::status(
                404,
                format!("/conversations/{conversation_id}/messages"),
            ))
        };
        let delay = self
            .message_delays
            .get(conversation_id)
            .copied()
            .or(self.delay);
        self.respond(delay, result)
    }
}
