use crate::error::FetchError;
use crate::record::{Conversation, Message, User};
use crate::session::Session;

/// A type that reads conversation data from somewhere, typically a REST
/// service.
///
/// Each method issues one independent read. The returned futures own
/// everything they need, so callers may poll several of them at once and
/// drop any of them to cancel the read.
///
/// Implementations must map their own transport and decoding failures into
/// [`FetchError`]. An empty collection is a successful result.
pub trait ConversationSource: Send + Sync {
    /// Lists the conversations of the session's user, in server order.
    fn conversations(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Conversation>, FetchError>> + Send + 'static;

    /// Lists every user known to the service.
    fn users(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send + 'static;

    /// Lists the messages of one conversation, in server order.
    fn messages(
        &self,
        session: &Session,
        conversation_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, FetchError>> + Send + 'static;
}
