use std::cmp::Ordering;

use inbox_model::{ConversationSource, FetchError, Message, Session};

/// Picks the message with the greatest `created_at` instant.
///
/// When several messages share the greatest instant, the one listed first
/// wins. Returns `None` for an empty list.
pub fn latest_message(messages: Vec<Message>) -> Option<Message> {
    messages.into_iter().reduce(|latest, message| {
        match message.created_at.cmp_instant(&latest.created_at) {
            Ordering::Greater => message,
            Ordering::Equal | Ordering::Less => latest,
        }
    })
}

/// Fetches the messages of one conversation and keeps the latest.
///
/// A conversation without messages yields `Ok(None)`.
pub async fn fetch_latest_message<S: ConversationSource>(
    source: &S,
    session: &Session,
    conversation_id: &str,
) -> Result<Option<Message>, FetchError> {
    let messages = source.messages(session, conversation_id).await?;
    trace!(
        "conversation {conversation_id} has {} messages",
        messages.len()
    );
    Ok(latest_message(messages))
}
