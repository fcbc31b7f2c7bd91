//! The public summary shape.

use inbox_model::{Message, Timestamp};
use serde::{Deserialize, Serialize};

/// The latest state of one conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The conversation identifier.
    pub id: String,
    /// The most recent message in the conversation.
    pub latest_message: LatestMessage,
}

/// The most recent message of a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatestMessage {
    /// The message identifier.
    pub id: String,
    /// The message text.
    pub body: String,
    /// Who sent the message.
    pub from_user: Sender,
    /// When the message was created, as sent by the server.
    pub created_at: Timestamp,
}

/// The sender of a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sender {
    /// The user identifier.
    pub id: String,
    /// Omitted when the sender is not among the known users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Builds the summary of a conversation from its latest message.
pub fn format_summary(
    conversation_id: impl Into<String>,
    message: &Message,
    avatar_url: Option<&str>,
) -> ConversationSummary {
    ConversationSummary {
        id: conversation_id.into(),
        latest_message: LatestMessage {
            id: message.id.clone(),
            body: message.body.clone(),
            from_user: Sender {
                id: message.from_user_id.clone(),
                avatar_url: avatar_url.map(ToOwned::to_owned),
            },
            created_at: message.created_at.clone(),
        },
    }
}
