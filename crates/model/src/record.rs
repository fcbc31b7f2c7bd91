use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A conversation owned by the remote service.
///
/// Only the identifier is consumed, other fields sent by the server are
/// ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conversation {
    /// The conversation identifier.
    pub id: String,
}

/// A message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The message identifier.
    pub id: String,
    /// The conversation this message belongs to.
    pub conversation_id: String,
    /// The message text.
    pub body: String,
    /// The identifier of the sender.
    pub from_user_id: String,
    /// When the message was created.
    pub created_at: Timestamp,
}

/// A user known to the remote service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// The user identifier.
    pub id: String,
    /// Where the user's avatar can be loaded from. Some servers send
    /// `null` for users without one.
    #[serde(default)]
    pub avatar_url: Option<String>,
}
