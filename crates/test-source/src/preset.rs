use std::collections::HashMap;

use inbox_model::{Conversation, Message, User};
use serde::{Deserialize, Serialize};

/// A complete data set for [`TestSource`](crate::TestSource).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Conversations, in the order the fake server lists them.
    pub conversations: Vec<Conversation>,
    /// Users, in the order the fake server lists them.
    pub users: Vec<User>,
    /// Messages keyed by conversation id, in server order.
    #[serde(default)]
    pub messages: HashMap<String, Vec<Message>>,
}

impl Fixture {
    /// Five conversations between six users, with older messages mixed in
    /// so that the latest one is not always listed first.
    pub fn sample() -> Self {
        // The fixture is part of this crate, so failing to parse it is a bug.
        serde_json::from_str(include_str!("../fixtures/sample.json"))
            .expect("sample fixture is valid")
    }
}
