use std::collections::HashMap;

use inbox_model::User;

/// Maps user ids to avatar URLs.
///
/// Built once per aggregation from the full user list. If the list holds
/// the same id twice, the later entry wins. A user listed without an avatar
/// is known, but has no URL to report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvatarLookup {
    avatars: HashMap<String, Option<String>>,
}

impl AvatarLookup {
    /// Builds the lookup from a user list.
    pub fn from_users(users: Vec<User>) -> Self {
        let avatars = users
            .into_iter()
            .map(|user| (user.id, user.avatar_url))
            .collect();
        Self { avatars }
    }

    /// Returns the avatar URL of `user_id`, if the user is known and has
    /// one.
    #[inline]
    pub fn avatar_url(&self, user_id: &str) -> Option<&str> {
        self.avatars.get(user_id)?.as_deref()
    }

    /// Returns the number of known users.
    #[inline]
    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    /// Returns `true` if no user is known.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, avatar_url: &str) -> User {
        User {
            id: id.to_owned(),
            avatar_url: Some(avatar_url.to_owned()),
        }
    }

    #[test]
    fn test_lookup() {
        let lookup = AvatarLookup::from_users(vec![
            user("1", "http://placekitten.com/g/300/300"),
            user("3", "http://placekitten.com/g/302/302"),
        ]);
        assert_eq!(lookup.len(), 2);
        assert_eq!(
            lookup.avatar_url("3"),
            Some("http://placekitten.com/g/302/302")
        );
        assert_eq!(lookup.avatar_url("2"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let lookup = AvatarLookup::from_users(vec![
            user("1", "http://old.test/1.png"),
            user("2", "http://old.test/2.png"),
            user("1", "http://new.test/1.png"),
        ]);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.avatar_url("1"), Some("http://new.test/1.png"));
    }

    #[test]
    fn test_user_without_avatar() {
        let mut users = vec![
            user("1", "http://old.test/1.png"),
            user("2", "http://placekitten.com/g/302/302"),
        ];
        users.push(User {
            id: "1".to_owned(),
            avatar_url: None,
        });
        let lookup = AvatarLookup::from_users(users);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.avatar_url("1"), None);
        assert_eq!(
            lookup.avatar_url("2"),
            Some("http://placekitten.com/g/302/302")
        );
    }

    #[test]
    fn test_empty() {
        let lookup = AvatarLookup::from_users(vec![]);
        assert!(lookup.is_empty());
        assert_eq!(lookup.avatar_url(""), None);
    }
}
