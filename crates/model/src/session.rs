use std::fmt::{self, Debug, Formatter};

/// The identity every request is made on behalf of.
///
/// The remote service decides what "current user" means from this value,
/// so it is passed explicitly to each fetch instead of living in global
/// state.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Creates a session without credentials.
    #[inline]
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Creates a session authenticated with a bearer token.
    #[inline]
    pub fn with_token<S: Into<String>>(token: S) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Returns the bearer token, if any.
    #[inline]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
