use std::error::Error as StdError;
use std::fmt::{self, Display};

/// The kind of failure that occurred while reading a remote resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be sent, or the connection failed.
    Transport,
    /// The server answered with a non-success status.
    Status,
    /// The response body could not be decoded.
    Decode,
    /// The request did not complete in time.
    Timeout,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Status => write!(f, "unexpected status"),
            ErrorKind::Decode => write!(f, "undecodable response"),
            ErrorKind::Timeout => write!(f, "timed out"),
        }
    }
}

/// Error returned when a remote read fails.
///
/// This is the only error type that crosses the [`ConversationSource`]
/// boundary. An empty list is never reported as an error.
///
/// [`ConversationSource`]: crate::ConversationSource
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
}

impl FetchError {
    /// Creates a new error of the given kind.
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Creates an error for a non-success HTTP status.
    #[inline]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Status,
            message: message.into(),
            status: Some(status),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code, if the server answered at all.
    #[inline]
    pub fn status_code(&self) -> Option<u16> {
        self.status
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => {
                write!(f, "{} ({status}): {}", self.kind, self.message)
            }
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl StdError for FetchError {}
