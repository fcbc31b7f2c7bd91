//! An out-of-the-box client that summarizes the conversations of a user.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to bring conversation summaries into your own apps.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod client;

pub use client::{InboxClient, InboxClientBuilder};
pub use inbox_core::FailurePolicy;
pub use inbox_model::{ErrorKind, FetchError, Session};

/// Re-exports of [`inbox_core`] crate.
pub mod core {
    pub use inbox_core::*;
}

/// Re-exports of [`inbox_model`] crate.
pub mod model {
    pub use inbox_model::*;
}
