//! Shared vocabulary for reading conversation data from a remote service.
//!
//! This crate defines the records returned by the conversation API, the
//! session a request is made on behalf of, and the [`ConversationSource`]
//! trait that every backend implements. It performs no I/O by itself.
//!
//! Backends report every failure as a [`FetchError`], so callers never see
//! transport- or codec-specific error types.

#![deny(missing_docs)]

mod error;
mod record;
mod session;
mod source;
mod timestamp;

pub use error::*;
pub use record::*;
pub use session::*;
pub use source::*;
pub use timestamp::*;
