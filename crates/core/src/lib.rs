//! Core logic turning conversation data into recency-sorted summaries.
//!
//! The entry point is [`SummaryAggregator`], which reads from any
//! [`ConversationSource`](inbox_model::ConversationSource). The building
//! blocks it is made of are exported as well, so that callers holding data
//! from elsewhere can format and sort summaries themselves.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod aggregator;
mod latest;
mod lookup;
mod sort;
pub mod summary;

pub use aggregator::{FailurePolicy, SummaryAggregator, SummaryAggregatorBuilder};
pub use latest::{fetch_latest_message, latest_message};
pub use lookup::AvatarLookup;
pub use sort::sort_summaries;
pub use summary::{ConversationSummary, format_summary};
