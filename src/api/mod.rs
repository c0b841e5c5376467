//! Remote entity search and events feed.

mod client;
mod search;
mod types;

pub use client::ApiClient;
pub use search::{SearchSequencer, SearchTicket, prepare_query};
pub use types::{AcquisitionInfo, EntitySearchResult, RelatedEvent, SearchRequest};
