//! Upstream status retrieval.
//!
//! Fetches the public status summary and normalizes it into the small
//! state enum the rest of the bot works with.

mod fetcher;
mod snapshot;

pub use fetcher::{DEFAULT_USER_AGENT, FetchError, STATUS_URL, StatusPageClient, StatusSource};
pub use snapshot::{ServiceState, StatusSnapshot};
