//! PokeAPI access: transport, pagination cursor, and the caching client
//!
//! Every request goes through [`PokeClient::resolve`], which consults the
//! in-memory cache before touching the network. Paginated listings are driven
//! by a [`PaginationCursor`] that remembers the server's continuation links for
//! one resource kind at a time.

pub mod client;
pub mod pagination;
pub mod transport;

pub use client::PokeClient;
pub use pagination::{Navigation, PaginationCursor, ResourceKind};
pub use transport::{FetchError, HttpTransport, MockTransport, Transport};

use thiserror::Error;

/// Errors that can occur when fetching or navigating API resources
#[derive(Debug, Error)]
pub enum ApiError {
    /// The network call did not complete successfully
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    /// The response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    DecodeFailed(#[from] serde_json::Error),

    /// A resource name that is not a plain API identifier
    #[error("invalid name: '{0}'. Names may only contain letters, digits and '-'")]
    InvalidName(String),

    /// Backward navigation with no earlier page available
    #[error("no previous page: you're on the first page")]
    NoPreviousPage,

    /// Forward navigation after the server reported the last page
    #[error("no next page: you're on the last page")]
    NoNextPage,

    /// Navigation requested for a different kind than the one being browsed
    #[error("currently browsing {current}, not {requested}; start {requested} from its first page")]
    WrongNavigationContext {
        current: ResourceKind,
        requested: ResourceKind,
    },
}
