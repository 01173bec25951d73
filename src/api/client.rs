//! Cache-first PokeAPI client
//!
//! Resolves request URLs against the expiring cache before falling back to the
//! transport, and decodes the raw bodies into domain types.

use std::time::Duration;

use tracing::debug;

use super::{
    ApiError, FetchError, HttpTransport, Navigation, PaginationCursor, ResourceKind, Transport,
};
use crate::cache::ExpiringCache;
use crate::data::{LocationArea, Page, Pokemon};

/// Default base URL of the API
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client for the PokeAPI with an in-memory response cache
///
/// Generic over the transport so tests can swap in a [`super::MockTransport`].
#[derive(Debug)]
pub struct PokeClient<T: Transport = HttpTransport> {
    transport: T,
    cache: ExpiringCache,
    base_url: String,
}

impl<T: Transport> PokeClient<T> {
    /// Creates a client whose cache entries live for `cache_ttl`
    ///
    /// Must be called from within a Tokio runtime (the cache spawns its sweep task).
    pub fn new(transport: T, base_url: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            transport,
            cache: ExpiringCache::new(cache_ttl),
            base_url: base_url.into(),
        }
    }

    pub fn cache(&self) -> &ExpiringCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the body for `url`, from cache when present
    ///
    /// On a miss the body is fetched and cached before being returned. A failed
    /// fetch leaves the cache untouched.
    pub async fn resolve(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(body) = self.cache.get(url) {
            return Ok(body);
        }

        let body = self.transport.get(url).await?;
        debug!(url, bytes = body.len(), "fetched");
        self.cache.put(url, body.clone());
        Ok(body)
    }

    /// Fetches the page `navigation` points at and moves the cursor onto it
    ///
    /// The cursor is only updated once the page has been fetched and decoded.
    pub async fn fetch_page(
        &self,
        cursor: &mut PaginationCursor,
        kind: ResourceKind,
        navigation: Navigation,
    ) -> Result<Page, ApiError> {
        let url = cursor.resolve(kind, navigation)?;
        let body = self.resolve(&url).await?;
        let page = Page::from_json(&body)?;
        cursor.advance(kind, &page);
        Ok(page)
    }

    /// Builds the detail URL for `name` under `path`
    ///
    /// Names are restricted to ASCII letters, digits and `-` so user input can
    /// never add path segments, queries or fragments.
    fn detail_url(&self, path: &str, name: &str) -> Result<String, ApiError> {
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ApiError::InvalidName(name.to_string()));
        }
        Ok(format!("{}/{}/{}", self.base_url, path, name))
    }

    /// Fetches a location area with its Pokémon encounters
    pub async fn location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        let url = self.detail_url("location-area", name)?;
        let body = self.resolve(&url).await?;
        Ok(LocationArea::from_json(&body)?)
    }

    /// Fetches a Pokémon's details
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        let url = self.detail_url("pokemon", name)?;
        let body = self.resolve(&url).await?;
        Ok(Pokemon::from_json(&body)?)
    }
}
