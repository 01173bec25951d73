//! Pagination cursor for browsing listing endpoints
//!
//! The cursor tracks one resource kind at a time. Moving forward or backward
//! uses the continuation links the server sent with the last page, verbatim;
//! they are never rebuilt from offsets.

use std::fmt;

use tracing::trace;

use super::ApiError;
use crate::data::Page;

/// A paginated listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    LocationArea,
    Pokemon,
}

impl ResourceKind {
    /// Path segment of the listing under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::LocationArea => "location-area",
            ResourceKind::Pokemon => "pokemon",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Which page to fetch relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    First,
    Next,
    Previous,
}

/// What the cursor currently knows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing has been fetched yet
    #[default]
    Unset,
    /// The last successful page fetch for `kind`
    AtPage {
        kind: ResourceKind,
        next: Option<String>,
        previous: Option<String>,
    },
}

/// Forward/backward continuation state for the listing being browsed
#[derive(Debug, Clone)]
pub struct PaginationCursor {
    base_url: String,
    page_size: u32,
    state: CursorState,
}

impl PaginationCursor {
    /// Creates an unset cursor for listings under `base_url`
    pub fn new(base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            base_url: base_url.into(),
            page_size,
            state: CursorState::Unset,
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// The fixed starting URL for `kind`, independent of cursor state
    pub fn first_page_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/{}?offset=0&limit={}",
            self.base_url,
            kind.path(),
            self.page_size
        )
    }

    /// Picks the URL to fetch for `navigation` on `kind`
    ///
    /// # Errors
    /// * `WrongNavigationContext` - moving next/previous while another kind is tracked
    /// * `NoNextPage` - moving next after the server reported the last page
    /// * `NoPreviousPage` - moving back from the first page, or before any page was fetched
    ///
    /// From an unset cursor, `Next` starts at the first page.
    pub fn resolve(&self, kind: ResourceKind, navigation: Navigation) -> Result<String, ApiError> {
        let url = match (navigation, &self.state) {
            (Navigation::First, _) => self.first_page_url(kind),
            (Navigation::Next, CursorState::Unset) => self.first_page_url(kind),
            (Navigation::Previous, CursorState::Unset) => return Err(ApiError::NoPreviousPage),
            (_, CursorState::AtPage { kind: current, .. }) if *current != kind => {
                return Err(ApiError::WrongNavigationContext {
                    current: *current,
                    requested: kind,
                });
            }
            (Navigation::Next, CursorState::AtPage { next, .. }) => {
                next.clone().ok_or(ApiError::NoNextPage)?
            }
            (Navigation::Previous, CursorState::AtPage { previous, .. }) => {
                previous.clone().ok_or(ApiError::NoPreviousPage)?
            }
        };
        trace!(%kind, ?navigation, url = %url, "cursor resolved");
        Ok(url)
    }

    /// Records the links of a successfully fetched page of `kind`
    pub fn advance(&mut self, kind: ResourceKind, page: &Page) {
        self.state = CursorState::AtPage {
            kind,
            next: page.next.clone(),
            previous: page.previous.clone(),
        };
        trace!(state = ?self.state, "cursor advanced");
    }
}
