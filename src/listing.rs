//! Listing query state for paginated product and review pages.
//!
//! The listing page is a server-rendered form with a search term, a page
//! number, and a "per page" selector. Changing the selector resubmits the
//! form; deleting a product forwards the current query so the server can
//! send the user back to the same page.

use serde::{Deserialize, Serialize};
use crate::error::CatalogError;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 5;

/// Page, page size, and search term of a listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    page: u32,
    per_page: u32,
    q: String,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            q: String::new(),
        }
    }
}

impl ListingQuery {
    /// Creates a validated listing query.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidQuery`] when `page` or `per_page` is
    /// zero.
    pub fn new(page: u32, per_page: u32, q: impl Into<String>) -> Result<Self, CatalogError> {
        if page == 0 {
            return Err(CatalogError::InvalidQuery {
                message: "page must be at least 1".to_owned(),
            });
        }
        if per_page == 0 {
            return Err(CatalogError::InvalidQuery {
                message: "per_page must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            page,
            per_page,
            q: q.into(),
        })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.q
    }

    /// Returns the query to submit after the "per page" selector changed.
    ///
    /// The search term is kept and the page resets to the first one, since
    /// the listing form does not carry the page number.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidQuery`] when `per_page` is zero.
    pub fn with_per_page(&self, per_page: u32) -> Result<Self, CatalogError> {
        Self::new(DEFAULT_PAGE, per_page, self.q.clone())
    }

    /// Returns the query parameters in submission order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("q", self.q.clone()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Host collaborator that resubmits the listing form.
pub trait ListingNavigator: Send + Sync {
    /// Navigates to the listing described by `query`.
    fn submit(&self, query: &ListingQuery);
}

/// Navigator for hosts without a listing view.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListingNavigator;

impl ListingNavigator for NoopListingNavigator {
    fn submit(&self, _query: &ListingQuery) {}
}
