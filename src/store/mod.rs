//! Remote store for products and reviews.
//!
//! The controller only talks to the store through the [`ReviewStore`] trait,
//! so tests can substitute a mock while [`HttpReviewStore`] issues the real
//! requests.

mod client;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod models;

pub use client::{HttpReviewStore, HttpReviewStoreConfig};
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryReviewStore;
pub use models::{NewReview, Review};

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::listing::ListingQuery;

/// Store that persists reviews and products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Creates a review and returns its identifier when the store reports it.
    async fn create_review(&self, review: &NewReview) -> Result<Option<u64>, CatalogError>;

    /// Replaces the text of an existing review.
    async fn update_review(&self, review_id: u64, text: &str) -> Result<(), CatalogError>;

    /// Deletes a review.
    async fn delete_review(&self, review_id: u64) -> Result<(), CatalogError>;

    /// Deletes a product, forwarding the listing query the user was on.
    async fn delete_product(
        &self,
        product_id: u64,
        query: &ListingQuery,
    ) -> Result<(), CatalogError>;

    /// Lists the reviews of a product, newest first.
    async fn list_reviews(&self, product_id: u64) -> Result<Vec<Review>, CatalogError>;
}
