//! In-memory review store for tests and demos.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{NewReview, Review, ReviewStore};
use crate::error::CatalogError;
use crate::listing::ListingQuery;

#[derive(Debug, Default)]
struct MemoryState {
    reviews: BTreeMap<u64, Review>,
    products: BTreeSet<u64>,
    next_id: u64,
    rejection_status: Option<u16>,
    calls: BTreeMap<&'static str, usize>,
    product_deletions: Vec<(u64, ListingQuery)>,
}

/// Review store that keeps everything in a mutex-guarded map.
///
/// Every call is counted per operation, and [`Self::reject_with`] makes all
/// subsequent calls fail with a [`CatalogError::RemoteRejected`] until
/// [`Self::accept`] is called.
#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    state: Mutex<MemoryState>,
}

impl InMemoryReviewStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product without reviews.
    pub fn add_product(&self, product_id: u64) {
        self.lock().products.insert(product_id);
    }

    /// Seeds a review and returns its identifier.
    pub fn seed_review(&self, product_id: u64, text: &str) -> u64 {
        let mut state = self.lock();
        insert_review(&mut state, product_id, text.to_owned())
    }

    /// Makes every following call fail with `status`.
    pub fn reject_with(&self, status: u16) {
        self.lock().rejection_status = Some(status);
    }

    /// Clears a rejection installed by [`Self::reject_with`].
    pub fn accept(&self) {
        self.lock().rejection_status = None;
    }

    /// Returns how many times `operation` was called.
    #[must_use]
    pub fn calls(&self, operation: &str) -> usize {
        self.lock().calls.get(operation).copied().unwrap_or(0)
    }

    /// Returns the stored review with `review_id`.
    #[must_use]
    pub fn review(&self, review_id: u64) -> Option<Review> {
        self.lock().reviews.get(&review_id).cloned()
    }

    /// Returns whether `product_id` is still stored.
    #[must_use]
    pub fn has_product(&self, product_id: u64) -> bool {
        self.lock().products.contains(&product_id)
    }

    /// Returns the stored product identifiers in ascending order.
    #[must_use]
    pub fn product_ids(&self) -> Vec<u64> {
        self.lock().products.iter().copied().collect()
    }

    /// Returns every product deletion with the query it carried.
    #[must_use]
    pub fn product_deletions(&self) -> Vec<(u64, ListingQuery)> {
        self.lock().product_deletions.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn begin(&self, operation: &'static str) -> Result<MutexGuard<'_, MemoryState>, CatalogError> {
        let mut state = self.lock();
        let count = state.calls.entry(operation).or_insert(0);
        *count = count.saturating_add(1);
        if let Some(status) = state.rejection_status {
            return Err(CatalogError::RemoteRejected {
                operation: operation.to_owned(),
                status,
                message: "rejected by in-memory store".to_owned(),
            });
        }
        Ok(state)
    }
}

fn insert_review(state: &mut MemoryState, product_id: u64, text: String) -> u64 {
    state.next_id = state.next_id.saturating_add(1);
    let id = state.next_id;
    state.products.insert(product_id);
    state.reviews.insert(
        id,
        Review {
            id,
            text,
            product_id,
        },
    );
    id
}

fn not_found(operation: &str, what: &str) -> CatalogError {
    CatalogError::RemoteRejected {
        operation: operation.to_owned(),
        status: 404,
        message: format!("{what} does not exist"),
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn create_review(&self, review: &NewReview) -> Result<Option<u64>, CatalogError> {
        let mut state = self.begin("create_review")?;
        if !state.products.contains(&review.product_id) {
            return Err(not_found("create_review", "product"));
        }
        Ok(Some(insert_review(
            &mut state,
            review.product_id,
            review.text.clone(),
        )))
    }

    async fn update_review(&self, review_id: u64, text: &str) -> Result<(), CatalogError> {
        let mut state = self.begin("update_review")?;
        let review = state
            .reviews
            .get_mut(&review_id)
            .ok_or_else(|| not_found("update_review", "review"))?;
        text.clone_into(&mut review.text);
        Ok(())
    }

    async fn delete_review(&self, review_id: u64) -> Result<(), CatalogError> {
        let mut state = self.begin("delete_review")?;
        state
            .reviews
            .remove(&review_id)
            .map(drop)
            .ok_or_else(|| not_found("delete_review", "review"))
    }

    async fn delete_product(
        &self,
        product_id: u64,
        query: &ListingQuery,
    ) -> Result<(), CatalogError> {
        let mut state = self.begin("delete_product")?;
        if !state.products.remove(&product_id) {
            return Err(not_found("delete_product", "product"));
        }
        state
            .reviews
            .retain(|_, review| review.product_id != product_id);
        state.product_deletions.push((product_id, query.clone()));
        Ok(())
    }

    async fn list_reviews(&self, product_id: u64) -> Result<Vec<Review>, CatalogError> {
        let state = self.begin("list_reviews")?;
        Ok(state
            .reviews
            .values()
            .rev()
            .filter(|review| review.product_id == product_id)
            .cloned()
            .collect())
    }
}
