//! Refresh and listing handlers.

use std::sync::Arc;
use std::time::Duration;

use super::ReviewListController;
use crate::error::CatalogError;
use crate::review::ReviewItem;
use crate::review::command::{Cmd, bounded};
use crate::review::messages::ReviewMsg;
use crate::store::{Review, ReviewStore};
use crate::telemetry::TelemetryEvent;

/// Why a refresh was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RefreshOrigin {
    /// The user or host asked for the list to be reloaded.
    Requested,
    /// A confirmed creation or deletion changed the list.
    FollowUp,
}

impl RefreshOrigin {
    /// Combines two queued refreshes; a requested one takes precedence.
    const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::FollowUp, Self::FollowUp) => Self::FollowUp,
            _ => Self::Requested,
        }
    }
}

impl ReviewListController {
    /// Dispatches data loading and listing messages to their handlers.
    pub(super) fn handle_data_msg(&mut self, msg: &ReviewMsg) -> Option<Cmd> {
        match msg {
            ReviewMsg::RefreshRequested => self.request_refresh(RefreshOrigin::Requested),
            ReviewMsg::RefreshComplete(reviews) => self.handle_refresh_complete(reviews),
            ReviewMsg::RefreshFailed(error) => self.handle_refresh_failed(error),
            ReviewMsg::PerPageChanged(per_page) => {
                self.handle_per_page_changed(*per_page);
                None
            }
            _ => {
                // Caller filters to data messages.
                None
            }
        }
    }

    /// Starts a refresh, or queues one behind the refresh already running.
    pub(super) fn request_refresh(&mut self, origin: RefreshOrigin) -> Option<Cmd> {
        if self.refresh_in_flight.is_some() {
            tracing::debug!("refresh already running; queueing another");
            self.refresh_queued = Some(
                self.refresh_queued
                    .map_or(origin, |queued| queued.merge(origin)),
            );
            return None;
        }

        self.refresh_in_flight = Some(origin);
        self.refresh_queued = None;
        let store = Arc::clone(&self.store);
        let products: Vec<u64> = self.products.iter().copied().collect();
        let limit = self.request_timeout;

        Some(Box::pin(async move {
            Some(match fetch_reviews(store.as_ref(), &products, limit).await {
                Ok(reviews) => ReviewMsg::RefreshComplete(reviews),
                Err(error) => ReviewMsg::RefreshFailed(error),
            })
        }))
    }

    /// Replaces every item with the refreshed reviews.
    ///
    /// Open edit sessions are dropped: the list now reflects the store.
    fn handle_refresh_complete(&mut self, reviews: &[Review]) -> Option<Cmd> {
        self.refresh_in_flight = None;
        self.last_refresh_error = None;
        self.items = reviews.iter().cloned().map(ReviewItem::new).collect();
        self.record_success(TelemetryEvent::RefreshCompleted {
            review_count: self.items.len(),
        });
        self.run_queued_refresh()
    }

    /// Keeps the current items after a failed refresh.
    ///
    /// Only a requested refresh reports through [`Self::last_error`]; a
    /// follow-up refresh must not turn the mutation before it into a failure.
    fn handle_refresh_failed(&mut self, error: &CatalogError) -> Option<Cmd> {
        let origin = self.refresh_in_flight.take();
        self.last_refresh_error = Some(error.clone());
        if origin == Some(RefreshOrigin::FollowUp) {
            tracing::debug!("follow-up refresh failed; keeping the mutation outcome");
            self.report_failure("list_reviews", error);
        } else {
            self.record_failure("list_reviews", error.clone());
        }
        self.run_queued_refresh()
    }

    fn run_queued_refresh(&mut self) -> Option<Cmd> {
        self.refresh_queued
            .take()
            .and_then(|origin| self.request_refresh(origin))
    }

    fn handle_per_page_changed(&mut self, per_page: u32) {
        match self.query.with_per_page(per_page) {
            Ok(query) => {
                self.navigator.submit(&query);
                self.query = query;
            }
            Err(error) => self.record_failure("per_page", error),
        }
    }
}

async fn fetch_reviews(
    store: &dyn ReviewStore,
    products: &[u64],
    limit: Duration,
) -> Result<Vec<Review>, CatalogError> {
    let mut reviews = Vec::new();
    for product_id in products {
        let listed = bounded("list_reviews", limit, store.list_reviews(*product_id)).await?;
        reviews.extend(listed);
    }
    Ok(reviews)
}
