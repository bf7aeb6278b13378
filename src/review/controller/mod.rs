//! Review list controller.
//!
//! The controller follows a message/command loop: [`handle_message`] applies
//! a [`ReviewMsg`] to local state and may return a [`Cmd`] that performs one
//! remote call and resolves to the follow-up message. Local state is only
//! changed when a message is handled, never while a command runs.
//!
//! Mutations are confirmed before they are shown. Creation and deletion wait
//! for the store and then refresh the list; an update swaps the item's text
//! once the store accepts it. Failures leave state as it was and are recorded
//! in [`ReviewListController::last_error`]. A follow-up refresh that fails
//! after a confirmed mutation does not undo that mutation's outcome: it is
//! kept in [`ReviewListController::last_refresh_error`] instead.
//!
//! [`handle_message`]: ReviewListController::handle_message

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use super::command::Cmd;
use super::confirm::Confirm;
use super::messages::ReviewMsg;
use super::{ReviewEditSession, ReviewItem};
use crate::error::{CatalogError, ErrorKind};
use crate::listing::{ListingNavigator, ListingQuery, NoopListingNavigator};
use crate::store::{Review, ReviewStore};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

mod edit_handlers;
mod lifecycle_handlers;
mod refresh_handlers;

use refresh_handlers::RefreshOrigin;

/// Default bound on every remote call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the displayed reviews and drives them against a [`ReviewStore`].
pub struct ReviewListController {
    store: Arc<dyn ReviewStore>,
    confirm: Arc<dyn Confirm>,
    telemetry: Arc<dyn TelemetrySink>,
    navigator: Arc<dyn ListingNavigator>,
    items: Vec<ReviewItem>,
    products: BTreeSet<u64>,
    query: ListingQuery,
    request_timeout: Duration,
    create_in_flight: bool,
    pending_review_deletes: BTreeSet<u64>,
    pending_product_deletes: BTreeSet<u64>,
    refresh_in_flight: Option<RefreshOrigin>,
    refresh_queued: Option<RefreshOrigin>,
    edit_sessions: u64,
    last_error: Option<CatalogError>,
    last_refresh_error: Option<CatalogError>,
}

impl std::fmt::Debug for ReviewListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewListController")
            .field("items", &self.items)
            .field("products", &self.products)
            .field("query", &self.query)
            .field("request_timeout", &self.request_timeout)
            .field("last_error", &self.last_error)
            .field("last_refresh_error", &self.last_refresh_error)
            .finish_non_exhaustive()
    }
}

impl ReviewListController {
    /// Creates a controller with no reviews displayed.
    #[must_use]
    pub fn new(store: Arc<dyn ReviewStore>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            store,
            confirm,
            telemetry: Arc::new(NoopTelemetrySink),
            navigator: Arc::new(NoopListingNavigator),
            items: Vec::new(),
            products: BTreeSet::new(),
            query: ListingQuery::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            create_in_flight: false,
            pending_review_deletes: BTreeSet::new(),
            pending_product_deletes: BTreeSet::new(),
            refresh_in_flight: None,
            refresh_queued: None,
            edit_sessions: 0,
            last_error: None,
            last_refresh_error: None,
        }
    }

    /// Sets the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Sets the collaborator that resubmits the listing.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn ListingNavigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Sets the listing query the page was loaded with.
    #[must_use]
    pub fn with_query(mut self, query: ListingQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the bound on every remote call.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Registers products whose reviews are refreshed.
    #[must_use]
    pub fn with_products(mut self, products: impl IntoIterator<Item = u64>) -> Self {
        self.products.extend(products);
        self
    }

    /// Displays reviews loaded with the page and registers their products.
    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.products
            .extend(reviews.iter().map(|review| review.product_id));
        self.items = reviews.into_iter().map(ReviewItem::new).collect();
        self
    }

    /// Returns the displayed reviews in display order.
    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Returns the displayed review with `review_id`.
    #[must_use]
    pub fn item(&self, review_id: u64) -> Option<&ReviewItem> {
        self.items.iter().find(|item| item.id() == review_id)
    }

    /// Returns the products whose reviews are refreshed.
    #[must_use]
    pub const fn products(&self) -> &BTreeSet<u64> {
        &self.products
    }

    /// Returns the current listing query.
    #[must_use]
    pub const fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Returns the most recent failure, cleared by the next success.
    #[must_use]
    pub const fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    /// Returns the failure of the most recent refresh, cleared by the next
    /// successful one.
    ///
    /// Unlike [`Self::last_error`] this also covers the refresh that follows a
    /// confirmed creation or deletion.
    #[must_use]
    pub const fn last_refresh_error(&self) -> Option<&CatalogError> {
        self.last_refresh_error.as_ref()
    }

    /// Returns whether any remote call is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.create_in_flight
            || self.refresh_in_flight.is_some()
            || !self.pending_review_deletes.is_empty()
            || !self.pending_product_deletes.is_empty()
            || self
                .items
                .iter()
                .filter_map(ReviewItem::session)
                .any(ReviewEditSession::is_saving)
    }

    /// Applies `msg` and returns the remote call to run next, if any.
    ///
    /// Errors never escape this method; they are logged and kept in
    /// [`Self::last_error`].
    pub fn handle_message(&mut self, msg: &ReviewMsg) -> Option<Cmd> {
        match msg {
            ReviewMsg::StartEdit { .. }
            | ReviewMsg::UpdateDraft { .. }
            | ReviewMsg::SaveEdit { .. }
            | ReviewMsg::CancelEdit { .. }
            | ReviewMsg::SaveCompleted { .. }
            | ReviewMsg::SaveFailed { .. } => self.handle_edit_msg(msg),
            ReviewMsg::SubmitReview { .. }
            | ReviewMsg::ReviewCreated { .. }
            | ReviewMsg::CreateFailed(_)
            | ReviewMsg::DeleteReview { .. }
            | ReviewMsg::ReviewDeleted { .. }
            | ReviewMsg::DeleteFailed { .. }
            | ReviewMsg::DeleteProduct { .. }
            | ReviewMsg::ProductDeleted { .. }
            | ReviewMsg::DeleteProductFailed { .. } => self.handle_lifecycle_msg(msg),
            ReviewMsg::RefreshRequested
            | ReviewMsg::RefreshComplete(_)
            | ReviewMsg::RefreshFailed(_)
            | ReviewMsg::PerPageChanged(_) => self.handle_data_msg(msg),
        }
    }

    fn item_mut(&mut self, review_id: u64) -> Result<&mut ReviewItem, CatalogError> {
        self.items
            .iter_mut()
            .find(|item| item.id() == review_id)
            .ok_or(CatalogError::UnknownReview { review_id })
    }

    /// Records a failure without changing any other state.
    fn record_failure(&mut self, operation: &str, error: CatalogError) {
        self.report_failure(operation, &error);
        self.last_error = Some(error);
    }

    /// Logs a failure and reports remote ones to telemetry.
    fn report_failure(&self, operation: &str, error: &CatalogError) {
        match error.kind() {
            ErrorKind::Validation | ErrorKind::Local => {
                tracing::warn!(operation, %error, "ignored review action");
            }
            ErrorKind::UserAborted => {
                tracing::debug!(operation, "user declined confirmation");
            }
            ErrorKind::RemoteRejected | ErrorKind::Transport => {
                tracing::warn!(operation, %error, "remote store call failed");
                self.telemetry.record(TelemetryEvent::RemoteRejected {
                    operation: operation.to_owned(),
                    status: error.status(),
                });
            }
        }
    }

    fn record_success(&mut self, event: TelemetryEvent) {
        self.telemetry.record(event);
        self.last_error = None;
    }
}
