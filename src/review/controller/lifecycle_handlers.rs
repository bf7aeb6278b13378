//! Creation and deletion handlers.
//!
//! None of these handlers change the displayed list directly: a confirmed
//! mutation triggers a follow-up refresh, and a failed one leaves the list as
//! it was.

use std::sync::Arc;

use super::{RefreshOrigin, ReviewListController};
use crate::error::CatalogError;
use crate::review::command::{Cmd, bounded};
use crate::review::messages::ReviewMsg;
use crate::store::NewReview;
use crate::telemetry::TelemetryEvent;

const DELETE_REVIEW_PROMPT: &str = "Delete this review?";
const DELETE_PRODUCT_PROMPT: &str = "Delete this product?";

impl ReviewListController {
    /// Dispatches creation and deletion messages to their handlers.
    pub(super) fn handle_lifecycle_msg(&mut self, msg: &ReviewMsg) -> Option<Cmd> {
        match msg {
            ReviewMsg::SubmitReview { product_id, text } => {
                self.handle_submit_review(*product_id, text)
            }
            ReviewMsg::ReviewCreated {
                product_id,
                review_id,
            } => self.handle_review_created(*product_id, *review_id),
            ReviewMsg::CreateFailed(error) => {
                self.create_in_flight = false;
                self.record_failure("create_review", error.clone());
                None
            }
            ReviewMsg::DeleteReview { review_id } => self.handle_delete_review(*review_id),
            ReviewMsg::ReviewDeleted { review_id } => self.handle_review_deleted(*review_id),
            ReviewMsg::DeleteFailed { review_id, error } => {
                self.pending_review_deletes.remove(review_id);
                self.record_failure("delete_review", error.clone());
                None
            }
            ReviewMsg::DeleteProduct { product_id } => self.handle_delete_product(*product_id),
            ReviewMsg::ProductDeleted { product_id } => self.handle_product_deleted(*product_id),
            ReviewMsg::DeleteProductFailed { product_id, error } => {
                self.pending_product_deletes.remove(product_id);
                self.record_failure("delete_product", error.clone());
                None
            }
            _ => {
                // Caller filters to lifecycle messages.
                None
            }
        }
    }

    fn handle_submit_review(&mut self, product_id: Option<u64>, text: &str) -> Option<Cmd> {
        let review = match self.validate_submission(product_id, text) {
            Ok(review) => review,
            Err(error) => {
                self.record_failure("create_review", error);
                return None;
            }
        };

        self.create_in_flight = true;
        let store = Arc::clone(&self.store);
        let limit = self.request_timeout;

        Some(Box::pin(async move {
            let result = bounded("create_review", limit, store.create_review(&review)).await;
            Some(match result {
                Ok(review_id) => ReviewMsg::ReviewCreated {
                    product_id: review.product_id,
                    review_id,
                },
                Err(error) => ReviewMsg::CreateFailed(error),
            })
        }))
    }

    fn validate_submission(
        &self,
        product_id: Option<u64>,
        text: &str,
    ) -> Result<NewReview, CatalogError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::EmptyText);
        }
        let Some(id) = product_id else {
            return Err(CatalogError::MissingProductId);
        };
        if self.create_in_flight {
            return Err(CatalogError::RequestInFlight {
                operation: "create_review".to_owned(),
            });
        }
        Ok(NewReview {
            product_id: id,
            text: trimmed.to_owned(),
        })
    }

    fn handle_review_created(&mut self, product_id: u64, review_id: Option<u64>) -> Option<Cmd> {
        self.create_in_flight = false;
        self.products.insert(product_id);
        self.record_success(TelemetryEvent::ReviewCreated {
            product_id,
            review_id,
        });
        self.request_refresh(RefreshOrigin::FollowUp)
    }

    fn handle_delete_review(&mut self, review_id: u64) -> Option<Cmd> {
        if self.item(review_id).is_none() {
            self.record_failure("delete_review", CatalogError::UnknownReview { review_id });
            return None;
        }
        if self.pending_review_deletes.contains(&review_id) {
            self.record_failure(
                "delete_review",
                CatalogError::RequestInFlight {
                    operation: "delete_review".to_owned(),
                },
            );
            return None;
        }
        if !self.confirm.confirm(DELETE_REVIEW_PROMPT) {
            self.record_failure("delete_review", CatalogError::UserAborted);
            return None;
        }

        self.pending_review_deletes.insert(review_id);
        let store = Arc::clone(&self.store);
        let limit = self.request_timeout;

        Some(Box::pin(async move {
            let result = bounded("delete_review", limit, store.delete_review(review_id)).await;
            Some(match result {
                Ok(()) => ReviewMsg::ReviewDeleted { review_id },
                Err(error) => ReviewMsg::DeleteFailed { review_id, error },
            })
        }))
    }

    fn handle_review_deleted(&mut self, review_id: u64) -> Option<Cmd> {
        self.pending_review_deletes.remove(&review_id);
        self.record_success(TelemetryEvent::ReviewDeleted { review_id });
        self.request_refresh(RefreshOrigin::FollowUp)
    }

    fn handle_delete_product(&mut self, product_id: u64) -> Option<Cmd> {
        if self.pending_product_deletes.contains(&product_id) {
            self.record_failure(
                "delete_product",
                CatalogError::RequestInFlight {
                    operation: "delete_product".to_owned(),
                },
            );
            return None;
        }
        if !self.confirm.confirm(DELETE_PRODUCT_PROMPT) {
            self.record_failure("delete_product", CatalogError::UserAborted);
            return None;
        }

        self.pending_product_deletes.insert(product_id);
        let store = Arc::clone(&self.store);
        let limit = self.request_timeout;
        let query = self.query.clone();

        Some(Box::pin(async move {
            let result = bounded(
                "delete_product",
                limit,
                store.delete_product(product_id, &query),
            )
            .await;
            Some(match result {
                Ok(()) => ReviewMsg::ProductDeleted { product_id },
                Err(error) => ReviewMsg::DeleteProductFailed { product_id, error },
            })
        }))
    }

    fn handle_product_deleted(&mut self, product_id: u64) -> Option<Cmd> {
        self.pending_product_deletes.remove(&product_id);
        self.products.remove(&product_id);
        self.record_success(TelemetryEvent::ProductDeleted { product_id });
        self.request_refresh(RefreshOrigin::FollowUp)
    }
}
