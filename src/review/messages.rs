//! Message types for the review list update loop.
//!
//! User intents and the results of remote commands share one enum, so the
//! controller sees every state change through
//! [`super::ReviewListController::handle_message`].

use crate::error::CatalogError;
use crate::store::Review;

/// Messages for the review list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewMsg {
    // Inline editing
    /// Open the inline editor for a review.
    StartEdit {
        /// Review to edit.
        review_id: u64,
    },
    /// Replace the draft of an open editor.
    UpdateDraft {
        /// Review being edited.
        review_id: u64,
        /// New draft text.
        text: String,
    },
    /// Send the draft to the remote store.
    SaveEdit {
        /// Review being edited.
        review_id: u64,
    },
    /// Discard the draft.
    CancelEdit {
        /// Review being edited.
        review_id: u64,
    },
    /// The remote store accepted an update.
    SaveCompleted {
        /// Updated review.
        review_id: u64,
        /// Edit session that sent the update.
        session: u64,
        /// Text the store accepted.
        text: String,
    },
    /// The remote store rejected an update.
    SaveFailed {
        /// Review whose update failed.
        review_id: u64,
        /// Edit session that sent the update.
        session: u64,
        /// Failure reported by the store.
        error: CatalogError,
    },

    // Creation
    /// Submit a new review for a product.
    SubmitReview {
        /// Product to attach the review to, when the form carries one.
        product_id: Option<u64>,
        /// Review text as typed.
        text: String,
    },
    /// The remote store created a review.
    ReviewCreated {
        /// Product the review was attached to.
        product_id: u64,
        /// Identifier reported by the store, if any.
        review_id: Option<u64>,
    },
    /// The remote store rejected a new review.
    CreateFailed(CatalogError),

    // Deletion
    /// Delete a review after confirmation.
    DeleteReview {
        /// Review to delete.
        review_id: u64,
    },
    /// The remote store deleted a review.
    ReviewDeleted {
        /// Deleted review.
        review_id: u64,
    },
    /// The remote store rejected a review deletion.
    DeleteFailed {
        /// Review that was kept.
        review_id: u64,
        /// Failure reported by the store.
        error: CatalogError,
    },
    /// Delete a product after confirmation.
    DeleteProduct {
        /// Product to delete.
        product_id: u64,
    },
    /// The remote store deleted a product.
    ProductDeleted {
        /// Deleted product.
        product_id: u64,
    },
    /// The remote store rejected a product deletion.
    DeleteProductFailed {
        /// Product that was kept.
        product_id: u64,
        /// Failure reported by the store.
        error: CatalogError,
    },

    // Data loading
    /// Reload every displayed review from the remote store.
    RefreshRequested,
    /// Refresh completed with the current reviews.
    RefreshComplete(Vec<Review>),
    /// Refresh failed.
    RefreshFailed(CatalogError),

    // Listing
    /// The "per page" selector changed.
    PerPageChanged(u32),
}
