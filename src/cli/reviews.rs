//! Review operations: add, edit, and delete a single review.
//!
//! Each operation drives the same [`ReviewListController`] messages the
//! inline interface sends, so validation, confirmation, and timeouts behave
//! identically. The resulting review list is printed on success.
//!
//! Edit and delete need the service's review listing to find the review.
//! Adding does not: when the refresh after a submission fails, the
//! submission still succeeds and a status line replaces the list.

use std::io::{self, Write};

use tracing::warn;
use vitrine::{CatalogError, ReviewListController, ReviewMsg, VitrineConfig, dispatch};

use super::output::{io_error, write_reviews, write_status};
use super::{build_controller, outcome};

/// Submits a new review for the configured product.
///
/// # Errors
///
/// Returns [`CatalogError::MissingProductId`] or [`CatalogError::EmptyText`]
/// for an invalid submission, or the remote store's failure.
pub async fn add(config: &VitrineConfig) -> Result<(), CatalogError> {
    let text = config.require_review_text()?.to_owned();
    let mut controller = build_controller(config)?;

    dispatch(
        &mut controller,
        ReviewMsg::SubmitReview {
            product_id: config.product_id,
            text,
        },
    )
    .await;
    outcome(&controller)?;

    print_reviews(&controller, "Review submitted.")
}

/// Replaces the text of a displayed review.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownReview`] when the review is not listed for
/// the product, [`CatalogError::EmptyText`] for blank text, or the remote
/// store's failure.
pub async fn edit(config: &VitrineConfig) -> Result<(), CatalogError> {
    let review_id = config.require_review_id()?;
    let text = config.require_review_text()?.to_owned();
    let mut controller = load_reviews(config).await?;

    for msg in [
        ReviewMsg::StartEdit { review_id },
        ReviewMsg::UpdateDraft { review_id, text },
        ReviewMsg::SaveEdit { review_id },
    ] {
        dispatch(&mut controller, msg).await;
        outcome(&controller)?;
    }

    print_reviews(&controller, "Review updated.")
}

/// Deletes a displayed review after confirmation.
///
/// # Errors
///
/// Returns [`CatalogError::UserAborted`] when the prompt is declined,
/// [`CatalogError::UnknownReview`] when the review is not listed, or the
/// remote store's failure.
pub async fn delete(config: &VitrineConfig) -> Result<(), CatalogError> {
    let review_id = config.require_review_id()?;
    let mut controller = load_reviews(config).await?;

    dispatch(&mut controller, ReviewMsg::DeleteReview { review_id }).await;
    outcome(&controller)?;

    print_reviews(&controller, "Review deleted.")
}

async fn load_reviews(config: &VitrineConfig) -> Result<ReviewListController, CatalogError> {
    config.require_product_id()?;
    let mut controller = build_controller(config)?;

    dispatch(&mut controller, ReviewMsg::RefreshRequested).await;
    outcome(&controller)?;
    Ok(controller)
}

/// Prints the refreshed list, or `done` when the list could not be reloaded.
fn print_reviews(controller: &ReviewListController, done: &str) -> Result<(), CatalogError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Some(error) = controller.last_refresh_error() {
        warn!(%error, "review list could not be refreshed");
        write_status(&mut handle, done)?;
    } else {
        write_reviews(&mut handle, controller.items())?;
    }
    handle.flush().map_err(|error| io_error(&error))
}
