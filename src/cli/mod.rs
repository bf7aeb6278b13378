//! CLI operation mode handlers.
//!
//! This module contains the handlers for each operation mode:
//! - [`logs`]: Render a log export as a sorted, filtered table
//! - [`reviews`]: Add, edit, or delete a single review
//! - [`products`]: Delete a product while keeping the listing position
//!
//! Handlers share [`build_controller`], which wires the HTTP store, the
//! confirmation prompt, and telemetry from configuration.

pub mod logs;
pub mod output;
pub mod products;
pub mod prompt;
pub mod reviews;

use std::sync::Arc;

use vitrine::{
    AlwaysConfirm, CatalogError, Confirm, HttpReviewStore, HttpReviewStoreConfig,
    NoopTelemetrySink, ReviewListController, StderrJsonlTelemetrySink, TelemetrySink,
    VitrineConfig,
};

use prompt::StdinConfirm;

/// Builds a review controller backed by the configured catalog service.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidUrl`] for a malformed base URL, or
/// [`CatalogError::InvalidQuery`] for an out-of-range listing query.
pub fn build_controller(config: &VitrineConfig) -> Result<ReviewListController, CatalogError> {
    let store_config = HttpReviewStoreConfig::new(&config.base_url, config.request_timeout())?
        .with_reviews_path(config.reviews_path.as_str());
    let store = HttpReviewStore::new(store_config)?;

    let confirm: Arc<dyn Confirm> = if config.assume_yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinConfirm)
    };
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };

    Ok(ReviewListController::new(Arc::new(store), confirm)
        .with_telemetry(telemetry)
        .with_query(config.listing_query()?)
        .with_request_timeout(config.request_timeout())
        .with_products(config.product_id))
}

/// Surfaces the controller's last recorded failure as an error.
///
/// # Errors
///
/// Returns a clone of [`ReviewListController::last_error`] when set.
pub fn outcome(controller: &ReviewListController) -> Result<(), CatalogError> {
    controller.last_error().cloned().map_or(Ok(()), Err)
}
