//! Product deletion operation.

use std::io;

use vitrine::{CatalogError, ReviewMsg, VitrineConfig, dispatch};

use super::output::write_status;
use super::{build_controller, outcome};

/// Deletes the configured product after confirmation.
///
/// The listing page, page size, and search term are sent along so the
/// catalog service can return the user to the same page.
///
/// # Errors
///
/// Returns [`CatalogError::MissingProductId`] when no product is configured,
/// [`CatalogError::UserAborted`] when the prompt is declined, or the remote
/// store's failure.
pub async fn delete(config: &VitrineConfig) -> Result<(), CatalogError> {
    let product_id = config.require_product_id()?;
    let mut controller = build_controller(config)?;

    dispatch(&mut controller, ReviewMsg::DeleteProduct { product_id }).await;
    outcome(&controller)?;

    write_status(
        &mut io::stdout().lock(),
        &format!("Deleted product {product_id}."),
    )
}
