//! Commands returned by the controller and the loop that runs them.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::{ReviewListController, ReviewMsg};
use crate::error::CatalogError;

/// A pending remote call that resolves to the next message, if any.
pub type Cmd = Pin<Box<dyn Future<Output = Option<ReviewMsg>> + Send>>;

/// Feeds `msg` to the controller and keeps running the resulting commands
/// until the controller is idle.
pub async fn dispatch(controller: &mut ReviewListController, msg: ReviewMsg) {
    let mut next = Some(msg);

    while let Some(current) = next.take() {
        if let Some(cmd) = controller.handle_message(&current) {
            next = cmd.await;
        }
    }
}

/// Runs `request`, failing with [`CatalogError::Timeout`] once `limit`
/// elapses.
pub(crate) async fn bounded<T>(
    operation: &str,
    limit: Duration,
    request: impl Future<Output = Result<T, CatalogError>> + Send,
) -> Result<T, CatalogError> {
    tokio::time::timeout(limit, request)
        .await
        .map_err(|_elapsed| CatalogError::Timeout {
            operation: operation.to_owned(),
            seconds: limit.as_secs(),
        })?
}
