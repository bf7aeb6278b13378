//! Scenario state and controller wiring for product deletion BDD tests.

use std::sync::Arc;
use std::time::Duration;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use vitrine::listing::ListingQuery;
use vitrine::{
    AlwaysConfirm, HttpReviewStore, HttpReviewStoreConfig, ReviewListController, ReviewMsg,
    dispatch,
};
use wiremock::MockServer;

use super::runtime::{SharedRuntime, ensure_runtime};

/// Result type returned by fallible steps.
pub(crate) type StepResult = Result<(), Box<dyn std::error::Error>>;

/// State shared across steps in a product deletion scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct DeletionState {
    /// Runtime driving the mock server and controller commands.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock catalog service.
    pub(crate) server: Slot<MockServer>,
    /// Listing position the user is on.
    pub(crate) query: Slot<ListingQuery>,
    /// The controller under test.
    pub(crate) controller: Slot<ReviewListController>,
}

impl DeletionState {
    /// Starts the mock catalog service unless it is already running.
    pub(crate) fn start_server(&self) -> Result<SharedRuntime, Box<dyn std::error::Error>> {
        let runtime = ensure_runtime(&self.runtime)?;
        if self.server.with_ref(|_| ()).is_none() {
            self.server.set(runtime.block_on(MockServer::start()));
        }
        Ok(runtime)
    }

    /// Builds a controller talking to the mock catalog service.
    pub(crate) fn build_controller(
        &self,
        product_id: u64,
    ) -> Result<ReviewListController, Box<dyn std::error::Error>> {
        let base_url = self
            .server
            .with_ref(MockServer::uri)
            .ok_or("mock server should be started")?;
        let config = HttpReviewStoreConfig::new(&base_url, Duration::from_secs(5))?;
        let store = HttpReviewStore::new(config)?;
        let query = self.query.get().unwrap_or_default();

        Ok(
            ReviewListController::new(Arc::new(store), Arc::new(AlwaysConfirm))
                .with_query(query)
                .with_products([product_id]),
        )
    }

    /// Feeds `msg` to the controller and runs every resulting command.
    pub(crate) fn send(&self, msg: ReviewMsg) -> StepResult {
        let runtime = ensure_runtime(&self.runtime)?;
        self.controller
            .with_mut(|controller| runtime.block_on(dispatch(controller, msg)))
            .ok_or("controller should be initialised before sending messages")?;
        Ok(())
    }
}
