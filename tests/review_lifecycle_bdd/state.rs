//! Scenario state for inline review lifecycle BDD tests.

use std::sync::Arc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use vitrine::review::test_support::ScriptedConfirm;
use vitrine::store::InMemoryReviewStore;
use vitrine::telemetry::test_support::RecordingTelemetrySink;
use vitrine::{ReviewListController, ReviewMsg, dispatch};

use super::runtime::{SharedRuntime, ensure_runtime};

/// Result type returned by fallible steps.
pub(crate) type StepResult = Result<(), Box<dyn std::error::Error>>;

/// State shared across steps in a review lifecycle scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct LifecycleState {
    /// Runtime driving controller commands.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Store backing the controller.
    pub(crate) store: Slot<Arc<InMemoryReviewStore>>,
    /// Scripted answers to confirmation prompts.
    pub(crate) confirm: Slot<Arc<ScriptedConfirm>>,
    /// Recording telemetry sink for capturing events.
    pub(crate) telemetry: Slot<Arc<RecordingTelemetrySink>>,
    /// The controller under test.
    pub(crate) controller: Slot<ReviewListController>,
}

impl LifecycleState {
    /// Returns the store, creating an empty one on first use.
    pub(crate) fn store(&self) -> Arc<InMemoryReviewStore> {
        if let Some(store) = self.store.get() {
            return store;
        }
        let store = Arc::new(InMemoryReviewStore::new());
        self.store.set(Arc::clone(&store));
        store
    }

    /// Builds a controller over the scenario's store and answers.
    pub(crate) fn build_controller(&self) -> ReviewListController {
        let confirm = self
            .confirm
            .get()
            .unwrap_or_else(|| Arc::new(ScriptedConfirm::new([true])));
        let telemetry = Arc::new(RecordingTelemetrySink::default());
        self.telemetry.set(Arc::clone(&telemetry));

        ReviewListController::new(self.store(), confirm).with_telemetry(telemetry)
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
