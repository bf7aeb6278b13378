//! Support modules for the product deletion BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{DeletionState, StepResult};
