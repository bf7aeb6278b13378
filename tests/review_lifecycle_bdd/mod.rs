//! Support modules for the review lifecycle BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{LifecycleState, StepResult};
