//! Confirmation prompts for destructive actions.

/// Host collaborator that asks the user to confirm an action.
pub trait Confirm: Send + Sync {
    /// Shows `prompt` and returns whether the user accepted.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmer that accepts every prompt, for non-interactive hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Test helpers for scripting confirmation answers.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::Confirm;

    /// Confirmer that replays scripted answers and records the prompts.
    ///
    /// Once the script is exhausted every prompt is declined.
    #[derive(Debug, Default)]
    pub struct ScriptedConfirm {
        answers: Mutex<VecDeque<bool>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedConfirm {
        /// Creates a confirmer that answers in the given order.
        #[must_use]
        pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// Returns every prompt shown so far.
        #[must_use]
        pub fn prompts(&self) -> Vec<String> {
            self.prompts
                .lock()
                .map(|prompts| prompts.clone())
                .unwrap_or_default()
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&self, prompt: &str) -> bool {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_owned());
            }
            self.answers
                .lock()
                .ok()
                .and_then(|mut answers| answers.pop_front())
                .unwrap_or(false)
        }
    }
}
