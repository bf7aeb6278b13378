//! Inline review lifecycle.
//!
//! Every displayed review is a [`ReviewItem`]: the raw text as the remote
//! store accepted it, plus an optional [`ReviewEditSession`] while the user
//! edits it in place. The [`ReviewListController`] owns the items and is the
//! only component that talks to the store or refreshes the list.
//!
//! The decorated form shown to users is produced by [`display_text`] and is
//! never parsed back; editing always starts from the raw text.

mod command;
mod confirm;
mod controller;
mod messages;
mod session;

pub use command::{Cmd, dispatch};
#[cfg(any(test, feature = "test-support"))]
pub use confirm::test_support;
pub use confirm::{AlwaysConfirm, Confirm};
pub use controller::{DEFAULT_REQUEST_TIMEOUT, ReviewListController};
pub use messages::ReviewMsg;
pub use session::{EditMode, ReviewEditSession, SaveRequest};

use crate::error::CatalogError;
use crate::store::Review;

/// Wraps review text in typographic quotes for display.
#[must_use]
pub fn display_text(text: &str) -> String {
    format!("\u{201c}{text}\u{201d}")
}

/// What a review item currently renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewView {
    /// Read-only text with edit and delete controls.
    Viewing {
        /// Decorated review text.
        display: String,
    },
    /// A single inline editor with save and cancel controls.
    Editing {
        /// Current draft.
        draft: String,
        /// Whether the save control is waiting for the store.
        saving: bool,
    },
}

/// A displayed review and its optional edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    review: Review,
    session: Option<ReviewEditSession>,
}

impl From<Review> for ReviewItem {
    fn from(review: Review) -> Self {
        Self::new(review)
    }
}

impl ReviewItem {
    /// Wraps a review in viewing mode.
    #[must_use]
    pub const fn new(review: Review) -> Self {
        Self {
            review,
            session: None,
        }
    }

    /// Returns the review identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.review.id
    }

    /// Returns the product the review belongs to.
    #[must_use]
    pub const fn product_id(&self) -> u64 {
        self.review.product_id
    }

    /// Returns the raw review text.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.review.text.as_str()
    }

    /// Returns the underlying review record.
    #[must_use]
    pub const fn review(&self) -> &Review {
        &self.review
    }

    /// Returns the decorated text shown in viewing mode.
    #[must_use]
    pub fn display(&self) -> String {
        display_text(&self.review.text)
    }

    /// Returns whether the item is being edited.
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        if self.session.is_some() {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    /// Returns the edit session, if one is open.
    #[must_use]
    pub const fn session(&self) -> Option<&ReviewEditSession> {
        self.session.as_ref()
    }

    /// Opens edit session `session` pre-filled with the raw text.
    ///
    /// Returns `false` without touching the existing draft when the item is
    /// already being edited.
    pub fn start_edit(&mut self, session: u64) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(ReviewEditSession::new(
            self.review.id,
            session,
            &self.review.text,
        ));
        true
    }

    /// Replaces the draft of the open session.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotEditing`] when no session is open.
    pub fn update_draft(&mut self, text: &str) -> Result<(), CatalogError> {
        self.session_mut()?.set_draft(text);
        Ok(())
    }

    /// Validates the draft and marks the session's save as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotEditing`] when no session is open, or the
    /// session's validation error.
    pub fn begin_save(&mut self) -> Result<SaveRequest, CatalogError> {
        self.session_mut()?.begin_save()
    }

    /// Applies text the remote store accepted.
    ///
    /// Only the session that sent the update is closed; a session opened
    /// after it was cancelled keeps its draft.
    pub fn finish_save(&mut self, session: u64, accepted: &str) {
        accepted.clone_into(&mut self.review.text);
        if self.owns_session(session) {
            self.session = None;
        }
    }

    /// Keeps the session that sent a rejected update open for a retry.
    pub fn save_failed(&mut self, session: u64) {
        if let Some(open) = self.session.as_mut().filter(|open| open.id() == session) {
            open.save_failed();
        }
    }

    /// Discards the draft and returns to viewing mode.
    ///
    /// Returns `false` when no session was open.
    pub fn cancel_edit(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Returns what the item renders in its current mode.
    #[must_use]
    pub fn view(&self) -> ReviewView {
        match &self.session {
            None => ReviewView::Viewing {
                display: self.display(),
            },
            Some(session) => ReviewView::Editing {
                draft: session.draft_text().to_owned(),
                saving: session.is_saving(),
            },
        }
    }

    fn owns_session(&self, session: u64) -> bool {
        self.session.as_ref().is_some_and(|open| open.id() == session)
    }

    const fn session_mut(&mut self) -> Result<&mut ReviewEditSession, CatalogError> {
        match self.session.as_mut() {
            Some(session) => Ok(session),
            None => Err(CatalogError::NotEditing {
                review_id: self.review.id,
            }),
        }
    }
}
