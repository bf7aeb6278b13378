//! Inline edit session for a single review.
//!
//! A session exists only while its review is being edited; dropping it
//! returns the review to viewing mode. The session never talks to the
//! remote store itself: [`ReviewEditSession::begin_save`] hands back the
//! request the controller should issue.

use crate::error::CatalogError;

/// Whether a review is displayed or being edited in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    /// The review text is displayed read-only.
    #[default]
    Viewing,
    /// The review text is shown in an inline editor.
    Editing,
}

/// Edit state for one review in [`EditMode::Editing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEditSession {
    review_id: u64,
    id: u64,
    original_text: String,
    draft_text: String,
    save_in_flight: bool,
}

/// A validated update ready to be sent to the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// Review being updated.
    pub review_id: u64,
    /// Session that issued the update.
    pub session: u64,
    /// Trimmed replacement text.
    pub text: String,
}

impl ReviewEditSession {
    /// Opens session `id` with the draft pre-filled from `original_text`.
    ///
    /// Session identifiers tell a late store response apart from the
    /// session that is open when it arrives.
    #[must_use]
    pub fn new(review_id: u64, id: u64, original_text: &str) -> Self {
        Self {
            review_id,
            id,
            original_text: original_text.to_owned(),
            draft_text: original_text.to_owned(),
            save_in_flight: false,
        }
    }

    /// Returns the review being edited.
    #[must_use]
    pub const fn review_id(&self) -> u64 {
        self.review_id
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the text the review displayed when editing began.
    #[must_use]
    pub const fn original_text(&self) -> &str {
        self.original_text.as_str()
    }

    /// Returns the current draft.
    #[must_use]
    pub const fn draft_text(&self) -> &str {
        self.draft_text.as_str()
    }

    /// Returns whether an update is waiting for the remote store.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    /// Replaces the draft.
    pub fn set_draft(&mut self, text: &str) {
        text.clone_into(&mut self.draft_text);
    }

    /// Validates the draft and marks a save as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RequestInFlight`] while a previous save has not
    /// resolved, or [`CatalogError::EmptyText`] when the trimmed draft is
    /// empty. Neither error changes the session.
    pub fn begin_save(&mut self) -> Result<SaveRequest, CatalogError> {
        if self.save_in_flight {
            return Err(CatalogError::RequestInFlight {
                operation: "update_review".to_owned(),
            });
        }

        let text = self.draft_text.trim();
        if text.is_empty() {
            return Err(CatalogError::EmptyText);
        }

        let request = SaveRequest {
            review_id: self.review_id,
            session: self.id,
            text: text.to_owned(),
        };
        self.save_in_flight = true;
        Ok(request)
    }

    /// Re-enables saving after the remote store rejected the update.
    ///
    /// The draft is kept so the user can retry.
    pub const fn save_failed(&mut self) {
        self.save_in_flight = false;
    }
}
