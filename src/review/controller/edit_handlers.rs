//! Inline edit handlers.

use std::sync::Arc;

use super::ReviewListController;
use crate::error::CatalogError;
use crate::review::command::{Cmd, bounded};
use crate::review::messages::ReviewMsg;
use crate::review::session::SaveRequest;
use crate::review::ReviewItem;
use crate::telemetry::TelemetryEvent;

impl ReviewListController {
    /// Dispatches inline edit messages to their handlers.
    pub(super) fn handle_edit_msg(&mut self, msg: &ReviewMsg) -> Option<Cmd> {
        match msg {
            ReviewMsg::StartEdit { review_id } => self.handle_start_edit(*review_id),
            ReviewMsg::UpdateDraft { review_id, text } => {
                self.handle_update_draft(*review_id, text);
            }
            ReviewMsg::SaveEdit { review_id } => return self.handle_save_edit(*review_id),
            ReviewMsg::CancelEdit { review_id } => self.handle_cancel_edit(*review_id),
            ReviewMsg::SaveCompleted {
                review_id,
                session,
                text,
            } => self.handle_save_completed(*review_id, *session, text),
            ReviewMsg::SaveFailed {
                review_id,
                session,
                error,
            } => self.handle_save_failed(*review_id, *session, error),
            _ => {
                // Caller filters to edit messages.
            }
        }
        None
    }

    fn handle_start_edit(&mut self, review_id: u64) {
        // Identifiers stay unique across refreshes, which rebuild the items.
        let session = self.edit_sessions + 1;
        match self.item_mut(review_id).map(|item| item.start_edit(session)) {
            Ok(true) => self.edit_sessions = session,
            Ok(false) => tracing::debug!(review_id, "review is already being edited"),
            Err(error) => self.record_failure("start_edit", error),
        }
    }

    fn handle_update_draft(&mut self, review_id: u64, text: &str) {
        let result = self
            .item_mut(review_id)
            .and_then(|item| item.update_draft(text));
        if let Err(error) = result {
            self.record_failure("update_draft", error);
        }
    }

    fn handle_save_edit(&mut self, review_id: u64) -> Option<Cmd> {
        let request = match self.item_mut(review_id).and_then(ReviewItem::begin_save) {
            Ok(request) => request,
            Err(error) => {
                self.record_failure("update_review", error);
                return None;
            }
        };

        tracing::debug!(review_id, "saving review edit");
        Some(self.update_command(request))
    }

    fn update_command(&self, request: SaveRequest) -> Cmd {
        let store = Arc::clone(&self.store);
        let limit = self.request_timeout;

        Box::pin(async move {
            let SaveRequest {
                review_id,
                session,
                text,
            } = request;
            let result = bounded(
                "update_review",
                limit,
                store.update_review(review_id, text.as_str()),
            )
            .await;
            Some(match result {
                Ok(()) => ReviewMsg::SaveCompleted {
                    review_id,
                    session,
                    text,
                },
                Err(error) => ReviewMsg::SaveFailed {
                    review_id,
                    session,
                    error,
                },
            })
        })
    }

    fn handle_cancel_edit(&mut self, review_id: u64) {
        match self.item_mut(review_id) {
            Ok(item) => {
                if !item.cancel_edit() {
                    tracing::debug!(review_id, "cancel requested without an open editor");
                }
            }
            Err(error) => self.record_failure("cancel_edit", error),
        }
    }

    fn handle_save_completed(&mut self, review_id: u64, session: u64, text: &str) {
        // A refresh may have replaced the item while the update was in flight.
        if let Ok(item) = self.item_mut(review_id) {
            item.finish_save(session, text);
        }
        self.record_success(TelemetryEvent::ReviewUpdated { review_id });
    }

    fn handle_save_failed(&mut self, review_id: u64, session: u64, error: &CatalogError) {
        if let Ok(item) = self.item_mut(review_id) {
            item.save_failed(session);
        }
        self.record_failure("update_review", error.clone());
    }
}
