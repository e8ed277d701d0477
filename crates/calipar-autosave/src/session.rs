//! Per-editing-session context.
//!
//! One `EditorSession` is constructed when an author opens a review
//! section and discarded when they navigate away. The session owns the
//! autosave controller for that section — session-scoped state is
//! explicitly constructed and dependency-injected, never ambient.

use std::sync::Arc;

use calipar_core::{ReviewId, ReviewStatus, SectionDraft, SectionKey};

use crate::config::AutosaveConfig;
use crate::controller::AutosaveController;
use crate::errors::AutosaveError;
use crate::persist::DraftStore;
use crate::state::AutosaveState;

/// An open editor for one review section, with autosave wired in.
pub struct EditorSession {
    review_id: ReviewId,
    section_key: SectionKey,
    autosave: AutosaveController<SectionDraft>,
}

impl EditorSession {
    /// Mount an editing session.
    ///
    /// Autosave is active only when both the config enables it and the
    /// review is still editable: non-draft reviews buffer edits without
    /// ever auto-persisting them.
    #[must_use]
    pub fn mount(
        review_id: ReviewId,
        section_key: SectionKey,
        review_status: ReviewStatus,
        mut config: AutosaveConfig,
        store: Arc<dyn DraftStore<SectionDraft>>,
    ) -> Self {
        config.enabled = config.enabled && review_status.is_editable();
        Self {
            review_id,
            section_key,
            autosave: AutosaveController::new(config, store),
        }
    }

    /// Register the editor's current narrative body.
    pub fn edit(&self, body: impl Into<String>) -> Result<(), AutosaveError> {
        self.autosave.register_change(SectionDraft::new(
            self.review_id.clone(),
            self.section_key.clone(),
            body,
        ))
    }

    /// Force a save of the buffered narrative, bypassing the debounce
    /// window. Used by the explicit save button and before navigation.
    pub async fn save_now(&self) -> Result<(), AutosaveError> {
        self.autosave.save_now().await
    }

    /// Synchronous snapshot of the save state for UI indicators.
    #[must_use]
    pub fn state(&self) -> AutosaveState {
        self.autosave.state()
    }

    /// Review this session edits.
    #[must_use]
    pub fn review_id(&self) -> &ReviewId {
        &self.review_id
    }

    /// Section this session edits.
    #[must_use]
    pub fn section_key(&self) -> &SectionKey {
        &self.section_key
    }

    /// The underlying controller, for callers needing fine-grained access.
    #[must_use]
    pub fn autosave(&self) -> &AutosaveController<SectionDraft> {
        &self.autosave
    }

    /// Unmount the session. Any in-flight persist completes silently;
    /// buffered edits that never flushed are dropped.
    pub async fn close(self) {
        self.autosave.close().await;
    }
}
