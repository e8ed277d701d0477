//! Draft content snapshots.
//!
//! A snapshot is what an editor buffers between keystrokes and what the
//! autosave controller hands to the persist boundary. Snapshots are plain
//! data: equality comparison is how the controller detects that newer
//! edits arrived while a persist call was in flight, so none of these
//! types carry timestamps or other always-changing fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ReviewId, SectionKey};

/// Buffered narrative content for one review section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDraft {
    /// Review the section belongs to.
    pub review_id: ReviewId,
    /// Section being edited.
    pub section_key: SectionKey,
    /// Narrative body as produced by the rich-text editor.
    pub body: String,
}

impl SectionDraft {
    /// Create a snapshot for a section narrative.
    #[must_use]
    pub fn new(review_id: ReviewId, section_key: SectionKey, body: impl Into<String>) -> Self {
        Self {
            review_id,
            section_key,
            body: body.into(),
        }
    }
}

/// Buffered top-level content for a whole review document.
///
/// Review-level metadata (program description, staffing tables, linked
/// goals) is stored as one JSON document rather than per-section
/// narrative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// Review being edited.
    pub review_id: ReviewId,
    /// Structured review content.
    pub content: Value,
}

impl ReviewDraft {
    /// Create a snapshot of review-level content.
    #[must_use]
    pub fn new(review_id: ReviewId, content: Value) -> Self {
        Self { review_id, content }
    }
}
