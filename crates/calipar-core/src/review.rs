//! Review workflow enums.
//!
//! A program review moves `draft → in_review → validated → approved`.
//! Autosave is only active while the document is editable, i.e. in
//! `draft`; later stages record edits but never auto-persist them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a program review document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Being authored; autosave active.
    Draft,
    /// Submitted for committee review.
    InReview,
    /// Passed the validation rubric.
    Validated,
    /// Signed off by the planning office.
    Approved,
}

impl ReviewStatus {
    /// Whether the document may still be edited (and therefore autosaved).
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Validated => "validated",
            Self::Approved => "approved",
        };
        f.write_str(s)
    }
}

/// Completion status of an individual review section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// No narrative entered yet.
    #[default]
    NotStarted,
    /// Narrative partially written.
    InProgress,
    /// Author marked the section done.
    Completed,
}
