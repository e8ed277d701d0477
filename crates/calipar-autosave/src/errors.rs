//! Errors surfaced by the autosave controller.

use calipar_core::PersistFailure;
use thiserror::Error;

/// Failure returned from controller operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AutosaveError {
    /// The injected persist callback rejected the save.
    #[error(transparent)]
    Persist(#[from] PersistFailure),

    /// The editing session was torn down; no further saves are accepted.
    #[error("autosave session is closed")]
    Closed,
}
