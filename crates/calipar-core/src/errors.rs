//! Persist-boundary error type.

use thiserror::Error;

/// A persist attempt was rejected by the injected save callback.
///
/// This is the single failure kind the autosave pipeline distinguishes:
/// network errors, auth rejections, validation failures and server errors
/// all collapse into it. Whether a failure is worth retrying is left to
/// the human behind the editor, so no retryability classification is
/// carried here.
///
/// `Clone` because one failure may need to answer several queued
/// `save_now` waiters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("persist attempt failed: {message}")]
pub struct PersistFailure {
    message: String,
}

impl PersistFailure {
    /// Wrap an underlying failure description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The underlying failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for PersistFailure {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for PersistFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_message() {
        let err = PersistFailure::new("503 from review service");
        assert_eq!(err.to_string(), "persist attempt failed: 503 from review service");
        assert_eq!(err.message(), "503 from review service");
    }
}
