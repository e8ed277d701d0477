//! The persist seam.
//!
//! The controller never talks to the review service directly; it calls
//! whatever [`DraftStore`] the editor injected at mount time. In
//! production that is an authenticated PATCH against the review-update
//! endpoint; in tests it is a recording fake.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use calipar_core::PersistFailure;

/// Asynchronous persistence boundary for draft snapshots.
///
/// One method, one failure kind: the controller treats any rejection
/// uniformly and leaves retry judgment to the user.
#[async_trait]
pub trait DraftStore<C>: Send + Sync {
    /// Persist one content snapshot.
    async fn persist(&self, draft: &C) -> Result<(), PersistFailure>;
}

/// Adapter turning a plain async closure into a [`DraftStore`].
pub struct StoreFn<F> {
    f: F,
}

impl<F> StoreFn<F> {
    /// Wrap a closure as a store.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<C, F, Fut> DraftStore<C> for StoreFn<F>
where
    C: Clone + Send + Sync + 'static,
    F: Fn(C) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), PersistFailure>> + Send,
{
    async fn persist(&self, draft: &C) -> Result<(), PersistFailure> {
        (self.f)(draft.clone()).await
    }
}

/// Wrap an async closure as a shareable [`DraftStore`].
pub fn store_fn<C, F, Fut>(f: F) -> Arc<dyn DraftStore<C>>
where
    C: Clone + Send + Sync + 'static,
    F: Fn(C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PersistFailure>> + Send + 'static,
{
    Arc::new(StoreFn::new(f))
}
