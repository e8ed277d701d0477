//! The autosave controller.
//!
//! Coalesces rapid editor changes into debounced, strictly serialized
//! persist calls:
//!
//! - **Trailing-edge debounce**: every registered change replaces the
//!   scheduled flush; a persist attempt starts only after a full quiet
//!   window. Timers are epoch-guarded sleep tasks — a stale epoch at
//!   fire time is a cancelled timer.
//! - **At-most-one-in-flight**: a second trigger while a persist call is
//!   pending queues rather than starting a parallel call.
//! - **Last-write-wins**: the attempt locks in the newest buffered
//!   snapshot at dispatch time; edits arriving mid-flight are flushed by
//!   an immediate follow-up attempt once the in-flight call settles.
//!
//! Failures do not auto-retry: the controller records `Error` status and
//! waits for the user to edit again or save explicitly.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use calipar_core::PersistFailure;

use crate::config::AutosaveConfig;
use crate::errors::AutosaveError;
use crate::persist::DraftStore;
use crate::state::{AutosaveState, SaveStatus};

/// Acknowledgement channel for one `save_now` caller.
type Ack = oneshot::Sender<Result<(), AutosaveError>>;

/// Debounced autosave for one editing session.
///
/// Owns the session's save state exclusively: the UI mutates it only
/// through [`register_change`](Self::register_change) and
/// [`save_now`](Self::save_now), and reads it through
/// [`state`](Self::state). All methods must be called from within a
/// tokio runtime.
pub struct AutosaveController<C> {
    shared: Arc<Shared<C>>,
}

struct Shared<C> {
    config: AutosaveConfig,
    store: Arc<dyn DraftStore<C>>,
    cancel: CancellationToken,
    inner: Mutex<Inner<C>>,
}

struct Inner<C> {
    /// Newest snapshot registered by the editor (last-write-wins buffer).
    latest: Option<C>,
    /// Snapshot locked in by the in-flight attempt, for the
    /// changed-since-dispatch comparison at settle time.
    dispatched: Option<C>,
    /// True from `register_change` until a settle confirms `latest`.
    dirty: bool,
    status: SaveStatus,
    last_saved: Option<DateTime<Utc>>,
    /// Generation counter for scheduled flushes. Bumped by every change,
    /// every attempt start, and teardown; a sleep task whose epoch is
    /// stale when it fires does nothing.
    epoch: u64,
    in_flight: bool,
    /// `save_now` callers that arrived while a persist was in flight.
    queued: Vec<Ack>,
    /// Handle of the running attempt task, drained by `close`.
    attempt: Option<JoinHandle<()>>,
    closed: bool,
}

impl<C> AutosaveController<C>
where
    C: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a controller persisting through `store`.
    #[must_use]
    pub fn new(config: AutosaveConfig, store: Arc<dyn DraftStore<C>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                store,
                cancel: CancellationToken::new(),
                inner: Mutex::new(Inner {
                    latest: None,
                    dispatched: None,
                    dirty: false,
                    status: SaveStatus::Idle,
                    last_saved: None,
                    epoch: 0,
                    in_flight: false,
                    queued: Vec::new(),
                    attempt: None,
                    closed: false,
                }),
            }),
        }
    }

    /// Record `draft` as the newest buffered snapshot and, when autosave
    /// is enabled, restart the debounce window.
    ///
    /// Calling again before the window elapses replaces the scheduled
    /// flush — the elapsed time resets. With autosave disabled the
    /// snapshot is still buffered (for a later `save_now`) but nothing
    /// is scheduled.
    pub fn register_change(&self, draft: C) -> Result<(), AutosaveError> {
        let epoch = {
            let mut g = self.shared.inner.lock();
            if g.closed {
                return Err(AutosaveError::Closed);
            }
            g.latest = Some(draft);
            g.dirty = true;
            if !self.shared.config.enabled {
                trace!("autosave disabled; buffering edit without scheduling");
                return Ok(());
            }
            if !g.in_flight {
                g.status = SaveStatus::Pending;
            }
            g.epoch = g.epoch.wrapping_add(1);
            g.epoch
        };
        Shared::schedule_flush(&self.shared, epoch);
        Ok(())
    }

    /// Cancel any scheduled flush and persist the buffered snapshot now.
    ///
    /// If a persist call is already in flight the request queues and is
    /// answered by the follow-up attempt. Resolves `Ok` immediately when
    /// there is nothing unsaved. Unlike the debounced path, failures
    /// propagate to the caller.
    pub async fn save_now(&self) -> Result<(), AutosaveError> {
        let rx = {
            let mut g = self.shared.inner.lock();
            if g.closed {
                return Err(AutosaveError::Closed);
            }
            g.epoch = g.epoch.wrapping_add(1);
            if !g.dirty {
                return Ok(());
            }
            let (tx, rx) = oneshot::channel();
            if g.in_flight {
                debug!("save_now while persist in flight; queueing");
                g.queued.push(tx);
            } else {
                Shared::spawn_attempt(&self.shared, &mut g, vec![tx]);
            }
            rx
        };
        rx.await.unwrap_or(Err(AutosaveError::Closed))
    }

    /// Synchronous snapshot of the observable save state.
    #[must_use]
    pub fn state(&self) -> AutosaveState {
        let g = self.shared.inner.lock();
        AutosaveState {
            status: g.status,
            last_saved: g.last_saved,
            has_unsaved_changes: g.dirty,
        }
    }

    /// Current save cycle position.
    #[must_use]
    pub fn status(&self) -> SaveStatus {
        self.shared.inner.lock().status
    }

    /// When the last successful persist settled, if any.
    #[must_use]
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.shared.inner.lock().last_saved
    }

    /// Whether the most recently registered content is still unconfirmed.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.shared.inner.lock().dirty
    }

    /// The configuration this controller was built with.
    #[must_use]
    pub fn config(&self) -> &AutosaveConfig {
        &self.shared.config
    }

    /// Tear the session down.
    ///
    /// Scheduled flushes are cancelled and no new attempt will start. An
    /// in-flight persist call is not aborted: `close` waits for it to
    /// settle, then returns. Afterwards `register_change` and `save_now`
    /// return [`AutosaveError::Closed`]. Buffered edits that never
    /// flushed are dropped — callers wanting a guarantee should
    /// `save_now` before closing.
    pub async fn close(&self) {
        {
            let mut g = self.shared.inner.lock();
            g.closed = true;
            g.epoch = g.epoch.wrapping_add(1);
        }
        self.shared.cancel.cancel();
        loop {
            let attempt = self.shared.inner.lock().attempt.take();
            match attempt {
                Some(handle) => {
                    let _ = handle.await;
                }
                None => break,
            }
        }
        let g = self.shared.inner.lock();
        if g.dirty {
            warn!("autosave session closed with unsaved changes");
        }
    }
}

impl<C> Drop for AutosaveController<C> {
    fn drop(&mut self) {
        // Dropping without close(): stop accepting work and end sleeping
        // timer tasks; an in-flight persist completes on its own.
        {
            let mut g = self.shared.inner.lock();
            g.closed = true;
            g.epoch = g.epoch.wrapping_add(1);
        }
        self.shared.cancel.cancel();
    }
}

impl<C> Shared<C>
where
    C: Clone + PartialEq + Send + Sync + 'static,
{
    /// Arm the debounce timer for `epoch`.
    fn schedule_flush(this: &Arc<Self>, epoch: u64) {
        let shared = Arc::clone(this);
        let delay = this.config.delay();
        drop(tokio::spawn(async move {
            tokio::select! {
                () = shared.cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => Shared::on_flush_timer(&shared, epoch),
            }
        }));
    }

    /// The debounce window elapsed without newer edits.
    fn on_flush_timer(this: &Arc<Self>, epoch: u64) {
        let mut g = this.inner.lock();
        if g.closed || g.epoch != epoch {
            // Superseded by a newer edit, an attempt start, or teardown.
            return;
        }
        if !g.dirty {
            return;
        }
        if g.in_flight {
            // Settle re-evaluates the buffer once the in-flight call completes.
            trace!("debounce fired during persist; deferring");
            return;
        }
        Shared::spawn_attempt(this, &mut g, Vec::new());
    }

    /// Start a persist attempt with the newest buffered snapshot.
    ///
    /// Bumping the epoch here is what clears any scheduled-but-unfired
    /// debounce timer at the `saving` transition.
    fn spawn_attempt(this: &Arc<Self>, g: &mut Inner<C>, waiters: Vec<Ack>) {
        let Some(draft) = g.latest.clone() else {
            for ack in waiters {
                let _ = ack.send(Ok(()));
            }
            return;
        };
        g.epoch = g.epoch.wrapping_add(1);
        g.dispatched = Some(draft.clone());
        g.in_flight = true;
        g.status = SaveStatus::Saving;
        let shared = Arc::clone(this);
        g.attempt = Some(tokio::spawn(async move {
            let result = shared.store.persist(&draft).await;
            Shared::settle(&shared, &draft, result, waiters);
        }));
    }

    /// An attempt completed; reconcile against edits that arrived mid-flight.
    fn settle(
        this: &Arc<Self>,
        dispatched: &C,
        result: Result<(), PersistFailure>,
        waiters: Vec<Ack>,
    ) {
        let mut g = this.inner.lock();
        g.in_flight = false;
        let queued = std::mem::take(&mut g.queued);
        match result {
            Ok(()) => {
                counter!("autosave_attempts_total", "outcome" => "success").increment(1);
                g.last_saved = Some(Utc::now());
                for ack in waiters {
                    let _ = ack.send(Ok(()));
                }
                let newer = g.latest.as_ref().is_some_and(|latest| latest != dispatched);
                if !newer {
                    g.dirty = false;
                    g.status = SaveStatus::Saved;
                    // Queued save_now callers wanted exactly the content
                    // that just landed.
                    for ack in queued {
                        let _ = ack.send(Ok(()));
                    }
                } else if g.closed {
                    g.status = SaveStatus::Saved;
                    for ack in queued {
                        let _ = ack.send(Err(AutosaveError::Closed));
                    }
                } else {
                    debug!("newer edits arrived during persist; starting follow-up save");
                    Shared::spawn_attempt(this, &mut g, queued);
                }
            }
            Err(failure) => {
                counter!("autosave_attempts_total", "outcome" => "failure").increment(1);
                g.status = SaveStatus::Error;
                if waiters.is_empty() {
                    // Debounce-triggered attempt: nobody is awaiting, so the
                    // failure is recorded in state and logged, not thrown.
                    warn!(error = %failure, "debounced autosave attempt failed");
                }
                for ack in waiters {
                    let _ = ack.send(Err(AutosaveError::Persist(failure.clone())));
                }
                if queued.is_empty() {
                    // No automatic retry; the next edit or explicit save retries.
                } else if g.closed {
                    for ack in queued {
                        let _ = ack.send(Err(AutosaveError::Closed));
                    }
                } else {
                    Shared::spawn_attempt(this, &mut g, queued);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::store_fn;
    use assert_matches::assert_matches;

    fn noop_store() -> Arc<dyn DraftStore<String>> {
        store_fn(|_draft: String| async { Ok(()) })
    }

    #[tokio::test]
    async fn starts_idle() {
        let controller = AutosaveController::new(AutosaveConfig::default(), noop_store());
        let state = controller.state();
        assert_eq!(state.status, SaveStatus::Idle);
        assert!(!state.has_unsaved_changes);
        assert!(state.last_saved.is_none());
    }

    #[tokio::test]
    async fn register_change_marks_pending() {
        let controller = AutosaveController::new(AutosaveConfig::default(), noop_store());
        controller.register_change("draft".to_string()).unwrap();
        assert_eq!(controller.status(), SaveStatus::Pending);
        assert!(controller.has_unsaved_changes());
    }

    #[tokio::test]
    async fn disabled_register_change_buffers_without_scheduling() {
        let controller = AutosaveController::new(AutosaveConfig::disabled(), noop_store());
        controller.register_change("draft".to_string()).unwrap();
        assert_eq!(controller.status(), SaveStatus::Idle);
        assert!(controller.has_unsaved_changes());
    }

    #[tokio::test]
    async fn save_now_with_nothing_unsaved_is_a_no_op() {
        let controller = AutosaveController::new(AutosaveConfig::default(), noop_store());
        controller.save_now().await.unwrap();
        assert_eq!(controller.status(), SaveStatus::Idle);
    }

    #[tokio::test]
    async fn operations_fail_after_close() {
        let controller = AutosaveController::new(AutosaveConfig::default(), noop_store());
        controller.close().await;
        assert_matches!(
            controller.register_change("late".to_string()),
            Err(AutosaveError::Closed)
        );
        assert_matches!(controller.save_now().await, Err(AutosaveError::Closed));
    }
}
