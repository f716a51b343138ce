use std::fmt::{self, Debug};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Notify, mpsc, oneshot};
use tracing::Instrument;

use crate::runner::{Job, run_ui_thread};
use crate::{Handlers, UiThreadGoneError};

/// Set once by [`UiThread::stop`] and observed by the runner between jobs.
#[derive(Debug, Default)]
pub(crate) struct StopSignal {
    stopped: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    fn raise(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            // Stores a permit if the runner is busy with a job.
            self.notify.notify_one();
        }
    }

    #[inline]
    pub(crate) fn is_raised(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub(crate) async fn raised(&self) {
        self.notify.notified().await
    }
}

/// Handle to a UI thread.
///
/// A UI thread is a single tokio task that owns the UI state `S` and the
/// [`Handlers`] for events of type `E`. Events and posted work are taken
/// from one queue, strictly in order, so handlers never race with each
/// other or with the completion of background work.
///
/// The thread runs until [`UiThread::stop`] is called or every handle is
/// dropped.
pub struct UiThread<S, E> {
    tx: mpsc::UnboundedSender<Job<S, E>>,
    stop: Arc<StopSignal>,
}

impl<S, E> UiThread<S, E>
where
    S: Send + 'static,
    E: Debug + Send + 'static,
{
    /// Spawns a UI thread owning `state` and dispatching events to
    /// `handlers`. The label shows up in the tracing span of the thread.
    ///
    /// This must be called within a tokio runtime.
    pub fn spawn(state: S, handlers: Handlers<S, E>, label: Option<&str>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(StopSignal::default());
        tokio::spawn(
            run_ui_thread(state, handlers, rx, tx.downgrade(), Arc::clone(&stop))
                .instrument(debug_span!("ui thread", label = label)),
        );
        Self { tx, stop }
    }

    /// Queues an event for the registered handlers.
    #[inline]
    pub fn dispatch(&self, event: E) -> Result<(), UiThreadGoneError> {
        self.push(Job::Event(event))
    }

    /// Queues a piece of work to run with exclusive access to the state.
    ///
    /// Background tasks use this to hand their results back to the UI.
    #[inline]
    pub fn post<F>(&self, work: F) -> Result<(), UiThreadGoneError>
    where
        F: FnOnce(&mut S, &UiThread<S, E>) + Send + 'static,
    {
        self.push(Job::Run(Box::new(work)))
    }

    /// Reads from the state once everything queued before has been
    /// handled.
    pub async fn query<T, F>(&self, read: F) -> Result<T, UiThreadGoneError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.post(move |state, _| {
            // The caller may have given up waiting.
            tx.send(read(state)).ok();
        })?;
        rx.await.map_err(|_| UiThreadGoneError)
    }

    /// Stops the UI thread.
    ///
    /// The job that is currently running finishes, everything still queued
    /// is dropped and later calls on any handle fail.
    #[inline]
    pub fn stop(&self) {
        self.stop.raise();
    }

    /// Returns `true` once [`UiThread::stop`] has been called.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_raised()
    }

    fn push(&self, job: Job<S, E>) -> Result<(), UiThreadGoneError> {
        if self.stop.is_raised() {
            return Err(UiThreadGoneError);
        }
        self.tx.send(job).map_err(|_| UiThreadGoneError)
    }
}

impl<S, E> UiThread<S, E> {
    #[inline]
    pub(crate) fn from_parts(
        tx: mpsc::UnboundedSender<Job<S, E>>,
        stop: Arc<StopSignal>,
    ) -> Self {
        Self { tx, stop }
    }
}

impl<S, E> Clone for UiThread<S, E> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            stop: Arc::clone(&self.stop),
        }
    }
}

impl<S, E> Debug for UiThread<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiThread")
            .field("stopped", &self.stop.is_raised())
            .finish()
    }
}
