use std::fmt::Debug;
use std::sync::Arc;

use tokio::select;
use tokio::sync::mpsc;

use crate::handle::StopSignal;
use crate::{Handlers, UiThread};

type Work<S, E> = Box<dyn FnOnce(&mut S, &UiThread<S, E>) + Send>;

/// An entry of the UI thread's queue.
pub(crate) enum Job<S, E> {
    Event(E),
    Run(Work<S, E>),
}

pub(crate) async fn run_ui_thread<S, E>(
    mut state: S,
    handlers: Handlers<S, E>,
    mut rx: mpsc::UnboundedReceiver<Job<S, E>>,
    tx: mpsc::WeakUnboundedSender<Job<S, E>>,
    stop: Arc<StopSignal>,
) where
    S: Send + 'static,
    E: Debug + Send + 'static,
{
    debug!(handlers = handlers.len(), "started");
    loop {
        let job = select! {
            biased;

            _ = stop.raised() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };
        if stop.is_raised() {
            break;
        }
        let Some(tx) = tx.upgrade() else {
            warn!("all handles are gone, dropping the queued jobs");
            break;
        };
        let ui = UiThread::from_parts(tx, Arc::clone(&stop));

        match job {
            Job::Event(event) => {
                trace_span!("event", ?event).in_scope(|| {
                    let count = handlers.dispatch(&mut state, &event, &ui);
                    trace!(count, "handled");
                });
            }
            Job::Run(work) => {
                trace_span!("work").in_scope(|| work(&mut state, &ui));
            }
        }
    }
    debug!("will terminate");
}
