//! A local fake backend for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use little_chat_model::{
    ChatBackend, ChatBackendError, ChatReply, ChatRequest, ErrorKind,
};
use tokio::sync::watch;
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ChatBackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

struct Inner {
    script: Mutex<Vec<PresetReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    delay: Mutex<Option<Duration>>,
    request_count: watch::Sender<usize>,
    released: watch::Sender<bool>,
}

/// A local fake backend for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how
/// the backend should answer. The n-th request gets the n-th preset
/// reply, no matter what it carries. If there are no enough presets in
/// the script, an error will be returned.
///
/// Clones share the same script and request log, so a test can keep one
/// clone for assertions and hand the other one to the widget.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone)]
pub struct ScriptedBackend {
    inner: Arc<Inner>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        let (request_count, _) = watch::channel(0);
        let (released, _) = watch::channel(true);
        Self {
            inner: Arc::new(Inner {
                script: Mutex::default(),
                requests: Mutex::default(),
                delay: Mutex::default(),
                request_count,
                released,
            }),
        }
    }
}

impl ScriptedBackend {
    /// Appends a preset reply to the script.
    #[inline]
    pub fn add_reply(&self, preset: PresetReply) {
        lock(&self.inner.script).push(preset);
    }

    /// Delays every reply by `duration`.
    #[inline]
    pub fn set_delay(&self, duration: Duration) {
        *lock(&self.inner.delay) = Some(duration);
    }

    /// Holds every reply until [`ScriptedBackend::release`] is called.
    #[inline]
    pub fn hold(&self) {
        self.inner.released.send_replace(false);
    }

    /// Lets the held replies, and all later ones, through.
    #[inline]
    pub fn release(&self) {
        self.inner.released.send_replace(true);
    }

    /// Returns every request received so far, oldest first.
    #[inline]
    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.inner.requests).clone()
    }

    /// Waits until at least `count` requests have been received.
    pub async fn wait_for_requests(&self, count: usize) {
        let mut rx = self.inner.request_count.subscribe();
        // The sender lives in `self`, so this cannot fail.
        rx.wait_for(|received| *received >= count).await.ok();
    }
}

impl ChatBackend for ScriptedBackend {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let idx = {
            let mut requests = lock(&self.inner.requests);
            requests.push(req.clone());
            requests.len() - 1
        };
        self.inner.request_count.send_modify(|count| *count += 1);

        let preset = lock(&self.inner.script).get(idx).cloned();
        let delay = *lock(&self.inner.delay);
        let mut released = self.inner.released.subscribe();

        async move {
            // Only fails if every clone of the backend is gone, in which
            // case there is nobody left to hold the reply.
            released.wait_for(|released| *released).await.ok();
            if let Some(delay) = delay {
                sleep(delay).await;
            }

            match preset {
                Some(PresetReply::Text(text)) => Ok(ChatReply::new(text)),
                Some(PresetReply::Failure(failure)) => Err(Error {
                    message: "scripted failure",
                    kind: failure.into(),
                }),
                None => Err(Error {
                    message: "no enough presets",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
