use std::pin::Pin;
use std::sync::Arc;

use little_chat_model::{ChatBackend, ChatBackendError, ChatReply, ChatRequest};
use tracing::Instrument;

pub(crate) type SendRequestResult =
    Result<ChatReply, Box<dyn ChatBackendError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ChatRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a chat backend that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub struct BackendClient {
    handler_fn: HandlerFn,
}

impl BackendClient {
    #[inline]
    pub fn new<B: ChatBackend + 'static>(backend: B) -> Self {
        // Erase `B`, so the widget state doesn't need a generic parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = backend.send_request(&req);
            Box::pin(
                async move {
                    trace!("sending {} turns", req.history.len());
                    match fut.await {
                        Ok(reply) => {
                            trace!("got a reply: {reply:?}");
                            Ok(reply)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ChatBackendError>)
                        }
                    }
                }
                .instrument(trace_span!("backend client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and waits for the reply.
    #[inline]
    pub async fn send_request(&self, req: ChatRequest) -> SendRequestResult {
        (self.handler_fn)(req).await
    }
}
