use std::fmt::{self, Debug};

use crate::UiThread;

type Filter<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
type Handler<S, E> = Box<dyn Fn(&mut S, &E, &UiThread<S, E>) + Send + Sync>;

/// The event handlers of a UI thread.
///
/// Each registration pairs a filter with a handler. An event runs every
/// handler whose filter accepts it, synchronously and in registration
/// order, once. Handlers that want to trigger further events dispatch
/// them through the [`UiThread`] they are given, which queues them behind
/// everything already waiting.
pub struct Handlers<S, E> {
    entries: Vec<(Filter<E>, Handler<S, E>)>,
}

impl<S, E> Handlers<S, E> {
    /// Creates an empty set of handlers.
    #[inline]
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Registers a handler for the events accepted by `filter`.
    pub fn on(
        &mut self,
        filter: impl Fn(&E) -> bool + Send + Sync + 'static,
        handler: impl Fn(&mut S, &E, &UiThread<S, E>) + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.push((Box::new(filter), Box::new(handler)));
        self
    }

    /// Returns the number of registrations.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the matching handlers and returns how many of them ran.
    pub(crate) fn dispatch(
        &self,
        state: &mut S,
        event: &E,
        ui: &UiThread<S, E>,
    ) -> usize {
        let mut count = 0;
        for (filter, handler) in &self.entries {
            if filter(event) {
                handler(state, event, ui);
                count += 1;
            }
        }
        count
    }
}

impl<S, E> Default for Handlers<S, E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> Debug for Handlers<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("len", &self.entries.len())
            .finish()
    }
}
