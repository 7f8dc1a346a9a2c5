use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Raised after the shared camera transform was mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// When the mutating input was handled
    pub at: Duration,
}

/// Identity of a registered handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<RefCell<dyn FnMut(ChangeEvent)>>;

struct SignalInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, Handler)>>,
    emitting: Cell<bool>,
}

/// Single-threaded "changed" notification channel.
///
/// Producers call [`ChangeSignal::emit`] after mutating the camera; consumers
/// hold a [`Subscription`] that removes exactly the handler it registered.
#[derive(Clone)]
pub struct ChangeSignal {
    inner: Rc<SignalInner>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SignalInner {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                emitting: Cell::new(false),
            }),
        }
    }

    /// Register a handler; it stays registered until the returned
    /// subscription is disposed or dropped
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(ChangeEvent) + 'static,
    {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        let handler: Handler = Rc::new(RefCell::new(handler));
        self.inner.listeners.borrow_mut().push((id, handler));

        Subscription {
            signal: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Notify every handler, in subscription order
    pub fn emit(&self, at: Duration) {
        if self.inner.emitting.replace(true) {
            log::warn!("Re-entrant change signal dropped");
            return;
        }
        let _guard = EmittingGuard(&self.inner.emitting);

        // Snapshot so handlers may unsubscribe while we iterate
        let handlers: Vec<Handler> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        let event = ChangeEvent { at };
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (&mut *handler)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// Clears the emitting flag even if a handler unwinds
struct EmittingGuard<'a>(&'a Cell<bool>);

impl Drop for EmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration on a [`ChangeSignal`]
pub struct Subscription {
    signal: Weak<SignalInner>,
    id: Option<ListenerId>,
}

impl Subscription {
    /// Remove the handler. Safe to call repeatedly; returns whether a handler
    /// was removed by this call
    pub fn dispose(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        let Some(inner) = self.signal.upgrade() else {
            return false;
        };

        let mut listeners = inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener, _)| *listener != id);
        listeners.len() != before
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
