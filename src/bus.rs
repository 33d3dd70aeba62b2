//! Named-event publish/subscribe bus
//!
//! The bus decouples independently rendered UI components from bulk cart
//! operations: N per-item widgets can react to one reset without the cart
//! holding references to any of them. Delivery is synchronous and inline;
//! at most one handler is registered per topic and subscribing again
//! replaces the previous handler.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Handler<E> = Rc<dyn Fn(&E)>;

/// Synchronous topic → handler registry.
///
/// Single-threaded by design: every publish runs its handler to completion
/// before returning, so two mutations driven through the bus can never
/// interleave.
pub struct EventBus<E> {
    handlers: RefCell<HashMap<String, Handler<E>>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(HashMap::new()),
        }
    }

    /// Registers a handler for `topic`, replacing any existing one.
    pub fn subscribe(&self, topic: impl Into<String>, handler: impl Fn(&E) + 'static) {
        self.handlers
            .borrow_mut()
            .insert(topic.into(), Rc::new(handler));
    }

    /// Removes the handler for `topic`, if any.
    pub fn unsubscribe(&self, topic: &str) {
        self.handlers.borrow_mut().remove(topic);
    }

    /// Invokes the handler registered for `topic`, if any.
    ///
    /// The handler is cloned out of the registry before it runs, so a
    /// handler may itself publish (or re-subscribe) without panicking on a
    /// held borrow.
    pub fn publish(&self, topic: &str, event: &E) {
        let handler = self.handlers.borrow().get(topic).cloned();
        if let Some(handler) = handler {
            handler(event);
        }
    }

    /// True when a handler is registered for `topic`.
    pub fn is_subscribed(&self, topic: &str) -> bool {
        self.handlers.borrow().contains_key(topic)
    }
}
