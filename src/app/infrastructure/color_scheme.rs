//! Process-wide ambient color scheme.
//!
//! Screens read the current scheme once when they mount and subscribe for
//! changes. A [`Subscription`] removes its listener when dropped, so a screen
//! that owns its subscription cannot outlive its registration.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::app::domain::theme::ColorScheme;

type Listener = Rc<RefCell<dyn FnMut(ColorScheme)>>;

struct BusInner {
    current: ColorScheme,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Clone)]
pub struct ColorSchemeBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ColorSchemeBus {
    pub fn new(initial: ColorScheme) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                current: initial,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn current(&self) -> ColorScheme {
        self.inner.borrow().current
    }

    /// Set the ambient scheme. Listeners run only when the value changes.
    pub fn publish(&self, scheme: ColorScheme) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == scheme {
                return;
            }
            inner.current = scheme;
            inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        log::debug!("Ambient color scheme is now {}", scheme.as_str());
        for listener in listeners {
            (*listener.borrow_mut())(scheme);
        }
    }

    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(ColorScheme) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        inner.listeners.push((id, listener));
        Subscription {
            bus: Rc::downgrade(&self.inner),
            id,
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Registration guard returned by [`ColorSchemeBus::subscribe`].
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
