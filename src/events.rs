// Listener handles and the two logical event kinds.
//
// A listener's identity is its allocation: clones of one `Listener` are the
// same registration, two listeners built from identical closures are not.
// Hosts compare listeners with `==` when removing them.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::HostEvent;

type Callback = Box<dyn Fn(&HostEvent)>;

struct ListenerInner {
    callback: Callback,
}

/// A callback that can be registered on the host's event dispatch table.
#[derive(Clone)]
pub struct Listener(Rc<ListenerInner>);

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&HostEvent) + 'static,
    {
        Self(Rc::new(ListenerInner {
            callback: Box::new(callback),
        }))
    }

    /// Build a listener whose callback holds a weak handle to itself,
    /// so it can deregister itself when it fires.
    pub(crate) fn new_cyclic<F>(build: F) -> Self
    where
        F: FnOnce(WeakListener) -> Callback,
    {
        Self(Rc::new_cyclic(|weak| ListenerInner {
            callback: build(WeakListener(weak.clone())),
        }))
    }

    pub fn call(&self, event: &HostEvent) {
        (self.0.callback)(event)
    }

    pub fn downgrade(&self) -> WeakListener {
        WeakListener(Rc::downgrade(&self.0))
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&Rc::as_ptr(&self.0)).finish()
    }
}

/// Non-owning handle to a listener.
#[derive(Clone)]
pub struct WeakListener(Weak<ListenerInner>);

impl WeakListener {
    pub fn upgrade(&self) -> Option<Listener> {
        self.0.upgrade().map(Listener)
    }
}

impl fmt::Debug for WeakListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakListener").field(&self.0.as_ptr()).finish()
    }
}

// ============ Logical event kinds ============

/// The two logical notifications the facade exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Error,
}

impl EventKind {
    /// Parse a logical event name. Anything other than "change" / "error"
    /// yields `None`, which callers treat as a silent no-op.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "change" => Some(Self::Change),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn event() -> HostEvent {
        HostEvent::new("fullscreenchange")
    }

    #[test]
    fn test_listener_identity_is_the_allocation() {
        let a = Listener::new(|_| {});
        let b = Listener::new(|_| {});
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_listener_call_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let listener = Listener::new(move |e| {
            assert_eq!(e.name, "fullscreenchange");
            counter.set(counter.get() + 1);
        });

        listener.call(&event());
        listener.call(&event());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_cyclic_listener_sees_itself() {
        let seen_self = Rc::new(Cell::new(false));
        let flag = seen_self.clone();
        let slot: Rc<std::cell::RefCell<Option<Listener>>> = Rc::default();
        let slot_in = slot.clone();

        let listener = Listener::new_cyclic(move |me| {
            let callback: Callback = Box::new(move |_: &HostEvent| {
                let me = me.upgrade().expect("alive while being called");
                flag.set(slot_in.borrow().as_ref() == Some(&me));
            });
            callback
        });
        *slot.borrow_mut() = Some(listener.clone());

        listener.call(&event());
        assert!(seen_self.get());
        slot.borrow_mut().take();
    }

    #[test]
    fn test_weak_listener_dies_with_last_strong_handle() {
        let listener = Listener::new(|_| {});
        let weak = listener.downgrade();
        assert!(weak.upgrade().is_some());

        drop(listener);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_event_kind_parse() {
        assert_eq!(EventKind::parse("change"), Some(EventKind::Change));
        assert_eq!(EventKind::parse("error"), Some(EventKind::Error));
        assert_eq!(EventKind::parse("Change"), None);
        assert_eq!(EventKind::parse("resize"), None);
        assert_eq!(EventKind::parse(""), None);
    }
}
