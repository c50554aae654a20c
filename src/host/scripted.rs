// Scripted in-memory host document.
// Exposes the members of one naming variant (or none), keeps a DOM-style
// listener table, and lets the caller decide how each request/exit call
// behaves. Used by this crate's tests and by embedders testing code that
// sits on top of the facade.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use futures::channel::oneshot;
use futures::future::{self, FutureExt};

use super::types::*;
use crate::detect::{NamingVariant, Slot};
use crate::error::HostError;
use crate::events::Listener;

/// How the scripted host answers a request or exit call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostBehavior {
    /// Apply the transition and fire the change event before returning; no future.
    Immediate,
    /// Apply the transition, fire the change event, return an already-resolved future.
    Promise,
    /// Return a future that stays pending until `settle_deferred`; nothing
    /// else happens until the caller drives `enter` / `leave` / `fire`.
    Deferred,
    /// Fire the error event and return a future rejected with this error.
    Reject(HostError),
    /// Fail synchronously with this error.
    Throw(HostError),
    /// Return nothing and never transition.
    Ignore,
}

/// One method invocation seen by the scripted host.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    /// Element the method was called on; `None` for document methods
    pub target: Option<ElementRef>,
    pub options: Option<RequestOptions>,
}

enum Transition {
    Enter(ElementRef),
    Leave,
}

pub struct ScriptedDocument {
    root: ElementRef,
    variant: Option<NamingVariant>,
    members: RefCell<HashMap<String, HostValue>>,
    element_methods: RefCell<HashSet<String>>,
    listeners: RefCell<HashMap<String, Vec<Listener>>>,
    request_behavior: RefCell<HostBehavior>,
    exit_behavior: RefCell<HostBehavior>,
    deferred: RefCell<Vec<oneshot::Sender<Result<(), HostError>>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedDocument {
    /// A document exposing no full-screen members at all.
    pub fn bare() -> Self {
        Self {
            root: ElementRef::new("html"),
            variant: None,
            members: RefCell::new(HashMap::new()),
            element_methods: RefCell::new(HashSet::new()),
            listeners: RefCell::new(HashMap::new()),
            request_behavior: RefCell::new(HostBehavior::Promise),
            exit_behavior: RefCell::new(HostBehavior::Promise),
            deferred: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A document exposing `variant`'s members, enabled and not full-screen.
    pub fn with_variant(variant: &NamingVariant) -> Self {
        let doc = Self {
            variant: Some(*variant),
            ..Self::bare()
        };
        {
            let mut members = doc.members.borrow_mut();
            members.insert(variant.name(Slot::Exit).to_string(), HostValue::Function);
            members.insert(variant.name(Slot::Element).to_string(), HostValue::Null);
            // Legacy WebKit: the enabled slot names the exit method, leave it callable
            members
                .entry(variant.name(Slot::Enabled).to_string())
                .or_insert(HostValue::Bool(true));
        }
        doc.element_methods
            .borrow_mut()
            .insert(variant.name(Slot::Request).to_string());
        doc
    }

    pub fn variant(&self) -> Option<&NamingVariant> {
        self.variant.as_ref()
    }

    // ============ Shape ============

    pub fn set_property(&self, name: &str, value: HostValue) {
        self.members.borrow_mut().insert(name.to_string(), value);
    }

    pub fn remove_property(&self, name: &str) {
        self.members.borrow_mut().remove(name);
    }

    pub fn set_request_behavior(&self, behavior: HostBehavior) {
        *self.request_behavior.borrow_mut() = behavior;
    }

    pub fn set_exit_behavior(&self, behavior: HostBehavior) {
        *self.exit_behavior.borrow_mut() = behavior;
    }

    // ============ Host-side actions ============

    /// Enter full-screen on the host's own initiative and fire the change event.
    pub fn enter(&self, element: &ElementRef) {
        self.apply(Transition::Enter(element.clone()));
    }

    /// Leave full-screen (user pressed Esc, OS took focus, ...).
    pub fn leave(&self) {
        self.apply(Transition::Leave);
    }

    /// Dispatch `event` to its current listeners.
    pub fn fire(&self, event: &str) {
        self.dispatch(HostEvent::new(event));
    }

    pub fn fire_change(&self) {
        if let Some(name) = self.variant_name(Slot::ChangeEvent) {
            self.fire(name);
        }
    }

    pub fn fire_error(&self) {
        if let Some(name) = self.variant_name(Slot::ErrorEvent) {
            self.fire(name);
        }
    }

    /// Settle every pending `Deferred` call with `result`. Returns how many were settled.
    pub fn settle_deferred(&self, result: Result<(), HostError>) -> usize {
        let pending: Vec<_> = self.deferred.borrow_mut().drain(..).collect();
        let count = pending.len();
        for tx in pending {
            let _ = tx.send(result.clone());
        }
        count
    }

    /// Drop every registered listener, as a torn-down document would.
    pub fn clear_listeners(&self) {
        let dropped: Vec<_> = self.listeners.borrow_mut().drain().collect();
        log::debug!("[ScriptedDocument] Cleared listeners for {} events", dropped.len());
    }

    // ============ Inspection ============

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .get(event)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    // ============ Internal helpers ============

    fn variant_name(&self, slot: Slot) -> Option<&'static str> {
        self.variant.as_ref().map(|variant| variant.name(slot))
    }

    fn is_registered(&self, event: &str, listener: &Listener) -> bool {
        self.listeners
            .borrow()
            .get(event)
            .map(|list| list.contains(listener))
            .unwrap_or(false)
    }

    fn dispatch(&self, event: HostEvent) {
        // Snapshot first: listeners may add/remove registrations while running.
        let snapshot = self
            .listeners
            .borrow()
            .get(&event.name)
            .cloned()
            .unwrap_or_default();

        log::debug!(
            "[ScriptedDocument] Dispatching '{}' to {} listener(s)",
            event.name,
            snapshot.len()
        );

        for listener in snapshot {
            if self.is_registered(&event.name, &listener) {
                listener.call(&event);
            }
        }
    }

    fn apply(&self, transition: Transition) {
        let (Some(element_prop), Some(change)) = (
            self.variant_name(Slot::Element),
            self.variant_name(Slot::ChangeEvent),
        ) else {
            log::warn!("[ScriptedDocument] No naming variant, ignoring transition");
            return;
        };

        let event = match transition {
            Transition::Enter(element) => {
                self.set_property(element_prop, HostValue::Element(element.clone()));
                HostEvent::new(change).with_target(element)
            }
            Transition::Leave => {
                let previous = self.property(element_prop).as_element().cloned();
                self.set_property(element_prop, HostValue::Null);
                match previous {
                    Some(element) => HostEvent::new(change).with_target(element),
                    None => HostEvent::new(change),
                }
            }
        };
        self.dispatch(event);
    }

    fn perform(&self, behavior: HostBehavior, transition: Transition) -> Result<HostCall, HostError> {
        match behavior {
            HostBehavior::Immediate => {
                self.apply(transition);
                Ok(HostCall::Completed)
            }
            HostBehavior::Promise => {
                self.apply(transition);
                Ok(HostCall::Pending(future::ready(Ok(())).boxed_local()))
            }
            HostBehavior::Deferred => {
                let (tx, rx) = oneshot::channel();
                self.deferred.borrow_mut().push(tx);
                Ok(HostCall::Pending(
                    async move {
                        rx.await.unwrap_or_else(|_| {
                            Err(HostError::new("AbortError", "document was discarded"))
                        })
                    }
                    .boxed_local(),
                ))
            }
            HostBehavior::Reject(error) => {
                self.fire_error();
                Ok(HostCall::Pending(future::ready(Err(error)).boxed_local()))
            }
            HostBehavior::Throw(error) => Err(error),
            HostBehavior::Ignore => Ok(HostCall::Completed),
        }
    }

    fn record(&self, method: &str, target: Option<&ElementRef>, options: Option<&RequestOptions>) {
        self.calls.borrow_mut().push(RecordedCall {
            method: method.to_string(),
            target: target.cloned(),
            options: options.cloned(),
        });
    }
}

impl HostDocument for ScriptedDocument {
    fn has_member(&self, name: &str) -> bool {
        self.members.borrow().contains_key(name)
    }

    fn property(&self, name: &str) -> HostValue {
        self.members
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(HostValue::Undefined)
    }

    fn document_element(&self) -> ElementRef {
        self.root.clone()
    }

    fn call_element_method(
        &self,
        element: &ElementRef,
        method: &str,
        options: Option<&RequestOptions>,
    ) -> Result<HostCall, HostError> {
        self.record(method, Some(element), options);

        if !self.element_methods.borrow().contains(method) {
            return Err(HostError::type_error(format!(
                "element.{} is not a function",
                method
            )));
        }

        let behavior = self.request_behavior.borrow().clone();
        self.perform(behavior, Transition::Enter(element.clone()))
    }

    fn call_document_method(&self, method: &str) -> Result<HostCall, HostError> {
        self.record(method, None, None);

        if self.property(method) != HostValue::Function {
            return Err(HostError::type_error(format!(
                "document.{} is not a function",
                method
            )));
        }

        let behavior = self.exit_behavior.borrow().clone();
        self.perform(behavior, Transition::Leave)
    }

    fn add_event_listener(&self, event: &str, listener: &Listener) {
        let mut listeners = self.listeners.borrow_mut();
        let list = listeners.entry(event.to_string()).or_default();
        if !list.contains(listener) {
            list.push(listener.clone());
        }
    }

    fn remove_event_listener(&self, event: &str, listener: &Listener) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(list) = listeners.get_mut(event) {
            list.retain(|registered| registered != listener);
            if list.is_empty() {
                listeners.remove(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::variants::{STANDARD, WEBKIT_LEGACY};
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, Listener) {
        let hits = Rc::new(Cell::new(0));
        let inner = hits.clone();
        (hits, Listener::new(move |_| inner.set(inner.get() + 1)))
    }

    #[test]
    fn test_variant_members_are_exposed() {
        let doc = ScriptedDocument::with_variant(&STANDARD);
        assert!(doc.has_member("exitFullscreen"));
        assert_eq!(doc.property("fullscreenElement"), HostValue::Null);
        assert_eq!(doc.property("fullscreenEnabled"), HostValue::Bool(true));
        assert_eq!(doc.property("webkitFullscreenElement"), HostValue::Undefined);
        assert!(!doc.has_member("requestFullscreen")); // lives on elements
    }

    #[test]
    fn test_legacy_enabled_slot_reads_the_cancel_method() {
        let doc = ScriptedDocument::with_variant(&WEBKIT_LEGACY);
        assert_eq!(doc.property("webkitCancelFullScreen"), HostValue::Function);
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let doc = ScriptedDocument::with_variant(&STANDARD);
        let (hits, listener) = counter();
        doc.add_event_listener("fullscreenchange", &listener);
        doc.add_event_listener("fullscreenchange", &listener.clone());
        assert_eq!(doc.listener_count("fullscreenchange"), 1);

        doc.fire_change();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_enter_and_leave_update_state_and_fire() {
        let doc = ScriptedDocument::with_variant(&STANDARD);
        let (hits, listener) = counter();
        doc.add_event_listener("fullscreenchange", &listener);

        let video = ElementRef::new("video");
        doc.enter(&video);
        assert_eq!(doc.property("fullscreenElement"), HostValue::Element(video));
        doc.leave();
        assert_eq!(doc.property("fullscreenElement"), HostValue::Null);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_listener_removed_mid_dispatch_is_skipped() {
        let doc = Rc::new(ScriptedDocument::with_variant(&STANDARD));
        let (second_hits, second) = counter();

        let doc_in = doc.clone();
        let second_in = second.clone();
        let first = Listener::new(move |_| {
            doc_in.remove_event_listener("fullscreenchange", &second_in);
        });

        doc.add_event_listener("fullscreenchange", &first);
        doc.add_event_listener("fullscreenchange", &second);
        doc.fire_change();
        assert_eq!(second_hits.get(), 0);

        doc.remove_event_listener("fullscreenchange", &first);
    }

    #[test]
    fn test_missing_methods_fail_synchronously() {
        let doc = ScriptedDocument::bare();
        let root = doc.document_element();
        let err = doc
            .call_element_method(&root, "requestFullscreen", None)
            .unwrap_err();
        assert_eq!(err.name, "TypeError");
        assert!(doc.call_document_method("exitFullscreen").is_err());
        assert_eq!(doc.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_deferred_call_settles_on_demand() {
        let doc = ScriptedDocument::with_variant(&STANDARD);
        doc.set_request_behavior(HostBehavior::Deferred);
        let root = doc.document_element();

        let call = doc
            .call_element_method(&root, "requestFullscreen", None)
            .unwrap();
        let HostCall::Pending(fut) = call else {
            panic!("deferred call should return a future");
        };
        assert_eq!(doc.settle_deferred(Err(HostError::not_allowed("denied"))), 1);
        assert_eq!(fut.await, Err(HostError::not_allowed("denied")));
        // nothing transitioned
        assert_eq!(doc.property("fullscreenElement"), HostValue::Null);
    }

    #[test]
    fn test_reject_fires_error_event() {
        let doc = ScriptedDocument::with_variant(&STANDARD);
        doc.set_request_behavior(HostBehavior::Reject(HostError::not_allowed("no gesture")));
        let (hits, listener) = counter();
        doc.add_event_listener("fullscreenerror", &listener);

        let root = doc.document_element();
        let call = doc.call_element_method(&root, "requestFullscreen", None);
        assert!(matches!(call, Ok(HostCall::Pending(_))));
        assert_eq!(hits.get(), 1);

        doc.remove_event_listener("fullscreenerror", &listener);
        assert_eq!(doc.listener_count("fullscreenerror"), 0);
    }
}
