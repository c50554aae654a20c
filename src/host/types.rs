// Host abstraction types: the boundary between the facade and whatever
// actually renders full-screen (a browser document, a webview bridge, the
// scripted document used in tests).

use std::fmt;

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::events::Listener;

/// Opaque reference to a host element (the thing that goes full-screen).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document property as the host reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Element(ElementRef),
    /// A callable member (methods read as properties)
    Function,
}

impl HostValue {
    /// Host truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            HostValue::Undefined | HostValue::Null => false,
            HostValue::Bool(b) => *b,
            HostValue::Number(n) => *n != 0.0 && !n.is_nan(),
            HostValue::Text(s) => !s.is_empty(),
            HostValue::Element(_) | HostValue::Function => true,
        }
    }

    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            HostValue::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// How the host should treat its own navigation UI while full-screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationUi {
    #[default]
    Auto,
    Show,
    Hide,
}

/// Options forwarded verbatim to the host's request method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(rename = "navigationUI", default)]
    pub navigation_ui: NavigationUi,
}

/// An event as delivered to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEvent {
    /// Concrete (host-specific) event name
    pub name: String,
    /// Element the event was dispatched for, if any
    pub target: Option<ElementRef>,
}

impl HostEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: ElementRef) -> Self {
        self.target = Some(target);
        self
    }
}

/// What a host method call returned.
pub enum HostCall {
    /// The method returned nothing; completion is only observable via events.
    Completed,
    /// The method returned its own future.
    Pending(LocalBoxFuture<'static, Result<(), HostError>>),
}

impl fmt::Debug for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCall::Completed => f.write_str("Completed"),
            HostCall::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Trait every host document must implement.
///
/// All names passed in are concrete, host-specific names taken from the
/// canonical mapping. Implementations are single-threaded; the facade holds
/// them behind `Rc`.
pub trait HostDocument {
    /// Existence probe on the document object (`name in document`).
    fn has_member(&self, name: &str) -> bool;

    /// Read a document property. Missing members read as `Undefined`.
    fn property(&self, name: &str) -> HostValue;

    /// The document's root element, used when a request names no element.
    fn document_element(&self) -> ElementRef;

    /// Invoke `method` on `element`. A synchronous failure is an `Err`.
    fn call_element_method(
        &self,
        element: &ElementRef,
        method: &str,
        options: Option<&RequestOptions>,
    ) -> Result<HostCall, HostError>;

    /// Invoke `method` on the document itself.
    fn call_document_method(&self, method: &str) -> Result<HostCall, HostError>;

    /// Register `listener` for `event`. Registering the same listener twice
    /// for one event is a no-op.
    ///
    /// The host must keep a strong handle to `listener` until it is removed.
    /// Pending requests hold their completion listener only weakly, so a host
    /// that drops it early makes them resolve as `Abandoned`.
    fn add_event_listener(&self, event: &str, listener: &Listener);

    /// Remove `listener` from `event`. Unknown listeners are ignored. A
    /// listener removed during a dispatch must not be invoked later in that
    /// same dispatch.
    fn remove_event_listener(&self, event: &str, listener: &Listener);
}
