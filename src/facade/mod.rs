// Full-screen facade: request/exit/toggle, live state queries and
// change/error subscriptions, all expressed through the canonical mapping.

mod completion;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::detect::{self, CanonicalMapping, Capability};
use crate::error::FullscreenError;
use crate::events::{EventKind, Listener};
use crate::host::{ElementRef, HostDocument, RequestOptions};
use completion::Completion;

/// Point-in-time view of the host's full-screen state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullscreenState {
    pub is_fullscreen: bool,
    pub element: Option<ElementRef>,
    pub is_enabled: bool,
}

/// Entry point: a host that either supports full-screen or does not.
///
/// The disabled state is terminal and exposes nothing but `is_enabled() == false`.
pub enum FullscreenApi<H: HostDocument + 'static> {
    Disabled,
    Enabled(Fullscreen<H>),
}

impl<H: HostDocument + 'static> FullscreenApi<H> {
    /// Probe `host` once and build the matching facade.
    pub fn new(host: Rc<H>) -> Self {
        let capability = detect::detect(&*host);
        Self::from_capability(host, capability)
    }

    /// Build from a capability that was already detected.
    pub fn from_capability(host: Rc<H>, capability: Capability) -> Self {
        match capability {
            Capability::Supported(mapping) => FullscreenApi::Enabled(Fullscreen::new(host, mapping)),
            Capability::Unsupported => FullscreenApi::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            FullscreenApi::Disabled => false,
            FullscreenApi::Enabled(fullscreen) => fullscreen.is_enabled(),
        }
    }

    pub fn supported(&self) -> Option<&Fullscreen<H>> {
        match self {
            FullscreenApi::Enabled(fullscreen) => Some(fullscreen),
            FullscreenApi::Disabled => None,
        }
    }

    pub fn into_supported(self) -> Option<Fullscreen<H>> {
        match self {
            FullscreenApi::Enabled(fullscreen) => Some(fullscreen),
            FullscreenApi::Disabled => None,
        }
    }
}

impl<H: HostDocument + 'static> fmt::Debug for FullscreenApi<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullscreenApi::Disabled => f.write_str("Disabled"),
            FullscreenApi::Enabled(fullscreen) => f.debug_tuple("Enabled").field(fullscreen).finish(),
        }
    }
}

/// Full-screen operations on a host whose naming variant is known.
pub struct Fullscreen<H: HostDocument + 'static> {
    host: Rc<H>,
    mapping: CanonicalMapping,
}

impl<H: HostDocument + 'static> Fullscreen<H> {
    pub fn new(host: Rc<H>, mapping: CanonicalMapping) -> Self {
        Self { host, mapping }
    }

    /// The concrete names in use.
    pub fn raw(&self) -> &CanonicalMapping {
        &self.mapping
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    // ============ Transitions ============

    /// Ask the host to show `element` (default: the root element) full-screen.
    ///
    /// Resolves on the next change event. A host rejection, synchronous or
    /// through the host's own future, is returned as-is. There is no timeout.
    pub async fn request(
        &self,
        element: Option<&ElementRef>,
        options: Option<&RequestOptions>,
    ) -> Result<(), FullscreenError> {
        let target = element
            .cloned()
            .unwrap_or_else(|| self.host.document_element());
        log::info!(
            "[Fullscreen] Requesting full-screen for '{}' via {}",
            target,
            self.mapping.request_method()
        );

        let completion = Completion::arm(&self.host, self.mapping.event_name(EventKind::Change));
        let call = self
            .host
            .call_element_method(&target, self.mapping.request_method(), options);

        completion.settle(call).await.map_err(|e| {
            log::warn!("[Fullscreen] Request for '{}' failed: {}", target, e);
            e
        })
    }

    /// Leave full-screen. A no-op when not currently full-screen.
    pub async fn exit(&self) -> Result<(), FullscreenError> {
        if !self.is_fullscreen() {
            log::debug!("[Fullscreen] Exit requested while not full-screen, nothing to do");
            return Ok(());
        }
        log::info!("[Fullscreen] Exiting full-screen via {}", self.mapping.exit_method());

        let completion = Completion::arm(&self.host, self.mapping.event_name(EventKind::Change));
        let call = self.host.call_document_method(self.mapping.exit_method());

        completion.settle(call).await.map_err(|e| {
            log::warn!("[Fullscreen] Exit failed: {}", e);
            e
        })
    }

    pub async fn toggle(
        &self,
        element: Option<&ElementRef>,
        options: Option<&RequestOptions>,
    ) -> Result<(), FullscreenError> {
        if self.is_fullscreen() {
            self.exit().await
        } else {
            self.request(element, options).await
        }
    }

    // ============ Subscriptions ============

    /// Subscribe `listener` to a logical event ("change" or "error").
    /// Other names are ignored.
    pub fn on(&self, event: &str, listener: &Listener) {
        match EventKind::parse(event) {
            Some(kind) => self
                .host
                .add_event_listener(self.mapping.event_name(kind), listener),
            None => log::debug!("[Fullscreen] Ignoring subscription to unknown event '{}'", event),
        }
    }

    /// Remove a listener previously passed to `on` for the same logical event.
    pub fn off(&self, event: &str, listener: &Listener) {
        match EventKind::parse(event) {
            Some(kind) => self
                .host
                .remove_event_listener(self.mapping.event_name(kind), listener),
            None => log::debug!("[Fullscreen] Ignoring unsubscription from unknown event '{}'", event),
        }
    }

    pub fn onchange(&self, listener: &Listener) {
        self.on(EventKind::Change.as_str(), listener);
    }

    pub fn onerror(&self, listener: &Listener) {
        self.on(EventKind::Error.as_str(), listener);
    }

    // ============ Live state ============

    pub fn is_fullscreen(&self) -> bool {
        self.host
            .property(self.mapping.element_property())
            .is_truthy()
    }

    pub fn element(&self) -> Option<ElementRef> {
        self.host
            .property(self.mapping.element_property())
            .as_element()
            .cloned()
    }

    /// Coerced: legacy hosts report a method or a number here.
    pub fn is_enabled(&self) -> bool {
        self.host
            .property(self.mapping.enabled_property())
            .is_truthy()
    }

    pub fn snapshot(&self) -> FullscreenState {
        FullscreenState {
            is_fullscreen: self.is_fullscreen(),
            element: self.element(),
            is_enabled: self.is_enabled(),
        }
    }
}

impl<H: HostDocument + 'static> fmt::Debug for Fullscreen<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fullscreen")
            .field("variant", &self.mapping.variant_label())
            .finish_non_exhaustive()
    }
}

// ============ Tests ============
